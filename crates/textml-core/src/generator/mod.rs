//! Output generators.
//!
//! The parser drives a [`Generator`] through one method per semantic event.
//! A generator owns the output buffer, the line markup buffer, the variable
//! store and a stack of open block frames; the concrete implementations
//! differ only in the text they emit for each event.

mod html;
mod tex;

pub use html::HtmlGenerator;
pub use tex::TexGenerator;

use std::str::FromStr;

use crate::align::Alignment;
use crate::error::{ConvertError, ErrorKind, Result};

/// One dimension of an image size: a value in pixels or percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimension {
    pub value: u32,
    pub percent: bool,
}

/// Requested image size; `None` sides were given as `?` wildcards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageSize {
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
}

/// Target output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    Html,
    Tex,
}

impl FromStr for GeneratorKind {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "html" => Ok(Self::Html),
            "tex" => Ok(Self::Tex),
            _ => Err(ErrorKind::UnsupportedGeneratorType.into()),
        }
    }
}

/// Creates the generator for a target format.
#[must_use]
pub fn create(kind: GeneratorKind) -> Box<dyn Generator> {
    match kind {
        GeneratorKind::Html => Box::new(HtmlGenerator::new()),
        GeneratorKind::Tex => Box::new(TexGenerator::new()),
    }
}

/// Receiver of the parser's semantic events.
///
/// Tag events open a block frame which a later [`close_tag`] pops; character
/// and decoration events fill the current line; [`line_end`] flushes the
/// line into the innermost open block.
///
/// [`close_tag`]: Generator::close_tag
/// [`line_end`]: Generator::line_end
pub trait Generator {
    /// Opens the document frame; text inside it is discarded.
    fn document(&mut self);

    /// Opens a header block at `level` (1-based).
    fn header(&mut self, level: u8) -> Result<()>;

    /// Opens an explicit paragraph.
    fn paragraph(&mut self, alignment: Alignment) -> Result<()>;

    /// Declares an inline link tag; following lines build its value.
    fn link(&mut self, name: &str) -> Result<()>;

    /// Opens a citation block.
    fn cite(&mut self, alignment: Alignment) -> Result<()>;

    /// Opens a verse block (line breaks are preserved).
    fn verse(&mut self);

    /// Opens a preformatted block (no decoration, no escaping of layout).
    fn preformatted(&mut self);

    /// An explicit vertical break; no frame is opened.
    fn line_break(&mut self);

    /// Opens a flat ordered list; every flushed line becomes one item.
    fn ordered_list(&mut self);

    /// Opens a flat unordered list.
    fn unordered_list(&mut self);

    /// Opens a comment frame; text inside it is discarded.
    fn comment(&mut self);

    /// Opens a section frame.
    fn section(&mut self);

    /// A horizontal rule; no frame is opened.
    fn horizontal_rule(&mut self);

    /// Declares (or resets) a variable; following lines are captured as its
    /// value, verbatim.
    fn variable(&mut self, name: &str);

    /// Opens an image; the first following line is the image location.
    fn image(&mut self, size: ImageSize, alignment: Alignment) -> Result<()>;

    /// An ordered multilevel list item at the 1-based `level`.
    fn ordered_list_item(&mut self, level: usize) -> Result<()>;

    /// An unordered multilevel list item.
    fn unordered_list_item(&mut self, level: usize) -> Result<()>;

    /// Ends the innermost multilevel list chain.
    fn terminator(&mut self);

    /// Closes the innermost open frame.
    fn close_tag(&mut self) -> Result<()>;

    /// Injects a declared variable's value into the current line.
    fn inject_variable(&mut self, name: &str) -> Result<()>;

    /// Starts rendering a declared inline tag around the following text.
    fn open_inline_tag(&mut self, name: &str);

    /// Stops rendering the current inline tag.
    fn close_inline_tag(&mut self);

    /// One character of line text.
    fn text_char(&mut self, c: char);

    fn open_bold(&mut self);

    fn close_bold(&mut self);

    fn open_italic(&mut self);

    fn close_italic(&mut self);

    /// Marks the stress on the preceding character.
    fn stress_mark(&mut self);

    /// Suppresses the implicit break before the next line.
    fn line_continue(&mut self);

    /// Flushes the current line into the innermost open block.
    fn line_end(&mut self) -> Result<()>;

    /// Ends the input; closes the document epilogue if one was opened.
    fn close_document(&mut self);

    /// Consumes the generator, returning the accumulated output.
    fn into_output(self: Box<Self>) -> String;
}
