//! Line-oriented markup converter.
//!
//! The input language is parsed by a character-driven state machine
//! ([`parser`]) that emits semantic events into a [`generator::Generator`].
//! Two generators are provided: HTML and TeX. Presentation is controlled
//! through in-document variables; text is post-processed with
//! language-specific punctuation and hyphenation rules ([`language`]).
//!
//! The usual entry point is [`convert`]:
//!
//! ```
//! use textml_core::{GeneratorKind, convert};
//!
//! let html = convert("Привет, мир!", GeneratorKind::Html).unwrap();
//! assert!(html.contains("мир"));
//! ```

mod align;
mod error;
pub mod generator;
pub mod language;
mod markup;
pub mod parser;
mod vars;

pub use align::Alignment;
pub use error::{ConvertError, ErrorKind, Result};
pub use generator::{Generator, GeneratorKind};
pub use markup::MarkupBuilder;
pub use vars::{VAR_FALSE, VAR_TRUE, VarId, Variables};

/// Converts a whole input document with the given target format.
pub fn convert(input: &str, kind: GeneratorKind) -> Result<String> {
    let mut generator = generator::create(kind);
    parser::Parser::new().parse(input, generator.as_mut())?;
    Ok(generator.into_output())
}
