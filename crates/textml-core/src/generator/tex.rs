//! TeX generator.

use std::fmt::Write as _;

use textml_lists::{ListFormat, ListItemsCounter, MAX_LEVELS};

use crate::align::Alignment;
use crate::error::{ErrorKind, Result};
use crate::generator::{Generator, ImageSize};
use crate::language::{Language, QuoteKind, RussianLanguage, TokenKind};
use crate::markup::MarkupBuilder;
use crate::vars::{VAR_FALSE, VarId, Variables};

const DASH: &str = "---";
const SHY: &str = "\\-";
const STRESS_MARK: &str = "\\'";

const DEFAULT_VARS: &[(&str, &str)] = &[
    ("tex_chapter_numbers", VAR_FALSE),
    ("tex_section_numbers", VAR_FALSE),
    ("tex_subsection_numbers", VAR_FALSE),
    ("tex_subsubsection_numbers", VAR_FALSE),
    ("tex_chapter_line_skip", ""),
    ("tex_chapter_subtitle_format", ""),
    ("tex_br_size", "10pt"),
    ("tex_hr_width", "100pt"),
    ("tex_hr_height", "1pt"),
    ("tex_ml_list_format", ""),
];

fn quote_text(kind: QuoteKind) -> Option<&'static str> {
    Some(match kind {
        QuoteKind::FrenchOpen => "<<",
        QuoteKind::FrenchClose => ">>",
        QuoteKind::GermanOpen => ",,",
        QuoteKind::GermanClose | QuoteKind::EnglishClose => "''",
        QuoteKind::EnglishOpen => "``",
        QuoteKind::EnglishSingleOpen => "`",
        QuoteKind::EnglishSingleClose => "'",
    })
}

/// An open construct on the tag stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Document,
    Chapter,
    Section,
    Subsection,
    Subsubsection,
    Paragraph,
    Quotation,
    Verse,
    Verbatim,
    Itemize,
    Enumerate,
    DocSection,
    Comment,
    Link,
    Variable,
    Image,
    MlItemize,
    MlEnumerate,
}

impl Frame {
    /// Environment name for `\begin`/`\end` frames.
    fn environment(self) -> Option<&'static str> {
        Some(match self {
            Self::Quotation => "quotation",
            Self::Verse => "verse",
            Self::Verbatim => "verbatim",
            Self::Itemize | Self::MlItemize => "itemize",
            Self::Enumerate | Self::MlEnumerate => "enumerate",
            _ => return None,
        })
    }

    /// Sectioning command for header frames.
    fn command(self) -> Option<(&'static str, &'static str)> {
        Some(match self {
            Self::Chapter => ("chapter", "tex_chapter_numbers"),
            Self::Section => ("section", "tex_section_numbers"),
            Self::Subsection => ("subsection", "tex_subsection_numbers"),
            Self::Subsubsection => ("subsubsection", "tex_subsubsection_numbers"),
            _ => return None,
        })
    }
}

#[derive(Debug, Clone)]
struct Link {
    name: String,
    value: String,
}

/// Generates a TeX fragment.
pub struct TexGenerator {
    out: String,
    markup: MarkupBuilder,
    vars: Variables,
    language: RussianLanguage,
    stack: Vec<Frame>,
    links: Vec<Link>,
    capturing_link: Option<usize>,
    current_var: Option<VarId>,
    continue_line: bool,
    place_line_break: bool,
    /// The first image content line is the graphics path; the rest are
    /// dropped.
    image_line_seen: bool,
    counter: ListItemsCounter,
}

impl Default for TexGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TexGenerator {
    #[must_use]
    pub fn new() -> Self {
        let mut vars = Variables::new();
        for (name, value) in DEFAULT_VARS {
            vars.reset(name, value);
        }

        Self {
            out: String::new(),
            markup: MarkupBuilder::new(),
            vars,
            language: RussianLanguage,
            stack: Vec::new(),
            links: Vec::new(),
            capturing_link: None,
            current_var: None,
            continue_line: false,
            place_line_break: false,
            image_line_seen: false,
            counter: ListItemsCounter::new(),
        }
    }

    fn var_text(&self, name: &str) -> String {
        self.vars
            .lookup(name)
            .map(|id| self.vars.get(id).text())
            .unwrap_or_default()
    }

    fn var_render(&self, name: &str) -> String {
        self.vars
            .lookup(name)
            .map(|id| self.vars.get(id).markup().render())
            .unwrap_or_default()
    }

    fn boolean(&self, name: &str) -> bool {
        self.vars
            .lookup(name)
            .is_some_and(|id| self.vars.get(id).as_boolean())
    }

    fn open_frame(&mut self, frame: Frame) {
        self.stack.push(frame);
        self.place_line_break = false;
    }

    fn open_environment(&mut self, frame: Frame) {
        if let Some(name) = frame.environment() {
            writeln!(self.out, "\\begin{{{name}}}").unwrap();
        }
        self.open_frame(frame);
    }

    fn close_environment(&mut self, frame: Frame) {
        if let Some(name) = frame.environment() {
            write!(self.out, "\\end{{{name}}}\n\n").unwrap();
        }
    }

    /// Punctuation always; hyphenation only for words joined by a hyphen,
    /// so that compounds may break at the syllables too.
    fn decorate(&mut self) {
        self.language.punctuate(&mut self.markup, DASH, quote_text);

        let language = self.language;
        let text = self.markup.text().to_vec();
        let mut last_word = None;
        let mut hyphenate_next = false;

        for token in language.tokens(&text) {
            match token.kind {
                TokenKind::Word => {
                    if hyphenate_next {
                        language.hyphenate(&mut self.markup, token.start, token.len, SHY);
                        hyphenate_next = false;
                    }
                    last_word = Some(token);
                }
                TokenKind::SingleChar if text[token.start] == '-' => {
                    if let Some(word) = last_word.take() {
                        language.hyphenate(&mut self.markup, word.start, word.len, SHY);
                    }
                    hyphenate_next = true;
                }
                _ => {
                    last_word = None;
                    hyphenate_next = false;
                }
            }
        }
    }

    fn render_markup(&mut self) {
        let markup = std::mem::take(&mut self.markup);
        markup.render_into(&mut self.out);
        self.markup = markup;
    }

    /// Index prefix for an item line inside an enumerate, when a list
    /// format is configured.
    fn item_index(&self) -> Result<Option<String>> {
        let format_text = self.var_text("tex_ml_list_format");
        if format_text.is_empty() {
            return Ok(None);
        }
        let format = ListFormat::parse(&format_text)?;
        Ok(Some(format.index(self.counter.path())?))
    }

    fn flush_line(&mut self, top: Frame) -> Result<()> {
        match top {
            Frame::Chapter => {
                if self.place_line_break {
                    self.out.push_str("\\\\");
                    let skip = self.var_text("tex_chapter_line_skip");
                    if !skip.is_empty() {
                        write!(self.out, "[{skip}]").unwrap();
                    }
                    self.out.push('\n');
                    let format = self.var_render("tex_chapter_subtitle_format");
                    self.out.push_str(&format);
                }
                self.decorate();
                self.render_markup();
            }
            Frame::Section
            | Frame::Subsection
            | Frame::Subsubsection
            | Frame::Paragraph
            | Frame::Verse => {
                if self.place_line_break {
                    self.out.push_str("\\\\\n");
                }
                self.decorate();
                self.render_markup();
            }
            Frame::Verbatim => {
                if self.place_line_break {
                    self.out.push('\n');
                }
                self.render_markup();
            }
            Frame::Itemize | Frame::MlItemize => {
                if !self.markup.is_empty() {
                    self.out.push_str("\\item ");
                    self.render_markup();
                    self.out.push('\n');
                }
            }
            Frame::Enumerate | Frame::MlEnumerate => {
                if !self.markup.is_empty() {
                    match (top, self.item_index()?) {
                        (Frame::MlEnumerate, Some(index)) => {
                            write!(self.out, "\\item[{index}] ").unwrap();
                        }
                        _ => self.out.push_str("\\item "),
                    }
                    self.render_markup();
                    self.out.push('\n');
                }
            }
            Frame::Image => {
                if !self.image_line_seen {
                    self.render_markup();
                    self.image_line_seen = true;
                }
            }
            Frame::Document
            | Frame::Quotation
            | Frame::DocSection
            | Frame::Comment
            | Frame::Link
            | Frame::Variable => {}
        }
        Ok(())
    }

    fn list_item(&mut self, ordered: bool, level: usize) -> Result<()> {
        if level > MAX_LEVELS {
            return Err(ErrorKind::MaxListDepthExceeded.into());
        }

        let current = self.counter.depth();
        if level > current + 1 {
            return Err(ErrorKind::ListLevelHop.into());
        }

        if level == current + 1 {
            let frame = if ordered {
                Frame::MlEnumerate
            } else {
                Frame::MlItemize
            };
            self.open_environment(frame);
        } else {
            for _ in level..current {
                if let Some(frame) = self.stack.pop() {
                    self.close_environment(frame);
                }
            }
        }

        self.counter.increment(level);
        self.place_line_break = false;
        Ok(())
    }
}

impl Generator for TexGenerator {
    fn document(&mut self) {
        self.open_frame(Frame::Document);
    }

    fn header(&mut self, level: u8) -> Result<()> {
        let frame = match level {
            1 => Frame::Chapter,
            2 => Frame::Section,
            3 => Frame::Subsection,
            4 => Frame::Subsubsection,
            _ => return Err(ErrorKind::UnsupportedHeaderLevel.into()),
        };

        // Headers are starred out of numbering unless numbering was
        // requested for their level.
        if let Some((command, numbers_var)) = frame.command() {
            self.out.push('\\');
            self.out.push_str(command);
            if !self.boolean(numbers_var) {
                self.out.push('*');
            }
            self.out.push('{');
        }
        self.open_frame(frame);
        Ok(())
    }

    fn paragraph(&mut self, _alignment: Alignment) -> Result<()> {
        self.open_frame(Frame::Paragraph);
        Ok(())
    }

    fn link(&mut self, name: &str) -> Result<()> {
        if self.links.iter().any(|link| link.name == name) {
            return Err(ErrorKind::InlineTagAlreadyExists.into());
        }

        self.links.push(Link {
            name: name.to_owned(),
            value: String::new(),
        });
        self.capturing_link = Some(self.links.len() - 1);
        self.open_frame(Frame::Link);
        Ok(())
    }

    fn cite(&mut self, _alignment: Alignment) -> Result<()> {
        self.open_environment(Frame::Quotation);
        Ok(())
    }

    fn verse(&mut self) {
        self.open_environment(Frame::Verse);
    }

    fn preformatted(&mut self) {
        self.open_environment(Frame::Verbatim);
    }

    fn line_break(&mut self) {
        let size = self.var_text("tex_br_size");
        write!(self.out, "\\vspace{{{size}}}\n\n").unwrap();
        self.place_line_break = false;
    }

    fn ordered_list(&mut self) {
        self.open_environment(Frame::Enumerate);
    }

    fn unordered_list(&mut self) {
        self.open_environment(Frame::Itemize);
    }

    fn comment(&mut self) {
        self.open_frame(Frame::Comment);
    }

    fn section(&mut self) {
        self.open_frame(Frame::DocSection);
    }

    fn horizontal_rule(&mut self) {
        let width = self.var_text("tex_hr_width");
        let height = self.var_text("tex_hr_height");
        write!(self.out, "\\rule{{{width}}}{{{height}}}\n\n").unwrap();
        self.place_line_break = false;
    }

    fn variable(&mut self, name: &str) {
        self.current_var = if name.is_empty() {
            None
        } else {
            Some(self.vars.reset(name, ""))
        };
        self.open_frame(Frame::Variable);
    }

    fn image(&mut self, size: ImageSize, _alignment: Alignment) -> Result<()> {
        self.image_line_seen = false;

        let mut options = String::new();
        for (name, side) in [("width", size.width), ("height", size.height)] {
            let Some(dimension) = side else { continue };
            if !options.is_empty() {
                options.push(',');
            }
            if dimension.percent {
                let ratio = f64::from(dimension.value) / 100.0;
                write!(options, "{name}={ratio:.2}\\linewidth").unwrap();
            } else {
                write!(options, "{name}={}pt", dimension.value).unwrap();
            }
        }

        self.out.push_str("\\includegraphics");
        if !options.is_empty() {
            write!(self.out, "[{options}]").unwrap();
        }
        self.out.push('{');
        self.open_frame(Frame::Image);
        Ok(())
    }

    fn ordered_list_item(&mut self, level: usize) -> Result<()> {
        self.list_item(true, level)
    }

    fn unordered_list_item(&mut self, level: usize) -> Result<()> {
        self.list_item(false, level)
    }

    fn terminator(&mut self) {
        if self.counter.depth() == 0 {
            return;
        }

        while matches!(
            self.stack.last(),
            Some(Frame::MlItemize | Frame::MlEnumerate)
        ) {
            if let Some(frame) = self.stack.pop() {
                self.close_environment(frame);
            }
        }
        self.counter.reset();
        self.place_line_break = false;
    }

    fn close_tag(&mut self) -> Result<()> {
        if self.stack.is_empty() {
            return Err(ErrorKind::UnexpectedCloseTag.into());
        }

        if !self.markup.is_empty() {
            self.line_end()?;
        }

        // Multilevel list environments close on the terminator, not here.
        if matches!(
            self.stack.last(),
            Some(Frame::MlItemize | Frame::MlEnumerate)
        ) {
            return Ok(());
        }

        let Some(top) = self.stack.pop() else {
            return Err(ErrorKind::UnexpectedCloseTag.into());
        };

        match top {
            Frame::Chapter | Frame::Section | Frame::Subsection | Frame::Subsubsection => {
                self.out.push_str("}\n\n");
            }
            Frame::Paragraph => self.out.push_str("\n\n"),
            Frame::Image => self.out.push_str("}\n\n"),
            Frame::Quotation
            | Frame::Verse
            | Frame::Verbatim
            | Frame::Itemize
            | Frame::Enumerate
            | Frame::MlItemize
            | Frame::MlEnumerate => self.close_environment(top),
            Frame::Document
            | Frame::DocSection
            | Frame::Comment
            | Frame::Link
            | Frame::Variable => {}
        }

        self.capturing_link = None;
        self.current_var = None;
        Ok(())
    }

    fn inject_variable(&mut self, name: &str) -> Result<()> {
        let id = self
            .vars
            .lookup(name)
            .ok_or(ErrorKind::VariableNotDeclared)?;
        let value = self.vars.get(id).markup().clone();
        self.markup.push_markup(&value);
        Ok(())
    }

    fn open_inline_tag(&mut self, _name: &str) {}

    fn close_inline_tag(&mut self) {}

    fn text_char(&mut self, c: char) {
        if matches!(self.stack.last(), Some(Frame::Comment | Frame::Document)) {
            return;
        }

        self.markup.push(c);

        // Variable values may hold raw TeX.
        if self.current_var.is_none() {
            let replacement = match c {
                '#' | '$' | '%' | '^' | '&' | '_' | '{' | '}' | '~' => format!("\\{c}"),
                '\\' => "\\textbackslash".to_owned(),
                _ => return,
            };
            if let Some(index) = self.markup.last_index() {
                self.markup.substitute(index, 1, &replacement);
            }
        }
    }

    fn open_bold(&mut self) {
        self.markup.prepend_next("{\\bfseries ");
    }

    fn close_bold(&mut self) {
        self.markup.append_last("}");
    }

    fn open_italic(&mut self) {
        self.markup.prepend_next("{\\em ");
    }

    fn close_italic(&mut self) {
        self.markup.append_last("}");
    }

    fn stress_mark(&mut self) {
        self.markup.prepend_last(STRESS_MARK);
    }

    fn line_continue(&mut self) {
        self.continue_line = true;
    }

    fn line_end(&mut self) -> Result<()> {
        match self.stack.last().copied() {
            None | Some(Frame::DocSection | Frame::Quotation) => {
                if !self.markup.is_empty() {
                    self.paragraph(Alignment::Default)?;
                    self.close_tag()?;
                }
            }
            Some(top) => {
                if let Some(index) = self.capturing_link {
                    let rendered = self.markup.render();
                    self.links[index].value.push_str(&rendered);
                } else if let Some(id) = self.current_var {
                    let markup = std::mem::take(&mut self.markup);
                    self.vars.get_mut(id).markup_mut().push_markup(&markup);
                } else {
                    self.flush_line(top)?;
                    self.place_line_break = !self.continue_line && !self.markup.is_empty();
                    self.continue_line = false;
                }
                self.markup.clear();
            }
        }
        Ok(())
    }

    fn close_document(&mut self) {}

    fn into_output(self: Box<Self>) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::generator::Dimension;

    fn output(generator: TexGenerator) -> String {
        Box::new(generator).into_output()
    }

    fn push_line(generator: &mut TexGenerator, line: &str) {
        for c in line.chars() {
            generator.text_char(c);
        }
    }

    #[test]
    fn headers_are_starred_without_numbering() {
        let mut g = TexGenerator::new();
        g.header(1).unwrap();
        push_line(&mut g, "Глава");
        g.close_tag().unwrap();
        assert_eq!(output(g), "\\chapter*{Глава}\n\n");
    }

    #[test]
    fn numbering_variable_drops_the_star() {
        let mut g = TexGenerator::new();
        g.vars.reset("tex_section_numbers", "y");
        g.header(2).unwrap();
        push_line(&mut g, "Раздел");
        g.close_tag().unwrap();
        assert_eq!(output(g), "\\section{Раздел}\n\n");
    }

    #[test]
    fn deep_headers_are_rejected() {
        let mut g = TexGenerator::new();
        let err = g.header(5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedHeaderLevel);
    }

    #[test]
    fn chapter_subtitle_lines() {
        let mut g = TexGenerator::new();
        g.vars.reset("tex_chapter_line_skip", "4pt");
        g.vars.reset("tex_chapter_subtitle_format", "\\normalsize ");
        g.header(1).unwrap();
        push_line(&mut g, "Глава");
        g.line_end().unwrap();
        push_line(&mut g, "подзаголовок");
        g.close_tag().unwrap();
        assert_eq!(
            output(g),
            "\\chapter*{Глава\\\\[4pt]\n\\normalsize подзаголовок}\n\n"
        );
    }

    #[test]
    fn root_text_becomes_a_paragraph() {
        let mut g = TexGenerator::new();
        push_line(&mut g, "Привет");
        g.line_end().unwrap();
        assert_eq!(output(g), "Привет\n\n");
    }

    #[test]
    fn verse_keeps_line_breaks() {
        let mut g = TexGenerator::new();
        g.verse();
        push_line(&mut g, "ночь");
        g.line_end().unwrap();
        push_line(&mut g, "улица");
        g.line_end().unwrap();
        g.close_tag().unwrap();
        assert_eq!(
            output(g),
            "\\begin{verse}\nночь\\\\\nулица\\end{verse}\n\n"
        );
    }

    #[test]
    fn verbatim_is_left_raw() {
        let mut g = TexGenerator::new();
        g.preformatted();
        push_line(&mut g, "один");
        g.line_end().unwrap();
        push_line(&mut g, "два");
        g.line_end().unwrap();
        g.close_tag().unwrap();
        assert_eq!(
            output(g),
            "\\begin{verbatim}\nодин\nдва\\end{verbatim}\n\n"
        );
    }

    #[test]
    fn special_characters_are_escaped() {
        let mut g = TexGenerator::new();
        push_line(&mut g, "100% & #1");
        g.line_end().unwrap();
        assert_eq!(output(g), "100\\% \\& \\#1\n\n");
    }

    #[test]
    fn quotes_and_dashes_are_typeset() {
        let mut g = TexGenerator::new();
        push_line(&mut g, "сказал \"нет\" - и ушёл");
        g.line_end().unwrap();
        assert_eq!(output(g), "сказал <<нет>> --- и ушёл\n\n");
    }

    #[test]
    fn only_hyphenated_compounds_get_break_hints() {
        let mut g = TexGenerator::new();
        push_line(&mut g, "жёлто-синий цвет");
        g.line_end().unwrap();
        assert_eq!(output(g), "жёл\\-то-си\\-ний цвет\n\n");
    }

    #[test]
    fn flat_list_lines_become_items() {
        let mut g = TexGenerator::new();
        g.ordered_list();
        push_line(&mut g, "один");
        g.line_end().unwrap();
        push_line(&mut g, "два");
        g.line_end().unwrap();
        g.close_tag().unwrap();
        assert_eq!(
            output(g),
            "\\begin{enumerate}\n\\item один\n\\item два\n\\end{enumerate}\n\n"
        );
    }

    #[test]
    fn multilevel_lists_nest_environments() {
        let mut g = TexGenerator::new();
        g.unordered_list_item(1).unwrap();
        push_line(&mut g, "a");
        g.line_end().unwrap();
        g.unordered_list_item(2).unwrap();
        push_line(&mut g, "b");
        g.line_end().unwrap();
        g.unordered_list_item(1).unwrap();
        push_line(&mut g, "c");
        g.line_end().unwrap();
        g.terminator();
        assert_eq!(
            output(g),
            "\\begin{itemize}\n\\item a\n\\begin{itemize}\n\\item b\n\
             \\end{itemize}\n\n\\item c\n\\end{itemize}\n\n"
        );
    }

    #[test]
    fn enumerate_items_can_show_indexes() {
        let mut g = TexGenerator::new();
        g.vars.reset("tex_ml_list_format", "#)");
        g.ordered_list_item(1).unwrap();
        push_line(&mut g, "a");
        g.line_end().unwrap();
        g.ordered_list_item(1).unwrap();
        push_line(&mut g, "b");
        g.line_end().unwrap();
        g.terminator();
        assert_eq!(
            output(g),
            "\\begin{enumerate}\n\\item[1)] a\n\\item[2)] b\n\\end{enumerate}\n\n"
        );
    }

    #[test]
    fn level_hop_is_an_error() {
        let mut g = TexGenerator::new();
        g.unordered_list_item(1).unwrap();
        let err = g.unordered_list_item(3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ListLevelHop);
    }

    #[test]
    fn break_and_rule_use_their_size_variables() {
        let mut g = TexGenerator::new();
        g.line_break();
        g.horizontal_rule();
        assert_eq!(output(g), "\\vspace{10pt}\n\n\\rule{100pt}{1pt}\n\n");
    }

    #[test]
    fn bold_italic_and_stress() {
        let mut g = TexGenerator::new();
        g.open_bold();
        push_line(&mut g, "же");
        g.close_bold();
        g.open_italic();
        push_line(&mut g, "но");
        g.stress_mark();
        g.close_italic();
        g.line_end().unwrap();
        assert_eq!(output(g), "{\\bfseries же}{\\em н\\'о}\n\n");
    }

    #[test]
    fn image_takes_the_first_line_as_path() {
        let mut g = TexGenerator::new();
        let size = ImageSize {
            width: Some(Dimension {
                value: 50,
                percent: true,
            }),
            height: Some(Dimension {
                value: 120,
                percent: false,
            }),
        };
        g.image(size, Alignment::Default).unwrap();
        push_line(&mut g, "pic.png");
        g.line_end().unwrap();
        push_line(&mut g, "подпись");
        g.line_end().unwrap();
        g.close_tag().unwrap();
        assert_eq!(
            output(g),
            "\\includegraphics[width=0.50\\linewidth,height=120pt]{pic.png}\n\n"
        );
    }

    #[test]
    fn variables_capture_and_inject_raw() {
        let mut g = TexGenerator::new();
        g.variable("snippet");
        push_line(&mut g, "\\raw");
        g.line_end().unwrap();
        g.close_tag().unwrap();

        push_line(&mut g, "до ");
        g.inject_variable("snippet").unwrap();
        g.line_end().unwrap();
        assert_eq!(output(g), "до \\raw\n\n");
    }

    #[test]
    fn close_without_open_fails() {
        let mut g = TexGenerator::new();
        let err = g.close_tag().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedCloseTag);
    }
}
