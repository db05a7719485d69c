//! HTML generator.

use std::fmt::Write as _;

use textml_lists::{ListFormat, ListItemsCounter, MAX_LEVELS};

use crate::align::Alignment;
use crate::error::{ErrorKind, Result};
use crate::generator::{Generator, ImageSize};
use crate::language::{Language, QuoteKind, RussianLanguage, TokenKind};
use crate::markup::MarkupBuilder;
use crate::vars::{VAR_FALSE, VarId, Variables};

const DASH: &str = "&mdash;";
const SHY: &str = "&shy;";
const STRESS_MARK: &str = "&acute;";

/// Variables understood by this generator, with their defaults.
const DEFAULT_VARS: &[(&str, &str)] = &[
    ("html_no_line_breaks", VAR_FALSE),
    ("html_no_default_paragraphs", VAR_FALSE),
    ("html_no_shys", VAR_FALSE),
    ("html_default_p_alignment", "aj"),
    ("html_embedded_css", ""),
    ("html_doc_title", ""),
    ("html_body_class", ""),
    ("html_body_style", ""),
    ("html_h1_class", ""),
    ("html_h1_style", ""),
    ("html_h2_class", ""),
    ("html_h2_style", ""),
    ("html_h3_class", ""),
    ("html_h3_style", ""),
    ("html_h4_class", ""),
    ("html_h4_style", ""),
    ("html_h5_class", ""),
    ("html_h5_style", ""),
    ("html_h6_class", ""),
    ("html_h6_style", ""),
    ("html_p_class", ""),
    ("html_p_style", ""),
    ("html_cite_p_class", ""),
    ("html_cite_p_style", ""),
    ("html_cite_class", ""),
    ("html_cite_style", ""),
    ("html_verse_class", "textml_verse"),
    ("html_verse_style", ""),
    ("html_pre_class", ""),
    ("html_pre_style", ""),
    ("html_ol_class", ""),
    ("html_ol_style", ""),
    ("html_ul_class", ""),
    ("html_ul_style", ""),
    ("html_link_class", ""),
    ("html_link_style", ""),
    ("html_section_class", ""),
    ("html_section_style", ""),
    ("html_hr_class", ""),
    ("html_hr_style", ""),
    ("html_img_class", ""),
    ("html_img_style", ""),
    ("html_ml_list_format", ""),
];

fn quote_text(kind: QuoteKind) -> Option<&'static str> {
    Some(match kind {
        QuoteKind::FrenchOpen => "&laquo;",
        QuoteKind::FrenchClose => "&raquo;",
        QuoteKind::EnglishOpen => "&ldquo;",
        QuoteKind::EnglishClose => "&rdquo;",
        QuoteKind::GermanOpen => "&bdquo;",
        QuoteKind::GermanClose => "&ldquo;",
        QuoteKind::EnglishSingleOpen => "&lsquo;",
        QuoteKind::EnglishSingleClose => "&rsquo;",
    })
}

/// An open block on the tag stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Document,
    Header(u8),
    Paragraph,
    CiteParagraph,
    Cite,
    Verse,
    Preformatted,
    OrderedList,
    UnorderedList,
    Section,
    Comment,
    Link,
    Variable,
    Image,
    MlList { ordered: bool },
    MlItem,
}

/// Which attribute the next image content line fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageLine {
    Url,
    Alt,
    Ignore,
}

/// A declared inline link tag.
#[derive(Debug, Clone)]
struct Link {
    name: String,
    value: String,
}

/// Generates an HTML fragment (or, with a `doc` tag, a full page).
pub struct HtmlGenerator {
    out: String,
    markup: MarkupBuilder,
    vars: Variables,
    language: RussianLanguage,
    stack: Vec<Frame>,
    links: Vec<Link>,
    /// Link whose value the flushed lines currently build.
    capturing_link: Option<usize>,
    /// An inline link is open in the current line.
    rendering_link: bool,
    current_var: Option<VarId>,
    continue_line: bool,
    place_line_break: bool,
    document_opened: bool,
    image_line: ImageLine,
    counter: ListItemsCounter,
}

impl Default for HtmlGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlGenerator {
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
            rendering_link: false,
            current_var: None,
            continue_line: false,
            place_line_break: false,
            document_opened: false,
            image_line: ImageLine::Url,
            counter: ListItemsCounter::new(),
        }
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

    fn newline(&mut self) {
        if !self.boolean("html_no_line_breaks") {
            self.out.push('\n');
        }
    }

    /// Builds ` class='…' style='…'` from the tag's configuration
    /// variables; `extra_style` is appended to the style value.
    fn attrs(&self, prefix: &str, extra_style: &str) -> String {
        let mut attrs = String::new();

        let class = self.var_render(&format!("{prefix}_class"));
        if !class.is_empty() {
            write!(attrs, " class='{class}'").unwrap();
        }

        let mut style = self.var_render(&format!("{prefix}_style"));
        style.push_str(extra_style);
        if !style.is_empty() {
            write!(attrs, " style='{style}'").unwrap();
        }

        attrs
    }

    fn open_frame(&mut self, frame: Frame) {
        self.stack.push(frame);
        self.place_line_break = false;
    }

    fn open_block(&mut self, tag: &str, prefix: &str, extra_style: &str, frame: Frame) {
        let attrs = self.attrs(prefix, extra_style);
        write!(self.out, "<{tag}{attrs}>").unwrap();
        self.open_frame(frame);
    }

    fn resolve_alignment(&self, alignment: Alignment) -> Result<&'static str> {
        let effective = match alignment {
            Alignment::Default => Alignment::parse(
                &self
                    .vars
                    .lookup("html_default_p_alignment")
                    .map(|id| self.vars.get(id).text())
                    .unwrap_or_default(),
            ),
            other => other,
        };

        match effective {
            Alignment::Left => Ok("left"),
            Alignment::Right => Ok("right"),
            Alignment::Center => Ok("center"),
            Alignment::Justify => Ok("justify"),
            Alignment::Default => Err(ErrorKind::UnknownAlignment.into()),
        }
    }

    /// Punctuation always; hyphenation unless disabled or inside a header
    /// or preformatted block.
    fn decorate(&mut self) {
        self.language.punctuate(&mut self.markup, DASH, quote_text);

        if self.boolean("html_no_shys")
            || matches!(
                self.stack.last(),
                Some(Frame::Preformatted | Frame::Header(_))
            )
        {
            return;
        }

        let language = self.language;
        let text = self.markup.text().to_vec();
        for token in language.tokens(&text) {
            if token.kind == TokenKind::Word {
                language.hyphenate(&mut self.markup, token.start, token.len, SHY);
            }
        }
    }

    /// Renders the current line inside the innermost open block.
    fn flush_line(&mut self, top: Frame) {
        match top {
            Frame::Header(_) | Frame::Paragraph | Frame::CiteParagraph | Frame::Verse => {
                if self.place_line_break {
                    self.out.push_str("<br/>");
                }
                self.decorate();
                let markup = std::mem::take(&mut self.markup);
                markup.render_into(&mut self.out);
                self.markup = markup;
            }
            Frame::Preformatted => {
                if self.place_line_break {
                    self.out.push('\n');
                }
                let markup = std::mem::take(&mut self.markup);
                markup.render_into(&mut self.out);
                self.markup = markup;
            }
            Frame::OrderedList | Frame::UnorderedList => {
                if !self.markup.is_empty() {
                    self.out.push_str("<li>");
                    let markup = std::mem::take(&mut self.markup);
                    markup.render_into(&mut self.out);
                    self.markup = markup;
                    self.out.push_str("</li>");
                }
            }
            Frame::MlItem => {
                if self.place_line_break {
                    self.out.push_str("<br/>");
                }
                let markup = std::mem::take(&mut self.markup);
                markup.render_into(&mut self.out);
                self.markup = markup;
            }
            Frame::Image => {
                let rendered = self.markup.render();
                match self.image_line {
                    ImageLine::Url => {
                        write!(self.out, " src='{rendered}'").unwrap();
                        self.image_line = ImageLine::Alt;
                    }
                    ImageLine::Alt => {
                        write!(self.out, " alt='{rendered}'").unwrap();
                        self.image_line = ImageLine::Ignore;
                    }
                    ImageLine::Ignore => {}
                }
            }
            Frame::Document
            | Frame::Cite
            | Frame::Section
            | Frame::Comment
            | Frame::Link
            | Frame::Variable
            | Frame::MlList { .. } => {}
        }
    }

    fn write_doc_header(&mut self) {
        self.out.push_str(
            "<html><head><meta http-equiv=\"Content-Type\" \
             content=\"text/html; charset=UTF-8\">",
        );

        let title = self.var_render("html_doc_title");
        if !title.is_empty() {
            write!(self.out, "<title>{title}</title>").unwrap();
        }

        let css = self.var_render("html_embedded_css");
        if !css.is_empty() {
            write!(self.out, "<style type='text/css'>{css}</style>").unwrap();
        }

        self.out.push_str("</head>");

        let attrs = self.attrs("html_body", "");
        write!(self.out, "<body{attrs}>").unwrap();
    }

    /// Both multilevel item events; opens/closes containers to reach
    /// `level`, then opens the item.
    fn list_item(&mut self, ordered: bool, level: usize) -> Result<()> {
        if level > MAX_LEVELS {
            return Err(ErrorKind::MaxListDepthExceeded.into());
        }

        let current = self.counter.depth();
        if level > current + 1 {
            return Err(ErrorKind::ListLevelHop.into());
        }

        if level == current + 1 {
            let (tag, prefix) = if ordered {
                ("ol", "html_ol")
            } else {
                ("ul", "html_ul")
            };
            let attrs = self.attrs(prefix, "");
            write!(self.out, "<{tag}{attrs}>").unwrap();
            self.newline();
            self.stack.push(Frame::MlList { ordered });
        } else {
            for _ in level..current {
                self.close_ml_level();
            }
            if matches!(self.stack.last(), Some(Frame::MlItem)) {
                self.stack.pop();
                self.out.push_str("</li>");
            }
        }

        self.counter.increment(level);

        self.out.push_str("<li>");
        if ordered {
            let format_text = self.var_render("html_ml_list_format");
            if !format_text.is_empty() {
                let format = ListFormat::parse(&format_text)?;
                let index = format.index(self.counter.path())?;
                write!(self.out, "{index} ").unwrap();
            }
        }
        self.open_frame(Frame::MlItem);
        Ok(())
    }

    /// Closes the innermost item and its container.
    fn close_ml_level(&mut self) {
        if matches!(self.stack.last(), Some(Frame::MlItem)) {
            self.stack.pop();
            self.out.push_str("</li>");
        }
        if let Some(Frame::MlList { ordered }) = self.stack.last().copied() {
            self.stack.pop();
            self.out
                .push_str(if ordered { "</ol>" } else { "</ul>" });
            self.newline();
        }
    }
}

impl Generator for HtmlGenerator {
    fn document(&mut self) {
        self.document_opened = true;
        self.open_frame(Frame::Document);
    }

    fn header(&mut self, level: u8) -> Result<()> {
        if level > 6 {
            return Err(ErrorKind::MaxHeaderDepthExceeded.into());
        }

        let tag = format!("h{level}");
        let prefix = format!("html_h{level}");
        self.open_block(&tag, &prefix, "", Frame::Header(level));
        Ok(())
    }

    fn paragraph(&mut self, alignment: Alignment) -> Result<()> {
        let align = self.resolve_alignment(alignment)?;
        let style = format!("text-align:{align};");

        if matches!(self.stack.last(), Some(Frame::Cite)) {
            self.open_block("p", "html_cite_p", &style, Frame::CiteParagraph);
        } else {
            self.open_block("p", "html_p", &style, Frame::Paragraph);
        }
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
        self.open_block("cite", "html_cite", "", Frame::Cite);
        Ok(())
    }

    fn verse(&mut self) {
        self.open_block("p", "html_verse", "", Frame::Verse);
    }

    fn preformatted(&mut self) {
        self.open_block("pre", "html_pre", "", Frame::Preformatted);
    }

    fn line_break(&mut self) {
        self.out.push_str("<br/>");
        self.place_line_break = false;
    }

    fn ordered_list(&mut self) {
        self.open_block("ol", "html_ol", "", Frame::OrderedList);
    }

    fn unordered_list(&mut self) {
        self.open_block("ul", "html_ul", "", Frame::UnorderedList);
    }

    fn comment(&mut self) {
        self.open_frame(Frame::Comment);
    }

    fn section(&mut self) {
        self.open_block("div", "html_section", "", Frame::Section);
    }

    fn horizontal_rule(&mut self) {
        let attrs = self.attrs("html_hr", "");
        write!(self.out, "<hr{attrs}/>").unwrap();
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

    fn image(&mut self, size: ImageSize, alignment: Alignment) -> Result<()> {
        self.image_line = ImageLine::Url;

        let mut style = String::new();
        if let Some(width) = size.width {
            let unit = if width.percent { "%" } else { "px" };
            write!(style, "width:{}{unit};", width.value).unwrap();
        }
        if let Some(height) = size.height {
            let unit = if height.percent { "%" } else { "px" };
            write!(style, "height:{}{unit};", height.value).unwrap();
        }
        match alignment {
            Alignment::Left => style.push_str("float:left;"),
            Alignment::Right => style.push_str("float:right;"),
            _ => {}
        }

        // The tag stays unterminated; content lines add src/alt and the
        // close tag writes the final `/>`.
        let attrs = self.attrs("html_img", &style);
        write!(self.out, "<img{attrs}").unwrap();
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
            Some(Frame::MlItem | Frame::MlList { .. })
        ) {
            self.close_ml_level();
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

        let Some(top) = self.stack.pop() else {
            return Err(ErrorKind::UnexpectedCloseTag.into());
        };

        if top == Frame::Document {
            self.write_doc_header();
        }

        let closing = match top {
            Frame::Header(level) => Some(format!("</h{level}>")),
            Frame::Paragraph | Frame::CiteParagraph | Frame::Verse => Some("</p>".to_owned()),
            Frame::Cite => Some("</cite>".to_owned()),
            Frame::Preformatted => Some("</pre>".to_owned()),
            Frame::OrderedList => Some("</ol>".to_owned()),
            Frame::UnorderedList => Some("</ul>".to_owned()),
            Frame::Section => Some("</div>".to_owned()),
            Frame::Image => Some("/>".to_owned()),
            Frame::MlItem => Some("</li>".to_owned()),
            Frame::MlList { ordered } => Some(if ordered { "</ol>" } else { "</ul>" }.to_owned()),
            Frame::Document | Frame::Comment | Frame::Link | Frame::Variable => None,
        };

        if let Some(text) = closing {
            self.out.push_str(&text);
            self.newline();
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

    fn open_inline_tag(&mut self, name: &str) {
        let Some(index) = self.links.iter().position(|link| link.name == name) else {
            return;
        };

        let mut opening = format!("<a href='{}'", self.links[index].value);
        opening.push_str(&self.attrs("html_link", ""));
        opening.push('>');
        self.markup.prepend_next(&opening);
        self.rendering_link = true;
    }

    fn close_inline_tag(&mut self) {
        if self.rendering_link {
            self.markup.append_last("</a>");
            self.rendering_link = false;
        }
    }

    fn text_char(&mut self, c: char) {
        if matches!(self.stack.last(), Some(Frame::Comment | Frame::Document)) {
            return;
        }

        self.markup.push(c);

        // Variable values may hold raw HTML.
        if self.current_var.is_none() {
            let entity = match c {
                '&' => Some("&amp;"),
                '<' => Some("&lt;"),
                '>' => Some("&gt;"),
                _ => None,
            };
            if let (Some(entity), Some(index)) = (entity, self.markup.last_index()) {
                self.markup.substitute(index, 1, entity);
            }
        }
    }

    fn open_bold(&mut self) {
        self.markup.prepend_next("<b>");
    }

    fn close_bold(&mut self) {
        self.markup.append_last("</b>");
    }

    fn open_italic(&mut self) {
        self.markup.prepend_next("<i>");
    }

    fn close_italic(&mut self) {
        self.markup.append_last("</i>");
    }

    fn stress_mark(&mut self) {
        self.markup.append_last(STRESS_MARK);
    }

    fn line_continue(&mut self) {
        self.continue_line = true;
    }

    fn line_end(&mut self) -> Result<()> {
        match self.stack.last().copied() {
            None | Some(Frame::Section | Frame::Cite) => {
                if self.boolean("html_no_default_paragraphs") {
                    let markup = std::mem::take(&mut self.markup);
                    markup.render_into(&mut self.out);
                    self.out.push('\n');
                } else if !self.markup.is_empty() {
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
                    self.flush_line(top);
                    self.place_line_break = !self.continue_line && !self.markup.is_empty();
                    self.continue_line = false;
                }
                self.markup.clear();
            }
        }
        Ok(())
    }

    fn close_document(&mut self) {
        if self.document_opened {
            self.out.push_str("</body></html>");
        }
    }

    fn into_output(self: Box<Self>) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn output(generator: HtmlGenerator) -> String {
        Box::new(generator).into_output()
    }

    fn push_line(generator: &mut HtmlGenerator, line: &str) {
        for c in line.chars() {
            generator.text_char(c);
        }
    }

    #[test]
    fn header_with_text_line() {
        let mut g = HtmlGenerator::new();
        g.header(1).unwrap();
        push_line(&mut g, "Заголовок");
        g.close_tag().unwrap();
        assert_eq!(output(g), "<h1>Заголовок</h1>\n");
    }

    #[test]
    fn root_text_wraps_into_default_paragraph() {
        let mut g = HtmlGenerator::new();
        push_line(&mut g, "Привет");
        g.line_end().unwrap();
        assert_eq!(
            output(g),
            "<p style='text-align:justify;'>При&shy;вет</p>\n"
        );
    }

    #[test]
    fn no_default_paragraphs_flushes_raw_lines() {
        let mut g = HtmlGenerator::new();
        g.vars.reset("html_no_default_paragraphs", "y");
        push_line(&mut g, "Привет");
        g.line_end().unwrap();
        assert_eq!(output(g), "Привет\n");
    }

    #[test]
    fn bold_and_italic_wrap_characters() {
        let mut g = HtmlGenerator::new();
        g.preformatted();
        g.open_italic();
        g.open_bold();
        push_line(&mut g, "ab");
        g.close_bold();
        g.close_italic();
        g.line_end().unwrap();
        g.close_tag().unwrap();
        assert_eq!(output(g), "<pre><i><b>ab</b></i></pre>\n");
    }

    #[test]
    fn text_chars_are_escaped() {
        let mut g = HtmlGenerator::new();
        g.preformatted();
        push_line(&mut g, "a<b>&c");
        g.line_end().unwrap();
        g.close_tag().unwrap();
        assert_eq!(output(g), "<pre>a&lt;b&gt;&amp;c</pre>\n");
    }

    #[test]
    fn verse_preserves_line_breaks() {
        let mut g = HtmlGenerator::new();
        g.verse();
        push_line(&mut g, "ночь");
        g.line_end().unwrap();
        push_line(&mut g, "фонарь");
        g.line_end().unwrap();
        g.close_tag().unwrap();
        assert_eq!(
            output(g),
            "<p class='textml_verse'>ночь<br/>фо&shy;нарь</p>\n"
        );
    }

    #[test]
    fn line_continue_suppresses_the_break() {
        let mut g = HtmlGenerator::new();
        g.verse();
        push_line(&mut g, "ночь");
        g.line_continue();
        g.line_end().unwrap();
        push_line(&mut g, "улица");
        g.line_end().unwrap();
        g.close_tag().unwrap();
        assert_eq!(
            output(g),
            "<p class='textml_verse'>ночьул&shy;и&shy;ца</p>\n"
        );
    }

    #[test]
    fn flat_list_items_per_line() {
        let mut g = HtmlGenerator::new();
        g.ordered_list();
        push_line(&mut g, "один");
        g.line_end().unwrap();
        push_line(&mut g, "два");
        g.line_end().unwrap();
        g.close_tag().unwrap();
        assert_eq!(output(g), "<ol><li>один</li><li>два</li></ol>\n");
    }

    #[test]
    fn multilevel_list_nests_containers() {
        let mut g = HtmlGenerator::new();
        g.ordered_list_item(1).unwrap();
        push_line(&mut g, "a");
        g.line_end().unwrap();
        g.ordered_list_item(2).unwrap();
        push_line(&mut g, "b");
        g.line_end().unwrap();
        g.ordered_list_item(1).unwrap();
        push_line(&mut g, "c");
        g.line_end().unwrap();
        g.terminator();
        assert_eq!(
            output(g),
            "<ol>\n<li>a<ol>\n<li>b</li></ol>\n</li><li>c</li></ol>\n"
        );
    }

    #[test]
    fn multilevel_ordered_items_can_show_indexes() {
        let mut g = HtmlGenerator::new();
        g.vars.reset("html_ml_list_format", "#./.#.");
        g.ordered_list_item(1).unwrap();
        push_line(&mut g, "a");
        g.line_end().unwrap();
        g.ordered_list_item(2).unwrap();
        push_line(&mut g, "b");
        g.line_end().unwrap();
        g.terminator();
        assert_eq!(
            output(g),
            "<ol>\n<li>1. a<ol>\n<li>1.1. b</li></ol>\n</li></ol>\n"
        );
    }

    #[test]
    fn level_hop_is_an_error() {
        let mut g = HtmlGenerator::new();
        g.ordered_list_item(1).unwrap();
        let err = g.ordered_list_item(3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ListLevelHop);
    }

    #[test]
    fn too_deep_items_are_rejected() {
        let mut g = HtmlGenerator::new();
        let err = g.ordered_list_item(7).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MaxListDepthExceeded);
    }

    #[test]
    fn close_without_open_fails() {
        let mut g = HtmlGenerator::new();
        let err = g.close_tag().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedCloseTag);
    }

    #[test]
    fn links_declare_and_render() {
        let mut g = HtmlGenerator::new();
        g.link("search").unwrap();
        push_line(&mut g, "http://example.com/");
        g.line_end().unwrap();
        g.close_tag().unwrap();

        g.preformatted();
        g.open_inline_tag("search");
        push_line(&mut g, "тут");
        g.close_inline_tag();
        g.line_end().unwrap();
        g.close_tag().unwrap();
        assert_eq!(
            output(g),
            "<pre><a href='http://example.com/'>тут</a></pre>\n"
        );
    }

    #[test]
    fn duplicate_link_declaration_fails() {
        let mut g = HtmlGenerator::new();
        g.link("a").unwrap();
        g.close_tag().unwrap();
        let err = g.link("a").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InlineTagAlreadyExists);
    }

    #[test]
    fn unknown_inline_tag_is_ignored() {
        let mut g = HtmlGenerator::new();
        g.preformatted();
        g.open_inline_tag("nothing");
        push_line(&mut g, "x");
        g.close_inline_tag();
        g.line_end().unwrap();
        g.close_tag().unwrap();
        assert_eq!(output(g), "<pre>x</pre>\n");
    }

    #[test]
    fn variables_capture_and_inject_raw() {
        let mut g = HtmlGenerator::new();
        g.variable("snippet");
        push_line(&mut g, "<raw>");
        g.line_end().unwrap();
        g.close_tag().unwrap();

        g.preformatted();
        g.inject_variable("snippet").unwrap();
        g.line_end().unwrap();
        g.close_tag().unwrap();
        assert_eq!(output(g), "<pre><raw></pre>\n");
    }

    #[test]
    fn injecting_unknown_variable_fails() {
        let mut g = HtmlGenerator::new();
        let err = g.inject_variable("missing").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::VariableNotDeclared);
    }

    #[test]
    fn document_close_writes_the_page_header() {
        let mut g = HtmlGenerator::new();
        g.variable("html_doc_title");
        push_line(&mut g, "Тест");
        g.line_end().unwrap();
        g.close_tag().unwrap();

        g.document();
        push_line(&mut g, "игнорируется");
        g.line_end().unwrap();
        g.close_tag().unwrap();
        g.close_document();

        assert_eq!(
            output(g),
            "<html><head><meta http-equiv=\"Content-Type\" \
             content=\"text/html; charset=UTF-8\"><title>Тест</title>\
             </head><body></body></html>"
        );
    }

    #[test]
    fn comment_text_is_discarded() {
        let mut g = HtmlGenerator::new();
        g.comment();
        push_line(&mut g, "скрыто");
        g.line_end().unwrap();
        g.close_tag().unwrap();
        assert_eq!(output(g), "");
    }

    #[test]
    fn image_takes_src_then_alt() {
        let mut g = HtmlGenerator::new();
        g.image(ImageSize::default(), Alignment::Default).unwrap();
        push_line(&mut g, "pic.png");
        g.line_end().unwrap();
        push_line(&mut g, "подпись");
        g.line_end().unwrap();
        g.close_tag().unwrap();
        assert_eq!(output(g), "<img src='pic.png' alt='подпись'/>\n");
    }

    #[test]
    fn stress_mark_follows_its_character() {
        let mut g = HtmlGenerator::new();
        g.preformatted();
        push_line(&mut g, "вино");
        g.stress_mark();
        g.line_end().unwrap();
        g.close_tag().unwrap();
        assert_eq!(output(g), "<pre>вино&acute;</pre>\n");
    }
}
