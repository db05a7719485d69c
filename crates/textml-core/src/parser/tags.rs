//! Tag-line dispatch: resolves a parsed tag name and arguments into one
//! generator call.

use crate::align::Alignment;
use crate::error::{ErrorKind, Result};
use crate::generator::{Dimension, Generator, ImageSize};

/// Whether the lines following a committed tag are parsed as prose or
/// passed through verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
    Parsed,
    AsIs,
}

fn header_level(args: &[String]) -> Result<u8> {
    let Some(arg) = args.first().filter(|arg| !arg.is_empty()) else {
        return Ok(1);
    };

    let mut chars = arg.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if ('1'..='9').contains(&c) => Ok(c as u8 - b'0'),
        _ => Err(ErrorKind::UnsupportedHeaderLevel.into()),
    }
}

fn alignment(args: &[String], index: usize) -> Alignment {
    args.get(index).map_or(Alignment::Default, |arg| Alignment::parse(arg))
}

fn dimension(text: &str) -> Option<Dimension> {
    if text.is_empty() || text == "?" {
        return None;
    }

    let (digits, percent) = match text.strip_suffix('%') {
        Some(digits) => (digits, true),
        None => (text, false),
    };
    let value = digits.parse().ok()?;
    Some(Dimension { value, percent })
}

/// Parses a `WxH` image size; either side may be a `?` wildcard and carry a
/// `%` suffix.
fn image_size(args: &[String]) -> ImageSize {
    let Some(arg) = args.first() else {
        return ImageSize::default();
    };

    let (width, height) = arg.split_once('x').unwrap_or((arg.as_str(), ""));
    ImageSize {
        width: dimension(width),
        height: dimension(height),
    }
}

/// Commits a completed tag: invokes the generator method for the tag kind
/// and reports how the following text is to be handled.
pub fn commit(name: &str, args: &[String], generator: &mut dyn Generator) -> Result<TextMode> {
    if name.is_empty() {
        generator.close_tag()?;
        return Ok(TextMode::Parsed);
    }

    if name.chars().all(|c| c == '#') {
        generator.ordered_list_item(name.chars().count())?;
        return Ok(TextMode::Parsed);
    }
    if name.chars().all(|c| c == '*') {
        generator.unordered_list_item(name.chars().count())?;
        return Ok(TextMode::Parsed);
    }
    if let Some(variable) = name.strip_prefix('$') {
        generator.variable(variable);
        return Ok(TextMode::AsIs);
    }

    match name {
        "!" => generator.comment(),
        "doc" | "док" => generator.document(),
        "h" | "з" => generator.header(header_level(args)?)?,
        "p" | "а" => generator.paragraph(alignment(args, 0))?,
        "link" | "ссылка" => {
            generator.link(args.first().map_or("", String::as_str))?;
            return Ok(TextMode::AsIs);
        }
        "c" | "ц" => generator.cite(alignment(args, 0))?,
        "verse" | "стихи" => generator.verse(),
        "pre" | "преформат" => {
            generator.preformatted();
            return Ok(TextMode::AsIs);
        }
        "br" | "разр" => generator.line_break(),
        "ol" | "нс" => generator.ordered_list(),
        "ul" | "мс" => generator.unordered_list(),
        "s" | "часть" => generator.section(),
        "hr" | "линия" => generator.horizontal_rule(),
        "img" | "рис" => generator.image(image_size(args), alignment(args, 1))?,
        "." => generator.terminator(),
        _ => return Err(ErrorKind::UnknownTag.into()),
    }
    Ok(TextMode::Parsed)
}
