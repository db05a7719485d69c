//! Block alignment codes.

/// Alignment of a paragraph-like block.
///
/// Parsed from the two-letter tag argument codes; each code has a Latin and
/// a Cyrillic spelling. Anything unrecognized is [`Alignment::Default`],
/// which resolves through the generator's default-alignment variable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Default,
    Left,
    Right,
    Center,
    Justify,
}

impl Alignment {
    /// Parses an alignment argument code.
    #[must_use]
    pub fn parse(code: &str) -> Self {
        match code {
            "al" | "лв" => Self::Left,
            "ar" | "пв" => Self::Right,
            "ac" | "цв" => Self::Center,
            "aj" | "шв" => Self::Justify,
            _ => Self::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_both_alphabets() {
        assert_eq!(Alignment::parse("al"), Alignment::Left);
        assert_eq!(Alignment::parse("пв"), Alignment::Right);
        assert_eq!(Alignment::parse("ac"), Alignment::Center);
        assert_eq!(Alignment::parse("шв"), Alignment::Justify);
    }

    #[test]
    fn unknown_codes_fall_back_to_default() {
        assert_eq!(Alignment::parse(""), Alignment::Default);
        assert_eq!(Alignment::parse("xx"), Alignment::Default);
    }
}
