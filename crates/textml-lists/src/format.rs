//! Per-level list format strings.

use crate::ListError;
use crate::index::{
    CharRangeIndex, IndexGenerator, MultiLevelNumericIndex, RomanIndex, SingleLevelNumericIndex,
};

/// Deepest list level a format string can describe.
pub const MAX_LEVELS: usize = 6;

/// Longest allowed format segment, in characters (`(a-z)` is the widest form).
const MAX_SEGMENT_CHARS: usize = 5;

/// An ordered set of index generators, one per list nesting level.
///
/// Parsed from a `/`-separated format string. Each segment describes one
/// level, innermost last:
///
/// - `.#.` — multilevel numeric (`1.2.3.`);
/// - `#` with optional surrounding glyphs — plain numeric (`#.` gives `1.`,
///   `(#)` gives `(1)`);
/// - `I` or `i` with optional surrounding glyphs — Roman numerals;
/// - a character range like `a-z`, optionally bracketed (`(a-z)`).
///
/// Segments beyond [`MAX_LEVELS`] are ignored.
pub struct ListFormat {
    generators: Vec<Box<dyn IndexGenerator>>,
}

impl ListFormat {
    /// Parses a format string into per-level generators.
    pub fn parse(format: &str) -> Result<Self, ListError> {
        let mut generators: Vec<Box<dyn IndexGenerator>> = Vec::new();

        for segment in format.split('/') {
            if generators.len() == MAX_LEVELS {
                break;
            }

            let chars: Vec<char> = segment.chars().collect();
            if chars.is_empty() || chars.len() > MAX_SEGMENT_CHARS {
                return Err(ListError::InvalidFormat);
            }

            generators.push(parse_segment(&chars)?);
        }

        Ok(Self { generators })
    }

    /// The generator for the given 1-based level.
    pub fn generator(&self, level: usize) -> Result<&dyn IndexGenerator, ListError> {
        if level < 1 || level > self.generators.len() {
            return Err(ListError::FormatNotSet(level));
        }
        Ok(self.generators[level - 1].as_ref())
    }

    /// Renders the index of the item at `path` with the generator of the
    /// path's level.
    pub fn index(&self, path: &[u32]) -> Result<String, ListError> {
        self.generator(path.len())?.generate(path)
    }

    /// Number of levels the format defines.
    #[must_use]
    pub fn levels(&self) -> usize {
        self.generators.len()
    }
}

fn parse_segment(chars: &[char]) -> Result<Box<dyn IndexGenerator>, ListError> {
    for (i, &c) in chars.iter().enumerate() {
        let before = |n: usize| i.checked_sub(n).map(|at| chars[at]);
        let after = |n: usize| chars.get(i + n).copied();

        match c {
            '#' => {
                let left = before(1);
                let right = after(1);
                if left == Some('.') && right == Some('.') {
                    return Ok(Box::new(MultiLevelNumericIndex));
                }
                return Ok(Box::new(SingleLevelNumericIndex { left, right }));
            }
            '-' => {
                let (Some(start), Some(end)) = (before(1), after(1)) else {
                    return Err(ListError::InvalidFormat);
                };
                return Ok(Box::new(CharRangeIndex {
                    left: before(2),
                    right: after(2),
                    start,
                    end,
                }));
            }
            'I' | 'i' => {
                return Ok(Box::new(RomanIndex {
                    left: before(1),
                    right: after(1),
                    capitals: c == 'I',
                }));
            }
            _ => {}
        }
    }

    Err(ListError::InvalidFormat)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_every_segment_kind() {
        let format = ListFormat::parse("#./.#./#)/(I)/i./(a-z)").unwrap();
        assert_eq!(format.levels(), 6);

        assert_eq!(format.generator(1).unwrap().generate(&[4]).unwrap(), "4.");
        assert_eq!(
            format.generator(2).unwrap().generate(&[4, 2]).unwrap(),
            "4.2."
        );
        assert_eq!(
            format.generator(3).unwrap().generate(&[1, 1, 3]).unwrap(),
            "3)"
        );
        assert_eq!(
            format.generator(4).unwrap().generate(&[1, 1, 1, 4]).unwrap(),
            "(IV)"
        );
        assert_eq!(
            format
                .generator(5)
                .unwrap()
                .generate(&[1, 1, 1, 1, 9])
                .unwrap(),
            "ix."
        );
        assert_eq!(
            format
                .generator(6)
                .unwrap()
                .generate(&[1, 1, 1, 1, 1, 27])
                .unwrap(),
            "(aa)"
        );
    }

    #[test]
    fn index_uses_the_path_depth() {
        let format = ListFormat::parse(".#./.#.").unwrap();
        assert_eq!(format.index(&[2, 5]).unwrap(), "2.5.");
    }

    #[test]
    fn missing_level_is_reported() {
        let format = ListFormat::parse("#.").unwrap();
        assert_eq!(format.index(&[1, 1]), Err(ListError::FormatNotSet(2)));
    }

    #[test]
    fn rejects_malformed_segments() {
        for format in ["", "#//#", "abc", "-z", "((a-z))"] {
            assert!(
                matches!(ListFormat::parse(format), Err(ListError::InvalidFormat)),
                "format {format:?} should be rejected"
            );
        }
    }

    #[test]
    fn extra_segments_are_ignored() {
        let format = ListFormat::parse("#./#./#./#./#./#./#.").unwrap();
        assert_eq!(format.levels(), MAX_LEVELS);
    }
}
