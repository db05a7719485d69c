//! Index generators: render an item path as ordinal text.

use crate::ListError;

/// Upper bound on the rendered index length, in characters.
const MAX_INDEX_CHARS: usize = 50;

/// Renders a list item path as index text, e.g. `2.1.` or `(IV)`.
pub trait IndexGenerator {
    fn generate(&self, path: &[u32]) -> Result<String, ListError>;
}

fn checked(index: String) -> Result<String, ListError> {
    if index.chars().count() > MAX_INDEX_CHARS {
        return Err(ListError::IndexOverflow);
    }
    Ok(index)
}

fn push_bracket(out: &mut String, bracket: Option<char>) {
    if let Some(c) = bracket {
        out.push(c);
    }
}

/// `1.` `1.1.` `1.2.` — one dotted counter per level of the path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MultiLevelNumericIndex;

impl IndexGenerator for MultiLevelNumericIndex {
    fn generate(&self, path: &[u32]) -> Result<String, ListError> {
        let mut out = String::new();
        for value in path {
            out.push_str(&value.to_string());
            out.push('.');
        }
        checked(out)
    }
}

/// The innermost counter as a decimal number, optionally bracketed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SingleLevelNumericIndex {
    pub left: Option<char>,
    pub right: Option<char>,
}

impl IndexGenerator for SingleLevelNumericIndex {
    fn generate(&self, path: &[u32]) -> Result<String, ListError> {
        let mut out = String::new();
        push_bracket(&mut out, self.left);
        if let Some(value) = path.last() {
            out.push_str(&value.to_string());
        }
        push_bracket(&mut out, self.right);
        checked(out)
    }
}

/// Positional numbering over a character range: with `A`-`C` the sequence
/// runs `A B C AA AB AC BA ... CC AAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharRangeIndex {
    pub left: Option<char>,
    pub right: Option<char>,
    pub start: char,
    pub end: char,
}

impl IndexGenerator for CharRangeIndex {
    fn generate(&self, path: &[u32]) -> Result<String, ListError> {
        let value = path.last().copied().unwrap_or(0);
        if value < 1 {
            return Err(ListError::IndexOverflow);
        }

        let radix = i64::from(self.end as u32) - i64::from(self.start as u32) + 1;
        if radix <= 0 {
            return Err(ListError::IndexOverflow);
        }

        let mut digits = Vec::new();
        let mut number = i64::from(value) - 1;
        while number >= 0 {
            let digit = u32::try_from(number % radix).map_err(|_| ListError::IndexOverflow)?;
            let c = char::from_u32(self.start as u32 + digit).ok_or(ListError::IndexOverflow)?;
            digits.push(c);
            number = number / radix - 1;
        }

        let mut out = String::new();
        push_bracket(&mut out, self.left);
        out.extend(digits.into_iter().rev());
        push_bracket(&mut out, self.right);
        checked(out)
    }
}

/// Roman numerals, upper or lower case, optionally bracketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RomanIndex {
    pub left: Option<char>,
    pub right: Option<char>,
    pub capitals: bool,
}

impl IndexGenerator for RomanIndex {
    fn generate(&self, path: &[u32]) -> Result<String, ListError> {
        const DIGITS: [(&str, &str, u32); 13] = [
            ("M", "m", 1000),
            ("CM", "cm", 900),
            ("D", "d", 500),
            ("CD", "cd", 400),
            ("C", "c", 100),
            ("XC", "xc", 90),
            ("L", "l", 50),
            ("XL", "xl", 40),
            ("X", "x", 10),
            ("IX", "ix", 9),
            ("V", "v", 5),
            ("IV", "iv", 4),
            ("I", "i", 1),
        ];

        let mut value = path.last().copied().unwrap_or(0);
        if value < 1 {
            return Err(ListError::IndexOverflow);
        }

        let mut out = String::new();
        push_bracket(&mut out, self.left);
        for (upper, lower, weight) in DIGITS {
            while value >= weight {
                out.push_str(if self.capitals { upper } else { lower });
                value -= weight;
            }
        }
        push_bracket(&mut out, self.right);
        checked(out)
    }
}
