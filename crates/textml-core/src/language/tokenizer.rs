//! Greedy line tokenizer.

use super::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    SingleChar,
    Whitespace,
    LineBreak,
}

/// A token over a `&[char]` line: position, length and class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub len: usize,
}

/// Iterator over the tokens of a line.
///
/// Words are maximal runs of word characters; every space or tab is its own
/// whitespace token; `\n` is a line break; anything else is a single
/// character token.
pub struct Tokens<'a> {
    text: &'a [char],
    language: &'a dyn Language,
    pos: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(text: &'a [char], language: &'a dyn Language) -> Self {
        Self {
            text,
            language,
            pos: 0,
        }
    }
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let start = self.pos;
        let c = *self.text.get(start)?;

        let (kind, len) = match c {
            ' ' | '\t' => (TokenKind::Whitespace, 1),
            '\n' => (TokenKind::LineBreak, 1),
            _ if self.language.is_word_char(c) => {
                let mut end = start + 1;
                while self
                    .text
                    .get(end)
                    .is_some_and(|&n| self.language.is_word_char(n))
                {
                    end += 1;
                }
                (TokenKind::Word, end - start)
            }
            _ => (TokenKind::SingleChar, 1),
        };

        self.pos = start + len;
        Some(Token { kind, start, len })
    }
}
