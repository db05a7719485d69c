//! Language-specific typography: word boundaries, quotes, hyphenation.

mod russian;
mod tokenizer;

pub use russian::RussianLanguage;
pub use tokenizer::{Token, TokenKind, Tokens};

use crate::markup::MarkupBuilder;

/// The quote glyph classes a generator can be asked to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteKind {
    FrenchOpen,
    FrenchClose,
    GermanOpen,
    GermanClose,
    EnglishOpen,
    EnglishClose,
    EnglishSingleOpen,
    EnglishSingleClose,
}

/// Maps a quote class to the target format's text for it. `None` leaves the
/// raw `"` in place.
pub type QuoteMap = fn(QuoteKind) -> Option<&'static str>;

/// Typography rules of the input language.
pub trait Language {
    /// Whether `c` belongs to a word of this language.
    fn is_word_char(&self, c: char) -> bool;

    fn to_lower(&self, c: char) -> char;

    fn to_upper(&self, c: char) -> char;

    /// Quote class used to open a quotation. The alternate class is used
    /// for every second quote character on a line.
    fn opening_quote(&self, alternate: bool) -> QuoteKind;

    /// Quote class used to close a quotation.
    fn closing_quote(&self, alternate: bool) -> QuoteKind;

    /// Inserts soft hyphens into the word at `start..start + len`,
    /// appending `shy` after the characters where a break is allowed.
    fn hyphenate(&self, markup: &mut MarkupBuilder, start: usize, len: usize, shy: &str);

    /// Substitutes typographic punctuation in place: `"` becomes the
    /// language's quotes (alternating between the primary and alternate
    /// class) and a hyphen before a space becomes `dash`.
    fn punctuate(&self, markup: &mut MarkupBuilder, dash: &str, quotes: QuoteMap) {
        let text = markup.text().to_vec();
        let mut alternate = false;

        for (i, &c) in text.iter().enumerate() {
            match c {
                '"' => {
                    let opens = text.get(i + 1).is_some_and(|&next| self.is_word_char(next));
                    let kind = if opens {
                        self.opening_quote(alternate)
                    } else {
                        self.closing_quote(!alternate)
                    };
                    alternate = !alternate;
                    if let Some(replacement) = quotes(kind) {
                        markup.substitute(i, 1, replacement);
                    }
                }
                '-' => {
                    if text.get(i + 1) == Some(&' ') {
                        markup.substitute(i, 1, dash);
                    }
                }
                _ => {}
            }
        }
    }

    /// Iterates the tokens of `text`.
    fn tokens<'a>(&'a self, text: &'a [char]) -> Tokens<'a>
    where
        Self: Sized,
    {
        Tokens::new(text, self)
    }
}
