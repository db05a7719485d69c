//! Russian typography rules.

use super::{Language, QuoteKind};
use crate::markup::MarkupBuilder;

/// Hyphenation prefixes checked by the first break rule.
const PREFIXES: &[&str] = &[
    "не",
    "со",
    "пре",
    "по",
    "при",
    "пере",
    "передо",
    "противо",
    "свето",
    "одно",
    "дву",
    "два",
    "три",
    "четверо",
    "пяти",
    "шести",
    "семи",
    "восьми",
    "девяти",
    "десяти",
    "двадцати",
    "тридцати",
    "сорока",
    "пятидесяти",
    "шестидесяти",
    "семидесяти",
    "восьмидесяти",
    "девяносто",
    "сто",
];

fn is_cyrillic(c: char) -> bool {
    ('А'..='Я').contains(&c) || ('а'..='я').contains(&c) || c == 'Ё' || c == 'ё'
}

fn is_upper(c: char) -> bool {
    c.is_ascii_uppercase() || ('А'..='Я').contains(&c) || c == 'Ё'
}

fn is_lower(c: char) -> bool {
    c.is_ascii_lowercase() || ('а'..='я').contains(&c) || c == 'ё'
}

fn is_vowel(c: char) -> bool {
    "ЁУЕЫАОЭЯИЮёуеыаоэяию".contains(c)
}

fn is_soft_modifier(c: char) -> bool {
    c == 'ь' || c == 'Ь'
}

fn is_hard_modifier(c: char) -> bool {
    c == 'ъ' || c == 'Ъ'
}

fn is_modifier(c: char) -> bool {
    is_soft_modifier(c) || is_hard_modifier(c)
}

fn is_sibilant(c: char) -> bool {
    matches!(c, 'С' | 'З' | 'с' | 'з')
}

fn is_prefix(word: &[char]) -> bool {
    PREFIXES
        .iter()
        .any(|prefix| prefix.chars().eq(word.iter().copied()))
}

/// A word of two or more capitals is treated as an acronym and never
/// hyphenated.
fn is_acronym(text: &[char], start: usize, len: usize) -> bool {
    text[start..start + len].iter().filter(|&&c| is_upper(c)).count() > 1
}

/// A break is allowed right after the vowel at `index` when the following
/// letters keep a pronounceable tail (or the head is a known prefix).
fn shy_after_vowel(text: &[char], start: usize, index: usize, limit: usize) -> bool {
    if index == start || index + 2 >= limit {
        return false;
    }

    is_vowel(text[index + 1])
        || is_vowel(text[index + 2])
        || (is_soft_modifier(text[index + 2]) && index + 3 < limit && is_vowel(text[index + 3]))
        || is_prefix(&text[start..=index])
}

/// A break is allowed after the consonant following the vowel at `index`.
fn shy_after_consonant(text: &[char], index: usize, limit: usize) -> bool {
    index + 3 < limit
        && !(is_sibilant(text[index + 1])
            && !is_vowel(text[index + 2])
            && !is_vowel(text[index + 3]))
        && !is_modifier(text[index + 2])
}

/// A break is allowed after a two-consonant cluster following the vowel.
fn shy_after_cluster(text: &[char], index: usize, limit: usize) -> bool {
    index + 4 < limit
        && !is_modifier(text[index + 3])
        && (is_vowel(text[index + 3]) || is_vowel(text[index + 4]))
}

/// Russian language: Cyrillic words (Latin letters join them), French
/// primary quotes with German alternates, and a three-rule syllable
/// hyphenator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RussianLanguage;

impl Language for RussianLanguage {
    fn is_word_char(&self, c: char) -> bool {
        is_cyrillic(c) || c.is_ascii_alphabetic()
    }

    fn to_lower(&self, c: char) -> char {
        match c {
            'Ё' => 'ё',
            _ if c.is_ascii_uppercase() => c.to_ascii_lowercase(),
            _ if is_upper(c) => char::from_u32(c as u32 + 0x20).unwrap_or(c),
            _ => c,
        }
    }

    fn to_upper(&self, c: char) -> char {
        match c {
            'ё' => 'Ё',
            _ if c.is_ascii_lowercase() => c.to_ascii_uppercase(),
            _ if is_lower(c) => char::from_u32(c as u32 - 0x20).unwrap_or(c),
            _ => c,
        }
    }

    fn opening_quote(&self, alternate: bool) -> QuoteKind {
        if alternate {
            QuoteKind::GermanOpen
        } else {
            QuoteKind::FrenchOpen
        }
    }

    fn closing_quote(&self, alternate: bool) -> QuoteKind {
        if alternate {
            QuoteKind::GermanClose
        } else {
            QuoteKind::FrenchClose
        }
    }

    fn hyphenate(&self, markup: &mut MarkupBuilder, start: usize, len: usize, shy: &str) {
        let text = markup.text().to_vec();

        if is_acronym(&text, start, len) {
            return;
        }

        let limit = start + len;
        for at in start..limit {
            if !is_vowel(text[at]) {
                continue;
            }

            if shy_after_vowel(&text, start, at, limit) {
                markup.append(at, shy);
            } else if shy_after_consonant(&text, at, limit) {
                markup.append(at + 1, shy);
            } else if shy_after_cluster(&text, at, limit) {
                markup.append(at + 2, shy);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn hyphenated(word: &str) -> String {
        let mut markup = MarkupBuilder::new();
        markup.push_str(word);
        let len = markup.len();
        RussianLanguage.hyphenate(&mut markup, 0, len, "-");
        markup.render()
    }

    #[test]
    fn breaks_between_open_syllables() {
        assert_eq!(hyphenated("молоко"), "мо-ло-ко");
        assert_eq!(hyphenated("корова"), "ко-ро-ва");
    }

    #[test]
    fn breaks_after_consonant_clusters() {
        assert_eq!(hyphenated("вопрос"), "воп-рос");
    }

    #[test]
    fn known_prefixes_break_early() {
        assert_eq!(hyphenated("подставка"), "по-дстав-ка");
    }

    #[test]
    fn acronyms_are_left_alone() {
        assert_eq!(hyphenated("ООН"), "ООН");
        assert_eq!(hyphenated("СССР"), "СССР");
    }

    #[test]
    fn single_capital_is_not_an_acronym() {
        assert_eq!(hyphenated("Мама"), "Ма-ма");
    }

    #[test]
    fn case_mapping_covers_both_alphabets() {
        let lang = RussianLanguage;
        assert_eq!(lang.to_lower('Д'), 'д');
        assert_eq!(lang.to_lower('Ё'), 'ё');
        assert_eq!(lang.to_upper('ж'), 'Ж');
        assert_eq!(lang.to_lower('Q'), 'q');
        assert_eq!(lang.to_upper('7'), '7');
    }

    fn quote_text(kind: QuoteKind) -> Option<&'static str> {
        match kind {
            QuoteKind::FrenchOpen => Some("<<"),
            QuoteKind::FrenchClose => Some(">>"),
            QuoteKind::GermanOpen => Some(",,"),
            QuoteKind::GermanClose => Some("''"),
            _ => None,
        }
    }

    #[test]
    fn quotes_alternate_between_classes() {
        let mut markup = MarkupBuilder::new();
        markup.push_str("сказал \"она \"ответила\" и ушла\" тихо");
        RussianLanguage.punctuate(&mut markup, "---", quote_text);
        assert_eq!(
            markup.render(),
            "сказал <<она ,,ответила'' и ушла>> тихо"
        );
    }

    #[test]
    fn hyphen_before_space_becomes_a_dash() {
        let mut markup = MarkupBuilder::new();
        markup.push_str("жизнь - это путь");
        RussianLanguage.punctuate(&mut markup, "---", quote_text);
        assert_eq!(markup.render(), "жизнь --- это путь");
    }
}
