//! Decorated character buffer for one logical line of output.
//!
//! Every character pushed into the buffer can later be decorated with
//! prepended or appended markup fragments, or substituted with another
//! string, without disturbing the positions of its neighbours. The plain
//! text is kept alongside the decorations so that language rules
//! (hyphenation, quote substitution) can inspect the undecorated line and
//! decorate it in place.

/// Decorations attached to one buffer position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Decorations {
    /// Fragments written before the character, in insertion order: the
    /// first prepended fragment ends up outermost.
    preceding: Vec<String>,
    /// Replacement for the character itself. `Some(String::new())`
    /// suppresses the character while keeping its decorations.
    substitution: Option<String>,
    /// Fragments written after the character, in insertion order.
    following: Vec<String>,
}

impl Decorations {
    fn is_empty(&self) -> bool {
        self.preceding.is_empty() && self.substitution.is_none() && self.following.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Decorated {
    ch: char,
    deco: Decorations,
}

/// A line buffer of characters with in-place markup decorations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupBuilder {
    chars: Vec<Decorated>,
    /// Plain code points, parallel to `chars`.
    text: Vec<char>,
    /// Decorations waiting for the next pushed character.
    pending: Decorations,
}

impl MarkupBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a character, attaching any decorations registered for the
    /// upcoming position.
    pub fn push(&mut self, c: char) {
        let deco = std::mem::take(&mut self.pending);
        self.chars.push(Decorated { ch: c, deco });
        self.text.push(c);
    }

    pub fn push_str(&mut self, s: &str) {
        for c in s.chars() {
            self.push(c);
        }
    }

    /// Appends another buffer, keeping its decorations. Decorations pending
    /// for this buffer's next position attach to the first merged character.
    pub fn push_markup(&mut self, other: &MarkupBuilder) {
        let mut pending = std::mem::take(&mut self.pending);
        for decorated in &other.chars {
            let mut decorated = decorated.clone();
            if !pending.is_empty() {
                pending.preceding.append(&mut decorated.deco.preceding);
                decorated.deco.preceding = std::mem::take(&mut pending.preceding);
                if decorated.deco.substitution.is_none() {
                    decorated.deco.substitution = pending.substitution.take();
                }
                decorated.deco.following.append(&mut pending.following);
                pending = Decorations::default();
            }
            self.text.push(decorated.ch);
            self.chars.push(decorated);
        }
        // Nothing was merged; keep the pending decorations.
        self.pending = pending;
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// The undecorated code points of the buffer.
    #[must_use]
    pub fn text(&self) -> &[char] {
        &self.text
    }

    /// The undecorated text as an owned string.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.text.iter().collect()
    }

    /// Index of the last pushed character.
    #[must_use]
    pub fn last_index(&self) -> Option<usize> {
        self.chars.len().checked_sub(1)
    }

    /// Registers a fragment to be written before the character at `index`.
    pub fn prepend(&mut self, index: usize, fragment: &str) {
        self.chars[index].deco.preceding.push(fragment.to_owned());
    }

    /// Registers a fragment to be written after the character at `index`.
    pub fn append(&mut self, index: usize, fragment: &str) {
        self.chars[index].deco.following.push(fragment.to_owned());
    }

    /// Registers a fragment to be written before the next pushed character.
    pub fn prepend_next(&mut self, fragment: &str) {
        self.pending.preceding.push(fragment.to_owned());
    }

    /// Prepends to the last pushed character; does nothing on an empty
    /// buffer.
    pub fn prepend_last(&mut self, fragment: &str) {
        if let Some(index) = self.last_index() {
            self.prepend(index, fragment);
        }
    }

    /// Appends to the last pushed character; does nothing on an empty
    /// buffer.
    pub fn append_last(&mut self, fragment: &str) {
        if let Some(index) = self.last_index() {
            self.append(index, fragment);
        }
    }

    /// Replaces the rendering of `len` characters starting at `index` with
    /// `replacement`. The replacement renders at the first position; the
    /// remaining positions keep their own decorations but lose their
    /// characters. An empty replacement leaves the span untouched.
    pub fn substitute(&mut self, index: usize, len: usize, replacement: &str) {
        debug_assert!(len > 0);
        assert!(index + len <= self.chars.len());

        if replacement.is_empty() {
            return;
        }

        for decorated in &mut self.chars[index + 1..index + len] {
            decorated.deco.substitution = Some(String::new());
        }
        self.chars[index].deco.substitution = Some(replacement.to_owned());
    }

    /// Serializes the buffer: for each position its prepend fragments, then
    /// the substitution (or the character itself), then its append
    /// fragments.
    pub fn render_into(&self, out: &mut String) {
        for decorated in &self.chars {
            for fragment in &decorated.deco.preceding {
                out.push_str(fragment);
            }
            match &decorated.deco.substitution {
                Some(replacement) => out.push_str(replacement),
                None => out.push(decorated.ch),
            }
            for fragment in &decorated.deco.following {
                out.push_str(fragment);
            }
        }
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.text.clear();
        self.pending = Decorations::default();
    }
}
