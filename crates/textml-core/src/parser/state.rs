//! The per-line character automaton.
//!
//! One character is consumed at a time; a transition replays the same
//! character into the new state, so the glyph that caused the switch is
//! still interpreted by the state it switched to.

use crate::error::{ErrorKind, Result};
use crate::generator::Generator;
use crate::parser::tags::{self, TextMode};

/// Which delimiter glyphs may open and close tags on this line.
///
/// The first tag-open glyph on a line fixes the mode for its remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagMode {
    Any,
    Angle,
    Slash,
}

impl TagMode {
    fn opens(self, c: char) -> bool {
        match c {
            '<' => self != Self::Slash,
            '/' => self != Self::Angle,
            _ => false,
        }
    }

    fn closes(self, c: char) -> bool {
        match self {
            Self::Angle => c == '>',
            Self::Slash => c == '/',
            Self::Any => false,
        }
    }

    fn fix(c: char) -> Self {
        if c == '/' { Self::Slash } else { Self::Angle }
    }
}

#[derive(Debug)]
enum State {
    Start,
    Tag {
        name: String,
        args: Vec<String>,
        in_args: bool,
    },
    InlineTag {
        name: String,
        in_text: bool,
        escaped: bool,
    },
    Text {
        escaped: bool,
    },
    AsIsText,
}

/// Automaton for one input line.
pub struct LineMachine {
    state: State,
    mode: TagMode,
    text_mode: TextMode,
    is_tag_line: bool,
    inline_open: bool,
    /// Leading spaces and tabs, held back until the line proves to be
    /// prose rather than an inline tag.
    leading: String,
    leading_held: bool,
}

impl LineMachine {
    pub fn new(text_mode: TextMode) -> Self {
        Self {
            state: State::Start,
            mode: TagMode::Any,
            text_mode,
            is_tag_line: false,
            inline_open: false,
            leading: String::new(),
            leading_held: true,
        }
    }

    /// Text handling mode left for the following lines.
    pub fn text_mode(&self) -> TextMode {
        self.text_mode
    }

    fn flush_leading(&mut self, generator: &mut dyn Generator) {
        for c in self.leading.chars() {
            generator.text_char(c);
        }
        self.leading.clear();
        self.leading_held = false;
    }

    pub fn process_char(&mut self, c: char, generator: &mut dyn Generator) -> Result<()> {
        loop {
            match &mut self.state {
                State::Start => {
                    if self.mode.opens(c) {
                        self.mode = TagMode::fix(c);
                        self.is_tag_line = true;
                        self.text_mode = TextMode::Parsed;
                        self.state = State::Tag {
                            name: String::new(),
                            args: Vec::new(),
                            in_args: false,
                        };
                        return Ok(());
                    }
                    self.state = match self.text_mode {
                        TextMode::Parsed => State::Text { escaped: false },
                        TextMode::AsIs => State::AsIsText,
                    };
                }

                State::Tag {
                    name,
                    args,
                    in_args,
                } => {
                    if self.mode.closes(c) {
                        let name = std::mem::take(name);
                        let args = std::mem::take(args);
                        self.state = State::Start;
                        self.text_mode = tags::commit(&name, &args, generator)?;
                        return Ok(());
                    }
                    match c {
                        ' ' | '\t' => {
                            if !*in_args {
                                *in_args = true;
                                args.push(String::new());
                            }
                        }
                        ',' => {
                            *in_args = true;
                            args.push(String::new());
                        }
                        _ => {
                            if *in_args {
                                if let Some(arg) = args.last_mut() {
                                    arg.push(c);
                                }
                            } else {
                                name.push(c);
                            }
                        }
                    }
                    return Ok(());
                }

                State::InlineTag {
                    name,
                    in_text,
                    escaped,
                } => {
                    if *escaped {
                        *escaped = false;
                        generator.text_char(c);
                        return Ok(());
                    }
                    if self.mode.closes(c) {
                        let name = std::mem::take(name);
                        let in_text = *in_text;
                        self.state = State::Text { escaped: false };

                        if in_text {
                            if self.inline_open {
                                generator.close_inline_tag();
                                self.inline_open = false;
                            }
                            return Ok(());
                        }
                        if name.is_empty() {
                            return Err(ErrorKind::NamelessInlineTag.into());
                        }
                        if let Some(variable) = name.strip_prefix('$') {
                            generator.inject_variable(variable)?;
                            return Ok(());
                        }
                        if self.inline_open {
                            generator.close_inline_tag();
                            self.inline_open = false;
                        } else {
                            generator.open_inline_tag(&name);
                            self.inline_open = true;
                        }
                        return Ok(());
                    }
                    match c {
                        ' ' | '\t' if !*in_text => {
                            if name.is_empty() {
                                return Err(ErrorKind::NamelessInlineTag.into());
                            }
                            *in_text = true;
                            if let Some(variable) = name.strip_prefix('$') {
                                let variable = variable.to_owned();
                                generator.inject_variable(&variable)?;
                            } else {
                                generator.open_inline_tag(name);
                                self.inline_open = true;
                            }
                        }
                        '=' if *in_text => *escaped = true,
                        _ => {
                            if *in_text {
                                generator.text_char(c);
                            } else {
                                name.push(c);
                            }
                        }
                    }
                    return Ok(());
                }

                State::Text { escaped } => {
                    if *escaped {
                        *escaped = false;
                        self.flush_leading(generator);
                        generator.text_char(c);
                        return Ok(());
                    }
                    if self.mode.opens(c) {
                        self.mode = TagMode::fix(c);
                        // An inline tag consumes the held leading spaces.
                        self.leading.clear();
                        self.leading_held = false;
                        self.state = State::InlineTag {
                            name: String::new(),
                            in_text: false,
                            escaped: false,
                        };
                        return Ok(());
                    }
                    match c {
                        '=' => *escaped = true,
                        ' ' | '\t' if self.leading_held => self.leading.push(c),
                        '_' if !self.is_tag_line => generator.line_continue(),
                        '[' => {
                            self.flush_leading(generator);
                            generator.open_bold();
                        }
                        ']' => generator.close_bold(),
                        '{' => {
                            self.flush_leading(generator);
                            generator.open_italic();
                        }
                        '}' => generator.close_italic(),
                        '\\' => generator.stress_mark(),
                        _ => {
                            self.flush_leading(generator);
                            generator.text_char(c);
                        }
                    }
                    return Ok(());
                }

                State::AsIsText => {
                    generator.text_char(c);
                    return Ok(());
                }
            }
        }
    }

    /// End of line: implicitly close what a tag line left open, or flush
    /// the prose line.
    pub fn finish(&mut self, generator: &mut dyn Generator) -> Result<()> {
        if self.inline_open {
            generator.close_inline_tag();
            self.inline_open = false;
        }

        if self.is_tag_line {
            if matches!(
                self.state,
                State::Text { .. } | State::AsIsText | State::InlineTag { .. }
            ) {
                generator.close_tag()?;
            }
            return Ok(());
        }

        generator.line_end()
    }
}
