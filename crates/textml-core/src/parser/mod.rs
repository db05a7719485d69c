//! Line-oriented markup parser.
//!
//! The parser feeds decoded characters through a small per-line automaton
//! ([`state::LineMachine`]) which turns tag syntax, inline spans and prose
//! into [`Generator`] calls. Whether text is parsed or passed through
//! verbatim persists across lines (a preformatted, link or variable tag
//! switches it off until the next tag line).

mod state;
mod tags;

use crate::error::Result;
use crate::generator::Generator;
use crate::parser::state::LineMachine;
use crate::parser::tags::TextMode;

/// Drives a [`Generator`] over a whole input document.
pub struct Parser {
    text_mode: TextMode,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            text_mode: TextMode::Parsed,
        }
    }

    /// Parses the whole input, reporting errors with their 1-based line.
    pub fn parse(&mut self, input: &str, generator: &mut dyn Generator) -> Result<()> {
        for (index, line) in input.lines().enumerate() {
            let number = u32::try_from(index + 1).unwrap_or(u32::MAX);
            self.parse_line(line, generator)
                .map_err(|err| err.at_line(number))?;
        }
        generator.close_document();
        Ok(())
    }

    fn parse_line(&mut self, line: &str, generator: &mut dyn Generator) -> Result<()> {
        let mut machine = LineMachine::new(self.text_mode);
        for c in line.chars() {
            machine.process_char(c, generator)?;
        }
        machine.finish(generator)?;
        self.text_mode = machine.text_mode();
        Ok(())
    }
}
