//! In-document presentation variables.

use crate::markup::MarkupBuilder;

/// Canonical value of a true boolean variable.
pub const VAR_TRUE: &str = "y";
/// Canonical value of a false boolean variable.
pub const VAR_FALSE: &str = "n";

/// Handle to a declared variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarId(usize);

/// A named variable holding decorated markup.
#[derive(Debug, Clone)]
pub struct Variable {
    name: String,
    markup: MarkupBuilder,
}

impl Variable {
    #[must_use]
    pub fn markup(&self) -> &MarkupBuilder {
        &self.markup
    }

    pub fn markup_mut(&mut self) -> &mut MarkupBuilder {
        &mut self.markup
    }

    /// Plain text of the value, without decorations.
    #[must_use]
    pub fn text(&self) -> String {
        self.markup.plain_text()
    }

    /// A variable is true when its value starts with `y` or `Y`.
    #[must_use]
    pub fn as_boolean(&self) -> bool {
        matches!(self.markup.text().first(), Some('y' | 'Y'))
    }
}

/// Append-only store of variables, addressed by [`VarId`] or name.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    vars: Vec<Variable>,
}

impl Variables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a variable with the given value, or resets an existing one.
    pub fn reset(&mut self, name: &str, value: &str) -> VarId {
        if let Some(id) = self.lookup(name) {
            let markup = self.vars[id.0].markup_mut();
            markup.clear();
            markup.push_str(value);
            return id;
        }

        let mut markup = MarkupBuilder::new();
        markup.push_str(value);
        self.vars.push(Variable {
            name: name.to_owned(),
            markup,
        });
        VarId(self.vars.len() - 1)
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<VarId> {
        self.vars.iter().position(|v| v.name == name).map(VarId)
    }

    #[must_use]
    pub fn get(&self, id: VarId) -> &Variable {
        &self.vars[id.0]
    }

    pub fn get_mut(&mut self, id: VarId) -> &mut Variable {
        &mut self.vars[id.0]
    }
}
