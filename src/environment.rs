use std::fmt;

use indexmap::IndexMap;

use crate::{
    diagnostics::{Diagnostic, Result, SeeError, SourceSpan},
    value::Value,
};

#[derive(Default)]
pub struct Environment {
    bindings: IndexMap<String, Binding>,
}

#[derive(Clone)]
pub struct Binding {
    pub value: Value,
    /// Prelude bindings are read-only and hidden from the scope description.
    pub builtin: bool,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define_builtin(&mut self, name: &str, value: Value) {
        self.bindings.insert(
            name.to_string(),
            Binding {
                value,
                builtin: true,
            },
        );
    }

    pub fn assign(&mut self, name: &str, value: Value, span: SourceSpan) -> Result<()> {
        match self.bindings.get_mut(name) {
            Some(binding) if binding.builtin => Err(SeeError::from(
                Diagnostic::runtime(format!("cannot assign to builtin `{name}`")).with_span(span),
            )),
            Some(binding) => {
                binding.value = value;
                Ok(())
            }
            None => {
                self.bindings.insert(
                    name.to_string(),
                    Binding {
                        value,
                        builtin: false,
                    },
                );
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.bindings.get(name).map(|binding| binding.value.clone())
    }

    pub fn user_bindings(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings
            .iter()
            .filter(|(_, binding)| !binding.builtin)
            .map(|(name, binding)| (name.as_str(), &binding.value))
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (idx, (name, value)) in self.user_bindings().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name} = {value:?}")?;
        }
        write!(f, "}}")
    }
}
