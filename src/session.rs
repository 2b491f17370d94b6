//! The engine facade the console drives: one evaluation context whose
//! bindings persist across every statement of a process run.

use std::fmt;

use crate::{
    ast::Node,
    diagnostics::{Result, SeeError},
    parser::{self, ParseMode},
    runtime::Interpreter,
    value::Value,
};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Default,
    /// Restricted engine: statements may read bindings but never create them.
    Const,
}

pub struct Session {
    variant: Variant,
    interpreter: Interpreter,
}

impl Session {
    pub fn create_default() -> Self {
        Self::with_variant(Variant::Default)
    }

    pub fn create_const() -> Self {
        Self::with_variant(Variant::Const)
    }

    pub fn with_variant(variant: Variant) -> Self {
        Self {
            variant,
            interpreter: Interpreter::new(),
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn parse(&self, text: &str) -> Result<Node> {
        let mode = match self.variant {
            Variant::Default => ParseMode::Full,
            Variant::Const => ParseMode::Const,
        };
        parser::parse_node(text, mode).map_err(SeeError::from)
    }

    pub fn eval(&mut self, node: &Node) -> Result<Value> {
        self.interpreter.eval_node(node)
    }

    pub fn eval_source(&mut self, text: &str) -> Result<Value> {
        let node = self.parse(text)?;
        self.eval(&node)
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.interpreter.environment().get(name)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::create_default()
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.interpreter.environment())
    }
}
