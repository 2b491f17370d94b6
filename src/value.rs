use std::{fmt, rc::Rc};

use crate::diagnostics::{Diagnostic, Result, SeeError};

#[derive(Clone)]
pub struct Value(pub Rc<ValueKind>);

impl Value {
    pub fn new(kind: ValueKind) -> Self {
        Self(Rc::new(kind))
    }

    pub fn none() -> Self {
        Self::new(ValueKind::None)
    }

    pub fn bool(value: bool) -> Self {
        Self::new(ValueKind::Bool(value))
    }

    pub fn int(value: i64) -> Self {
        Self::new(ValueKind::Int(value))
    }

    pub fn float(value: f64) -> Self {
        Self::new(ValueKind::Float(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(ValueKind::String(value.into()))
    }

    pub fn array(values: Vec<Value>) -> Self {
        Self::new(ValueKind::Array(values))
    }

    pub fn kind(&self) -> &ValueKind {
        &self.0
    }

    pub fn is_truthy(&self) -> bool {
        match self.kind() {
            ValueKind::None => false,
            ValueKind::Bool(b) => *b,
            ValueKind::Int(n) => *n != 0,
            ValueKind::Float(f) => *f != 0.0,
            ValueKind::String(s) => !s.is_empty(),
            ValueKind::Array(values) => !values.is_empty(),
            ValueKind::Builtin(_) => true,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self.kind() {
            ValueKind::None => "None",
            ValueKind::Bool(_) => "Bool",
            ValueKind::Int(_) => "Int",
            ValueKind::Float(_) => "Float",
            ValueKind::String(_) => "String",
            ValueKind::Array(_) => "Array",
            ValueKind::Builtin(_) => "Function",
        }
    }

    pub fn is_int(&self) -> bool {
        matches!(self.kind(), ValueKind::Int(_))
    }

    /// Type-tagged rendering used by the console's `dump` command.
    ///
    /// Builtin functions have no structured form and return `None`; callers
    /// fall back to [`fmt::Display`].
    pub fn dump(&self) -> Option<String> {
        let dumped = match self.kind() {
            ValueKind::None => "None".to_string(),
            ValueKind::Bool(b) => format!("Bool({b})"),
            ValueKind::Int(n) => format!("Int({n})"),
            ValueKind::Float(n) => format!("Float({n:?})"),
            ValueKind::String(s) => format!("String({s:?})"),
            ValueKind::Array(values) => {
                let mut parts = Vec::with_capacity(values.len());
                for value in values {
                    parts.push(value.dump().unwrap_or_else(|| value.to_string()));
                }
                format!("Array[{}]", parts.join(", "))
            }
            ValueKind::Builtin(_) => return None,
        };
        Some(dumped)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self.kind(), other.kind()) {
            (ValueKind::None, ValueKind::None) => true,
            (ValueKind::Bool(a), ValueKind::Bool(b)) => a == b,
            (ValueKind::Int(a), ValueKind::Int(b)) => a == b,
            (ValueKind::Float(a), ValueKind::Float(b)) => a == b,
            (ValueKind::Int(a), ValueKind::Float(b)) | (ValueKind::Float(b), ValueKind::Int(a)) => {
                *a as f64 == *b
            }
            (ValueKind::String(a), ValueKind::String(b)) => a == b,
            (ValueKind::Array(a), ValueKind::Array(b)) => a == b,
            (ValueKind::Builtin(a), ValueKind::Builtin(b)) => a.name == b.name,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.dump() {
            Some(dumped) => write!(f, "{dumped}"),
            None => write!(f, "{self}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            ValueKind::None => write!(f, "none"),
            ValueKind::Bool(b) => write!(f, "{b}"),
            ValueKind::Int(n) => write!(f, "{n}"),
            ValueKind::Float(n) => write!(f, "{n}"),
            ValueKind::String(s) => write!(f, "{s}"),
            ValueKind::Array(values) => {
                write!(f, "[")?;
                for (idx, value) in values.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")
            }
            ValueKind::Builtin(fun) => write!(f, "<builtin {}>", fun.name),
        }
    }
}

#[derive(Clone)]
pub enum ValueKind {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Builtin(Builtin),
}

/// A function provided by the prelude. `arity` of `None` accepts any count.
#[derive(Clone)]
pub struct Builtin {
    pub name: &'static str,
    pub arity: Option<usize>,
    pub callback: fn(&[Value]) -> Result<Value>,
}

impl Builtin {
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        if let Some(arity) = self.arity {
            if args.len() != arity {
                return Err(SeeError::from(Diagnostic::runtime(format!(
                    "function `{}` expected {} arguments but received {}",
                    self.name,
                    arity,
                    args.len()
                ))));
            }
        }
        (self.callback)(args)
    }
}
