use crate::{
    ast::{BinaryOp, Expr, ExprKind, Literal, Node, UnaryOp},
    diagnostics::{Diagnostic, Result, SeeError, SourceSpan},
    environment::Environment,
    value::{Value, ValueKind},
};

pub struct Interpreter {
    env: Environment,
}

impl Interpreter {
    pub fn new() -> Self {
        let mut env = Environment::new();
        crate::stdlib::install(&mut env);
        Self { env }
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn eval_node(&mut self, node: &Node) -> Result<Value> {
        let mut last_value = Value::none();
        for expr in &node.items {
            last_value = self.evaluate(expr)?;
        }
        Ok(last_value)
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Value> {
        match &expr.kind {
            ExprKind::Literal(lit) => Ok(literal(lit)),
            // Unbound names read as `none`.
            ExprKind::Variable(name) => Ok(self.env.get(name).unwrap_or_else(Value::none)),
            ExprKind::Binary { op, left, right } => match op {
                BinaryOp::And => {
                    let left_value = self.evaluate(left)?;
                    if !left_value.is_truthy() {
                        return Ok(Value::bool(false));
                    }
                    Ok(Value::bool(self.evaluate(right)?.is_truthy()))
                }
                BinaryOp::Or => {
                    let left_value = self.evaluate(left)?;
                    if left_value.is_truthy() {
                        return Ok(Value::bool(true));
                    }
                    Ok(Value::bool(self.evaluate(right)?.is_truthy()))
                }
                _ => {
                    let left_value = self.evaluate(left)?;
                    let right_value = self.evaluate(right)?;
                    binary(*op, left_value, right_value, expr.span)
                }
            },
            ExprKind::Unary { op, expr: inner } => {
                let value = self.evaluate(inner)?;
                unary(*op, value, expr.span)
            }
            ExprKind::Assign { name, value } => {
                let value = self.evaluate(value)?;
                self.env.assign(name, value.clone(), expr.span)?;
                Ok(value)
            }
            ExprKind::Call { callee, args } => {
                let callee_value = self.evaluate(callee)?;
                let mut eval_args = Vec::with_capacity(args.len());
                for arg in args {
                    eval_args.push(self.evaluate(arg)?);
                }
                match callee_value.kind() {
                    ValueKind::Builtin(fun) => fun
                        .call(&eval_args)
                        .map_err(|err| with_span(err, expr.span)),
                    _ => Err(runtime_error(
                        format!("{} is not callable", callee_value.type_name()),
                        callee.span,
                    )),
                }
            }
            ExprKind::ArrayLiteral(elements) => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.evaluate(element)?);
                }
                Ok(Value::array(values))
            }
            ExprKind::Index { target, index } => {
                let target_value = self.evaluate(target)?;
                let index_value = self.evaluate(index)?;
                self::index(target_value, index_value, expr.span)
            }
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn literal(literal: &Literal) -> Value {
    match literal {
        Literal::Int(n) => Value::int(*n),
        Literal::Float(n) => Value::float(*n),
        Literal::Bool(b) => Value::bool(*b),
        Literal::String(s) => Value::string(s.clone()),
        Literal::None => Value::none(),
    }
}

fn runtime_error(message: impl Into<String>, span: SourceSpan) -> SeeError {
    SeeError::from(Diagnostic::runtime(message).with_span(span))
}

fn with_span(err: SeeError, span: SourceSpan) -> SeeError {
    match err {
        SeeError::Diagnostic(diag) if diag.span.is_none() => {
            SeeError::Diagnostic(diag.with_span(span))
        }
        other => other,
    }
}

fn binary(op: BinaryOp, left: Value, right: Value, span: SourceSpan) -> Result<Value> {
    use BinaryOp::*;
    match op {
        Add => match (left.kind(), right.kind()) {
            (ValueKind::String(a), ValueKind::String(b)) => Ok(Value::string(format!("{a}{b}"))),
            (ValueKind::Array(a), ValueKind::Array(b)) => {
                Ok(Value::array(a.iter().chain(b).cloned().collect()))
            }
            _ => arithmetic(op, &left, &right, span),
        },
        Sub | Mul | Div | Mod | Pow => arithmetic(op, &left, &right, span),
        Equal => Ok(Value::bool(left == right)),
        NotEqual => Ok(Value::bool(left != right)),
        Less | LessEqual | Greater | GreaterEqual => comparison(op, &left, &right, span),
        And | Or => unreachable!("logical operators short-circuit in the evaluator"),
    }
}

fn arithmetic(op: BinaryOp, left: &Value, right: &Value, span: SourceSpan) -> Result<Value> {
    if let (ValueKind::Int(a), ValueKind::Int(b)) = (left.kind(), right.kind()) {
        return integer_arithmetic(op, *a, *b, span);
    }
    let a = number(left, op, span)?;
    let b = number(right, op, span)?;
    let result = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::Mod => a % b,
        BinaryOp::Pow => a.powf(b),
        _ => unreachable!("not an arithmetic operator"),
    };
    Ok(Value::float(result))
}

fn integer_arithmetic(op: BinaryOp, a: i64, b: i64, span: SourceSpan) -> Result<Value> {
    if matches!(op, BinaryOp::Div | BinaryOp::Mod) && b == 0 {
        return Err(runtime_error("division by zero", span));
    }
    let result = match op {
        BinaryOp::Add => a.checked_add(b),
        BinaryOp::Sub => a.checked_sub(b),
        BinaryOp::Mul => a.checked_mul(b),
        // Exact quotients stay integral; everything else becomes a float.
        BinaryOp::Div if a.checked_rem(b).is_some_and(|rem| rem != 0) => {
            return Ok(Value::float(a as f64 / b as f64));
        }
        BinaryOp::Div => a.checked_div(b),
        BinaryOp::Mod => a.checked_rem(b),
        BinaryOp::Pow if b < 0 => return Ok(Value::float((a as f64).powf(b as f64))),
        BinaryOp::Pow => u32::try_from(b).ok().and_then(|exp| a.checked_pow(exp)),
        _ => unreachable!("not an arithmetic operator"),
    };
    result
        .map(Value::int)
        .ok_or_else(|| runtime_error(format!("integer overflow in `{}`", op.symbol()), span))
}

fn comparison(op: BinaryOp, left: &Value, right: &Value, span: SourceSpan) -> Result<Value> {
    let ordering = match (left.kind(), right.kind()) {
        (ValueKind::String(a), ValueKind::String(b)) => a.partial_cmp(b),
        _ => number(left, op, span)?.partial_cmp(&number(right, op, span)?),
    };
    let Some(ordering) = ordering else {
        return Ok(Value::bool(false));
    };
    let result = match op {
        BinaryOp::Less => ordering.is_lt(),
        BinaryOp::LessEqual => ordering.is_le(),
        BinaryOp::Greater => ordering.is_gt(),
        BinaryOp::GreaterEqual => ordering.is_ge(),
        _ => unreachable!("not a comparison operator"),
    };
    Ok(Value::bool(result))
}

fn number(value: &Value, op: BinaryOp, span: SourceSpan) -> Result<f64> {
    match value.kind() {
        ValueKind::Int(n) => Ok(*n as f64),
        ValueKind::Float(n) => Ok(*n),
        _ => Err(runtime_error(
            format!(
                "operator `{}` expects numeric operands, found {}",
                op.symbol(),
                value.type_name()
            ),
            span,
        )),
    }
}

fn unary(op: UnaryOp, value: Value, span: SourceSpan) -> Result<Value> {
    match op {
        UnaryOp::Negate => match value.kind() {
            ValueKind::Int(n) => n
                .checked_neg()
                .map(Value::int)
                .ok_or_else(|| runtime_error("integer overflow in `-`", span)),
            ValueKind::Float(n) => Ok(Value::float(-n)),
            _ => Err(runtime_error(
                format!("unary `-` expects a number, found {}", value.type_name()),
                span,
            )),
        },
        UnaryOp::Not => Ok(Value::bool(!value.is_truthy())),
    }
}

fn index(target: Value, index: Value, span: SourceSpan) -> Result<Value> {
    let idx = match index.kind() {
        ValueKind::Int(n) => *n,
        _ => {
            return Err(runtime_error(
                format!("index must be Int, found {}", index.type_name()),
                span,
            ));
        }
    };
    let out_of_bounds = || runtime_error(format!("index {idx} out of bounds"), span);
    let idx = usize::try_from(idx).map_err(|_| out_of_bounds())?;
    match target.kind() {
        ValueKind::Array(values) => values.get(idx).cloned().ok_or_else(out_of_bounds),
        ValueKind::String(text) => text
            .chars()
            .nth(idx)
            .map(|ch| Value::string(ch.to_string()))
            .ok_or_else(out_of_bounds),
        _ => Err(runtime_error(
            format!("cannot index into {}", target.type_name()),
            span,
        )),
    }
}
