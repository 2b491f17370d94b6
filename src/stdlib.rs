use std::f64::consts;

use crate::{
    diagnostics::{Diagnostic, Result, SeeError},
    environment::Environment,
    value::{Builtin, Value, ValueKind},
};

pub fn install(env: &mut Environment) {
    env.define_builtin("pi", Value::float(consts::PI));
    env.define_builtin("e", Value::float(consts::E));

    env.define_builtin("abs", builtin("abs", Some(1), math_abs));
    env.define_builtin("sqrt", builtin("sqrt", Some(1), math_sqrt));
    env.define_builtin("floor", builtin("floor", Some(1), math_floor));
    env.define_builtin("ceil", builtin("ceil", Some(1), math_ceil));
    env.define_builtin("round", builtin("round", Some(1), math_round));
    env.define_builtin("pow", builtin("pow", Some(2), math_pow));
    env.define_builtin("min", builtin("min", None, math_min));
    env.define_builtin("max", builtin("max", None, math_max));
    env.define_builtin("len", builtin("len", Some(1), collections_len));
    env.define_builtin("str", builtin("str", Some(1), string_str));
}

fn builtin(
    name: &'static str,
    arity: Option<usize>,
    callback: fn(&[Value]) -> Result<Value>,
) -> Value {
    Value::new(ValueKind::Builtin(Builtin {
        name,
        arity,
        callback,
    }))
}

fn expect_number(value: &Value, name: &str) -> Result<f64> {
    match value.kind() {
        ValueKind::Int(n) => Ok(*n as f64),
        ValueKind::Float(n) => Ok(*n),
        _ => Err(SeeError::from(Diagnostic::runtime(format!(
            "`{name}` expects a number, found {}",
            value.type_name()
        )))),
    }
}

fn math_abs(args: &[Value]) -> Result<Value> {
    match args[0].kind() {
        ValueKind::Int(n) => n
            .checked_abs()
            .map(Value::int)
            .ok_or_else(|| SeeError::from(Diagnostic::runtime("integer overflow in `abs`"))),
        _ => Ok(Value::float(expect_number(&args[0], "abs")?.abs())),
    }
}

fn math_sqrt(args: &[Value]) -> Result<Value> {
    let number = expect_number(&args[0], "sqrt")?;
    if number < 0.0 {
        return Err(SeeError::from(Diagnostic::runtime(
            "`sqrt` expects non-negative input",
        )));
    }
    Ok(Value::float(number.sqrt()))
}

fn rounded(args: &[Value], name: &str, op: fn(f64) -> f64) -> Result<Value> {
    if args[0].is_int() {
        return Ok(args[0].clone());
    }
    let result = op(expect_number(&args[0], name)?);
    if result.is_finite() && result.abs() < i64::MAX as f64 {
        Ok(Value::int(result as i64))
    } else {
        Ok(Value::float(result))
    }
}

fn math_floor(args: &[Value]) -> Result<Value> {
    rounded(args, "floor", f64::floor)
}

fn math_ceil(args: &[Value]) -> Result<Value> {
    rounded(args, "ceil", f64::ceil)
}

fn math_round(args: &[Value]) -> Result<Value> {
    rounded(args, "round", f64::round)
}

fn math_pow(args: &[Value]) -> Result<Value> {
    let base = expect_number(&args[0], "pow")?;
    let exponent = expect_number(&args[1], "pow")?;
    Ok(Value::float(base.powf(exponent)))
}

fn extremum(args: &[Value], name: &str, prefer: fn(f64, f64) -> bool) -> Result<Value> {
    let Some(first) = args.first() else {
        return Err(SeeError::from(Diagnostic::runtime(format!(
            "`{name}` expects at least one argument"
        ))));
    };
    let mut best = first;
    let mut best_number = expect_number(first, name)?;
    for arg in &args[1..] {
        let number = expect_number(arg, name)?;
        if prefer(number, best_number) {
            best = arg;
            best_number = number;
        }
    }
    Ok(best.clone())
}

fn math_min(args: &[Value]) -> Result<Value> {
    extremum(args, "min", |a, b| a < b)
}

fn math_max(args: &[Value]) -> Result<Value> {
    extremum(args, "max", |a, b| a > b)
}

fn collections_len(args: &[Value]) -> Result<Value> {
    let len = match args[0].kind() {
        ValueKind::String(s) => s.chars().count(),
        ValueKind::Array(values) => values.len(),
        _ => {
            return Err(SeeError::from(Diagnostic::runtime(format!(
                "`len` expects a String or Array, found {}",
                args[0].type_name()
            ))));
        }
    };
    Ok(Value::int(len as i64))
}

fn string_str(args: &[Value]) -> Result<Value> {
    Ok(Value::string(args[0].to_string()))
}
