use tracing::debug;

use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failed,
}

impl Outcome {
    pub fn is_failure(self) -> bool {
        self == Outcome::Failed
    }
}

/// Parses `text`, echoes the parsed form, evaluates it and prints the result.
///
/// Failures are reported on stderr and returned as [`Outcome::Failed`]; they
/// never abort the caller.
pub fn process(session: &mut Session, text: &str) -> Outcome {
    let node = match session.parse(text) {
        Ok(node) => node,
        Err(err) => {
            eprintln!("Failed to parse '{text}': {err}");
            return Outcome::Failed;
        }
    };

    println!("Parsed Node: {node}");

    match session.eval(&node) {
        Ok(result) => {
            println!("Result: {result}");
            Outcome::Success
        }
        Err(err) => {
            debug!(statement = text, "evaluation failed");
            eprintln!("Failed to evaluate '{text}': {err}");
            Outcome::Failed
        }
    }
}

pub fn evaluate_expression(session: &mut Session, text: &str) -> Outcome {
    match session.eval_source(text) {
        Ok(result) => {
            println!("{result}");
            Outcome::Success
        }
        Err(err) => {
            eprintln!("Failed to evaluate expression: {err}");
            Outcome::Failed
        }
    }
}
