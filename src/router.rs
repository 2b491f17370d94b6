use std::path::Path;

use tracing::{debug, info};

use crate::{
    help,
    processor::{self, Outcome},
    repl::Repl,
    segmenter,
    session::Session,
};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_IO_ERROR: u8 = 1;
pub const EXIT_EVAL_ERROR: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Exit(u8),
}

pub struct Router {
    session: Session,
    failures: usize,
}

impl Router {
    pub fn new() -> Self {
        Self {
            session: Session::create_default(),
            failures: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn failures(&self) -> usize {
        self.failures
    }

    /// No arguments at all means interactive mode.
    pub fn run(&mut self, args: &[String]) -> u8 {
        if args.is_empty() {
            return self.interactive();
        }

        let mut position = 0;
        while position < args.len() {
            let arg = args[position].as_str();
            let step = match (arg, args.get(position + 1)) {
                ("-f", Some(path)) => {
                    position += 1;
                    self.file(Path::new(path))
                }
                _ => self.argument(position, arg),
            };
            if let Step::Exit(code) = step {
                return code;
            }
            position += 1;
        }

        if self.failures > 0 {
            debug!(failures = self.failures, "batch finished with failures");
            EXIT_EVAL_ERROR
        } else {
            EXIT_SUCCESS
        }
    }

    fn argument(&mut self, position: usize, arg: &str) -> Step {
        match arg {
            "--help" => {
                help::print_help();
                Step::Continue
            }
            "-c" => {
                if position == 0 {
                    info!("using the const engine");
                    self.session = Session::create_const();
                } else {
                    debug!(position, "`-c` is only honored as the first argument");
                }
                Step::Continue
            }
            "-i" => Step::Exit(self.interactive()),
            option if option.starts_with('-') => {
                eprintln!("Unknown option: {option}");
                Step::Continue
            }
            expression => {
                let outcome = processor::evaluate_expression(&mut self.session, expression);
                self.record(outcome);
                Step::Continue
            }
        }
    }

    fn file(&mut self, path: &Path) -> Step {
        match segmenter::run_file(&mut self.session, path) {
            Ok(report) => {
                self.failures += report.failures;
                Step::Continue
            }
            Err(err) => {
                eprintln!("{err}");
                Step::Exit(EXIT_IO_ERROR)
            }
        }
    }

    // Interactive failures never reach the exit code.
    fn interactive(&mut self) -> u8 {
        Repl::new(&mut self.session).run();
        EXIT_SUCCESS
    }

    fn record(&mut self, outcome: Outcome) {
        if outcome.is_failure() {
            self.failures += 1;
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
