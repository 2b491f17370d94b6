use std::io::{self, IsTerminal, Write};

use rustyline::{DefaultEditor, error::ReadlineError};
use tracing::{debug, warn};

use crate::{
    help,
    processor::{self, Outcome},
    session::{self, Session},
};

pub const PROMPT: &str = "see >";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    Help,
    Dump(&'a str),
    Describe,
    Statement(&'a str),
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Self {
        if line == "help" || line == "?" {
            Command::Help
        } else if let Some(rest) = line.strip_prefix("dump") {
            Command::Dump(rest.trim())
        } else if line.is_empty() {
            Command::Describe
        } else {
            Command::Statement(line)
        }
    }
}

pub fn dump_text(session: &Session, name: &str) -> String {
    match session.get(name) {
        None => format!("{name} is not defined."),
        Some(value) => match value.dump() {
            Some(dumped) => format!("{name} is {dumped}"),
            None => format!("{name} is {value}"),
        },
    }
}

pub struct Repl<'s> {
    session: &'s mut Session,
    failures: usize,
}

impl<'s> Repl<'s> {
    pub fn new(session: &'s mut Session) -> Self {
        Self {
            session,
            failures: 0,
        }
    }

    pub fn run(&mut self) {
        print_banner();
        let mut editor = match DefaultEditor::new() {
            Ok(editor) => editor,
            Err(err) => {
                warn!(%err, "line editor unavailable, leaving interactive mode");
                return;
            }
        };
        // rustyline only draws the prompt on a terminal.
        let piped = !io::stdin().is_terminal();
        loop {
            if piped {
                print!("{PROMPT}");
                io::stdout().flush().ok();
            }
            match editor.readline(PROMPT) {
                Ok(line) => {
                    if !line.is_empty() {
                        editor.add_history_entry(line.as_str()).ok();
                    }
                    self.execute(Command::parse(&line));
                }
                Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => break,
                Err(err) => {
                    debug!(%err, "input failed, leaving interactive mode");
                    break;
                }
            }
        }
        debug!(failures = self.failures, "interactive session finished");
    }

    pub fn execute(&mut self, command: Command<'_>) {
        match command {
            Command::Help => help::print_help(),
            Command::Dump(name) => println!("{}", dump_text(self.session, name)),
            Command::Describe => println!("Current scope: {}", self.session),
            Command::Statement(text) => {
                if processor::process(self.session, text) == Outcome::Failed {
                    self.failures += 1;
                }
            }
        }
    }
}

fn print_banner() {
    println!("Interactive See Console v.1.0");
    println!("using See v.{}", session::version());
    println!("Press <Ctrl-C> or <Ctrl-D> to exit.");
    println!();
}
