//! Console front end for the See expression engine.
//!
//! The engine (`lexer`, `parser`, `runtime`, behind the [`Session`] facade)
//! evaluates statements; the driver modules decide which statements to run
//! and how to report them: [`router`] for the command line, [`segmenter`]
//! for files, [`repl`] for interactive use and [`processor`] for a single
//! statement.

pub mod ast;
pub mod diagnostics;
pub mod environment;
pub mod help;
pub mod lexer;
pub mod parser;
pub mod processor;
pub mod repl;
pub mod router;
pub mod runtime;
pub mod segmenter;
pub mod session;
pub mod stdlib;
pub mod value;

pub use diagnostics::{Diagnostic, DiagnosticKind, SeeError, SourceSpan};
pub use processor::Outcome;
pub use repl::Repl;
pub use router::{Router, Step};
pub use session::{Session, Variant, version};
