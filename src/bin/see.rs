use std::{ffi::OsString, iter, process::ExitCode};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use seec::Router;

// Options are interpreted in order by the router, so clap only collects
// them. `--help` is handled there as well.
#[derive(Parser)]
#[command(
    name = "see",
    about = "Command line front end for the See expression engine",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Args {
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse_from(escaped(std::env::args_os()));
    let code = Router::new().run(&args.args);
    ExitCode::from(code)
}

// A leading `--` lets clap consume its own end-of-options marker, so one
// typed by the user reaches the router like any other unknown option.
fn escaped(mut args: impl Iterator<Item = OsString>) -> impl Iterator<Item = OsString> {
    let program = args.next();
    program
        .into_iter()
        .chain(iter::once(OsString::from("--")))
        .chain(args)
}

// `RUST_LOG` overrides the default `warn` filter. Logs go to stderr.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
