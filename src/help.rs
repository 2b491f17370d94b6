pub const HELP: &str = "
See command line front end v.0.1.
  Usage: see [-c] [--help] [-f file] [expr ...] [-i]
  Options:
    --help  Shows this help text
    -c      Uses const parser. Only recognized as first option.
    -f file Parses and evaluates whole file as a single program.
            Lines starting with a backslash split the file into
            separately evaluated programs.
    -i      Enters interactive mode. Any following arguments are ignored.
  Arguments:
    expr    Expressions that will be parsed and evaluated one by one.
            All evaluations are evaluated within the same context.

While in interactive mode, an empty input line shows the current context,
`dump <name>` shows a variable in detail and `help` or `?` shows this text.
";

pub fn print_help() {
    println!("{HELP}");
}
