use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use tracing::{debug, trace};

use crate::{
    diagnostics::{Result, SeeError},
    processor::{self, Outcome},
    session::Session,
};

/// Splits `reader` into statements, handing each to `on_segment` as soon as
/// it is complete.
///
/// A line starting with `\` closes the pending statement and is itself
/// dropped. Every line kept is terminated with `\n`. The pending statement is
/// flushed once more at end of input, even when empty, so there is always
/// exactly one more segment than there are separator lines. Bytes that are
/// not UTF-8 are replaced rather than treated as a read error.
pub fn segment_lines<R, F>(mut reader: R, mut on_segment: F) -> io::Result<()>
where
    R: BufRead,
    F: FnMut(String),
{
    let mut pending = String::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        let line = String::from_utf8_lossy(&buf);
        if line.starts_with('\\') {
            trace!(separator = %line, "segment boundary");
            on_segment(std::mem::take(&mut pending));
        } else {
            pending.push_str(&line);
            pending.push('\n');
        }
    }
    on_segment(pending);
    Ok(())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileReport {
    pub statements: usize,
    pub failures: usize,
}

/// Failing statements are only counted. An unreadable file is an error.
pub fn run_file(session: &mut Session, path: &Path) -> Result<FileReport> {
    if !path.is_file() {
        return Err(SeeError::FileNotFound(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|err| {
        debug!(path = %path.display(), %err, "cannot open file");
        SeeError::FileNotFound(path.to_path_buf())
    })?;

    let mut report = FileReport::default();
    segment_lines(BufReader::new(file), |statement| {
        report.statements += 1;
        if processor::process(session, &statement) == Outcome::Failed {
            report.failures += 1;
        }
    })?;
    debug!(
        path = %path.display(),
        statements = report.statements,
        failures = report.failures,
        "file processed"
    );
    Ok(report)
}
