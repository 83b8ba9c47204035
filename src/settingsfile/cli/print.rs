use console::style;
use std::io::{self, Write};

const NO_NEWLINE_MARKER: &str = "(no newline at end)";

pub(super) fn print_raw(bytes: &[u8]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(bytes)?;
    out.flush()
}

/// One numbered line. `line` still carries its `'\n'` when it had one.
pub(super) fn print_line(number: usize, line: &[u8]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    let text = String::from_utf8_lossy(line);
    let body = text.strip_suffix('\n').unwrap_or(text.as_ref());
    write!(out, "{} {}", style(format!("{:>4}", number)).dim(), body)?;
    if !line.ends_with(b"\n") {
        write!(out, " {}", style(NO_NEWLINE_MARKER).yellow())?;
    }
    writeln!(out)
}

pub(super) fn print_success(message: &str) {
    println!("{}", style(message).green());
}

pub(super) fn print_info(message: &str) {
    println!("{}", style(message).dim());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), message);
}
