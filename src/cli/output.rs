//! Handles all user-facing output for the `pb` binary.
//!
//! Status lines are colored when stdout is a terminal. Diagnostics go through
//! [`crate::errors::print_error`] instead.

use std::io::Write;
use std::path::Path;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::ast::{Span, Token};

fn stdout() -> StandardStream {
    let choice = if atty::is(atty::Stream::Stdout) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

fn print_colored(stdout: &mut StandardStream, color: Color, bold: bool, text: &str) {
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(bold));
    let _ = write!(stdout, "{text}");
    let _ = stdout.reset();
}

/// One line per checked file: `ok` or `error`, then the path.
pub fn print_check_status(path: &Path, ok: bool) {
    let mut stdout = stdout();
    if ok {
        print_colored(&mut stdout, Color::Green, true, "ok   ");
    } else {
        print_colored(&mut stdout, Color::Red, true, "error");
    }
    let _ = writeln!(stdout, " {}", path.display());
}

pub fn print_check_summary(passed: usize, failed: usize) {
    let mut stdout = stdout();
    let _ = writeln!(stdout);
    let summary = format!("checked {} files: {passed} ok, {failed} failed", passed + failed);
    let color = if failed == 0 { Color::Green } else { Color::Red };
    print_colored(&mut stdout, color, true, &summary);
    let _ = writeln!(stdout);
}

/// A statement heading followed by its comments, indented.
pub fn print_comments(kind: &str, span: Span, line: usize, comments: &[Token]) {
    let mut stdout = stdout();
    let heading = format!("{kind} @ {line} [{}..{}]", span.start, span.end);
    print_colored(&mut stdout, Color::Yellow, true, &heading);
    let _ = writeln!(stdout);
    for comment in comments {
        for line in comment.text.trim_end().lines() {
            let _ = writeln!(stdout, "    {line}");
        }
    }
}

pub fn print_zigzag(value: i32, encoded: u32) {
    println!("{value}\t{encoded}");
}
