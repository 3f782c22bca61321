//! `perror`-style reporting to stderr.

use std::fmt;
use std::io::{self, Write};

use crate::format::format_string;

/// `"<msg>: <error>"`, or just the error when `msg` is empty.
pub fn describe_error(msg: &str, error: &io::Error) -> String {
    if msg.is_empty() {
        error.to_string()
    } else {
        format!("{msg}: {error}")
    }
}

/// Write the formatted message and `error` to stderr.
///
/// Reporting is best effort: a message that fails to format is dropped and
/// the bare error is printed.
pub fn report(args: fmt::Arguments<'_>, error: &io::Error) {
    let msg = format_string(args).unwrap_or_default();
    let line = describe_error(&msg, error);
    let _ = writeln!(io::stderr().lock(), "{line}");
}

/// Report the last OS error, like `perror`.
pub fn report_last_os_error(args: fmt::Arguments<'_>) {
    report(args, &io::Error::last_os_error());
}
