//! Measure formatted output without allocating it.

use std::fmt::{self, Write};

#[derive(Default)]
struct Counter {
    bytes: usize,
    chars: usize,
}

impl Write for Counter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.bytes += s.len();
        self.chars += s.chars().count();
        Ok(())
    }
}

fn count(args: fmt::Arguments<'_>) -> Result<Counter, fmt::Error> {
    let mut counter = Counter::default();
    counter.write_fmt(args)?;
    Ok(counter)
}

/// Length in bytes of the narrow rendering of `args`.
///
/// Fails only if a `Display` implementation inside `args` reports an error.
pub fn formatted_len(args: fmt::Arguments<'_>) -> Result<usize, fmt::Error> {
    Ok(count(args)?.bytes)
}

/// Length in wide characters of the rendering of `args`.
pub fn formatted_wide_len(args: fmt::Arguments<'_>) -> Result<usize, fmt::Error> {
    Ok(count(args)?.chars)
}
