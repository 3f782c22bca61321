//! Formatted-string builders.
//!
//! Each builder measures the text first and then writes it into a buffer of
//! exactly that size. [`cformat!`](crate::cformat) and
//! [`wformat!`](crate::wformat) wrap the narrow and wide builders.

use std::fmt::{self, Write as _};

use xrt_text::{formatted_len, wide_to_narrow, WideStr, WideString};

use crate::error::{Result, SysError};

/// Render `args` into a freshly allocated string.
pub fn format_string(args: fmt::Arguments<'_>) -> Result<String> {
    let len = formatted_len(args)?;
    let mut out = String::with_capacity(len);
    out.write_fmt(args)?;
    Ok(out)
}

/// Render `args` and widen the result.
pub fn format_wide(args: fmt::Arguments<'_>) -> Result<WideString> {
    format_string(args).map(WideString::from)
}

/// Narrow an already formatted wide string, failing on unrepresentable units.
pub fn format_wide_to_narrow(s: &WideStr) -> Result<String> {
    Ok(wide_to_narrow(s)?)
}

/// Render `args` into at most `limit` bytes, terminator included.
///
/// Text that would have been truncated is an error rather than being cut.
pub fn format_bounded(limit: usize, args: fmt::Arguments<'_>) -> Result<String> {
    if limit == 0 {
        return Err(SysError::invalid("bounded format with a zero limit"));
    }
    let needed = formatted_len(args)?;
    if needed >= limit {
        return Err(SysError::Truncated { needed, limit });
    }
    format_string(args)
}

/// `format!` that reports formatting errors instead of panicking.
#[macro_export]
macro_rules! cformat {
    ($($arg:tt)*) => {
        $crate::format::format_string(::std::format_args!($($arg)*))
    };
}

/// [`cformat!`] producing a [`WideString`](xrt_text::WideString).
#[macro_export]
macro_rules! wformat {
    ($($arg:tt)*) => {
        $crate::format::format_wide(::std::format_args!($($arg)*))
    };
}
