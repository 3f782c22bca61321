//! Character-case transforms.
//!
//! Every function returns a fresh owned copy; the input is never modified.
//! Mapping is per character: a character whose case mapping expands to more
//! than one character (`ß` uppercases to `SS`) is left as it is, so the
//! output always has the same number of characters as the input.

use crate::{WideStr, WideString};

fn simple_lower(c: char) -> char {
    let mut mapped = c.to_lowercase();
    match (mapped.next(), mapped.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

fn simple_upper(c: char) -> char {
    let mut mapped = c.to_uppercase();
    match (mapped.next(), mapped.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

fn map_wide(s: &WideStr, f: impl Fn(char) -> char) -> WideString {
    WideString::from_units(
        s.as_units()
            .iter()
            .map(|&unit| char::from_u32(unit).map_or(unit, |c| f(c) as u32))
            .collect(),
    )
}

pub fn to_lower(s: &str) -> String {
    s.chars().map(simple_lower).collect()
}

pub fn to_upper(s: &str) -> String {
    s.chars().map(simple_upper).collect()
}

/// Replace every character above U+00FF with `?`, keeping the Latin-1 range.
pub fn to_ascii(s: &str) -> String {
    s.chars()
        .map(|c| if u32::from(c) <= 0xFF { c } else { '?' })
        .collect()
}

/// Lowercase a wide string. Units that are not characters pass through.
pub fn wide_to_lower(s: &WideStr) -> WideString {
    map_wide(s, simple_lower)
}

/// Uppercase a wide string. Units that are not characters pass through.
pub fn wide_to_upper(s: &WideStr) -> WideString {
    map_wide(s, simple_upper)
}

/// Replace every unit above `0xFF` with `?`, keeping the Latin-1 range.
pub fn wide_to_ascii(s: &WideStr) -> WideString {
    WideString::from_units(
        s.as_units()
            .iter()
            .map(|&unit| if unit <= 0xFF { unit } else { '?' as u32 })
            .collect(),
    )
}
