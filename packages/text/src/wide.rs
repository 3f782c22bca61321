//! Wide-character strings.
//!
//! A wide string is a sequence of `u32` units, one per character. Units are
//! not required to be valid Unicode scalar values: data coming from a C
//! runtime may carry surrogates or out-of-range values, and those survive
//! until a strict conversion to a narrow `String` is requested.

use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

use crate::TextError;

/// Borrowed wide string, the `str` to [`WideString`]'s `String`.
#[repr(transparent)]
#[derive(PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WideStr {
    units: [u32],
}

impl WideStr {
    /// View a unit slice as a wide string.
    pub fn from_units(units: &[u32]) -> &WideStr {
        // SAFETY: WideStr is repr(transparent) over [u32], so the pointer cast
        // preserves layout and the slice metadata.
        unsafe { &*(units as *const [u32] as *const WideStr) }
    }

    /// The raw units.
    pub fn as_units(&self) -> &[u32] {
        &self.units
    }

    /// Number of wide characters.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Decode each unit, reporting the first invalid one.
    pub fn chars(&self) -> impl Iterator<Item = Result<char, TextError>> + '_ {
        self.units
            .iter()
            .enumerate()
            .map(|(position, &unit)| {
                char::from_u32(unit).ok_or(TextError::Unrepresentable { unit, position })
            })
    }

    /// Decode each unit, substituting U+FFFD for invalid ones.
    pub fn chars_lossy(&self) -> impl Iterator<Item = char> + '_ {
        self.units
            .iter()
            .map(|&unit| char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    /// Strict conversion to a narrow string.
    pub fn try_to_string(&self) -> Result<String, TextError> {
        self.chars().collect()
    }

    pub fn to_string_lossy(&self) -> String {
        self.chars_lossy().collect()
    }
}

impl ToOwned for WideStr {
    type Owned = WideString;

    fn to_owned(&self) -> WideString {
        WideString {
            units: self.units.to_vec(),
        }
    }
}

impl fmt::Display for WideStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.chars_lossy() {
            fmt::Write::write_char(f, c)?;
        }
        Ok(())
    }
}

impl fmt::Debug for WideStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{:?}", self.to_string_lossy())
    }
}

impl AsRef<WideStr> for WideStr {
    fn as_ref(&self) -> &WideStr {
        self
    }
}

/// Owned wide string.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WideString {
    units: Vec<u32>,
}

impl WideString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of raw units without validating them.
    pub fn from_units(units: Vec<u32>) -> Self {
        Self { units }
    }

    pub fn from_chars<I: IntoIterator<Item = char>>(chars: I) -> Self {
        chars.into_iter().collect()
    }

    pub fn push(&mut self, c: char) {
        self.units.push(c as u32);
    }

    pub fn push_str(&mut self, s: &str) {
        self.units.extend(s.chars().map(|c| c as u32));
    }

    pub fn as_wide_str(&self) -> &WideStr {
        WideStr::from_units(&self.units)
    }

    pub fn into_units(self) -> Vec<u32> {
        self.units
    }
}

impl Deref for WideString {
    type Target = WideStr;

    fn deref(&self) -> &WideStr {
        self.as_wide_str()
    }
}

impl Borrow<WideStr> for WideString {
    fn borrow(&self) -> &WideStr {
        self.as_wide_str()
    }
}

impl AsRef<WideStr> for WideString {
    fn as_ref(&self) -> &WideStr {
        self.as_wide_str()
    }
}

impl FromIterator<char> for WideString {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self {
            units: iter.into_iter().map(|c| c as u32).collect(),
        }
    }
}

impl From<&str> for WideString {
    fn from(s: &str) -> Self {
        narrow_to_wide(s)
    }
}

impl From<String> for WideString {
    fn from(s: String) -> Self {
        narrow_to_wide(&s)
    }
}

impl From<&WideStr> for WideString {
    fn from(s: &WideStr) -> Self {
        s.to_owned()
    }
}

impl PartialEq<WideStr> for WideString {
    fn eq(&self, other: &WideStr) -> bool {
        self.as_wide_str() == other
    }
}

impl PartialEq<&str> for WideString {
    fn eq(&self, other: &&str) -> bool {
        self.units.iter().copied().eq(other.chars().map(|c| c as u32))
    }
}

impl fmt::Display for WideString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_wide_str(), f)
    }
}

impl fmt::Debug for WideString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_wide_str(), f)
    }
}

/// Widen a narrow string, one unit per character.
pub fn narrow_to_wide(s: &str) -> WideString {
    s.chars().collect()
}

/// Narrow a wide string, failing on the first unit that is not a character.
pub fn wide_to_narrow(s: &WideStr) -> Result<String, TextError> {
    s.try_to_string()
}
