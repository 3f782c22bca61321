//! The tagged element held by a store slot.

use std::fmt;

use xrt_text::{WideStr, WideString};

/// An owned value in a store slot.
///
/// The tag records how the value was inserted, so a string slot can never be
/// read back as a generic payload or the other way round.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Element<T> {
    /// A generic payload from [`IndexedStore::insert`](crate::IndexedStore::insert).
    Value(T),
    /// A narrow string from `str_insert`.
    Str(String),
    /// A wide string from `wstr_insert`.
    Wide(WideString),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Value,
    Str,
    Wide,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            ElementKind::Value => "value",
            ElementKind::Str => "string",
            ElementKind::Wide => "wide string",
        })
    }
}

impl<T> Element<T> {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Value(_) => ElementKind::Value,
            Element::Str(_) => ElementKind::Str,
            Element::Wide(_) => ElementKind::Wide,
        }
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            Element::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Element::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_wide(&self) -> Option<&WideStr> {
        match self {
            Element::Wide(s) => Some(s.as_wide_str()),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Element::Value(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_respect_tag() {
        let value: Element<u8> = Element::Value(7);
        assert_eq!(value.kind(), ElementKind::Value);
        assert_eq!(value.as_value(), Some(&7));
        assert_eq!(value.as_str(), None);
        assert_eq!(value.into_value(), Some(7));

        let s: Element<u8> = Element::Str("abc".to_string());
        assert_eq!(s.as_str(), Some("abc"));
        assert!(s.as_value().is_none());
        assert!(s.as_wide().is_none());
        assert_eq!(s.into_value(), None);

        let w: Element<u8> = Element::Wide(WideString::from("wide"));
        assert_eq!(w.kind().to_string(), "wide string");
        assert_eq!(w.as_wide().map(|s| s.len()), Some(4));
    }
}
