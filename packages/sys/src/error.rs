use std::fmt;
use std::io;

use xrt_text::TextError;

use crate::locale::Category;

#[derive(thiserror::Error, Debug)]
pub enum SysError {
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error("no usable locale for {category} (requested {requested:?})")]
    Locale {
        category: Category,
        requested: Option<String>,
    },

    #[error("formatting failed")]
    Format(#[from] fmt::Error),

    #[error("invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("formatted text needs {needed} bytes plus terminator, limit is {limit}")]
    Truncated { needed: usize, limit: usize },

    #[error("command needs {needed} bytes plus terminator, limit is {limit}")]
    CommandTooLong { needed: usize, limit: usize },

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Encoding(#[from] TextError),
}

impl SysError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        SysError::Io {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        SysError::InvalidInput {
            message: message.into(),
        }
    }

    /// The underlying OS error, if there is one.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            SysError::Io { source, .. } | SysError::Spawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SysError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_display_has_context() {
        let e = SysError::io("reading /nope", io::Error::from(io::ErrorKind::NotFound));
        let display = e.to_string();
        assert!(display.starts_with("reading /nope: "));
        assert_eq!(e.io_error().map(io::Error::kind), Some(io::ErrorKind::NotFound));
    }

    #[test]
    fn test_text_error_converts() {
        let e: SysError = TextError::Unrepresentable {
            unit: 0xD800,
            position: 2,
        }
        .into();
        assert!(matches!(e, SysError::Encoding(_)));
        assert!(e.io_error().is_none());
    }

    #[test]
    fn test_truncated_names_format_not_command() {
        let e = SysError::Truncated {
            needed: 10,
            limit: 4,
        };
        assert!(e.to_string().starts_with("formatted text"));
        assert!(!e.to_string().contains("command"));
    }

    #[test]
    fn test_command_too_long_display() {
        let e = SysError::CommandTooLong {
            needed: 12,
            limit: 8,
        };
        assert!(e.to_string().contains("12"));
        assert!(e.to_string().contains("8"));
    }
}
