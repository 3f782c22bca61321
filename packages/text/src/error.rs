//! Error types for text conversion.

/// Errors raised when text cannot be converted between representations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TextError {
    /// A wide unit is not a Unicode scalar value, so it has no narrow form.
    #[error("wide unit 0x{unit:X} at position {position} is not a valid character")]
    Unrepresentable { unit: u32, position: usize },
}
