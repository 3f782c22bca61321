//! # xrt-text
//!
//! Text primitives shared by the rest of the workspace:
//! - `WideString` / `WideStr`: strings of wide characters, one `u32` unit per
//!   character (the POSIX `wchar_t` layout)
//! - narrow/wide conversion
//! - character-case transforms that always return a fresh owned copy
//! - formatted-length measuring without allocating
//!
//! # Example
//!
//! ```rust
//! use xrt_text::{narrow_to_wide, wide_to_narrow, case};
//!
//! let wide = narrow_to_wide("Hello");
//! assert_eq!(wide.len(), 5);
//!
//! let upper = case::wide_to_upper(&wide);
//! assert_eq!(wide_to_narrow(&upper).unwrap(), "HELLO");
//! ```

pub mod case;
mod error;
pub mod measure;
mod wide;

pub use error::TextError;
pub use measure::{formatted_len, formatted_wide_len};
pub use wide::{narrow_to_wide, wide_to_narrow, WideStr, WideString};
