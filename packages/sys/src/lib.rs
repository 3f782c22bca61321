//! # xrt-sys
//!
//! Portable OS primitives. Each one is a thin, fallible wrapper that returns
//! owned buffers, ready to be handed to an `xrt_store::IndexedStore`.
//!
//! ## Modules
//!
//! ```text
//! locale/     # setlocale/newlocale with a UTF-8 fallback chain
//! format/     # measured string builders, cformat!/wformat!
//! io/         # whole-stream and whole-descriptor reads, wide-path open/remove
//! process/    # shell commands with exit-code mapping
//! search/     # directory search by exact name or regex
//! random/     # bounded random bytes
//! report/     # perror-style reporting
//! ```
//!
//! Only Unix targets are supported: the descriptor and locale functions go
//! straight to libc.
//!
//! ## Example
//!
//! ```rust
//! use std::io::Cursor;
//! use xrt_sys::{cformat, io::read_stream};
//!
//! let greeting = cformat!("{}, {}!", "Hello", "world").unwrap();
//! let mut stream = Cursor::new(greeting.into_bytes());
//! let bytes = read_stream(&mut stream).unwrap();
//! assert_eq!(&bytes[..], b"Hello, world!");
//! ```

mod error;
pub mod format;
pub mod io;
pub mod locale;
pub mod process;
pub mod random;
pub mod report;
pub mod search;

pub use error::{Result, SysError};
pub use locale::{set_locale, Category, Locale, UTF8_ALIASES};
pub use process::run_shell;
pub use search::{search_dir, SearchMode};
