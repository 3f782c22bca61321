//! Build-time choice between enforcing and trusting internal invariants.
//!
//! By default a violated invariant is logged and the process aborts. With the
//! `trust-invariants` feature the check is a `debug_assert!` and the condition
//! is handed to the optimizer as an assumption, so a violation in a release
//! build is undefined behavior.

/// How this build treats invariant violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantMode {
    /// Abort the process on violation.
    Enforce,
    /// Assume invariants hold.
    Trust,
}

pub const INVARIANT_MODE: InvariantMode = if cfg!(feature = "trust-invariants") {
    InvariantMode::Trust
} else {
    InvariantMode::Enforce
};

#[cfg(not(feature = "trust-invariants"))]
macro_rules! assume {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            tracing::error!($($arg)+);
            std::process::abort();
        }
    };
}

#[cfg(feature = "trust-invariants")]
macro_rules! assume {
    ($cond:expr, $($arg:tt)+) => {{
        let holds: bool = $cond;
        debug_assert!(holds, $($arg)+);
        // SAFETY: this build opted into trusting store invariants; a false
        // condition here is a bug in the store itself.
        unsafe { std::hint::assert_unchecked(holds) }
    }};
}

pub(crate) use assume;
