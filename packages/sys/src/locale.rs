//! Locale selection with a UTF-8 fallback chain.
//!
//! Every selection tries, in order: the requested name (when given and not
//! empty), each entry of [`UTF8_ALIASES`], the platform default `""`, and
//! finally `"C"`. The first name the C runtime accepts wins.
//!
//! `setlocale` mutates process-wide state and its result pointer is only valid
//! until the next call, so all calls here go through one lock.

use std::ffi::{CStr, CString};
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, PoisonError};

use tracing::{debug, trace};
use xrt_text::{WideStr, WideString};

use crate::error::{Result, SysError};

pub const UTF8_ALIASES: [&str; 7] = [
    "C.UTF-8",
    "en_US.UTF-8",
    "UTF-8",
    ".UTF8",
    ".utf8",
    "utf-8",
    ".65001",
];

static LOCALE_LOCK: Mutex<()> = Mutex::new(());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    All,
    Collate,
    CType,
    Monetary,
    Numeric,
    Time,
    Messages,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::All,
        Category::Collate,
        Category::CType,
        Category::Monetary,
        Category::Numeric,
        Category::Time,
        Category::Messages,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::All => "LC_ALL",
            Category::Collate => "LC_COLLATE",
            Category::CType => "LC_CTYPE",
            Category::Monetary => "LC_MONETARY",
            Category::Numeric => "LC_NUMERIC",
            Category::Time => "LC_TIME",
            Category::Messages => "LC_MESSAGES",
        }
    }

    /// The `LC_*` constant for `setlocale`.
    pub fn as_raw(self) -> libc::c_int {
        match self {
            Category::All => libc::LC_ALL,
            Category::Collate => libc::LC_COLLATE,
            Category::CType => libc::LC_CTYPE,
            Category::Monetary => libc::LC_MONETARY,
            Category::Numeric => libc::LC_NUMERIC,
            Category::Time => libc::LC_TIME,
            Category::Messages => libc::LC_MESSAGES,
        }
    }

    /// The `LC_*_MASK` constant for `newlocale`.
    pub fn mask(self) -> libc::c_int {
        match self {
            Category::All => libc::LC_ALL_MASK,
            Category::Collate => libc::LC_COLLATE_MASK,
            Category::CType => libc::LC_CTYPE_MASK,
            Category::Monetary => libc::LC_MONETARY_MASK,
            Category::Numeric => libc::LC_NUMERIC_MASK,
            Category::Time => libc::LC_TIME_MASK,
            Category::Messages => libc::LC_MESSAGES_MASK,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = SysError;

    /// Accepts `all`, `ctype`, `LC_TIME` and the like, in any case.
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();
        let bare = lower.strip_prefix("lc_").unwrap_or(&lower);
        Category::ALL
            .into_iter()
            .find(|c| c.name()[3..].eq_ignore_ascii_case(bare))
            .ok_or_else(|| SysError::invalid(format!("unknown locale category {s:?}")))
    }
}

/// Names to try for `requested`, in order.
fn candidates(requested: Option<&str>) -> impl Iterator<Item = &str> {
    requested
        .filter(|name| !name.is_empty())
        .into_iter()
        .chain(UTF8_ALIASES)
        .chain(["", "C"])
}

/// Call `setlocale`. Must run under `LOCALE_LOCK`.
fn setlocale_raw(category: Category, name: Option<&CStr>) -> Option<String> {
    let ptr = name.map_or(std::ptr::null(), CStr::as_ptr);
    // SAFETY: `ptr` is null or a valid NUL-terminated string that outlives
    // the call.
    let ret = unsafe { libc::setlocale(category.as_raw(), ptr) };
    if ret.is_null() {
        return None;
    }
    // SAFETY: a non-null result is a NUL-terminated string that stays valid
    // until the next setlocale call, which the caller's lock excludes.
    Some(unsafe { CStr::from_ptr(ret) }.to_string_lossy().into_owned())
}

/// Select a locale for `category`, falling back as described in the module
/// docs. Returns the name the C runtime reports for the selected locale.
pub fn set_locale(category: Category, requested: Option<&str>) -> Result<String> {
    let _lock = LOCALE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    for name in candidates(requested) {
        let Ok(c_name) = CString::new(name) else {
            trace!(name, "skipping locale name with interior NUL");
            continue;
        };
        match setlocale_raw(category, Some(c_name.as_c_str())) {
            Some(active) => {
                debug!(%category, ?requested, tried = name, %active, "selected locale");
                return Ok(active);
            }
            None => trace!(%category, name, "locale rejected"),
        }
    }
    Err(SysError::Locale {
        category,
        requested: requested.map(str::to_owned),
    })
}

/// Wide-string form of [`set_locale`]. A requested name that cannot be
/// converted to a narrow string is skipped in favor of the fallbacks.
pub fn set_locale_wide(category: Category, requested: Option<&WideStr>) -> Result<WideString> {
    let narrow = requested.and_then(|name| match name.try_to_string() {
        Ok(name) => Some(name),
        Err(err) => {
            debug!(%err, "requested locale name is not representable, using fallbacks");
            None
        }
    });
    set_locale(category, narrow.as_deref()).map(WideString::from)
}

/// The locale currently selected for `category`.
pub fn current_locale(category: Category) -> Result<String> {
    let _lock = LOCALE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    setlocale_raw(category, None).ok_or(SysError::Locale {
        category,
        requested: None,
    })
}

/// Put every category into a UTF-8 locale.
pub fn init_console_utf8() -> Result<String> {
    set_locale(Category::All, Some(UTF8_ALIASES[0]))
}

/// An owned `newlocale` handle, freed on drop.
///
/// Unlike [`set_locale`] this leaves the process locale alone; the handle is
/// for the `*_l` family of C functions.
#[derive(Debug)]
pub struct Locale {
    raw: libc::locale_t,
    category: Category,
    name: String,
}

impl Locale {
    pub fn new(category: Category, requested: Option<&str>) -> Result<Self> {
        for name in candidates(requested) {
            let Ok(c_name) = CString::new(name) else {
                continue;
            };
            // SAFETY: `c_name` is NUL-terminated and a null base asks for a
            // fresh object.
            let raw = unsafe {
                libc::newlocale(category.mask(), c_name.as_ptr(), std::ptr::null_mut())
            };
            if !raw.is_null() {
                debug!(%category, name, "created locale object");
                return Ok(Locale {
                    raw,
                    category,
                    name: name.to_string(),
                });
            }
            trace!(%category, name, "newlocale rejected name");
        }
        Err(SysError::Locale {
            category,
            requested: requested.map(str::to_owned),
        })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// The candidate name that was accepted. Empty means the platform default.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn as_raw(&self) -> libc::locale_t {
        self.raw
    }
}

impl Drop for Locale {
    fn drop(&mut self) {
        // SAFETY: `raw` came from a successful newlocale and is freed once.
        unsafe { libc::freelocale(self.raw) };
    }
}
