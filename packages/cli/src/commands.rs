use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use bytes::Bytes;
use tracing::{info, warn};
use xrt_store::{ElementKind, IndexedStore, StoreConfig, StoreGuard};
use xrt_sys::io::read_stream;
use xrt_sys::locale::{set_locale, Category};
use xrt_sys::search::{search_dir, SearchMode};
use xrt_sys::SysError;
use xrt_text::{case as text_case, formatted_len, formatted_wide_len, WideString};

use crate::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseMode {
    Lower,
    Upper,
    Ascii,
}

pub(crate) fn locale(out: &mut impl Write, name: Option<&str>, category: &str) -> Result<(), CliError> {
    let category: Category = category.parse()?;
    let active = set_locale(category, name)?;
    writeln!(out, "{category}: {active}")?;
    Ok(())
}

pub(crate) fn format_len(out: &mut impl Write, text: &str) -> Result<(), CliError> {
    let bytes = formatted_len(format_args!("{text}")).map_err(SysError::from)?;
    let chars = formatted_wide_len(format_args!("{text}")).map_err(SysError::from)?;
    writeln!(out, "bytes: {bytes}")?;
    writeln!(out, "chars: {chars}")?;
    Ok(())
}

pub(crate) fn cat(out: &mut impl Write, path: &Path) -> Result<(), CliError> {
    let mut file = File::open(path)
        .map_err(|e| SysError::Io {
            context: format!("opening {}", path.display()),
            source: e,
        })?;
    let data = read_stream(&mut file)?;
    out.write_all(&data)?;
    Ok(())
}

pub(crate) fn run(command: &str) -> Result<i32, CliError> {
    let code = xrt_sys::run_shell(command)?;
    info!(command, code, "command exited");
    Ok(code)
}

pub(crate) fn case(out: &mut impl Write, mode: CaseMode, wide: bool, text: &str) -> Result<(), CliError> {
    let converted = if wide {
        let w = WideString::from(text);
        let folded = match mode {
            CaseMode::Lower => text_case::wide_to_lower(&w),
            CaseMode::Upper => text_case::wide_to_upper(&w),
            CaseMode::Ascii => text_case::wide_to_ascii(&w),
        };
        folded.try_to_string().map_err(SysError::from)?
    } else {
        match mode {
            CaseMode::Lower => text_case::to_lower(text),
            CaseMode::Upper => text_case::to_upper(text),
            CaseMode::Ascii => text_case::to_ascii(text),
        }
    };
    writeln!(out, "{converted}")?;
    Ok(())
}

pub(crate) fn search(out: &mut impl Write, dir: &Path, pattern: &str, regex: bool) -> Result<(), CliError> {
    let mode = if regex { SearchMode::Regex } else { SearchMode::Exact };
    for name in search_dir(dir, pattern, mode)? {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<StoreConfig, CliError> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path).map_err(|e| SysError::Io {
                context: format!("reading {}", path.display()),
                source: e,
            })?;
            Ok(StoreConfig::from_json(&json)?)
        }
        None => Ok(StoreConfig::from_env()?),
    }
}

/// Store `data` followed by its path. If the path cannot be indexed the data
/// slot is erased again, so no value is left without its path.
fn insert_file(guard: &mut StoreGuard<'_, Bytes>, data: Bytes, path: &Path) -> Result<usize, CliError> {
    let position = guard
        .insert_locked(data)
        .map_err(|rejected| rejected.into_parts().1)?;
    if let Err(err) = guard.str_insert_locked(&path.display().to_string()) {
        guard.erase_locked(position);
        return Err(err.into());
    }
    Ok(position)
}

/// Read each file into the store and index its path as a string.
///
/// Files that cannot be read are reported and skipped.
pub(crate) fn collect(
    out: &mut impl Write,
    paths: &[std::path::PathBuf],
    config: Option<&Path>,
) -> Result<(), CliError> {
    let store: IndexedStore<Bytes> = IndexedStore::with_config(load_config(config)?);

    for path in paths {
        let data = match File::open(path)
            .map_err(|e| SysError::Io {
                context: format!("opening {}", path.display()),
                source: e,
            })
            .and_then(|mut file| read_stream(&mut file))
        {
            Ok(data) => data,
            Err(err) => {
                warn!(path = %path.display(), %err, "skipping file");
                writeln!(out, "skipped {}: {err}", path.display())?;
                continue;
            }
        };

        // One lock for both inserts keeps the pair adjacent.
        insert_file(&mut store.lock(), data, path)?;
    }

    {
        let guard = store.lock();
        for (position, element) in guard.iter() {
            match element.kind() {
                ElementKind::Value => {
                    let size = element.as_value().map_or(0, Bytes::len);
                    writeln!(out, "{position:>4}  {:<6}  {size} bytes", element.kind())?;
                }
                _ => {
                    let name = element.as_str().unwrap_or_default();
                    writeln!(out, "{position:>4}  {:<6}  {name}", element.kind())?;
                }
            }
        }
        writeln!(
            out,
            "{} slots, {} paths, capacity {}",
            guard.len(),
            guard.str_len(),
            guard.capacity()
        )?;
    }

    let freed = store.destroy();
    info!(freed, "released store");
    Ok(())
}
