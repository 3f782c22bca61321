//! Shell command execution.

use std::fmt;
use std::process::{Command, ExitStatus};

use tracing::{debug, warn};
use xrt_text::WideStr;

use crate::error::{Result, SysError};
use crate::format::{format_bounded, format_string};

#[cfg(target_os = "android")]
const SHELL: (&str, &str) = ("/system/bin/sh", "-c");
#[cfg(all(unix, not(target_os = "android")))]
const SHELL: (&str, &str) = ("/bin/sh", "-c");
#[cfg(windows)]
const SHELL: (&str, &str) = ("cmd.exe", "/C");

/// Exit code for `status`, or 128 plus the signal number if a signal ended it.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    warn!(?status, "process ended without exit code or signal");
    -1
}

/// Run `command` through the platform shell and wait for it.
pub fn run_shell(command: &str) -> Result<i32> {
    if command.trim().is_empty() {
        return Err(SysError::invalid("empty command"));
    }
    let (program, flag) = SHELL;
    let status = Command::new(program)
        .arg(flag)
        .arg(command)
        .status()
        .map_err(|source| SysError::Spawn {
            program: program.to_string(),
            source,
        })?;
    let code = exit_code(status);
    debug!(command, code, "shell command finished");
    Ok(code)
}

pub fn run_shell_wide(command: &WideStr) -> Result<i32> {
    run_shell(&command.try_to_string()?)
}

/// Run the command produced by `args`.
pub fn run_formatted(args: fmt::Arguments<'_>) -> Result<i32> {
    run_shell(&format_string(args)?)
}

/// Run the command produced by `args` if it fits in `limit` bytes.
pub fn run_bounded(limit: usize, args: fmt::Arguments<'_>) -> Result<i32> {
    let command = format_bounded(limit, args).map_err(|e| match e {
        SysError::Truncated { needed, limit } => SysError::CommandTooLong { needed, limit },
        other => other,
    })?;
    run_shell(&command)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use xrt_text::WideString;

    #[test]
    fn test_exit_codes() {
        assert_eq!(run_shell("true").unwrap(), 0);
        assert_eq!(run_shell("exit 3").unwrap(), 3);
    }

    #[test]
    fn test_signal_maps_above_128() {
        assert_eq!(run_shell("kill -TERM $$").unwrap(), 128 + libc::SIGTERM);
    }

    #[test]
    fn test_empty_command_rejected() {
        assert!(matches!(
            run_shell("  ").unwrap_err(),
            SysError::InvalidInput { .. }
        ));
    }

    #[test]
    fn test_formatted_and_wide() {
        assert_eq!(run_formatted(format_args!("exit {}", 7)).unwrap(), 7);
        assert_eq!(run_shell_wide(&WideString::from("exit 4")).unwrap(), 4);
    }

    #[test]
    fn test_bounded() {
        assert_eq!(run_bounded(16, format_args!("exit {}", 2)).unwrap(), 2);
        assert!(matches!(
            run_bounded(6, format_args!("exit {}", 2)).unwrap_err(),
            SysError::CommandTooLong { needed: 6, limit: 6 }
        ));
    }
}
