//! Whole-stream and whole-descriptor I/O.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom};
use std::os::fd::RawFd;

use bytes::{Bytes, BytesMut};
use tracing::{debug, trace};
use xrt_text::{WideStr, WideString};

use crate::error::{Result, SysError};
use crate::format::format_string;

const INITIAL_READ_CAPACITY: usize = 4096;

/// Write all of `s` to `fd`, retrying short and interrupted writes.
pub fn fd_puts(s: &str, fd: RawFd) -> Result<()> {
    let mut rest = s.as_bytes();
    while !rest.is_empty() {
        // SAFETY: `rest` is a live byte slice; the kernel reads at most
        // `rest.len()` bytes from it.
        let n = unsafe { libc::write(fd, rest.as_ptr().cast(), rest.len()) };
        if n < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(SysError::io(format!("writing to fd {fd}"), err));
        }
        if n == 0 {
            return Err(SysError::io(
                format!("writing to fd {fd}"),
                io::Error::from(io::ErrorKind::WriteZero),
            ));
        }
        rest = &rest[n as usize..];
    }
    Ok(())
}

/// Read from the current position to the end, then seek back.
///
/// The stream must be seekable.
pub fn read_stream<R: Read + Seek>(stream: &mut R) -> Result<Bytes> {
    let start = stream
        .stream_position()
        .map_err(|e| SysError::io("stream is not seekable", e))?;
    let end = stream
        .seek(SeekFrom::End(0))
        .map_err(|e| SysError::io("seeking to end of stream", e))?;
    stream
        .seek(SeekFrom::Start(start))
        .map_err(|e| SysError::io("seeking back in stream", e))?;

    let size = end.checked_sub(start).ok_or_else(|| {
        SysError::io(
            "stream end is before current position",
            io::Error::from(io::ErrorKind::InvalidData),
        )
    })?;
    let size = usize::try_from(size)
        .map_err(|_| SysError::invalid(format!("stream of {size} bytes does not fit in memory")))?;

    let mut data = Vec::with_capacity(size);
    let read = stream.read_to_end(&mut data);
    let restored = stream.seek(SeekFrom::Start(start));
    read.map_err(|e| SysError::io("reading stream", e))?;
    restored.map_err(|e| SysError::io("restoring stream position", e))?;

    trace!(start, bytes = data.len(), "read stream");
    Ok(Bytes::from(data))
}

/// Read `fd` until end of file.
///
/// The buffer starts at 4096 bytes and doubles whenever it fills.
pub fn read_fd(fd: RawFd) -> Result<Bytes> {
    let mut buf = BytesMut::zeroed(INITIAL_READ_CAPACITY);
    let mut len = 0;
    loop {
        if len == buf.len() {
            buf.resize(buf.len() * 2, 0);
        }
        let spare = &mut buf[len..];
        // SAFETY: `spare` is initialized, writable, and `spare.len()` long.
        let n = unsafe { libc::read(fd, spare.as_mut_ptr().cast(), spare.len()) };
        if n < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(SysError::io(format!("reading fd {fd}"), err));
        }
        if n == 0 {
            break;
        }
        len += n as usize;
    }
    buf.truncate(len);
    trace!(fd, bytes = len, "read descriptor");
    Ok(buf.freeze())
}

/// Translate a C `fopen` mode such as `"r+"` or `"ab"`.
fn open_options(mode: &str) -> Result<OpenOptions> {
    let base = mode.replace('b', "");
    let mut options = OpenOptions::new();
    match base.as_str() {
        "r" => options.read(true),
        "r+" => options.read(true).write(true),
        "w" => options.write(true).create(true).truncate(true),
        "w+" => options.read(true).write(true).create(true).truncate(true),
        "a" => options.append(true).create(true),
        "a+" => options.read(true).append(true).create(true),
        _ => return Err(SysError::invalid(format!("unsupported open mode {mode:?}"))),
    };
    Ok(options)
}

/// Open a file named by a wide string with a C `fopen` mode.
pub fn open_wide(path: &WideStr, mode: &WideStr) -> Result<File> {
    let path = path.try_to_string()?;
    let mode = mode.try_to_string()?;
    let file = open_options(&mode)?
        .open(&path)
        .map_err(|e| SysError::io(format!("opening {path} with mode {mode:?}"), e))?;
    debug!(%path, %mode, "opened file");
    Ok(file)
}

/// Remove the file whose name is produced by `args`.
pub fn remove_formatted(args: fmt::Arguments<'_>) -> Result<()> {
    let path = format_string(args)?;
    fs::remove_file(&path).map_err(|e| SysError::io(format!("removing {path}"), e))?;
    debug!(%path, "removed file");
    Ok(())
}

pub fn remove_wide(path: &WideStr) -> Result<()> {
    remove_formatted(format_args!("{}", path.try_to_string()?))
}

pub fn current_dir_string() -> Result<String> {
    let dir = std::env::current_dir().map_err(|e| SysError::io("reading current directory", e))?;
    dir.into_os_string().into_string().map_err(|dir| {
        SysError::invalid(format!("current directory {dir:?} is not valid UTF-8"))
    })
}

pub fn current_dir_wide() -> Result<WideString> {
    current_dir_string().map(WideString::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use std::os::fd::AsRawFd;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_read_stream_from_middle() {
        let mut cursor = Cursor::new(b"header:payload".to_vec());
        cursor.seek(SeekFrom::Start(7)).unwrap();
        let data = read_stream(&mut cursor).unwrap();
        assert_eq!(&data[..], b"payload");
        assert_eq!(cursor.position(), 7);
    }

    #[test]
    fn test_read_stream_at_end_is_empty() {
        let mut cursor = Cursor::new(b"abc".to_vec());
        cursor.seek(SeekFrom::End(0)).unwrap();
        assert!(read_stream(&mut cursor).unwrap().is_empty());
    }

    #[test]
    fn test_read_fd_grows_buffer() {
        let mut file = NamedTempFile::new().unwrap();
        let content: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        file.write_all(&content).unwrap();

        let reader = File::open(file.path()).unwrap();
        let data = read_fd(reader.as_raw_fd()).unwrap();
        assert_eq!(data.len(), content.len());
        assert_eq!(&data[..], &content[..]);
    }

    #[test]
    fn test_read_fd_bad_descriptor() {
        let err = read_fd(-1).unwrap_err();
        assert!(err.io_error().is_some());
    }

    #[test]
    fn test_fd_puts_writes_everything() {
        let file = NamedTempFile::new().unwrap();
        let writer = OpenOptions::new().write(true).open(file.path()).unwrap();
        fd_puts("line one\nline two\n", writer.as_raw_fd()).unwrap();
        drop(writer);
        assert_eq!(
            fs::read_to_string(file.path()).unwrap(),
            "line one\nline two\n"
        );
    }

    #[test]
    fn test_open_wide_modes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        let wide_path = WideString::from(path.to_str().unwrap());

        {
            let mut f = open_wide(&wide_path, &WideString::from("w")).unwrap();
            f.write_all(b"first").unwrap();
        }
        {
            let mut f = open_wide(&wide_path, &WideString::from("ab")).unwrap();
            f.write_all(b" second").unwrap();
        }
        let mut f = open_wide(&wide_path, &WideString::from("r")).unwrap();
        assert_eq!(&read_stream(&mut f).unwrap()[..], b"first second");

        assert!(matches!(
            open_wide(&wide_path, &WideString::from("x")).unwrap_err(),
            SysError::InvalidInput { .. }
        ));
    }

    #[test]
    fn test_open_missing_file_for_read() {
        let dir = TempDir::new().unwrap();
        let path = WideString::from(dir.path().join("absent").to_str().unwrap());
        let err = open_wide(&path, &WideString::from("r")).unwrap_err();
        assert_eq!(
            err.io_error().map(io::Error::kind),
            Some(io::ErrorKind::NotFound)
        );
    }

    #[test]
    fn test_remove_variants() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().to_str().unwrap().to_string();
        fs::write(dir.path().join("a.log"), "a").unwrap();
        fs::write(dir.path().join("b.log"), "b").unwrap();

        remove_formatted(format_args!("{}/{}.log", base, "a")).unwrap();
        assert!(!dir.path().join("a.log").exists());

        remove_wide(&WideString::from(format!("{base}/b.log"))).unwrap();
        assert!(!dir.path().join("b.log").exists());

        assert!(remove_formatted(format_args!("{base}/b.log")).is_err());
    }

    #[test]
    fn test_current_dir() {
        let narrow = current_dir_string().unwrap();
        let wide = current_dir_wide().unwrap();
        assert_eq!(wide.to_string_lossy(), narrow);
    }
}
