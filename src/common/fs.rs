//! Common file system operations

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Create `path` and any missing parents; succeeds if it already exists.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path)
}

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}

/// Write `contents` to `path`, replacing any previous file.
pub fn write_file(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(contents.as_bytes())?;
    writer.flush()
}

/// Copy a text file line by line, terminating every line with `\n`.
///
/// Lines are copied as bytes, so any encoding survives. The source is read
/// completely before `dst` is created.
pub fn copy_lines(src: &Path, dst: &Path) -> std::io::Result<()> {
    let contents = fs::read(src)?;
    let mut writer = BufWriter::new(File::create(dst)?);
    for line in contents.split_inclusive(|b| *b == b'\n') {
        let line = line.strip_suffix(b"\n").unwrap_or(line);
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        writer.write_all(line)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Whether both paths exist and name the same file.
pub fn is_same_file(a: &Path, b: &Path) -> bool {
    match (dunce::canonicalize(a), dunce::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
