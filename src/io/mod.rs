pub mod config_io;
pub mod json_io;

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Replaces `path` with `content`. The bytes are staged in a hidden file in
/// the same directory and renamed over the target once synced, so readers see
/// either the old file or the new one.
pub(crate) fn atomic_write_string(path: &Path, content: &str) -> io::Result<()> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut staged = tempfile::Builder::new()
        .prefix(".tripgrid-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    staged.write_all(content.as_bytes())?;
    staged.as_file().sync_all()?;
    replace_with(staged, path)
}

fn replace_with(staged: NamedTempFile, path: &Path) -> io::Result<()> {
    let failed = match staged.persist(path) {
        Ok(_) => return Ok(()),
        Err(failed) => failed,
    };
    // Renaming onto an existing file is refused on some platforms.
    if failed.error.kind() != io::ErrorKind::AlreadyExists {
        return Err(failed.error);
    }
    fs::remove_file(path)?;
    failed
        .file
        .persist(path)
        .map(drop)
        .map_err(|retry| retry.error)
}
