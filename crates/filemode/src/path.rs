//! Accessors working on a path
//!
//! Queries use a non-following lookup (`lstat`): a symbolic link reports
//! itself, not its target. Mutators open the path read only and change the
//! mode through the resulting handle, which is closed again before returning.

use std::fs::File;
use std::fs::OpenOptions;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use crate::Error;
use crate::FileType;
use crate::Mode;
use crate::Result;
use crate::file;

/// Permissions a file would be created with. Never used, mutators don't create.
const CREATE_MODE: u32 = 0o644;

/// Get the mode of `path`, without following symbolic links
pub fn get(path: impl AsRef<Path>) -> Result<Mode> {
    let path = path.as_ref();
    let metadata = std::fs::symlink_metadata(path).map_err(|source| Error::Stat {
        path: Some(path.to_owned()),
        source,
    })?;
    let mode = Mode::from_metadata(&metadata);
    tracing::trace!("lstat {}: {mode:o}", path.display());
    Ok(mode)
}

/// Set the bits of `flag` in the mode of the file at `path`
pub fn set(path: impl AsRef<Path>, flag: Mode) -> Result<()> {
    with_file(path.as_ref(), |file| file::set(file, flag))
}

/// Clear the bits of `flag` in the mode of the file at `path`
pub fn unset(path: impl AsRef<Path>, flag: Mode) -> Result<()> {
    with_file(path.as_ref(), |file| file::unset(file, flag))
}

/// Check whether all bits of `flag` are set for `path`, without following
/// symbolic links
pub fn is_set(path: impl AsRef<Path>, flag: Mode) -> Result<bool> {
    Ok(get(path)?.is_set(flag))
}

/// Get the type of `path` (a symbolic link is reported as such)
pub fn file_type(path: impl AsRef<Path>) -> Result<Option<FileType>> {
    Ok(get(path)?.file_type())
}

type_accessors!(path: impl AsRef<Path>, "the file at the path");

/// Run `op` on a read only handle for `path`. The handle is dropped (closed)
/// when this returns, whatever the outcome.
fn with_file<T>(path: &Path, op: impl FnOnce(&File) -> Result<T>) -> Result<T> {
    // Mode changes are gated on ownership, not on how the file was opened, so
    // read only is enough. O_NONBLOCK keeps a FIFO without writers from hanging.
    let file = OpenOptions::new()
        .read(true)
        .mode(CREATE_MODE)
        .custom_flags(libc::O_NONBLOCK)
        .open(path)
        .map_err(|source| {
            tracing::debug!("Failed to open {}: {source}", path.display());
            Error::Open {
                path: path.to_owned(),
                source,
            }
        })?;
    op(&file).map_err(|err| err.with_path(path))
}
