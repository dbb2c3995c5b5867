//! Accessors working on an already open file
//!
//! Changing the mode is a read followed by a write. It is not atomic: a
//! concurrent change to the same file between the two is lost.

use std::fs::File;
use std::fs::Permissions;
use std::os::unix::fs::PermissionsExt;

use crate::Error;
use crate::FileType;
use crate::Mode;
use crate::Result;

/// Get the current mode of `file`
pub fn get(file: &File) -> Result<Mode> {
    let metadata = file
        .metadata()
        .map_err(|source| Error::Stat { path: None, source })?;
    let mode = Mode::from_metadata(&metadata);
    tracing::trace!("fstat: {mode:o}");
    Ok(mode)
}

/// Set the bits of `flag` in the mode of `file`
pub fn set(file: &File, flag: Mode) -> Result<()> {
    let current = get(file)?;
    change(file, current, current.set(flag))
}

/// Clear the bits of `flag` in the mode of `file`
pub fn unset(file: &File, flag: Mode) -> Result<()> {
    let current = get(file)?;
    change(file, current, current.unset(flag))
}

/// Check whether all bits of `flag` are set in the mode of `file`
pub fn is_set(file: &File, flag: Mode) -> Result<bool> {
    Ok(get(file)?.is_set(flag))
}

/// Get the type of `file`, `None` if the type field is not recognized
pub fn file_type(file: &File) -> Result<Option<FileType>> {
    Ok(get(file)?.file_type())
}

type_accessors!(file: &File, "the open file");

fn change(file: &File, old: Mode, new: Mode) -> Result<()> {
    tracing::debug!("fchmod: {old:o} -> {new:o}");
    file.set_permissions(Permissions::from_mode(new.permissions().as_raw()))
        .map_err(|source| Error::Chmod {
            path: None,
            mode: new,
            source,
        })
}
