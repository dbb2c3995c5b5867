//! `ls -l` style rendering of a mode word

use std::fmt;
use std::fmt::Write;

use crate::FileType;
use crate::Mode;

/// How to render a [`Mode`] as a 10 character string.
///
/// ```
/// use filemode::{Mode, RenderStyle};
///
/// let mode = Mode::new(0o100_644);
/// assert_eq!(mode.display(RenderStyle::Compat).to_string(), "rrwxr--r--");
/// assert_eq!(mode.display(RenderStyle::Ls).to_string(), "-rw-r--r--");
/// ```
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum RenderStyle {
    /// The historical rendering of this library, kept stable for existing
    /// consumers:
    /// * regular files are `r`, FIFOs are `f` and an empty type field is `-`
    /// * the owner execute column follows the owner *read* bit
    /// * setuid, setgid and sticky are not shown
    #[default]
    Compat,
    /// What `ls -l` prints, including `s`/`S` and `t`/`T` for the special bits.
    Ls,
}

impl Mode {
    /// Render as exactly 10 ASCII bytes
    #[must_use]
    pub fn render(self, style: RenderStyle) -> [u8; 10] {
        match style {
            RenderStyle::Compat => render_compat(self),
            RenderStyle::Ls => render_ls(self),
        }
    }

    /// Get an object implementing [`fmt::Display`] for the given style.
    ///
    /// The [`fmt::Display`] impl on [`Mode`] itself uses [`RenderStyle::Compat`].
    #[must_use]
    pub fn display(self, style: RenderStyle) -> ModeDisplay {
        ModeDisplay { mode: self, style }
    }
}

/// Helper struct for printing a [`Mode`] in a specific [`RenderStyle`]
#[derive(Debug, Clone, Copy)]
pub struct ModeDisplay {
    mode: Mode,
    style: RenderStyle,
}

impl fmt::Display for ModeDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.mode.render(self.style) {
            f.write_char(char::from(byte))?;
        }
        Ok(())
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display(RenderStyle::Compat), f)
    }
}

fn render_compat(mode: Mode) -> [u8; 10] {
    let bit = |flag: Mode, ch: u8| if mode.is_set(flag) { ch } else { b'-' };
    [
        match mode.file_type() {
            Some(FileType::SymbolicLink) => b'l',
            Some(FileType::RegularFile) => b'r',
            Some(FileType::Directory) => b'd',
            Some(FileType::CharacterDevice) => b'c',
            Some(FileType::BlockDevice) => b'b',
            Some(FileType::Fifo) => b'f',
            Some(FileType::Socket) => b's',
            None if mode.type_bits().as_raw() == 0 => b'-',
            None => b'?',
        },
        bit(Mode::READ_USER, b'r'),
        bit(Mode::WRITE_USER, b'w'),
        // Driven by the read bit, not S_IXUSR. Existing output depends on it.
        bit(Mode::READ_USER, b'x'),
        bit(Mode::READ_GROUP, b'r'),
        bit(Mode::WRITE_GROUP, b'w'),
        bit(Mode::EXEC_GROUP, b'x'),
        bit(Mode::READ_OTHER, b'r'),
        bit(Mode::WRITE_OTHER, b'w'),
        bit(Mode::EXEC_OTHER, b'x'),
    ]
}

fn render_ls(mode: Mode) -> [u8; 10] {
    let bit = |flag: Mode, ch: u8| if mode.is_set(flag) { ch } else { b'-' };
    // Execute column that also shows a special bit: lowercase if both are
    // set, uppercase if only the special bit is.
    let exec = |special: Mode, flag: Mode, ch: u8| {
        match (mode.is_set(special), mode.is_set(flag)) {
            (true, true) => ch,
            (true, false) => ch.to_ascii_uppercase(),
            (false, true) => b'x',
            (false, false) => b'-',
        }
    };
    [
        match mode.file_type() {
            Some(FileType::Fifo) => b'p',
            Some(FileType::CharacterDevice) => b'c',
            Some(FileType::Directory) => b'd',
            Some(FileType::BlockDevice) => b'b',
            Some(FileType::RegularFile) => b'-',
            Some(FileType::SymbolicLink) => b'l',
            Some(FileType::Socket) => b's',
            None => b'?',
        },
        bit(Mode::S_IRUSR, b'r'),
        bit(Mode::S_IWUSR, b'w'),
        exec(Mode::S_ISUID, Mode::S_IXUSR, b's'),
        bit(Mode::S_IRGRP, b'r'),
        bit(Mode::S_IWGRP, b'w'),
        exec(Mode::S_ISGID, Mode::S_IXGRP, b's'),
        bit(Mode::S_IROTH, b'r'),
        bit(Mode::S_IWOTH, b'w'),
        exec(Mode::S_ISVTX, Mode::S_IXOTH, b't'),
    ]
}
