//! The type field of the mode word

use std::fmt;

use crate::Mode;
use crate::mode::IFBLK;
use crate::mode::IFCHR;
use crate::mode::IFDIR;
use crate::mode::IFIFO;
use crate::mode::IFLNK;
use crate::mode::IFMT;
use crate::mode::IFREG;
use crate::mode::IFSOCK;

/// The type of a file, as encoded in the type field of [`Mode`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum FileType {
    /// A unix socket.
    Socket,
    /// A symbolic link.
    SymbolicLink,
    /// A standard file.
    RegularFile,
    /// A unix block device.
    BlockDevice,
    /// A directory.
    Directory,
    /// A unix character device.
    CharacterDevice,
    /// A unix fifo (named pipe).
    Fifo,
}

impl FileType {
    /// All recognized file types
    pub const ALL: [Self; 7] = [
        Self::Socket,
        Self::SymbolicLink,
        Self::RegularFile,
        Self::BlockDevice,
        Self::Directory,
        Self::CharacterDevice,
        Self::Fifo,
    ];

    /// Decode the type field of `mode`. Permission bits are ignored.
    #[must_use]
    pub const fn from_mode(mode: Mode) -> Option<Self> {
        Some(match mode.as_raw() & IFMT {
            IFSOCK => Self::Socket,
            IFLNK => Self::SymbolicLink,
            IFREG => Self::RegularFile,
            IFBLK => Self::BlockDevice,
            IFDIR => Self::Directory,
            IFCHR => Self::CharacterDevice,
            IFIFO => Self::Fifo,
            _ => return None,
        })
    }

    /// The value of the type field for this type
    #[must_use]
    pub const fn mode(self) -> Mode {
        Mode::new(match self {
            Self::Socket => IFSOCK,
            Self::SymbolicLink => IFLNK,
            Self::RegularFile => IFREG,
            Self::BlockDevice => IFBLK,
            Self::Directory => IFDIR,
            Self::CharacterDevice => IFCHR,
            Self::Fifo => IFIFO,
        })
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Socket => "socket",
            Self::SymbolicLink => "link",
            Self::RegularFile => "file",
            Self::BlockDevice => "block",
            Self::Directory => "dir",
            Self::CharacterDevice => "char",
            Self::Fifo => "fifo",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<FileType> for nix::sys::stat::SFlag {
    fn from(value: FileType) -> Self {
        match value {
            FileType::Socket => Self::S_IFSOCK,
            FileType::SymbolicLink => Self::S_IFLNK,
            FileType::RegularFile => Self::S_IFREG,
            FileType::BlockDevice => Self::S_IFBLK,
            FileType::Directory => Self::S_IFDIR,
            FileType::CharacterDevice => Self::S_IFCHR,
            FileType::Fifo => Self::S_IFIFO,
        }
    }
}
