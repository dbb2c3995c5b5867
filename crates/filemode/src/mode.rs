//! The mode word and its bit algebra

use std::fmt;
use std::fmt::Octal;
use std::fs::Metadata;
use std::ops::BitOr;
use std::ops::BitOrAssign;
use std::os::unix::fs::MetadataExt;

use crate::FileType;

/// Mask out the bits of the mode that are actual permissions
pub const PERMISSION_MASK: u32 = 0o7777;

// Raw values of the type field, from linux/stat.h
pub(crate) const IFMT: u32 = 0o170_000;
pub(crate) const IFSOCK: u32 = 0o140_000;
pub(crate) const IFLNK: u32 = 0o120_000;
pub(crate) const IFREG: u32 = 0o100_000;
pub(crate) const IFBLK: u32 = 0o060_000;
pub(crate) const IFDIR: u32 = 0o040_000;
pub(crate) const IFCHR: u32 = 0o020_000;
pub(crate) const IFIFO: u32 = 0o010_000;

/// A POSIX file status word (`st_mode`): file type and permission bits.
///
/// This is a plain value. Every operation takes the mode by value and returns
/// a new one. The type field and the permission bits are independent: any
/// combination can be constructed, whether or not it could exist on disk.
///
/// See also:
/// * <https://www.gnu.org/software/libc/manual/html_node/Permission-Bits.html>
/// * <https://www.gnu.org/software/libc/manual/html_node/Testing-File-Type.html>
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[repr(transparent)]
pub struct Mode(u32);

/// Generates a predicate comparing the type field against one type constant
macro_rules! type_predicate {
    ($(#[$meta:meta])* $name:ident => $raw:ident) => {
        $(#[$meta])*
        #[inline]
        #[must_use]
        pub const fn $name(self) -> bool {
            self.0 & IFMT == $raw
        }
    };
}

impl Mode {
    /// Read permission bit for the owner of the file.
    pub const S_IRUSR: Self = Self(0o400);
    /// Write permission bit for the owner of the file.
    pub const S_IWUSR: Self = Self(0o200);
    /// Execute (for ordinary files) or search (for directories) permission bit
    /// for the owner of the file.
    pub const S_IXUSR: Self = Self(0o100);
    /// Equivalent to `S_IRUSR | S_IWUSR | S_IXUSR`.
    pub const S_IRWXU: Self = Self(0o700);

    /// Read permission bit for the group owner of the file.
    pub const S_IRGRP: Self = Self(0o040);
    /// Write permission bit for the group owner of the file.
    pub const S_IWGRP: Self = Self(0o020);
    /// Execute or search permission bit for the group owner of the file.
    pub const S_IXGRP: Self = Self(0o010);
    /// Equivalent to `S_IRGRP | S_IWGRP | S_IXGRP`.
    pub const S_IRWXG: Self = Self(0o070);

    /// Read permission bit for other users.
    pub const S_IROTH: Self = Self(0o004);
    /// Write permission bit for other users.
    pub const S_IWOTH: Self = Self(0o002);
    /// Execute or search permission bit for other users.
    pub const S_IXOTH: Self = Self(0o001);
    /// Equivalent to `S_IROTH | S_IWOTH | S_IXOTH`.
    pub const S_IRWXO: Self = Self(0o007);

    /// Bit mask used to extract the file type code from a mode value.
    pub const S_IFMT: Self = Self(IFMT);
    /// File type constant of a socket.
    pub const S_IFSOCK: Self = Self(IFSOCK);
    /// File type constant of a symbolic link.
    pub const S_IFLNK: Self = Self(IFLNK);
    /// File type constant of a regular file.
    pub const S_IFREG: Self = Self(IFREG);
    /// File type constant of a block-oriented device file.
    pub const S_IFBLK: Self = Self(IFBLK);
    /// File type constant of a directory file.
    pub const S_IFDIR: Self = Self(IFDIR);
    /// File type constant of a character-oriented device file.
    pub const S_IFCHR: Self = Self(IFCHR);
    /// File type constant of a FIFO or pipe.
    pub const S_IFIFO: Self = Self(IFIFO);

    /// The set-user-ID on execute bit.
    pub const S_ISUID: Self = Self(0o4000);
    /// The set-group-ID on execute bit.
    pub const S_ISGID: Self = Self(0o2000);
    /// The sticky bit.
    pub const S_ISVTX: Self = Self(0o1000);

    /// Read permission for the owner, same as `S_IRUSR`.
    pub const READ_USER: Self = Self::S_IRUSR;
    /// Write permission for the owner, same as `S_IWUSR`.
    pub const WRITE_USER: Self = Self::S_IWUSR;
    /// Execute permission for the owner, same as `S_IXUSR`.
    pub const EXEC_USER: Self = Self::S_IXUSR;

    /// Read permission for the group, same as `S_IRGRP`.
    pub const READ_GROUP: Self = Self::S_IRGRP;
    /// Write permission for the group, same as `S_IWGRP`.
    pub const WRITE_GROUP: Self = Self::S_IWGRP;
    /// Execute permission for the group, same as `S_IXGRP`.
    pub const EXEC_GROUP: Self = Self::S_IXGRP;

    /// Read permission for other users, same as `S_IROTH`.
    pub const READ_OTHER: Self = Self::S_IROTH;
    /// Write permission for other users, same as `S_IWOTH`.
    pub const WRITE_OTHER: Self = Self::S_IWOTH;
    /// Execute permission for other users, same as `S_IXOTH`.
    pub const EXEC_OTHER: Self = Self::S_IXOTH;

    #[inline]
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[inline]
    #[must_use]
    pub const fn as_raw(&self) -> u32 {
        self.0
    }

    /// Get the mode word out of file metadata
    #[must_use]
    pub fn from_metadata(metadata: &Metadata) -> Self {
        Self(metadata.mode())
    }

    /// Add all bits of `flag`. Bits already set stay set.
    #[inline]
    #[must_use]
    pub const fn set(self, flag: Self) -> Self {
        Self(self.0 | flag.0)
    }

    /// Clear the bits that are set in both `self` and `flag`.
    ///
    /// Bits of `flag` that are not present in `self` are ignored.
    #[inline]
    #[must_use]
    pub const fn unset(self, flag: Self) -> Self {
        Self(self.0 ^ (self.0 & flag.0))
    }

    /// Check that *every* bit of `flag` is set.
    #[inline]
    #[must_use]
    pub const fn is_set(self, flag: Self) -> bool {
        self.0 & flag.0 == flag.0
    }

    /// Only the type field
    #[inline]
    #[must_use]
    pub const fn type_bits(self) -> Self {
        Self(self.0 & IFMT)
    }

    /// Only the permission bits (including setuid, setgid and sticky)
    #[inline]
    #[must_use]
    pub const fn permissions(self) -> Self {
        Self(self.0 & PERMISSION_MASK)
    }

    /// Decode the type field, `None` if it holds an unrecognized value.
    #[inline]
    #[must_use]
    pub const fn file_type(self) -> Option<FileType> {
        FileType::from_mode(self)
    }

    type_predicate!(
        /// Is this a symbolic link?
        is_lnk => IFLNK
    );
    type_predicate!(
        /// Is this a regular file?
        is_reg => IFREG
    );
    type_predicate!(
        /// Is this a directory?
        is_dir => IFDIR
    );
    type_predicate!(
        /// Is this a character special file (a device like a terminal)?
        is_chr => IFCHR
    );
    type_predicate!(
        /// Is this a block special file (a device like a disk)?
        is_blk => IFBLK
    );
    type_predicate!(
        /// Is this a FIFO special file, or a pipe?
        is_fifo => IFIFO
    );
    type_predicate!(
        /// Is this a socket?
        is_sock => IFSOCK
    );

    /// Executable files with this bit set will
    /// run with effective uid set to the uid of the file owner.
    #[must_use]
    pub const fn setuid(self) -> bool {
        self.is_set(Self::S_ISUID)
    }

    /// Executable files with this bit set will
    /// run with effective gid set to the gid of the file owner.
    #[must_use]
    pub const fn setgid(self) -> bool {
        self.is_set(Self::S_ISGID)
    }

    /// Is the sticky bit set?
    #[must_use]
    pub const fn sticky(self) -> bool {
        self.is_set(Self::S_ISVTX)
    }

    /// The permissions for the owner of the file.
    #[must_use]
    pub fn owner(self) -> Perms {
        Perms::from_bits_truncate(((self.0 & Self::S_IRWXU.0) >> 6) as u8)
    }

    /// The permissions for everyone who is not the owner, but in the group.
    #[must_use]
    pub fn group(self) -> Perms {
        Perms::from_bits_truncate(((self.0 & Self::S_IRWXG.0) >> 3) as u8)
    }

    /// The permissions for everyone who is not the owner and not in the group.
    #[must_use]
    pub fn other(self) -> Perms {
        Perms::from_bits_truncate((self.0 & Self::S_IRWXO.0) as u8)
    }
}

impl BitOr for Mode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.set(rhs)
    }
}

impl BitOrAssign for Mode {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.set(rhs);
    }
}

impl From<u32> for Mode {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Mode> for u32 {
    fn from(value: Mode) -> Self {
        value.0
    }
}

impl From<FileType> for Mode {
    fn from(value: FileType) -> Self {
        value.mode()
    }
}

/// Only the permission bits survive, `nix` has no notion of the type field here.
impl From<Mode> for nix::sys::stat::Mode {
    fn from(mode: Mode) -> Self {
        Self::from_bits_truncate(mode.0 & PERMISSION_MASK)
    }
}

impl fmt::Debug for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mode({:#o})", self.0)
    }
}

impl Octal for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Octal::fmt(&self.0, f)
    }
}

bitflags::bitflags! {
    /// One permission triplet (owner, group or other).
    #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Perms: u8 {
        /// Entity has read access.
        const READ = 0b100;
        /// Entity has write access.
        const WRITE = 0b010;
        /// Entity has execute access.
        const EXECUTE = 0b001;
    }
}

impl fmt::Display for Perms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, ch) in [(Self::READ, "r"), (Self::WRITE, "w"), (Self::EXECUTE, "x")] {
            f.write_str(if self.contains(flag) { ch } else { "-" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Mode;
    use super::Perms;
    use crate::FileType;
    use pretty_assertions::assert_eq;

    const FLAGS: [Mode; 16] = [
        Mode::S_IRUSR,
        Mode::S_IWUSR,
        Mode::S_IXUSR,
        Mode::S_IRWXU,
        Mode::S_IRGRP,
        Mode::S_IXGRP,
        Mode::S_IRWXO,
        Mode::S_ISUID,
        Mode::S_ISGID,
        Mode::S_ISVTX,
        Mode::S_IFDIR,
        Mode::S_IFREG,
        Mode::S_IFSOCK,
        Mode::S_IFMT,
        Mode::new(0o4755),
        Mode::new(0),
    ];

    const MODES: [u32; 10] = [
        0, 0o644, 0o755, 0o7777, 0o100_644, 0o040_755, 0o120_777, 0o140_000, 0o170_000, 0o070_123,
    ];

    #[test]
    fn test_directory_scenario() {
        let mode = Mode::new(0).set(Mode::S_IFDIR).set(Mode::READ_USER);
        assert!(mode.is_dir());
        assert!(!mode.is_reg());
        assert!(!mode.is_sock());
        assert!(!mode.is_lnk());
        assert!(mode.is_set(Mode::READ_USER));
        assert_eq!(mode, Mode::new(0o040_400));

        let mode = mode.unset(Mode::S_IFDIR);
        assert!(!mode.is_dir());
        assert_eq!(mode, Mode::READ_USER);
        // Clearing again changes nothing
        assert_eq!(mode.unset(Mode::S_IFDIR), mode);
    }

    #[test]
    fn test_set_then_is_set() {
        for raw in MODES {
            for flag in FLAGS {
                let mode = Mode::new(raw).set(flag);
                assert!(mode.is_set(flag), "{raw:o} | {flag:o}");
                assert_eq!(mode.set(flag), mode);
            }
        }
    }

    #[test]
    fn test_unset() {
        for raw in MODES {
            for flag in FLAGS {
                let mode = Mode::new(raw);
                let cleared = mode.unset(flag);
                assert_eq!(cleared.unset(flag), cleared);
                // Never sets a bit
                assert_eq!(cleared.as_raw() & !raw, 0);
                assert_eq!(cleared.as_raw() & flag.as_raw(), 0);
                assert_eq!(cleared.as_raw(), raw & !flag.as_raw());
            }
        }
        // Bits not present are ignored
        assert_eq!(Mode::new(0o600).unset(Mode::new(0o077)), Mode::new(0o600));
    }

    #[test]
    fn test_is_set_requires_all_bits() {
        let mode = Mode::new(0o640);
        assert!(mode.is_set(Mode::READ_USER | Mode::WRITE_USER));
        assert!(!mode.is_set(Mode::S_IRWXU));
        assert!(mode.is_set(Mode::new(0)));
    }

    #[test]
    fn test_type_predicates_exclusive() {
        for raw_type in (0..16).map(|v| v << 12) {
            let mode = Mode::new(raw_type | 0o755);
            let results = [
                mode.is_lnk(),
                mode.is_reg(),
                mode.is_dir(),
                mode.is_chr(),
                mode.is_blk(),
                mode.is_fifo(),
                mode.is_sock(),
            ];
            let count = results.iter().filter(|v| **v).count();
            match mode.file_type() {
                Some(_) => assert_eq!(count, 1, "{mode:o}"),
                None => assert_eq!(count, 0, "{mode:o}"),
            }
        }
    }

    #[test]
    fn test_file_type_matches_predicates() {
        assert_eq!(Mode::new(0o120_777).file_type(), Some(FileType::SymbolicLink));
        assert_eq!(Mode::new(0o060_660).file_type(), Some(FileType::BlockDevice));
        assert_eq!(Mode::new(0o030_000).file_type(), None);
        assert_eq!(Mode::new(0o644).file_type(), None);
        assert_eq!(Mode::from(FileType::Fifo), Mode::S_IFIFO);
    }

    #[test]
    fn test_triplets() {
        let mode = Mode::new(0o100_751);
        assert_eq!(mode.owner(), Perms::all());
        assert_eq!(mode.group(), Perms::READ | Perms::EXECUTE);
        assert_eq!(mode.other(), Perms::EXECUTE);
        assert_eq!(
            format!("{}{}{}", mode.owner(), mode.group(), mode.other()),
            "rwxr-x--x"
        );
        assert!(!mode.setuid());
        assert!(Mode::new(0o4755).setuid());
        assert!(Mode::new(0o2755).setgid());
        assert!(Mode::new(0o1777).sticky());
    }

    #[test]
    fn test_masks() {
        let mode = Mode::new(0o104_755);
        assert_eq!(mode.type_bits(), Mode::S_IFREG);
        assert_eq!(mode.permissions(), Mode::new(0o4755));
        assert_eq!(format!("{mode:o}"), "104755");
        assert_eq!(format!("{mode:?}"), "Mode(0o104755)");
    }

    #[test]
    fn test_nix_conversion() {
        let mode: nix::sys::stat::Mode = (Mode::S_IFDIR | Mode::new(0o750)).into();
        assert_eq!(mode.bits(), 0o750);
        assert_eq!(
            nix::sys::stat::Mode::from(Mode::S_ISVTX | Mode::S_IRWXO),
            nix::sys::stat::Mode::S_ISVTX | nix::sys::stat::Mode::S_IRWXO
        );
    }
}
