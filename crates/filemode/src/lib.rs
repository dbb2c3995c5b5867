//! Typed POSIX file mode bits.
//!
//! [`Mode`] models the `st_mode` word: the file type field, the permission
//! triplets and the setuid, setgid and sticky bits. It has a small pure
//! algebra ([`Mode::set`], [`Mode::unset`], [`Mode::is_set`]), type
//! predicates and an `ls -l` style rendering.
//!
//! On top of that, [`file`] and [`path`] read and change the mode of an open
//! file or of a path. The path based queries never follow symbolic links.
//!
//! # Examples
//!
//! ```
//! use filemode::{Mode, RenderStyle};
//!
//! let mode = Mode::S_IFDIR | Mode::S_IRWXU | Mode::READ_GROUP | Mode::EXEC_GROUP;
//! assert!(mode.is_dir());
//! assert!(mode.is_set(Mode::READ_USER | Mode::WRITE_USER));
//! assert!(!mode.unset(Mode::S_IFDIR).is_dir());
//! assert_eq!(mode.display(RenderStyle::Ls).to_string(), "drwxr-x---");
//! ```

#[cfg(not(unix))]
compile_error!("This library only supports unix, the mode word is a POSIX concept");

/// Generates the `is_<type>` accessors of a module from its mode getter
macro_rules! type_accessors {
    (@one $arg:ident: $ty:ty, $name:ident, $doc:expr) => {
        #[doc = $doc]
        pub fn $name($arg: $ty) -> Result<bool> {
            Ok(get($arg)?.$name())
        }
    };
    ($arg:ident: $ty:ty, $what:literal) => {
        type_accessors!(@one $arg: $ty, is_lnk, concat!("Returns whether ", $what, " is a symbolic link."));
        type_accessors!(@one $arg: $ty, is_reg, concat!("Returns whether ", $what, " is a regular file."));
        type_accessors!(@one $arg: $ty, is_dir, concat!("Returns whether ", $what, " is a directory."));
        type_accessors!(@one $arg: $ty, is_chr, concat!("Returns whether ", $what, " is a character device."));
        type_accessors!(@one $arg: $ty, is_blk, concat!("Returns whether ", $what, " is a block device."));
        type_accessors!(@one $arg: $ty, is_fifo, concat!("Returns whether ", $what, " is a FIFO, or a pipe."));
        type_accessors!(@one $arg: $ty, is_sock, concat!("Returns whether ", $what, " is a socket."));
    };
}

mod error;
pub mod file;
mod file_type;
mod mode;
pub mod path;
mod render;

pub use error::Error;
pub use error::Result;
pub use file_type::FileType;
pub use mode::Mode;
pub use mode::PERMISSION_MASK;
pub use mode::Perms;
pub use render::ModeDisplay;
pub use render::RenderStyle;
