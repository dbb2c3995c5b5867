//! Errors from the file and path accessors

use std::path::Path;
use std::path::PathBuf;

use crate::Mode;

/// Errors from reading or changing the mode of a file system object
///
/// These wrap the failure from the operating system. Nothing is retried, and
/// a failed mode change leaves the file untouched.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Reading the metadata failed
    #[error("Failed to get mode{}: {source}", location(.path))]
    Stat {
        path: Option<PathBuf>,
        source: std::io::Error,
    },
    /// Opening a path in order to change its mode failed
    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Changing the mode failed
    #[error("Failed to set mode {mode:o}{}: {source}", location(.path))]
    Chmod {
        path: Option<PathBuf>,
        mode: Mode,
        source: std::io::Error,
    },
}

fn location(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" of {}", path.display()),
        None => String::new(),
    }
}

impl Error {
    /// True if no metadata could be read (this includes failing to open a path
    /// before changing its mode)
    #[must_use]
    pub fn is_stat(&self) -> bool {
        matches!(self, Self::Stat { .. } | Self::Open { .. })
    }

    /// True if the mode change itself was rejected
    #[must_use]
    pub fn is_chmod(&self) -> bool {
        matches!(self, Self::Chmod { .. })
    }

    /// Path the error relates to, if the operation was given one
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Stat { path, .. } | Self::Chmod { path, .. } => path.as_deref(),
            Self::Open { path, .. } => Some(path),
        }
    }

    /// The underlying OS error
    #[must_use]
    pub fn io_error(&self) -> &std::io::Error {
        match self {
            Self::Stat { source, .. } | Self::Open { source, .. } | Self::Chmod { source, .. } => {
                source
            }
        }
    }

    /// Attach a path to an error from a handle based operation
    pub(crate) fn with_path(mut self, new_path: &Path) -> Self {
        match &mut self {
            Self::Stat { path, .. } | Self::Chmod { path, .. } => {
                path.get_or_insert_with(|| new_path.to_owned());
            }
            Self::Open { .. } => {}
        }
        self
    }
}

/// Result type for the file and path accessors
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::Error;
    use crate::Mode;
    use pretty_assertions::assert_eq;
    use std::io::ErrorKind;
    use std::path::Path;

    fn not_found() -> std::io::Error {
        std::io::Error::from(ErrorKind::NotFound)
    }

    #[test]
    fn test_with_path() {
        let err = Error::Stat {
            path: None,
            source: not_found(),
        };
        assert_eq!(err.path(), None);
        let err = err.with_path(Path::new("/a"));
        assert_eq!(err.path(), Some(Path::new("/a")));
        // The first path wins
        let err = err.with_path(Path::new("/b"));
        assert_eq!(err.path(), Some(Path::new("/a")));
        assert!(err.is_stat());
        assert!(!err.is_chmod());
        assert_eq!(err.io_error().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_messages() {
        let err = Error::Chmod {
            path: None,
            mode: Mode::new(0o100_644),
            source: std::io::Error::from(ErrorKind::PermissionDenied),
        };
        assert!(err.is_chmod());
        assert!(
            err.to_string().starts_with("Failed to set mode 100644: "),
            "{err}"
        );
        let err = err.with_path(Path::new("/etc/passwd"));
        assert!(
            err.to_string()
                .starts_with("Failed to set mode 100644 of /etc/passwd: "),
            "{err}"
        );

        let err = Error::Open {
            path: "/nope".into(),
            source: not_found(),
        };
        assert!(err.is_stat());
        assert!(err.to_string().starts_with("Failed to open /nope: "), "{err}");
    }
}
