use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while reading world metadata.
///
/// A missing metadata file is never an error; these variants all mean a file
/// exists but could not be understood, which points at a broken save.
#[derive(Debug, Error)]
pub enum WorldFormatError {
    /// The file exists but could not be opened.
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        /// Offending file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The file is not a gzip-compressed tag tree.
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        /// Offending file.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: nbt::Error,
    },
    /// The tag tree decoded but does not have the expected layout.
    #[error("unexpected tag layout in {}: {detail}", .path.display())]
    Schema {
        /// Offending file.
        path: PathBuf,
        /// What was wrong.
        detail: String,
    },
    /// A world directory could not be listed.
    #[error("failed to list {}: {source}", .path.display())]
    ListDir {
        /// Directory being listed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

impl WorldFormatError {
    /// The file or directory the error is about.
    pub fn path(&self) -> &Path {
        match self {
            Self::Open { path, .. }
            | Self::Decode { path, .. }
            | Self::Schema { path, .. }
            | Self::ListDir { path, .. } => path,
        }
    }
}
