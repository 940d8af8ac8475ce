use std::path::Path;

use cubicworld_core::{Platform, CUBIC_CHUNKS};
use cubicworld_world::{is_cubic_world, WorldFormatError};

/// Tells the host's map browser whether a directory is a save of its platform.
pub trait MapRecognizer: Send + Sync {
    /// Platform this recognizer looks for.
    fn platform(&self) -> &'static Platform;

    /// Returns true when `dir` is a save of [`MapRecognizer::platform`].
    fn is_map(&self, dir: &Path) -> Result<bool, WorldFormatError>;
}

/// Recognizes Cubic Chunks saves by their `level.dat`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CubicChunksMapRecognizer;

impl MapRecognizer for CubicChunksMapRecognizer {
    fn platform(&self) -> &'static Platform {
        &CUBIC_CHUNKS
    }

    fn is_map(&self, dir: &Path) -> Result<bool, WorldFormatError> {
        is_cubic_world(dir)
    }
}
