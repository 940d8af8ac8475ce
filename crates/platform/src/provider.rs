//! Platform dispatch: the factories a host calls with a platform token.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cubicworld_core::{DimensionId, Platform, CUBIC_CHUNKS};
use cubicworld_world::{
    list_supported_dimensions, ChunkStore, CubicChunkStore, EditMode, VirtualColumn,
    WorldFormatError, DEFAULT_CUBE_CAPACITY,
};

use crate::{
    CubicChunksMapRecognizer, CubicChunksWorldExporter, MapRecognizer, MinecraftLocator,
    PlatformError, PlatformRegistration, PostProcessor, StandardPostProcessor, WorldExporter,
    WorldModel, PLUGIN_NAME, PLUGIN_VERSION,
};

/// Function table a registration record hands to the host.
///
/// Every factory takes the platform token first and fails with
/// [`PlatformError::UnsupportedPlatform`] when it is not one of
/// [`PlatformProvider::platforms`], before touching the filesystem.
pub trait PlatformProvider: Send + Sync {
    /// Platforms this provider serves.
    fn platforms(&self) -> &[&'static Platform];

    /// Canonical dimensions of the save at `world_dir`. Empty when the save is
    /// not of `platform`, or `platform` is not served here.
    fn dimensions(
        &self,
        platform: &Platform,
        world_dir: &Path,
    ) -> Result<Vec<DimensionId>, PlatformError>;

    /// A new, empty, editable chunk column.
    fn create_chunk(
        &self,
        platform: &Platform,
        x: i32,
        z: i32,
        max_height: i32,
    ) -> Result<VirtualColumn, PlatformError>;

    /// A chunk store bound to one dimension of the world at `world_dir`.
    fn chunk_store(
        &self,
        platform: &Platform,
        world_dir: &Path,
        dimension: DimensionId,
    ) -> Result<Box<dyn ChunkStore>, PlatformError>;

    /// An exporter bound to `world`.
    fn exporter(
        &self,
        platform: &Platform,
        world: Arc<WorldModel>,
    ) -> Result<Box<dyn WorldExporter>, PlatformError>;

    /// The post-processor to run after export.
    fn post_processor(&self, platform: &Platform) -> Result<Box<dyn PostProcessor>, PlatformError>;

    /// Where exports go by default, if that can be determined.
    fn default_export_dir(&self, platform: &Platform) -> Option<PathBuf>;

    /// Recognizer for saves of this provider's platform.
    fn map_recognizer(&self) -> Box<dyn MapRecognizer>;
}

/// Provider for [`CUBIC_CHUNKS`].
#[derive(Debug, Clone, Default)]
pub struct CubicChunksPlatformProvider {
    locator: MinecraftLocator,
}

impl CubicChunksPlatformProvider {
    /// Provider that finds the Minecraft directory in its usual place.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider using an explicit Minecraft directory lookup.
    pub fn with_locator(locator: MinecraftLocator) -> Self {
        Self { locator }
    }

    /// Check `platform` once and return a provider that no longer needs it.
    pub fn bind(&self, platform: &Platform) -> Result<BoundProvider, PlatformError> {
        if *platform != CUBIC_CHUNKS {
            return Err(PlatformError::UnsupportedPlatform {
                platform: platform.to_string(),
            });
        }
        Ok(BoundProvider {
            platform: &CUBIC_CHUNKS,
            locator: self.locator.clone(),
        })
    }
}

impl PlatformProvider for CubicChunksPlatformProvider {
    fn platforms(&self) -> &[&'static Platform] {
        static PLATFORMS: [&Platform; 1] = [&CUBIC_CHUNKS];
        &PLATFORMS
    }

    fn dimensions(
        &self,
        platform: &Platform,
        world_dir: &Path,
    ) -> Result<Vec<DimensionId>, PlatformError> {
        match self.bind(platform) {
            Ok(bound) => Ok(bound.dimensions(world_dir)?),
            Err(_) => Ok(Vec::new()),
        }
    }

    fn create_chunk(
        &self,
        platform: &Platform,
        x: i32,
        z: i32,
        max_height: i32,
    ) -> Result<VirtualColumn, PlatformError> {
        Ok(self.bind(platform)?.create_chunk(x, z, max_height))
    }

    fn chunk_store(
        &self,
        platform: &Platform,
        world_dir: &Path,
        dimension: DimensionId,
    ) -> Result<Box<dyn ChunkStore>, PlatformError> {
        Ok(Box::new(self.bind(platform)?.chunk_store(world_dir, dimension)))
    }

    fn exporter(
        &self,
        platform: &Platform,
        world: Arc<WorldModel>,
    ) -> Result<Box<dyn WorldExporter>, PlatformError> {
        Ok(Box::new(self.bind(platform)?.exporter(world)?))
    }

    fn post_processor(&self, platform: &Platform) -> Result<Box<dyn PostProcessor>, PlatformError> {
        Ok(Box::new(self.bind(platform)?.post_processor()))
    }

    fn default_export_dir(&self, _platform: &Platform) -> Option<PathBuf> {
        self.locator.default_export_dir()
    }

    fn map_recognizer(&self) -> Box<dyn MapRecognizer> {
        Box::new(CubicChunksMapRecognizer)
    }
}

/// A provider whose platform has already been checked.
#[derive(Debug, Clone)]
pub struct BoundProvider {
    platform: &'static Platform,
    locator: MinecraftLocator,
}

impl BoundProvider {
    /// The platform this provider was bound to.
    pub fn platform(&self) -> &'static Platform {
        self.platform
    }

    /// Canonical dimensions of the save at `world_dir`; empty when it is not a
    /// Cubic Chunks save.
    pub fn dimensions(&self, world_dir: &Path) -> Result<Vec<DimensionId>, WorldFormatError> {
        list_supported_dimensions(world_dir)
    }

    /// A new, empty, editable chunk column.
    pub fn create_chunk(&self, x: i32, z: i32, max_height: i32) -> VirtualColumn {
        VirtualColumn::new(x, z, max_height, EditMode::Editable)
    }

    /// A chunk store bound to one dimension of the world at `world_dir`.
    pub fn chunk_store(&self, world_dir: &Path, dimension: DimensionId) -> CubicChunkStore {
        CubicChunkStore::new(world_dir, dimension, DEFAULT_CUBE_CAPACITY)
    }

    /// An exporter bound to `world`. Fails when `world` was built for another
    /// platform.
    pub fn exporter(
        &self,
        world: Arc<WorldModel>,
    ) -> Result<CubicChunksWorldExporter, PlatformError> {
        if world.platform != self.platform {
            return Err(PlatformError::UnsupportedPlatform {
                platform: world.platform.to_string(),
            });
        }
        Ok(CubicChunksWorldExporter::new(world))
    }

    /// The post-processor to run after export.
    pub fn post_processor(&self) -> StandardPostProcessor {
        StandardPostProcessor
    }

    /// `<minecraft dir>/saves`, or `None` when it cannot be found.
    pub fn default_export_dir(&self) -> Option<PathBuf> {
        self.locator.default_export_dir()
    }
}

/// Registration record for the Cubic Chunks provider.
pub fn registration() -> PlatformRegistration {
    registration_with(CubicChunksPlatformProvider::new())
}

/// Registration record for a provider configured by the caller.
pub fn registration_with(provider: CubicChunksPlatformProvider) -> PlatformRegistration {
    PlatformRegistration {
        plugin_name: PLUGIN_NAME,
        version: PLUGIN_VERSION,
        provider: Arc::new(provider),
    }
}
