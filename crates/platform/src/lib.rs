#![warn(missing_docs)]
//! Cubic Chunks platform provider.
//!
//! The host editor registers a [`PlatformRegistration`] at startup and later
//! asks the matching [`PlatformProvider`] for format-specific components: a
//! chunk store, an exporter, a post-processor. Every factory checks the
//! platform token it is handed; [`BoundProvider`] does that check once.

mod error;
mod export;
mod postprocess;
mod provider;
mod recognizer;
mod registry;

pub use error::{PlatformError, RegistryError};
pub use export::{
    find_minecraft_dir_with, sanitize_world_name, CubicChunksWorldExporter, MinecraftLocator,
    WorldExporter, WorldModel, SAVES_DIR,
};
pub use postprocess::{PostProcessor, StandardPostProcessor};
pub use provider::{
    registration, registration_with, BoundProvider, CubicChunksPlatformProvider, PlatformProvider,
};
pub use recognizer::{CubicChunksMapRecognizer, MapRecognizer};
pub use registry::{PlatformRegistration, PlatformRegistry};

/// Name the provider registers under.
pub const PLUGIN_NAME: &str = "CubicChunksPlatform";

/// Provider version reported to the host.
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");
