use cubicworld_world::WorldFormatError;
use thiserror::Error;

/// Errors returned by provider factories.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// A factory was handed a platform it does not serve. This is a caller
    /// bug, not a runtime condition.
    #[error("platform {platform} not supported")]
    UnsupportedPlatform {
        /// Display form of the offending platform.
        platform: String,
    },
    /// World metadata could not be read.
    #[error(transparent)]
    World(#[from] WorldFormatError),
}

/// Errors raised while registering providers.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two registrations claimed the same platform id.
    #[error("platform {id} is already registered by {plugin}")]
    DuplicatePlatform {
        /// Platform id claimed twice.
        id: String,
        /// Plugin that registered it first.
        plugin: String,
    },
}
