#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod dimension;
pub mod platform;

pub use dimension::{parse_dimension_dir, DimensionId, CUBIC_CHUNKS_DATA};
pub use platform::{Capabilities, GameType, Generator, Platform, CUBIC_CHUNKS, HOST_MAX_HEIGHT};
