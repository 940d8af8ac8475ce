#![warn(missing_docs)]
//! On-disk world inspection for Cubic Chunks saves.
//!
//! Detection and dimension scanning only read small gzip tag trees
//! (`level.dat` and the per-dimension marker). Chunk payloads are never
//! touched here; [`CubicChunkStore`] only keeps cubes resident in memory.

mod cube;
mod dimensions;
mod error;
mod level;
mod storage;
mod tag;

pub use cube::*;
pub use dimensions::*;
pub use error::*;
pub use level::*;
pub use storage::*;
