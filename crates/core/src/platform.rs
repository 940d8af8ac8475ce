//! Platform identities.
//!
//! A [`Platform`] names one on-disk storage format the editor can export to
//! and import from. Identities are built once as statics and compared by id,
//! so a `&'static Platform` can be passed around as a cheap token.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::DimensionId;

/// Tallest world the host editor can model, in blocks.
pub const HOST_MAX_HEIGHT: i32 = 4096;

bitflags! {
    /// Features a platform supports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u32 {
        /// Worlds are made of discrete blocks.
        const BLOCK_BASED = 1 << 0;
        /// Per-column biomes are stored.
        const BIOMES = 1 << 1;
        /// Light values are computed at export time.
        const PRECALCULATED_LIGHT = 1 << 2;
        /// The spawn point can be chosen.
        const SET_SPAWN_POINT = 1 << 3;
        /// Worlds carry a generator seed.
        const SEED = 1 << 4;
    }
}

/// Game modes a platform can be exported with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    /// Survival mode.
    Survival,
    /// Creative mode.
    Creative,
    /// Adventure mode.
    Adventure,
    /// Hardcore mode.
    Hardcore,
}

/// Terrain generators a platform can be exported with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Generator {
    /// The game's default generator.
    Default,
    /// Flat world generator.
    Flat,
}

/// Immutable identity and limits of a storage format.
#[derive(Debug)]
pub struct Platform {
    /// Globally unique id; equality is defined on this alone.
    pub id: &'static str,
    /// Name shown to users.
    pub display_name: &'static str,
    /// Largest selectable world height.
    pub max_max_height: i32,
    /// Height new worlds get by default.
    pub standard_max_height: i32,
    /// Smallest selectable world height.
    pub min_max_height: i32,
    /// Lowest chunk x coordinate.
    pub min_x: i32,
    /// Highest chunk x coordinate.
    pub max_x: i32,
    /// Lowest chunk z coordinate.
    pub min_z: i32,
    /// Highest chunk z coordinate.
    pub max_z: i32,
    /// Supported game modes.
    pub game_types: &'static [GameType],
    /// Supported generators.
    pub generators: &'static [Generator],
    /// Dimensions worlds of this platform may contain.
    pub dimensions: &'static [DimensionId],
    /// Supported features.
    pub capabilities: Capabilities,
}

impl Platform {
    /// Returns true when every flag in `capability` is supported.
    pub fn supports(&self, capability: Capabilities) -> bool {
        self.capabilities.contains(capability)
    }

    /// Returns true when worlds of this platform may contain `dimension`.
    pub fn supports_dimension(&self, dimension: DimensionId) -> bool {
        self.dimensions.contains(&dimension)
    }
}

impl PartialEq for Platform {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Platform {}

impl std::hash::Hash for Platform {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name, self.id)
    }
}

const CUBIC_MAX_HEIGHT: i32 = if HOST_MAX_HEIGHT < i32::MAX / 2 {
    HOST_MAX_HEIGHT
} else {
    i32::MAX / 2
};

/// The Cubic Chunks storage format for Minecraft 1.10.2 to 1.12.2.
///
/// The id keeps its historical spelling: saved editor worlds refer to it.
pub static CUBIC_CHUNKS: Platform = Platform {
    id: "io.github.oopencubicchunks.cubicchunks",
    display_name: "Cubic Chunks (1.10.2-1.12.2)",
    max_max_height: CUBIC_MAX_HEIGHT,
    standard_max_height: 256,
    min_max_height: 256,
    min_x: i32::MIN,
    max_x: i32::MAX,
    min_z: i32::MIN,
    max_z: i32::MAX,
    game_types: &[GameType::Survival, GameType::Creative],
    generators: &[Generator::Default],
    dimensions: &[DimensionId::Overworld, DimensionId::Nether, DimensionId::End],
    capabilities: Capabilities::BLOCK_BASED
        .union(Capabilities::BIOMES)
        .union(Capabilities::PRECALCULATED_LIGHT)
        .union(Capabilities::SET_SPAWN_POINT)
        .union(Capabilities::SEED),
};
