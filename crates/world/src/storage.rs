use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use lru::LruCache;

use cubicworld_core::DimensionId;

use crate::{Cube, CubePos};

/// Cube capacity handed out by the platform provider: large but finite.
pub const DEFAULT_CUBE_CAPACITY: usize = (i32::MAX / 2) as usize;

/// Handle to the cubes of one dimension of one world.
pub trait ChunkStore: Send {
    /// World root the store is bound to.
    fn world_dir(&self) -> &Path;

    /// Dimension the store is bound to.
    fn dimension(&self) -> DimensionId;

    /// Maximum number of resident cubes.
    fn capacity(&self) -> usize;

    /// Number of resident cubes.
    fn len(&self) -> usize;

    /// Returns true when no cubes are resident.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch a cube immutably.
    fn get(&self, pos: CubePos) -> Option<&Cube>;

    /// Fetch a cube mutably (without creating it).
    fn get_mut(&mut self, pos: CubePos) -> Option<&mut Cube>;

    /// Obtain mutable access to a cube, creating it if necessary.
    fn ensure(&mut self, pos: CubePos) -> &mut Cube;

    /// Drop a resident cube.
    fn remove(&mut self, pos: CubePos) -> Option<Cube>;

    /// Resident cube positions in ascending order.
    fn positions(&self) -> Vec<CubePos>;
}

/// Directory holding `dimension`'s data below `world_dir`.
pub fn dimension_dir(world_dir: &Path, dimension: DimensionId) -> PathBuf {
    match dimension.directory_name() {
        Some(name) => world_dir.join(name),
        None => world_dir.to_path_buf(),
    }
}

/// In-memory cube arena for a Cubic Chunks dimension with an LRU eviction
/// policy. Uses a BTreeMap for deterministic iteration order.
pub struct CubicChunkStore {
    world_dir: PathBuf,
    dimension: DimensionId,
    cubes: BTreeMap<CubePos, Cube>,
    lru: LruCache<CubePos, ()>,
    capacity: usize,
}

impl CubicChunkStore {
    /// Bind a store to `dimension` of the world at `world_dir`.
    ///
    /// Nothing is read from disk; the recency index grows on demand, so a huge
    /// `capacity` costs nothing up front.
    pub fn new(world_dir: impl Into<PathBuf>, dimension: DimensionId, capacity: usize) -> Self {
        let world_dir = world_dir.into();
        tracing::debug!(
            world = %world_dir.display(),
            %dimension,
            capacity,
            "opened cubic chunk store"
        );
        Self {
            world_dir,
            dimension,
            cubes: BTreeMap::new(),
            lru: LruCache::unbounded(),
            capacity: capacity.max(1),
        }
    }

    /// Directory this store's dimension lives in.
    pub fn dimension_dir(&self) -> PathBuf {
        dimension_dir(&self.world_dir, self.dimension)
    }

    fn touch(&mut self, pos: CubePos) {
        self.lru.put(pos, ());
    }

    fn evict_if_needed(&mut self) {
        while self.cubes.len() >= self.capacity {
            if let Some((oldest, _)) = self.lru.pop_lru() {
                self.cubes.remove(&oldest);
            } else {
                break;
            }
        }
    }
}

impl ChunkStore for CubicChunkStore {
    fn world_dir(&self) -> &Path {
        &self.world_dir
    }

    fn dimension(&self) -> DimensionId {
        self.dimension
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn len(&self) -> usize {
        self.cubes.len()
    }

    fn get(&self, pos: CubePos) -> Option<&Cube> {
        self.cubes.get(&pos)
    }

    fn get_mut(&mut self, pos: CubePos) -> Option<&mut Cube> {
        if self.cubes.contains_key(&pos) {
            self.touch(pos);
        }
        self.cubes.get_mut(&pos)
    }

    fn ensure(&mut self, pos: CubePos) -> &mut Cube {
        if !self.cubes.contains_key(&pos) {
            self.evict_if_needed();
        }
        self.touch(pos);
        self.cubes.entry(pos).or_insert_with(|| Cube::new(pos))
    }

    fn remove(&mut self, pos: CubePos) -> Option<Cube> {
        self.lru.pop(&pos);
        self.cubes.remove(&pos)
    }

    fn positions(&self) -> Vec<CubePos> {
        self.cubes.keys().copied().collect()
    }
}
