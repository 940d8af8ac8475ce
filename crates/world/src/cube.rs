use std::collections::BTreeMap;
use std::fmt;

/// Cube edge length in blocks.
pub const CUBE_SIZE: usize = 16;
/// Total block count per cube.
pub const CUBE_VOLUME: usize = CUBE_SIZE * CUBE_SIZE * CUBE_SIZE;

/// Block identifier.
pub type BlockId = u16;

/// Reserved ID for air.
pub const BLOCK_AIR: BlockId = 0;

/// Signed cube coordinates (block coordinates divided by 16).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubePos {
    /// Cube x.
    pub x: i32,
    /// Cube y. Cubic Chunks worlds are unbounded vertically.
    pub y: i32,
    /// Cube z.
    pub z: i32,
}

impl CubePos {
    /// Create a new cube position.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Cube containing the given block coordinates.
    pub fn containing_block(x: i32, y: i32, z: i32) -> Self {
        let size = CUBE_SIZE as i32;
        Self::new(x.div_euclid(size), y.div_euclid(size), z.div_euclid(size))
    }
}

impl fmt::Display for CubePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{},{}]", self.x, self.y, self.z)
    }
}

/// A 16x16x16 block section.
#[derive(Clone, PartialEq, Eq)]
pub struct Cube {
    pos: CubePos,
    blocks: Vec<BlockId>,
}

impl Cube {
    /// Create an all-air cube.
    pub fn new(pos: CubePos) -> Self {
        Self {
            pos,
            blocks: vec![BLOCK_AIR; CUBE_VOLUME],
        }
    }

    /// Cube position.
    pub fn position(&self) -> CubePos {
        self.pos
    }

    /// Block at local coordinates (each in `0..16`).
    pub fn block(&self, x: usize, y: usize, z: usize) -> BlockId {
        self.blocks[Self::index(x, y, z)]
    }

    /// Set the block at local coordinates (each in `0..16`).
    pub fn set_block(&mut self, x: usize, y: usize, z: usize, id: BlockId) {
        let idx = Self::index(x, y, z);
        self.blocks[idx] = id;
    }

    /// Returns true when every block is air.
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|&id| id == BLOCK_AIR)
    }

    #[inline]
    fn index(x: usize, y: usize, z: usize) -> usize {
        debug_assert!(x < CUBE_SIZE && y < CUBE_SIZE && z < CUBE_SIZE);
        (y * CUBE_SIZE + z) * CUBE_SIZE + x
    }
}

impl fmt::Debug for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let solid = self.blocks.iter().filter(|&&id| id != BLOCK_AIR).count();
        f.debug_struct("Cube")
            .field("pos", &self.pos)
            .field("solid", &solid)
            .finish()
    }
}

/// Whether a column accepts edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Blocks may be changed.
    Editable,
    /// Blocks are fixed.
    ReadOnly,
}

/// An in-memory 16x16 column of cubes, as handed to the editor for painting.
///
/// Cubes are created lazily the first time a block in them is set.
#[derive(Debug, Clone)]
pub struct VirtualColumn {
    x: i32,
    z: i32,
    max_height: i32,
    edit_mode: EditMode,
    cubes: BTreeMap<i32, Cube>,
}

impl VirtualColumn {
    /// Create an empty column at chunk coordinates `(x, z)` holding blocks
    /// with `0 <= y < max_height`.
    pub fn new(x: i32, z: i32, max_height: i32, edit_mode: EditMode) -> Self {
        Self {
            x,
            z,
            max_height: max_height.max(0),
            edit_mode,
            cubes: BTreeMap::new(),
        }
    }

    /// Chunk x coordinate.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Chunk z coordinate.
    pub fn z(&self) -> i32 {
        self.z
    }

    /// Exclusive upper block y.
    pub fn max_height(&self) -> i32 {
        self.max_height
    }

    /// Current edit mode.
    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode
    }

    /// Block at local `x`/`z` (each in `0..16`) and absolute `y`.
    pub fn block(&self, x: usize, y: i32, z: usize) -> BlockId {
        if !(0..self.max_height).contains(&y) {
            return BLOCK_AIR;
        }
        let (cube_y, local_y) = split_y(y);
        self.cubes
            .get(&cube_y)
            .map_or(BLOCK_AIR, |cube| cube.block(x, local_y, z))
    }

    /// Set a block. Returns false when the column is read-only or `y` is out
    /// of range.
    pub fn set_block(&mut self, x: usize, y: i32, z: usize, id: BlockId) -> bool {
        if self.edit_mode == EditMode::ReadOnly || !(0..self.max_height).contains(&y) {
            return false;
        }
        let (cube_y, local_y) = split_y(y);
        let pos = CubePos::new(self.x, cube_y, self.z);
        self.cubes
            .entry(cube_y)
            .or_insert_with(|| Cube::new(pos))
            .set_block(x, local_y, z, id);
        true
    }

    /// Cubes created so far, bottom to top.
    pub fn cubes(&self) -> impl Iterator<Item = &Cube> + '_ {
        self.cubes.values()
    }
}

fn split_y(y: i32) -> (i32, usize) {
    let size = CUBE_SIZE as i32;
    (y.div_euclid(size), y.rem_euclid(size) as usize)
}
