//! Dimension identifiers.
//!
//! A save stores each dimension (Overworld, Nether, End) separately on disk.
//! The storage format numbers them by a signed directory suffix (`DIM-1`,
//! `DIM1`); the editor uses its own canonical ids. This module owns the
//! mapping between the two.

use serde::{Deserialize, Serialize};

/// Prefix shared by every dimension directory name.
pub const DIMENSION_DIR_PREFIX: &str = "DIM";

/// Marker file, relative to a dimension directory, written by Cubic Chunks.
pub const CUBIC_CHUNKS_DATA: &str = "data/cubicChunksData.dat";

/// Canonical identifier for a world dimension.
///
/// This is intentionally small (u8) and independent of the on-disk numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum DimensionId {
    /// The Overworld dimension.
    Overworld = 0,
    /// The Nether dimension.
    Nether = 1,
    /// The End dimension.
    End = 2,
}

impl DimensionId {
    /// Default (Overworld) dimension.
    pub const DEFAULT: Self = Self::Overworld;

    /// Every canonical dimension, in canonical id order.
    pub const ALL: [Self; 3] = [Self::Overworld, Self::Nether, Self::End];

    /// Convert to a stable numeric representation.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Try to convert from the stable numeric representation.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Overworld),
            1 => Some(Self::Nether),
            2 => Some(Self::End),
            _ => None,
        }
    }

    /// Canonical string key used in configs/logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overworld => "overworld",
            Self::Nether => "nether",
            Self::End => "end",
        }
    }

    /// Returns true when `raw` is a directory suffix with a canonical mapping.
    pub const fn is_supported_suffix(raw: i32) -> bool {
        matches!(raw, 0 | 1 | -1)
    }

    /// Checked conversion from an on-disk directory suffix.
    pub const fn from_raw_suffix(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Overworld),
            -1 => Some(Self::Nether),
            1 => Some(Self::End),
            _ => None,
        }
    }

    /// Map an on-disk suffix that has already been validated with
    /// [`DimensionId::is_supported_suffix`].
    ///
    /// # Panics
    ///
    /// Panics when `raw` is not one of `0`, `1` or `-1`. Callers filter their
    /// input first, so reaching the panic is a bug in the caller.
    pub fn to_canonical(raw: i32) -> Self {
        match Self::from_raw_suffix(raw) {
            Some(id) => id,
            None => panic!("dimension suffix {raw} has no canonical mapping"),
        }
    }

    /// The signed suffix used for this dimension's directory on disk.
    pub const fn raw_suffix(self) -> i32 {
        match self {
            Self::Overworld => 0,
            Self::Nether => -1,
            Self::End => 1,
        }
    }

    /// Directory name below the world root, or `None` for the Overworld,
    /// whose data lives at the world root itself.
    pub fn directory_name(self) -> Option<String> {
        match self {
            Self::Overworld => None,
            other => Some(format!("{DIMENSION_DIR_PREFIX}{}", other.raw_suffix())),
        }
    }
}

impl Default for DimensionId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for DimensionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a dimension directory name of the form `DIM<suffix>`.
///
/// The suffix is an optional `-` followed by one or more ASCII digits and must
/// fit in an `i32`. Anything else (a `+` sign, trailing characters, lowercase
/// prefix, overflow) yields `None`.
pub fn parse_dimension_dir(name: &str) -> Option<i32> {
    let suffix = name.strip_prefix(DIMENSION_DIR_PREFIX)?;
    let digits = suffix.strip_prefix('-').unwrap_or(suffix);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok()
}
