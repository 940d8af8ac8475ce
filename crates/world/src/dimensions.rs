//! Dimension discovery inside a Cubic Chunks save.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use cubicworld_core::{parse_dimension_dir, DimensionId};

use crate::tag::{byte_leaf, read_gzip_tags};
use crate::{is_cubic_world, WorldFormatError};

pub use cubicworld_core::CUBIC_CHUNKS_DATA;

/// Root byte leaf of [`CUBIC_CHUNKS_DATA`] set to 1 for cubic dimensions.
pub const IS_CUBIC_CHUNKS_TAG: &str = "isCubicChunks";

/// A dimension found during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionDescriptor {
    /// Signed suffix from the directory name (0 for the Overworld).
    pub raw_suffix: i32,
    /// Canonical id the suffix maps to.
    pub canonical_id: DimensionId,
    /// Directory holding the dimension's data.
    pub path: PathBuf,
}

/// Returns true when `dimension_dir` carries a marker with `isCubicChunks == 1`.
///
/// A missing marker is not an error: a dimension directory that has not been
/// saved yet has no chunks either, so skipping it loses nothing.
pub fn is_cubic_chunks_dimension(dimension_dir: &Path) -> Result<bool, WorldFormatError> {
    let marker = dimension_dir.join(CUBIC_CHUNKS_DATA);
    let Some(blob) = read_gzip_tags(&marker)? else {
        tracing::debug!(path = %dimension_dir.display(), "no cubic chunks marker");
        return Ok(false);
    };
    let flag = byte_leaf(blob.get(IS_CUBIC_CHUNKS_TAG), IS_CUBIC_CHUNKS_TAG, &marker)?;
    Ok(flag == Some(1))
}

/// List the supported dimensions of a save already known to be Cubic Chunks.
///
/// The Overworld is always present: its data lives at the world root rather
/// than in a `DIM0` directory. `DIM<n>` directories qualify when their marker
/// says so; suffixes other than 0, 1 and -1 are dropped. Any marker that exists
/// but cannot be read aborts the whole scan. Results are ordered by suffix.
pub fn scan_dimensions(world_dir: &Path) -> Result<Vec<DimensionDescriptor>, WorldFormatError> {
    let list_err = |source| WorldFormatError::ListDir {
        path: world_dir.to_path_buf(),
        source,
    };

    let mut found: BTreeMap<i32, PathBuf> = BTreeMap::new();
    for entry in fs::read_dir(world_dir).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        let path = entry.path();
        let Some(raw) = entry.file_name().to_str().and_then(parse_dimension_dir) else {
            continue;
        };
        if !path.is_dir() {
            continue;
        }
        // Markers are read before the suffix filter: a broken marker under any
        // `DIM<n>` directory means a broken save, even for suffixes we drop.
        if !is_cubic_chunks_dimension(&path)? {
            tracing::debug!(path = %path.display(), "skipping non-cubic dimension directory");
            continue;
        }
        if !DimensionId::is_supported_suffix(raw) {
            tracing::debug!(raw, path = %path.display(), "skipping unsupported dimension");
            continue;
        }
        found.insert(raw, path);
    }
    // The Overworld is stored at the root even when a DIM0 directory exists.
    found.insert(0, world_dir.to_path_buf());

    Ok(found
        .into_iter()
        .map(|(raw_suffix, path)| DimensionDescriptor {
            raw_suffix,
            canonical_id: DimensionId::to_canonical(raw_suffix),
            path,
        })
        .collect())
}

/// Canonical dimensions of `world_dir`, or an empty list when it is not a
/// Cubic Chunks save.
pub fn list_supported_dimensions(world_dir: &Path) -> Result<Vec<DimensionId>, WorldFormatError> {
    if !is_cubic_world(world_dir)? {
        return Ok(Vec::new());
    }
    let dimensions: Vec<DimensionId> = scan_dimensions(world_dir)?
        .into_iter()
        .map(|descriptor| descriptor.canonical_id)
        .collect();
    tracing::info!(
        world = %world_dir.display(),
        count = dimensions.len(),
        ?dimensions,
        "resolved cubic chunks dimensions"
    );
    Ok(dimensions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubicworld_testkit::WorldFixture;

    fn cubic_world() -> WorldFixture {
        WorldFixture::new().and_then(|w| w.level(1)).expect("fixture")
    }

    fn suffixes(descriptors: &[DimensionDescriptor]) -> Vec<i32> {
        descriptors.iter().map(|d| d.raw_suffix).collect()
    }

    #[test]
    fn overworld_is_always_present() {
        let world = cubic_world();
        let dims = scan_dimensions(world.path()).unwrap();
        assert_eq!(dims.len(), 1);
        assert_eq!(dims[0].canonical_id, DimensionId::Overworld);
        assert_eq!(dims[0].path, world.path());
    }

    #[test]
    fn marked_nether_is_found() {
        let world = cubic_world().dimension("DIM-1", Some(1)).expect("fixture");
        let dims = scan_dimensions(world.path()).unwrap();
        assert_eq!(suffixes(&dims), vec![-1, 0]);
        assert_eq!(dims[0].canonical_id, DimensionId::Nether);
        assert_eq!(dims[0].path, world.path().join("DIM-1"));
    }

    #[test]
    fn directories_without_marker_are_skipped() {
        let world = cubic_world()
            .dimension("DIM1", Some(1))
            .and_then(|w| w.empty_dir("DIM5"))
            .and_then(|w| w.empty_dir("DIM-1"))
            .expect("fixture");
        let dims = scan_dimensions(world.path()).unwrap();
        assert_eq!(suffixes(&dims), vec![0, 1]);
        assert_eq!(dims[1].canonical_id, DimensionId::End);
    }

    #[test]
    fn unsupported_suffixes_are_dropped_even_when_marked() {
        let world = cubic_world()
            .dimension("DIM5", Some(1))
            .and_then(|w| w.dimension("DIM-42", Some(1)))
            .expect("fixture");
        assert_eq!(suffixes(&scan_dimensions(world.path()).unwrap()), vec![0]);
    }

    #[test]
    fn marker_without_flag_or_with_zero_is_skipped() {
        let world = cubic_world()
            .dimension("DIM1", None)
            .and_then(|w| w.dimension("DIM-1", Some(0)))
            .expect("fixture");
        assert_eq!(suffixes(&scan_dimensions(world.path()).unwrap()), vec![0]);
    }

    #[test]
    fn non_dimension_entries_are_ignored() {
        let world = cubic_world()
            .empty_dir("region")
            .and_then(|w| w.empty_dir("DIMx"))
            .and_then(|w| w.empty_dir("dim1"))
            .and_then(|w| w.file("DIM1", b"not a directory"))
            .expect("fixture");
        assert_eq!(suffixes(&scan_dimensions(world.path()).unwrap()), vec![0]);
    }

    #[test]
    fn dim0_directory_does_not_duplicate_overworld() {
        let world = cubic_world().dimension("DIM0", Some(1)).expect("fixture");
        let dims = scan_dimensions(world.path()).unwrap();
        assert_eq!(suffixes(&dims), vec![0]);
        assert_eq!(dims[0].path, world.path());
    }

    #[test]
    fn corrupt_marker_aborts_the_scan() {
        let world = cubic_world()
            .dimension("DIM1", Some(1))
            .and_then(|w| w.corrupt(&format!("DIM-1/{CUBIC_CHUNKS_DATA}")))
            .expect("fixture");
        let err = scan_dimensions(world.path()).expect_err("corrupt marker must fail");
        assert!(matches!(err, WorldFormatError::Decode { .. }));
        assert!(err.path().ends_with(CUBIC_CHUNKS_DATA));
    }

    #[test]
    fn corrupt_marker_of_unsupported_suffix_still_aborts() {
        let world = cubic_world()
            .dimension("DIM-1", Some(1))
            .and_then(|w| w.corrupt(&format!("DIM5/{CUBIC_CHUNKS_DATA}")))
            .expect("fixture");
        let err = scan_dimensions(world.path()).expect_err("corrupt marker must fail");
        assert!(err.path().starts_with(world.path().join("DIM5")));
    }

    #[test]
    fn list_is_empty_for_non_cubic_world() {
        let world = WorldFixture::new()
            .and_then(|w| w.level(0))
            .and_then(|w| w.dimension("DIM-1", Some(1)))
            .and_then(|w| w.dimension("DIM1", Some(1)))
            .expect("fixture");
        assert!(list_supported_dimensions(world.path()).unwrap().is_empty());
    }

    #[test]
    fn list_is_empty_without_level_dat() {
        let world = WorldFixture::new()
            .and_then(|w| w.dimension("DIM-1", Some(1)))
            .expect("fixture");
        assert!(list_supported_dimensions(world.path()).unwrap().is_empty());
    }

    #[test]
    fn list_maps_to_canonical_ids() {
        let world = cubic_world().dimension("DIM-1", Some(1)).expect("fixture");
        let mut dims = list_supported_dimensions(world.path()).unwrap();
        dims.sort();
        assert_eq!(dims, vec![DimensionId::Overworld, DimensionId::Nether]);
    }
}
