//! World-level format detection.

use std::path::Path;

use nbt::Value;

use crate::tag::{byte_leaf, read_gzip_tags, tag_kind};
use crate::WorldFormatError;

/// Root metadata file of every save.
pub const LEVEL_DAT: &str = "level.dat";

/// Compound inside `level.dat` holding the world properties.
pub const LEVEL_DATA_TAG: &str = "Data";

/// Byte leaf below [`LEVEL_DATA_TAG`] set to 1 by Cubic Chunks.
pub const IS_CUBIC_WORLD_TAG: &str = "isCubicWorld";

/// Decide whether `world_dir` holds a Cubic Chunks save.
///
/// A missing `level.dat`, or one without `Data.isCubicWorld` (every vanilla
/// save), simply means "not this format" and returns `Ok(false)`. A
/// `level.dat` that exists but cannot be decoded, lacks the `Data` compound,
/// or stores the flag as something other than a byte is a broken save and is
/// reported as an error rather than folded into `false`.
pub fn is_cubic_world(world_dir: &Path) -> Result<bool, WorldFormatError> {
    let level_dat = world_dir.join(LEVEL_DAT);
    let Some(blob) = read_gzip_tags(&level_dat)? else {
        tracing::debug!(path = %level_dat.display(), "no level.dat, not a cubic world");
        return Ok(false);
    };

    let data = match blob.get(LEVEL_DATA_TAG) {
        Some(Value::Compound(data)) => data,
        Some(other) => {
            return Err(WorldFormatError::Schema {
                path: level_dat,
                detail: format!(
                    "`{LEVEL_DATA_TAG}` is a {} tag, expected a compound",
                    tag_kind(other)
                ),
            })
        }
        None => {
            return Err(WorldFormatError::Schema {
                path: level_dat,
                detail: format!("missing `{LEVEL_DATA_TAG}` compound"),
            })
        }
    };

    match byte_leaf(data.get(IS_CUBIC_WORLD_TAG), IS_CUBIC_WORLD_TAG, &level_dat)? {
        Some(flag) => {
            let cubic = flag == 1;
            tracing::debug!(path = %level_dat.display(), flag, cubic, "read level.dat");
            Ok(cubic)
        }
        // Vanilla saves never write the flag.
        None => {
            tracing::debug!(path = %level_dat.display(), "no cubic world flag, not a cubic world");
            Ok(false)
        }
    }
}
