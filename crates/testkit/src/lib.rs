#![warn(missing_docs)]
//! On-disk world fixtures for tests.
//!
//! [`WorldFixture`] owns a scratch directory shaped like a save and writes the
//! gzip tag trees the detector and dimension scanner read. Builder methods
//! consume and return the fixture so a test can describe a world in one
//! expression.

use anyhow::{Context, Result};
use cubicworld_core::{DimensionId, CUBIC_CHUNKS_DATA};
use flate2::write::GzEncoder;
use flate2::Compression;
use nbt::{Blob, Value};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary world directory. Removed when dropped.
pub struct WorldFixture {
    dir: TempDir,
}

impl WorldFixture {
    /// Create an empty world directory.
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("cubicworld-fixture-")
            .tempdir()
            .context("failed to create fixture directory")?;
        Ok(Self { dir })
    }

    /// World root.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `level.dat` with `Data.isCubicWorld` set to `is_cubic_world`.
    pub fn level(self, is_cubic_world: i8) -> Result<Self> {
        let data = compound([("isCubicWorld", Value::Byte(is_cubic_world))]);
        self.level_blob(Some(data))
    }

    /// Write `level.dat` with a `Data` compound lacking `isCubicWorld`.
    pub fn level_without_flag(self) -> Result<Self> {
        let data = compound([("LevelName", Value::String("fixture".to_string()))]);
        self.level_blob(Some(data))
    }

    /// Write `level.dat` without any `Data` compound.
    pub fn level_without_data(self) -> Result<Self> {
        self.level_blob(None)
    }

    /// Create `dir_name` with a marker whose `isCubicChunks` is `flag`, or a
    /// marker without the leaf when `flag` is `None`.
    pub fn dimension(self, dir_name: &str, flag: Option<i8>) -> Result<Self> {
        let mut blob = Blob::new();
        blob.insert("version", Value::Int(1))?;
        if let Some(flag) = flag {
            blob.insert("isCubicChunks", Value::Byte(flag))?;
        }
        self.tags(&format!("{dir_name}/{CUBIC_CHUNKS_DATA}"), &blob)
    }

    /// Like [`WorldFixture::dimension`], naming the directory after `dimension`.
    /// The Overworld has no directory of its own, so its marker lands in `DIM0`.
    pub fn dimension_for(self, dimension: DimensionId, flag: Option<i8>) -> Result<Self> {
        let dir_name = dimension
            .directory_name()
            .unwrap_or_else(|| "DIM0".to_string());
        self.dimension(&dir_name, flag)
    }

    /// Create an empty directory below the world root.
    pub fn empty_dir(self, relative: &str) -> Result<Self> {
        let path = self.path().join(relative);
        fs::create_dir_all(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        Ok(self)
    }

    /// Write raw bytes to a file below the world root.
    pub fn file(self, relative: &str, bytes: &[u8]) -> Result<Self> {
        let path = self.prepare(relative)?;
        fs::write(&path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(self)
    }

    /// Write bytes that are not a gzip stream where a tag tree is expected.
    pub fn corrupt(self, relative: &str) -> Result<Self> {
        self.file(relative, b"this is not a gzip-compressed tag tree")
    }

    /// Write a gzip-compressed tag tree below the world root.
    pub fn tags(self, relative: &str, blob: &Blob) -> Result<Self> {
        let path = self.prepare(relative)?;
        write_gzip_blob(&path, blob)?;
        Ok(self)
    }

    fn level_blob(self, data: Option<Value>) -> Result<Self> {
        let mut blob = Blob::new();
        if let Some(data) = data {
            blob.insert("Data", data)?;
        }
        self.tags("level.dat", &blob)
    }

    fn prepare(&self, relative: &str) -> Result<PathBuf> {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        Ok(path)
    }
}

/// Build a compound tag from name/value pairs.
pub fn compound<const N: usize>(entries: [(&str, Value); N]) -> Value {
    Value::Compound(
        entries
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect(),
    )
}

/// Gzip-compress `blob` into `path`.
pub fn write_gzip_blob(path: &Path, blob: &Blob) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    blob.to_writer(&mut encoder)
        .with_context(|| format!("failed to encode {}", path.display()))?;
    encoder.finish()?.flush()?;
    Ok(())
}
