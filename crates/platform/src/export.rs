//! Export targets: the world model an exporter is bound to and the default
//! save location.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cubicworld_core::{DimensionId, Platform};
use cubicworld_world::dimension_dir;

/// Directory below the Minecraft directory holding saves.
pub const SAVES_DIR: &str = "saves";

/// In-memory world the editor exports.
#[derive(Debug, Clone)]
pub struct WorldModel {
    /// World name; also the save directory name after sanitising.
    pub name: String,
    /// Platform the world is meant for.
    pub platform: &'static Platform,
    /// Exclusive upper block y.
    pub max_height: i32,
    /// Generator seed, if the world has one.
    pub seed: Option<i64>,
    /// Dimensions the world contains.
    pub dimensions: Vec<DimensionId>,
}

impl WorldModel {
    /// A world with the platform's standard height and just an Overworld.
    pub fn new(name: impl Into<String>, platform: &'static Platform) -> Self {
        Self {
            name: name.into(),
            platform,
            max_height: platform.standard_max_height,
            seed: None,
            dimensions: vec![DimensionId::Overworld],
        }
    }
}

/// Handle the export pipeline drives to write a world.
pub trait WorldExporter: Send + Sync {
    /// World being exported.
    fn world(&self) -> &WorldModel;

    /// Platform the exporter writes.
    fn platform(&self) -> &'static Platform;

    /// Save directory below `base_dir` the world is written to.
    fn world_dir(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(sanitize_world_name(&self.world().name))
    }

    /// Directory a given dimension of the export ends up in.
    fn dimension_dir(&self, base_dir: &Path, dimension: DimensionId) -> PathBuf {
        dimension_dir(&self.world_dir(base_dir), dimension)
    }
}

/// Exporter for Cubic Chunks saves.
#[derive(Debug, Clone)]
pub struct CubicChunksWorldExporter {
    world: Arc<WorldModel>,
}

impl CubicChunksWorldExporter {
    /// Bind an exporter to `world`.
    pub fn new(world: Arc<WorldModel>) -> Self {
        Self { world }
    }
}

impl WorldExporter for CubicChunksWorldExporter {
    fn world(&self) -> &WorldModel {
        &self.world
    }

    fn platform(&self) -> &'static Platform {
        self.world.platform
    }
}

/// Turn a world name into a directory name valid on every host OS.
pub fn sanitize_world_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim_matches('.');
    if cleaned.is_empty() {
        "world".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Where to look for the Minecraft directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MinecraftLocator {
    /// The conventional location for the running OS.
    #[default]
    System,
    /// An explicit directory (from configuration).
    Fixed(PathBuf),
}

impl MinecraftLocator {
    /// The Minecraft directory, if it exists.
    pub fn minecraft_dir(&self) -> Option<PathBuf> {
        match self {
            Self::System => find_minecraft_dir_with(env::consts::OS, |key| env::var_os(key)),
            Self::Fixed(dir) => Some(dir.clone()).filter(|dir| dir.is_dir()),
        }
    }

    /// `<minecraft dir>/saves`, or `None` when the Minecraft directory cannot
    /// be found.
    pub fn default_export_dir(&self) -> Option<PathBuf> {
        let dir = self.minecraft_dir().map(|dir| dir.join(SAVES_DIR));
        if dir.is_none() {
            tracing::debug!(locator = ?self, "minecraft directory not found");
        }
        dir
    }
}

/// Locate the Minecraft directory for `os` (as in [`std::env::consts::OS`]),
/// reading environment variables through `var`.
pub fn find_minecraft_dir_with<F>(os: &str, var: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    let dir = match os {
        "windows" => PathBuf::from(var("APPDATA")?).join(".minecraft"),
        "macos" => PathBuf::from(var("HOME")?)
            .join("Library")
            .join("Application Support")
            .join("minecraft"),
        _ => PathBuf::from(var("HOME")?).join(".minecraft"),
    };
    dir.is_dir().then_some(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubicworld_core::CUBIC_CHUNKS;
    use std::fs;

    fn env_with(key: &'static str, value: &Path) -> impl Fn(&str) -> Option<OsString> {
        let value = value.as_os_str().to_os_string();
        move |k: &str| (k == key).then(|| value.clone())
    }

    #[test]
    fn finds_existing_minecraft_dir_per_os() {
        let home = tempfile::tempdir().unwrap();
        fs::create_dir_all(home.path().join(".minecraft")).unwrap();
        fs::create_dir_all(home.path().join("Library/Application Support/minecraft")).unwrap();

        assert_eq!(
            find_minecraft_dir_with("linux", env_with("HOME", home.path())),
            Some(home.path().join(".minecraft"))
        );
        assert_eq!(
            find_minecraft_dir_with("macos", env_with("HOME", home.path())),
            Some(home.path().join("Library/Application Support/minecraft"))
        );
        assert_eq!(
            find_minecraft_dir_with("windows", env_with("APPDATA", home.path())),
            Some(home.path().join(".minecraft"))
        );
    }

    #[test]
    fn missing_minecraft_dir_is_none() {
        let home = tempfile::tempdir().unwrap();
        assert_eq!(find_minecraft_dir_with("linux", env_with("HOME", home.path())), None);
        assert_eq!(find_minecraft_dir_with("linux", |_| None), None);
        assert_eq!(find_minecraft_dir_with("windows", env_with("HOME", home.path())), None);
    }

    #[test]
    fn fixed_locator_points_at_saves() {
        let dir = tempfile::tempdir().unwrap();
        let locator = MinecraftLocator::Fixed(dir.path().to_path_buf());
        assert_eq!(locator.default_export_dir(), Some(dir.path().join(SAVES_DIR)));

        let gone = MinecraftLocator::Fixed(dir.path().join("missing"));
        assert_eq!(gone.default_export_dir(), None);
    }

    #[test]
    fn world_names_are_sanitised() {
        assert_eq!(sanitize_world_name("My World"), "My World");
        assert_eq!(sanitize_world_name("a/b\\c:d"), "a_b_c_d");
        assert_eq!(sanitize_world_name("  ..  "), "world");
        assert_eq!(sanitize_world_name(""), "world");
    }

    #[test]
    fn exporter_targets_world_and_dimension_dirs() {
        let world = Arc::new(WorldModel::new("Island: v2", &CUBIC_CHUNKS));
        let exporter = CubicChunksWorldExporter::new(world);
        let base = Path::new("/saves");
        assert_eq!(exporter.world_dir(base), base.join("Island_ v2"));
        assert_eq!(
            exporter.dimension_dir(base, DimensionId::Nether),
            base.join("Island_ v2").join("DIM-1")
        );
        assert_eq!(exporter.platform(), &CUBIC_CHUNKS);
        assert_eq!(exporter.world().max_height, 256);
    }
}
