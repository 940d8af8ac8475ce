//! cubicworld - inspect Cubic Chunks saves from the command line

mod config;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::{ToolConfig, DEFAULT_CONFIG_PATH};
use cubicworld_core::{DimensionId, GameType, Generator, Platform, CUBIC_CHUNKS};
use cubicworld_platform::{
    registration_with, CubicChunksPlatformProvider, MinecraftLocator, PlatformProvider,
    PlatformRegistry, PLUGIN_NAME, PLUGIN_VERSION,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect Cubic Chunks Minecraft saves", long_about = None)]
struct Args {
    /// Configuration file (TOML)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report whether a save directory is a Cubic Chunks world
    Detect {
        /// Save directory (the one holding level.dat)
        world: PathBuf,
    },
    /// List the dimensions a Cubic Chunks save contains
    Dimensions {
        /// Save directory (the one holding level.dat)
        world: PathBuf,
        /// Print JSON instead of one dimension per line
        #[arg(long)]
        json: bool,
    },
    /// Print the directory worlds are exported to by default
    ExportDir,
    /// Describe the registered platform
    Platform {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Serialize)]
struct PlatformSummary {
    id: &'static str,
    display_name: &'static str,
    plugin: &'static str,
    version: &'static str,
    standard_max_height: i32,
    min_max_height: i32,
    max_max_height: i32,
    game_types: &'static [GameType],
    generators: &'static [Generator],
    dimensions: &'static [DimensionId],
}

impl PlatformSummary {
    fn new(platform: &'static Platform) -> Self {
        Self {
            id: platform.id,
            display_name: platform.display_name,
            plugin: PLUGIN_NAME,
            version: PLUGIN_VERSION,
            standard_max_height: platform.standard_max_height,
            min_max_height: platform.min_max_height,
            max_max_height: platform.max_max_height,
            game_types: platform.game_types,
            generators: platform.generators,
            dimensions: platform.dimensions,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Config warnings are printed before the real subscriber exists.
    let bootstrap = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("warn"))
        .finish();
    let config = tracing::subscriber::with_default(bootstrap, || {
        ToolConfig::load_from_path(&args.config)
    });

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.log_filter))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting cubicworld v{}", env!("CARGO_PKG_VERSION"));
    run(args.command, &config)
}

fn run(command: Command, config: &ToolConfig) -> Result<()> {
    let registry = build_registry(config)?;
    match command {
        Command::Detect { world } => detect(&registry, &world),
        Command::Dimensions { world, json } => dimensions(&registry, &world, json),
        Command::ExportDir => export_dir(&registry),
        Command::Platform { json } => platform(&registry, json),
    }
}

fn build_registry(config: &ToolConfig) -> Result<PlatformRegistry> {
    let locator = match &config.minecraft_dir {
        Some(dir) => MinecraftLocator::Fixed(dir.clone()),
        None => MinecraftLocator::System,
    };
    let mut registry = PlatformRegistry::new();
    registry
        .register(registration_with(
            CubicChunksPlatformProvider::with_locator(locator),
        ))
        .context("Failed to register the Cubic Chunks platform")?;
    Ok(registry)
}

fn cubic_provider(registry: &PlatformRegistry) -> Result<&Arc<dyn PlatformProvider>> {
    registry
        .provider_for(&CUBIC_CHUNKS)
        .with_context(|| format!("No provider registered for {CUBIC_CHUNKS}"))
}

fn detect(registry: &PlatformRegistry, world: &Path) -> Result<()> {
    let found = registry
        .recognize(world)
        .with_context(|| format!("Failed to inspect {}", world.display()))?;
    match found {
        Some(platform) => println!("{}: {}", world.display(), platform),
        None => println!("{}: not a Cubic Chunks world", world.display()),
    }
    Ok(())
}

fn dimensions(registry: &PlatformRegistry, world: &Path, json: bool) -> Result<()> {
    let dims = cubic_provider(registry)?
        .dimensions(&CUBIC_CHUNKS, world)
        .with_context(|| format!("Failed to list dimensions of {}", world.display()))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&dims)?);
    } else if dims.is_empty() {
        println!("{}: not a Cubic Chunks world", world.display());
    } else {
        for dim in dims {
            let dir = match dim.directory_name() {
                Some(name) => world.join(name),
                None => world.to_path_buf(),
            };
            println!("{dim}\t{}", dir.display());
        }
    }
    Ok(())
}

fn export_dir(registry: &PlatformRegistry) -> Result<()> {
    match cubic_provider(registry)?.default_export_dir(&CUBIC_CHUNKS) {
        Some(dir) => println!("{}", dir.display()),
        None => println!("Minecraft directory not found; set minecraft_dir in the config"),
    }
    Ok(())
}

fn platform(registry: &PlatformRegistry, json: bool) -> Result<()> {
    for platform in registry.platforms() {
        let summary = PlatformSummary::new(platform);
        if json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            println!("{} {}", summary.plugin, summary.version);
            println!("  id:          {}", summary.id);
            println!("  name:        {}", summary.display_name);
            println!(
                "  heights:     {} (min {}, max {})",
                summary.standard_max_height, summary.min_max_height, summary.max_max_height
            );
            let dims: Vec<_> = summary.dimensions.iter().map(|d| d.as_str()).collect();
            println!("  dimensions:  {}", dims.join(", "));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubicworld_testkit::WorldFixture;

    #[test]
    fn parses_subcommands_and_global_config() {
        let args = Args::try_parse_from(["cubicworld", "dimensions", "saves/w", "--json"]).unwrap();
        assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        match args.command {
            Command::Dimensions { world, json } => {
                assert_eq!(world, PathBuf::from("saves/w"));
                assert!(json);
            }
            other => panic!("unexpected command {other:?}"),
        }

        let args =
            Args::try_parse_from(["cubicworld", "export-dir", "--config", "alt.toml"]).unwrap();
        assert_eq!(args.config, PathBuf::from("alt.toml"));
        assert!(matches!(args.command, Command::ExportDir));

        assert!(Args::try_parse_from(["cubicworld", "detect"]).is_err());
    }

    #[test]
    fn configured_minecraft_dir_drives_export_dir() {
        let mc = tempfile::tempdir().unwrap();
        let config = ToolConfig {
            minecraft_dir: Some(mc.path().to_path_buf()),
            ..ToolConfig::default()
        };
        let registry = build_registry(&config).unwrap();
        let provider = cubic_provider(&registry).unwrap();
        assert_eq!(
            provider.default_export_dir(&CUBIC_CHUNKS),
            Some(mc.path().join("saves"))
        );
    }

    #[test]
    fn commands_run_against_fixture_world() {
        let world = WorldFixture::new()
            .and_then(|w| w.level(1))
            .and_then(|w| w.dimension("DIM-1", Some(1)))
            .unwrap();
        let registry = build_registry(&ToolConfig::default()).unwrap();
        detect(&registry, world.path()).unwrap();
        dimensions(&registry, world.path(), true).unwrap();
        dimensions(&registry, world.path(), false).unwrap();
        platform(&registry, true).unwrap();
    }

    #[test]
    fn corrupt_level_dat_is_fatal() {
        let world = WorldFixture::new().and_then(|w| w.corrupt("level.dat")).unwrap();
        let registry = build_registry(&ToolConfig::default()).unwrap();
        let err = dimensions(&registry, world.path(), false).unwrap_err();
        assert!(format!("{err:#}").contains("level.dat"), "{err:#}");
    }
}
