use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use cubicworld_core::{Capabilities, DimensionId, GameType, Generator, Platform, CUBIC_CHUNKS};
use cubicworld_platform::{registration, PlatformError, PlatformRegistry, WorldModel};
use cubicworld_testkit::WorldFixture;
use cubicworld_world::{
    is_cubic_world, list_supported_dimensions, scan_dimensions, CUBIC_CHUNKS_DATA,
};

static FOREIGN: Platform = Platform {
    id: "org.minecraft.anvil",
    display_name: "Anvil",
    max_max_height: 256,
    standard_max_height: 256,
    min_max_height: 256,
    min_x: i32::MIN,
    max_x: i32::MAX,
    min_z: i32::MIN,
    max_z: i32::MAX,
    game_types: &[GameType::Survival],
    generators: &[Generator::Default],
    dimensions: &[DimensionId::Overworld],
    capabilities: Capabilities::BLOCK_BASED,
};

fn dimension_set(dims: Vec<DimensionId>) -> BTreeSet<DimensionId> {
    dims.into_iter().collect()
}

fn registry() -> PlatformRegistry {
    let mut registry = PlatformRegistry::new();
    registry.register(registration()).expect("register");
    registry
}

#[test]
fn world_without_level_dat_is_not_cubic() {
    let world = WorldFixture::new().expect("fixture");
    assert!(!is_cubic_world(world.path()).unwrap());
    assert!(list_supported_dimensions(world.path()).unwrap().is_empty());
}

#[test]
fn level_flag_decides_detection() {
    let on = WorldFixture::new().and_then(|w| w.level(1)).unwrap();
    let off = WorldFixture::new().and_then(|w| w.level(0)).unwrap();
    assert!(is_cubic_world(on.path()).unwrap());
    assert!(!is_cubic_world(off.path()).unwrap());
}

#[test]
fn end_is_listed_and_unmarked_dimension_is_skipped() {
    let world = WorldFixture::new()
        .and_then(|w| w.level(1))
        .and_then(|w| w.dimension("DIM1", Some(1)))
        .and_then(|w| w.empty_dir("DIM5"))
        .unwrap();

    let descriptors = scan_dimensions(world.path()).unwrap();
    assert!(descriptors.iter().all(|d| d.raw_suffix != 5));

    let dims = list_supported_dimensions(world.path()).unwrap();
    assert_eq!(dims.len(), 2);
    assert_eq!(
        dimension_set(dims),
        BTreeSet::from([DimensionId::Overworld, DimensionId::End])
    );
}

#[test]
fn nether_world_lists_exactly_overworld_and_nether() {
    let world = WorldFixture::new()
        .and_then(|w| w.level(1))
        .and_then(|w| w.dimension("DIM-1", Some(1)))
        .unwrap();

    let registry = registry();
    let provider = registry.provider_for(&CUBIC_CHUNKS).expect("provider");
    let dims = provider.dimensions(&CUBIC_CHUNKS, world.path()).unwrap();
    assert_eq!(dims.len(), 2);
    assert_eq!(
        dimension_set(dims),
        BTreeSet::from([DimensionId::Overworld, DimensionId::Nether])
    );
}

#[test]
fn overworld_needs_no_directory_of_its_own() {
    let bare = WorldFixture::new().and_then(|w| w.level(1)).unwrap();
    assert_eq!(
        list_supported_dimensions(bare.path()).unwrap(),
        vec![DimensionId::Overworld]
    );

    let with_dim0 = WorldFixture::new()
        .and_then(|w| w.level(1))
        .and_then(|w| w.dimension_for(DimensionId::Overworld, Some(1)))
        .unwrap();
    let descriptors = scan_dimensions(with_dim0.path()).unwrap();
    assert_eq!(descriptors.len(), 1);
    assert_eq!(descriptors[0].path, with_dim0.path());
}

#[test]
fn non_cubic_world_ignores_dimension_directories() {
    let world = WorldFixture::new()
        .and_then(|w| w.level(0))
        .and_then(|w| w.dimension("DIM-1", Some(1)))
        .and_then(|w| w.dimension("DIM1", Some(1)))
        .unwrap();
    assert!(list_supported_dimensions(world.path()).unwrap().is_empty());
}

#[test]
fn vanilla_save_is_not_cubic_anywhere() {
    let world = WorldFixture::new()
        .and_then(|w| w.level_without_flag())
        .and_then(|w| w.dimension("DIM-1", Some(1)))
        .unwrap();
    assert!(!is_cubic_world(world.path()).unwrap());
    assert!(list_supported_dimensions(world.path()).unwrap().is_empty());
    assert_eq!(registry().recognize(world.path()).unwrap(), None);
}

#[test]
fn corrupt_metadata_is_fatal() {
    let level = WorldFixture::new().and_then(|w| w.corrupt("level.dat")).unwrap();
    let err = is_cubic_world(level.path()).unwrap_err();
    assert!(err.path().ends_with("level.dat"), "{err}");

    let marker = WorldFixture::new()
        .and_then(|w| w.level(1))
        .and_then(|w| w.corrupt(&format!("DIM1/{CUBIC_CHUNKS_DATA}")))
        .unwrap();
    assert!(list_supported_dimensions(marker.path()).is_err());
}

#[test]
fn foreign_platform_is_rejected_without_touching_disk() {
    let registry = registry();
    let provider = registry.provider_for(&CUBIC_CHUNKS).expect("provider");
    assert!(registry.provider_for(&FOREIGN).is_none());

    let missing = Path::new("/definitely/not/a/world");
    let unsupported = |result: Result<(), PlatformError>| {
        matches!(
            result,
            Err(PlatformError::UnsupportedPlatform { ref platform }) if platform.contains(FOREIGN.id)
        )
    };

    assert!(unsupported(
        provider.chunk_store(&FOREIGN, missing, DimensionId::Overworld).map(|_| ())
    ));
    assert!(unsupported(
        provider
            .exporter(&FOREIGN, Arc::new(WorldModel::new("w", &FOREIGN)))
            .map(|_| ())
    ));
    assert!(unsupported(provider.create_chunk(&FOREIGN, 0, 0, 256).map(|_| ())));
    assert!(unsupported(provider.post_processor(&FOREIGN).map(|_| ())));
    assert!(unsupported(
        provider
            .exporter(&CUBIC_CHUNKS, Arc::new(WorldModel::new("w", &FOREIGN)))
            .map(|_| ())
    ));
    assert_eq!(provider.dimensions(&FOREIGN, missing).unwrap(), Vec::new());
}
