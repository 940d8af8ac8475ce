use cubicworld_world::ChunkStore;

/// Pass run over a chunk store after export.
pub trait PostProcessor: Send + Sync {
    /// Process the resident cubes of `store`, returning how many were changed
    /// or dropped.
    fn post_process(&self, store: &mut dyn ChunkStore) -> usize;
}

/// Default post-processor for Cubic Chunks exports. Stateless; one instance
/// can be shared across stores.
///
/// Cubic Chunks saves only the cubes that exist, so cubes that ended up
/// entirely air are dropped instead of being written.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPostProcessor;

impl PostProcessor for StandardPostProcessor {
    fn post_process(&self, store: &mut dyn ChunkStore) -> usize {
        let empty: Vec<_> = store
            .positions()
            .into_iter()
            .filter(|&pos| store.get(pos).is_some_and(|cube| cube.is_empty()))
            .collect();
        for pos in &empty {
            store.remove(*pos);
        }
        tracing::debug!(
            dimension = %store.dimension(),
            dropped = empty.len(),
            remaining = store.len(),
            "post-processed cubic chunk store"
        );
        empty.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubicworld_core::DimensionId;
    use cubicworld_world::{CubePos, CubicChunkStore};

    #[test]
    fn drops_only_empty_cubes() {
        let mut store = CubicChunkStore::new("/worlds/pp", DimensionId::End, 16);
        store.ensure(CubePos::new(0, 0, 0));
        store.ensure(CubePos::new(0, 1, 0)).set_block(1, 2, 3, 9);
        store.ensure(CubePos::new(4, -2, 4));

        let processor = StandardPostProcessor;
        assert_eq!(processor.post_process(&mut store), 2);
        assert_eq!(store.positions(), vec![CubePos::new(0, 1, 0)]);

        // Running again is a no-op.
        assert_eq!(processor.post_process(&mut store), 0);
    }
}
