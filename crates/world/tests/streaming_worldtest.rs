//! End-to-end streaming scenarios: queue discovery, synchronous and pooled
//! generation, edits, unloading and physics against the loaded world.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use glam::{IVec3, Vec3};
use voxelstream_core::{ChunkPos, ColumnPos};
use voxelstream_physics::PlayerBody;
use voxelstream_world::{
    BlockType, ChunkManager, FlatHeight, HeightValidation, NoiseHeight, NoiseSettings,
    StreamingConfig, NO_SURFACE,
};

fn cube_around_origin() -> HashSet<ChunkPos> {
    let mut expected = HashSet::new();
    for x in [-16, 0, 16] {
        for y in [-16, 0, 16] {
            for z in [-16, 0, 16] {
                expected.insert(ChunkPos::new(x, y, z));
            }
        }
    }
    expected
}

fn surface_config() -> StreamingConfig {
    StreamingConfig {
        render_distance: 1,
        height_validation: HeightValidation::ChunkExtent,
        ..StreamingConfig::default()
    }
}

#[test]
fn render_distance_one_loads_the_27_chunk_cube() {
    let mut manager = ChunkManager::new(FlatHeight(8));
    manager.ensure_surrounding_chunks(Vec3::ZERO, 1);
    manager.drain_queue();

    let loaded: HashSet<ChunkPos> = manager.chunks().map(|chunk| chunk.origin()).collect();
    assert_eq!(loaded, cube_around_origin());

    for pos in &loaded {
        assert!(manager.height_map(pos.column()).is_some(), "column of {pos}");
        let chunk = manager.get_chunk(*pos).expect("live chunk");
        assert!(chunk.is_generated());
        assert!(chunk.mesh().is_stale());
    }

    let stats = manager.stats();
    assert_eq!(stats.pending, 0);
    assert_eq!(stats.cached_height_maps, 9);
    assert_eq!(stats.height_maps_generated, 9);
}

#[test]
fn literal_height_bound_stores_sentinels_at_ground_level() {
    for height in [8, 5] {
        let mut manager = ChunkManager::new(FlatHeight(height));
        manager.queue_chunk(ChunkPos::new(0, 0, 0));
        manager.drain_queue();

        let map = manager.height_map(ColumnPos::new(0, 0)).expect("cached");
        assert_eq!(map.get(0, 0), NO_SURFACE);
        assert_eq!(map.surface_count(), 0);
        assert_eq!(manager.get_chunk(ChunkPos::new(0, 0, 0)).map(|c| c.block_count()), Some(0));
    }
}

#[test]
fn queueing_twice_before_drain_enqueues_once() {
    let mut manager = ChunkManager::new(FlatHeight(3));
    let pos = ChunkPos::new(16, 0, -16);
    assert!(manager.queue_chunk(pos));
    assert!(!manager.queue_chunk(pos));
    manager.drain_queue();
    assert_eq!(manager.stats().chunks_generated, 1);

    assert!(manager.queue_chunk(pos));
    manager.drain_queue();
    // A second pass over a clean live chunk neither regenerates nor updates it.
    let stats = manager.stats();
    assert_eq!(stats.chunks_generated, 1);
    assert_eq!(stats.chunks_updated, 0);
}

#[test]
fn worker_pool_builds_the_same_world_as_the_inline_drain() {
    let settings = NoiseSettings {
        seed: 7,
        ..NoiseSettings::default()
    };
    let center = Vec3::new(8.0, 24.0, 8.0);

    let mut inline = ChunkManager::with_config(surface_config(), NoiseHeight::new(settings.clone()))
        .expect("inline manager");
    inline.ensure_surrounding_chunks(center, 1);
    inline.drain_queue();

    let pooled_config = StreamingConfig {
        worker_threads: 3,
        max_in_flight: 4,
        ..surface_config()
    };
    let mut pooled = ChunkManager::with_config(pooled_config, NoiseHeight::new(settings))
        .expect("pooled manager");
    pooled.ensure_surrounding_chunks(center, 1);
    pooled.finish_pending();

    let stats = pooled.stats();
    assert_eq!(stats.loaded_chunks, 27);
    assert_eq!(stats.pending, 0);
    assert_eq!(stats.in_flight, 0);
    assert_eq!(stats.height_maps_generated, 9);

    let mut surface_blocks = 0;
    for chunk in inline.chunks() {
        let other = pooled.get_chunk(chunk.origin()).expect("same chunk set");
        let a: Vec<IVec3> = chunk.blocks().map(|b| b.global).collect();
        let b: Vec<IVec3> = other.blocks().map(|b| b.global).collect();
        assert_eq!(a, b, "chunk {}", chunk.origin());
        surface_blocks += a.len();
    }
    assert!(surface_blocks > 0);
}

#[test]
fn in_flight_chunks_are_not_requeued_until_published() {
    let gate = Arc::new(RwLock::new(()));
    let worker_gate = Arc::clone(&gate);
    let gated = move |_x: f64, _z: f64| {
        let _open = worker_gate.read().unwrap();
        4
    };

    let config = StreamingConfig {
        worker_threads: 2,
        ..surface_config()
    };
    let mut manager = ChunkManager::with_config(config, gated).expect("pooled manager");
    // Workers block on the first height sample until the gate opens.
    let held = gate.write().unwrap();

    let low = ChunkPos::new(0, 0, 0);
    let high = ChunkPos::new(0, 16, 0);
    manager.queue_chunk(low);
    manager.queue_chunk(high);
    manager.drain_queue();

    assert!(manager.is_in_flight(low));
    assert!(manager.is_in_flight(high));
    assert!(!manager.queue_chunk(low));
    assert!(!manager.queue_chunk(high));
    assert_eq!(manager.stats().in_flight, 2);

    drop(held);
    manager.finish_pending();

    let stats = manager.stats();
    assert_eq!(stats.pending, 0);
    assert_eq!(stats.in_flight, 0);
    assert!(manager.is_chunk_active(low));
    assert!(manager.is_chunk_active(high));
    // The second chunk waited for the column's map instead of building another.
    assert_eq!(manager.stats().height_maps_generated, 1);
    assert!(manager.is_block_active_at(IVec3::new(3, 4, 3)));
    assert!(manager.queue_chunk(low));
}

#[test]
fn pooled_edits_update_on_the_owner_thread() {
    let config = StreamingConfig {
        worker_threads: 2,
        ..surface_config()
    };
    let mut manager = ChunkManager::with_config(config, FlatHeight(4)).expect("pooled");
    let pos = ChunkPos::new(0, 0, 0);
    manager.queue_chunk(pos);
    manager.finish_pending();

    assert!(manager.place_block(IVec3::new(1, 5, 1), BlockType::Sand));
    manager.drain_queue();
    let chunk = manager.get_chunk(pos).expect("live");
    assert!(!chunk.is_dirty());
    assert_eq!(chunk.mesh().revision(), 2);
    assert_eq!(manager.stats().chunks_updated, 1);
}

#[test]
fn unloaded_chunks_come_back_when_the_player_returns() {
    let config = StreamingConfig {
        unload_margin: Some(0),
        ..surface_config()
    };
    let mut manager = ChunkManager::with_config(config, FlatHeight(4)).expect("inline");
    manager.update(Vec3::new(8.0, 8.0, 8.0));
    assert!(manager.is_chunk_active(ChunkPos::new(-16, 0, 0)));

    manager.update(Vec3::new(40.0, 8.0, 8.0));
    assert!(!manager.is_chunk_active(ChunkPos::new(-16, 0, 0)));
    assert!(!manager.is_chunk_active(ChunkPos::new(0, 0, 0)));
    assert_eq!(manager.stats().loaded_chunks, 27);

    manager.update(Vec3::new(8.0, 8.0, 8.0));
    assert!(manager.is_chunk_active(ChunkPos::new(-16, 0, 0)));
    assert_eq!(manager.stats().loaded_chunks, 27);
    assert_eq!(manager.stats().chunks_unloaded, 36);
}

#[test]
fn player_lands_on_generated_terrain() {
    let mut manager = ChunkManager::with_config(surface_config(), FlatHeight(4)).expect("inline");
    manager.update(Vec3::new(8.0, 24.0, 8.0));

    let mut body = PlayerBody::new(Vec3::new(8.5, 12.0, 8.5));
    for _ in 0..200 {
        body.apply_gravity(0.05);
        body.step(0.05, &manager);
    }
    assert!(body.grounded);
    assert!(body.position.y >= 5.0 && body.position.y < 5.05);

    let hit = manager.pick(body.position + Vec3::Y, Vec3::NEG_Y, 8.0);
    assert_eq!(hit.hit, Some(IVec3::new(8, 4, 8)));
}

#[test]
fn columns_discovered_from_the_ground_have_terrain() {
    let mut manager = ChunkManager::with_config(surface_config(), FlatHeight(4)).expect("inline");
    manager.update(Vec3::new(8.0, 24.0, 8.0));
    manager.update(Vec3::new(8.0, 8.0, 8.0));
    manager.update(Vec3::new(40.0, 8.0, 8.0));

    // Column x = 32 was first reached by its lowest chunk, at y = -16.
    let fresh = manager.height_map(ColumnPos::new(32, 0)).expect("cached");
    assert_eq!(fresh.origin_y(), -16);

    for x in [0, 16, 32, 48] {
        let chunk = manager.get_chunk(ChunkPos::new(x, 0, 0)).expect("loaded");
        assert_eq!(chunk.block_count(), 256, "chunk at x = {x}");
    }
    assert!(manager.is_block_active_at(IVec3::new(40, 4, 8)));
}

#[test]
fn reloaded_chunk_matches_after_its_column_is_rebuilt() {
    let config = StreamingConfig {
        height_map_capacity: 1,
        unload_margin: Some(0),
        ..surface_config()
    };
    let mut manager = ChunkManager::with_config(config, FlatHeight(20)).expect("inline");
    let upper = ChunkPos::new(0, 16, 0);
    manager.queue_chunk(upper);
    manager.drain_queue();
    let before: Vec<IVec3> = manager
        .get_chunk(upper)
        .expect("loaded")
        .blocks()
        .map(|b| b.global)
        .collect();
    assert_eq!(before.len(), 256);

    // Another column evicts the cached map, then the chunk drops out of range.
    manager.queue_chunk(ChunkPos::new(64, 0, 0));
    manager.drain_queue();
    assert!(manager.height_map(ColumnPos::new(0, 0)).is_none());
    manager.unload_distant(Vec3::new(72.0, 8.0, 8.0));
    assert!(!manager.is_chunk_active(upper));

    // The column map is rebuilt from a different layer before the chunk returns.
    manager.queue_chunk(ChunkPos::new(0, 0, 0));
    manager.queue_chunk(upper);
    manager.drain_queue();
    assert_eq!(manager.height_map(ColumnPos::new(0, 0)).map(|m| m.origin_y()), Some(0));

    let after: Vec<IVec3> = manager
        .get_chunk(upper)
        .expect("reloaded")
        .blocks()
        .map(|b| b.global)
        .collect();
    assert_eq!(after, before);
    assert_eq!(manager.stats().height_maps_generated, 3);
}
