//! Chunk lifecycle and spatial queries.
//!
//! [`ChunkManager`] is the single writer for every piece of world state: live
//! chunks, the height-map cache and the pending queue. Chunks are created by
//! draining the queue, either inline or through a [`GenerationPool`] whose
//! results are published back on the owning thread.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::sync::Arc;

use glam::{IVec3, Vec3};
use lru::LruCache;
use serde::Serialize;
use tracing::{debug, info, trace, warn};
use voxelstream_core::{
    to_chunk_origin, to_chunk_origin_f, to_local, voxel_at, ChunkPos, ColumnPos, Occupancy,
};
use voxelstream_physics::{cast, RayResult};

use crate::block::{Block, BlockType};
use crate::chunk::Chunk;
use crate::config::StreamingConfig;
use crate::height::{HeightFunction, NoiseHeight};
use crate::heightmap::HeightMap;
use crate::pool::{GenerationJob, GenerationPool, GenerationResult, PoolError};
use crate::queue::PendingQueue;

/// Counters describing the current world state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorldStats {
    /// Live chunks.
    pub loaded_chunks: usize,
    /// Height maps in the cache.
    pub cached_height_maps: usize,
    /// Coordinates waiting in the queue.
    pub pending: usize,
    /// Coordinates handed to workers and not yet published.
    pub in_flight: usize,
    /// Chunks generated since creation.
    pub chunks_generated: u64,
    /// Mesh update signals sent for edited chunks.
    pub chunks_updated: u64,
    /// Chunks dropped by the unload policy.
    pub chunks_unloaded: u64,
    /// Height maps generated since creation.
    pub height_maps_generated: u64,
}

/// Owns the chunk grid and drives its generation.
pub struct ChunkManager {
    config: StreamingConfig,
    height_fn: Arc<dyn HeightFunction>,
    chunks: HashMap<ChunkPos, Chunk>,
    height_maps: LruCache<ColumnPos, Arc<HeightMap>>,
    pending: PendingQueue,
    pool: Option<GenerationPool>,
    in_flight: HashSet<ChunkPos>,
    /// Chunks waiting on a column whose height map a worker is building.
    parked: HashMap<ColumnPos, Vec<ChunkPos>>,
    stats: WorldStats,
}

impl ChunkManager {
    /// Synchronous manager with default settings.
    pub fn new<H>(height_fn: H) -> Self
    where
        H: HeightFunction + 'static,
    {
        Self::build(StreamingConfig::default(), Arc::new(height_fn), None)
    }

    /// Manager using `config`, starting the worker pool when it asks for one.
    pub fn with_config<H>(config: StreamingConfig, height_fn: H) -> Result<Self, PoolError>
    where
        H: HeightFunction + 'static,
    {
        Self::with_shared(config, Arc::new(height_fn))
    }

    /// Manager with noise terrain configured by `config.noise`.
    pub fn from_config(config: StreamingConfig) -> Result<Self, PoolError> {
        let noise = NoiseHeight::new(config.noise.clone());
        Self::with_config(config, noise)
    }

    /// Manager sharing an existing height function.
    pub fn with_shared(
        config: StreamingConfig,
        height_fn: Arc<dyn HeightFunction>,
    ) -> Result<Self, PoolError> {
        let pool = if config.worker_threads > 0 {
            Some(GenerationPool::spawn(
                config.worker_threads,
                Arc::clone(&height_fn),
                config.height_validation,
            )?)
        } else {
            None
        };
        Ok(Self::build(config, height_fn, pool))
    }

    fn build(
        config: StreamingConfig,
        height_fn: Arc<dyn HeightFunction>,
        pool: Option<GenerationPool>,
    ) -> Self {
        let capacity =
            NonZeroUsize::new(config.height_map_capacity).unwrap_or(NonZeroUsize::MIN);
        info!(
            render_distance = config.render_distance,
            workers = pool.as_ref().map_or(0, GenerationPool::worker_count),
            validation = ?config.height_validation,
            "chunk manager ready"
        );
        Self {
            config,
            height_fn,
            chunks: HashMap::new(),
            height_maps: LruCache::new(capacity),
            pending: PendingQueue::new(),
            pool,
            in_flight: HashSet::new(),
            parked: HashMap::new(),
            stats: WorldStats::default(),
        }
    }

    /// Active settings.
    pub fn config(&self) -> &StreamingConfig {
        &self.config
    }

    /// True when a live chunk exists at `pos`.
    pub fn is_chunk_active(&self, pos: ChunkPos) -> bool {
        self.chunks.contains_key(&pos)
    }

    /// True while `pos` waits in the queue.
    pub fn is_pending(&self, pos: ChunkPos) -> bool {
        self.pending.contains(pos)
    }

    /// True while a worker is generating `pos`.
    pub fn is_in_flight(&self, pos: ChunkPos) -> bool {
        self.in_flight.contains(&pos)
    }

    /// Schedule `pos` for generation or an update pass.
    ///
    /// Returns false when it is already queued or being generated.
    pub fn queue_chunk(&mut self, pos: ChunkPos) -> bool {
        let pos = to_chunk_origin(pos.origin());
        if self.in_flight.contains(&pos) {
            trace!(chunk = %pos, "already in flight");
            return false;
        }
        let queued = self.pending.push(pos);
        trace!(chunk = %pos, queued, "queue chunk");
        queued
    }

    /// Queue every chunk within `render_distance` chunks of `center` on each
    /// axis. Returns how many were newly queued.
    pub fn ensure_surrounding_chunks(&mut self, center: Vec3, render_distance: i32) -> usize {
        let center = to_chunk_origin_f(center);
        let radius = render_distance.max(0);
        let mut queued = 0;
        for dx in -radius..=radius {
            for dy in -radius..=radius {
                for dz in -radius..=radius {
                    if self.queue_chunk(center.offset(dx, dy, dz)) {
                        queued += 1;
                    }
                }
            }
        }
        queued
    }

    /// Process queued coordinates in FIFO order.
    ///
    /// Without workers this empties the queue before returning. With workers it
    /// hands out jobs up to `max_in_flight` and publishes whatever has finished,
    /// without blocking, so coordinates may still be queued or in flight
    /// afterwards. Use [`ChunkManager::finish_pending`] to wait for both to
    /// empty.
    pub fn drain_queue(&mut self) {
        if self.pool.is_some() {
            self.pump(false);
            return;
        }
        while let Some(pos) = self.pending.pop() {
            self.process(pos);
        }
    }

    /// Drain until nothing is queued or in flight, blocking on workers.
    pub fn finish_pending(&mut self) {
        if self.pool.is_none() {
            self.drain_queue();
            return;
        }
        while !self.pending.is_empty() || !self.in_flight.is_empty() {
            if self.pump(true) == 0 {
                warn!(
                    pending = self.pending.len(),
                    in_flight = self.in_flight.len(),
                    "generation workers stopped before the queue emptied"
                );
                break;
            }
        }
    }

    /// Per-tick streaming: queue the neighbourhood of `player`, drain, then
    /// unload chunks that drifted out of range.
    pub fn update(&mut self, player: Vec3) {
        let queued = self.ensure_surrounding_chunks(player, self.config.render_distance);
        self.drain_queue();
        let unloaded = self.unload_distant(player);
        if queued > 0 || unloaded > 0 {
            debug!(
                queued,
                unloaded,
                loaded = self.chunks.len(),
                in_flight = self.in_flight.len(),
                "streaming update"
            );
        }
    }

    /// Drop chunks farther than the unload distance from `center`.
    pub fn unload_distant(&mut self, center: Vec3) -> usize {
        let Some(limit) = self.config.unload_distance() else {
            return 0;
        };
        let center = to_chunk_origin_f(center);
        let far: Vec<ChunkPos> = self
            .chunks
            .keys()
            .copied()
            .filter(|pos| pos.chunk_distance(center) > limit)
            .collect();

        for pos in &far {
            self.chunks.remove(pos);
            self.pending.remove(*pos);
            debug!(chunk = %pos, "unloaded chunk");
        }
        self.stats.chunks_unloaded += far.len() as u64;
        far.len()
    }

    fn process(&mut self, pos: ChunkPos) {
        let height_map = self.column_height_map(pos);

        match self.chunks.get_mut(&pos) {
            Some(chunk) => {
                if chunk.take_dirty() {
                    chunk.update();
                    self.stats.chunks_updated += 1;
                    trace!(chunk = %pos, "chunk updated");
                }
            }
            None => {
                let mut chunk = Chunk::new(pos);
                chunk.generate(&height_map);
                debug!(chunk = %pos, blocks = chunk.block_count(), "generated chunk");
                self.chunks.insert(pos, chunk);
                self.stats.chunks_generated += 1;
            }
        }
    }

    fn column_height_map(&mut self, pos: ChunkPos) -> Arc<HeightMap> {
        let column = pos.column();
        if let Some(map) = self.height_maps.get(&column) {
            return Arc::clone(map);
        }
        let map = Arc::new(HeightMap::generate(
            pos,
            self.height_fn.as_ref(),
            self.config.height_validation,
        ));
        debug!(column = %column, origin_y = pos.y, "generated height map");
        self.height_maps.put(column, Arc::clone(&map));
        self.stats.height_maps_generated += 1;
        map
    }

    /// Dispatch and publish once. Returns how many jobs moved either way.
    fn pump(&mut self, block: bool) -> usize {
        let dispatched = self.dispatch();

        let mut finished = Vec::new();
        if let Some(pool) = self.pool.as_ref() {
            if block && !self.in_flight.is_empty() {
                finished.extend(pool.recv());
            }
            while let Some(result) = pool.try_recv() {
                finished.push(result);
            }
        }
        let published = finished.len();
        for result in finished {
            self.publish(result);
        }
        dispatched + published
    }

    fn dispatch(&mut self) -> usize {
        let Some(pool) = self.pool.as_ref() else {
            return 0;
        };
        let max_in_flight = self.config.max_in_flight.max(1);
        let mut dispatched = 0;

        while self.in_flight.len() < max_in_flight {
            let Some(pos) = self.pending.pop() else {
                break;
            };

            if let Some(chunk) = self.chunks.get_mut(&pos) {
                if chunk.take_dirty() {
                    chunk.update();
                    self.stats.chunks_updated += 1;
                }
                dispatched += 1;
                continue;
            }

            let column = pos.column();
            if let Some(waiting) = self.parked.get_mut(&column) {
                waiting.push(pos);
                self.in_flight.insert(pos);
                dispatched += 1;
                continue;
            }

            let height_map = self.height_maps.get(&column).cloned();
            let builds_map = height_map.is_none();
            if let Err(err) = pool.submit(GenerationJob { pos, height_map }) {
                warn!(chunk = %pos, %err, "could not dispatch chunk");
                self.pending.push_front(pos);
                break;
            }
            if builds_map {
                self.parked.insert(column, Vec::new());
            }
            self.in_flight.insert(pos);
            dispatched += 1;
        }
        dispatched
    }

    fn publish(&mut self, result: GenerationResult) {
        let GenerationResult {
            pos,
            chunk,
            height_map,
            built_height_map,
        } = result;
        self.in_flight.remove(&pos);

        if built_height_map {
            let column = pos.column();
            debug!(column = %column, origin_y = pos.y, "generated height map");
            self.height_maps.put(column, Arc::clone(&height_map));
            self.stats.height_maps_generated += 1;

            for waiting in self.parked.remove(&column).unwrap_or_default() {
                let job = GenerationJob {
                    pos: waiting,
                    height_map: Some(Arc::clone(&height_map)),
                };
                let submitted = match self.pool.as_ref() {
                    Some(pool) => pool.submit(job),
                    None => Err(PoolError::Disconnected),
                };
                if let Err(err) = submitted {
                    warn!(chunk = %waiting, %err, "could not dispatch parked chunk");
                    self.in_flight.remove(&waiting);
                    self.pending.push_front(waiting);
                }
            }
        }

        if self.chunks.contains_key(&pos) {
            trace!(chunk = %pos, "discarding duplicate generation result");
            return;
        }
        debug!(chunk = %pos, blocks = chunk.block_count(), "generated chunk");
        self.chunks.insert(pos, chunk);
        self.stats.chunks_generated += 1;
    }

    /// Place the default block on the empty side of a ray hit.
    ///
    /// Returns false for misses and for targets outside loaded chunks.
    pub fn add_block(&mut self, result: &RayResult) -> bool {
        match result.placement() {
            Some(target) => self.place_block(target, BlockType::default()),
            None => false,
        }
    }

    /// Place `block_type` at a world voxel, overwriting what is there.
    pub fn place_block(&mut self, world: IVec3, block_type: BlockType) -> bool {
        let pos = to_chunk_origin(world);
        let Some(chunk) = self.chunks.get_mut(&pos) else {
            warn!(voxel = ?world, "dropping placement outside loaded chunks");
            return false;
        };
        if let Err(err) = chunk.add_block(to_local(world).as_ivec3(), block_type) {
            warn!(%err, "dropping placement");
            return false;
        }
        chunk.mark_dirty();
        self.queue_chunk(pos);
        true
    }

    /// Remove the block at a world voxel. Returns the removed block.
    ///
    /// An empty cell leaves the chunk clean and unqueued.
    pub fn remove_block(&mut self, world: IVec3) -> Option<Block> {
        let pos = to_chunk_origin(world);
        let Some(chunk) = self.chunks.get_mut(&pos) else {
            warn!(voxel = ?world, "dropping removal outside loaded chunks");
            return None;
        };
        let removed = chunk.remove_block(to_local(world).as_ivec3())?;
        chunk.mark_dirty();
        self.queue_chunk(pos);
        Some(removed)
    }

    /// Float variant of [`ChunkManager::remove_block`].
    pub fn remove_block_at(&mut self, world: Vec3) -> Option<Block> {
        self.remove_block(voxel_at(world))
    }

    /// Live chunk at a chunk coordinate.
    pub fn get_chunk(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&pos)
    }

    /// Mutable live chunk, for renderers consuming mesh signals.
    pub fn get_chunk_mut(&mut self, pos: ChunkPos) -> Option<&mut Chunk> {
        self.chunks.get_mut(&pos)
    }

    /// Live chunk containing a world voxel.
    pub fn get_chunk_at(&self, world: IVec3) -> Option<&Chunk> {
        self.get_chunk(to_chunk_origin(world))
    }

    /// Live chunk containing a float world position.
    pub fn get_chunk_at_f(&self, world: Vec3) -> Option<&Chunk> {
        self.get_chunk_at(voxel_at(world))
    }

    /// Block at a world voxel.
    pub fn get_block_at(&self, world: IVec3) -> Option<&Block> {
        self.get_chunk_at(world)?.block(to_local(world).as_ivec3())
    }

    /// Block at a float world position.
    pub fn get_block_at_f(&self, world: Vec3) -> Option<&Block> {
        self.get_block_at(voxel_at(world))
    }

    /// True when a loaded chunk holds a block at the world voxel.
    pub fn is_block_active_at(&self, world: IVec3) -> bool {
        self.get_block_at(world).is_some()
    }

    /// Float variant of [`ChunkManager::is_block_active_at`].
    pub fn is_block_active_at_f(&self, world: Vec3) -> bool {
        self.is_block_active_at(voxel_at(world))
    }

    /// Cast a ray against the loaded world.
    pub fn pick(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> RayResult {
        cast(origin, direction, max_distance, self)
    }

    /// Live chunks, in no particular order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> + '_ {
        self.chunks.values()
    }

    /// Mutable live chunks.
    pub fn chunks_mut(&mut self) -> impl Iterator<Item = &mut Chunk> + '_ {
        self.chunks.values_mut()
    }

    /// Cached height map for a column, without touching LRU order.
    pub fn height_map(&self, column: ColumnPos) -> Option<&HeightMap> {
        self.height_maps.peek(&column).map(|map| &**map)
    }

    /// Snapshot of sizes and counters.
    pub fn stats(&self) -> WorldStats {
        WorldStats {
            loaded_chunks: self.chunks.len(),
            cached_height_maps: self.height_maps.len(),
            pending: self.pending.len(),
            in_flight: self.in_flight.len(),
            ..self.stats
        }
    }
}

impl Occupancy for ChunkManager {
    fn is_occupied(&self, voxel: IVec3) -> bool {
        self.is_block_active_at(voxel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::height::FlatHeight;
    use crate::heightmap::HeightValidation;

    fn surface_config() -> StreamingConfig {
        StreamingConfig {
            render_distance: 1,
            height_validation: HeightValidation::ChunkExtent,
            ..StreamingConfig::default()
        }
    }

    fn flat_world(height: i32) -> ChunkManager {
        ChunkManager::with_config(surface_config(), FlatHeight(height)).expect("sync manager")
    }

    #[test]
    fn queue_chunk_deduplicates_until_dequeued() {
        let mut manager = ChunkManager::new(FlatHeight(4));
        let pos = ChunkPos::new(0, 0, 0);
        assert!(manager.queue_chunk(pos));
        assert!(!manager.queue_chunk(pos));
        assert_eq!(manager.stats().pending, 1);

        manager.drain_queue();
        assert!(manager.is_chunk_active(pos));
        assert!(!manager.is_pending(pos));
        assert!(manager.queue_chunk(pos));
    }

    #[test]
    fn queue_chunk_snaps_to_chunk_origin() {
        let mut manager = ChunkManager::new(FlatHeight(4));
        assert!(manager.queue_chunk(ChunkPos::new(5, -3, 17)));
        assert!(manager.is_pending(ChunkPos::new(0, -16, 16)));
    }

    #[test]
    fn ensure_surrounding_queues_a_cube_in_x_y_z_order() {
        let mut manager = ChunkManager::new(FlatHeight(4));
        let queued = manager.ensure_surrounding_chunks(Vec3::new(8.0, 8.0, 8.0), 1);
        assert_eq!(queued, 27);
        let order: Vec<ChunkPos> = manager.pending.iter().collect();
        assert_eq!(order[0], ChunkPos::new(-16, -16, -16));
        assert_eq!(order[1], ChunkPos::new(-16, -16, 0));
        assert_eq!(order[3], ChunkPos::new(-16, 0, -16));
        assert_eq!(order[26], ChunkPos::new(16, 16, 16));
        assert_eq!(manager.ensure_surrounding_chunks(Vec3::new(8.0, 8.0, 8.0), 1), 0);
    }

    #[test]
    fn one_height_map_per_column() {
        let mut manager = flat_world(4);
        manager.update(Vec3::new(8.0, 8.0, 8.0));
        let stats = manager.stats();
        assert_eq!(stats.loaded_chunks, 27);
        assert_eq!(stats.height_maps_generated, 9);
        assert_eq!(stats.cached_height_maps, 9);
        assert_eq!(stats.pending, 0);
    }

    #[test]
    fn lowest_chunk_building_the_map_still_yields_terrain() {
        let mut manager = flat_world(4);
        manager.update(Vec3::new(8.0, 8.0, 8.0));
        // The lowest chunk of each column builds the map, but the surface at
        // y = 4 still lands in the chunk whose range holds it.
        let map = manager.height_map(ColumnPos::new(0, 0)).expect("cached");
        assert_eq!(map.origin_y(), -16);
        for chunk in manager.chunks() {
            let expected = if chunk.origin().y == 0 { 256 } else { 0 };
            assert_eq!(chunk.block_count(), expected, "chunk {}", chunk.origin());
        }
    }

    #[test]
    fn literal_validation_keeps_the_building_chunk_window() {
        let config = StreamingConfig {
            render_distance: 1,
            ..StreamingConfig::default()
        };
        let mut manager = ChunkManager::with_config(config, FlatHeight(4)).expect("sync");
        manager.update(Vec3::new(8.0, 8.0, 8.0));
        assert!(manager.chunks().all(|chunk| chunk.block_count() == 0));
    }

    #[test]
    fn block_queries_resolve_through_chunks() {
        let mut manager = flat_world(4);
        manager.queue_chunk(ChunkPos::new(0, 0, 0));
        manager.queue_chunk(ChunkPos::new(-16, 0, 0));
        manager.drain_queue();

        assert!(manager.is_block_active_at(IVec3::new(3, 4, 3)));
        assert!(manager.is_block_active_at(IVec3::new(-1, 4, 15)));
        assert!(manager.is_block_active_at_f(Vec3::new(-0.5, 4.9, 15.2)));
        assert!(!manager.is_block_active_at(IVec3::new(3, 5, 3)));
        assert!(!manager.is_block_active_at(IVec3::new(40, 4, 3)));

        let block = manager.get_block_at(IVec3::new(-1, 4, 15)).expect("block");
        assert_eq!(block.global, IVec3::new(-1, 4, 15));
        assert_eq!(
            manager.get_chunk_at_f(Vec3::new(-0.1, 0.0, 0.0)).map(Chunk::origin),
            Some(ChunkPos::new(-16, 0, 0))
        );
        assert!(manager.get_block_at_f(Vec3::new(0.5, 0.5, 0.5)).is_none());
    }

    #[test]
    fn editing_marks_dirty_and_requeues() {
        let mut manager = flat_world(4);
        let pos = ChunkPos::new(0, 0, 0);
        manager.queue_chunk(pos);
        manager.drain_queue();
        let revision = manager.get_chunk(pos).map(|c| c.mesh().revision());

        assert!(manager.place_block(IVec3::new(2, 9, 2), BlockType::Stone));
        assert!(manager.get_chunk(pos).is_some_and(Chunk::is_dirty));
        assert!(manager.is_pending(pos));

        manager.drain_queue();
        let chunk = manager.get_chunk(pos).expect("live");
        assert!(!chunk.is_dirty());
        assert_eq!(Some(chunk.mesh().revision()), revision.map(|r| r + 1));
        assert_eq!(manager.stats().chunks_updated, 1);
        assert_eq!(manager.stats().chunks_generated, 1);
    }

    #[test]
    fn add_block_uses_ray_face() {
        let mut manager = flat_world(4);
        manager.queue_chunk(ChunkPos::new(0, 0, 0));
        manager.drain_queue();

        let hit = manager.pick(Vec3::new(5.5, 12.5, 5.5), Vec3::new(0.0, -1.0, 0.0), 20.0);
        assert_eq!(hit.hit, Some(IVec3::new(5, 4, 5)));
        assert_eq!(hit.face, IVec3::new(0, 1, 0));

        assert!(manager.add_block(&hit));
        let placed = manager.get_block_at(IVec3::new(5, 5, 5)).expect("placed");
        assert_eq!(placed.block_type, BlockType::Grass);
        assert!(!manager.add_block(&RayResult::MISS));
    }

    #[test]
    fn edits_outside_loaded_chunks_are_dropped() {
        let mut manager = flat_world(4);
        assert!(!manager.place_block(IVec3::new(100, 0, 0), BlockType::Dirt));
        assert!(manager.remove_block(IVec3::new(100, 0, 0)).is_none());
        assert_eq!(manager.stats().pending, 0);
    }

    #[test]
    fn removing_a_block_requeues_its_chunk() {
        let mut manager = flat_world(4);
        let pos = ChunkPos::new(0, 0, 0);
        manager.queue_chunk(pos);
        manager.drain_queue();

        let removed = manager.remove_block_at(Vec3::new(1.2, 4.7, 1.9)).expect("removed");
        assert_eq!(removed.global, IVec3::new(1, 4, 1));
        assert!(!manager.is_block_active_at(IVec3::new(1, 4, 1)));
        assert!(manager.is_pending(pos));

        // Empty cells change nothing and queue nothing.
        manager.drain_queue();
        assert!(manager.remove_block(IVec3::new(1, 4, 1)).is_none());
        assert!(!manager.is_pending(pos));
    }

    #[test]
    fn unloads_chunks_beyond_margin() {
        let config = StreamingConfig {
            unload_margin: Some(1),
            ..surface_config()
        };
        let mut manager = ChunkManager::with_config(config, FlatHeight(4)).expect("sync");
        manager.update(Vec3::new(8.0, 8.0, 8.0));
        assert_eq!(manager.stats().loaded_chunks, 27);

        // Two chunks east: the western layer is now 3 chunks away.
        manager.update(Vec3::new(40.0, 8.0, 8.0));
        let stats = manager.stats();
        assert_eq!(stats.chunks_unloaded, 9);
        assert!(!manager.is_chunk_active(ChunkPos::new(-16, 0, 0)));
        assert!(manager.is_chunk_active(ChunkPos::new(0, 0, 0)));
        assert_eq!(stats.loaded_chunks, 27 + 18 - 9);
    }

    #[test]
    fn height_map_cache_is_bounded() {
        let config = StreamingConfig {
            height_map_capacity: 4,
            ..surface_config()
        };
        let mut manager = ChunkManager::with_config(config, FlatHeight(4)).expect("sync");
        manager.update(Vec3::ZERO);
        let stats = manager.stats();
        assert_eq!(stats.cached_height_maps, 4);
        assert_eq!(stats.height_maps_generated, 9);
    }

    #[test]
    fn manager_is_an_occupancy_query() {
        let mut manager = flat_world(0);
        manager.queue_chunk(ChunkPos::new(0, 0, 0));
        manager.drain_queue();
        let occupancy: &dyn Occupancy = &manager;
        assert!(occupancy.is_occupied(IVec3::new(7, 0, 7)));
        assert!(!occupancy.is_occupied(IVec3::new(7, 1, 7)));
    }
}
