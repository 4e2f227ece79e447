use anyhow::{Context, Result};
use glam::Vec3;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};
use voxelstream_core::SimTick;
use voxelstream_physics::{Motion, PlayerBody, RayResult};
use voxelstream_testkit::{
    EventRecord, ExecutionMetrics, JsonlSink, MetricsReportBuilder, MetricsSink, QueryMetrics,
    RunResult, StreamingMetrics,
};
use voxelstream_world::{ChunkManager, StreamingConfig, WorldStats};

const TICK_SECONDS: f32 = 1.0 / 20.0;
const WALK_SPEED: f32 = 4.3;
const EYE_HEIGHT: f32 = 1.6;
const REACH: f32 = 6.0;
const EDIT_INTERVAL: u64 = 40;

pub struct HeadlessConfig {
    pub streaming: StreamingConfig,
    pub ticks: u64,
    pub seed: u64,
    pub run_name: String,
    pub events: Option<PathBuf>,
    pub metrics: Option<PathBuf>,
}

#[derive(Debug)]
pub struct RunSummary {
    pub result: RunResult,
    pub stats: WorldStats,
    pub streaming: StreamingMetrics,
    pub queries: QueryMetrics,
}

#[derive(Serialize)]
struct TickPayload {
    position: [f32; 3],
    grounded: bool,
    stats: WorldStats,
}

#[derive(Serialize)]
struct EditPayload {
    action: &'static str,
    voxel: [i32; 3],
}

/// Random walker driven through the physics helper.
struct Walker {
    body: PlayerBody,
    heading: f32,
    rng: StdRng,
}

impl Walker {
    fn new(spawn: Vec3, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let heading = rng.gen_range(0.0..std::f32::consts::TAU);
        Self {
            body: PlayerBody::new(spawn),
            heading,
            rng,
        }
    }

    fn position(&self) -> Vec3 {
        self.body.position
    }

    fn look_direction(&self) -> Vec3 {
        let (sin, cos) = self.heading.sin_cos();
        Vec3::new(cos, -0.8, sin).normalize_or_zero()
    }

    fn tick(&mut self, world: &ChunkManager) -> Motion {
        self.heading += self.rng.gen_range(-0.15..0.15);
        let (sin, cos) = self.heading.sin_cos();
        self.body.velocity.x = cos * WALK_SPEED;
        self.body.velocity.z = sin * WALK_SPEED;

        if self.body.grounded && self.rng.gen_bool(0.05) {
            self.body.jump();
        }
        self.body.apply_gravity(TICK_SECONDS);
        self.body.step(TICK_SECONDS, world)
    }
}

/// Start just above the highest surface the noise can produce.
fn spawn_point(config: &StreamingConfig) -> Vec3 {
    let highest_surface = config.noise.base + config.noise.amplitude.abs().ceil() as i32;
    Vec3::new(8.5, (highest_surface + 2) as f32, 8.5)
}

fn write_event<T: Serialize>(
    sink: &mut Option<JsonlSink>,
    tick: SimTick,
    kind: &str,
    payload: &T,
) -> Result<()> {
    let Some(sink) = sink.as_mut() else {
        return Ok(());
    };
    let payload = serde_json::to_string(payload)?;
    sink.write(&EventRecord {
        tick,
        kind,
        payload: &payload,
    })
}

pub fn run(cfg: HeadlessConfig) -> Result<RunSummary> {
    let started = Instant::now();
    let worker_threads = cfg.streaming.worker_threads;
    let spawn = spawn_point(&cfg.streaming);

    let mut manager =
        ChunkManager::from_config(cfg.streaming.clone()).context("failed to start chunk manager")?;
    let mut events = cfg.events.as_deref().map(JsonlSink::create).transpose()?;
    let mut walker = Walker::new(spawn, cfg.seed);

    info!(
        ticks = cfg.ticks,
        seed = cfg.seed,
        spawn = ?spawn,
        "starting headless run"
    );

    let mut streaming = StreamingMetrics::default();
    let mut queries = QueryMetrics::default();
    let mut total_update_us: u128 = 0;
    let mut tick = SimTick::ZERO;

    for _ in 0..cfg.ticks {
        let update_started = Instant::now();
        manager.update(walker.position());
        let update_us = update_started.elapsed().as_micros();
        total_update_us += update_us;
        streaming.max_update_time_us = streaming.max_update_time_us.max(update_us);

        let motion = walker.tick(&manager);
        queries.collision_steps += 1;
        if motion.grounded {
            queries.grounded_steps += 1;
        }

        let eye = walker.position() + Vec3::Y * EYE_HEIGHT;
        let picked = manager.pick(eye, walker.look_direction(), REACH);
        queries.rays_cast += 1;
        if picked.is_hit() {
            queries.ray_hits += 1;
        }
        if tick.0 > 0 && tick.0 % EDIT_INTERVAL == 0 {
            edit(&mut manager, &mut events, tick, &picked)?;
        }

        let stats = manager.stats();
        streaming.peak_loaded_chunks = streaming.peak_loaded_chunks.max(stats.loaded_chunks);
        let position = walker.position();
        write_event(
            &mut events,
            tick,
            "tick",
            &TickPayload {
                position: position.to_array(),
                grounded: walker.body.grounded,
                stats,
            },
        )?;
        tick = tick.advance(1);
    }

    manager.finish_pending();
    if let Some(sink) = events.as_mut() {
        sink.flush()?;
    }

    let stats = manager.stats();
    streaming.ticks = cfg.ticks;
    streaming.chunks_generated = stats.chunks_generated;
    streaming.chunks_updated = stats.chunks_updated;
    streaming.chunks_unloaded = stats.chunks_unloaded;
    streaming.height_maps_generated = stats.height_maps_generated;
    streaming.final_loaded_chunks = stats.loaded_chunks;
    streaming.peak_loaded_chunks = streaming.peak_loaded_chunks.max(stats.loaded_chunks);
    if cfg.ticks > 0 {
        streaming.avg_update_time_us = total_update_us as f64 / cfg.ticks as f64;
    }

    let result = if stats.pending == 0 && stats.in_flight == 0 {
        RunResult::Pass
    } else {
        RunResult::Fail
    };

    if let Some(path) = cfg.metrics.as_ref() {
        let report = MetricsReportBuilder::new(cfg.run_name.as_str())
            .result(result)
            .streaming(streaming.clone())
            .queries(queries.clone())
            .execution(ExecutionMetrics {
                duration_seconds: started.elapsed().as_secs_f64(),
                worker_threads,
            })
            .build();
        MetricsSink::create(path)?
            .write(&report)
            .with_context(|| format!("failed to write metrics to {}", path.display()))?;
    }

    info!(
        loaded = stats.loaded_chunks,
        generated = stats.chunks_generated,
        unloaded = stats.chunks_unloaded,
        height_maps = stats.height_maps_generated,
        ray_hits = queries.ray_hits,
        rays = queries.rays_cast,
        avg_update_us = streaming.avg_update_time_us,
        "headless run finished"
    );

    Ok(RunSummary {
        result,
        stats,
        streaming,
        queries,
    })
}

/// Alternate between digging the picked block and building on its face.
fn edit(
    manager: &mut ChunkManager,
    events: &mut Option<JsonlSink>,
    tick: SimTick,
    picked: &RayResult,
) -> Result<()> {
    let Some(hit) = picked.hit else {
        return Ok(());
    };
    let dig = (tick.0 / EDIT_INTERVAL) % 2 == 1;
    let (action, voxel) = if dig {
        (manager.remove_block(hit).map(|_| "remove"), hit)
    } else {
        let target = picked.placement().unwrap_or(hit);
        (manager.add_block(picked).then_some("place"), target)
    };
    if let Some(action) = action {
        debug!(action, voxel = ?voxel, "edited world");
        write_event(
            events,
            tick,
            "edit",
            &EditPayload {
                action,
                voxel: voxel.to_array(),
            },
        )?;
    }
    Ok(())
}
