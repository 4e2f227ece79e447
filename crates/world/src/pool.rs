//! Background chunk generation.
//!
//! Workers receive chunk coordinates, build the column height map when the
//! caller does not supply one, generate the chunk and send the finished result
//! back. Workers never touch manager state; the manager publishes results on
//! its own thread.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, Sender};
use thiserror::Error;
use tracing::{debug, trace};
use voxelstream_core::ChunkPos;

use crate::chunk::Chunk;
use crate::height::HeightFunction;
use crate::heightmap::{HeightMap, HeightValidation};

/// Failures starting or feeding the worker pool.
#[derive(Debug, Error)]
pub enum PoolError {
    /// The OS refused to start a worker thread.
    #[error("failed to spawn generation worker: {0}")]
    Spawn(#[from] std::io::Error),
    /// Every worker has exited.
    #[error("generation workers are gone")]
    Disconnected,
}

/// Work item for a generation worker.
#[derive(Debug, Clone)]
pub struct GenerationJob {
    /// Chunk to generate.
    pub pos: ChunkPos,
    /// Cached height map for the column, if the manager has one.
    pub height_map: Option<Arc<HeightMap>>,
}

/// Finished chunk sent back to the manager.
#[derive(Debug)]
pub struct GenerationResult {
    /// Chunk coordinate.
    pub pos: ChunkPos,
    /// Generated chunk, ready to publish.
    pub chunk: Chunk,
    /// Height map used for the chunk.
    pub height_map: Arc<HeightMap>,
    /// True when the worker built `height_map` itself.
    pub built_height_map: bool,
}

/// Fixed set of named worker threads fed through crossbeam channels.
pub struct GenerationPool {
    jobs: Option<Sender<GenerationJob>>,
    results: Receiver<GenerationResult>,
    workers: Vec<JoinHandle<()>>,
}

impl GenerationPool {
    /// Start `threads` workers (at least one).
    pub fn spawn(
        threads: usize,
        height_fn: Arc<dyn HeightFunction>,
        validation: HeightValidation,
    ) -> Result<Self, PoolError> {
        let (tx_job, rx_job) = unbounded::<GenerationJob>();
        let (tx_done, rx_done) = unbounded::<GenerationResult>();

        let mut workers = Vec::with_capacity(threads.max(1));
        for index in 0..threads.max(1) {
            let rx_job = rx_job.clone();
            let tx_done = tx_done.clone();
            let height_fn = Arc::clone(&height_fn);

            let handle = thread::Builder::new()
                .name(format!("chunk-gen-{index}"))
                .spawn(move || run_worker(rx_job, tx_done, height_fn, validation))?;
            workers.push(handle);
        }
        debug!(workers = workers.len(), "generation pool started");

        Ok(Self {
            jobs: Some(tx_job),
            results: rx_done,
            workers,
        })
    }

    /// Number of worker threads.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Hand a job to the next idle worker.
    pub fn submit(&self, job: GenerationJob) -> Result<(), PoolError> {
        let jobs = self.jobs.as_ref().ok_or(PoolError::Disconnected)?;
        jobs.send(job).map_err(|_| PoolError::Disconnected)
    }

    /// Collect one finished result without blocking.
    pub fn try_recv(&self) -> Option<GenerationResult> {
        self.results.try_recv().ok()
    }

    /// Wait for the next finished result. `None` once every worker has exited.
    pub fn recv(&self) -> Option<GenerationResult> {
        self.results.recv().ok()
    }
}

impl Drop for GenerationPool {
    fn drop(&mut self) {
        // Closing the job channel ends every worker loop.
        self.jobs.take();
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}

fn run_worker(
    jobs: Receiver<GenerationJob>,
    results: Sender<GenerationResult>,
    height_fn: Arc<dyn HeightFunction>,
    validation: HeightValidation,
) {
    while let Ok(job) = jobs.recv() {
        let (height_map, built_height_map) = match job.height_map {
            Some(map) => (map, false),
            None => (
                Arc::new(HeightMap::generate(job.pos, height_fn.as_ref(), validation)),
                true,
            ),
        };

        let mut chunk = Chunk::new(job.pos);
        chunk.generate(&height_map);
        trace!(chunk = %job.pos, "worker generated chunk");

        let result = GenerationResult {
            pos: job.pos,
            chunk,
            height_map,
            built_height_map,
        };
        if results.send(result).is_err() {
            break;
        }
    }
}
