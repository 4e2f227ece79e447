#![warn(missing_docs)]
//! Chunked voxel world: terrain height maps, dense chunks, the deduplicated
//! generation queue and the manager that streams chunks around a player.

mod block;
mod chunk;
mod config;
mod height;
mod heightmap;
mod manager;
mod pool;
mod queue;

pub use block::*;
pub use chunk::*;
pub use config::*;
pub use height::*;
pub use heightmap::*;
pub use manager::*;
pub use pool::*;
pub use queue::*;
