use glam::IVec3;
use voxelstream_core::{ChunkPos, LocalPos, WorldError, CHUNK_VOLUME};

use crate::block::{Block, BlockType};
use crate::heightmap::{HeightMap, MAP_DEPTH, MAP_WIDTH};

/// Renderer-facing mesh signal.
///
/// The world never builds geometry itself. It bumps the revision whenever the
/// chunk contents change and the renderer rebuilds when it sees a stale handle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeshHandle {
    revision: u64,
    stale: bool,
}

impl MeshHandle {
    /// Number of rebuild signals sent so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// True when the renderer has not caught up with the latest revision.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Signal that the geometry must be rebuilt.
    pub fn mark_stale(&mut self) {
        self.revision += 1;
        self.stale = true;
    }

    /// Consume the stale flag; true if a rebuild was pending.
    pub fn take_stale(&mut self) -> bool {
        std::mem::take(&mut self.stale)
    }
}

/// Dense 16x16x16 block grid plus a dirty flag and mesh handle.
#[derive(Debug, Clone)]
pub struct Chunk {
    origin: ChunkPos,
    blocks: Vec<Option<Block>>,
    dirty: bool,
    generated: bool,
    mesh: MeshHandle,
}

impl Chunk {
    /// Allocate an empty, ungenerated chunk.
    pub fn new(origin: ChunkPos) -> Self {
        Self {
            origin,
            blocks: vec![None; CHUNK_VOLUME],
            dirty: false,
            generated: false,
            mesh: MeshHandle::default(),
        }
    }

    /// World-space origin.
    #[inline]
    pub fn origin(&self) -> ChunkPos {
        self.origin
    }

    /// Fill the surface from `height_map` and signal the first mesh build.
    ///
    /// Each column whose surface lies inside this chunk's Y range gets one
    /// block of the default type at `height - origin.y`. Calling this on an
    /// already generated chunk does nothing.
    pub fn generate(&mut self, height_map: &HeightMap) {
        if self.generated {
            return;
        }

        for local_z in 0..MAP_DEPTH {
            for local_x in 0..MAP_WIDTH {
                let Some(height) = height_map.surface_in(local_x, local_z, self.origin.y) else {
                    continue;
                };
                let cell = IVec3::new(local_x as i32, height - self.origin.y, local_z as i32);
                if let Some(local) = LocalPos::from_ivec3(cell) {
                    self.set(local, BlockType::default());
                }
            }
        }

        self.generated = true;
        self.dirty = false;
        self.mesh.mark_stale();
    }

    /// True once [`Chunk::generate`] ran.
    pub fn is_generated(&self) -> bool {
        self.generated
    }

    /// Returns true when `local` is inside the chunk and holds a block.
    pub fn is_block_active(&self, local: IVec3) -> bool {
        self.block(local).is_some()
    }

    /// Block at a signed local position; `None` when empty or outside.
    pub fn block(&self, local: IVec3) -> Option<&Block> {
        let local = LocalPos::from_ivec3(local)?;
        self.blocks[local.index()].as_ref()
    }

    /// Place (or overwrite) a block.
    pub fn add_block(&mut self, local: IVec3, block_type: BlockType) -> Result<(), WorldError> {
        let local = LocalPos::from_ivec3(local).ok_or(WorldError::LocalOutOfBounds(local))?;
        self.set(local, block_type);
        Ok(())
    }

    /// Clear a cell. Returns the removed block, if there was one.
    pub fn remove_block(&mut self, local: IVec3) -> Option<Block> {
        let local = LocalPos::from_ivec3(local)?;
        self.blocks[local.index()].take()
    }

    /// Signal the mesh collaborator that contents changed.
    pub fn update(&mut self) {
        self.mesh.mark_stale();
    }

    /// Edited since the last [`Chunk::update`] pass.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flag the chunk for an update pass.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Clear the dirty flag, returning its previous value.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Mesh signal for the renderer.
    pub fn mesh(&self) -> &MeshHandle {
        &self.mesh
    }

    /// Mutable mesh signal, for renderers consuming the stale flag.
    pub fn mesh_mut(&mut self) -> &mut MeshHandle {
        &mut self.mesh
    }

    /// Occupied cells in storage order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.blocks.iter().flatten()
    }

    /// Number of occupied cells.
    pub fn block_count(&self) -> usize {
        self.blocks().count()
    }

    fn set(&mut self, local: LocalPos, block_type: BlockType) {
        self.blocks[local.index()] = Some(Block::new(block_type, local, self.origin));
    }
}
