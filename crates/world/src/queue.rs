use std::collections::{HashSet, VecDeque};

use voxelstream_core::ChunkPos;

/// FIFO of chunk coordinates with set-based deduplication.
///
/// The member set always equals the set of queued coordinates. A coordinate
/// leaves the set when it is popped, so it can be queued again afterwards.
#[derive(Debug, Default)]
pub struct PendingQueue {
    order: VecDeque<ChunkPos>,
    members: HashSet<ChunkPos>,
}

impl PendingQueue {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `pos` unless it is already queued. Returns whether it was added.
    pub fn push(&mut self, pos: ChunkPos) -> bool {
        if !self.members.insert(pos) {
            return false;
        }
        self.order.push_back(pos);
        true
    }

    /// Remove the oldest coordinate.
    pub fn pop(&mut self) -> Option<ChunkPos> {
        let pos = self.order.pop_front()?;
        self.members.remove(&pos);
        Some(pos)
    }

    /// Put a popped coordinate back at the front, ahead of everything queued.
    ///
    /// Returns false if it was queued again in the meantime.
    pub fn push_front(&mut self, pos: ChunkPos) -> bool {
        if !self.members.insert(pos) {
            return false;
        }
        self.order.push_front(pos);
        true
    }

    /// Drop a coordinate wherever it sits. Returns whether it was queued.
    pub fn remove(&mut self, pos: ChunkPos) -> bool {
        if !self.members.remove(&pos) {
            return false;
        }
        self.order.retain(|queued| *queued != pos);
        true
    }

    /// True while `pos` waits in the queue.
    pub fn contains(&self, pos: ChunkPos) -> bool {
        self.members.contains(&pos)
    }

    /// Number of queued coordinates.
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.order.len(), self.members.len());
        self.order.len()
    }

    /// True when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Queued coordinates, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = ChunkPos> + '_ {
        self.order.iter().copied()
    }
}
