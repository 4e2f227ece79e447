use glam::IVec3;
use thiserror::Error;

/// Contract violations reported by world mutation APIs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    /// A local position fell outside the chunk extents.
    #[error("local position {0} is outside the chunk extents")]
    LocalOutOfBounds(IVec3),
}
