//! Entity identifiers.
//!
//! Projectiles and enemies share one id space so the scene collaborator can
//! key visual objects by [`EntityId`] alone. Ids are assigned monotonically by
//! an [`IdAllocator`] and never reused within a session, which also makes id
//! order equal spawn order.
//!
//! # Example
//!
//! ```
//! use strafe_core::entity::{EntityId, IdAllocator};
//!
//! let mut ids = IdAllocator::new();
//! let first = ids.allocate();
//! let second = ids.allocate();
//!
//! assert!(first < second);
//! assert_eq!(first, EntityId::new(0));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a projectile or enemy.
///
/// Ordered by numeric value; collections keyed by `EntityId` iterate in spawn
/// order.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates a new `EntityId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<EntityId> for u64 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// Monotonic source of [`EntityId`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next_id: u64,
}

impl IdAllocator {
    /// Creates an allocator whose first id is 0.
    #[must_use]
    pub const fn new() -> Self {
        Self { next_id: 0 }
    }

    /// Hands out the next unused id.
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Returns the id the next call to [`allocate`](Self::allocate) will yield.
    #[must_use]
    pub const fn peek(&self) -> EntityId {
        EntityId::new(self.next_id)
    }
}
