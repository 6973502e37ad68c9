//! Projectile storage and flight.
//!
//! Projectiles fly in a straight line on the floor plane at constant velocity.
//! They leave the live set when they hit an enemy (see
//! [`ProjectileHitResolver`](crate::resolver::ProjectileHitResolver)), when
//! they outlive their lifetime, or when the live cap forces out the oldest.
//!
//! # Storage
//!
//! Projectiles are kept in a `BTreeMap` keyed by [`EntityId`]. Ids are handed
//! out in spawn order, so iteration is oldest-first and removal by id never
//! shifts the position of another projectile.

use std::collections::BTreeMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entity::EntityId;

/// A projectile in flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Current world position.
    pub position: Vec3,
    /// Displacement per reference frame. Constant for the projectile's life.
    pub velocity: Vec3,
    /// Time since spawn in milliseconds.
    pub age_ms: f32,
}

impl Projectile {
    /// Creates a projectile at `origin` flying toward `facing_yaw` at `speed`.
    ///
    /// Yaw zero faces `-Z`; the velocity is
    /// `(-sin yaw, 0, -cos yaw) * speed`.
    #[must_use]
    pub fn fired_from(origin: Vec3, facing_yaw: f32, speed: f32) -> Self {
        Self {
            position: origin,
            velocity: Vec3::new(-facing_yaw.sin(), 0.0, -facing_yaw.cos()) * speed,
            age_ms: 0.0,
        }
    }
}

/// Result of [`ProjectileManager::spawn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnedProjectile {
    /// Id of the new projectile.
    pub id: EntityId,
    /// Oldest projectile removed to respect the live cap, if any.
    pub evicted: Option<EntityId>,
}

/// Owns every live projectile.
///
/// # Example
///
/// ```
/// use glam::Vec3;
/// use strafe_core::entity::EntityId;
/// use strafe_core::projectile::ProjectileManager;
///
/// let mut projectiles = ProjectileManager::new(0.5, 5000.0, 64);
/// let spawned = projectiles.spawn(EntityId::new(0), Vec3::ZERO, 0.0);
///
/// projectiles.advance(1.0);
/// let p = projectiles.get(spawned.id).unwrap();
/// assert_eq!(p.position, Vec3::new(0.0, 0.0, -0.5));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileManager {
    projectiles: BTreeMap<EntityId, Projectile>,
    speed: f32,
    lifetime_ms: f32,
    max_live: usize,
}

impl ProjectileManager {
    /// Creates an empty manager.
    ///
    /// * `speed` - units per reference frame
    /// * `lifetime_ms` - projectiles older than this expire
    /// * `max_live` - live cap; spawning past it evicts the oldest
    #[must_use]
    pub fn new(speed: f32, lifetime_ms: f32, max_live: usize) -> Self {
        Self {
            projectiles: BTreeMap::new(),
            speed,
            lifetime_ms,
            max_live,
        }
    }

    /// Spawns a projectile at `origin` facing `facing_yaw`.
    ///
    /// `id` must be fresh; the caller allocates it so projectiles and enemies
    /// share one id space.
    pub fn spawn(&mut self, id: EntityId, origin: Vec3, facing_yaw: f32) -> SpawnedProjectile {
        let evicted = if self.projectiles.len() >= self.max_live {
            self.projectiles.pop_first().map(|(oldest, _)| oldest)
        } else {
            None
        };
        if let Some(oldest) = evicted {
            debug!(projectile = %oldest, "projectile evicted by live cap");
        }

        let projectile = Projectile::fired_from(origin, facing_yaw, self.speed);
        debug!(projectile = %id, ?origin, velocity = ?projectile.velocity, "projectile spawned");
        self.projectiles.insert(id, projectile);

        SpawnedProjectile { id, evicted }
    }

    /// Moves every projectile by `velocity * frame_scale`.
    pub fn advance(&mut self, frame_scale: f32) {
        for projectile in self.projectiles.values_mut() {
            projectile.position += projectile.velocity * frame_scale;
        }
    }

    /// Ages every projectile by `elapsed_ms` and removes the expired ones.
    ///
    /// Returns the removed ids in id order.
    pub fn expire(&mut self, elapsed_ms: f32) -> Vec<EntityId> {
        let lifetime = self.lifetime_ms;
        let mut expired = Vec::new();
        self.projectiles.retain(|id, projectile| {
            projectile.age_ms += elapsed_ms;
            let alive = projectile.age_ms < lifetime;
            if !alive {
                expired.push(*id);
            }
            alive
        });
        if !expired.is_empty() {
            debug!(count = expired.len(), "projectiles expired");
        }
        expired
    }

    /// Removes a projectile. Removing an unknown id is a no-op.
    pub fn remove(&mut self, id: EntityId) -> Option<Projectile> {
        self.projectiles.remove(&id)
    }

    /// Returns a projectile by id.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Projectile> {
        self.projectiles.get(&id)
    }

    /// Iterates live projectiles oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Projectile)> {
        self.projectiles.iter().map(|(id, p)| (*id, p))
    }

    /// Ids of live projectiles, oldest-first.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.projectiles.keys().copied()
    }

    /// Number of live projectiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    /// Returns `true` if no projectile is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    /// Removes every projectile.
    pub fn clear(&mut self) {
        self.projectiles.clear();
    }
}

// =============================================================================
// Tests
// =============================================================================
