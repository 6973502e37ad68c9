//! Gameplay events.
//!
//! Everything observable that happens to an entity during a frame is recorded
//! as a [`GameEvent`]. The game loop uses the log to keep the scene in sync
//! (spawns become `Scene::add`, removals become `Scene::remove`) and hands the
//! drained events back to the host in each
//! [`FrameReport`](crate::game::FrameReport) for telemetry and effects.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::entity::EntityId;
use crate::frontend::VisualKind;

/// Something that happened during a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A projectile was spawned by the fire action.
    ProjectileFired {
        /// New projectile
        id: EntityId,
        /// Spawn position
        origin: Vec3,
    },
    /// A projectile outlived its lifetime.
    ProjectileExpired {
        /// Removed projectile
        id: EntityId,
    },
    /// A projectile was removed to make room under the live cap.
    ProjectileEvicted {
        /// Removed projectile
        id: EntityId,
    },
    /// An enemy entered the world.
    EnemySpawned {
        /// New enemy
        id: EntityId,
        /// Spawn position
        position: Vec3,
    },
    /// A projectile struck an enemy. The projectile is gone.
    EnemyHit {
        /// Enemy struck
        enemy: EntityId,
        /// Projectile consumed by the hit
        projectile: EntityId,
        /// Enemy health after the hit
        remaining: i32,
    },
    /// An enemy's health reached zero and it was removed.
    EnemyDefeated {
        /// Removed enemy
        id: EntityId,
    },
    /// An enemy attack landed on the player.
    PlayerDamaged {
        /// Attacking enemy
        by: EntityId,
        /// Player health after the attack
        remaining: i32,
    },
    /// Player health reached zero. The game is over.
    PlayerDefeated,
    /// An entity was cleared by a reset.
    EntityDespawned {
        /// Removed entity
        id: EntityId,
    },
}

impl GameEvent {
    /// Entity that entered the scene with this event, with its kind and
    /// position.
    #[must_use]
    pub const fn spawned(&self) -> Option<(EntityId, VisualKind, Vec3)> {
        match *self {
            Self::ProjectileFired { id, origin } => Some((id, VisualKind::Projectile, origin)),
            Self::EnemySpawned { id, position } => Some((id, VisualKind::Enemy, position)),
            _ => None,
        }
    }

    /// Entity that left the scene with this event.
    #[must_use]
    pub const fn removed(&self) -> Option<EntityId> {
        match *self {
            Self::ProjectileExpired { id }
            | Self::ProjectileEvicted { id }
            | Self::EnemyDefeated { id }
            | Self::EntityDespawned { id } => Some(id),
            Self::EnemyHit { projectile, .. } => Some(projectile),
            _ => None,
        }
    }
}

/// Ordered buffer of [`GameEvent`]s.
///
/// # Example
///
/// ```
/// use strafe_core::event::{EventLog, GameEvent};
///
/// let mut log = EventLog::new();
/// log.push(GameEvent::PlayerDefeated);
/// assert_eq!(log.len(), 1);
///
/// let events = log.drain();
/// assert_eq!(events, vec![GameEvent::PlayerDefeated]);
/// assert!(log.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Appends an event.
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Takes every recorded event, leaving the log empty.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Recorded events in order.
    #[must_use]
    pub fn as_slice(&self) -> &[GameEvent] {
        &self.events
    }

    /// Counts events satisfying `predicate`.
    pub fn count_matching(&self, predicate: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
