//! Enemy storage, seek steering and attack cooldowns.
//!
//! Enemies walk straight at the player every frame. There is no pathfinding
//! and no stopping distance; an enemy that reaches the player keeps pressing
//! into them while its attack cooldown gates the damage.

use std::collections::BTreeMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entity::EntityId;

/// A live enemy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Current world position.
    pub position: Vec3,
    /// Remaining health. May dip below zero before the enemy is removed.
    pub health: i32,
    /// Seek speed in units per reference frame.
    pub speed: f32,
    /// Time until the next attack is allowed. Ready when `<= 0`.
    pub attack_cooldown_ms: f32,
}

impl Enemy {
    /// Returns `true` once health has reached zero or below.
    #[must_use]
    pub const fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Returns `true` if the attack cooldown has run out.
    #[must_use]
    pub fn can_attack(&self) -> bool {
        self.attack_cooldown_ms <= 0.0
    }
}

/// What [`EnemyManager::apply_damage`] did to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// The enemy is still standing.
    Survived {
        /// Health left after the hit
        health: i32,
    },
    /// This hit brought health to zero or below. Reported once per enemy.
    Defeated,
    /// Health was already at zero or below before this hit.
    AlreadyDefeated,
}

/// Owns every live enemy.
///
/// # Example
///
/// ```
/// use glam::Vec3;
/// use strafe_core::enemy::{DamageOutcome, EnemyManager};
/// use strafe_core::entity::EntityId;
///
/// let mut enemies = EnemyManager::new(50, 0.02, 1.0);
/// let id = enemies.spawn(EntityId::new(0), 5.0, -5.0);
///
/// assert_eq!(enemies.get(id).unwrap().position, Vec3::new(5.0, 1.0, -5.0));
/// assert_eq!(enemies.apply_damage(id, 25), Some(DamageOutcome::Survived { health: 25 }));
/// assert_eq!(enemies.apply_damage(id, 25), Some(DamageOutcome::Defeated));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyManager {
    enemies: BTreeMap<EntityId, Enemy>,
    spawn_health: i32,
    spawn_speed: f32,
    spawn_height: f32,
}

impl EnemyManager {
    /// Creates an empty manager whose enemies spawn with the given health,
    /// speed (units per reference frame) and height.
    #[must_use]
    pub fn new(spawn_health: i32, spawn_speed: f32, spawn_height: f32) -> Self {
        Self {
            enemies: BTreeMap::new(),
            spawn_health,
            spawn_speed,
            spawn_height,
        }
    }

    /// Spawns an enemy on the floor plane at `(x, z)` with a ready attack.
    pub fn spawn(&mut self, id: EntityId, x: f32, z: f32) -> EntityId {
        let enemy = Enemy {
            position: Vec3::new(x, self.spawn_height, z),
            health: self.spawn_health,
            speed: self.spawn_speed,
            attack_cooldown_ms: 0.0,
        };
        debug!(enemy = %id, position = ?enemy.position, "enemy spawned");
        self.enemies.insert(id, enemy);
        id
    }

    /// Steps every enemy toward `player_position`.
    ///
    /// Each enemy moves `speed * frame_scale` along the straight line to the
    /// player. An enemy standing exactly on the player does not move.
    pub fn advance_seek(&mut self, player_position: Vec3, frame_scale: f32) {
        for enemy in self.enemies.values_mut() {
            let direction = (player_position - enemy.position).normalize_or_zero();
            enemy.position += direction * enemy.speed * frame_scale;
        }
    }

    /// Counts every attack cooldown down by `elapsed_ms`.
    ///
    /// Cooldowns may go negative; they are only compared against zero.
    pub fn tick_cooldowns(&mut self, elapsed_ms: f32) {
        for enemy in self.enemies.values_mut() {
            enemy.attack_cooldown_ms -= elapsed_ms;
        }
    }

    /// Subtracts `amount` from an enemy's health.
    ///
    /// Returns `None` if no enemy has this id. The caller removes an enemy
    /// reported as [`DamageOutcome::Defeated`].
    pub fn apply_damage(&mut self, id: EntityId, amount: i32) -> Option<DamageOutcome> {
        let enemy = self.enemies.get_mut(&id)?;
        if enemy.is_defeated() {
            return Some(DamageOutcome::AlreadyDefeated);
        }
        enemy.health -= amount;
        if enemy.is_defeated() {
            debug!(enemy = %id, "enemy defeated");
            Some(DamageOutcome::Defeated)
        } else {
            Some(DamageOutcome::Survived {
                health: enemy.health,
            })
        }
    }

    /// Removes an enemy. Removing an unknown id is a no-op.
    pub fn remove(&mut self, id: EntityId) -> Option<Enemy> {
        self.enemies.remove(&id)
    }

    /// Returns an enemy by id.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.get(&id)
    }

    /// Returns a mutable enemy by id.
    #[must_use]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Enemy> {
        self.enemies.get_mut(&id)
    }

    /// Iterates live enemies in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Enemy)> {
        self.enemies.iter().map(|(id, e)| (*id, e))
    }

    /// Iterates live enemies mutably in spawn order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut Enemy)> {
        self.enemies.iter_mut().map(|(id, e)| (*id, e))
    }

    /// Ids of live enemies in spawn order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.enemies.keys().copied()
    }

    /// Number of live enemies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    /// Returns `true` if no enemy is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Removes every enemy.
    pub fn clear(&mut self) {
        self.enemies.clear();
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> EnemyManager {
        EnemyManager::new(50, 0.02, 1.0)
    }

    mod spawn_tests {
        use super::*;

        #[test]
        fn spawn_uses_configured_stats() {
            let mut enemies = manager();
            let id = enemies.spawn(EntityId::new(4), -5.0, -10.0);
            let enemy = enemies.get(id).unwrap();

            assert_eq!(enemy.position, Vec3::new(-5.0, 1.0, -10.0));
            assert_eq!(enemy.health, 50);
            assert_eq!(enemy.speed, 0.02);
            assert_eq!(enemy.attack_cooldown_ms, 0.0);
            assert!(enemy.can_attack());
        }

        #[test]
        fn iteration_is_spawn_order() {
            let mut enemies = manager();
            enemies.spawn(EntityId::new(2), 0.0, 0.0);
            enemies.spawn(EntityId::new(5), 0.0, 0.0);
            enemies.spawn(EntityId::new(9), 0.0, 0.0);
            let ids: Vec<_> = enemies.ids().collect();
            assert_eq!(ids, vec![EntityId::new(2), EntityId::new(5), EntityId::new(9)]);
        }
    }

    mod seek_tests {
        use super::*;

        #[test]
        fn enemy_steps_toward_player() {
            let mut enemies = manager();
            let id = enemies.spawn(EntityId::new(0), 10.0, 0.0);
            let player = Vec3::new(0.0, 1.0, 0.0);

            enemies.advance_seek(player, 1.0);
            let pos = enemies.get(id).unwrap().position;
            assert!((pos - Vec3::new(9.98, 1.0, 0.0)).length() < 1e-5);
        }

        #[test]
        fn seek_scales_with_frame_time() {
            let mut enemies = manager();
            let id = enemies.spawn(EntityId::new(0), 0.0, -10.0);
            let player = Vec3::new(0.0, 1.0, 0.0);

            enemies.advance_seek(player, 3.0);
            let pos = enemies.get(id).unwrap().position;
            assert!((pos.z - (-9.94)).abs() < 1e-5);
        }

        #[test]
        fn enemy_on_player_stays_put() {
            let mut enemies = manager();
            let id = enemies.spawn(EntityId::new(0), 0.0, 0.0);
            let player = Vec3::new(0.0, 1.0, 0.0);

            enemies.advance_seek(player, 1.0);
            assert_eq!(enemies.get(id).unwrap().position, player);
        }

        #[test]
        fn seek_follows_player_height() {
            let mut enemies = manager();
            let id = enemies.spawn(EntityId::new(0), 0.0, -1.0);
            enemies.advance_seek(Vec3::new(0.0, 2.0, -1.0), 1.0);
            let pos = enemies.get(id).unwrap().position;
            assert!((pos.y - 1.02).abs() < 1e-6);
        }
    }

    mod cooldown_tests {
        use super::*;

        #[test]
        fn cooldown_counts_down_past_zero() {
            let mut enemies = manager();
            let id = enemies.spawn(EntityId::new(0), 0.0, 0.0);
            enemies.get_mut(id).unwrap().attack_cooldown_ms = 1000.0;

            enemies.tick_cooldowns(600.0);
            assert!(!enemies.get(id).unwrap().can_attack());

            enemies.tick_cooldowns(600.0);
            let enemy = enemies.get(id).unwrap();
            assert_eq!(enemy.attack_cooldown_ms, -200.0);
            assert!(enemy.can_attack());
        }
    }

    mod damage_tests {
        use super::*;

        #[test]
        fn two_hits_defeat_exactly_once() {
            let mut enemies = manager();
            let id = enemies.spawn(EntityId::new(0), 0.0, 0.0);

            assert_eq!(
                enemies.apply_damage(id, 25),
                Some(DamageOutcome::Survived { health: 25 })
            );
            assert_eq!(enemies.apply_damage(id, 25), Some(DamageOutcome::Defeated));
            assert_eq!(enemies.get(id).unwrap().health, 0);
            assert_eq!(
                enemies.apply_damage(id, 25),
                Some(DamageOutcome::AlreadyDefeated)
            );
            assert_eq!(enemies.get(id).unwrap().health, 0);
        }

        #[test]
        fn overkill_goes_negative() {
            let mut enemies = manager();
            let id = enemies.spawn(EntityId::new(0), 0.0, 0.0);
            assert_eq!(enemies.apply_damage(id, 80), Some(DamageOutcome::Defeated));
            assert_eq!(enemies.get(id).unwrap().health, -30);
        }

        #[test]
        fn unknown_enemy_is_none() {
            let mut enemies = manager();
            assert_eq!(enemies.apply_damage(EntityId::new(99), 25), None);
        }

        #[test]
        fn remove_then_clear() {
            let mut enemies = manager();
            let a = enemies.spawn(EntityId::new(0), 0.0, 0.0);
            enemies.spawn(EntityId::new(1), 0.0, 0.0);
            assert!(enemies.remove(a).is_some());
            assert!(enemies.remove(a).is_none());
            assert_eq!(enemies.len(), 1);
            enemies.clear();
            assert!(enemies.is_empty());
        }
    }
}
