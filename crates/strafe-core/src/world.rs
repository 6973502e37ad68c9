//! The owned game-state aggregate.
//!
//! [`World`] holds everything a frame mutates: the player, the projectile and
//! enemy managers and the id allocator they share. The game loop owns exactly
//! one `World`; resolvers receive it by `&mut` and nothing else holds
//! references into it between frames.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::camera::Camera;
use crate::config::GameConfig;
use crate::enemy::EnemyManager;
use crate::entity::{EntityId, IdAllocator};
use crate::event::{EventLog, GameEvent};
use crate::projectile::ProjectileManager;

/// The player: a camera with health.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Eye position and view orientation.
    pub camera: Camera,
    /// Remaining health. The game ends when it reaches zero or below.
    pub health: i32,
    /// Camera-local movement requested this frame. Reset after it is applied.
    pub velocity_intent: Vec3,
}

impl Player {
    /// Creates a player standing at the plane origin at `eye_height`.
    #[must_use]
    pub fn new(health: i32, eye_height: f32) -> Self {
        Self {
            camera: Camera::at_position(Vec3::new(0.0, eye_height, 0.0)),
            health,
            velocity_intent: Vec3::ZERO,
        }
    }

    /// World position of the player's eye.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.camera.position
    }

    /// Returns `true` once health has reached zero or below.
    #[must_use]
    pub const fn is_defeated(&self) -> bool {
        self.health <= 0
    }
}

/// Player, projectiles and enemies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// The player.
    pub player: Player,
    /// Live projectiles.
    pub projectiles: ProjectileManager,
    /// Live enemies.
    pub enemies: EnemyManager,
    ids: IdAllocator,
}

impl World {
    /// Creates an empty world (no enemies) from `config`.
    #[must_use]
    pub fn empty(config: &GameConfig) -> Self {
        Self {
            player: Player::new(config.player_health, config.player_eye_height),
            projectiles: ProjectileManager::new(
                config.projectile_speed,
                config.projectile_lifetime_ms,
                config.max_projectiles,
            ),
            enemies: EnemyManager::new(
                config.enemy_health,
                config.enemy_speed,
                config.enemy_spawn_height,
            ),
            ids: IdAllocator::new(),
        }
    }

    /// Creates the starting world: a fresh player and one enemy per spawn
    /// point. Spawns are recorded in `events`.
    #[must_use]
    pub fn new(config: &GameConfig, events: &mut EventLog) -> Self {
        let mut world = Self::empty(config);
        for point in &config.enemy_spawn_points {
            world.spawn_enemy(point.x, point.y, events);
        }
        world
    }

    /// Spawns an enemy at `(x, z)` and records it.
    pub fn spawn_enemy(&mut self, x: f32, z: f32, events: &mut EventLog) -> EntityId {
        let id = self.enemies.spawn(self.ids.allocate(), x, z);
        if let Some(enemy) = self.enemies.get(id) {
            events.push(GameEvent::EnemySpawned {
                id,
                position: enemy.position,
            });
        }
        id
    }

    /// Hands out a fresh entity id from the shared allocator.
    pub fn allocate_id(&mut self) -> EntityId {
        self.ids.allocate()
    }

    /// Fires a projectile from the player's eye along the player's yaw.
    pub fn fire(&mut self, events: &mut EventLog) -> EntityId {
        let origin = self.player.position();
        let spawned = self
            .projectiles
            .spawn(self.ids.allocate(), origin, self.player.camera.yaw);
        if let Some(evicted) = spawned.evicted {
            events.push(GameEvent::ProjectileEvicted { id: evicted });
        }
        events.push(GameEvent::ProjectileFired {
            id: spawned.id,
            origin,
        });
        spawned.id
    }

    /// Applies and clears the player's movement intent.
    ///
    /// The intent is scaled by `frame_scale` and applied along the camera's
    /// yaw-local axes.
    pub fn apply_player_motion(&mut self, frame_scale: f32) {
        let delta = self.player.velocity_intent * frame_scale;
        self.player.camera.translate_local(delta);
        self.player.velocity_intent = Vec3::ZERO;
    }

    /// Ids of every live projectile and enemy.
    #[must_use]
    pub fn entity_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<_> = self.projectiles.ids().chain(self.enemies.ids()).collect();
        ids.sort();
        ids
    }

    /// Position of a live projectile or enemy.
    #[must_use]
    pub fn entity_position(&self, id: EntityId) -> Option<Vec3> {
        self.projectiles
            .get(id)
            .map(|p| p.position)
            .or_else(|| self.enemies.get(id).map(|e| e.position))
    }

    /// Removes every entity and restores the starting state.
    ///
    /// Removals are recorded as [`GameEvent::EntityDespawned`], followed by the
    /// spawn events of the fresh enemies. Ids keep counting up so no id is
    /// reused within a session.
    pub fn reset(&mut self, config: &GameConfig, events: &mut EventLog) {
        for id in self.entity_ids() {
            events.push(GameEvent::EntityDespawned { id });
        }
        let ids = std::mem::take(&mut self.ids);
        *self = Self::empty(config);
        self.ids = ids;
        for point in &config.enemy_spawn_points {
            self.spawn_enemy(point.x, point.y, events);
        }
        debug!(enemies = self.enemies.len(), "world reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    #[test]
    fn new_world_matches_starting_state() {
        let mut events = EventLog::new();
        let world = World::new(&config(), &mut events);

        assert_eq!(world.player.health, 100);
        assert_eq!(world.player.position(), Vec3::new(0.0, 1.6, 0.0));
        assert!(world.projectiles.is_empty());

        let positions: Vec<_> = world.enemies.iter().map(|(_, e)| e.position).collect();
        assert_eq!(
            positions,
            vec![Vec3::new(5.0, 1.0, -5.0), Vec3::new(-5.0, 1.0, -10.0)]
        );
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn fire_uses_eye_position_and_yaw() {
        let mut events = EventLog::new();
        let mut world = World::empty(&config());
        world.player.camera.set_orientation(std::f32::consts::FRAC_PI_2, 0.3);

        let id = world.fire(&mut events);
        let p = world.projectiles.get(id).unwrap();
        assert_eq!(p.position, Vec3::new(0.0, 1.6, 0.0));
        assert!((p.velocity - Vec3::new(-0.5, 0.0, 0.0)).length() < 1e-6);
        assert_eq!(
            events.as_slice(),
            &[GameEvent::ProjectileFired {
                id,
                origin: Vec3::new(0.0, 1.6, 0.0)
            }]
        );
    }

    #[test]
    fn fire_past_cap_records_eviction() {
        let config = GameConfig {
            max_projectiles: 1,
            ..GameConfig::default()
        };
        let mut events = EventLog::new();
        let mut world = World::empty(&config);

        let first = world.fire(&mut events);
        world.fire(&mut events);
        assert!(events
            .as_slice()
            .contains(&GameEvent::ProjectileEvicted { id: first }));
        assert_eq!(world.projectiles.len(), 1);
    }

    #[test]
    fn player_motion_is_applied_once() {
        let mut world = World::empty(&config());
        world.player.velocity_intent = Vec3::new(0.0, 0.0, -0.1);

        world.apply_player_motion(1.0);
        world.apply_player_motion(1.0);
        assert!((world.player.position() - Vec3::new(0.0, 1.6, -0.1)).length() < 1e-6);
        assert_eq!(world.player.velocity_intent, Vec3::ZERO);
    }

    #[test]
    fn ids_are_shared_across_kinds() {
        let mut events = EventLog::new();
        let mut world = World::new(&config(), &mut events);
        let projectile = world.fire(&mut events);
        assert_eq!(projectile, EntityId::new(2));
        assert_eq!(world.entity_ids().len(), 3);
        assert!(world.entity_position(projectile).is_some());
        assert!(world.entity_position(EntityId::new(0)).is_some());
        assert!(world.entity_position(EntityId::new(99)).is_none());
    }

    #[test]
    fn reset_despawns_and_respawns_with_fresh_ids() {
        let mut events = EventLog::new();
        let mut world = World::new(&config(), &mut events);
        world.fire(&mut events);
        world.player.health = 3;
        events.drain();

        world.reset(&config(), &mut events);
        assert_eq!(world.player.health, 100);
        assert!(world.projectiles.is_empty());
        assert_eq!(world.enemies.len(), 2);

        let despawned = events.count_matching(|e| matches!(e, GameEvent::EntityDespawned { .. }));
        assert_eq!(despawned, 3);
        let new_ids: Vec<_> = world.enemies.ids().collect();
        assert_eq!(new_ids, vec![EntityId::new(3), EntityId::new(4)]);
    }
}
