//! Enemy melee attacks.
//!
//! An enemy strictly within `enemy_attack_range` of the player with a ready
//! cooldown deals `enemy_attack_damage` and restarts its cooldown. Enemies are
//! checked in spawn order; once the player is defeated the remaining enemies
//! hold off for the rest of the pass.

use tracing::info;

use crate::config::GameConfig;
use crate::event::{EventLog, GameEvent};
use crate::world::World;

use super::{Resolution, Resolver};

/// Resolves enemy attacks against the player.
///
/// # Example
///
/// ```
/// use strafe_core::config::GameConfig;
/// use strafe_core::event::EventLog;
/// use strafe_core::resolver::{EnemyAttackResolver, Resolution, Resolver};
/// use strafe_core::world::World;
///
/// let config = GameConfig::default();
/// let mut events = EventLog::new();
/// let mut world = World::empty(&config);
/// world.spawn_enemy(0.0, -1.0, &mut events);
///
/// let outcome = EnemyAttackResolver::new().resolve(&mut world, &config, &mut events);
/// assert_eq!(outcome, Resolution::Continue);
/// assert_eq!(world.player.health, 99);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EnemyAttackResolver;

impl EnemyAttackResolver {
    /// Creates a new attack resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Resolver for EnemyAttackResolver {
    fn name(&self) -> &'static str {
        "enemy_attacks"
    }

    fn resolve(&self, world: &mut World, config: &GameConfig, events: &mut EventLog) -> Resolution {
        if world.player.is_defeated() {
            return Resolution::PlayerDefeated;
        }

        let player_position = world.player.position();
        for (id, enemy) in world.enemies.iter_mut() {
            let in_range = enemy.position.distance(player_position) < config.enemy_attack_range;
            if !in_range || !enemy.can_attack() {
                continue;
            }

            world.player.health -= config.enemy_attack_damage;
            enemy.attack_cooldown_ms = config.enemy_attack_cooldown_ms;
            events.push(GameEvent::PlayerDamaged {
                by: id,
                remaining: world.player.health,
            });

            if world.player.is_defeated() {
                info!(by = %id, "player defeated");
                events.push(GameEvent::PlayerDefeated);
                return Resolution::PlayerDefeated;
            }
        }

        Resolution::Continue
    }
}
