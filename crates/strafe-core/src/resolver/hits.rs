//! Projectile-versus-enemy hits.
//!
//! Every live projectile is tested against every live enemy; there is no
//! spatial partitioning. A projectile strikes at most one enemy per pass: the
//! nearest enemy strictly within `projectile_hit_radius`, ties going to the
//! lower id. Enemies defeated earlier in the same pass are no longer
//! targetable, so a later projectile may strike the next-nearest enemy instead.
//!
//! # Processing Order
//!
//! 1. For each projectile (oldest first) pick a target and apply damage
//! 2. Sweep: remove every projectile that struck something
//! 3. Sweep: remove every enemy defeated during the pass

use std::collections::BTreeSet;

use tracing::debug;

use crate::config::GameConfig;
use crate::enemy::DamageOutcome;
use crate::entity::EntityId;
use crate::event::{EventLog, GameEvent};
use crate::world::World;

use super::{Resolution, Resolver};

/// Resolves projectile hits against enemies.
///
/// # Example
///
/// ```
/// use glam::Vec3;
/// use strafe_core::config::GameConfig;
/// use strafe_core::event::EventLog;
/// use strafe_core::resolver::{ProjectileHitResolver, Resolver};
/// use strafe_core::world::World;
///
/// let config = GameConfig::default();
/// let mut events = EventLog::new();
/// let mut world = World::empty(&config);
/// let enemy = world.spawn_enemy(0.0, -0.5, &mut events);
/// world.fire(&mut events);
///
/// ProjectileHitResolver::new().resolve(&mut world, &config, &mut events);
/// assert!(world.projectiles.is_empty());
/// assert_eq!(world.enemies.get(enemy).unwrap().health, 25);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectileHitResolver;

impl ProjectileHitResolver {
    /// Creates a new hit resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Resolver for ProjectileHitResolver {
    fn name(&self) -> &'static str {
        "projectile_hits"
    }

    fn resolve(&self, world: &mut World, config: &GameConfig, events: &mut EventLog) -> Resolution {
        let radius = config.projectile_hit_radius;
        let World {
            projectiles,
            enemies,
            ..
        } = world;

        let mut spent: Vec<EntityId> = Vec::new();
        let mut defeated: BTreeSet<EntityId> = BTreeSet::new();

        for (projectile_id, projectile) in projectiles.iter() {
            let target = enemies
                .iter()
                .filter(|(id, enemy)| !enemy.is_defeated() && !defeated.contains(id))
                .map(|(id, enemy)| (id, projectile.position.distance(enemy.position)))
                .filter(|(_, distance)| *distance < radius)
                .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
                .map(|(id, _)| id);

            let Some(enemy_id) = target else {
                continue;
            };

            spent.push(projectile_id);
            match enemies.apply_damage(enemy_id, config.projectile_damage) {
                Some(DamageOutcome::Survived { health }) => {
                    debug!(enemy = %enemy_id, projectile = %projectile_id, health, "enemy hit");
                    events.push(GameEvent::EnemyHit {
                        enemy: enemy_id,
                        projectile: projectile_id,
                        remaining: health,
                    });
                }
                Some(DamageOutcome::Defeated) => {
                    let remaining = enemies.get(enemy_id).map_or(0, |e| e.health);
                    debug!(enemy = %enemy_id, projectile = %projectile_id, "enemy defeated");
                    events.push(GameEvent::EnemyHit {
                        enemy: enemy_id,
                        projectile: projectile_id,
                        remaining,
                    });
                    events.push(GameEvent::EnemyDefeated { id: enemy_id });
                    defeated.insert(enemy_id);
                }
                // Filtered out above; nothing to report.
                Some(DamageOutcome::AlreadyDefeated) | None => {}
            }
        }

        for id in spent {
            projectiles.remove(id);
        }
        for id in defeated {
            enemies.remove(id);
        }

        Resolution::Continue
    }
}
