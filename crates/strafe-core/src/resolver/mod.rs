//! Collision and combat resolution.
//!
//! Resolvers read and mutate the [`World`] once per frame, recording what they
//! did in the [`EventLog`]. The game loop runs them at fixed points in the
//! frame (see [`Game::frame`](crate::game::Game::frame)).
//!
//! # Invariants
//!
//! - Resolvers never remove from a collection they are iterating. Removals are
//!   collected during the pass and swept afterwards.
//! - Resolvers iterate entities in id order, so results are deterministic.
//! - Distance thresholds are strict: an entity exactly at the threshold
//!   distance is out of range.
//!
//! # Available Resolvers
//!
//! - [`ProjectileHitResolver`]: projectiles damage and destroy enemies
//! - [`EnemyAttackResolver`]: enemies in melee range damage the player

mod attacks;
mod hits;

pub use attacks::EnemyAttackResolver;
pub use hits::ProjectileHitResolver;

use crate::config::GameConfig;
use crate::event::EventLog;
use crate::world::World;

/// Whether play continues after a resolver ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The player is still alive.
    Continue,
    /// The player's health reached zero or below.
    PlayerDefeated,
}

/// A combat rule applied to the whole world once per frame.
///
/// # Example
///
/// ```
/// use strafe_core::config::GameConfig;
/// use strafe_core::event::EventLog;
/// use strafe_core::resolver::{Resolution, Resolver};
/// use strafe_core::world::World;
///
/// struct Regenerate;
///
/// impl Resolver for Regenerate {
///     fn name(&self) -> &'static str {
///         "regenerate"
///     }
///
///     fn resolve(
///         &self,
///         world: &mut World,
///         config: &GameConfig,
///         _events: &mut EventLog,
///     ) -> Resolution {
///         world.player.health = (world.player.health + 1).min(config.player_health);
///         Resolution::Continue
///     }
/// }
/// ```
pub trait Resolver {
    /// Short name, recorded on the span the game loop opens around each run.
    fn name(&self) -> &'static str;

    /// Applies the rule to `world`, recording events in `events`.
    fn resolve(&self, world: &mut World, config: &GameConfig, events: &mut EventLog) -> Resolution;
}
