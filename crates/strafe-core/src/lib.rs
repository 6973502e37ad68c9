//! # Strafe Core
//!
//! Game loop and combat core for Strafe, a minimal first-person shooter.
//!
//! The player walks a flat plane, aims with mouse look and fires projectiles at
//! enemies that walk straight toward them. Rendering, windowing and the HUD are
//! external collaborators reached through the [`frontend`] traits; this crate
//! owns everything else.
//!
//! ## Architecture
//!
//! - **Managers**: [`ProjectileManager`] and [`EnemyManager`] own their entity
//!   collections and expose spawn/advance/remove operations
//! - **World**: [`World`] aggregates the player and both managers
//! - **Resolvers**: projectile hits and enemy attacks, run in a fixed order
//! - **Game**: [`Game`] is the RUNNING/OVER state machine that drives one frame
//!   at a time
//!
//! ## Usage
//!
//! ```
//! use strafe_core::{Game, GameConfig, Key, NullFrontend};
//!
//! let mut game = Game::new(GameConfig::default());
//! let mut frontend = NullFrontend;
//!
//! game.key_down(Key::KeyW);
//! game.fire();
//!
//! let mut now = 0.0;
//! for _ in 0..10 {
//!     now += 1000.0 / 60.0;
//!     game.frame(now, &mut frontend);
//! }
//!
//! assert!(game.is_running());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod camera;
pub mod config;
pub mod enemy;
pub mod entity;
pub mod event;
pub mod frontend;
pub mod game;
pub mod input;
pub mod projectile;
pub mod resolver;
pub mod world;

// Re-exports for convenience
pub use camera::Camera;
pub use config::{ConfigError, GameConfig};
pub use enemy::{DamageOutcome, Enemy, EnemyManager};
pub use entity::{EntityId, IdAllocator};
pub use event::{EventLog, GameEvent};
pub use frontend::{Frontend, Hud, NullFrontend, Scene, VisualKind};
pub use game::{FrameReport, Game, GamePhase};
pub use input::{InputAction, InputState, Key, MoveFlags, Orientation};
pub use projectile::{Projectile, ProjectileManager};
pub use resolver::{EnemyAttackResolver, ProjectileHitResolver, Resolution, Resolver};
pub use world::{Player, World};

#[cfg(test)]
mod tests;
