//! Rendering and HUD collaborators.
//!
//! The core never draws anything itself. Once per frame the game loop tells a
//! [`Scene`] which visual objects appeared, moved or disappeared, asks it to
//! render from the player's [`Camera`], and pushes the player's health to a
//! [`Hud`]. A host implements both traits; [`Frontend`] is blanket-implemented
//! for any type that does.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::entity::EntityId;

/// What a visual object represents, so the host can pick a mesh for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualKind {
    /// A small sphere in flight.
    Projectile,
    /// A 1x2x1 box walking toward the player.
    Enemy,
}

/// The 3D scene graph the core keeps in sync with the world.
pub trait Scene {
    /// Adds a visual object for a newly spawned entity.
    fn add(&mut self, id: EntityId, kind: VisualKind, position: Vec3);

    /// Removes the visual object of a despawned entity.
    fn remove(&mut self, id: EntityId);

    /// Moves an existing visual object.
    fn set_position(&mut self, id: EntityId, position: Vec3);

    /// Draws the current frame as seen from `camera`.
    fn render(&mut self, camera: &Camera);
}

/// Health readout and game-over notice.
pub trait Hud {
    /// Shows the player's current health. Called once per frame.
    fn show_health(&mut self, health: i32);

    /// Shows the terminal game-over notice. Called once per defeat.
    fn show_game_over(&mut self);
}

/// A host that provides both the scene and the HUD.
pub trait Frontend: Scene + Hud {}

impl<T: Scene + Hud> Frontend for T {}

/// Frontend that discards everything, for headless runs and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFrontend;

impl Scene for NullFrontend {
    fn add(&mut self, _id: EntityId, _kind: VisualKind, _position: Vec3) {}

    fn remove(&mut self, _id: EntityId) {}

    fn set_position(&mut self, _id: EntityId, _position: Vec3) {}

    fn render(&mut self, _camera: &Camera) {}
}

impl Hud for NullFrontend {
    fn show_health(&mut self, _health: i32) {}

    fn show_game_over(&mut self) {}
}
