//! Keyboard and mouse-look state.
//!
//! The host delivers key-down/key-up events keyed by physical key and, while
//! the pointer is captured, relative mouse deltas. [`InputState`] folds them
//! into four movement flags and a yaw/pitch pair.
//!
//! # Bindings
//!
//! | Key | Effect |
//! |---|---|
//! | `W` | forward |
//! | `S` | back |
//! | `A` | strafe left |
//! | `D` | strafe right |
//! | `Space` | fire |
//!
//! Any other key is ignored.

use std::f32::consts::FRAC_PI_2;

use bitflags::bitflags;
use glam::Vec3;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Movement intents currently held down.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct MoveFlags: u8 {
        /// `W` is held
        const FORWARD = 1 << 0;
        /// `S` is held
        const BACK = 1 << 1;
        /// `A` is held
        const LEFT = 1 << 2;
        /// `D` is held
        const RIGHT = 1 << 3;
    }
}

/// Physical key identity, named after DOM `KeyboardEvent.code` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// `W`
    KeyW,
    /// `A`
    KeyA,
    /// `S`
    KeyS,
    /// `D`
    KeyD,
    /// Space bar
    Space,
    /// Any key without a binding
    Other,
}

impl Key {
    /// Maps a DOM-style key code to a [`Key`]; unknown codes become `Other`.
    ///
    /// ```
    /// use strafe_core::input::Key;
    ///
    /// assert_eq!(Key::from_code("KeyW"), Key::KeyW);
    /// assert_eq!(Key::from_code("Escape"), Key::Other);
    /// ```
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "KeyW" => Self::KeyW,
            "KeyA" => Self::KeyA,
            "KeyS" => Self::KeyS,
            "KeyD" => Self::KeyD,
            "Space" => Self::Space,
            _ => Self::Other,
        }
    }

    const fn move_flag(self) -> Option<MoveFlags> {
        match self {
            Self::KeyW => Some(MoveFlags::FORWARD),
            Self::KeyS => Some(MoveFlags::BACK),
            Self::KeyA => Some(MoveFlags::LEFT),
            Self::KeyD => Some(MoveFlags::RIGHT),
            Self::Space | Self::Other => None,
        }
    }
}

/// Discrete action triggered by a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Spawn a projectile now.
    Fire,
}

/// Yaw/pitch pair produced by mouse look.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orientation {
    /// Radians about world Y.
    pub yaw: f32,
    /// Radians about local X, within `[-π/2, π/2]`.
    pub pitch: f32,
}

/// Held movement keys plus mouse-look accumulators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputState {
    flags: MoveFlags,
    captured: bool,
    orientation: Orientation,
    sensitivity: f32,
}

impl InputState {
    /// Creates an idle input state with the given look sensitivity
    /// (radians per pixel).
    #[must_use]
    pub fn new(sensitivity: f32) -> Self {
        Self {
            flags: MoveFlags::empty(),
            captured: false,
            orientation: Orientation::default(),
            sensitivity,
        }
    }

    /// Handles a key press.
    ///
    /// Movement keys set their flag; `Space` returns [`InputAction::Fire`].
    pub fn key_down(&mut self, key: Key) -> Option<InputAction> {
        if let Some(flag) = key.move_flag() {
            self.flags.insert(flag);
            return None;
        }
        match key {
            Key::Space => Some(InputAction::Fire),
            _ => None,
        }
    }

    /// Handles a key release.
    pub fn key_up(&mut self, key: Key) {
        if let Some(flag) = key.move_flag() {
            self.flags.remove(flag);
        }
    }

    /// Enters or leaves pointer-capture mode.
    pub fn set_pointer_captured(&mut self, captured: bool) {
        self.captured = captured;
    }

    /// Returns `true` while mouse motion turns the view.
    #[must_use]
    pub const fn is_pointer_captured(&self) -> bool {
        self.captured
    }

    /// Applies a relative mouse motion.
    ///
    /// Returns the updated orientation while the pointer is captured, `None`
    /// otherwise (and nothing changes).
    pub fn look(&mut self, dx: f32, dy: f32) -> Option<Orientation> {
        if !self.captured {
            return None;
        }
        self.orientation.yaw -= dx * self.sensitivity;
        self.orientation.pitch =
            (self.orientation.pitch - dy * self.sensitivity).clamp(-FRAC_PI_2, FRAC_PI_2);
        Some(self.orientation)
    }

    /// Current yaw/pitch accumulators.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Movement keys currently held.
    #[must_use]
    pub const fn flags(&self) -> MoveFlags {
        self.flags
    }

    /// Releases every movement key, keeping orientation and capture mode.
    pub fn release_all(&mut self) {
        self.flags = MoveFlags::empty();
    }

    /// Resets flags and orientation; capture mode is left to the host.
    pub fn reset(&mut self) {
        self.flags = MoveFlags::empty();
        self.orientation = Orientation::default();
    }

    /// Camera-local velocity intent for the held keys.
    ///
    /// Forward is `-Z`, right is `+X`. When opposing keys are both held, back
    /// beats forward and right beats left. Without `normalize_diagonal`,
    /// forward plus strafe moves at `speed * √2`.
    #[must_use]
    pub fn movement_intent(&self, speed: f32, normalize_diagonal: bool) -> Vec3 {
        let mut intent = Vec3::ZERO;
        if self.flags.contains(MoveFlags::FORWARD) {
            intent.z = -speed;
        }
        if self.flags.contains(MoveFlags::BACK) {
            intent.z = speed;
        }
        if self.flags.contains(MoveFlags::LEFT) {
            intent.x = -speed;
        }
        if self.flags.contains(MoveFlags::RIGHT) {
            intent.x = speed;
        }
        if normalize_diagonal && intent.x != 0.0 && intent.z != 0.0 {
            intent = intent.normalize() * speed;
        }
        intent
    }
}
