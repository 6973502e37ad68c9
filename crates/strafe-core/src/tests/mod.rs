//! Crate-level tests that drive a whole [`Game`](crate::Game).
//!
//! - `integration.rs`: end-to-end play scenarios through the frame loop
//! - `determinism.rs`: identical inputs produce identical frames
//! - `properties.rs`: proptest invariants for input, combat and timing
//! - `helpers.rs`: a recording frontend and scenario setup

mod helpers;
