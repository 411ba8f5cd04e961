//! Grain Sim - incremental falling-sand simulation core
//!
//! Provides a sparse, delta-reporting sand simulation with:
//! - `ParticleStore`: O(1) occupancy lookups keyed by grid cell, plus an
//!   active (still falling) subset and a per-frame changelog
//! - `SimulationEngine`: spawns grains at a source and steps only active ones
//! - `FrameDelta` / `PixelSink`: the repaint contract handed to renderers
//!
//! A frame is always `update(dt)` followed by exactly one `drain_changes()`.

pub mod config;
pub mod delta;
pub mod engine;
pub mod particle;
pub mod sink;
pub mod stats;
pub mod store;

pub use config::SimConfig;
pub use delta::FrameDelta;
pub use engine::SimulationEngine;
pub use particle::{Particle, ParticleState};
pub use sink::{PixelSink, RecordingSink};
pub use stats::FrameStats;
pub use store::{Change, ParticleStore};
