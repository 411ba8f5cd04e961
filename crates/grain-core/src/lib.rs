//! Grain Core - Foundational types for the Grain sand simulator
//!
//! This crate provides the core types that all other Grain crates depend on:
//! - `Cell` - Integer grid coordinates (position is particle identity)
//! - `Color` - RGBA colors for renderers
//! - Error types and Result alias

mod error;
mod types;

pub use error::{GrainError, Result};
pub use types::{Cell, Color};
