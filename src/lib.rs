//! Stilt house settlement planner
//!
//! Finds building sites on a terrain grid and designs a stilt house for each.
//! Re-exports modules for use by binaries and tools.

pub mod adaptation;
pub mod blueprint;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod placement;
pub mod seeds;
pub mod synthetic;
pub mod terrain;
pub mod tilemap;

pub use error::{PlannerError, Result};
