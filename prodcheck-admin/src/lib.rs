//! # Prodcheck Administration Library
//!
//! Host-facing layer around the checklist domain core:
//! - Data directory and configuration file resolution
//! - Database initialization and default seeding
//! - Persisted selection/progress storage
//! - The section-change workflow (diff, confirmation gate, pruning)

pub mod config;
pub mod db;
pub mod store;
pub mod workflow;

pub use prodcheck_common::{Error, Result, CHECKLIST_ID};
