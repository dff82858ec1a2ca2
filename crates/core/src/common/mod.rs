//! Common types shared across the simulation core.
//!
//! This module provides the building blocks used by every other component:
//! 1. **Error Handling:** Controller/processor mismatch and loading errors.

/// Error types surfaced to the controlling environment.
pub mod error;

pub use error::{LoadError, SimError};
