//! Configuration for the reference processors.
//!
//! This module defines the deserializable structures used to parameterize a
//! processor instance. It provides:
//! 1. **Defaults:** Baseline constants (reset vector, stack pointer, reverse
//!    history depth).
//! 2. **Structures:** The [`Config`] root consumed by the construction
//!    registry.
//!
//! Configuration is supplied as JSON by the hosting environment, or use
//! `Config::default()`.

use serde::Deserialize;

/// Default configuration constants.
mod defaults {
    /// Address fetched after reset when no program image sets one.
    pub const RESET_VECTOR: u64 = 0x0000_1000;

    /// Initial stack pointer (top of a 1 MiB region above the default text
    /// base).
    pub const STACK_POINTER: u64 = 0x0010_0000;

    /// Number of past cycles retained for reversal when the controller does
    /// not configure a bound.
    pub const MAX_REVERSE_CYCLES: usize = 100;
}

/// Root configuration for constructing a processor instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Program counter value applied at construction and restored by reset.
    pub reset_vector: u64,
    /// Initial value of the stack pointer register.
    pub stack_pointer: u64,
    /// Default bound on retained reverse history, overridable at runtime
    /// through the processor contract.
    pub max_reverse_cycles: usize,
}

impl Config {
    /// Parses a configuration from its JSON representation.
    ///
    /// Absent fields take their defaults.
    ///
    /// # Errors
    ///
    /// Fails when the document is not valid JSON or names unknown fields.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reset_vector: defaults::RESET_VECTOR,
            stack_pointer: defaults::STACK_POINTER,
            max_reverse_cycles: defaults::MAX_REVERSE_CYCLES,
        }
    }
}
