//! Application state for the salary engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::DeductionConfig;

/// Shared application state.
///
/// Holds the deduction tables every request is calculated against.
#[derive(Clone)]
pub struct AppState {
    config: Arc<DeductionConfig>,
}

impl AppState {
    /// Creates a new application state with the given tables.
    pub fn new(config: DeductionConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Creates an application state backed by the built-in 2024/25 tables.
    pub fn builtin() -> Self {
        Self::new(DeductionConfig::builtin().clone())
    }

    /// Returns a reference to the deduction tables.
    pub fn config(&self) -> &DeductionConfig {
        &self.config
    }
}
