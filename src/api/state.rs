//! Application state for the attendance API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::engine::AttendanceEngine;

/// Shared application state.
///
/// Holds the engine every handler works against.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<AttendanceEngine>,
}

impl AppState {
    /// Creates a new application state around `engine`.
    pub fn new(engine: AttendanceEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Creates a state sharing an engine the caller also holds.
    pub fn from_shared(engine: Arc<AttendanceEngine>) -> Self {
        Self { engine }
    }

    /// Returns a reference to the engine.
    pub fn engine(&self) -> &AttendanceEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone_and_send() {
        // Axum state must be Clone + Send + Sync.
        fn assert_state<T: Clone + Send + Sync + 'static>() {}
        assert_state::<AppState>();
    }
}
