//! Application state for the web server.

use std::sync::Arc;

use scorecard::Scorecard;

use super::lifecycle::Heartbeat;

/// Shared application state.
///
/// Uploaded tables live only for the duration of a request; nothing here
/// holds user data.
#[derive(Clone)]
pub struct AppState {
    /// The analysis engine (configuration only, no per-request data).
    pub scorecard: Arc<Scorecard>,
    /// Last time a browser tab reported in.
    pub heartbeat: Heartbeat,
}

impl AppState {
    /// Create new application state.
    pub fn new(scorecard: Scorecard) -> Self {
        Self {
            scorecard: Arc::new(scorecard),
            heartbeat: Heartbeat::default(),
        }
    }
}
