//! Browser heartbeat.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, State},
    http::StatusCode,
};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Record that a local browser tab is still open.
pub async fn ping(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<StatusCode, ApiError> {
    // Only a local tab may keep the process alive
    if !addr.ip().is_loopback() {
        return Err(ApiError::Forbidden(format!(
            "heartbeat from non-local address {}",
            addr.ip()
        )));
    }

    state.heartbeat.beat();
    Ok(StatusCode::NO_CONTENT)
}
