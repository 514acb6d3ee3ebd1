/// Liveness endpoint
///
/// ```text
/// GET /ping
/// ```
///
/// ```json
/// { "status": "success", "message": "Pong!" }
/// ```
///
/// Does not touch storage, so it stays green while the database is down.

use axum::Json;
use serde::{Deserialize, Serialize};

/// Ping response
#[derive(Debug, Serialize, Deserialize)]
pub struct PingResponse {
    pub status: String,
    pub message: String,
}

/// Always answers `Pong!`
pub async fn ping() -> Json<PingResponse> {
    tracing::debug!("Ping endpoint accessed");

    Json(PingResponse {
        status: "success".to_string(),
        message: "Pong!".to_string(),
    })
}
