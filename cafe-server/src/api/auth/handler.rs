//! Authentication Handlers

use axum::extract::State;
use shared::models::{LoginRequest, LoginResponse, SessionInfo};

use crate::api::json::Json;
use crate::auth::{BearerToken, ClientIp, WorkerSession};
use crate::core::ServerState;
use crate::{ApiResponse, AppResult};

/// POST /api/auth/login
///
/// Returns a bearer token; the administrator is notified in the background.
pub async fn login(
    State(state): State<ServerState>,
    ClientIp(ip): ClientIp,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let auth = state.auth();
    let (session, token) = auth.authenticate(&req.identifier, &req.password, ip).await?;
    let worker = auth.me(&session).await?;

    Ok(Json(LoginResponse {
        token,
        expires_at: session.expires_at,
        worker,
    }))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<ServerState>,
    session: WorkerSession,
    BearerToken(token): BearerToken,
) -> AppResult<Json<ApiResponse<()>>> {
    state.auth().logout(&token)?;
    tracing::info!(worker = %session.identifier, "Worker signed out");
    Ok(Json(ApiResponse::ok()))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<ServerState>,
    session: WorkerSession,
) -> AppResult<Json<SessionInfo>> {
    state.auth().me(&session).await?;
    Ok(Json(SessionInfo::from(&session)))
}
