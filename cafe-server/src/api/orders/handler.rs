//! Order API Handlers

use axum::extract::{Path, Query, State};
use shared::models::{Order, OrderCreate, OrderQuery, OrderUpdate, RevenueSummary, StaffOrderUpdate};

use crate::api::json::Json;
use crate::auth::WorkerSession;
use crate::core::ServerState;
use crate::AppResult;

/// GET /api/orders - list with optional search, filters and ordering
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OrderQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state.orders().list(&query).await?;
    Ok(Json(orders))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.orders().get(id).await?))
}

/// POST /api/orders - create; the table must be free
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.orders().create(&payload).await?))
}

/// PUT /api/orders/{id} - customer update, merges new items
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.orders().update_as_customer(id, &payload).await?))
}

/// PUT /api/orders/{id}/staff - staff update: remove, merge, change status
pub async fn staff_update(
    State(state): State<ServerState>,
    session: WorkerSession,
    Path(id): Path<i64>,
    Json(payload): Json<StaffOrderUpdate>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.orders().update_as_staff(&session, id, &payload).await?))
}

/// DELETE /api/orders/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    state.orders().delete(id).await?;
    Ok(Json(true))
}

/// GET /api/revenue - sum over paid orders
pub async fn revenue(State(state): State<ServerState>) -> AppResult<Json<RevenueSummary>> {
    Ok(Json(state.orders().revenue().await?))
}
