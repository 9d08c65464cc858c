//! Order endpoints (list, get, create, update, delete, search).

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use super::super::state::AppState;
use super::super::types::{
    ApiError, ApiResult, DeleteResponse, OrderPayload, OrderUpdate, OrderView, OrdersResponse, ok,
};
use crate::store::{DeleteOutcome, StoreError};

/// GET /orders
///
/// Up to 100 orders in insertion order; `newOrders` is the subset whose
/// status is exactly `"Not Paid"`.
pub async fn list_orders(State(state): State<Arc<AppState>>) -> ApiResult<OrdersResponse> {
    let documents = state.orders.list().await.map_err(ApiError::db_error)?;
    let views = documents.iter().map(OrderView::from_document).collect();
    ok(OrdersResponse::from_views(views))
}

/// GET /order_by_id/{id}
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<OrderView> {
    match state.orders.get(&id).await {
        Ok(Some(document)) => ok(OrderView::from_document(&document)),
        Ok(None) => ApiError::not_found("Order not found").into_err(),
        Err(StoreError::InvalidId(_)) => ApiError::bad_request("Invalid order ID").into_err(),
        Err(e) => ApiError::db_error(e).into_err(),
    }
}

/// POST /create_order
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<OrderPayload>,
) -> ApiResult<OrderView> {
    tracing::info!(token = %payload.token, "creating order");
    let document = payload.into_document().map_err(ApiError::db_error)?;
    match state.orders.insert(document).await {
        Ok(Some(created)) => ok(OrderView::from_document(&created)),
        // The insert went through but the confirming read saw nothing;
        // reported the same way as a rejected write.
        Ok(None) => ApiError::bad_request("Order creation failed").into_err(),
        Err(e) => ApiError::db_error(e).into_err(),
    }
}

/// PUT /update_order/{id}
///
/// Applies only the fields present in the payload. A missing order and a
/// no-op payload both come back as 404; the store cannot tell them apart.
pub async fn update_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<OrderUpdate>,
) -> ApiResult<OrderView> {
    let fields = payload.set_document().map_err(ApiError::db_error)?;
    match state.orders.update(&id, fields).await {
        Ok(Some(updated)) => ok(OrderView::from_document(&updated)),
        Ok(None) => ApiError::not_found("Order not found or no fields to update").into_err(),
        Err(StoreError::InvalidId(_)) => ApiError::bad_request("Invalid order ID").into_err(),
        Err(e) => ApiError::db_error(e).into_err(),
    }
}

#[derive(Deserialize)]
pub struct DeleteParams {
    #[serde(rename = "_id")]
    pub id: String,
}

/// DELETE /delete_order?_id=
pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DeleteParams>,
) -> ApiResult<DeleteResponse> {
    match state.orders.delete(&params.id).await {
        Ok(DeleteOutcome::Deleted) => {
            tracing::info!(id = %params.id, "order deleted");
            ok(DeleteResponse {
                message: "Order deleted successfully".to_string(),
            })
        }
        Ok(DeleteOutcome::NotFound) => ApiError::not_found("Order not found").into_err(),
        Ok(DeleteOutcome::Raced) => ApiError::internal("Order could not be deleted").into_err(),
        Err(StoreError::InvalidId(_)) => ApiError::bad_request("Invalid order ID").into_err(),
        Err(e) => ApiError::db_error(e).into_err(),
    }
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub query: String,
}

/// GET /search_orders?query=
///
/// Any store failure on this path is caught and reported generically; the
/// front-end treats a 500 here as "try again".
pub async fn search_orders(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Vec<OrderView>> {
    match state.orders.search(&params.query).await {
        Ok(documents) if documents.is_empty() => {
            ApiError::not_found("No orders found").into_err()
        }
        Ok(documents) => ok(documents.iter().map(OrderView::from_document).collect()),
        Err(e) => {
            tracing::error!(query = %params.query, "order search failed: {e}");
            ApiError::internal("Something went wrong").into_err()
        }
    }
}
