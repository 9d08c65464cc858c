//! Service endpoints (list, get, create).

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use super::super::state::AppState;
use super::super::types::{ApiError, ApiResult, ServicePayload, ServiceView, ServicesResponse, ok};
use crate::store::StoreError;

/// GET /get_services
pub async fn list_services(State(state): State<Arc<AppState>>) -> ApiResult<ServicesResponse> {
    let documents = state.services.list().await.map_err(ApiError::db_error)?;
    let services = documents.iter().map(ServiceView::from_document).collect();
    ok(ServicesResponse { services })
}

/// GET /service_by_id/{id}
pub async fn get_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<ServiceView> {
    match state.services.get(&id).await {
        Ok(Some(document)) => ok(ServiceView::from_document(&document)),
        Ok(None) => ApiError::not_found("Service not found").into_err(),
        Err(StoreError::InvalidId(_)) => ApiError::bad_request("Invalid service ID").into_err(),
        Err(e) => ApiError::db_error(e).into_err(),
    }
}

/// POST /create_service
///
/// Same insert-then-refetch protocol as order creation; `date_added`
/// defaults to now when the client omits it.
pub async fn create_service(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ServicePayload>,
) -> ApiResult<ServiceView> {
    tracing::info!(title = %payload.title, "creating service");
    let document = payload.into_document().map_err(ApiError::db_error)?;
    match state.services.insert(document).await {
        Ok(Some(created)) => ok(ServiceView::from_document(&created)),
        Ok(None) => ApiError::bad_request("Service creation failed").into_err(),
        Err(e) => ApiError::db_error(e).into_err(),
    }
}
