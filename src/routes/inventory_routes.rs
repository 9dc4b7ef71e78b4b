use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::inventory_controller::InventoryController;
use crate::dto::customer_dto::{ApiResponse, PaginatedResponse};
use crate::dto::inventory_dto::{
    CreatePartRequest, InventoryListParams, PartResponse, UpdatePartRequest,
};
use crate::middleware::auth::auth_middleware;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_inventory_router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_parts))
        .route("/:id", get(get_part));

    let protected = Router::new()
        .route("/", post(create_part))
        .route("/:id", put(update_part))
        .route("/:id", delete(delete_part))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}

async fn create_part(
    State(state): State<AppState>,
    Json(request): Json<CreatePartRequest>,
) -> Result<Json<ApiResponse<PartResponse>>, AppError> {
    let controller = InventoryController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_part(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PartResponse>, AppError> {
    let controller = InventoryController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_parts(
    State(state): State<AppState>,
    Query(params): Query<InventoryListParams>,
) -> Result<Json<PaginatedResponse<PartResponse>>, AppError> {
    let controller = InventoryController::new(state.pool.clone());
    let response = controller.list(params).await?;
    Ok(Json(response))
}

async fn update_part(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePartRequest>,
) -> Result<Json<ApiResponse<PartResponse>>, AppError> {
    let controller = InventoryController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_part(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = InventoryController::new(state.pool.clone());
    let tickets_recalculated = controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Part deleted successfully",
        "tickets_recalculated": tickets_recalculated
    })))
}
