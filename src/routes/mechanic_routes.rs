use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::mechanic_controller::MechanicController;
use crate::dto::customer_dto::{ApiResponse, PaginatedResponse, PaginationParams};
use crate::dto::mechanic_dto::{CreateMechanicRequest, MechanicResponse, UpdateMechanicRequest};
use crate::middleware::auth::auth_middleware;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_mechanic_router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_mechanics))
        .route("/:id", get(get_mechanic));

    let protected = Router::new()
        .route("/", post(create_mechanic))
        .route("/:id", put(update_mechanic))
        .route("/:id", delete(delete_mechanic))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}

async fn create_mechanic(
    State(state): State<AppState>,
    Json(request): Json<CreateMechanicRequest>,
) -> Result<Json<ApiResponse<MechanicResponse>>, AppError> {
    let controller = MechanicController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_mechanic(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MechanicResponse>, AppError> {
    let controller = MechanicController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_mechanics(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<MechanicResponse>>, AppError> {
    let controller = MechanicController::new(state.pool.clone());
    let response = controller.list(params).await?;
    Ok(Json(response))
}

async fn update_mechanic(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMechanicRequest>,
) -> Result<Json<ApiResponse<MechanicResponse>>, AppError> {
    let controller = MechanicController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_mechanic(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = MechanicController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Mechanic deleted successfully"
    })))
}
