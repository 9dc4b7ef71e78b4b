use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::service_ticket_controller::ServiceTicketController;
use crate::dto::customer_dto::{ApiResponse, PaginatedResponse, PaginationParams};
use crate::dto::service_ticket_dto::{
    AddPartRequest, CreateTicketRequest, EditMechanicsRequest, EditMechanicsResponse,
    TicketMechanicsResponse, TicketPartsResponse, TicketResponse, UpdateTicketRequest,
};
use crate::middleware::auth::auth_middleware;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_service_ticket_router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_tickets))
        .route("/:id", get(get_ticket))
        .route("/:id/parts", get(get_ticket_parts))
        .route("/:id/mechanics", get(get_ticket_mechanics));

    let protected = Router::new()
        .route("/", post(create_ticket))
        .route("/:id", put(update_ticket))
        .route("/:id", delete(delete_ticket))
        .route("/:id/assign-mechanic/:mechanic_id", put(assign_mechanic))
        .route("/:id/remove-mechanic/:mechanic_id", put(remove_mechanic))
        .route("/:id/edit", put(edit_ticket_mechanics))
        .route("/:id/add-part", post(add_part_to_ticket))
        .route("/:id/remove-part/:part_id", delete(remove_part_from_ticket))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}

async fn create_ticket(
    State(state): State<AppState>,
    Json(request): Json<CreateTicketRequest>,
) -> Result<Json<ApiResponse<TicketResponse>>, AppError> {
    let controller = ServiceTicketController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TicketResponse>, AppError> {
    let controller = ServiceTicketController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_tickets(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<TicketResponse>>, AppError> {
    let controller = ServiceTicketController::new(state.pool.clone());
    let response = controller.list(params).await?;
    Ok(Json(response))
}

async fn update_ticket(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTicketRequest>,
) -> Result<Json<ApiResponse<TicketResponse>>, AppError> {
    let controller = ServiceTicketController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_ticket(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = ServiceTicketController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Service ticket deleted successfully"
    })))
}

async fn assign_mechanic(
    State(state): State<AppState>,
    Path((id, mechanic_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<TicketMechanicsResponse>, AppError> {
    let controller = ServiceTicketController::new(state.pool.clone());
    let response = controller.assign_mechanic(id, mechanic_id).await?;
    Ok(Json(response))
}

async fn remove_mechanic(
    State(state): State<AppState>,
    Path((id, mechanic_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<TicketMechanicsResponse>, AppError> {
    let controller = ServiceTicketController::new(state.pool.clone());
    let response = controller.remove_mechanic(id, mechanic_id).await?;
    Ok(Json(response))
}

async fn edit_ticket_mechanics(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<EditMechanicsRequest>,
) -> Result<Json<EditMechanicsResponse>, AppError> {
    let controller = ServiceTicketController::new(state.pool.clone());
    let response = controller.edit_mechanics(id, request).await?;
    Ok(Json(response))
}

async fn add_part_to_ticket(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddPartRequest>,
) -> Result<Json<TicketPartsResponse>, AppError> {
    let controller = ServiceTicketController::new(state.pool.clone());
    let response = controller.add_part(id, request).await?;
    Ok(Json(response))
}

async fn remove_part_from_ticket(
    State(state): State<AppState>,
    Path((id, part_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<TicketPartsResponse>, AppError> {
    let controller = ServiceTicketController::new(state.pool.clone());
    let response = controller.remove_part(id, part_id).await?;
    Ok(Json(response))
}

async fn get_ticket_parts(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TicketPartsResponse>, AppError> {
    let controller = ServiceTicketController::new(state.pool.clone());
    let response = controller.get_parts(id).await?;
    Ok(Json(response))
}

async fn get_ticket_mechanics(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TicketMechanicsResponse>, AppError> {
    let controller = ServiceTicketController::new(state.pool.clone());
    let response = controller.get_mechanics(id).await?;
    Ok(Json(response))
}
