use axum::{
    extract::{Extension, Path, Query, State},
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::customer_controller::CustomerController;
use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::dto::customer_dto::{
    ApiResponse, CreateCustomerRequest, CustomerResponse, MyTicketsResponse, PaginatedResponse,
    PaginationParams, UpdateCustomerRequest,
};
use crate::middleware::auth::{auth_middleware, AuthenticatedCustomer};
use crate::middleware::rate_limit::{strict_rate_limit_middleware, RateLimitState};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::JwtConfig;

pub fn create_customer_router(
    state: AppState,
    rate_limit_state: RateLimitState,
) -> Router<AppState> {
    let public = Router::new()
        .route("/", post(register_customer))
        .route("/", get(list_customers))
        .route("/:id", get(get_customer));

    // Límite estricto en login (endpoint sensible)
    let login = Router::new()
        .route("/login", post(login_customer))
        .route_layer(middleware::from_fn_with_state(
            rate_limit_state,
            strict_rate_limit_middleware,
        ));

    let protected = Router::new()
        .route("/my-tickets", get(my_tickets))
        .route("/:id", put(update_customer))
        .route("/:id", delete(delete_customer))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(login).merge(protected)
}

async fn register_customer(
    State(state): State<AppState>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<Json<ApiResponse<CustomerResponse>>, AppError> {
    let controller = CustomerController::new(state.pool.clone());
    let response = controller.register(request).await?;
    Ok(Json(response))
}

async fn login_customer(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let controller = CustomerController::new(state.pool.clone());
    let jwt_config = JwtConfig::from(&state.config);
    let response = controller.login(request, &jwt_config).await?;
    Ok(Json(response))
}

async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CustomerResponse>, AppError> {
    let controller = CustomerController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_customers(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<CustomerResponse>>, AppError> {
    let controller = CustomerController::new(state.pool.clone());
    let response = controller.list(params).await?;
    Ok(Json(response))
}

async fn update_customer(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedCustomer>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCustomerRequest>,
) -> Result<Json<ApiResponse<CustomerResponse>>, AppError> {
    let controller = CustomerController::new(state.pool.clone());
    let response = controller.update(id, auth.customer_id, request).await?;
    Ok(Json(response))
}

async fn delete_customer(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedCustomer>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = CustomerController::new(state.pool.clone());
    let (vehicles_deleted, tickets_deleted) = controller.delete(id, auth.customer_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Customer deleted successfully",
        "vehicles_deleted": vehicles_deleted,
        "tickets_deleted": tickets_deleted
    })))
}

async fn my_tickets(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedCustomer>,
) -> Result<Json<MyTicketsResponse>, AppError> {
    let controller = CustomerController::new(state.pool.clone());
    let response = controller.my_tickets(auth.customer_id).await?;
    Ok(Json(response))
}
