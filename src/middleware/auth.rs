//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación JWT, extracción de tokens
//! y verificación de customers autenticados.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    state::AppState,
    utils::errors::AppError,
    utils::jwt::{customer_id_from_claims, extract_token_from_header, verify_token, JwtConfig},
};

/// Customer autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedCustomer {
    pub customer_id: Uuid,
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .ok_or_else(|| {
            log::warn!("Request sin header Authorization a ruta protegida");
            AppError::Unauthorized("Authorization token required".to_string())
        })?;

    let token = extract_token_from_header(auth_header)?;

    // Decodificar y validar JWT
    let jwt_config = JwtConfig::from(&state.config);
    let claims = verify_token(token, &jwt_config)
        .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

    let customer_id = customer_id_from_claims(&claims)?;

    // Verificar que el customer sigue existiendo en la base de datos
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM customer WHERE id = $1)")
        .bind(customer_id)
        .fetch_one(&state.pool)
        .await
        .map_err(AppError::Database)?;

    if !exists.0 {
        return Err(AppError::Unauthorized("Customer no longer exists".to_string()));
    }

    // Inyectar customer autenticado en las extensions
    request
        .extensions_mut()
        .insert(AuthenticatedCustomer { customer_id });

    Ok(next.run(request).await)
}
