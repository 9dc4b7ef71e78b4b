mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod state;
mod utils;

use anyhow::Result;
use axum::{middleware as axum_middleware, response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use database::DatabaseConnection;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use middleware::rate_limit::{rate_limit_middleware, RateLimitState};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🔧 Mechanic Shop API");
    info!("====================");

    let config = EnvironmentConfig::from_env();

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();

    // Estado compartido y rate limiting
    let rate_limit_state = RateLimitState::new(&config);
    let app_state = AppState::new(pool, config.clone());

    // CORS: permisivo en desarrollo, orígenes explícitos en producción
    let cors = if config.is_production() && !config.cors_origins.contains(&"*".to_string()) {
        cors_middleware_with_origins(config.cors_origins.clone())
    } else {
        cors_middleware()
    };

    // Crear router de la API
    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest(
            "/api/customer",
            routes::customer_routes::create_customer_router(
                app_state.clone(),
                rate_limit_state.clone(),
            ),
        )
        .nest(
            "/api/vehicle",
            routes::vehicle_routes::create_vehicle_router(app_state.clone()),
        )
        .nest(
            "/api/mechanic",
            routes::mechanic_routes::create_mechanic_router(app_state.clone()),
        )
        .nest(
            "/api/inventory",
            routes::inventory_routes::create_inventory_router(app_state.clone()),
        )
        .nest(
            "/api/ticket",
            routes::service_ticket_routes::create_service_ticket_router(app_state.clone()),
        )
        .layer(axum_middleware::from_fn_with_state(
            rate_limit_state,
            rate_limit_middleware,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(app_state);

    // Puerto del servidor
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("👤 Endpoints - Customer:");
    info!("   POST /api/customer - Registrar customer");
    info!("   POST /api/customer/login - Login (token JWT)");
    info!("   GET  /api/customer - Listar customers (paginado)");
    info!("   GET  /api/customer/:id - Obtener customer");
    info!("   GET  /api/customer/my-tickets - Tickets del customer autenticado");
    info!("   PUT  /api/customer/:id - Actualizar customer (dueño)");
    info!("   DELETE /api/customer/:id - Eliminar customer (cascade)");
    info!("🚗 Endpoints - Vehicle:");
    info!("   POST /api/vehicle - Crear vehículo");
    info!("   GET  /api/vehicle - Listar vehículos (paginado)");
    info!("   GET  /api/vehicle/:id - Obtener vehículo");
    info!("   PUT  /api/vehicle/:id - Actualizar vehículo");
    info!("   DELETE /api/vehicle/:id - Eliminar vehículo (cascade)");
    info!("🔧 Endpoints - Mechanic:");
    info!("   POST /api/mechanic - Crear mechanic");
    info!("   GET  /api/mechanic - Listar mechanics (paginado)");
    info!("   GET  /api/mechanic/:id - Obtener mechanic");
    info!("   PUT  /api/mechanic/:id - Actualizar mechanic");
    info!("   DELETE /api/mechanic/:id - Eliminar mechanic (purga asignaciones)");
    info!("📦 Endpoints - Inventory:");
    info!("   POST /api/inventory - Crear part");
    info!("   GET  /api/inventory?name= - Buscar parts (paginado)");
    info!("   GET  /api/inventory/:id - Obtener part");
    info!("   PUT  /api/inventory/:id - Actualizar part");
    info!("   DELETE /api/inventory/:id - Eliminar part (recalcula tickets)");
    info!("🎫 Endpoints - Service Ticket:");
    info!("   POST /api/ticket - Crear ticket");
    info!("   GET  /api/ticket - Listar tickets (paginado)");
    info!("   GET  /api/ticket/:id - Obtener ticket");
    info!("   PUT  /api/ticket/:id - Actualizar ticket");
    info!("   DELETE /api/ticket/:id - Eliminar ticket");
    info!("   PUT  /api/ticket/:id/assign-mechanic/:mechanic_id - Asignar mechanic");
    info!("   PUT  /api/ticket/:id/remove-mechanic/:mechanic_id - Quitar mechanic");
    info!("   PUT  /api/ticket/:id/edit - Edición masiva de mechanics");
    info!("   POST /api/ticket/:id/add-part - Agregar part (reserva stock)");
    info!("   DELETE /api/ticket/:id/remove-part/:part_id - Quitar part");
    info!("   GET  /api/ticket/:id/parts - Parts del ticket");
    info!("   GET  /api/ticket/:id/mechanics - Mechanics del ticket");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!("Server error: {}", e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "mechanic-shop",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
