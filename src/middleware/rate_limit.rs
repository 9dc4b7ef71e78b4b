//! Middleware de Rate Limiting
//!
//! Este módulo maneja la limitación de velocidad de requests
//! para prevenir abuso de la API.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::config::EnvironmentConfig;

/// Estructura para almacenar información de rate limiting por IP
#[derive(Debug, Clone)]
struct RateLimitInfo {
    requests: u32,
    window_start: Instant,
}

/// Estado global del rate limiting
#[derive(Clone)]
pub struct RateLimitState {
    requests: Arc<RwLock<HashMap<String, RateLimitInfo>>>,
    max_requests: u32,
    window_duration: Duration,
}

impl RateLimitState {
    /// Crear nuevo estado de rate limiting
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
            max_requests: config.rate_limit_requests,
            window_duration: Duration::from_secs(config.rate_limit_window),
        }
    }

    /// Verificar si una IP ha excedido el límite
    pub async fn check_rate_limit(&self, ip: &str) -> Result<(), RateLimitError> {
        let mut requests = self.requests.write().await;
        let now = Instant::now();

        // Limpiar entradas expiradas
        requests.retain(|_, info| now.duration_since(info.window_start) < self.window_duration);

        let info = requests.entry(ip.to_string()).or_insert(RateLimitInfo {
            requests: 0,
            window_start: now,
        });

        // Verificar si la ventana de tiempo ha expirado
        if now.duration_since(info.window_start) >= self.window_duration {
            info.requests = 1;
            info.window_start = now;
            return Ok(());
        }

        if info.requests >= self.max_requests {
            return Err(RateLimitError::LimitExceeded);
        }

        info.requests += 1;
        Ok(())
    }
}

/// Errores de rate limiting
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Rate limit exceeded")]
    LimitExceeded,
}

fn client_ip(request: &Request) -> &str {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown")
        .split(',')
        .next()
        .unwrap_or("unknown")
        .trim()
}

/// Middleware de rate limiting
pub async fn rate_limit_middleware(
    State(rate_limit_state): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    let ip = client_ip(&request).to_string();

    if let Err(RateLimitError::LimitExceeded) = rate_limit_state.check_rate_limit(&ip).await {
        return Err((
            StatusCode::TOO_MANY_REQUESTS,
            "Rate limit exceeded. Please try again later.".to_string(),
        ));
    }

    Ok(next.run(request).await)
}

/// Middleware de rate limiting más estricto para endpoints sensibles (login)
pub async fn strict_rate_limit_middleware(
    State(rate_limit_state): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    let strict_state = RateLimitState {
        requests: rate_limit_state.requests.clone(),
        max_requests: (rate_limit_state.max_requests / 2).max(1),
        window_duration: rate_limit_state.window_duration,
    };

    let ip = client_ip(&request).to_string();

    if let Err(RateLimitError::LimitExceeded) = strict_state.check_rate_limit(&ip).await {
        return Err((
            StatusCode::TOO_MANY_REQUESTS,
            "Rate limit exceeded for sensitive endpoint.".to_string(),
        ));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state(max_requests: u32) -> RateLimitState {
        RateLimitState {
            requests: Arc::new(RwLock::new(HashMap::new())),
            max_requests,
            window_duration: Duration::from_secs(60),
        }
    }

    #[tokio::test]
    async fn test_rate_limit_allows_within_window() {
        let state = test_state(3);
        for _ in 0..3 {
            assert!(state.check_rate_limit("10.0.0.1").await.is_ok());
        }
    }

    #[tokio::test]
    async fn test_rate_limit_blocks_after_max() {
        let state = test_state(2);
        assert!(state.check_rate_limit("10.0.0.2").await.is_ok());
        assert!(state.check_rate_limit("10.0.0.2").await.is_ok());
        assert!(state.check_rate_limit("10.0.0.2").await.is_err());
    }

    #[tokio::test]
    async fn test_rate_limit_tracks_ips_separately() {
        let state = test_state(1);
        assert!(state.check_rate_limit("10.0.0.3").await.is_ok());
        assert!(state.check_rate_limit("10.0.0.4").await.is_ok());
        assert!(state.check_rate_limit("10.0.0.3").await.is_err());
    }
}
