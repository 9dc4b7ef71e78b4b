//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle que mapea exactamente
//! a la tabla vehicle. Cada vehículo pertenece a exactamente un customer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Vehicle principal - mapea exactamente a la tabla vehicle
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: String,
    pub created_at: DateTime<Utc>,
}
