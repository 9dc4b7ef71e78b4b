//! Modelo de Mechanic
//!
//! Los mechanics son entidades independientes: los service tickets los
//! referencian a través de la tabla junction, nunca los poseen.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Mechanic principal - mapea exactamente a la tabla mechanic
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Mechanic {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub salary: Decimal,
    pub created_at: DateTime<Utc>,
}
