//! Modelo de InventoryPart
//!
//! quantity_on_hand es el stock disponible; las asignaciones a tickets
//! lo reservan (ver service_ticket_repository).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// InventoryPart principal - mapea exactamente a la tabla inventory_part
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InventoryPart {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub quantity_on_hand: i32,
    pub created_at: DateTime<Utc>,
}
