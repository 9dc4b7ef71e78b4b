use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::inventory::InventoryPart;

// Request para crear un part
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePartRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(range(min = 0.0))]
    pub price: f64,

    #[validate(range(min = 0))]
    pub quantity_on_hand: Option<i32>,
}

// Request para actualizar un part
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePartRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(range(min = 0.0))]
    pub price: Option<f64>,

    #[validate(range(min = 0))]
    pub quantity_on_hand: Option<i32>,
}

// Filtros del listado de inventory: búsqueda por substring de nombre
#[derive(Debug, Deserialize)]
pub struct InventoryListParams {
    pub name: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

// Response de part
#[derive(Debug, Serialize)]
pub struct PartResponse {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub quantity_on_hand: i32,
    pub created_at: DateTime<Utc>,
}

impl From<InventoryPart> for PartResponse {
    fn from(part: InventoryPart) -> Self {
        Self {
            id: part.id,
            name: part.name,
            price: part.price.to_string().parse().unwrap_or(0.0),
            quantity_on_hand: part.quantity_on_hand,
            created_at: part.created_at,
        }
    }
}
