use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::mechanic::Mechanic;

// Request para crear un mechanic
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMechanicRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 7, max = 20))]
    pub phone: String,

    #[validate(length(min = 1, max = 255))]
    pub address: String,

    #[validate(range(min = 0.0))]
    pub salary: f64,
}

// Request para actualizar un mechanic
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMechanicRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 7, max = 20))]
    pub phone: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub address: Option<String>,

    #[validate(range(min = 0.0))]
    pub salary: Option<f64>,
}

// Response de mechanic
#[derive(Debug, Serialize)]
pub struct MechanicResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub salary: f64,
    pub created_at: DateTime<Utc>,
}

impl From<Mechanic> for MechanicResponse {
    fn from(mechanic: Mechanic) -> Self {
        Self {
            id: mechanic.id,
            name: mechanic.name,
            email: mechanic.email,
            phone: mechanic.phone,
            address: mechanic.address,
            salary: mechanic.salary.to_string().parse().unwrap_or(0.0),
            created_at: mechanic.created_at,
        }
    }
}
