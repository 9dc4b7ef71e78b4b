use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::mechanic_dto::MechanicResponse;
use crate::models::service_ticket::{ServiceTicket, TicketPartRow};

// Request para crear un service ticket
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTicketRequest {
    pub vehicle_id: Uuid,

    #[validate(length(min = 1))]
    pub description: String,

    pub status: Option<String>,

    #[validate(range(min = 0.0))]
    pub total_cost: Option<f64>,
}

// Request para actualizar un service ticket
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTicketRequest {
    pub vehicle_id: Option<Uuid>,

    #[validate(length(min = 1))]
    pub description: Option<String>,

    pub status: Option<String>,

    #[validate(range(min = 0.0))]
    pub total_cost: Option<f64>,

    pub date_out: Option<DateTime<Utc>>,
}

// Request de edición masiva de mechanics de un ticket
#[derive(Debug, Deserialize)]
pub struct EditMechanicsRequest {
    #[serde(default)]
    pub add_ids: Vec<Uuid>,
    #[serde(default)]
    pub remove_ids: Vec<Uuid>,
}

// Request para agregar un part a un ticket
#[derive(Debug, Deserialize)]
pub struct AddPartRequest {
    pub part_id: Uuid,
    pub quantity: Option<i32>,
}

// Response de service ticket
#[derive(Debug, Serialize)]
pub struct TicketResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub description: String,
    pub status: String,
    pub total_cost: f64,
    pub date_in: DateTime<Utc>,
    pub date_out: Option<DateTime<Utc>>,
}

impl From<ServiceTicket> for TicketResponse {
    fn from(ticket: ServiceTicket) -> Self {
        Self {
            id: ticket.id,
            vehicle_id: ticket.vehicle_id,
            description: ticket.description,
            status: ticket.status,
            total_cost: ticket.total_cost.to_string().parse().unwrap_or(0.0),
            date_in: ticket.date_in,
            date_out: ticket.date_out,
        }
    }
}

// Un part asignado a un ticket, con su subtotal
#[derive(Debug, Serialize)]
pub struct TicketPartItem {
    pub part_id: Uuid,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    pub subtotal: f64,
}

impl From<TicketPartRow> for TicketPartItem {
    fn from(row: TicketPartRow) -> Self {
        let subtotal = row.price * rust_decimal::Decimal::from(row.quantity);
        Self {
            part_id: row.part_id,
            name: row.name,
            price: row.price.to_string().parse().unwrap_or(0.0),
            quantity: row.quantity,
            subtotal: subtotal.to_string().parse().unwrap_or(0.0),
        }
    }
}

// Response del listado de parts de un ticket
#[derive(Debug, Serialize)]
pub struct TicketPartsResponse {
    pub service_ticket_id: Uuid,
    pub count: usize,
    pub parts: Vec<TicketPartItem>,
    pub total_parts_cost: f64,
}

// Response del listado de mechanics de un ticket
#[derive(Debug, Serialize)]
pub struct TicketMechanicsResponse {
    pub service_ticket_id: Uuid,
    pub count: usize,
    pub mechanics: Vec<MechanicResponse>,
}

// Response de la edición masiva de mechanics
#[derive(Debug, Serialize)]
pub struct EditMechanicsResponse {
    pub service_ticket_id: Uuid,
    pub removed_ids: Vec<Uuid>,
    pub added_ids: Vec<Uuid>,
    pub mechanics: Vec<MechanicResponse>,
}
