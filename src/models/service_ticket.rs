//! Modelo de ServiceTicket
//!
//! Este módulo contiene el struct ServiceTicket, el enum de estados y los
//! rows de lectura de las tablas junction (mechanics y parts asignados).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado del service ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketStatus {
    Open,
    InProgress,
    Closed,
}

impl TicketStatus {
    /// Valores tal como se persisten en la columna status
    pub const ALLOWED: [&'static str; 3] = ["Open", "In Progress", "Closed"];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "Open",
            TicketStatus::InProgress => "In Progress",
            TicketStatus::Closed => "Closed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Open" => Some(TicketStatus::Open),
            "In Progress" => Some(TicketStatus::InProgress),
            "Closed" => Some(TicketStatus::Closed),
            _ => None,
        }
    }
}

/// ServiceTicket principal - mapea exactamente a la tabla service_ticket
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServiceTicket {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub description: String,
    pub status: String,
    pub total_cost: Decimal,
    pub date_in: DateTime<Utc>,
    pub date_out: Option<DateTime<Utc>>,
}

/// Row de lectura de un part asignado a un ticket (junction + inventory_part)
#[derive(Debug, Clone, FromRow)]
pub struct TicketPartRow {
    pub part_id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
}

/// Row de lectura de un ticket del customer autenticado (ticket + vehicle)
#[derive(Debug, Clone, FromRow)]
pub struct CustomerTicketRow {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub description: String,
    pub status: String,
    pub total_cost: Decimal,
    pub date_in: DateTime<Utc>,
    pub date_out: Option<DateTime<Utc>>,
    pub make: String,
    pub model: String,
    pub year: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for value in TicketStatus::ALLOWED {
            let status = TicketStatus::parse(value).unwrap();
            assert_eq!(status.as_str(), value);
        }
    }

    #[test]
    fn test_status_rejects_unknown() {
        assert!(TicketStatus::parse("Cancelled").is_none());
        assert!(TicketStatus::parse("open").is_none());
    }
}
