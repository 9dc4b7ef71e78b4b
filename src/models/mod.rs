//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod customer;
pub mod inventory;
pub mod mechanic;
pub mod service_ticket;
pub mod vehicle;
