use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::customer::Customer;

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            message: Some(message),
            data: None,
        }
    }
}

// Parámetros de paginación para listados
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PaginationParams {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    // per_page acotado a 100 para evitar queries excesivas
    pub fn per_page(&self) -> i64 {
        self.per_page.unwrap_or(10).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.per_page()
    }
}

// Metadata de paginación en las responses de listado
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub per_page: i64,
    pub total_items: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: i64, per_page: i64, total_items: i64) -> Self {
        let total_pages = if total_items == 0 {
            0
        } else {
            (total_items + per_page - 1) / per_page
        };

        Self {
            page,
            per_page,
            total_items,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1 && total_pages > 0,
        }
    }
}

// Response paginada de listados
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub success: bool,
    pub pagination: PaginationMeta,
    pub data: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, pagination: PaginationMeta) -> Self {
        Self {
            success: true,
            pagination,
            data,
        }
    }
}

// Request para registrar un customer
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 7, max = 20))]
    pub phone: String,

    #[validate(length(min = 1, max = 255))]
    pub address: String,

    #[validate(length(min = 8, max = 100))]
    pub password: String,
}

// Request para actualizar un customer
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCustomerRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 7, max = 20))]
    pub phone: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub address: Option<String>,

    #[validate(length(min = 8, max = 100))]
    pub password: Option<String>,
}

// Response de customer (sin password)
#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
            address: customer.address,
            created_at: customer.created_at,
        }
    }
}

// Un ticket del customer autenticado, con resumen del vehículo
#[derive(Debug, Serialize)]
pub struct MyTicketItem {
    pub service_ticket_id: Uuid,
    pub vehicle_id: Uuid,
    pub vehicle: String,
    pub date_in: DateTime<Utc>,
    pub date_out: Option<DateTime<Utc>>,
    pub description: String,
    pub status: String,
    pub total_cost: f64,
    pub mechanics: Vec<String>,
}

// Response de my-tickets
#[derive(Debug, Serialize)]
pub struct MyTicketsResponse {
    pub customer_id: Uuid,
    pub customer_name: String,
    pub count: usize,
    pub service_tickets: Vec<MyTicketItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_params_defaults() {
        let params = PaginationParams { page: None, per_page: None };
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page(), 10);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_pagination_params_clamped() {
        let params = PaginationParams { page: Some(0), per_page: Some(500) };
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page(), 100);

        let params = PaginationParams { page: Some(3), per_page: Some(25) };
        assert_eq!(params.offset(), 50);
    }

    #[test]
    fn test_pagination_meta() {
        let meta = PaginationMeta::new(2, 10, 35);
        assert_eq!(meta.total_pages, 4);
        assert!(meta.has_next);
        assert!(meta.has_prev);

        let last = PaginationMeta::new(4, 10, 35);
        assert!(!last.has_next);

        let empty = PaginationMeta::new(1, 10, 0);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next);
        assert!(!empty.has_prev);
    }
}
