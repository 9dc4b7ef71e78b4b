use crate::dto::customer_dto::{ApiResponse, PaginatedResponse, PaginationMeta, PaginationParams};
use crate::dto::mechanic_dto::MechanicResponse;
use crate::dto::service_ticket_dto::{
    AddPartRequest, CreateTicketRequest, EditMechanicsRequest, EditMechanicsResponse,
    TicketMechanicsResponse, TicketPartItem, TicketPartsResponse, TicketResponse,
    UpdateTicketRequest,
};
use crate::models::service_ticket::{ServiceTicket, TicketPartRow, TicketStatus};
use crate::repositories::service_ticket_repository::{parts_total, ServiceTicketRepository};
use crate::utils::errors::{
    bad_request_error, field_validation_error, not_found_error, AppError,
};
use crate::utils::validation::{validate_enum, validate_not_empty};
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct ServiceTicketController {
    repository: ServiceTicketRepository,
}

impl ServiceTicketController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ServiceTicketRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateTicketRequest,
    ) -> Result<ApiResponse<TicketResponse>, AppError> {
        request.validate().map_err(AppError::Validation)?;

        validate_not_empty(&request.description)
            .map_err(|e| field_validation_error("description", e))?;

        let status = request.status.unwrap_or_else(|| TicketStatus::Open.as_str().to_string());
        validate_enum(status.as_str(), &TicketStatus::ALLOWED)
            .map_err(|e| field_validation_error("status", e))?;

        if !self.repository.vehicle_exists(request.vehicle_id).await? {
            return Err(not_found_error("Vehicle", &request.vehicle_id.to_string()));
        }

        let total_cost = match request.total_cost {
            Some(value) => Decimal::from_f64_retain(value)
                .ok_or_else(|| bad_request_error("Invalid total_cost value"))?,
            None => Decimal::ZERO,
        };

        let ticket = ServiceTicket {
            id: Uuid::new_v4(),
            vehicle_id: request.vehicle_id,
            description: request.description,
            status,
            total_cost,
            date_in: Utc::now(),
            date_out: None,
        };

        let saved = self.repository.create(&ticket).await?;

        Ok(ApiResponse::success_with_message(
            TicketResponse::from(saved),
            "Service ticket created successfully".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<TicketResponse, AppError> {
        let ticket = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Service ticket", &id.to_string()))?;

        Ok(TicketResponse::from(ticket))
    }

    pub async fn list(
        &self,
        params: PaginationParams,
    ) -> Result<PaginatedResponse<TicketResponse>, AppError> {
        let tickets = self
            .repository
            .list(params.per_page(), params.offset())
            .await?;
        let total = self.repository.count().await?;

        let data = tickets.into_iter().map(TicketResponse::from).collect();
        let meta = PaginationMeta::new(params.page(), params.per_page(), total);

        Ok(PaginatedResponse::new(data, meta))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateTicketRequest,
    ) -> Result<ApiResponse<TicketResponse>, AppError> {
        request.validate().map_err(AppError::Validation)?;

        let mut ticket = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Service ticket", &id.to_string()))?;

        if let Some(status) = &request.status {
            validate_enum(status.as_str(), &TicketStatus::ALLOWED)
                .map_err(|e| field_validation_error("status", e))?;
        }

        if let Some(vehicle_id) = request.vehicle_id {
            if !self.repository.vehicle_exists(vehicle_id).await? {
                return Err(not_found_error("Vehicle", &vehicle_id.to_string()));
            }
            ticket.vehicle_id = vehicle_id;
        }

        if let Some(description) = request.description {
            validate_not_empty(&description)
                .map_err(|e| field_validation_error("description", e))?;
            ticket.description = description;
        }
        if let Some(status) = request.status {
            ticket.status = status;
        }
        if let Some(total_cost) = request.total_cost {
            ticket.total_cost = Decimal::from_f64_retain(total_cost)
                .ok_or_else(|| bad_request_error("Invalid total_cost value"))?;
        }
        if let Some(date_out) = request.date_out {
            ticket.date_out = Some(date_out);
        }

        let updated = self.repository.update(&ticket).await?;

        Ok(ApiResponse::success_with_message(
            TicketResponse::from(updated),
            "Service ticket updated successfully".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete_cascade(id).await
    }

    // ============================================
    // Assignment Manager
    // ============================================

    pub async fn assign_mechanic(
        &self,
        ticket_id: Uuid,
        mechanic_id: Uuid,
    ) -> Result<TicketMechanicsResponse, AppError> {
        self.repository.assign_mechanic(ticket_id, mechanic_id).await?;
        self.get_mechanics(ticket_id).await
    }

    pub async fn remove_mechanic(
        &self,
        ticket_id: Uuid,
        mechanic_id: Uuid,
    ) -> Result<TicketMechanicsResponse, AppError> {
        self.repository.remove_mechanic(ticket_id, mechanic_id).await?;
        self.get_mechanics(ticket_id).await
    }

    /// Edición masiva de mechanics: remociones primero, adiciones después,
    /// todo o nada.
    pub async fn edit_mechanics(
        &self,
        ticket_id: Uuid,
        request: EditMechanicsRequest,
    ) -> Result<EditMechanicsResponse, AppError> {
        self.repository
            .bulk_edit_mechanics(ticket_id, &request.add_ids, &request.remove_ids)
            .await?;

        let mechanics = self.repository.list_mechanics(ticket_id).await?;

        Ok(EditMechanicsResponse {
            service_ticket_id: ticket_id,
            removed_ids: request.remove_ids,
            added_ids: request.add_ids,
            mechanics: mechanics.into_iter().map(MechanicResponse::from).collect(),
        })
    }

    pub async fn get_mechanics(&self, ticket_id: Uuid) -> Result<TicketMechanicsResponse, AppError> {
        let mechanics = self.repository.list_mechanics(ticket_id).await?;

        Ok(TicketMechanicsResponse {
            service_ticket_id: ticket_id,
            count: mechanics.len(),
            mechanics: mechanics.into_iter().map(MechanicResponse::from).collect(),
        })
    }

    pub async fn add_part(
        &self,
        ticket_id: Uuid,
        request: AddPartRequest,
    ) -> Result<TicketPartsResponse, AppError> {
        let quantity = request.quantity.unwrap_or(1);
        if quantity < 1 {
            return Err(bad_request_error("Quantity must be at least 1"));
        }

        let (rows, total) = self
            .repository
            .add_part(ticket_id, request.part_id, quantity)
            .await?;

        Ok(Self::parts_response(ticket_id, rows, total))
    }

    pub async fn remove_part(
        &self,
        ticket_id: Uuid,
        part_id: Uuid,
    ) -> Result<TicketPartsResponse, AppError> {
        let (rows, total) = self.repository.remove_part(ticket_id, part_id).await?;

        Ok(Self::parts_response(ticket_id, rows, total))
    }

    pub async fn get_parts(&self, ticket_id: Uuid) -> Result<TicketPartsResponse, AppError> {
        let rows = self.repository.list_parts(ticket_id).await?;
        let total = parts_total(&rows);

        Ok(Self::parts_response(ticket_id, rows, total))
    }

    fn parts_response(
        ticket_id: Uuid,
        rows: Vec<TicketPartRow>,
        total: Decimal,
    ) -> TicketPartsResponse {
        let parts: Vec<TicketPartItem> = rows.into_iter().map(TicketPartItem::from).collect();

        TicketPartsResponse {
            service_ticket_id: ticket_id,
            count: parts.len(),
            parts,
            total_parts_cost: total.to_string().parse().unwrap_or(0.0),
        }
    }
}
