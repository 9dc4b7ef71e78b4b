use crate::dto::customer_dto::{ApiResponse, PaginatedResponse, PaginationMeta, PaginationParams};
use crate::dto::inventory_dto::{
    CreatePartRequest, InventoryListParams, PartResponse, UpdatePartRequest,
};
use crate::models::inventory::InventoryPart;
use crate::repositories::inventory_repository::InventoryRepository;
use crate::utils::errors::{
    bad_request_error, field_validation_error, not_found_error, AppError,
};
use crate::utils::validation::validate_non_negative;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct InventoryController {
    repository: InventoryRepository,
}

impl InventoryController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: InventoryRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreatePartRequest,
    ) -> Result<ApiResponse<PartResponse>, AppError> {
        request.validate().map_err(AppError::Validation)?;

        validate_non_negative(request.price).map_err(|e| field_validation_error("price", e))?;

        let price = Decimal::from_f64_retain(request.price)
            .ok_or_else(|| bad_request_error("Invalid price value"))?;

        let part = InventoryPart {
            id: Uuid::new_v4(),
            name: request.name,
            price,
            quantity_on_hand: request.quantity_on_hand.unwrap_or(0),
            created_at: Utc::now(),
        };

        let saved = self.repository.create(&part).await?;

        Ok(ApiResponse::success_with_message(
            PartResponse::from(saved),
            "Part created successfully".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<PartResponse, AppError> {
        let part = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Part", &id.to_string()))?;

        Ok(PartResponse::from(part))
    }

    /// Listado paginado con búsqueda opcional por substring de nombre
    pub async fn list(
        &self,
        params: InventoryListParams,
    ) -> Result<PaginatedResponse<PartResponse>, AppError> {
        let pagination = PaginationParams {
            page: params.page,
            per_page: params.per_page,
        };
        let name = params.name.as_deref().filter(|s| !s.trim().is_empty());

        let parts = self
            .repository
            .list(name, pagination.per_page(), pagination.offset())
            .await?;
        let total = self.repository.count(name).await?;

        let data = parts.into_iter().map(PartResponse::from).collect();
        let meta = PaginationMeta::new(pagination.page(), pagination.per_page(), total);

        Ok(PaginatedResponse::new(data, meta))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdatePartRequest,
    ) -> Result<ApiResponse<PartResponse>, AppError> {
        request.validate().map_err(AppError::Validation)?;

        let mut part = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Part", &id.to_string()))?;

        if let Some(price) = request.price {
            validate_non_negative(price).map_err(|e| field_validation_error("price", e))?;
            part.price = Decimal::from_f64_retain(price)
                .ok_or_else(|| bad_request_error("Invalid price value"))?;
        }

        if let Some(quantity) = request.quantity_on_hand {
            validate_non_negative(quantity)
                .map_err(|e| field_validation_error("quantity_on_hand", e))?;
            part.quantity_on_hand = quantity;
        }

        if let Some(name) = request.name {
            part.name = name;
        }

        let updated = self.repository.update(&part).await?;

        Ok(ApiResponse::success_with_message(
            PartResponse::from(updated),
            "Part updated successfully".to_string(),
        ))
    }

    /// Eliminar un part: purga junction rows y recalcula los totales de los
    /// tickets afectados. Devuelve cuántos tickets fueron recalculados.
    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        self.repository.delete(id).await
    }
}
