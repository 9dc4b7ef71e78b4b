use crate::dto::customer_dto::{
    ApiResponse, PaginatedResponse, PaginationMeta, PaginationParams,
};
use crate::dto::mechanic_dto::{CreateMechanicRequest, MechanicResponse, UpdateMechanicRequest};
use crate::models::mechanic::Mechanic;
use crate::repositories::mechanic_repository::MechanicRepository;
use crate::utils::errors::{
    bad_request_error, conflict_error, field_validation_error, not_found_error, AppError,
};
use crate::utils::validation::{validate_email, validate_non_negative, validate_phone};
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct MechanicController {
    repository: MechanicRepository,
}

impl MechanicController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: MechanicRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateMechanicRequest,
    ) -> Result<ApiResponse<MechanicResponse>, AppError> {
        request.validate().map_err(AppError::Validation)?;

        validate_email(&request.email).map_err(|e| field_validation_error("email", e))?;
        validate_phone(&request.phone).map_err(|e| field_validation_error("phone", e))?;
        validate_non_negative(request.salary)
            .map_err(|e| field_validation_error("salary", e))?;

        if self.repository.email_exists(&request.email).await? {
            return Err(conflict_error("Mechanic", "email", &request.email));
        }

        let salary = Decimal::from_f64_retain(request.salary)
            .ok_or_else(|| bad_request_error("Invalid salary value"))?;

        let mechanic = Mechanic {
            id: Uuid::new_v4(),
            name: request.name,
            email: request.email,
            phone: request.phone,
            address: request.address,
            salary,
            created_at: Utc::now(),
        };

        let saved = self.repository.create(&mechanic).await?;

        Ok(ApiResponse::success_with_message(
            MechanicResponse::from(saved),
            "Mechanic created successfully".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<MechanicResponse, AppError> {
        let mechanic = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Mechanic", &id.to_string()))?;

        Ok(MechanicResponse::from(mechanic))
    }

    pub async fn list(
        &self,
        params: PaginationParams,
    ) -> Result<PaginatedResponse<MechanicResponse>, AppError> {
        let mechanics = self
            .repository
            .list(params.per_page(), params.offset())
            .await?;
        let total = self.repository.count().await?;

        let data = mechanics.into_iter().map(MechanicResponse::from).collect();
        let meta = PaginationMeta::new(params.page(), params.per_page(), total);

        Ok(PaginatedResponse::new(data, meta))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateMechanicRequest,
    ) -> Result<ApiResponse<MechanicResponse>, AppError> {
        request.validate().map_err(AppError::Validation)?;

        let mut mechanic = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Mechanic", &id.to_string()))?;

        if let Some(email) = &request.email {
            if self.repository.email_taken_by_other(email, id).await? {
                return Err(conflict_error("Mechanic", "email", email));
            }
        }

        if let Some(phone) = &request.phone {
            validate_phone(phone).map_err(|e| field_validation_error("phone", e))?;
        }

        if let Some(salary) = request.salary {
            validate_non_negative(salary).map_err(|e| field_validation_error("salary", e))?;
            mechanic.salary = Decimal::from_f64_retain(salary)
                .ok_or_else(|| bad_request_error("Invalid salary value"))?;
        }

        if let Some(name) = request.name {
            mechanic.name = name;
        }
        if let Some(email) = request.email {
            mechanic.email = email;
        }
        if let Some(phone) = request.phone {
            mechanic.phone = phone;
        }
        if let Some(address) = request.address {
            mechanic.address = address;
        }

        let updated = self.repository.update(&mechanic).await?;

        Ok(ApiResponse::success_with_message(
            MechanicResponse::from(updated),
            "Mechanic updated successfully".to_string(),
        ))
    }

    /// Eliminar un mechanic: sus asignaciones a tickets se purgan primero
    /// (misma transacción, sin junction rows huérfanas).
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await
    }
}
