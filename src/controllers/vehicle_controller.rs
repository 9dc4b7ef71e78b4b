use crate::dto::customer_dto::{
    ApiResponse, PaginatedResponse, PaginationMeta, PaginationParams,
};
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse};
use crate::models::vehicle::Vehicle;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{conflict_error, field_validation_error, not_found_error, AppError};
use crate::utils::validation::validate_vin;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate().map_err(AppError::Validation)?;

        validate_vin(&request.vin).map_err(|e| field_validation_error("vin", e))?;

        // El customer referenciado tiene que existir (FK)
        if !self.repository.customer_exists(request.customer_id).await? {
            return Err(not_found_error("Customer", &request.customer_id.to_string()));
        }

        if self.repository.vin_exists(&request.vin).await? {
            return Err(conflict_error("Vehicle", "VIN", &request.vin));
        }

        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            customer_id: request.customer_id,
            make: request.make,
            model: request.model,
            year: request.year,
            vin: request.vin,
            created_at: Utc::now(),
        };

        let saved = self.repository.create(&vehicle).await?;

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(saved),
            "Vehicle created successfully".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        Ok(VehicleResponse::from(vehicle))
    }

    pub async fn list(
        &self,
        params: PaginationParams,
    ) -> Result<PaginatedResponse<VehicleResponse>, AppError> {
        let vehicles = self
            .repository
            .list(params.per_page(), params.offset())
            .await?;
        let total = self.repository.count().await?;

        let data = vehicles.into_iter().map(VehicleResponse::from).collect();
        let meta = PaginationMeta::new(params.page(), params.per_page(), total);

        Ok(PaginatedResponse::new(data, meta))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate().map_err(AppError::Validation)?;

        let mut vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        if let Some(vin) = &request.vin {
            validate_vin(vin).map_err(|e| field_validation_error("vin", e))?;
            if self.repository.vin_taken_by_other(vin, id).await? {
                return Err(conflict_error("Vehicle", "VIN", vin));
            }
        }

        if let Some(customer_id) = request.customer_id {
            if !self.repository.customer_exists(customer_id).await? {
                return Err(not_found_error("Customer", &customer_id.to_string()));
            }
            vehicle.customer_id = customer_id;
        }

        if let Some(make) = request.make {
            vehicle.make = make;
        }
        if let Some(model) = request.model {
            vehicle.model = model;
        }
        if let Some(year) = request.year {
            vehicle.year = year;
        }
        if let Some(vin) = request.vin {
            vehicle.vin = vin;
        }

        let updated = self.repository.update(&vehicle).await?;

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(updated),
            "Vehicle updated successfully".to_string(),
        ))
    }

    /// Eliminar un vehículo (cascade-with-warning). Devuelve los tickets
    /// eliminados en cascada.
    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        self.repository.delete_cascade(id).await
    }
}
