use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::dto::customer_dto::{
    ApiResponse, CreateCustomerRequest, CustomerResponse, MyTicketItem, MyTicketsResponse,
    PaginatedResponse, PaginationMeta, PaginationParams, UpdateCustomerRequest,
};
use crate::models::customer::Customer;
use crate::repositories::customer_repository::CustomerRepository;
use crate::repositories::service_ticket_repository::ServiceTicketRepository;
use crate::utils::errors::{conflict_error, field_validation_error, not_found_error, AppError};
use crate::utils::jwt::{generate_token, JwtConfig};
use crate::utils::validation::{validate_email, validate_phone};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct CustomerController {
    repository: CustomerRepository,
    tickets: ServiceTicketRepository,
}

impl CustomerController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CustomerRepository::new(pool.clone()),
            tickets: ServiceTicketRepository::new(pool),
        }
    }

    /// Registro de un customer nuevo
    pub async fn register(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<ApiResponse<CustomerResponse>, AppError> {
        request.validate().map_err(AppError::Validation)?;

        validate_email(&request.email).map_err(|e| field_validation_error("email", e))?;
        validate_phone(&request.phone).map_err(|e| field_validation_error("phone", e))?;

        if self.repository.email_exists(&request.email).await? {
            return Err(conflict_error("Customer", "email", &request.email));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;

        let customer = Customer {
            id: Uuid::new_v4(),
            name: request.name,
            email: request.email,
            phone: request.phone,
            address: request.address,
            password_hash,
            created_at: Utc::now(),
        };

        let saved = self.repository.create(&customer).await?;

        Ok(ApiResponse::success_with_message(
            CustomerResponse::from(saved),
            "Customer registered successfully".to_string(),
        ))
    }

    /// Login: email + password → JWT
    pub async fn login(
        &self,
        request: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        request.validate().map_err(AppError::Validation)?;

        let customer = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        let valid = verify(&request.password, &customer.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized("Invalid email or password".to_string()));
        }

        let token = generate_token(customer.id, jwt_config)?;

        Ok(LoginResponse::success(token, customer.id.to_string()))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<CustomerResponse, AppError> {
        let customer = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Customer", &id.to_string()))?;

        Ok(CustomerResponse::from(customer))
    }

    pub async fn list(
        &self,
        params: PaginationParams,
    ) -> Result<PaginatedResponse<CustomerResponse>, AppError> {
        let customers = self
            .repository
            .list(params.per_page(), params.offset())
            .await?;
        let total = self.repository.count().await?;

        let data = customers.into_iter().map(CustomerResponse::from).collect();
        let meta = PaginationMeta::new(params.page(), params.per_page(), total);

        Ok(PaginatedResponse::new(data, meta))
    }

    /// Actualizar un customer. Solo el dueño del token puede modificar su
    /// propio registro.
    pub async fn update(
        &self,
        id: Uuid,
        auth_customer_id: Uuid,
        request: UpdateCustomerRequest,
    ) -> Result<ApiResponse<CustomerResponse>, AppError> {
        if id != auth_customer_id {
            return Err(AppError::Unauthorized(
                "Cannot modify another customer's data".to_string(),
            ));
        }

        request.validate().map_err(AppError::Validation)?;

        let mut customer = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Customer", &id.to_string()))?;

        if let Some(email) = &request.email {
            if self.repository.email_taken_by_other(email, id).await? {
                return Err(conflict_error("Customer", "email", email));
            }
        }

        if let Some(phone) = &request.phone {
            validate_phone(phone).map_err(|e| field_validation_error("phone", e))?;
        }

        if let Some(name) = request.name {
            customer.name = name;
        }
        if let Some(email) = request.email {
            customer.email = email;
        }
        if let Some(phone) = request.phone {
            customer.phone = phone;
        }
        if let Some(address) = request.address {
            customer.address = address;
        }
        if let Some(password) = request.password {
            customer.password_hash = hash(&password, DEFAULT_COST)
                .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;
        }

        let updated = self.repository.update(&customer).await?;

        Ok(ApiResponse::success_with_message(
            CustomerResponse::from(updated),
            "Customer updated successfully".to_string(),
        ))
    }

    /// Eliminar un customer (cascade-with-warning). Devuelve los vehículos
    /// y tickets eliminados en cascada.
    pub async fn delete(&self, id: Uuid, auth_customer_id: Uuid) -> Result<(u64, u64), AppError> {
        if id != auth_customer_id {
            return Err(AppError::Unauthorized(
                "Cannot delete another customer's data".to_string(),
            ));
        }

        self.repository.delete_cascade(id).await
    }

    /// Tickets del customer autenticado, a través de todos sus vehículos
    pub async fn my_tickets(&self, customer_id: Uuid) -> Result<MyTicketsResponse, AppError> {
        let customer = self
            .repository
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| not_found_error("Customer", &customer_id.to_string()))?;

        let rows = self.tickets.list_for_customer(customer_id).await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let mechanics = self.tickets.mechanic_names(row.id).await?;
            items.push(MyTicketItem {
                service_ticket_id: row.id,
                vehicle_id: row.vehicle_id,
                vehicle: format!("{} {} {}", row.year, row.make, row.model),
                date_in: row.date_in,
                date_out: row.date_out,
                description: row.description,
                status: row.status,
                total_cost: row.total_cost.to_string().parse().unwrap_or(0.0),
                mechanics,
            });
        }

        Ok(MyTicketsResponse {
            customer_id,
            customer_name: customer.name,
            count: items.len(),
            service_tickets: items,
        })
    }
}
