use crate::models::vehicle::Vehicle;
use crate::utils::errors::{not_found_error, AppError};
use sqlx::PgPool;
use uuid::Uuid;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        let result = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicle (id, customer_id, make, model, year, vin, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(vehicle.customer_id)
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(&vehicle.vin)
        .bind(vehicle.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let result = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicle WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result)
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Vehicle>, AppError> {
        let result = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicle ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result)
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicle")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.0)
    }

    pub async fn customer_exists(&self, customer_id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM customer WHERE id = $1)")
                .bind(customer_id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        Ok(result.0)
    }

    pub async fn vin_exists(&self, vin: &str) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicle WHERE vin = $1)")
            .bind(vin)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.0)
    }

    pub async fn vin_taken_by_other(&self, vin: &str, id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicle WHERE vin = $1 AND id <> $2)")
                .bind(vin)
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        Ok(result.0)
    }

    pub async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        let result = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicle
            SET customer_id = $2, make = $3, model = $4, year = $5, vin = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(vehicle.customer_id)
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(&vehicle.vin)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result)
    }

    /// Eliminar un vehículo en cascada: junction rows de sus tickets, los
    /// tickets y el vehículo, en una sola transacción. Devuelve los tickets
    /// eliminados.
    pub async fn delete_cascade(&self, id: Uuid) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let existing = sqlx::query("SELECT id FROM vehicle WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if existing.is_none() {
            return Err(not_found_error("Vehicle", &id.to_string()));
        }

        sqlx::query(
            r#"
            UPDATE inventory_part p
            SET quantity_on_hand = p.quantity_on_hand + sp.quantity
            FROM service_ticket_part sp
            JOIN service_ticket st ON st.id = sp.service_ticket_id
            WHERE sp.part_id = p.id AND st.vehicle_id = $1
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        sqlx::query(
            "DELETE FROM service_ticket_part WHERE service_ticket_id IN (SELECT id FROM service_ticket WHERE vehicle_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        sqlx::query(
            "DELETE FROM service_ticket_mechanic WHERE service_ticket_id IN (SELECT id FROM service_ticket WHERE vehicle_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        let tickets = sqlx::query("DELETE FROM service_ticket WHERE vehicle_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        sqlx::query("DELETE FROM vehicle WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;

        Ok(tickets.rows_affected())
    }
}
