use crate::models::mechanic::Mechanic;
use crate::utils::errors::{not_found_error, AppError};
use sqlx::PgPool;
use uuid::Uuid;

pub struct MechanicRepository {
    pool: PgPool,
}

impl MechanicRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, mechanic: &Mechanic) -> Result<Mechanic, AppError> {
        let result = sqlx::query_as::<_, Mechanic>(
            r#"
            INSERT INTO mechanic (id, name, email, phone, address, salary, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(mechanic.id)
        .bind(&mechanic.name)
        .bind(&mechanic.email)
        .bind(&mechanic.phone)
        .bind(&mechanic.address)
        .bind(mechanic.salary)
        .bind(mechanic.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Mechanic>, AppError> {
        let result = sqlx::query_as::<_, Mechanic>("SELECT * FROM mechanic WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result)
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Mechanic>, AppError> {
        let result = sqlx::query_as::<_, Mechanic>(
            "SELECT * FROM mechanic ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result)
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM mechanic")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.0)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM mechanic WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        Ok(result.0)
    }

    pub async fn email_taken_by_other(&self, email: &str, id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM mechanic WHERE email = $1 AND id <> $2)",
        )
        .bind(email)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result.0)
    }

    pub async fn update(&self, mechanic: &Mechanic) -> Result<Mechanic, AppError> {
        let result = sqlx::query_as::<_, Mechanic>(
            r#"
            UPDATE mechanic
            SET name = $2, email = $3, phone = $4, address = $5, salary = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(mechanic.id)
        .bind(&mechanic.name)
        .bind(&mechanic.email)
        .bind(&mechanic.phone)
        .bind(&mechanic.address)
        .bind(mechanic.salary)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result)
    }

    /// Eliminar un mechanic: primero sus junction rows, después el row
    /// principal, en una sola transacción (sin junction rows huérfanas).
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query("DELETE FROM service_ticket_mechanic WHERE mechanic_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let deleted = sqlx::query("DELETE FROM mechanic WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if deleted.rows_affected() == 0 {
            return Err(not_found_error("Mechanic", &id.to_string()));
        }

        tx.commit().await.map_err(AppError::Database)?;

        Ok(())
    }
}
