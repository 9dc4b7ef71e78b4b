use crate::models::customer::Customer;
use crate::utils::errors::{not_found_error, AppError};
use sqlx::PgPool;
use uuid::Uuid;

pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, customer: &Customer) -> Result<Customer, AppError> {
        let result = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customer (id, name, email, phone, address, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(&customer.password_hash)
        .bind(customer.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, AppError> {
        let result = sqlx::query_as::<_, Customer>("SELECT * FROM customer WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, AppError> {
        let result = sqlx::query_as::<_, Customer>("SELECT * FROM customer WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM customer WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        Ok(result.0)
    }

    pub async fn email_taken_by_other(&self, email: &str, id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM customer WHERE email = $1 AND id <> $2)",
        )
        .bind(email)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result.0)
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Customer>, AppError> {
        let result = sqlx::query_as::<_, Customer>(
            "SELECT * FROM customer ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result)
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customer")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.0)
    }

    pub async fn update(&self, customer: &Customer) -> Result<Customer, AppError> {
        let result = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customer
            SET name = $2, email = $3, phone = $4, address = $5, password_hash = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(&customer.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result)
    }

    /// Eliminar un customer en cascada: junction rows de los tickets de sus
    /// vehículos, los tickets, los vehículos y finalmente el customer, todo
    /// en una sola transacción. Devuelve (vehicles, tickets) eliminados.
    pub async fn delete_cascade(&self, id: Uuid) -> Result<(u64, u64), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let existing = sqlx::query("SELECT id FROM customer WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if existing.is_none() {
            return Err(not_found_error("Customer", &id.to_string()));
        }

        // Devolver al stock las cantidades reservadas por tickets que van a desaparecer
        sqlx::query(
            r#"
            UPDATE inventory_part p
            SET quantity_on_hand = p.quantity_on_hand + sp.quantity
            FROM service_ticket_part sp
            JOIN service_ticket st ON st.id = sp.service_ticket_id
            JOIN vehicle v ON v.id = st.vehicle_id
            WHERE sp.part_id = p.id AND v.customer_id = $1
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        sqlx::query(
            r#"
            DELETE FROM service_ticket_part
            WHERE service_ticket_id IN (
                SELECT st.id FROM service_ticket st
                JOIN vehicle v ON v.id = st.vehicle_id
                WHERE v.customer_id = $1
            )
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        sqlx::query(
            r#"
            DELETE FROM service_ticket_mechanic
            WHERE service_ticket_id IN (
                SELECT st.id FROM service_ticket st
                JOIN vehicle v ON v.id = st.vehicle_id
                WHERE v.customer_id = $1
            )
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        let tickets = sqlx::query(
            "DELETE FROM service_ticket WHERE vehicle_id IN (SELECT id FROM vehicle WHERE customer_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        let vehicles = sqlx::query("DELETE FROM vehicle WHERE customer_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        sqlx::query("DELETE FROM customer WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;

        Ok((vehicles.rows_affected(), tickets.rows_affected()))
    }
}
