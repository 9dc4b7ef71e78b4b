use crate::models::inventory::InventoryPart;
use crate::utils::errors::{not_found_error, AppError};
use sqlx::PgPool;
use uuid::Uuid;

pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, part: &InventoryPart) -> Result<InventoryPart, AppError> {
        let result = sqlx::query_as::<_, InventoryPart>(
            r#"
            INSERT INTO inventory_part (id, name, price, quantity_on_hand, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(part.id)
        .bind(&part.name)
        .bind(part.price)
        .bind(part.quantity_on_hand)
        .bind(part.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<InventoryPart>, AppError> {
        let result = sqlx::query_as::<_, InventoryPart>("SELECT * FROM inventory_part WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result)
    }

    /// Listar parts con búsqueda opcional por substring de nombre
    /// (case-insensitive).
    pub async fn list(
        &self,
        name: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<InventoryPart>, AppError> {
        let result = match name {
            Some(name) => {
                sqlx::query_as::<_, InventoryPart>(
                    r#"
                    SELECT * FROM inventory_part
                    WHERE name ILIKE '%' || $1 || '%'
                    ORDER BY created_at DESC
                    LIMIT $2 OFFSET $3
                    "#,
                )
                .bind(name)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, InventoryPart>(
                    "SELECT * FROM inventory_part ORDER BY created_at DESC LIMIT $1 OFFSET $2",
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(AppError::Database)?;

        Ok(result)
    }

    pub async fn count(&self, name: Option<&str>) -> Result<i64, AppError> {
        let result: (i64,) = match name {
            Some(name) => {
                sqlx::query_as(
                    "SELECT COUNT(*) FROM inventory_part WHERE name ILIKE '%' || $1 || '%'",
                )
                .bind(name)
                .fetch_one(&self.pool)
                .await
            }
            None => {
                sqlx::query_as("SELECT COUNT(*) FROM inventory_part")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(AppError::Database)?;

        Ok(result.0)
    }

    pub async fn update(&self, part: &InventoryPart) -> Result<InventoryPart, AppError> {
        let result = sqlx::query_as::<_, InventoryPart>(
            r#"
            UPDATE inventory_part
            SET name = $2, price = $3, quantity_on_hand = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(part.id)
        .bind(&part.name)
        .bind(part.price)
        .bind(part.quantity_on_hand)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result)
    }

    /// Eliminar un part: purga sus junction rows y recalcula el total_cost
    /// de los tickets afectados, todo en una sola transacción. El precio de
    /// un part eliminado deja de contar en los tickets que lo referenciaban.
    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let affected_tickets: Vec<(Uuid,)> = sqlx::query_as(
            "SELECT DISTINCT service_ticket_id FROM service_ticket_part WHERE part_id = $1",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        sqlx::query("DELETE FROM service_ticket_part WHERE part_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let deleted = sqlx::query("DELETE FROM inventory_part WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if deleted.rows_affected() == 0 {
            return Err(not_found_error("Part", &id.to_string()));
        }

        let ticket_ids: Vec<Uuid> = affected_tickets.into_iter().map(|(tid,)| tid).collect();

        if !ticket_ids.is_empty() {
            sqlx::query(
                r#"
                UPDATE service_ticket st
                SET total_cost = COALESCE((
                    SELECT SUM(p.price * sp.quantity)
                    FROM service_ticket_part sp
                    JOIN inventory_part p ON p.id = sp.part_id
                    WHERE sp.service_ticket_id = st.id
                ), 0)
                WHERE st.id = ANY($1)
                "#,
            )
            .bind(&ticket_ids)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;

        Ok(ticket_ids.len() as u64)
    }
}
