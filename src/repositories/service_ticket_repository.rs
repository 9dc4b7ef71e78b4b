//! Repository de ServiceTicket y de las dos relaciones junction
//! (mechanics y parts).
//!
//! Todas las mutaciones de junctions abren una transacción y toman un lock
//! FOR UPDATE sobre el row del ticket: mutaciones concurrentes del mismo
//! ticket se serializan y el recálculo de total_cost nunca ve una suma
//! desactualizada. total_cost se recalcula desde los parts asignados y
//! sobreescribe cualquier valor previo.

use crate::models::mechanic::Mechanic;
use crate::models::service_ticket::{CustomerTicketRow, ServiceTicket, TicketPartRow};
use crate::utils::errors::{not_found_error, AppError};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// Suma autoritativa de un listado de parts: Σ(price × quantity)
pub fn parts_total(rows: &[TicketPartRow]) -> Decimal {
    rows.iter()
        .map(|row| row.price * Decimal::from(row.quantity))
        .sum()
}

pub struct ServiceTicketRepository {
    pool: PgPool,
}

impl ServiceTicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, ticket: &ServiceTicket) -> Result<ServiceTicket, AppError> {
        let result = sqlx::query_as::<_, ServiceTicket>(
            r#"
            INSERT INTO service_ticket (id, vehicle_id, description, status, total_cost, date_in, date_out)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(ticket.id)
        .bind(ticket.vehicle_id)
        .bind(&ticket.description)
        .bind(&ticket.status)
        .bind(ticket.total_cost)
        .bind(ticket.date_in)
        .bind(ticket.date_out)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ServiceTicket>, AppError> {
        let result = sqlx::query_as::<_, ServiceTicket>("SELECT * FROM service_ticket WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result)
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<ServiceTicket>, AppError> {
        let result = sqlx::query_as::<_, ServiceTicket>(
            "SELECT * FROM service_ticket ORDER BY date_in DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result)
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM service_ticket")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.0)
    }

    pub async fn vehicle_exists(&self, vehicle_id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicle WHERE id = $1)")
            .bind(vehicle_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.0)
    }

    pub async fn update(&self, ticket: &ServiceTicket) -> Result<ServiceTicket, AppError> {
        let result = sqlx::query_as::<_, ServiceTicket>(
            r#"
            UPDATE service_ticket
            SET vehicle_id = $2, description = $3, status = $4, total_cost = $5, date_out = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(ticket.id)
        .bind(ticket.vehicle_id)
        .bind(&ticket.description)
        .bind(&ticket.status)
        .bind(ticket.total_cost)
        .bind(ticket.date_out)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result)
    }

    /// Eliminar un ticket: devuelve al stock las cantidades reservadas,
    /// purga sus junction rows y elimina el ticket, en una transacción.
    pub async fn delete_cascade(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        Self::lock_ticket(&mut tx, id).await?;

        sqlx::query(
            r#"
            UPDATE inventory_part p
            SET quantity_on_hand = p.quantity_on_hand + sp.quantity
            FROM service_ticket_part sp
            WHERE sp.part_id = p.id AND sp.service_ticket_id = $1
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        sqlx::query("DELETE FROM service_ticket_part WHERE service_ticket_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        sqlx::query("DELETE FROM service_ticket_mechanic WHERE service_ticket_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        sqlx::query("DELETE FROM service_ticket WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;

        Ok(())
    }

    // ============================================
    // Mechanics asignados
    // ============================================

    pub async fn assign_mechanic(&self, ticket_id: Uuid, mechanic_id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        Self::lock_ticket(&mut tx, ticket_id).await?;
        Self::check_mechanic_exists(&mut tx, mechanic_id).await?;

        let assigned: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM service_ticket_mechanic WHERE service_ticket_id = $1 AND mechanic_id = $2)",
        )
        .bind(ticket_id)
        .bind(mechanic_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        if assigned.0 {
            return Err(AppError::Conflict(format!(
                "Mechanic '{}' is already assigned to ticket '{}'",
                mechanic_id, ticket_id
            )));
        }

        sqlx::query(
            "INSERT INTO service_ticket_mechanic (service_ticket_id, mechanic_id) VALUES ($1, $2)",
        )
        .bind(ticket_id)
        .bind(mechanic_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;

        Ok(())
    }

    pub async fn remove_mechanic(&self, ticket_id: Uuid, mechanic_id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        Self::lock_ticket(&mut tx, ticket_id).await?;

        let deleted = sqlx::query(
            "DELETE FROM service_ticket_mechanic WHERE service_ticket_id = $1 AND mechanic_id = $2",
        )
        .bind(ticket_id)
        .bind(mechanic_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Mechanic '{}' is not assigned to ticket '{}'",
                mechanic_id, ticket_id
            )));
        }

        tx.commit().await.map_err(AppError::Database)?;

        Ok(())
    }

    /// Edición masiva: aplica todas las remociones y después todas las
    /// adiciones. Cualquier fallo (id inexistente, remoción de un mechanic
    /// no asignado, adición duplicada) revierte la edición completa.
    pub async fn bulk_edit_mechanics(
        &self,
        ticket_id: Uuid,
        add_ids: &[Uuid],
        remove_ids: &[Uuid],
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        Self::lock_ticket(&mut tx, ticket_id).await?;

        for mechanic_id in remove_ids {
            let deleted = sqlx::query(
                "DELETE FROM service_ticket_mechanic WHERE service_ticket_id = $1 AND mechanic_id = $2",
            )
            .bind(ticket_id)
            .bind(mechanic_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

            if deleted.rows_affected() == 0 {
                return Err(AppError::NotFound(format!(
                    "Mechanic '{}' is not assigned to ticket '{}'",
                    mechanic_id, ticket_id
                )));
            }
        }

        for mechanic_id in add_ids {
            Self::check_mechanic_exists(&mut tx, *mechanic_id).await?;

            let assigned: (bool,) = sqlx::query_as(
                "SELECT EXISTS(SELECT 1 FROM service_ticket_mechanic WHERE service_ticket_id = $1 AND mechanic_id = $2)",
            )
            .bind(ticket_id)
            .bind(mechanic_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

            if assigned.0 {
                return Err(AppError::Conflict(format!(
                    "Mechanic '{}' is already assigned to ticket '{}'",
                    mechanic_id, ticket_id
                )));
            }

            sqlx::query(
                "INSERT INTO service_ticket_mechanic (service_ticket_id, mechanic_id) VALUES ($1, $2)",
            )
            .bind(ticket_id)
            .bind(mechanic_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;

        Ok(())
    }

    /// Mechanics de un ticket en orden de asignación
    pub async fn list_mechanics(&self, ticket_id: Uuid) -> Result<Vec<Mechanic>, AppError> {
        self.check_ticket_exists(ticket_id).await?;

        let result = sqlx::query_as::<_, Mechanic>(
            r#"
            SELECT m.id, m.name, m.email, m.phone, m.address, m.salary, m.created_at
            FROM mechanic m
            JOIN service_ticket_mechanic sm ON sm.mechanic_id = m.id
            WHERE sm.service_ticket_id = $1
            ORDER BY sm.position
            "#,
        )
        .bind(ticket_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result)
    }

    // ============================================
    // Parts asignados
    // ============================================

    /// Agregar un part a un ticket reservando stock de forma atómica.
    /// Si el part ya estaba en el ticket la cantidad se acumula (el par
    /// (ticket, part) se mantiene único). Devuelve el listado resultante
    /// y el total recalculado.
    pub async fn add_part(
        &self,
        ticket_id: Uuid,
        part_id: Uuid,
        quantity: i32,
    ) -> Result<(Vec<TicketPartRow>, Decimal), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        Self::lock_ticket(&mut tx, ticket_id).await?;

        let part = sqlx::query("SELECT id FROM inventory_part WHERE id = $1 FOR UPDATE")
            .bind(part_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if part.is_none() {
            return Err(not_found_error("Part", &part_id.to_string()));
        }

        // Check-and-decrement atómico del stock
        let reserved = sqlx::query(
            "UPDATE inventory_part SET quantity_on_hand = quantity_on_hand - $2 WHERE id = $1 AND quantity_on_hand >= $2",
        )
        .bind(part_id)
        .bind(quantity)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        if reserved.rows_affected() == 0 {
            return Err(AppError::Conflict(format!(
                "Insufficient stock for part '{}' (requested {})",
                part_id, quantity
            )));
        }

        sqlx::query(
            r#"
            INSERT INTO service_ticket_part (service_ticket_id, part_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (service_ticket_id, part_id)
            DO UPDATE SET quantity = service_ticket_part.quantity + EXCLUDED.quantity
            "#,
        )
        .bind(ticket_id)
        .bind(part_id)
        .bind(quantity)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        let rows = Self::fetch_parts(&mut tx, ticket_id).await?;
        let total = parts_total(&rows);

        sqlx::query("UPDATE service_ticket SET total_cost = $2 WHERE id = $1")
            .bind(ticket_id)
            .bind(total)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;

        Ok((rows, total))
    }

    /// Quitar un part de un ticket, devolviendo la cantidad reservada al
    /// stock y recalculando el total.
    pub async fn remove_part(
        &self,
        ticket_id: Uuid,
        part_id: Uuid,
    ) -> Result<(Vec<TicketPartRow>, Decimal), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        Self::lock_ticket(&mut tx, ticket_id).await?;

        let assignment: Option<(i32,)> = sqlx::query_as(
            "SELECT quantity FROM service_ticket_part WHERE service_ticket_id = $1 AND part_id = $2",
        )
        .bind(ticket_id)
        .bind(part_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        let (quantity,) = assignment.ok_or_else(|| {
            AppError::NotFound(format!(
                "Part '{}' is not on ticket '{}'",
                part_id, ticket_id
            ))
        })?;

        sqlx::query("UPDATE inventory_part SET quantity_on_hand = quantity_on_hand + $2 WHERE id = $1")
            .bind(part_id)
            .bind(quantity)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        sqlx::query(
            "DELETE FROM service_ticket_part WHERE service_ticket_id = $1 AND part_id = $2",
        )
        .bind(ticket_id)
        .bind(part_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        let rows = Self::fetch_parts(&mut tx, ticket_id).await?;
        let total = parts_total(&rows);

        sqlx::query("UPDATE service_ticket SET total_cost = $2 WHERE id = $1")
            .bind(ticket_id)
            .bind(total)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;

        Ok((rows, total))
    }

    /// Parts de un ticket en orden de asignación
    pub async fn list_parts(&self, ticket_id: Uuid) -> Result<Vec<TicketPartRow>, AppError> {
        self.check_ticket_exists(ticket_id).await?;

        let result = sqlx::query_as::<_, TicketPartRow>(
            r#"
            SELECT sp.part_id, p.name, p.price, sp.quantity
            FROM service_ticket_part sp
            JOIN inventory_part p ON p.id = sp.part_id
            WHERE sp.service_ticket_id = $1
            ORDER BY sp.position
            "#,
        )
        .bind(ticket_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result)
    }

    // ============================================
    // Tickets del customer autenticado
    // ============================================

    pub async fn list_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<CustomerTicketRow>, AppError> {
        let result = sqlx::query_as::<_, CustomerTicketRow>(
            r#"
            SELECT st.id, st.vehicle_id, st.description, st.status, st.total_cost,
                   st.date_in, st.date_out, v.make, v.model, v.year
            FROM service_ticket st
            JOIN vehicle v ON v.id = st.vehicle_id
            WHERE v.customer_id = $1
            ORDER BY st.date_in DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result)
    }

    pub async fn mechanic_names(&self, ticket_id: Uuid) -> Result<Vec<String>, AppError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT m.name
            FROM mechanic m
            JOIN service_ticket_mechanic sm ON sm.mechanic_id = m.id
            WHERE sm.service_ticket_id = $1
            ORDER BY sm.position
            "#,
        )
        .bind(ticket_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    // ============================================
    // Helpers internos
    // ============================================

    /// Lock por ticket: serializa las mutaciones concurrentes del mismo
    /// ticket y verifica su existencia.
    async fn lock_ticket(
        tx: &mut Transaction<'_, Postgres>,
        ticket_id: Uuid,
    ) -> Result<(), AppError> {
        let ticket = sqlx::query("SELECT id FROM service_ticket WHERE id = $1 FOR UPDATE")
            .bind(ticket_id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(AppError::Database)?;

        if ticket.is_none() {
            return Err(not_found_error("Service ticket", &ticket_id.to_string()));
        }

        Ok(())
    }

    async fn check_mechanic_exists(
        tx: &mut Transaction<'_, Postgres>,
        mechanic_id: Uuid,
    ) -> Result<(), AppError> {
        let mechanic = sqlx::query("SELECT id FROM mechanic WHERE id = $1")
            .bind(mechanic_id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(AppError::Database)?;

        if mechanic.is_none() {
            return Err(not_found_error("Mechanic", &mechanic_id.to_string()));
        }

        Ok(())
    }

    async fn check_ticket_exists(&self, ticket_id: Uuid) -> Result<(), AppError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM service_ticket WHERE id = $1)")
                .bind(ticket_id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        if !exists.0 {
            return Err(not_found_error("Service ticket", &ticket_id.to_string()));
        }

        Ok(())
    }

    async fn fetch_parts(
        tx: &mut Transaction<'_, Postgres>,
        ticket_id: Uuid,
    ) -> Result<Vec<TicketPartRow>, AppError> {
        let rows = sqlx::query_as::<_, TicketPartRow>(
            r#"
            SELECT sp.part_id, p.name, p.price, sp.quantity
            FROM service_ticket_part sp
            JOIN inventory_part p ON p.id = sp.part_id
            WHERE sp.service_ticket_id = $1
            ORDER BY sp.position
            "#,
        )
        .bind(ticket_id)
        .fetch_all(&mut **tx)
        .await
        .map_err(AppError::Database)?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn part_row(price: &str, quantity: i32) -> TicketPartRow {
        TicketPartRow {
            part_id: Uuid::new_v4(),
            name: "Filter".to_string(),
            price: price.parse().unwrap(),
            quantity,
        }
    }

    #[test]
    fn test_parts_total_single_part() {
        // 2 x 20.00 = 40.00
        let rows = vec![part_row("20.00", 2)];
        assert_eq!(parts_total(&rows), Decimal::new(4000, 2));
    }

    #[test]
    fn test_parts_total_multiple_parts() {
        let rows = vec![part_row("20.00", 2), part_row("9.99", 3), part_row("100.50", 1)];
        assert_eq!(parts_total(&rows), "170.47".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_parts_total_empty() {
        assert_eq!(parts_total(&[]), Decimal::ZERO);
    }
}
