//! Repository for the `appointments` table.
//!
//! Every read joins `trainers` so the trainer summary comes back with the
//! appointment. Writes use a data-modifying CTE so the insert/update and the
//! join run as one statement.

use async_trait::async_trait;
use bodyfit_core::appointment::{AppointmentFields, AppointmentOrder, AppointmentSortField};
use bodyfit_core::types::DbId;
use sqlx::PgPool;

use super::AppointmentRepository;
use crate::error::StoreError;
use crate::models::appointment::{Appointment, AppointmentRow};

/// Select list over `a` (appointments) left-joined with `t` (trainers).
const SELECT_COLUMNS: &str = "\
    a.id, a.last_name, a.first_name, a.phone, a.name_of_training_session, \
    a.trainer_id, a.comment, a.status, a.appointment_date, a.date, a.created_at, \
    t.first_name AS trainer_first_name, \
    t.last_name AS trainer_last_name, \
    t.middle_name AS trainer_middle_name";

/// Columns returned by the CTE half of a write.
const RETURNING: &str = "\
    id, last_name, first_name, phone, name_of_training_session, \
    trainer_id, comment, status, appointment_date, date, created_at";

/// Map a sort field onto its column. The match is exhaustive, so no client
/// input ever reaches the SQL text.
///
/// Text columns compare under `COLLATE "C"` (code point order) so the result
/// does not depend on the database locale and agrees with `MemoryStore`.
fn sort_column(field: AppointmentSortField) -> &'static str {
    match field {
        AppointmentSortField::Id => "a.id",
        AppointmentSortField::LastName => r#"a.last_name COLLATE "C""#,
        AppointmentSortField::FirstName => r#"a.first_name COLLATE "C""#,
        AppointmentSortField::Phone => r#"a.phone COLLATE "C""#,
        AppointmentSortField::Date => "a.date",
        AppointmentSortField::AppointmentDate => "a.appointment_date",
        AppointmentSortField::CreatedAt => "a.created_at",
        AppointmentSortField::Status => r#"a.status COLLATE "C""#,
    }
}

fn order_clause(order: AppointmentOrder) -> String {
    format!(
        "ORDER BY {} {} NULLS LAST, a.id ASC",
        sort_column(order.field),
        order.direction.as_sql()
    )
}

/// PostgreSQL-backed [`AppointmentRepository`].
#[derive(Clone)]
pub struct PgAppointmentRepo {
    pool: PgPool,
}

impl PgAppointmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentRepository for PgAppointmentRepo {
    async fn list(&self, order: AppointmentOrder) -> Result<Vec<Appointment>, StoreError> {
        let query = format!(
            "SELECT {SELECT_COLUMNS} \
             FROM appointments a LEFT JOIN trainers t ON t.id = a.trainer_id \
             {}",
            order_clause(order)
        );
        let rows = sqlx::query_as::<_, AppointmentRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Appointment::from).collect())
    }

    async fn list_by_trainer(&self, trainer_id: DbId) -> Result<Vec<Appointment>, StoreError> {
        let query = format!(
            "SELECT {SELECT_COLUMNS} \
             FROM appointments a JOIN trainers t ON t.id = a.trainer_id \
             WHERE a.trainer_id = $1 \
             ORDER BY a.created_at, a.id"
        );
        let rows = sqlx::query_as::<_, AppointmentRow>(&query)
            .bind(trainer_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Appointment::from).collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Appointment>, StoreError> {
        let query = format!(
            "SELECT {SELECT_COLUMNS} \
             FROM appointments a LEFT JOIN trainers t ON t.id = a.trainer_id \
             WHERE a.id = $1"
        );
        let row = sqlx::query_as::<_, AppointmentRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Appointment::from))
    }

    async fn create(&self, input: &AppointmentFields) -> Result<Appointment, StoreError> {
        let query = format!(
            "WITH a AS ( \
                 INSERT INTO appointments \
                     (last_name, first_name, phone, name_of_training_session, \
                      trainer_id, comment, status, appointment_date) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
                 RETURNING {RETURNING} \
             ) \
             SELECT {SELECT_COLUMNS} FROM a LEFT JOIN trainers t ON t.id = a.trainer_id"
        );
        let row = sqlx::query_as::<_, AppointmentRow>(&query)
            .bind(&input.last_name)
            .bind(&input.first_name)
            .bind(&input.phone)
            .bind(&input.name_of_training_session)
            .bind(input.trainer_id)
            .bind(&input.comment)
            .bind(input.status.as_str())
            .bind(input.appointment_date)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn update(
        &self,
        id: DbId,
        input: &AppointmentFields,
    ) -> Result<Option<Appointment>, StoreError> {
        let query = format!(
            "WITH a AS ( \
                 UPDATE appointments SET \
                     last_name = $2, \
                     first_name = $3, \
                     phone = $4, \
                     name_of_training_session = $5, \
                     trainer_id = $6, \
                     comment = $7, \
                     status = $8, \
                     appointment_date = $9 \
                 WHERE id = $1 \
                 RETURNING {RETURNING} \
             ) \
             SELECT {SELECT_COLUMNS} FROM a LEFT JOIN trainers t ON t.id = a.trainer_id"
        );
        let row = sqlx::query_as::<_, AppointmentRow>(&query)
            .bind(id)
            .bind(&input.last_name)
            .bind(&input.first_name)
            .bind(&input.phone)
            .bind(&input.name_of_training_session)
            .bind(input.trainer_id)
            .bind(&input.comment)
            .bind(input.status.as_str())
            .bind(input.appointment_date)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Appointment::from))
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
