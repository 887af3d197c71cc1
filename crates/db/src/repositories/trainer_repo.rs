//! Repository for the `trainers` table.

use async_trait::async_trait;
use bodyfit_core::trainer::TrainerFields;
use bodyfit_core::types::DbId;
use sqlx::PgPool;

use super::TrainerRepository;
use crate::error::StoreError;
use crate::models::trainer::Trainer;

/// Column list for `trainers` queries.
const COLUMNS: &str = "\
    id, last_name, first_name, middle_name, name_of_training_session, \
    phone, email, specialization, experience_years, created_at";

/// PostgreSQL-backed [`TrainerRepository`].
#[derive(Clone)]
pub struct PgTrainerRepo {
    pool: PgPool,
}

impl PgTrainerRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrainerRepository for PgTrainerRepo {
    async fn list(&self) -> Result<Vec<Trainer>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM trainers ORDER BY id");
        let rows = sqlx::query_as::<_, Trainer>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Trainer>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM trainers WHERE id = $1");
        let row = sqlx::query_as::<_, Trainer>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn exists(&self, id: DbId) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM trainers WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn create(&self, input: &TrainerFields) -> Result<Trainer, StoreError> {
        let query = format!(
            "INSERT INTO trainers \
                 (last_name, first_name, middle_name, name_of_training_session, \
                  phone, email, specialization, experience_years) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Trainer>(&query)
            .bind(&input.last_name)
            .bind(&input.first_name)
            .bind(&input.middle_name)
            .bind(&input.name_of_training_session)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.specialization)
            .bind(input.experience_years)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: DbId, input: &TrainerFields) -> Result<Option<Trainer>, StoreError> {
        let query = format!(
            "UPDATE trainers SET \
                 last_name = $2, \
                 first_name = $3, \
                 middle_name = $4, \
                 name_of_training_session = $5, \
                 phone = $6, \
                 email = $7, \
                 specialization = $8, \
                 experience_years = $9 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Trainer>(&query)
            .bind(id)
            .bind(&input.last_name)
            .bind(&input.first_name)
            .bind(&input.middle_name)
            .bind(&input.name_of_training_session)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.specialization)
            .bind(input.experience_years)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// `appointments.trainer_id` is `ON DELETE SET NULL`, so this never
    /// touches appointment rows beyond clearing their reference.
    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM trainers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
