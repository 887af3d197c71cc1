use bodyfit_core::types::DbId;

/// Failure reported by a repository.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An appointment was written with a trainer reference that does not
    /// resolve (the trainer vanished between the existence check and the
    /// write).
    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl StoreError {
    pub(crate) fn missing_trainer(trainer_id: DbId) -> Self {
        StoreError::ForeignKey(format!("trainer {trainer_id} does not exist"))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // PostgreSQL foreign key violation: error code 23503
            if db_err.code().as_deref() == Some("23503") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                return StoreError::ForeignKey(format!("constraint {constraint}"));
            }
        }
        StoreError::Database(err)
    }
}
