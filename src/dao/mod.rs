pub mod candidates;
pub mod parties;

use std::borrow::Cow;

use crate::model::apperror::{ApplicationError, ErrorType};

/**
 * Handles database errors and maps them to application errors.
 *
 * # Arguments
 * `error`: The error returned by sqlx.
 * `operation`: Short description of the failed operation, used when the error is not a database error.
 *
 * # Returns
 * An `ApplicationError` corresponding to the database error.
 */
pub fn handle_database_error(error: &sqlx::Error, operation: &str) -> ApplicationError {
    if let Some(db_error) = error.as_database_error() {
        tracing::debug!("Database error: {}", db_error);
        if db_error.code() == Some(Cow::Borrowed("23505")) {
            // Unique violation
            tracing::info!("Unique constraint {:?} violated", db_error.constraint());
            let constraint = db_error.constraint().unwrap_or("unknown");
            return ApplicationError::new(ErrorType::ConstraintViolation, format!("Unique constraint failed: {constraint}"));
        } else if db_error.code() == Some(Cow::Borrowed("22001")) {
            // Value too long
            return ApplicationError::new(ErrorType::Validation, "Value too long".to_string());
        }
        tracing::error!("Unhandled database error: {}", db_error);
        return ApplicationError::new(ErrorType::DatabaseError, "Unhandled database error".to_string());
    }
    tracing::error!("Failed to {operation}: {error}");
    ApplicationError::new(ErrorType::DatabaseError, format!("Failed to {operation}"))
}

/**
 * Verifies that a single-row update or delete touched exactly one row.
 *
 * # Arguments
 * `rows_affected`: Rows reported by the database.
 * `entity`: Entity name used in messages, e.g. "Candidate".
 * `id`: The identifier that was targeted.
 */
pub fn check_single_row(rows_affected: u64, entity: &str, id: &str) -> Result<(), ApplicationError> {
    if rows_affected == 0 {
        tracing::debug!("{} with ID {} not found", entity, id);
        return Err(ApplicationError::new(ErrorType::NotFound, format!("{entity} not found")));
    }
    if rows_affected > 1 {
        tracing::warn!("Multiple rows of {} attempted changed. Rolled back", entity);
        return Err(ApplicationError::new(ErrorType::Application, format!("Multiple rows of {entity} attempted changed. Rolled back")));
    }
    Ok(())
}

#[cfg(feature = "integration-test")]
#[cfg(test)]
pub mod test_support {
    use sqlx::PgPool;

    /**
     * Initialize the database connection pool and apply the migrations.
     */
    pub async fn init_db() -> PgPool {
        dotenv::from_filename("./.env-test").ok();
        let pool = PgPool::connect(dotenv::var("DATABASE_URL").unwrap().as_str()).await.unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_check_single_row() {
        assert!(check_single_row(1, "Candidate", "a").is_ok());
        let not_found = check_single_row(0, "Candidate", "a").unwrap_err();
        assert_eq!(not_found.error_type, ErrorType::NotFound);
        assert_eq!(not_found.message, "Candidate not found");
        assert_eq!(check_single_row(2, "Party", "a").unwrap_err().error_type, ErrorType::Application);
    }

    #[test]
    fn test_non_database_error() {
        let error = handle_database_error(&sqlx::Error::PoolTimedOut, "get candidate");
        assert_eq!(error.error_type, ErrorType::DatabaseError);
        assert_eq!(error.message, "Failed to get candidate");
    }
}
