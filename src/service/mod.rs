pub mod candidates;
pub mod parties;

use sqlx::{Pool, Postgres, Transaction, pool::PoolConnection};

use crate::model::apperror::{ApplicationError, ErrorType};

/**
 * Returns the pool or an error when the service was built without one.
 */
fn require_pool(connection_pool: Option<&Pool<Postgres>>) -> Result<&Pool<Postgres>, ApplicationError> {
    connection_pool.ok_or_else(|| ApplicationError::new(ErrorType::DatabaseError, "No database connection available".to_string()))
}

/**
 * Acquires a pooled connection for read operations.
 */
async fn acquire(connection_pool: Option<&Pool<Postgres>>) -> Result<PoolConnection<Postgres>, ApplicationError> {
    require_pool(connection_pool)?.acquire().await.map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to acquire connection: {err}")))
}

/**
 * Begins a transaction for write operations.
 */
async fn begin(connection_pool: Option<&Pool<Postgres>>) -> Result<Transaction<'static, Postgres>, ApplicationError> {
    require_pool(connection_pool)?.begin().await.map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to begin transaction: {err}")))
}

/**
 * Commits the transaction if the work succeeded, otherwise rolls it back and returns the original error.
 */
async fn finish<T>(transaction: Transaction<'static, Postgres>, result: Result<T, ApplicationError>) -> Result<T, ApplicationError> {
    match result {
        Ok(value) => {
            transaction.commit().await.map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to commit transaction: {err}")))?;
            Ok(value)
        }
        Err(err) => {
            transaction.rollback().await.map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to rollback transaction: {err}")))?;
            Err(err)
        }
    }
}
