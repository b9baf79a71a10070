use sqlx::PgConnection;
use tracing::{Instrument, instrument};

use crate::{
    dao::{check_single_row, handle_database_error},
    model::{
        apperror::{ApplicationError, ErrorType},
        db::CandidateDbResp,
        models::{Candidate, PaginationInput},
    },
};

/**
 * SQL query to add a candidate.
 */
const ADD_CANDIDATE: &str = "INSERT INTO candidates (id, oib, name, image, description, party_id, created_date) VALUES ($1, $2, $3, $4, $5, $6, $7)";

/**
 * SQL query to retrieve a candidate.
 */
const QUERY_CANDIDATE: &str = "SELECT id, oib, name, image, description, party_id, created_date FROM candidates WHERE id = $1";

/**
 * SQL query to retrieve and lock a candidate within a transaction.
 */
const QUERY_CANDIDATE_FOR_UPDATE: &str = "SELECT id, oib, name, image, description, party_id, created_date FROM candidates WHERE id = $1 FOR UPDATE";

/**
 * SQL query to retrieve candidates. A NULL limit returns all rows.
 */
const QUERY_CANDIDATE_LIST: &str = "SELECT id, oib, name, image, description, party_id, created_date FROM candidates ORDER BY created_date, id LIMIT $1 OFFSET $2";

/**
 * SQL query to update a candidate. The created date is never changed.
 */
const UPDATE_CANDIDATE: &str = "UPDATE candidates SET oib = $1, name = $2, image = $3, description = $4, party_id = $5 WHERE id = $6";

/**
 * SQL query to delete a candidate.
 */
const DELETE_CANDIDATE: &str = "DELETE FROM candidates WHERE id = $1";

/**
 * SQL query to detach all candidates from a party.
 */
const CLEAR_PARTY: &str = "UPDATE candidates SET party_id = NULL WHERE party_id = $1";

/**
 * DAO for candidate database operations.
 */
pub struct CandidateDao {}

impl CandidateDao {
    /**
     * Creates a new instance of `CandidateDao`.
     */
    pub fn new() -> Self {
        CandidateDao {}
    }

    /**
     * Adds a new candidate.
     *
     * # Arguments
     * `transaction`: The database transaction.
     * `candidate`: The validated candidate.
     *
     * # Returns
     * A result indicating success or failure. A duplicate OIB results in `ConstraintViolation`.
     */
    #[instrument(level = "debug", skip(self, transaction, candidate), fields(id = %candidate.id))]
    pub async fn add_candidate(&self, transaction: &mut PgConnection, candidate: &Candidate) -> Result<(), ApplicationError> {
        let span = tracing::Span::current();
        sqlx::query(ADD_CANDIDATE)
            .bind(&candidate.id)
            .bind(&candidate.oib)
            .bind(&candidate.name)
            .bind(&candidate.image)
            .bind(&candidate.description)
            .bind(&candidate.party_id)
            .bind(&candidate.created_date)
            .execute(transaction)
            .instrument(span)
            .await
            .map_err(|err| handle_database_error(&err, "add candidate"))?;
        Ok(())
    }

    /**
     * Retrieves a candidate by its ID.
     *
     * # Arguments
     * `connection`: The database connection.
     * `candidate_id`: The candidate ID.
     *
     * # Returns
     * The candidate, or a `NotFound` error.
     */
    #[instrument(level = "debug", skip(self, connection))]
    pub async fn get_candidate(&self, connection: &mut PgConnection, candidate_id: &str) -> Result<Candidate, ApplicationError> {
        self.fetch_candidate(connection, QUERY_CANDIDATE, candidate_id).await
    }

    /**
     * Retrieves a candidate by its ID and locks the row until the transaction ends.
     */
    #[instrument(level = "debug", skip(self, transaction))]
    pub async fn get_candidate_for_update(&self, transaction: &mut PgConnection, candidate_id: &str) -> Result<Candidate, ApplicationError> {
        self.fetch_candidate(transaction, QUERY_CANDIDATE_FOR_UPDATE, candidate_id).await
    }

    async fn fetch_candidate(&self, connection: &mut PgConnection, query: &str, candidate_id: &str) -> Result<Candidate, ApplicationError> {
        let span = tracing::Span::current();
        let result: Option<CandidateDbResp> = sqlx::query_as(query)
            .bind(candidate_id)
            .fetch_optional(connection)
            .instrument(span)
            .await
            .map_err(|err| handle_database_error(&err, "get candidate"))?;
        match result {
            Some(row) => Ok(Candidate::from(row)),
            None => {
                tracing::debug!("Candidate with ID {} not found", candidate_id);
                Err(ApplicationError::new(ErrorType::NotFound, "Candidate not found".to_string()))
            }
        }
    }

    /**
     * Retrieves candidates ordered by creation.
     *
     * # Arguments
     * `connection`: The database connection.
     * `pagination_input`: Offset and optional page size.
     */
    #[instrument(level = "debug", skip(self, connection))]
    pub async fn get_candidate_list(&self, connection: &mut PgConnection, pagination_input: PaginationInput) -> Result<Vec<Candidate>, ApplicationError> {
        let span = tracing::Span::current();
        let results: Vec<CandidateDbResp> = sqlx::query_as(QUERY_CANDIDATE_LIST)
            .bind(pagination_input.page_size)
            .bind(pagination_input.start_index)
            .fetch_all(connection)
            .instrument(span)
            .await
            .map_err(|err| handle_database_error(&err, "get candidate list"))?;
        Ok(results.into_iter().map(Candidate::from).collect())
    }

    /**
     * Updates the mutable fields of a candidate.
     *
     * # Arguments
     * `transaction`: The database transaction.
     * `candidate`: The validated candidate carrying the target ID.
     */
    #[instrument(level = "debug", skip(self, transaction, candidate), fields(id = %candidate.id))]
    pub async fn update_candidate(&self, transaction: &mut PgConnection, candidate: &Candidate) -> Result<(), ApplicationError> {
        let span = tracing::Span::current();
        let result = sqlx::query(UPDATE_CANDIDATE)
            .bind(&candidate.oib)
            .bind(&candidate.name)
            .bind(&candidate.image)
            .bind(&candidate.description)
            .bind(&candidate.party_id)
            .bind(&candidate.id)
            .execute(transaction)
            .instrument(span)
            .await
            .map_err(|err| handle_database_error(&err, "update candidate"))?;
        check_single_row(result.rows_affected(), "Candidate", &candidate.id)
    }

    /**
     * Deletes a candidate by its ID.
     */
    #[instrument(level = "debug", skip(self, transaction))]
    pub async fn delete_candidate(&self, transaction: &mut PgConnection, candidate_id: &str) -> Result<(), ApplicationError> {
        let span = tracing::Span::current();
        let result = sqlx::query(DELETE_CANDIDATE)
            .bind(candidate_id)
            .execute(transaction)
            .instrument(span)
            .await
            .map_err(|err| handle_database_error(&err, "delete candidate"))?;
        check_single_row(result.rows_affected(), "Candidate", candidate_id)
    }

    /**
     * Sets the party reference to NULL on every candidate of the party.
     *
     * # Returns
     * Number of candidates detached.
     */
    #[instrument(level = "debug", skip(self, transaction))]
    pub async fn clear_party(&self, transaction: &mut PgConnection, party_id: &str) -> Result<u64, ApplicationError> {
        let span = tracing::Span::current();
        let result = sqlx::query(CLEAR_PARTY)
            .bind(party_id)
            .execute(transaction)
            .instrument(span)
            .await
            .map_err(|err| handle_database_error(&err, "detach candidates from party"))?;
        Ok(result.rows_affected())
    }
}

#[cfg(feature = "integration-test")]
#[cfg(test)]
mod integration_test {
    use super::*;
    use crate::dao::test_support::init_db;
    use crate::model::oib::test::make_oib;

    fn candidate(id: &str, oib: String, party_id: Option<&str>) -> Candidate {
        Candidate::new(
            Some(id.to_string()),
            Some(oib),
            Some("Test Candidate".to_string()),
            None,
            Some("A test candidate".to_string()),
            party_id.map(str::to_string),
            Some("2024-01-01T00:00:00.000Z".to_string()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_add_get_update_delete_candidate() {
        let pool = init_db().await;
        let mut transaction = pool.begin().await.unwrap();
        let dao = CandidateDao::new();
        let mut added = candidate("it-candidate-1", make_oib(1_000_000_001), None);
        dao.add_candidate(&mut transaction, &added).await.unwrap();
        let fetched = dao.get_candidate(&mut transaction, "it-candidate-1").await.unwrap();
        assert_eq!(fetched, added);

        added.name = "Renamed".to_string();
        added.created_date = "ignored".to_string();
        dao.update_candidate(&mut transaction, &added).await.unwrap();
        let fetched = dao.get_candidate_for_update(&mut transaction, "it-candidate-1").await.unwrap();
        assert_eq!(fetched.name, "Renamed");
        assert_eq!(fetched.created_date, "2024-01-01T00:00:00.000Z");

        dao.delete_candidate(&mut transaction, "it-candidate-1").await.unwrap();
        let missing = dao.get_candidate(&mut transaction, "it-candidate-1").await.unwrap_err();
        assert_eq!(missing.error_type, ErrorType::NotFound);
        transaction.rollback().await.unwrap();
    }

    #[tokio::test]
    async fn test_duplicate_oib() {
        let pool = init_db().await;
        let mut transaction = pool.begin().await.unwrap();
        let dao = CandidateDao::new();
        let oib = make_oib(1_000_000_002);
        dao.add_candidate(&mut transaction, &candidate("it-candidate-2", oib.clone(), None)).await.unwrap();
        let duplicate = dao.add_candidate(&mut transaction, &candidate("it-candidate-3", oib, None)).await.unwrap_err();
        assert_eq!(duplicate.error_type, ErrorType::ConstraintViolation);
        transaction.rollback().await.unwrap();
    }

    #[tokio::test]
    async fn test_clear_party() {
        let pool = init_db().await;
        let mut transaction = pool.begin().await.unwrap();
        let dao = CandidateDao::new();
        dao.add_candidate(&mut transaction, &candidate("it-candidate-4", make_oib(1_000_000_004), Some("it-party"))).await.unwrap();
        dao.add_candidate(&mut transaction, &candidate("it-candidate-5", make_oib(1_000_000_005), Some("it-party"))).await.unwrap();
        assert_eq!(dao.clear_party(&mut transaction, "it-party").await.unwrap(), 2);
        let fetched = dao.get_candidate(&mut transaction, "it-candidate-4").await.unwrap();
        assert!(fetched.party_id.is_none());
        transaction.rollback().await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_missing_candidate() {
        let pool = init_db().await;
        let mut transaction = pool.begin().await.unwrap();
        let result = CandidateDao::new().delete_candidate(&mut transaction, "uuid-that-does-not-exist").await;
        assert_eq!(result.unwrap_err().error_type, ErrorType::NotFound);
        transaction.rollback().await.unwrap();
    }
}
