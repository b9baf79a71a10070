use sqlx::{Pool, Postgres};

use crate::{
    dao::candidates::CandidateDao,
    model::{
        apperror::ApplicationError,
        models::{Candidate, CandidateInput, PaginationInput},
    },
    service::{acquire, begin, finish},
};

/**
 * Represents the service for managing candidates.
 */
pub struct CandidateService {
    /**
     * The DAO for candidate operations.
     */
    candidate_dao: CandidateDao,
    /**
     * Optional connection pool for database operations. Optional for test purposes until we have a better way to mock the database.
     */
    connection_pool: Option<Pool<Postgres>>,
}

impl CandidateService {
    /**
     * Creates a new instance of `CandidateService`.
     *
     * # Arguments
     * `candidate_dao`: The DAO for candidate operations.
     * `connection_pool`: Optional connection pool for database operations.
     */
    pub fn new(candidate_dao: CandidateDao, connection_pool: Option<Pool<Postgres>>) -> Self {
        CandidateService { candidate_dao, connection_pool }
    }

    /**
     * Stores a validated candidate.
     *
     * # Arguments
     * `candidate`: The candidate built from the request with a generated ID and created date.
     *
     * # Returns
     * The candidate as stored.
     */
    pub async fn add_candidate(&self, candidate: Candidate) -> Result<Candidate, ApplicationError> {
        let mut transaction = begin(self.connection_pool.as_ref()).await?;
        let result = async {
            self.candidate_dao.add_candidate(&mut transaction, &candidate).await?;
            self.candidate_dao.get_candidate(&mut transaction, &candidate.id).await
        }
        .await;
        finish(transaction, result).await
    }

    /**
     * Retrieves a candidate by its ID.
     */
    pub async fn get_candidate(&self, candidate_id: &str) -> Result<Candidate, ApplicationError> {
        let mut connection = acquire(self.connection_pool.as_ref()).await?;
        self.candidate_dao.get_candidate(&mut connection, candidate_id).await
    }

    /**
     * Retrieves candidates.
     *
     * # Arguments
     * `pagination_input`: Offset and optional page size.
     */
    pub async fn get_candidate_list(&self, pagination_input: PaginationInput) -> Result<Vec<Candidate>, ApplicationError> {
        let mut connection = acquire(self.connection_pool.as_ref()).await?;
        self.candidate_dao.get_candidate_list(&mut connection, pagination_input).await
    }

    /**
     * Validates and applies an update to an existing candidate.
     *
     * The stored ID and created date are kept; only the client supplied fields change.
     *
     * # Arguments
     * `candidate_id`: The candidate to update.
     * `candidate_input`: The new field values.
     *
     * # Returns
     * The updated candidate, `NotFound` if it does not exist, or a `Validation` error.
     */
    pub async fn update_candidate(&self, candidate_id: &str, candidate_input: CandidateInput) -> Result<Candidate, ApplicationError> {
        let mut transaction = begin(self.connection_pool.as_ref()).await?;
        let result = async {
            let existing = self.candidate_dao.get_candidate_for_update(&mut transaction, candidate_id).await?;
            let candidate = candidate_input.into_candidate(existing.id, existing.created_date)?;
            self.candidate_dao.update_candidate(&mut transaction, &candidate).await?;
            self.candidate_dao.get_candidate(&mut transaction, &candidate.id).await
        }
        .await;
        finish(transaction, result).await
    }

    /**
     * Deletes a candidate by its ID.
     */
    pub async fn delete_candidate(&self, candidate_id: &str) -> Result<(), ApplicationError> {
        let mut transaction = begin(self.connection_pool.as_ref()).await?;
        let result = self.candidate_dao.delete_candidate(&mut transaction, candidate_id).await;
        finish(transaction, result).await
    }
}


#[cfg(feature = "integration-test")]
#[cfg(test)]
mod integration_test {
    use super::*;
    use crate::{dao::test_support::init_db, model::{apperror::ErrorType, oib::test::make_oib}};

    #[tokio::test]
    async fn test_update_keeps_created_date() {
        let service = CandidateService::new(CandidateDao::new(), Some(init_db().await));
        let input = CandidateInput { oib: Some(make_oib(2_000_000_001)), name: Some("Ana".to_string()), image: None, description: Some("Desc".to_string()), party_id: None };
        let added = service.add_candidate(input.clone().into_candidate("svc-candidate-1".to_string(), "2024-01-01T00:00:00.000Z".to_string()).unwrap()).await.unwrap();

        let update = CandidateInput { name: Some("  Ana Updated  ".to_string()), ..input };
        let updated = service.update_candidate(&added.id, update).await.unwrap();
        assert_eq!(updated.name, "Ana Updated");
        assert_eq!(updated.created_date, "2024-01-01T00:00:00.000Z");

        let invalid = CandidateInput { oib: Some("12345678901".to_string()), ..CandidateInput::default() };
        assert_eq!(service.update_candidate(&added.id, invalid).await.unwrap_err().error_type, ErrorType::Validation);

        service.delete_candidate(&added.id).await.unwrap();
        assert_eq!(service.get_candidate(&added.id).await.unwrap_err().error_type, ErrorType::NotFound);
    }
}
