use sqlx::{Pool, Postgres};

use crate::{
    dao::{candidates::CandidateDao, parties::PartyDao},
    model::{
        apperror::ApplicationError,
        models::{PaginationInput, Party, PartyInput},
    },
    service::{acquire, begin, finish},
};

/**
 * Represents the service for managing parties.
 */
pub struct PartyService {
    /**
     * The DAO for party operations.
     */
    party_dao: PartyDao,
    /**
     * The DAO for candidates, used to detach candidates from deleted parties.
     */
    candidate_dao: CandidateDao,
    /**
     * Optional connection pool for database operations. Optional for test purposes until we have a better way to mock the database.
     */
    connection_pool: Option<Pool<Postgres>>,
}

impl PartyService {
    /**
     * Creates a new instance of `PartyService`.
     */
    pub fn new(party_dao: PartyDao, candidate_dao: CandidateDao, connection_pool: Option<Pool<Postgres>>) -> Self {
        PartyService { party_dao, candidate_dao, connection_pool }
    }

    /**
     * Stores a validated party.
     *
     * # Returns
     * The party as stored.
     */
    pub async fn add_party(&self, party: Party) -> Result<Party, ApplicationError> {
        let mut transaction = begin(self.connection_pool.as_ref()).await?;
        let result = async {
            self.party_dao.add_party(&mut transaction, &party).await?;
            self.party_dao.get_party(&mut transaction, &party.id).await
        }
        .await;
        finish(transaction, result).await
    }

    /**
     * Retrieves a party by its ID.
     */
    pub async fn get_party(&self, party_id: &str) -> Result<Party, ApplicationError> {
        let mut connection = acquire(self.connection_pool.as_ref()).await?;
        self.party_dao.get_party(&mut connection, party_id).await
    }

    /**
     * Retrieves parties.
     */
    pub async fn get_party_list(&self, pagination_input: PaginationInput) -> Result<Vec<Party>, ApplicationError> {
        let mut connection = acquire(self.connection_pool.as_ref()).await?;
        self.party_dao.get_party_list(&mut connection, pagination_input).await
    }

    /**
     * Validates and applies an update to an existing party, keeping its ID and created date.
     *
     * # Returns
     * The updated party, `NotFound` if it does not exist, or a `Validation` error.
     */
    pub async fn update_party(&self, party_id: &str, party_input: PartyInput) -> Result<Party, ApplicationError> {
        let mut transaction = begin(self.connection_pool.as_ref()).await?;
        let result = async {
            let existing = self.party_dao.get_party_for_update(&mut transaction, party_id).await?;
            let party = party_input.into_party(existing.id, existing.created_date)?;
            self.party_dao.update_party(&mut transaction, &party).await?;
            self.party_dao.get_party(&mut transaction, &party.id).await
        }
        .await;
        finish(transaction, result).await
    }

    /**
     * Deletes a party after detaching its candidates.
     *
     * Both steps run in one transaction, so a missing party leaves the candidates untouched.
     *
     * # Arguments
     * `party_id`: The party to delete.
     */
    pub async fn delete_party(&self, party_id: &str) -> Result<(), ApplicationError> {
        let mut transaction = begin(self.connection_pool.as_ref()).await?;
        let result = async {
            let detached = self.candidate_dao.clear_party(&mut transaction, party_id).await?;
            self.party_dao.delete_party(&mut transaction, party_id).await?;
            tracing::info!("Deleted party {} and detached {} candidates", party_id, detached);
            Ok::<(), ApplicationError>(())
        }
        .await;
        finish(transaction, result).await
    }
}
