use sqlx::PgConnection;
use tracing::{Instrument, instrument};

use crate::{
    dao::{check_single_row, handle_database_error},
    model::{
        apperror::{ApplicationError, ErrorType},
        db::PartyDbResp,
        models::{PaginationInput, Party},
    },
};

/**
 * SQL query to add a party.
 */
const ADD_PARTY: &str = "INSERT INTO parties (id, name, description, date_of_establishment, logo, created_date) VALUES ($1, $2, $3, $4, $5, $6)";

/**
 * SQL query to retrieve a party.
 */
const QUERY_PARTY: &str = "SELECT id, name, description, date_of_establishment, logo, created_date FROM parties WHERE id = $1";

/**
 * SQL query to retrieve and lock a party within a transaction.
 */
const QUERY_PARTY_FOR_UPDATE: &str = "SELECT id, name, description, date_of_establishment, logo, created_date FROM parties WHERE id = $1 FOR UPDATE";

/**
 * SQL query to retrieve parties. A NULL limit returns all rows.
 */
const QUERY_PARTY_LIST: &str = "SELECT id, name, description, date_of_establishment, logo, created_date FROM parties ORDER BY created_date, id LIMIT $1 OFFSET $2";

/**
 * SQL query to update a party. The created date is never changed.
 */
const UPDATE_PARTY: &str = "UPDATE parties SET name = $1, description = $2, date_of_establishment = $3, logo = $4 WHERE id = $5";

/**
 * SQL query to delete a party.
 */
const DELETE_PARTY: &str = "DELETE FROM parties WHERE id = $1";

/**
 * DAO for party database operations.
 */
pub struct PartyDao {}

impl PartyDao {
    /**
     * Creates a new instance of `PartyDao`.
     */
    pub fn new() -> Self {
        PartyDao {}
    }

    /**
     * Adds a new party.
     *
     * # Arguments
     * `transaction`: The database transaction.
     * `party`: The validated party.
     */
    #[instrument(level = "debug", skip(self, transaction, party), fields(id = %party.id))]
    pub async fn add_party(&self, transaction: &mut PgConnection, party: &Party) -> Result<(), ApplicationError> {
        let span = tracing::Span::current();
        sqlx::query(ADD_PARTY)
            .bind(&party.id)
            .bind(&party.name)
            .bind(&party.description)
            .bind(&party.date_of_establishment)
            .bind(&party.logo)
            .bind(&party.created_date)
            .execute(transaction)
            .instrument(span)
            .await
            .map_err(|err| handle_database_error(&err, "add party"))?;
        Ok(())
    }

    /**
     * Retrieves a party by its ID.
     *
     * # Returns
     * The party, or a `NotFound` error.
     */
    #[instrument(level = "debug", skip(self, connection))]
    pub async fn get_party(&self, connection: &mut PgConnection, party_id: &str) -> Result<Party, ApplicationError> {
        self.fetch_party(connection, QUERY_PARTY, party_id).await
    }

    /**
     * Retrieves a party by its ID and locks the row until the transaction ends.
     */
    #[instrument(level = "debug", skip(self, transaction))]
    pub async fn get_party_for_update(&self, transaction: &mut PgConnection, party_id: &str) -> Result<Party, ApplicationError> {
        self.fetch_party(transaction, QUERY_PARTY_FOR_UPDATE, party_id).await
    }

    async fn fetch_party(&self, connection: &mut PgConnection, query: &str, party_id: &str) -> Result<Party, ApplicationError> {
        let span = tracing::Span::current();
        let result: Option<PartyDbResp> = sqlx::query_as(query)
            .bind(party_id)
            .fetch_optional(connection)
            .instrument(span)
            .await
            .map_err(|err| handle_database_error(&err, "get party"))?;
        match result {
            Some(row) => Ok(Party::from(row)),
            None => {
                tracing::debug!("Party with ID {} not found", party_id);
                Err(ApplicationError::new(ErrorType::NotFound, "Party not found".to_string()))
            }
        }
    }

    /**
     * Retrieves parties ordered by creation.
     */
    #[instrument(level = "debug", skip(self, connection))]
    pub async fn get_party_list(&self, connection: &mut PgConnection, pagination_input: PaginationInput) -> Result<Vec<Party>, ApplicationError> {
        let span = tracing::Span::current();
        let results: Vec<PartyDbResp> = sqlx::query_as(QUERY_PARTY_LIST)
            .bind(pagination_input.page_size)
            .bind(pagination_input.start_index)
            .fetch_all(connection)
            .instrument(span)
            .await
            .map_err(|err| handle_database_error(&err, "get party list"))?;
        Ok(results.into_iter().map(Party::from).collect())
    }

    /**
     * Updates the mutable fields of a party.
     */
    #[instrument(level = "debug", skip(self, transaction, party), fields(id = %party.id))]
    pub async fn update_party(&self, transaction: &mut PgConnection, party: &Party) -> Result<(), ApplicationError> {
        let span = tracing::Span::current();
        let result = sqlx::query(UPDATE_PARTY)
            .bind(&party.name)
            .bind(&party.description)
            .bind(&party.date_of_establishment)
            .bind(&party.logo)
            .bind(&party.id)
            .execute(transaction)
            .instrument(span)
            .await
            .map_err(|err| handle_database_error(&err, "update party"))?;
        check_single_row(result.rows_affected(), "Party", &party.id)
    }

    /**
     * Deletes a party by its ID. Candidates are not touched here.
     */
    #[instrument(level = "debug", skip(self, transaction))]
    pub async fn delete_party(&self, transaction: &mut PgConnection, party_id: &str) -> Result<(), ApplicationError> {
        let span = tracing::Span::current();
        let result = sqlx::query(DELETE_PARTY)
            .bind(party_id)
            .execute(transaction)
            .instrument(span)
            .await
            .map_err(|err| handle_database_error(&err, "delete party"))?;
        check_single_row(result.rows_affected(), "Party", party_id)
    }
}
