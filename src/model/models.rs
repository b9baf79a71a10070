use crate::model::{
    apperror::{ApplicationError, ErrorType},
    oib::validate_oib,
    validation::{Field, ValidationError, check_max_length, require, require_trimmed, trim_text},
};

/**
 * Maximum number of characters in a party name.
 */
pub const PARTY_NAME_MAX_LENGTH: usize = 255;

/**
 * A candidate, optionally belonging to a party.
 *
 * Only obtainable through `Candidate::new`, so every instance satisfies the field invariants.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: String,
    pub oib: String,
    pub name: String,
    pub image: Option<String>,
    pub description: String,
    pub party_id: Option<String>,
    pub created_date: String,
}

impl Candidate {
    /**
     * Validates the fields and builds a candidate.
     *
     * Checks run in the order id, oib, name, description, created date and the first failure is returned.
     *
     * # Arguments
     * `id`: Unique identifier.
     * `oib`: Personal identification number, trimmed before checksum validation.
     * `name`: Name, trimmed.
     * `image`: Optional image reference, stored as is.
     * `description`: Description, trimmed.
     * `party_id`: Optional party reference, stored as is.
     * `created_date`: Creation timestamp.
     *
     * # Returns
     * The candidate or the first `ValidationError`.
     */
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Option<String>,
        oib: Option<String>,
        name: Option<String>,
        image: Option<String>,
        description: Option<String>,
        party_id: Option<String>,
        created_date: Option<String>,
    ) -> Result<Self, ValidationError> {
        let id = require(id, Field::Id)?;
        let oib = trim_text(&require(oib, Field::Oib)?).to_string();
        validate_oib(&oib)?;
        let name = require_trimmed(name, Field::Name)?;
        let description = require_trimmed(description, Field::Description)?;
        let created_date = require(created_date, Field::CreatedDate)?;
        Ok(Candidate { id, oib, name, image, description, party_id, created_date })
    }
}

/**
 * A political party.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Party {
    pub id: String,
    pub name: String,
    pub description: String,
    pub date_of_establishment: String,
    pub logo: String,
    pub created_date: String,
}

impl Party {
    /**
     * Validates the fields and builds a party.
     *
     * The date of establishment is only checked for presence.
     *
     * # Arguments
     * `id`: Unique identifier.
     * `name`: Name, trimmed, at most 255 characters.
     * `description`: Description, trimmed.
     * `date_of_establishment`: Free text date.
     * `logo`: Logo reference.
     * `created_date`: Creation timestamp.
     *
     * # Returns
     * The party or the first `ValidationError`.
     */
    pub fn new(
        id: Option<String>,
        name: Option<String>,
        description: Option<String>,
        date_of_establishment: Option<String>,
        logo: Option<String>,
        created_date: Option<String>,
    ) -> Result<Self, ValidationError> {
        let id = require(id, Field::Id)?;
        let name = require_trimmed(name, Field::Name)?;
        check_max_length(&name, Field::Name, PARTY_NAME_MAX_LENGTH)?;
        let description = require_trimmed(description, Field::Description)?;
        let date_of_establishment = require(date_of_establishment, Field::DateOfEstablishment)?;
        let logo = require(logo, Field::Logo)?;
        let created_date = require(created_date, Field::CreatedDate)?;
        Ok(Party { id, name, description, date_of_establishment, logo, created_date })
    }
}

/**
 * Unvalidated candidate fields as received from a client.
 */
#[derive(Debug, Clone, Default)]
pub struct CandidateInput {
    pub oib: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub party_id: Option<String>,
}

impl CandidateInput {
    /**
     * Builds a candidate from the input and the server-assigned identity.
     *
     * # Arguments
     * `id`: Identifier, generated on create or taken from the stored row on update.
     * `created_date`: Creation timestamp, generated on create or taken from the stored row on update.
     */
    pub fn into_candidate(self, id: String, created_date: String) -> Result<Candidate, ValidationError> {
        Candidate::new(Some(id), self.oib, self.name, self.image, self.description, self.party_id, Some(created_date))
    }
}

/**
 * Unvalidated party fields as received from a client.
 */
#[derive(Debug, Clone, Default)]
pub struct PartyInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date_of_establishment: Option<String>,
    pub logo: Option<String>,
}

impl PartyInput {
    /**
     * Builds a party from the input and the server-assigned identity.
     */
    pub fn into_party(self, id: String, created_date: String) -> Result<Party, ValidationError> {
        Party::new(Some(id), self.name, self.description, self.date_of_establishment, self.logo, Some(created_date))
    }
}

/**
 * Pagination input for list operations. No page size means no limit.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationInput {
    pub start_index: i64,
    pub page_size: Option<i64>,
}

impl PaginationInput {
    /**
     * Validates the pagination input.
     *
     * # Returns
     * The input, or an `ApplicationError` of type `Validation` for a negative start index or a non-positive page size.
     */
    pub fn validate(self) -> Result<Self, ApplicationError> {
        if self.start_index < 0 {
            return Err(ApplicationError::new(ErrorType::Validation, "Start index cannot be negative".to_string()));
        }
        if self.page_size.is_some_and(|page_size| page_size <= 0) {
            return Err(ApplicationError::new(ErrorType::Validation, "Page size must be positive".to_string()));
        }
        Ok(self)
    }
}
