use crate::model::models::{Candidate, Party};

/**
 * Database response type for candidate queries.
 * Columns: id, oib, name, image, description, party_id, created_date.
 */
pub type CandidateDbResp = (String, String, String, Option<String>, String, Option<String>, String);

/**
 * Database response type for party queries.
 * Columns: id, name, description, date_of_establishment, logo, created_date.
 */
pub type PartyDbResp = (String, String, String, String, String, String);

/**
 * Rows are written only after validation, so they are mapped without re-validating.
 */
impl From<CandidateDbResp> for Candidate {
    fn from(row: CandidateDbResp) -> Self {
        let (id, oib, name, image, description, party_id, created_date) = row;
        Candidate { id, oib, name, image, description, party_id, created_date }
    }
}

impl From<PartyDbResp> for Party {
    fn from(row: PartyDbResp) -> Self {
        let (id, name, description, date_of_establishment, logo, created_date) = row;
        Party { id, name, description, date_of_establishment, logo, created_date }
    }
}
