use actix_web::{HttpResponse, ResponseError, http::StatusCode, web};
use serde::{Deserialize, Serialize};

use crate::model::{
    apperror::{ApplicationError, ErrorType},
    models::{Candidate, CandidateInput, PaginationInput, Party, PartyInput},
};

/***************** Candidate models *********************/

/**
 * Request body for creating or updating a candidate.
 *
 * Every field is optional here so that missing values are reported by entity validation.
 */
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRequest {
    pub oib: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub party_id: Option<String>,
}

impl From<CandidateRequest> for CandidateInput {
    fn from(request: CandidateRequest) -> Self {
        CandidateInput { oib: request.oib, name: request.name, image: request.image, description: request.description, party_id: request.party_id }
    }
}

/**
 * A candidate as returned by the API.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResponse {
    id: String,
    oib: String,
    name: String,
    image: Option<String>,
    description: String,
    /**
     * `null` for independent candidates.
     */
    party_id: Option<String>,
    created_date: String,
}

impl From<Candidate> for CandidateResponse {
    fn from(candidate: Candidate) -> Self {
        CandidateResponse {
            id: candidate.id,
            oib: candidate.oib,
            name: candidate.name,
            image: candidate.image,
            description: candidate.description,
            party_id: candidate.party_id,
            created_date: candidate.created_date,
        }
    }
}

/***************** Party models *********************/

/**
 * Request body for creating or updating a party.
 */
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date_of_establishment: Option<String>,
    pub logo: Option<String>,
}

impl From<PartyRequest> for PartyInput {
    fn from(request: PartyRequest) -> Self {
        PartyInput { name: request.name, description: request.description, date_of_establishment: request.date_of_establishment, logo: request.logo }
    }
}

/**
 * A party as returned by the API.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyResponse {
    id: String,
    name: String,
    description: String,
    date_of_establishment: String,
    logo: String,
    created_date: String,
}

impl From<Party> for PartyResponse {
    fn from(party: Party) -> Self {
        PartyResponse {
            id: party.id,
            name: party.name,
            description: party.description,
            date_of_establishment: party.date_of_establishment,
            logo: party.logo,
            created_date: party.created_date,
        }
    }
}

/**
 * Plain confirmation message, used by delete endpoints.
 */
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        MessageResponse { message: message.to_string() }
    }
}

/***************** Error models *********************/

/**
 * Custom error response for the application.
 */
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /**
     * The error code associated with the error type.
     */
    pub code: u16,
    /**
     * A human-readable message describing the error.
     */
    pub message: String,
}

impl ResponseError for ApplicationError {
    fn status_code(&self) -> StatusCode {
        get_statuscode(&self.error_type)
    }

    /**
     * Generates an error response for the application error.
     */
    fn error_response(&self) -> HttpResponse {
        let error_response = ErrorResponse { code: get_error_code(&self.error_type), message: self.message.clone() };
        HttpResponse::build(self.status_code()).json(&error_response)
    }
}

/**
* Maps application errors to HTTP status codes.
*
* Unique constraint violations are reported as server errors, as are all storage failures.
*
* # Arguments
* `application_error`: The type of error that occurred.
*
* # Returns
* The corresponding HTTP status code.
*/
fn get_statuscode(application_error: &ErrorType) -> StatusCode {
    match application_error {
        ErrorType::Validation => StatusCode::BAD_REQUEST,
        ErrorType::NotFound => StatusCode::NOT_FOUND,
        ErrorType::Initialization | ErrorType::ConstraintViolation | ErrorType::DatabaseError | ErrorType::Application => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/**
 * Maps application errors to error codes.
 *
 * # Arguments
 * `application_error`: The type of error that occurred.
 *
 * # Returns
 * The corresponding error code.
 */
fn get_error_code(application_error: &ErrorType) -> u16 {
    match application_error {
        ErrorType::Initialization => 1001,
        ErrorType::Validation => 1002,
        ErrorType::DatabaseError => 1003,
        ErrorType::NotFound => 1004,
        ErrorType::ConstraintViolation => 1005,
        ErrorType::Application => 1006,
    }
}

/**
 * JSON extractor configuration. Malformed bodies are reported as validation errors.
 *
 * # Arguments
 * `limit`: Maximum body size in bytes.
 */
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default().limit(limit).error_handler(|err, _request| ApplicationError::new(ErrorType::Validation, format!("Invalid request body: {err}")).into())
}

/**
 * Query string extractor configuration. Unparseable parameters are reported as validation errors.
 */
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _request| ApplicationError::new(ErrorType::Validation, format!("Invalid query parameters: {err}")).into())
}

/***************** Common models *********************/

/**
 * Pagination query parameters for list requests.
 */
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationQuery {
    /**
     * The index of the first item to return.
     */
    pub start_index: Option<i64>,
    /**
     * The size of the page to return. All items when absent.
     */
    pub page_size: Option<i64>,
}

impl From<PaginationQuery> for PaginationInput {
    fn from(query: PaginationQuery) -> Self {
        PaginationInput { start_index: query.start_index.unwrap_or(0), page_size: query.page_size }
    }
}
