use actix_web::{
    delete, get, post, put, web::{self, Path}, HttpRequest, HttpResponse
};
use chrono::{SecondsFormat, Utc};
use tracing::instrument;

use crate::{
    api::{
        rest::{CandidateRequest, CandidateResponse, MessageResponse, PaginationQuery, PartyRequest, PartyResponse},
        state::AppState,
    },
    model::{
        apperror::ApplicationError,
        models::{CandidateInput, PaginationInput, PartyInput},
    },
};

/**
 * Create a party. The ID and created date are assigned here.
 */
#[instrument(level = "info", skip(http_request, request_body, app_state), fields(service = "addParty", trace_id = get_trace_id(&http_request)))]
#[post("/api/parties")]
pub async fn add_party(http_request: HttpRequest, request_body: web::Json<PartyRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let party = PartyInput::from(request_body.into_inner()).into_party(new_id(), get_timestamp())?;
    let party = app_state.party_service.add_party(party).await?;
    Ok(HttpResponse::Created().json(PartyResponse::from(party)))
}

/**
 * List parties.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "listParties", trace_id = get_trace_id(&http_request)))]
#[get("/api/parties")]
pub async fn list_parties(http_request: HttpRequest, pagination: web::Query<PaginationQuery>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let pagination_input = PaginationInput::from(pagination.into_inner()).validate()?;
    let parties = app_state.party_service.get_party_list(pagination_input).await?;
    Ok(HttpResponse::Ok().json(parties.into_iter().map(PartyResponse::from).collect::<Vec<_>>()))
}

/**
 * Get a single party.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "getParty", trace_id = get_trace_id(&http_request)))]
#[get("/api/parties/{partyId}")]
pub async fn get_party(path: Path<String>, http_request: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let party = app_state.party_service.get_party(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(PartyResponse::from(party)))
}

/**
 * Update a party.
 */
#[instrument(level = "info", skip(http_request, request_body, app_state), fields(service = "updateParty", trace_id = get_trace_id(&http_request)))]
#[put("/api/parties/{partyId}")]
pub async fn update_party(path: Path<String>, http_request: HttpRequest, request_body: web::Json<PartyRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let party = app_state.party_service.update_party(&path.into_inner(), PartyInput::from(request_body.into_inner())).await?;
    Ok(HttpResponse::Ok().json(PartyResponse::from(party)))
}

/**
 * Delete a party. Its candidates become independent.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "deleteParty", trace_id = get_trace_id(&http_request)))]
#[delete("/api/parties/{partyId}")]
pub async fn delete_party(path: Path<String>, http_request: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    app_state.party_service.delete_party(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Party deleted and associated candidates updated.")))
}

/**
 * Create a candidate. The ID and created date are assigned here.
 */
#[instrument(level = "info", skip(http_request, request_body, app_state), fields(service = "addCandidate", trace_id = get_trace_id(&http_request)))]
#[post("/api/candidates")]
pub async fn add_candidate(http_request: HttpRequest, request_body: web::Json<CandidateRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let candidate = CandidateInput::from(request_body.into_inner()).into_candidate(new_id(), get_timestamp())?;
    let candidate = app_state.candidate_service.add_candidate(candidate).await?;
    Ok(HttpResponse::Created().json(CandidateResponse::from(candidate)))
}

/**
 * List candidates.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "listCandidates", trace_id = get_trace_id(&http_request)))]
#[get("/api/candidates")]
pub async fn list_candidates(http_request: HttpRequest, pagination: web::Query<PaginationQuery>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let pagination_input = PaginationInput::from(pagination.into_inner()).validate()?;
    let candidates = app_state.candidate_service.get_candidate_list(pagination_input).await?;
    Ok(HttpResponse::Ok().json(candidates.into_iter().map(CandidateResponse::from).collect::<Vec<_>>()))
}

/**
 * Get a single candidate.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "getCandidate", trace_id = get_trace_id(&http_request)))]
#[get("/api/candidates/{candidateId}")]
pub async fn get_candidate(path: Path<String>, http_request: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let candidate = app_state.candidate_service.get_candidate(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(CandidateResponse::from(candidate)))
}

/**
 * Update a candidate.
 */
#[instrument(level = "info", skip(http_request, request_body, app_state), fields(service = "updateCandidate", trace_id = get_trace_id(&http_request)))]
#[put("/api/candidates/{candidateId}")]
pub async fn update_candidate(path: Path<String>, http_request: HttpRequest, request_body: web::Json<CandidateRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let candidate = app_state.candidate_service.update_candidate(&path.into_inner(), CandidateInput::from(request_body.into_inner())).await?;
    Ok(HttpResponse::Ok().json(CandidateResponse::from(candidate)))
}

/**
 * Delete a candidate.
 */
#[instrument(level = "info", skip(http_request, app_state), fields(service = "deleteCandidate", trace_id = get_trace_id(&http_request)))]
#[delete("/api/candidates/{candidateId}")]
pub async fn delete_candidate(path: Path<String>, http_request: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    app_state.candidate_service.delete_candidate(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Candidate deleted")))
}

/**
 * Registers all party and candidate endpoints.
 */
pub fn configure(config: &mut web::ServiceConfig) {
    config
        .service(add_party)
        .service(list_parties)
        .service(get_party)
        .service(update_party)
        .service(delete_party)
        .service(add_candidate)
        .service(list_candidates)
        .service(get_candidate)
        .service(update_candidate)
        .service(delete_candidate);
}

/**
 * Generates a new entity identifier.
 */
fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/**
 * Current time as RFC 3339 UTC with millisecond precision, e.g. `2024-01-01T12:00:00.000Z`.
 */
fn get_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/**
 * Retrieves the trace ID from the HTTP request headers.
 * If the trace ID is not present, a new UUID is generated.
 */
fn get_trace_id(http_request: &HttpRequest) -> String {
    http_request.headers().get("X-Trace-ID")
        .and_then(|v| v.to_str().ok().map(std::string::ToString::to_string))
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}


#[cfg(feature = "integration-test")]
#[cfg(test)]
mod integration_test {
    use actix_web::{App, http::StatusCode, test::{self, TestRequest}};
    use serde_json::{Value, json};

    use super::*;
    use crate::{
        api::rest::json_config,
        dao::{candidates::CandidateDao, parties::PartyDao, test_support::init_db},
        model::oib::test::make_oib,
        service::{candidates::CandidateService, parties::PartyService},
    };

    #[actix_web::test]
    async fn test_party_and_candidate_lifecycle() {
        let pool = init_db().await;
        let state = web::Data::new(AppState::new(
            CandidateService::new(CandidateDao::new(), Some(pool.clone())),
            PartyService::new(PartyDao::new(), CandidateDao::new(), Some(pool)),
        ));
        let app = test::init_service(App::new().app_data(state).app_data(json_config(1024 * 1024)).configure(configure)).await;

        let request = TestRequest::post()
            .uri("/api/parties")
            .set_json(json!({"name": "  Lifecycle Party  ", "description": "Desc", "dateOfEstablishment": "2023-01-01", "logo": "logo.png"}))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let party: Value = test::read_body_json(response).await;
        assert_eq!(party["name"], "Lifecycle Party");
        let party_id = party["id"].as_str().unwrap().to_string();

        let oib = make_oib(4_000_000_001);
        let request = TestRequest::post()
            .uri("/api/candidates")
            .set_json(json!({"oib": oib, "name": "Member", "description": "Desc", "partyId": party_id}))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let candidate: Value = test::read_body_json(response).await;
        let candidate_id = candidate["id"].as_str().unwrap().to_string();

        let request = TestRequest::post()
            .uri("/api/candidates")
            .set_json(json!({"oib": oib, "name": "Duplicate", "description": "Desc"}))
            .to_request();
        assert_eq!(test::call_service(&app, request).await.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let request = TestRequest::delete().uri(&format!("/api/parties/{party_id}")).to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["message"], "Party deleted and associated candidates updated.");

        let request = TestRequest::get().uri(&format!("/api/candidates/{candidate_id}")).to_request();
        let candidate: Value = test::call_and_read_body_json(&app, request).await;
        assert!(candidate["partyId"].is_null());

        let request = TestRequest::delete().uri(&format!("/api/candidates/{candidate_id}")).to_request();
        assert_eq!(test::call_service(&app, request).await.status(), StatusCode::OK);
        let request = TestRequest::get().uri(&format!("/api/candidates/{candidate_id}")).to_request();
        assert_eq!(test::call_service(&app, request).await.status(), StatusCode::NOT_FOUND);
    }
}
