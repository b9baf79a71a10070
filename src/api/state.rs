use crate::service::{candidates::CandidateService, parties::PartyService};

/**
* Represents the application state shared across the Actix web application.
*/
pub struct AppState {
    /**
     * The candidate service for handling candidate operations.
     */
    pub candidate_service: CandidateService,
    /**
     * The party service for handling party operations.
     */
    pub party_service: PartyService,
}

impl AppState {
    /**
     * Creates a new instance of `AppState`.
     *
     * # Arguments
     * `candidate_service`: The candidate service.
     * `party_service`: The party service.
     */
    pub fn new(candidate_service: CandidateService, party_service: PartyService) -> Self {
        AppState { candidate_service, party_service }
    }
}
