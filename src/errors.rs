use actix_web::{
    error,
    http::StatusCode,
    HttpResponse,
};
use derive_more::{Display, Error};

#[derive(Debug, Display, Error, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum ApiError {
    #[display(fmt = "event not found")]
    EventNotFound,

    #[display(fmt = "event is cancelled")]
    EventCancelled,

    #[display(fmt = "rsvp not found")]
    RsvpNotFound,

    #[display(fmt = "no usable identity supplied")]
    InvalidIdentity,

    // Internal retry signal for a lost snapshot/commit race; the ledger
    // re-runs the critical section, so callers never see this variant.
    #[display(fmt = "concurrent update lost")]
    CapacityRaceLost,
}

impl error::ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            ApiError::EventNotFound => StatusCode::NOT_FOUND,
            ApiError::EventCancelled => StatusCode::CONFLICT,
            ApiError::RsvpNotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidIdentity => StatusCode::BAD_REQUEST,
            ApiError::CapacityRaceLost => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
