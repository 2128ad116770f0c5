use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::services::form::FormError;

/// A canonical or display date string that does not describe a calendar day.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date '{input}': expected {expected}")]
pub struct FormatError {
    pub input: String,
    pub expected: &'static str,
}

/// Loading the blocked-dates map failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("HTTP error, status {0}")]
    Status(u16),

    #[error("malformed blocked dates: {0}")]
    Malformed(String),
}

pub const SUBMISSION_FALLBACK_MESSAGE: &str =
    "Beim Senden der Reservierung ist ein Problem aufgetreten. Bitte versuchen Sie es später erneut.";

/// Sending a reservation failed or was refused by the reservation service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("response is not valid JSON (status {status})")]
    InvalidResponse { status: u16 },

    #[error("reservation rejected (status {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { status: u16, message: Option<String> },
}

impl SubmissionError {
    /// Text for the error banner: the server's own message when it sent one.
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => SUBMISSION_FALLBACK_MESSAGE.to_string(),
        }
    }
}

/// Form input rejected locally, before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Ab {limit} Personen bitte telefonisch reservieren: {phone}")]
    PartyTooLarge { limit: u32, phone: String },

    #[error("Ungültige Anzahl Personen: {0}")]
    InvalidPartySize(String),

    #[error("Bitte wählen Sie ein Datum")]
    NoDateSelected,

    #[error("Die Uhrzeit {0} ist an diesem Datum nicht verfügbar")]
    UnavailableTime(String),

    #[error("Pflichtfeld fehlt: {0}")]
    MissingField(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Form(#[from] FormError),
}

impl From<FormatError> for AppError {
    fn from(e: FormatError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Form(FormError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Form(FormError::InvalidTransition { .. }) => StatusCode::CONFLICT,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
