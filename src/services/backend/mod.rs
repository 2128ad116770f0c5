pub mod http;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::errors::{FetchError, SubmissionError};
use crate::models::{BlockedDateMap, ReservationDetails, ReservationRequest};

/// The remote reservation service: blocked slots in, bookings out.
#[async_trait]
pub trait ReservationBackend: Send + Sync {
    async fn fetch_blocked_dates(&self) -> Result<BlockedDateMap, FetchError>;

    async fn submit(
        &self,
        request: &ReservationRequest,
    ) -> Result<ReservationDetails, SubmissionError>;
}

/// Decides the outcome of a blocked-dates response.
pub fn interpret_blocked_dates(
    status: StatusCode,
    body: &str,
) -> Result<BlockedDateMap, FetchError> {
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }
    BlockedDateMap::from_json(body)
}

/// Decides the outcome of a submission response.
///
/// The body has to be JSON in every case so the server's message can be
/// read; success needs both a 2xx status and `"success": true`.
pub fn interpret_submission(
    status: StatusCode,
    body: &str,
    request: &ReservationRequest,
) -> Result<ReservationDetails, SubmissionError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|_| SubmissionError::InvalidResponse {
            status: status.as_u16(),
        })?;

    let success = value.get("success").and_then(|v| v.as_bool()) == Some(true);
    if status.is_success() && success {
        return Ok(request.details());
    }

    Err(SubmissionError::Rejected {
        status: status.as_u16(),
        message: value
            .get("message")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()),
    })
}
