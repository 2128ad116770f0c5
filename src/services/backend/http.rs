use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::Form;

use super::{interpret_blocked_dates, interpret_submission, ReservationBackend};
use crate::errors::{FetchError, SubmissionError};
use crate::models::{BlockedDateMap, ReservationDetails, ReservationRequest};

pub struct HttpReservationBackend {
    blocked_dates_url: String,
    reservation_url: String,
    client: reqwest::Client,
}

impl HttpReservationBackend {
    pub fn new(
        blocked_dates_url: String,
        reservation_url: String,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, blocked_dates_url, reservation_url))
    }

    pub fn with_client(
        client: reqwest::Client,
        blocked_dates_url: String,
        reservation_url: String,
    ) -> Self {
        Self {
            blocked_dates_url,
            reservation_url,
            client,
        }
    }
}

#[async_trait]
impl ReservationBackend for HttpReservationBackend {
    async fn fetch_blocked_dates(&self) -> Result<BlockedDateMap, FetchError> {
        tracing::debug!(url = %self.blocked_dates_url, "fetching blocked dates");

        let resp = self
            .client
            .get(&self.blocked_dates_url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        tracing::debug!(%status, bytes = body.len(), "blocked dates response");

        interpret_blocked_dates(status, &body)
    }

    async fn submit(
        &self,
        request: &ReservationRequest,
    ) -> Result<ReservationDetails, SubmissionError> {
        let form = request
            .form_fields()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value));

        let resp = self
            .client
            .post(&self.reservation_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;
        tracing::debug!(%status, body = %body, "reservation response");

        interpret_submission(status, &body, request)
    }
}
