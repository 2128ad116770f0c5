//! State machine behind one reservation form.
//!
//! Network work is split into `begin_*` / `finish_*` pairs so the owner can
//! release its lock while the request is in flight. Each `begin_*` hands out
//! a [`Ticket`]; a result is applied only if its ticket is still current,
//! which is what lets [`FormController::teardown`] discard late responses.

use chrono::NaiveDate;

use crate::errors::{FetchError, SubmissionError, ValidationError};
use crate::models::{
    BlockedDateMap, FormPhase, FormState, ReservationDetails, ReservationDraft,
    ReservationRequest,
};
use crate::services::availability::{available_times, selectable_dates};
use crate::services::backend::ReservationBackend;

/// Larger parties have to phone the restaurant.
pub const MAX_PARTY_SIZE: u32 = 14;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("cannot {action} while the form is {}", .phase.as_str())]
    InvalidTransition {
        action: &'static str,
        phase: FormPhase,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

/// A submission that passed local validation and may now be sent.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub ticket: Ticket,
    pub request: ReservationRequest,
}

#[derive(Debug, Clone)]
enum Phase {
    Loading,
    Error,
    Ready,
    Submitting,
    Confirmed(ReservationDetails),
}

#[derive(Debug)]
pub struct FormController {
    phase: Phase,
    error: Option<String>,
    blocked: BlockedDateMap,
    selected_date: Option<NaiveDate>,
    available_times: Vec<String>,
    draft: ReservationDraft,
    restaurant_phone: String,
    load_started: bool,
    generation: u64,
    torn_down: bool,
}

impl FormController {
    pub fn new(restaurant_phone: impl Into<String>) -> Self {
        Self {
            phase: Phase::Loading,
            error: None,
            blocked: BlockedDateMap::default(),
            selected_date: None,
            available_times: Vec::new(),
            draft: ReservationDraft::default(),
            restaurant_phone: restaurant_phone.into(),
            load_started: false,
            generation: 0,
            torn_down: false,
        }
    }

    pub fn phase(&self) -> FormPhase {
        match self.phase {
            Phase::Loading => FormPhase::Loading,
            Phase::Error => FormPhase::Error,
            Phase::Ready => FormPhase::Ready,
            Phase::Submitting => FormPhase::Submitting,
            Phase::Confirmed(_) => FormPhase::Confirmed,
        }
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn blocked_dates(&self) -> &BlockedDateMap {
        &self.blocked
    }

    /// Starts the one blocked-dates fetch this form is allowed.
    pub fn begin_load(&mut self) -> Result<Ticket, FormError> {
        if self.load_started || !matches!(self.phase, Phase::Loading) {
            return Err(self.invalid("load blocked dates"));
        }
        self.load_started = true;
        Ok(self.next_ticket())
    }

    /// Applies the fetch result. Returns `false` if the result was stale.
    pub fn finish_load(
        &mut self,
        ticket: Ticket,
        result: Result<BlockedDateMap, FetchError>,
    ) -> bool {
        if !self.is_current(ticket) || !matches!(self.phase, Phase::Loading) {
            tracing::debug!("discarding stale blocked dates result");
            return false;
        }

        match result {
            Ok(blocked) => {
                tracing::info!(dates = blocked.len(), "blocked dates loaded");
                self.blocked = blocked;
                self.phase = Phase::Ready;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load blocked dates");
                self.error = Some(format!(
                    "Die Reservierungsdaten konnten nicht geladen werden: {e}"
                ));
                self.phase = Phase::Error;
            }
        }
        true
    }

    /// Picks (or clears) the date and replaces the available times.
    pub fn select_date(&mut self, date: Option<NaiveDate>) -> Result<(), FormError> {
        if !matches!(self.phase, Phase::Ready) {
            return Err(self.invalid("change the date"));
        }

        self.selected_date = date;
        self.available_times = match date {
            Some(date) => available_times(date, &self.blocked),
            None => Vec::new(),
        };
        tracing::debug!(
            date = ?self.selected_date,
            slots = self.available_times.len(),
            "date selected"
        );
        Ok(())
    }

    /// Validates the draft and moves to `Submitting`.
    ///
    /// The draft is kept even when validation fails, and no ticket is issued
    /// in that case, so nothing can be sent.
    pub fn begin_submit(&mut self, draft: ReservationDraft) -> Result<PendingSubmission, FormError> {
        if !matches!(self.phase, Phase::Ready) {
            return Err(self.invalid("submit"));
        }

        self.error = None;
        self.draft = draft;

        let request = self.validate().map_err(|e| {
            tracing::info!(error = %e, "reservation rejected locally");
            FormError::from(e)
        })?;

        self.phase = Phase::Submitting;
        Ok(PendingSubmission {
            ticket: self.next_ticket(),
            request,
        })
    }

    /// Applies the submission result. Returns `false` if the result was stale.
    pub fn finish_submit(
        &mut self,
        ticket: Ticket,
        result: Result<ReservationDetails, SubmissionError>,
    ) -> bool {
        if !self.is_current(ticket) || !matches!(self.phase, Phase::Submitting) {
            tracing::debug!("discarding stale submission result");
            return false;
        }

        match result {
            Ok(details) => {
                tracing::info!("reservation confirmed");
                self.phase = Phase::Confirmed(details);
            }
            Err(e) => {
                tracing::warn!(error = %e, "reservation submission failed");
                self.error = Some(e.user_message());
                self.phase = Phase::Ready;
            }
        }
        true
    }

    /// Closes the confirmation and starts a blank form.
    pub fn dismiss_confirmation(&mut self) -> Result<(), FormError> {
        if !matches!(self.phase, Phase::Confirmed(_)) {
            return Err(self.invalid("dismiss the confirmation"));
        }
        self.phase = Phase::Ready;
        self.error = None;
        self.selected_date = None;
        self.available_times.clear();
        self.draft = ReservationDraft::default();
        Ok(())
    }

    /// Invalidates every outstanding ticket.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.generation += 1;
    }

    /// Dates the picker offers in `[from, from + days)`.
    pub fn calendar(&self, from: NaiveDate, days: u32, today: NaiveDate) -> Vec<NaiveDate> {
        selectable_dates(from, days, today, &self.blocked)
    }

    pub fn snapshot(&self) -> FormState {
        let reservation_details = match &self.phase {
            Phase::Confirmed(details) => Some(details.clone()),
            _ => None,
        };
        let inputs_visible = !matches!(self.phase, Phase::Loading | Phase::Error);
        FormState {
            phase: self.phase(),
            inputs_visible,
            time_select_enabled: inputs_visible && self.selected_date.is_some(),
            submit_enabled: matches!(self.phase, Phase::Ready),
            loading: matches!(self.phase, Phase::Loading),
            error: self.error.clone(),
            selected_date: self.selected_date,
            available_times: self.available_times.clone(),
            show_confirmation: reservation_details.is_some(),
            reservation_details,
            draft: self.draft.clone(),
        }
    }

    /// Loads the blocked dates when the form is owned directly.
    pub async fn load(&mut self, backend: &dyn ReservationBackend) -> Result<(), FormError> {
        let ticket = self.begin_load()?;
        let result = backend.fetch_blocked_dates().await;
        self.finish_load(ticket, result);
        Ok(())
    }

    /// Validates and sends the draft when the form is owned directly.
    pub async fn submit(
        &mut self,
        draft: ReservationDraft,
        backend: &dyn ReservationBackend,
    ) -> Result<(), FormError> {
        let pending = self.begin_submit(draft)?;
        let result = backend.submit(&pending.request).await;
        self.finish_submit(pending.ticket, result);
        Ok(())
    }

    fn validate(&self) -> Result<ReservationRequest, ValidationError> {
        let party_size = parse_party_size(&self.draft.party_size)?;
        if party_size > MAX_PARTY_SIZE {
            return Err(ValidationError::PartyTooLarge {
                limit: MAX_PARTY_SIZE + 1,
                phone: self.restaurant_phone.clone(),
            });
        }

        let date = self.selected_date.ok_or(ValidationError::NoDateSelected)?;
        let time = required(&self.draft.time, "hora")?;
        if !self.available_times.contains(&time) {
            return Err(ValidationError::UnavailableTime(time));
        }
        let name = required(&self.draft.name, "nombre")?;
        let phone = required(&self.draft.phone, "telefono")?;
        let email = required(&self.draft.email, "email")?;

        Ok(ReservationRequest {
            date,
            time,
            party_size,
            name,
            phone,
            email,
        })
    }

    fn next_ticket(&mut self) -> Ticket {
        self.generation += 1;
        Ticket {
            generation: self.generation,
        }
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        !self.torn_down && ticket.generation == self.generation
    }

    fn invalid(&self, action: &'static str) -> FormError {
        FormError::InvalidTransition {
            action,
            phase: self.phase(),
        }
    }
}

fn parse_party_size(raw: &str) -> Result<u32, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingField("personas"));
    }
    match raw.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ValidationError::InvalidPartySize(raw.to_string())),
    }
}

/// Blank input is missing; anything else is sent exactly as typed.
fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(value.to_string())
}
