use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::{AppError, SubmissionError};
use crate::models::{FormState, ReservationDraft};
use crate::services::backend::ReservationBackend;
use crate::services::form::{FormController, Ticket};

struct Session {
    form: FormController,
    last_activity: Instant,
}

/// Open reservation forms, one controller each.
///
/// The map lock is only held between awaits: a request is started under the
/// lock, sent without it, and its result applied under the lock again. A
/// session closed in between is simply gone, so its result is dropped.
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, Session>>,
    ttl: Duration,
    restaurant_phone: String,
}

impl SessionStore {
    pub fn new(ttl: Duration, restaurant_phone: String) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
            restaurant_phone,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Session>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Opens a form and performs its blocked-dates fetch.
    pub async fn open_and_load(&self, backend: &dyn ReservationBackend) -> (Uuid, FormState) {
        let id = Uuid::new_v4();
        let ticket = {
            let mut sessions = self.lock();
            self.sweep_expired(&mut sessions);

            let mut form = FormController::new(self.restaurant_phone.clone());
            let ticket = form.begin_load();
            sessions.insert(
                id,
                Session {
                    form,
                    last_activity: Instant::now(),
                },
            );
            ticket
        };
        tracing::info!(session = %id, "reservation form opened");

        if let Ok(ticket) = ticket {
            let guard = InFlight::load(self, id);
            let result = backend.fetch_blocked_dates().await;
            guard.settled();
            let mut sessions = self.lock();
            match sessions.get_mut(&id) {
                Some(session) => {
                    session.form.finish_load(ticket, result);
                }
                None => tracing::debug!(session = %id, "session closed before blocked dates arrived"),
            }
        }

        let state = self
            .with_session(id, |form| Ok(form.snapshot()))
            .unwrap_or_else(|_| FormController::new(self.restaurant_phone.clone()).snapshot());
        (id, state)
    }

    pub fn snapshot(&self, id: Uuid) -> Result<FormState, AppError> {
        self.with_session(id, |form| Ok(form.snapshot()))
    }

    pub fn select_date(&self, id: Uuid, date: Option<NaiveDate>) -> Result<FormState, AppError> {
        self.with_session(id, |form| {
            form.select_date(date)?;
            Ok(form.snapshot())
        })
    }

    pub fn calendar(
        &self,
        id: Uuid,
        from: NaiveDate,
        days: u32,
        today: NaiveDate,
    ) -> Result<Vec<NaiveDate>, AppError> {
        self.with_session(id, |form| Ok(form.calendar(from, days, today)))
    }

    /// Validates the draft, sends it, and returns the resulting state.
    pub async fn submit(
        &self,
        id: Uuid,
        draft: ReservationDraft,
        backend: &dyn ReservationBackend,
    ) -> Result<FormState, AppError> {
        let pending = self.with_session(id, |form| Ok(form.begin_submit(draft)?))?;
        tracing::info!(
            session = %id,
            date = %pending.request.date,
            time = %pending.request.time,
            party_size = pending.request.party_size,
            "submitting reservation"
        );

        let guard = InFlight::submit(self, id, pending.ticket);
        let result = backend.submit(&pending.request).await;
        guard.settled();

        let mut sessions = self.lock();
        let Some(session) = sessions.get_mut(&id) else {
            tracing::debug!(session = %id, "session closed before submission finished");
            return Err(AppError::NotFound(format!("session {id}")));
        };
        session.last_activity = Instant::now();
        session.form.finish_submit(pending.ticket, result);
        Ok(session.form.snapshot())
    }

    pub fn dismiss(&self, id: Uuid) -> Result<FormState, AppError> {
        self.with_session(id, |form| {
            form.dismiss_confirmation()?;
            Ok(form.snapshot())
        })
    }

    /// Tears the form down; pending results for it are discarded.
    pub fn close(&self, id: Uuid) -> bool {
        match self.lock().remove(&id) {
            Some(mut session) => {
                session.form.teardown();
                tracing::info!(session = %id, "reservation form closed");
                true
            }
            None => false,
        }
    }

    fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut FormController) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut sessions = self.lock();
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("session {id}")))?;
        session.last_activity = Instant::now();
        f(&mut session.form)
    }

    fn sweep_expired(&self, sessions: &mut HashMap<Uuid, Session>) {
        let before = sessions.len();
        sessions.retain(|_, s| s.last_activity.elapsed() < self.ttl);
        let removed = before - sessions.len();
        if removed > 0 {
            tracing::info!(removed, "expired reservation forms removed");
        }
    }
}

/// Settles a session whose request future was dropped before the backend
/// answered, e.g. because the client disconnected.
///
/// A dropped load never handed its id to anyone, so the session is closed.
/// A dropped submission is finished as a transport failure, which puts the
/// form back to `Ready` with the draft intact.
struct InFlight<'a> {
    store: &'a SessionStore,
    id: Uuid,
    pending: Option<InFlightRequest>,
}

enum InFlightRequest {
    Load,
    Submit(Ticket),
}

impl<'a> InFlight<'a> {
    fn load(store: &'a SessionStore, id: Uuid) -> Self {
        Self {
            store,
            id,
            pending: Some(InFlightRequest::Load),
        }
    }

    fn submit(store: &'a SessionStore, id: Uuid, ticket: Ticket) -> Self {
        Self {
            store,
            id,
            pending: Some(InFlightRequest::Submit(ticket)),
        }
    }

    /// The backend answered; the caller applies the result itself.
    fn settled(mut self) {
        self.pending = None;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        match self.pending.take() {
            None => {}
            Some(InFlightRequest::Load) => {
                tracing::warn!(session = %self.id, "blocked dates request cancelled");
                self.store.close(self.id);
            }
            Some(InFlightRequest::Submit(ticket)) => {
                tracing::warn!(session = %self.id, "reservation request cancelled");
                let mut sessions = self.store.lock();
                if let Some(session) = sessions.get_mut(&self.id) {
                    session.form.finish_submit(
                        ticket,
                        Err(SubmissionError::Transport("request cancelled".to_string())),
                    );
                }
            }
        }
    }
}
