use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{FormState, ReservationDraft};
use crate::services::dates::{format_date, parse_local_date};
use crate::state::AppState;

static RESERVATION_HTML: &str = include_str!("../web/reservation.html");

const DEFAULT_CALENDAR_DAYS: u32 = 60;
const MAX_CALENDAR_DAYS: u32 = 366;

pub async fn reservation_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let phone = &state.config.restaurant_phone;
    let tel: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    Html(
        RESERVATION_HTML
            .replace("{{restaurant_tel}}", &tel)
            .replace("{{restaurant_phone}}", phone),
    )
}

// POST /api/reservations/sessions
#[derive(Serialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub state: FormState,
}

pub async fn open_session(State(state): State<Arc<AppState>>) -> Response {
    let (id, form) = state.sessions.open_and_load(state.backend.as_ref()).await;
    (StatusCode::CREATED, Json(SessionResponse { id, state: form })).into_response()
}

// GET /api/reservations/sessions/:id
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<FormState>, AppError> {
    Ok(Json(state.sessions.snapshot(id)?))
}

// PUT /api/reservations/sessions/:id/date
#[derive(Deserialize)]
pub struct DateSelection {
    pub date: Option<String>,
}

pub async fn select_date(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<DateSelection>,
) -> Result<Json<FormState>, AppError> {
    let date = match payload.date.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(parse_local_date(raw)?),
    };
    Ok(Json(state.sessions.select_date(id, date)?))
}

// GET /api/reservations/sessions/:id/calendar
#[derive(Deserialize)]
pub struct CalendarQuery {
    pub from: Option<String>,
    pub days: Option<u32>,
}

#[derive(Serialize)]
pub struct CalendarResponse {
    pub dates: Vec<String>,
}

pub async fn get_calendar(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, AppError> {
    let today = Local::now().date_naive();
    let from = match query.from.as_deref() {
        Some(raw) => parse_local_date(raw)?,
        None => today,
    };
    let days = query
        .days
        .unwrap_or(DEFAULT_CALENDAR_DAYS)
        .min(MAX_CALENDAR_DAYS);

    let dates = state.sessions.calendar(id, from, days, today)?;
    Ok(Json(CalendarResponse {
        dates: dates.into_iter().map(format_date).collect(),
    }))
}

// POST /api/reservations/sessions/:id/submit
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(draft): Json<ReservationDraft>,
) -> Result<Json<FormState>, AppError> {
    let form = state
        .sessions
        .submit(id, draft, state.backend.as_ref())
        .await?;
    Ok(Json(form))
}

// POST /api/reservations/sessions/:id/dismiss
pub async fn dismiss(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<FormState>, AppError> {
    Ok(Json(state.sessions.dismiss(id)?))
}

// DELETE /api/reservations/sessions/:id
pub async fn close_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.close(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("session {id}")))
    }
}
