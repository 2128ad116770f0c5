pub mod health;
pub mod menu;
pub mod reservation;

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/", get(reservation::reservation_page))
        .route("/reservierung", get(reservation::reservation_page))
        .route("/api/menu", get(menu::get_menu))
        .route("/api/menu/:section", get(menu::get_section))
        .route(
            "/api/reservations/sessions",
            post(reservation::open_session),
        )
        .route(
            "/api/reservations/sessions/:id",
            get(reservation::get_session).delete(reservation::close_session),
        )
        .route(
            "/api/reservations/sessions/:id/date",
            put(reservation::select_date),
        )
        .route(
            "/api/reservations/sessions/:id/calendar",
            get(reservation::get_calendar),
        )
        .route(
            "/api/reservations/sessions/:id/submit",
            post(reservation::submit),
        )
        .route(
            "/api/reservations/sessions/:id/dismiss",
            post(reservation::dismiss),
        )
        .with_state(state)
}
