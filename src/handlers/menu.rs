use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::errors::AppError;
use crate::models::{MenuCatalog, MenuSection};
use crate::state::AppState;

// GET /api/menu
pub async fn get_menu(State(state): State<Arc<AppState>>) -> Json<MenuCatalog> {
    Json(state.menu.clone())
}

// GET /api/menu/:section
pub async fn get_section(
    State(state): State<Arc<AppState>>,
    Path(section): Path<String>,
) -> Result<Json<MenuSection>, AppError> {
    state
        .menu
        .section(&section)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("menu section {section}")))
}
