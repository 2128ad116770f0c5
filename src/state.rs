use crate::config::AppConfig;
use crate::models::MenuCatalog;
use crate::services::backend::ReservationBackend;
use crate::services::sessions::SessionStore;

pub struct AppState {
    pub config: AppConfig,
    pub backend: Box<dyn ReservationBackend>,
    pub sessions: SessionStore,
    pub menu: MenuCatalog,
}
