use std::env;
use std::time::Duration;

pub const DEFAULT_BLOCKED_DATES_URL: &str =
    "https://reservierung.cantinatexmex.ch/get_blocked_dates.php";
pub const DEFAULT_RESERVATION_URL: &str =
    "https://reservierung.cantinatexmex.ch/enviar_confirmacion.php";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub blocked_dates_url: String,
    pub reservation_url: String,
    pub request_timeout_secs: u64,
    pub session_ttl_minutes: u64,
    pub restaurant_phone: String,
    pub cors_origin: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            blocked_dates_url: env::var("BLOCKED_DATES_URL")
                .unwrap_or_else(|_| DEFAULT_BLOCKED_DATES_URL.to_string()),
            reservation_url: env::var("RESERVATION_URL")
                .unwrap_or_else(|_| DEFAULT_RESERVATION_URL.to_string()),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            session_ttl_minutes: env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            restaurant_phone: env::var("RESTAURANT_PHONE")
                .unwrap_or_else(|_| "081 750 19 11".to_string()),
            cors_origin: env::var("CORS_ORIGIN").ok().filter(|v| !v.is_empty()),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_minutes * 60)
    }
}
