pub mod blocked_dates;
pub mod form_state;
pub mod menu;
pub mod reservation;

pub use blocked_dates::BlockedDateMap;
pub use form_state::{FormPhase, FormState};
pub use menu::{MenuCatalog, MenuItem, MenuSection, SubMenuItem};
pub use reservation::{ReservationDetails, ReservationDraft, ReservationRequest};
