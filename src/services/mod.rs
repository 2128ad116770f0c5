pub mod availability;
pub mod backend;
pub mod dates;
pub mod form;
pub mod sessions;
