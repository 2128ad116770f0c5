use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::reservation::{ReservationDetails, ReservationDraft};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FormPhase {
    Loading,
    Error,
    Ready,
    Submitting,
    Confirmed,
}

impl FormPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormPhase::Loading => "loading",
            FormPhase::Error => "error",
            FormPhase::Ready => "ready",
            FormPhase::Submitting => "submitting",
            FormPhase::Confirmed => "confirmed",
        }
    }
}

/// What the reservation page renders for one form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormState {
    pub phase: FormPhase,
    pub loading: bool,
    pub error: Option<String>,
    /// Date, time and party inputs are shown once the blocked dates settled
    /// successfully.
    pub inputs_visible: bool,
    /// The time selector is usable only once a date is picked.
    pub time_select_enabled: bool,
    pub submit_enabled: bool,
    pub selected_date: Option<NaiveDate>,
    pub available_times: Vec<String>,
    pub show_confirmation: bool,
    pub reservation_details: Option<ReservationDetails>,
    pub draft: ReservationDraft,
}
