use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::services::dates::format_display_date;

/// Field name to submitted value, exactly as sent to the reservation service.
pub type ReservationDetails = BTreeMap<String, String>;

/// Values typed into the form, kept verbatim so a failed submission can be
/// retried without re-entering them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservationDraft {
    pub time: String,
    pub party_size: String,
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// A validated reservation, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRequest {
    pub date: NaiveDate,
    pub time: String,
    pub party_size: u32,
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl ReservationRequest {
    /// Multipart field names and values in the order the service expects.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("fecha", format_display_date(self.date)),
            ("hora", self.time.clone()),
            ("personas", self.party_size.to_string()),
            ("nombre", self.name.clone()),
            ("telefono", self.phone.clone()),
            ("email", self.email.clone()),
        ]
    }

    pub fn details(&self) -> ReservationDetails {
        self.form_fields()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ReservationRequest {
        ReservationRequest {
            date: NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(),
            time: "18:30".to_string(),
            party_size: 4,
            name: "Ana Muster".to_string(),
            phone: "079 123 45 67".to_string(),
            email: "ana@example.ch".to_string(),
        }
    }

    #[test]
    fn test_form_fields_order_and_format() {
        let fields = request().form_fields();
        let names: Vec<_> = fields.iter().map(|(k, _)| *k).collect();
        assert_eq!(names, ["fecha", "hora", "personas", "nombre", "telefono", "email"]);
        assert_eq!(fields[0].1, "04.07.2024");
        assert_eq!(fields[2].1, "4");
    }

    #[test]
    fn test_details_mirror_form_fields() {
        let details = request().details();
        assert_eq!(details.len(), 6);
        assert_eq!(details["fecha"], "04.07.2024");
        assert_eq!(details["nombre"], "Ana Muster");
    }

    #[test]
    fn test_draft_missing_fields_default_blank() {
        let draft: ReservationDraft = serde_json::from_str(r#"{"name":"Ana"}"#).unwrap();
        assert_eq!(draft.name, "Ana");
        assert!(draft.time.is_empty());
        assert!(draft.party_size.is_empty());
    }
}
