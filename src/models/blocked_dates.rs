use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::errors::FetchError;

/// Slots already taken, keyed by canonical `YYYY-MM-DD` date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BlockedDateMap(HashMap<String, Vec<String>>);

impl BlockedDateMap {
    /// Parses the reservation service's blocked-dates body.
    ///
    /// The body must be an object mapping date strings to arrays of slot
    /// strings; any other per-date value rejects the whole map. An empty
    /// array is read as an empty map, which is how PHP encodes `[]`.
    pub fn from_json(s: &str) -> Result<Self, FetchError> {
        let value: Value =
            serde_json::from_str(s).map_err(|e| FetchError::Malformed(e.to_string()))?;

        let entries = match value {
            Value::Object(entries) => entries,
            Value::Array(items) if items.is_empty() => return Ok(Self::default()),
            other => {
                return Err(FetchError::Malformed(format!(
                    "expected an object keyed by date, got {}",
                    json_kind(&other)
                )))
            }
        };

        let mut map = HashMap::with_capacity(entries.len());
        for (date, slots) in entries {
            let slots: Vec<String> = serde_json::from_value(slots)
                .map_err(|e| FetchError::Malformed(format!("entry {date}: {e}")))?;
            map.insert(date, slots);
        }
        Ok(Self(map))
    }

    /// Blocked slots for a canonical date; an unknown date blocks nothing.
    pub fn blocked_times(&self, date: &str) -> &[String] {
        self.0.get(date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_date(&self, date: &str) -> bool {
        self.0.contains_key(date)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, Vec<String>>> for BlockedDateMap {
    fn from(map: HashMap<String, Vec<String>>) -> Self {
        Self(map)
    }
}

impl<D, S> FromIterator<(D, Vec<S>)> for BlockedDateMap
where
    D: Into<String>,
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (D, Vec<S>)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(date, slots)| (date.into(), slots.into_iter().map(Into::into).collect()))
                .collect(),
        )
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
