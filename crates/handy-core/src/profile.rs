use serde::Serialize;
use serde::de::Error as _;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// The persisted user profile.
///
/// Reading is lenient per field: a missing key, `null` or a value of the
/// wrong kind becomes the empty value, and only the record as a whole must
/// be a JSON object. Unknown keys are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub name: String,
    pub job: String,
    pub hobbies: BTreeSet<String>,
    #[serde(rename = "lifeAreas")]
    pub life_areas: Vec<String>,
}

impl Profile {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Fails only when `raw` is not JSON or its top level is not an object.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        match serde_json::from_str::<Value>(raw)? {
            Value::Object(fields) => Ok(Self::from_fields(&fields)),
            _ => Err(serde_json::Error::custom(
                "profile record must be a JSON object",
            )),
        }
    }

    fn from_fields(fields: &Map<String, Value>) -> Self {
        Self {
            name: text_field(fields.get("name")),
            job: text_field(fields.get("job")),
            hobbies: string_entries(fields.get("hobbies")).collect(),
            life_areas: string_entries(fields.get("lifeAreas")).collect(),
        }
    }

    pub fn has_hobby(&self, label: &str) -> bool {
        self.hobbies.contains(label)
    }
}

/// Strings pass through; numbers and booleans keep their JSON text.
fn text_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(scalar @ (Value::Number(_) | Value::Bool(_))) => scalar.to_string(),
        _ => String::new(),
    }
}

/// String entries of an array; anything else yields nothing.
fn string_entries(value: Option<&Value>) -> impl Iterator<Item = String> + '_ {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::to_owned)
}
