use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key holding the user's first name.
pub const FIRST_NAME_KEY: &str = "firstName";
/// Key holding the user's last name.
pub const LAST_NAME_KEY: &str = "lastName";
/// Key holding the user's email address.
pub const EMAIL_KEY: &str = "email";
/// Key holding the nested mapping of auxiliary user data.
pub const MORE_DATA_KEY: &str = "moreData";
/// Key of the phone number inside [`MORE_DATA_KEY`].
pub const PHONE_KEY: &str = "phone";

/// A user record exactly as supplied by the source.
///
/// The mapping is loosely typed: any key may be missing or hold a value of an unexpected type.
/// Accessors return [`None`] in those cases instead of failing, leaving it to the user model to
/// decide whether the record is usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    /// Returns the string stored under `key`, or [`None`] when absent or not a string.
    pub fn string_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Returns the nested `moreData` mapping, or [`None`] when absent or not an object.
    pub fn more_data(&self) -> Option<&Map<String, Value>> {
        self.0.get(MORE_DATA_KEY).and_then(Value::as_object)
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn string_fields_ignore_non_string_values() {
        let raw = record(json!({
            "firstName": "Ada",
            "lastName": 42,
            "email": null,
        }));

        assert_eq!(raw.string_field(FIRST_NAME_KEY), Some("Ada"));
        assert_eq!(raw.string_field(LAST_NAME_KEY), None);
        assert_eq!(raw.string_field(EMAIL_KEY), None);
        assert_eq!(raw.string_field("missing"), None);
    }

    #[test]
    fn more_data_requires_an_object() {
        let raw = record(json!({ "moreData": { "phone": "123" } }));
        assert_eq!(
            raw.more_data().and_then(|data| data.get(PHONE_KEY)),
            Some(&json!("123"))
        );

        let raw = record(json!({ "moreData": "not an object" }));
        assert!(raw.more_data().is_none());

        assert!(RawRecord::default().more_data().is_none());
    }

    #[test]
    fn builds_from_object_fields() {
        let Value::Object(fields) = json!({ "firstName": "Ada", "moreData": {} }) else {
            unreachable!()
        };

        let raw = RawRecord::from(fields);

        assert_eq!(raw.string_field(FIRST_NAME_KEY), Some("Ada"));
        assert!(raw.more_data().is_some_and(Map::is_empty));
    }

    #[test]
    fn non_object_payloads_are_rejected() {
        assert!(serde_json::from_value::<RawRecord>(json!(["firstName"])).is_err());
    }
}
