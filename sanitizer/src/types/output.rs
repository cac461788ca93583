use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Serialized form of a merged user.
///
/// Field declaration order is the key order of the rendered document. `email` and `phone` are
/// only present when the user they were built from had a valid email and a valid-format phone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRecord {
    pub first_name: String,
    pub last_name: String,
    pub more_data: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone formatted as `(XXX) XXX-XXXX`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl OutputRecord {
    /// Folds a newer record for the same user into this one.
    ///
    /// Names, `email` and `phone` are taken from `newer` as they are, so a newer record without
    /// a valid email or phone clears the existing one. `moreData` is merged key by key: keys only
    /// present here are kept, keys present in `newer` win.
    pub fn merge(&mut self, newer: OutputRecord) {
        let OutputRecord {
            first_name,
            last_name,
            more_data,
            email,
            phone,
        } = newer;

        self.first_name = first_name;
        self.last_name = last_name;
        self.email = email;
        self.phone = phone;
        self.more_data.extend(more_data);
    }
}
