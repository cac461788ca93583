#![allow(dead_code)]

use sanitizer::types::RawRecord;
use serde_json::{Value, json};

/// Builds a raw user record as served by the users API.
///
/// `extra` entries are added to `moreData` next to the phone.
pub fn user_record(
    first_name: &str,
    last_name: &str,
    email: Option<&str>,
    phone: Option<&str>,
    extra: Value,
) -> RawRecord {
    let mut more_data = match extra {
        Value::Object(map) => map,
        Value::Null => serde_json::Map::new(),
        other => panic!("extra must be an object, got {other}"),
    };
    if let Some(phone) = phone {
        more_data.insert("phone".to_owned(), json!(phone));
    }

    let mut record = json!({
        "firstName": first_name,
        "lastName": last_name,
        "moreData": more_data,
    });
    if let Some(email) = email {
        record["email"] = json!(email);
    }

    serde_json::from_value(record).expect("fixture is a JSON object")
}

/// A small, realistic payload with duplicates and invalid entries.
pub fn users_payload() -> Value {
    json!([
        {
            "firstName": "Grace",
            "lastName": "Hopper",
            "email": "grace@navy.mil",
            "moreData": { "phone": "555-123-4567", "rank": "Rear Admiral" }
        },
        {
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "not an email",
            "moreData": { "phone": "(212) 555-0199", "city": "London" }
        },
        {
            "firstName": "",
            "lastName": "Nobody",
            "email": "nobody@example.com",
            "moreData": { "phone": "2125550100" }
        },
        {
            "firstName": "Alan",
            "lastName": "Turing",
            "email": "alan@@example.com",
            "moreData": { "phone": "12345" }
        },
        {
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "moreData": { "phone": "212.555.0199", "title": "Countess" }
        }
    ])
}

/// The document expected for [`users_payload`].
pub fn expected_users_document() -> Value {
    json!([
        {
            "firstName": "Grace",
            "lastName": "Hopper",
            "moreData": { "rank": "Rear Admiral" },
            "email": "grace@navy.mil",
            "phone": "(555) 123-4567"
        },
        {
            "firstName": "Ada",
            "lastName": "Lovelace",
            "moreData": { "city": "London", "title": "Countess" },
            "email": "ada@example.com",
            "phone": "(212) 555-0199"
        }
    ])
}
