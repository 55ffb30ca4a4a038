//! Create-request payload and its validated form.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A postal code as submitted: JSON number or string.
///
/// Stored exactly as received so `GET /address` echoes the client's shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ZipCode {
    Numeric(u64),
    Text(String),
}

impl ZipCode {
    /// Text representation used for format checks.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            ZipCode::Numeric(n) => Cow::Owned(n.to_string()),
            ZipCode::Text(s) => Cow::Borrowed(s),
        }
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<u64> for ZipCode {
    fn from(n: u64) -> Self {
        ZipCode::Numeric(n)
    }
}

impl From<&str> for ZipCode {
    fn from(s: &str) -> Self {
        ZipCode::Text(s.to_string())
    }
}

/// Body of `POST /address`. Every field is optional at this stage.
///
/// Values stay as raw JSON until the rules run, so a wrongly typed field
/// cannot hide a missing one that comes earlier in rule order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddressRequest {
    pub first_name: Option<Value>,
    pub last_name: Option<Value>,
    pub address1: Option<Value>,
    pub address2: Option<Value>,
    pub city: Option<Value>,
    pub state: Option<Value>,
    pub zip: Option<Value>,
}

impl CreateAddressRequest {
    /// Read the known fields out of a decoded JSON object. Unknown keys are
    /// ignored.
    pub fn from_object(mut object: Map<String, Value>) -> Self {
        let mut take = |key: &str| object.remove(key).filter(|v| !v.is_null());
        Self {
            first_name: take("firstName"),
            last_name: take("lastName"),
            address1: take("address1"),
            address2: take("address2"),
            city: take("city"),
            state: take("state"),
            zip: take("zip"),
        }
    }
}

/// Whether a submitted value counts as present: `null`, `false`, `0` and
/// `""` do not.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Fields that passed every validation rule.
///
/// Only `validate_new_address` constructs this, so holding one proves the
/// rules ran.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedAddress {
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) address1: String,
    pub(crate) address2: Option<String>,
    pub(crate) city: String,
    pub(crate) state: String,
    pub(crate) zip: ZipCode,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn zip_serializes_in_submitted_shape() {
        assert_eq!(serde_json::to_value(ZipCode::Numeric(10000)).unwrap(), json!(10000));
        assert_eq!(serde_json::to_value(ZipCode::from("10000-1234")).unwrap(), json!("10000-1234"));
    }

    #[test]
    fn camel_case_fields_and_nulls() {
        let req = CreateAddressRequest::from_object(object(json!({
            "firstName": "Ada",
            "lastName": null,
            "address1": "1 Main",
            "nickname": "ignored"
        })));
        assert_eq!(req.first_name, Some(json!("Ada")));
        assert_eq!(req.last_name, None);
        assert_eq!(req.address1, Some(json!("1 Main")));
        assert_eq!(req.zip, None);
    }

    #[test]
    fn values_keep_their_json_type() {
        let req = CreateAddressRequest::from_object(object(json!({"firstName": false, "zip": 10000.0})));
        assert_eq!(req.first_name, Some(Value::Bool(false)));
        assert_eq!(req.zip, Some(json!(10000.0)));
    }

    #[test]
    fn truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!(-0.0), json!("")] {
            assert!(!is_truthy(&falsy), "{falsy}");
        }
        for truthy in [json!(true), json!(1), json!(-3), json!(" "), json!("0"), json!([]), json!({})] {
            assert!(is_truthy(&truthy), "{truthy}");
        }
    }

    #[test]
    fn zip_text_form() {
        assert_eq!(ZipCode::Numeric(33169).as_text(), "33169");
        assert_eq!(ZipCode::from("0").to_string(), "0");
    }
}
