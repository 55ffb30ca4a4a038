//! The address record entity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::{ValidatedAddress, ZipCode};

/// A stored address. Serialized with the camelCase field names clients use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub address1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: ZipCode,
}

impl AddressRecord {
    /// Assemble a record from validated fields and an id.
    pub fn new(id: impl Into<String>, fields: ValidatedAddress) -> Self {
        Self {
            id: id.into(),
            first_name: fields.first_name,
            last_name: fields.last_name,
            address1: fields.address1,
            address2: fields.address2,
            city: fields.city,
            state: fields.state,
            zip: fields.zip,
        }
    }

    /// Assemble a record under a freshly generated UUID v4.
    pub fn with_generated_id(fields: ValidatedAddress) -> Self {
        Self::new(generate_id(), fields)
    }
}

/// Generate an opaque, unique address identifier.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Response body of a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedAddress {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{validate_new_address, CreateAddressRequest};

    fn fields(address2: Option<&str>) -> ValidatedAddress {
        validate_new_address(&CreateAddressRequest {
            first_name: Some("cindy".into()),
            last_name: Some("nice".into()),
            address1: Some("Cache Valley Stone Society".into()),
            address2: address2.map(Into::into),
            city: Some("Austin".into()),
            state: Some("TX".into()),
            zip: Some(12345u64.into()),
        })
        .unwrap()
    }

    #[test]
    fn serializes_with_client_field_names() {
        let record = AddressRecord::new("abc", fields(Some("Apt 2")));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "abc",
                "firstName": "cindy",
                "lastName": "nice",
                "address1": "Cache Valley Stone Society",
                "address2": "Apt 2",
                "city": "Austin",
                "state": "TX",
                "zip": 12345
            })
        );
    }

    #[test]
    fn absent_address2_is_omitted() {
        let record = AddressRecord::new("abc", fields(None));
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("address2").is_none());
    }

    #[test]
    fn generated_ids_are_uuids_and_distinct() {
        let a = AddressRecord::with_generated_id(fields(None));
        let b = AddressRecord::with_generated_id(fields(None));
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }
}
