//! Records the store starts with.

use crate::store::address::AddressRecord;
use crate::validation::{validate_new_address, CreateAddressRequest};

struct Seed {
    id: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    address1: &'static str,
    address2: &'static str,
    city: &'static str,
    state: &'static str,
    zip: u64,
}

const SEEDS: [Seed; 2] = [
    Seed {
        id: "3c8da4d5-1597-46e7-baa1-e402aed70d80",
        first_name: "sallyStudent",
        last_name: "c00d1ng1sc00l",
        address1: "Cache Valley Stone Society",
        address2: "false",
        city: "Miami",
        state: "FL",
        zip: 33169,
    },
    Seed {
        id: "6c8da4d5-1597-46e7-baa1-e402aed70d87",
        first_name: "cindy",
        last_name: "nice",
        address1: "Cache Valley Stone Society",
        address2: "false",
        city: "Austin",
        state: "TX",
        zip: 12345,
    },
];

/// The seed set, passed through the same rules as client submissions.
pub fn seed_records() -> Vec<AddressRecord> {
    SEEDS
        .iter()
        .filter_map(|seed| {
            let request = CreateAddressRequest {
                first_name: Some(seed.first_name.into()),
                last_name: Some(seed.last_name.into()),
                address1: Some(seed.address1.into()),
                address2: Some(seed.address2.into()),
                city: Some(seed.city.into()),
                state: Some(seed.state.into()),
                zip: Some(seed.zip.into()),
            };
            match validate_new_address(&request) {
                Ok(fields) => Some(AddressRecord::new(seed.id, fields)),
                Err(reason) => {
                    tracing::error!(id = seed.id, %reason, "Seed record failed validation");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_seed_is_valid() {
        let records = seed_records();
        assert_eq!(records.len(), SEEDS.len());
        assert_eq!(records[0].id, "3c8da4d5-1597-46e7-baa1-e402aed70d80");
        assert_eq!(records[1].city, "Austin");
    }
}
