//! Presence and format rules for new address records.
//!
//! Each rule is a pure function returning `Ok` or the failure whose
//! `Display` text is sent back to the client verbatim.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use serde_json::{Number, Value};

use crate::validation::payload::{is_truthy, CreateAddressRequest, ValidatedAddress, ZipCode};

/// Five ASCII digits, optionally a hyphen or single space and four more.
static ZIP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{5}(?:[- ][0-9]{4})?$").expect("zip pattern is valid"));

/// A validated field of the create payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    Address1,
    Address2,
    City,
    State,
    Zip,
}

impl Field {
    /// Name of the field in the JSON payload.
    pub fn json_name(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Address1 => "address1",
            Field::Address2 => "address2",
            Field::City => "city",
            Field::State => "state",
            Field::Zip => "zip",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First name",
            Field::LastName => "Last name",
            Field::Address1 => "Main address",
            Field::Address2 => "Secondary address",
            Field::City => "City",
            Field::State => "State",
            Field::Zip => "Zip code",
        }
    }
}

/// Why a create payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("{} required", .0.label())]
    Required(Field),

    #[error("State must be 2 characters")]
    StateLength { chars: usize },

    #[error("Zip code must be 5 characters")]
    ZipFormat { value: String },

    /// Present, but not a JSON string.
    #[error("Invalid address payload")]
    NotText(Field),
}

impl ValidationFailure {
    pub fn field(&self) -> Field {
        match self {
            ValidationFailure::Required(field) | ValidationFailure::NotText(field) => *field,
            ValidationFailure::StateLength { .. } => Field::State,
            ValidationFailure::ZipFormat { .. } => Field::Zip,
        }
    }
}

/// Fails when a field is absent or falsy (`null`, `false`, `0`, `""`).
pub fn require(field: Field, value: Option<&Value>) -> Result<&Value, ValidationFailure> {
    match value {
        Some(v) if is_truthy(v) => Ok(v),
        _ => Err(ValidationFailure::Required(field)),
    }
}

/// Fails when a present field is not a JSON string.
pub fn expect_text(field: Field, value: &Value) -> Result<&str, ValidationFailure> {
    value.as_str().ok_or(ValidationFailure::NotText(field))
}

/// Interpret a present zip value.
///
/// Strings are kept as-is. Numbers are kept when they print as plain
/// digits, which covers whole floats such as `10000.0`; anything else is
/// reported as a format failure using its printed form.
pub fn zip_code(value: &Value) -> Result<ZipCode, ValidationFailure> {
    match value {
        Value::String(s) => Ok(ZipCode::Text(s.clone())),
        Value::Number(n) => whole_number(n)
            .map(ZipCode::Numeric)
            .ok_or_else(|| ValidationFailure::ZipFormat {
                value: n.to_string(),
            }),
        other => Err(ValidationFailure::ZipFormat {
            value: other.to_string(),
        }),
    }
}

fn whole_number(n: &Number) -> Option<u64> {
    if let Some(u) = n.as_u64() {
        return Some(u);
    }
    let f = n.as_f64()?;
    (f.fract() == 0.0 && f >= 0.0 && f <= u64::MAX as f64).then(|| f as u64)
}

/// State codes are exactly two characters (not bytes).
pub fn check_state_length(state: &str) -> Result<(), ValidationFailure> {
    let chars = state.chars().count();
    if chars == 2 {
        Ok(())
    } else {
        Err(ValidationFailure::StateLength { chars })
    }
}

/// Zip must be `12345`, `12345-6789` or `12345 6789`.
pub fn check_zip_format(zip: &ZipCode) -> Result<(), ValidationFailure> {
    let text = zip.as_text();
    if ZIP_PATTERN.is_match(&text) {
        Ok(())
    } else {
        Err(ValidationFailure::ZipFormat {
            value: text.into_owned(),
        })
    }
}

/// Run every rule in order; the first failure wins.
///
/// Presence checks run for `firstName`, `lastName`, `address1`, `city`,
/// `state`, `zip` before any type or format check. `address2` is never
/// required, but must be text when given.
pub fn validate_new_address(
    request: &CreateAddressRequest,
) -> Result<ValidatedAddress, ValidationFailure> {
    let first_name = require(Field::FirstName, request.first_name.as_ref())?;
    let last_name = require(Field::LastName, request.last_name.as_ref())?;
    let address1 = require(Field::Address1, request.address1.as_ref())?;
    let city = require(Field::City, request.city.as_ref())?;
    let state = require(Field::State, request.state.as_ref())?;
    let zip = require(Field::Zip, request.zip.as_ref())?;

    let first_name = expect_text(Field::FirstName, first_name)?;
    let last_name = expect_text(Field::LastName, last_name)?;
    let address1 = expect_text(Field::Address1, address1)?;
    let address2 = request
        .address2
        .as_ref()
        .filter(|v| !v.is_null())
        .map(|v| expect_text(Field::Address2, v))
        .transpose()?;
    let city = expect_text(Field::City, city)?;
    let state = expect_text(Field::State, state)?;

    check_state_length(state)?;
    let zip = zip_code(zip)?;
    check_zip_format(&zip)?;

    Ok(ValidatedAddress {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        address1: address1.to_string(),
        address2: address2.map(str::to_string),
        city: city.to_string(),
        state: state.to_string(),
        zip,
    })
}
