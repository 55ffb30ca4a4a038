//! Route handlers.
//!
//! | Method | Path            | Gate | Success                   |
//! |--------|-----------------|------|---------------------------|
//! | GET    | `/`             | yes  | 200 `Success?`            |
//! | POST   | `/`             | no   | 200 `POST request received` |
//! | GET    | `/address`      | no   | 200 JSON array            |
//! | POST   | `/address`      | yes  | 201 `{id}` + `Location`   |
//! | DELETE | `/address/{id}` | yes  | 204, empty body           |

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use crate::http::error::{ApiError, ApiResult};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::store::{AddressRecord, CreatedAddress};
use crate::validation::{validate_new_address, CreateAddressRequest};

pub async fn root_status() -> &'static str {
    "Success?"
}

pub async fn root_post() -> &'static str {
    "POST request received"
}

pub async fn list_addresses(State(state): State<AppState>) -> ApiResult<Json<Vec<AddressRecord>>> {
    Ok(Json(state.store.list()?))
}

pub async fn create_address(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let request = parse_create_body(&headers, &body)?;

    let fields = validate_new_address(&request).map_err(|failure| {
        tracing::debug!(field = failure.field().json_name(), reason = %failure, "Rejected address");
        metrics::record_validation_failure(failure.field().json_name());
        failure
    })?;

    let record = AddressRecord::with_generated_id(fields);
    let id = record.id.clone();
    state.store.insert(record)?;

    tracing::info!(id = %id, "Address created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, state.config.address_location(&id))],
        Json(CreatedAddress { id }),
    ))
}

pub async fn delete_address(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    match state.store.remove_by_id(&id)? {
        Some(_) => {
            tracing::info!(id = %id, "Address deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(ApiError::NotFound),
    }
}

pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}

/// Decode a create body.
///
/// Bodies that are empty or not declared as JSON are read as `{}`, so the
/// first presence rule answers. Broken JSON is an unexpected failure. An
/// array carries no named fields and reads as `{}` too; a bare scalar is a
/// bad request. Field types are left to the validation rules.
fn parse_create_body(headers: &HeaderMap, body: &Bytes) -> ApiResult<CreateAddressRequest> {
    if !is_json(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CreateAddressRequest::default());
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|e| ApiError::MalformedBody(e.to_string()))?;
    match value {
        Value::Object(object) => Ok(CreateAddressRequest::from_object(object)),
        Value::Array(_) => Ok(CreateAddressRequest::default()),
        other => Err(ApiError::InvalidPayload(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        headers
    }

    #[test]
    fn non_json_bodies_read_as_empty() {
        let parsed = parse_create_body(&HeaderMap::new(), &Bytes::from_static(b"firstName=x")).unwrap();
        assert_eq!(parsed, CreateAddressRequest::default());

        let parsed = parse_create_body(&json_headers(), &Bytes::from_static(b"  ")).unwrap();
        assert_eq!(parsed, CreateAddressRequest::default());
    }

    #[test]
    fn json_bodies_are_decoded() {
        let parsed =
            parse_create_body(&json_headers(), &Bytes::from_static(br#"{"firstName":"Ada"}"#)).unwrap();
        assert_eq!(parsed.first_name, Some(Value::from("Ada")));
    }

    #[test]
    fn broken_json_is_unexpected() {
        let err = parse_create_body(&json_headers(), &Bytes::from_static(b"{\"firstName\":")).unwrap_err();
        assert!(matches!(err, ApiError::MalformedBody(_)));
    }

    #[test]
    fn field_types_are_left_to_the_rules() {
        let parsed = parse_create_body(
            &json_headers(),
            &Bytes::from_static(br#"{"firstName": false, "lastName": 12, "zip": 10000.0}"#),
        )
        .unwrap();
        assert_eq!(parsed.first_name, Some(Value::Bool(false)));
        assert_eq!(parsed.last_name, Some(Value::from(12)));
    }

    #[test]
    fn non_object_json() {
        let parsed = parse_create_body(&json_headers(), &Bytes::from_static(b"[1, 2]")).unwrap();
        assert_eq!(parsed, CreateAddressRequest::default());

        let err = parse_create_body(&json_headers(), &Bytes::from_static(b"\"Ada\"")).unwrap_err();
        assert!(matches!(err, ApiError::InvalidPayload(_)));
    }

    #[test]
    fn vendor_json_content_types() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/merge-patch+json"));
        assert!(is_json(&headers));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert!(!is_json(&headers));
    }
}
