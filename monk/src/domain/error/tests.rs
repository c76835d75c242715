//! Tests for the domain error payload.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn base_error() -> DomainError {
    DomainError::invalid_request("bad")
}

#[rstest]
fn invalid_request_constructor_sets_code(base_error: DomainError) {
    assert_eq!(base_error.code(), ErrorCode::InvalidRequest);
    assert_eq!(base_error.message(), "bad");
}

#[rstest]
#[case(DomainError::unauthorized("who"), ErrorCode::Unauthorized)]
#[case(DomainError::forbidden("no"), ErrorCode::Forbidden)]
#[case(DomainError::not_found("gone"), ErrorCode::NotFound)]
#[case(DomainError::conflict("taken"), ErrorCode::Conflict)]
#[case(DomainError::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(DomainError::internal("boom"), ErrorCode::InternalError)]
fn convenience_constructors_set_codes(#[case] error: DomainError, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = DomainError::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn display_renders_the_message(base_error: DomainError) {
    assert_eq!(base_error.to_string(), "bad");
}

#[rstest]
fn serialises_code_in_snake_case(base_error: DomainError) {
    let value = serde_json::to_value(base_error.with_details(json!({"field": "title"})))
        .expect("serialise error");
    assert_eq!(value["code"], "invalid_request");
    assert_eq!(value["details"]["field"], "title");
}

#[rstest]
fn deserialising_blank_message_fails() {
    let payload = json!({"code": "not_found", "message": " "});
    let result: Result<DomainError, _> = serde_json::from_value(payload);
    assert!(result.is_err());
}

#[rstest]
fn omits_details_when_absent(base_error: DomainError) {
    let value = serde_json::to_value(base_error).expect("serialise error");
    assert!(value.get("details").is_none());
}
