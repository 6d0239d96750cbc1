use super::*;
use serde_json::json;

#[test]
fn http_status_mapping() {
    assert_eq!(AppError::user("bad_input", "oops").http_status(), 400);
    assert_eq!(AppError::not_found("not_found", "missing").http_status(), 404);
    assert_eq!(AppError::conflict("conflict", "dup").http_status(), 409);
    assert_eq!(AppError::auth("auth", "no").http_status(), 401);
    assert_eq!(AppError::forbidden("forbidden", "blocked").http_status(), 403);
    assert_eq!(AppError::config("config_error", "bad ttl").http_status(), 500);
    assert_eq!(AppError::network("network", "down").http_status(), 503);
    assert_eq!(AppError::internal("internal", "panic").http_status(), 500);
}

#[test]
fn message_prefers_structured_field() {
    let body = json!({ "message": "Invoice number already used", "error": "conflict" });
    assert_eq!(error_message(&body), "Invoice number already used");
}

#[test]
fn message_reads_nested_and_list_shapes() {
    assert_eq!(error_message(&json!({ "error": { "message": "Party not found" } })), "Party not found");
    assert_eq!(error_message(&json!({ "errors": [{ "message": "GSTIN is invalid" }] })), "GSTIN is invalid");
    assert_eq!(error_message(&json!({ "errors": ["name is required"] })), "name is required");
}

#[test]
fn message_falls_back_to_raw_string() {
    assert_eq!(error_message(&json!("Gateway timeout")), "Gateway timeout");
    assert_eq!(error_message(&json!({ "error": "Unauthorized" })), "Unauthorized");
}

#[test]
fn message_defaults_when_nothing_usable() {
    assert_eq!(error_message(&json!({})), DEFAULT_ERROR_MESSAGE);
    assert_eq!(error_message(&json!(null)), DEFAULT_ERROR_MESSAGE);
    assert_eq!(error_message(&json!({ "message": "   " })), DEFAULT_ERROR_MESSAGE);
    assert_eq!(error_message(&json!({ "message": 42 })), DEFAULT_ERROR_MESSAGE);
}

#[test]
fn from_response_maps_status_and_code() {
    let e = AppError::from_response(403, &json!({ "code": "no_access", "message": "Admins only" }));
    assert_eq!(e, AppError::forbidden("no_access", "Admins only"));

    let e = AppError::from_response(502, &json!("bad gateway"));
    assert_eq!(e.code_str(), "http_502");
    assert_eq!(e.http_status(), 503);
    assert_eq!(e.message(), "bad gateway");

    let e = AppError::from_response(418, &json!({}));
    assert_eq!(e.message(), DEFAULT_ERROR_MESSAGE);
    assert_eq!(e.http_status(), 500);
}

#[test]
fn serde_tagged_representation() {
    let v = serde_json::to_value(AppError::auth("session_expired", "Please sign in again")).unwrap();
    assert_eq!(v, json!({ "type": "auth", "code": "session_expired", "message": "Please sign in again" }));
}

#[test]
fn message_or_uses_supplied_default() {
    assert_eq!(error_message_or(&json!({}), "Try again later"), "Try again later");
    assert_eq!(error_message_or(&json!({ "error": "Unauthorized" }), "Try again later"), "Unauthorized");
}
