//! Tests for the HTTP error mapping.

use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::ResponseError;
use rstest::rstest;

use crate::domain::{Error, ErrorCode};

#[rstest]
#[case::invalid_request(ErrorCode::InvalidRequest, StatusCode::BAD_REQUEST)]
#[case::unauthorized(ErrorCode::Unauthorized, StatusCode::UNAUTHORIZED)]
#[case::not_found(ErrorCode::NotFound, StatusCode::NOT_FOUND)]
#[case::internal(ErrorCode::InternalError, StatusCode::INTERNAL_SERVER_ERROR)]
fn maps_codes_to_expected_statuses(#[case] code: ErrorCode, #[case] expected: StatusCode) {
    let error = Error::new(code, "boom");
    assert_eq!(error.status_code(), expected);
}

#[actix_web::test]
async fn internal_errors_are_redacted_in_the_response_body() {
    let error = Error::internal("database password is hunter2");
    let response = error.error_response();

    let body = to_bytes(response.into_body()).await.expect("body should read");
    let payload: serde_json::Value =
        serde_json::from_slice(&body).expect("body should be JSON");
    assert_eq!(payload["message"], "Internal server error");
}

#[actix_web::test]
async fn client_errors_keep_their_message() {
    let error = Error::unauthorized("login required");
    let response = error.error_response();

    let body = to_bytes(response.into_body()).await.expect("body should read");
    let payload: serde_json::Value =
        serde_json::from_slice(&body).expect("body should be JSON");
    assert_eq!(payload["message"], "login required");
    assert_eq!(payload["code"], "unauthorized");
}
