//! Tests for friend-request input validation.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case::simple("friend@example.com")]
#[case::subdomain("friend@mail.example.co.uk")]
#[case::plus_tag("friend+tag@example.com")]
#[case::dotted_local("first.last@example.com")]
#[case::digits("user123@example99.io")]
fn accepts_well_formed_addresses(#[case] raw: &str) {
    let email = FriendRequestEmail::new(raw).expect("address should validate");
    assert_eq!(email.as_ref(), raw, "value must pass through unchanged");
}

#[rstest]
#[case::empty("", FriendRequestValidationError::EmptyEmail)]
#[case::whitespace("friend @example.com", FriendRequestValidationError::ContainsWhitespace)]
#[case::leading_space(" friend@example.com", FriendRequestValidationError::ContainsWhitespace)]
#[case::no_at("not-an-email", FriendRequestValidationError::MissingAtSign)]
#[case::two_ats("a@b@c.com", FriendRequestValidationError::MultipleAtSigns)]
#[case::no_local("@example.com", FriendRequestValidationError::EmptyLocalPart)]
#[case::no_domain("friend@", FriendRequestValidationError::EmptyDomain)]
#[case::no_dot("a@b", FriendRequestValidationError::DomainMissingDot)]
#[case::trailing_dot("a@b.", FriendRequestValidationError::EmptyDomainLabel)]
#[case::leading_dot("a@.b", FriendRequestValidationError::EmptyDomainLabel)]
#[case::double_dot("a@b..c", FriendRequestValidationError::EmptyDomainLabel)]
fn rejects_malformed_addresses(
    #[case] raw: &str,
    #[case] expected: FriendRequestValidationError,
) {
    let error = FriendRequestEmail::new(raw).expect_err("address must be rejected");
    assert_eq!(error, expected);
}

#[test]
fn revalidation_is_idempotent() {
    let email = FriendRequestEmail::new("friend@example.com").expect("address should validate");
    let revalidated = email.clone().revalidated().expect("revalidation must succeed");
    assert_eq!(revalidated, email);
}

#[test]
fn validate_accepts_a_well_formed_payload() {
    let input = FriendRequestInput::validate(&json!({ "email": "friend@example.com" }))
        .expect("payload should validate");
    assert_eq!(input.email.as_ref(), "friend@example.com");
}

#[rstest]
#[case::missing_field(json!({}), FriendRequestValidationError::MissingEmail)]
#[case::null_payload(serde_json::Value::Null, FriendRequestValidationError::MissingEmail)]
#[case::wrong_type(json!({ "email": 42 }), FriendRequestValidationError::EmailNotAString)]
#[case::bad_format(json!({ "email": "not-an-email" }), FriendRequestValidationError::MissingAtSign)]
fn validate_rejects_malformed_payloads(
    #[case] payload: serde_json::Value,
    #[case] expected: FriendRequestValidationError,
) {
    let error = FriendRequestInput::validate(&payload).expect_err("payload must be rejected");
    assert_eq!(error, expected);
}

#[test]
fn serde_round_trip_preserves_the_address() {
    let input = FriendRequestInput {
        email: FriendRequestEmail::new("friend@example.com").expect("address should validate"),
    };
    let json = serde_json::to_value(&input).expect("input should serialise");
    assert_eq!(json, json!({ "email": "friend@example.com" }));

    let decoded: FriendRequestInput =
        serde_json::from_value(json).expect("input should deserialise");
    assert_eq!(decoded, input);
}

#[test]
fn deserialisation_applies_the_format_predicate() {
    let result: Result<FriendRequestInput, _> =
        serde_json::from_value(json!({ "email": "a@b" }));
    assert!(result.is_err(), "invalid addresses must not deserialise");
}
