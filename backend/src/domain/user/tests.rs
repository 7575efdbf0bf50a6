//! Tests for the session user model.

use super::*;
use rstest::rstest;
use serde_json::json;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[test]
fn accepts_a_valid_uuid() {
    let id = UserId::new(VALID_ID).expect("uuid should validate");
    assert_eq!(id.to_string(), VALID_ID);
}

#[rstest]
#[case::empty("", UserIdValidationError::EmptyId)]
#[case::not_a_uuid("not-a-uuid", UserIdValidationError::InvalidId)]
#[case::padded(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserIdValidationError::InvalidId)]
fn rejects_malformed_ids(#[case] raw: &str, #[case] expected: UserIdValidationError) {
    let error = UserId::new(raw).expect_err("id must be rejected");
    assert_eq!(error, expected);
}

#[test]
fn session_user_tolerates_extra_stored_fields() {
    let user: SessionUser = serde_json::from_value(json!({
        "id": VALID_ID,
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "emailVerified": null
    }))
    .expect("record should decode");
    assert_eq!(user.name, "Ada Lovelace");
    assert_eq!(user.image, None);
}

#[test]
fn session_user_round_trips_through_json() {
    let user = SessionUser {
        id: UserId::new(VALID_ID).expect("uuid should validate"),
        name: "Ada Lovelace".to_owned(),
        email: "ada@example.com".to_owned(),
        image: Some("https://example.com/ada.png".to_owned()),
    };
    let json = serde_json::to_value(&user).expect("record should serialise");
    let decoded: SessionUser = serde_json::from_value(json).expect("record should decode");
    assert_eq!(decoded, user);
}
