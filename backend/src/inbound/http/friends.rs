//! Friend-request submission endpoint.
//!
//! ```text
//! POST /api/v1/friends/add {"email":"friend@example.com"}
//! ```
//!
//! The endpoint answers `200 OK` with the outcome envelope for every
//! submission-flow result — validation failures, endpoint rejections,
//! and transport faults all surface as field errors inside the body.
//! Only a missing session produces an HTTP error status: authentication
//! sits outside the submission flow.

use actix_web::{post, web, HttpResponse};

use crate::domain::submission::SubmissionController;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Submit a friend request for the signed-in user.
#[post("/friends/add")]
pub async fn add_friend(
    session: SessionContext,
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;

    // Malformed JSON is a validation failure like any other; the
    // controller turns it into a field error rather than a 400.
    let raw = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);

    let mut controller = SubmissionController::new(state.add_friend.clone());
    let outcome = controller.submit(&raw).await;
    Ok(HttpResponse::Ok().json(outcome))
}
