//! Session profile endpoint.
//!
//! ```text
//! GET /api/v1/me
//! ```

use actix_web::{get, web};

use crate::domain::{Error, SessionUser};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Return the stored record for the signed-in user.
#[get("/me")]
pub async fn me(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<SessionUser>> {
    let user_id = session.require_user_id()?;
    let user = state
        .users
        .fetch_user(&user_id)
        .await
        .map_err(|error| Error::internal(format!("user lookup failed: {error}")))?;
    user.map(web::Json)
        .ok_or_else(|| Error::not_found("user record not found"))
}
