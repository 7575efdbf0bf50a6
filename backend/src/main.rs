//! Backend entry-point: wires the friend-request API and health probes.

use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::SameSite;
use actix_web::{web, App, HttpServer};
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use backend::config::{
    app_config_from_env, session_key_from_env, BuildMode, REMOTE_TIMEOUT,
};
use backend::inbound::http::friends::add_friend;
use backend::inbound::http::health::{live, ready, HealthState};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::users::me;
use backend::outbound::friends::FriendsHttpEndpoint;
use backend::outbound::upstash::{UpstashClient, UpstashUserStore};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let env = DefaultEnv::default();
    let config = app_config_from_env(&env).map_err(std::io::Error::other)?;
    let key = session_key_from_env(&env, BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;

    let add_friend_endpoint =
        FriendsHttpEndpoint::new(config.friends_api_base.clone(), REMOTE_TIMEOUT)
            .map_err(std::io::Error::other)?;
    let upstash = UpstashClient::new(
        config.upstash.rest_url.clone(),
        config.upstash.token.clone(),
        REMOTE_TIMEOUT,
    )
    .map_err(std::io::Error::other)?;
    let state = web::Data::new(HttpState::new(
        Arc::new(add_friend_endpoint),
        Arc::new(UpstashUserStore::new(upstash)),
    ));

    info!(
        bind_addr = %config.bind_addr,
        friends_api = %config.friends_api_base,
        google_client_id = %config.google.client_id,
        "configuration loaded"
    );

    let health_state = web::Data::new(HealthState::new());
    // Clone for server factory so readiness probe remains accessible.
    let server_health_state = health_state.clone();
    let cookie_secure = config.cookie_secure;
    let server = HttpServer::new(move || {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
            .cookie_name("session".into())
            .cookie_path("/".into())
            .cookie_secure(cookie_secure)
            .cookie_http_only(true)
            .cookie_same_site(SameSite::Lax)
            .build();

        let api = web::scope("/api/v1")
            .wrap(session)
            .service(add_friend)
            .service(me);

        App::new()
            .app_data(server_health_state.clone())
            .app_data(state.clone())
            .service(api)
            .service(ready)
            .service(live)
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    let result = server.run().await;
    // Fail liveness once the server has stopped accepting work.
    health_state.mark_unhealthy();
    result
}
