//! Environment-driven application configuration.
//!
//! Settings are read once at startup and validated eagerly so a
//! misconfigured deployment fails before binding the listener rather
//! than on the first request. Blank values count as missing: an empty
//! credential is as useless as an absent one.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use actix_web::cookie::Key;
use mockable::Env;
use tracing::warn;
use url::Url;
use zeroize::Zeroize;

pub const FRIENDS_API_BASE_URL_ENV: &str = "FRIENDS_API_BASE_URL";
pub const GOOGLE_CLIENT_ID_ENV: &str = "GOOGLE_CLIENT_ID";
pub const GOOGLE_CLIENT_SECRET_ENV: &str = "GOOGLE_CLIENT_SECRET";
pub const UPSTASH_REDIS_REST_URL_ENV: &str = "UPSTASH_REDIS_REST_URL";
pub const UPSTASH_REDIS_REST_TOKEN_ENV: &str = "UPSTASH_REDIS_REST_TOKEN";
pub const BIND_ADDR_ENV: &str = "BIND_ADDR";
pub const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
pub const SESSION_KEY_FILE_ENV: &str = "SESSION_KEY_FILE";

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const URL_EXPECTED: &str = "an absolute http(s) URL";
const ADDR_EXPECTED: &str = "a socket address such as 0.0.0.0:8080";

/// Timeout applied to every outbound HTTP request.
pub const REMOTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Build mode for configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate a missing session key and warn instead.
    Debug,
    /// Release builds require a persisted session key.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// OAuth client credentials for the Google provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Connection settings for the Upstash Redis REST API.
#[derive(Debug, Clone)]
pub struct UpstashConfig {
    pub rest_url: Url,
    pub token: String,
}

/// Validated application settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listener address for the HTTP server.
    pub bind_addr: SocketAddr,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// Base URL of the remote friends API.
    pub friends_api_base: Url,
    pub google: GoogleCredentials,
    pub upstash: UpstashConfig,
}

/// Errors raised while validating configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is missing or blank.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The session key file exists but is too short for release builds.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
}

/// Build the application configuration from environment variables.
///
/// # Errors
///
/// Returns a [`ConfigError`] when a required variable is missing or
/// blank, or when a value fails to parse.
pub fn app_config_from_env<E: Env>(env: &E) -> Result<AppConfig, ConfigError> {
    Ok(AppConfig {
        bind_addr: bind_addr_from_env(env)?,
        cookie_secure: cookie_secure_from_env(env)?,
        friends_api_base: url_from_env(env, FRIENDS_API_BASE_URL_ENV)?,
        google: google_credentials_from_env(env)?,
        upstash: UpstashConfig {
            rest_url: url_from_env(env, UPSTASH_REDIS_REST_URL_ENV)?,
            token: required(env, UPSTASH_REDIS_REST_TOKEN_ENV)?,
        },
    })
}

/// Read the Google OAuth client pair, rejecting blank values.
///
/// # Errors
///
/// Returns [`ConfigError::MissingEnv`] when either credential is
/// absent or blank.
pub fn google_credentials_from_env<E: Env>(env: &E) -> Result<GoogleCredentials, ConfigError> {
    Ok(GoogleCredentials {
        client_id: required(env, GOOGLE_CLIENT_ID_ENV)?,
        client_secret: required(env, GOOGLE_CLIENT_SECRET_ENV)?,
    })
}

fn required<E: Env>(env: &E, name: &'static str) -> Result<String, ConfigError> {
    env.string(name)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::MissingEnv { name })
}

fn url_from_env<E: Env>(env: &E, name: &'static str) -> Result<Url, ConfigError> {
    let value = required(env, name)?;
    let parsed = Url::parse(&value).map_err(|_| ConfigError::InvalidEnv {
        name,
        value: value.clone(),
        expected: URL_EXPECTED,
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnv {
            name,
            value,
            expected: URL_EXPECTED,
        });
    }
    Ok(parsed)
}

fn bind_addr_from_env<E: Env>(env: &E) -> Result<SocketAddr, ConfigError> {
    let value = match env.string(BIND_ADDR_ENV) {
        Some(value) if !value.trim().is_empty() => value,
        _ => DEFAULT_BIND_ADDR.to_owned(),
    };
    value.parse().map_err(|_| ConfigError::InvalidEnv {
        name: BIND_ADDR_ENV,
        value,
        expected: ADDR_EXPECTED,
    })
}

fn cookie_secure_from_env<E: Env>(env: &E) -> Result<bool, ConfigError> {
    match env.string(COOKIE_SECURE_ENV) {
        // Secure cookies unless explicitly disabled for local work.
        None => Ok(true),
        Some(value) => parse_bool(&value).ok_or(ConfigError::InvalidEnv {
            name: COOKIE_SECURE_ENV,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

/// Load the session signing key from the configured key file.
///
/// Debug builds fall back to an ephemeral key when the file is
/// unreadable or too short; release builds refuse to start.
///
/// # Errors
///
/// Returns a [`ConfigError`] when the key file cannot be read in
/// release mode or is shorter than the required minimum.
pub fn session_key_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Key, ConfigError> {
    let key_path = env
        .string(SESSION_KEY_FILE_ENV)
        .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_owned());
    let path = PathBuf::from(key_path);

    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            // Short keys must never reach `Key::derive_from`, which
            // panics below its own minimum.
            if length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                if mode.is_debug() {
                    warn!(
                        path = %path.display(),
                        length,
                        "session key too short; using temporary key (dev only)"
                    );
                    return Ok(Key::generate());
                }
                return Err(ConfigError::KeyTooShort {
                    path,
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) => {
            if mode.is_debug() {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary session key (dev only)"
                );
                Ok(Key::generate())
            } else {
                Err(ConfigError::KeyRead {
                    path,
                    source: error,
                })
            }
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
