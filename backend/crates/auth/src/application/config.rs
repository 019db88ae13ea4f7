//! Application Configuration
//!
//! Configuration for the Auth application layer. Built once at startup and
//! shared as `Arc<AuthConfig>`; there is no default signing key.

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::secret::SecretKey;
use thiserror::Error;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Configuration errors (fatal at startup)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_SECRET_KEY must be set to a non-empty value")]
    MissingSigningKey,

    #[error("{name} has an invalid value: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Credential cookie name
    pub cookie_name: String,
    /// HS256 signing key for access tokens
    pub signing_key: SecretKey,
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// How long after login a session may still be refreshed
    pub session_window: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Also accept `Authorization: Bearer` when no cookie is present
    pub allow_bearer: bool,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<SecretKey>,
}

impl AuthConfig {
    pub const DEFAULT_COOKIE_NAME: &'static str = "access_token";
    pub const DEFAULT_ACCESS_TOKEN_MINUTES: u64 = 15;
    pub const DEFAULT_SESSION_MINUTES: u64 = 30;
    /// Upper bound for any configured lifetime (one year)
    pub const MAX_MINUTES: u64 = 366 * 24 * 60;

    /// Config with defaults around an explicit signing key
    pub fn new(signing_key: SecretKey) -> Self {
        Self {
            cookie_name: Self::DEFAULT_COOKIE_NAME.to_string(),
            signing_key,
            access_token_ttl: Duration::from_secs(Self::DEFAULT_ACCESS_TOKEN_MINUTES * 60),
            session_window: Duration::from_secs(Self::DEFAULT_SESSION_MINUTES * 60),
            cookie_secure: false,
            cookie_same_site: SameSite::Lax,
            allow_bearer: false,
            password_pepper: None,
        }
    }

    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup` (variable name -> value)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let signing_key = lookup("JWT_SECRET_KEY")
            .and_then(SecretKey::new)
            .ok_or(ConfigError::MissingSigningKey)?;

        let mut config = Self::new(signing_key);

        if let Some(name) = lookup("AUTH_COOKIE_NAME").filter(|n| !n.is_empty()) {
            config.cookie_name = name;
        }
        if let Some(minutes) = parse_minutes(&lookup, "ACCESS_TOKEN_EXPIRE_MINUTES")? {
            config.access_token_ttl = minutes;
        }
        if let Some(minutes) = parse_minutes(&lookup, "SESSION_EXPIRE_MINUTES")? {
            config.session_window = minutes;
        }
        if let Some(secure) = parse_bool(&lookup, "AUTH_COOKIE_SECURE")? {
            config.cookie_secure = secure;
        }
        if let Some(allow) = parse_bool(&lookup, "AUTH_ALLOW_BEARER")? {
            config.allow_bearer = allow;
        }
        config.password_pepper = lookup("PASSWORD_PEPPER").and_then(SecretKey::new);

        Ok(config)
    }

    pub fn access_token_ttl(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.access_token_ttl).unwrap_or(chrono::Duration::MAX)
    }

    pub fn session_window(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.session_window).unwrap_or(chrono::Duration::MAX)
    }

    /// Attributes of the credential cookie
    ///
    /// The cookie lives as long as the session can be refreshed.
    pub fn cookie_config(&self) -> CookieConfig {
        CookieConfig {
            name: self.cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.session_window.as_secs() as i64),
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_ref().map(SecretKey::expose)
    }
}

fn parse_minutes<F>(lookup: &F, name: &'static str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(name) else {
        return Ok(None);
    };
    match value.trim().parse::<u64>() {
        Ok(minutes) if (1..=AuthConfig::MAX_MINUTES).contains(&minutes) => {
            Ok(Some(Duration::from_secs(minutes * 60)))
        }
        _ => Err(ConfigError::InvalidValue { name, value }),
    }
}

fn parse_bool<F>(lookup: &F, name: &'static str) -> Result<Option<bool>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(name) else {
        return Ok(None);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(ConfigError::InvalidValue { name, value }),
    }
}
