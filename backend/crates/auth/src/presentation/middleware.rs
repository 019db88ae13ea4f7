//! Auth Middleware
//!
//! Runs the request gate in front of protected routes and applies its cookie
//! intent to the response once the handler (or the rejection) has produced
//! one.

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use platform::cookie::{CookieConfig, extract_bearer, extract_cookie};

use crate::application::config::AuthConfig;
use crate::application::{AuthenticateUseCase, Authenticated, CookieIntent};
use crate::presentation::handlers::{AuthAppState, AuthRepo};

/// Per-request record of what the gate decided
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestAuthState {
    /// The gate never ran (public route)
    #[default]
    NotAttempted,
    Attempted(CookieIntent),
}

/// Apply the recorded cookie intent to `response`
///
/// Does nothing unless authentication was attempted for this request.
pub fn finalize(mut response: Response, state: &RequestAuthState, cookie: &CookieConfig) -> Response {
    let RequestAuthState::Attempted(intent) = state else {
        return response;
    };

    let header_value = match intent {
        CookieIntent::NoChange => None,
        CookieIntent::DeleteCookie => cookie.delete_cookie_header(),
        CookieIntent::SetCookie(token) => cookie.set_cookie_header(token),
    };

    if let Some(value) = header_value {
        response.headers_mut().append(header::SET_COOKIE, value);
    }

    response
}

/// Credential presented with the request
///
/// The cookie wins; the Authorization header is only consulted when enabled.
pub fn extract_credential(headers: &HeaderMap, config: &AuthConfig) -> Option<String> {
    extract_cookie(headers, &config.cookie_name)
        .or_else(|| config.allow_bearer.then(|| extract_bearer(headers)).flatten())
}

/// Middleware that requires a valid access token
///
/// On success the [`AuthPrincipal`](crate::domain::AuthPrincipal) is placed
/// in the request extensions for handlers.
pub async fn require_access_token<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: AuthRepo,
{
    let credential = extract_credential(req.headers(), &state.config);

    let use_case = AuthenticateUseCase::new(
        state.repo.clone(),
        state.codec.clone(),
        state.clock.clone(),
        state.config.clone(),
    );

    let (response, auth_state) = match use_case.execute(credential.as_deref()).await {
        Ok(Authenticated { principal, intent }) => {
            req.extensions_mut().insert(principal);
            (next.run(req).await, RequestAuthState::Attempted(intent))
        }
        Err(err) => {
            let intent = CookieIntent::for_failure(&err);
            (err.into_response(), RequestAuthState::Attempted(intent))
        }
    };

    finalize(response, &auth_state, &state.config.cookie_config())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};
    use platform::secret::SecretKey;

    fn config() -> AuthConfig {
        AuthConfig::new(SecretKey::new("secret").unwrap())
    }

    fn set_cookies(response: &Response) -> Vec<String> {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_finalize_not_attempted_is_noop() {
        let response = StatusCode::OK.into_response();
        let response = finalize(
            response,
            &RequestAuthState::NotAttempted,
            &config().cookie_config(),
        );
        assert!(set_cookies(&response).is_empty());
    }

    #[test]
    fn test_finalize_no_change() {
        let response = finalize(
            StatusCode::OK.into_response(),
            &RequestAuthState::Attempted(CookieIntent::NoChange),
            &config().cookie_config(),
        );
        assert!(set_cookies(&response).is_empty());
    }

    #[test]
    fn test_finalize_set_cookie() {
        let response = finalize(
            StatusCode::OK.into_response(),
            &RequestAuthState::Attempted(CookieIntent::SetCookie("tok".into())),
            &config().cookie_config(),
        );
        let cookies = set_cookies(&response);
        assert_eq!(cookies.len(), 1);
        assert!(cookies[0].starts_with("access_token=tok"));
        assert!(cookies[0].contains("HttpOnly"));
        assert!(cookies[0].contains("SameSite=Lax"));
        assert!(cookies[0].contains("Max-Age=1800"));
    }

    #[test]
    fn test_finalize_delete_cookie() {
        let response = finalize(
            StatusCode::FORBIDDEN.into_response(),
            &RequestAuthState::Attempted(CookieIntent::DeleteCookie),
            &config().cookie_config(),
        );
        let cookies = set_cookies(&response);
        assert_eq!(cookies.len(), 1);
        assert!(cookies[0].starts_with("access_token=;"));
        assert!(cookies[0].contains("Max-Age=0"));
    }

    #[test]
    fn test_finalize_keeps_handler_cookies() {
        let mut response = StatusCode::OK.into_response();
        response
            .headers_mut()
            .append(header::SET_COOKIE, HeaderValue::from_static("other=1"));

        let response = finalize(
            response,
            &RequestAuthState::Attempted(CookieIntent::SetCookie("tok".into())),
            &config().cookie_config(),
        );
        assert_eq!(set_cookies(&response).len(), 2);
    }

    #[test]
    fn test_extract_credential_prefers_cookie() {
        let mut config = config();
        config.allow_bearer = true;

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("access_token=from-cookie"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(extract_credential(&headers, &config).as_deref(), Some("from-cookie"));

        headers.remove(header::COOKIE);
        assert_eq!(extract_credential(&headers, &config).as_deref(), Some("from-header"));
    }

    #[test]
    fn test_extract_credential_bearer_disabled_by_default() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer tok"));
        assert_eq!(extract_credential(&headers, &config()), None);
    }
}
