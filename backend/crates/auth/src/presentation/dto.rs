//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::value_object::principal_id::PrincipalId;

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub principal_id: PrincipalId,
    pub role: String,
}

// ============================================================================
// Authenticate
// ============================================================================

/// Identity of the verified caller
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateResponse {
    pub principal_id: PrincipalId,
    pub role: String,
}

// ============================================================================
// Misc
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// GET /get-cookie when the cookie is present
#[derive(Debug, Clone, Serialize)]
pub struct CookieValueResponse {
    pub this_cookie: String,
}
