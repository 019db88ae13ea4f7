//! Email Value Object
//!
//! Login identifier. Normalized to lowercase; only the shape is checked.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum email length (RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    pub fn new(email: impl Into<String>) -> AppResult<Self> {
        let email = email.into().trim().to_lowercase();

        if email.is_empty() {
            return Err(AppError::bad_request("Email cannot be empty"));
        }

        if email.len() > EMAIL_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Email must be at most {} characters",
                EMAIL_MAX_LENGTH
            )));
        }

        let valid = match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
            }
            None => false,
        };
        if !valid {
            return Err(AppError::bad_request("Invalid email format"));
        }

        Ok(Self(email))
    }

    /// Trusted value from the database
    ///
    /// Stored addresses may predate normalization, so only case and
    /// whitespace are fixed up; the shape is not re-checked.
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_case_and_whitespace() {
        let email = Email::new("  Alice@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn test_stored_mixed_case_matches_login_input() {
        let stored = Email::from_db("Alice@Example.com");
        assert_eq!(stored, Email::new("alice@example.com").unwrap());
        assert_eq!(stored.as_str(), "alice@example.com");
    }

    #[test]
    fn test_rejects_bad_shapes() {
        for bad in ["", "no-at-sign", "@example.com", "a@b", "a@@b.com", "a@.com", "a@b.com."] {
            assert!(Email::new(bad).is_err(), "{bad:?} should be rejected");
        }
    }
}
