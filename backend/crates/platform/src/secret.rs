//! Secret key material
//!
//! Wrapper for process-wide secrets (signing keys, peppers). Redacted in
//! `Debug` output and wiped from memory on drop.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey(Vec<u8>);

impl SecretKey {
    /// Returns `None` for empty input; an empty key is never acceptable.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Option<Self> {
        let bytes = bytes.into();
        (!bytes.is_empty()).then_some(Self(bytes))
    }

    pub fn expose(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SecretKey").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_rejected() {
        assert!(SecretKey::new(Vec::new()).is_none());
        assert!(SecretKey::new("").is_none());
    }

    #[test]
    fn test_debug_redaction() {
        let key = SecretKey::new("super-secret").unwrap();
        assert_eq!(key.expose(), b"super-secret");
        assert!(!format!("{key:?}").contains("super-secret"));
    }
}
