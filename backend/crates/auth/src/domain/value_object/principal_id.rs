use serde::{Deserialize, Serialize};
use std::fmt;

/// Principal identifier
///
/// Owned by the principal store; the auth core only carries it around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(i64);

impl PrincipalId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for PrincipalId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_plain_number() {
        let id = PrincipalId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let back: PrincipalId = serde_json::from_str("42").unwrap();
        assert_eq!(back, id);
    }
}
