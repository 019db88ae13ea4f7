//! HS256 JWT access-token codec.
//!
//! Expiry is checked here against the caller-supplied `now` rather than by
//! `jsonwebtoken`, so the clock stays injectable and there is no leeway.

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kernel::id::SessionId;
use platform::secret::SecretKey;
use serde::{Deserialize, Serialize};

use crate::domain::token::{ACCESS_TOKEN_KIND, AccessClaims, ExpiryCheck, TokenCodec, TokenError};
use crate::domain::value_object::principal_id::PrincipalId;

/// Wire form of [`AccessClaims`]
#[derive(Debug, Serialize, Deserialize)]
struct JwtClaims {
    /// Principal id
    sub: i64,
    role: String,
    session_id: String,
    token_type: String,
    /// Expiry (Unix seconds)
    exp: i64,
    /// Issued at (Unix seconds)
    iat: i64,
}

pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtCodec {
    pub fn new(secret: &SecretKey) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.expose()),
            decoding_key: DecodingKey::from_secret(secret.expose()),
            validation,
        }
    }
}

impl TokenCodec for JwtCodec {
    fn encode(&self, claims: &AccessClaims) -> Result<String, TokenError> {
        let wire = JwtClaims {
            sub: claims.principal_id.get(),
            role: claims.role.clone(),
            session_id: claims.session_id.to_string(),
            token_type: ACCESS_TOKEN_KIND.to_string(),
            exp: claims.expires_at.timestamp(),
            iat: claims.issued_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &wire, &self.encoding_key)
            .map_err(|e| TokenError::Invalid(e.to_string()))
    }

    fn decode(
        &self,
        token: &str,
        expiry: ExpiryCheck,
        now: DateTime<Utc>,
    ) -> Result<AccessClaims, TokenError> {
        let wire = decode::<JwtClaims>(token, &self.decoding_key, &self.validation)
            .map_err(map_jwt_error)?
            .claims;

        if wire.token_type != ACCESS_TOKEN_KIND {
            return Err(TokenError::KindMismatch(wire.token_type));
        }

        let session_id: SessionId = wire
            .session_id
            .parse()
            .map_err(|_| TokenError::Malformed)?;

        let expires_at = DateTime::from_timestamp(wire.exp, 0).ok_or(TokenError::Malformed)?;
        let issued_at = DateTime::from_timestamp(wire.iat, 0).ok_or(TokenError::Malformed)?;

        let claims = AccessClaims {
            principal_id: PrincipalId::new(wire.sub),
            role: wire.role,
            session_id,
            issued_at,
            expires_at,
        };

        if expiry == ExpiryCheck::Enforce && claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

fn map_jwt_error(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        JwtErrorKind::InvalidSignature => TokenError::SignatureInvalid,
        JwtErrorKind::ExpiredSignature => TokenError::Expired,
        JwtErrorKind::InvalidToken
        | JwtErrorKind::Base64(_)
        | JwtErrorKind::Json(_)
        | JwtErrorKind::Utf8(_)
        | JwtErrorKind::MissingRequiredClaim(_) => TokenError::Malformed,
        other => TokenError::Invalid(format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn codec(secret: &str) -> JwtCodec {
        JwtCodec::new(&SecretKey::new(secret).unwrap())
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 14, 15, 0, 0).unwrap()
    }

    fn claims(principal: i64, role: &str) -> AccessClaims {
        AccessClaims::issue(
            PrincipalId::new(principal),
            role,
            SessionId::new(),
            t0(),
            Duration::minutes(2),
        )
    }

    #[test]
    fn test_roundtrip_preserves_claims() {
        let codec = codec("test-secret-that-is-long-enough-for-hmac");
        for (principal, role) in [(42, "user"), (1, "admin"), (i64::MAX, "")] {
            let original = claims(principal, role);
            let token = codec.encode(&original).unwrap();
            let decoded = codec.decode(&token, ExpiryCheck::Enforce, t0()).unwrap();
            assert_eq!(decoded, original);
        }
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let codec = codec("secret");
        let original = claims(42, "user");
        assert_eq!(codec.encode(&original).unwrap(), codec.encode(&original).unwrap());
    }

    #[test]
    fn test_expired_token_is_tagged_expired() {
        let codec = codec("secret");
        let token = codec.encode(&claims(42, "user")).unwrap();

        let later = t0() + Duration::minutes(3);
        assert_eq!(
            codec.decode(&token, ExpiryCheck::Enforce, later),
            Err(TokenError::Expired)
        );

        // Same token still readable when expiry is skipped
        let decoded = codec.decode(&token, ExpiryCheck::Skip, later).unwrap();
        assert_eq!(decoded.principal_id, PrincipalId::new(42));
    }

    #[test]
    fn test_wrong_key_is_signature_invalid() {
        let token = codec("secret-alpha").encode(&claims(1, "user")).unwrap();
        let result = codec("secret-bravo").decode(&token, ExpiryCheck::Skip, t0());
        assert_eq!(result, Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let codec = codec("secret");
        let token = codec.encode(&claims(1, "user")).unwrap();

        let forged = codec.encode(&claims(1, "admin")).unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let spliced = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

        assert_eq!(
            codec.decode(&spliced, ExpiryCheck::Skip, t0()),
            Err(TokenError::SignatureInvalid)
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        let codec = codec("secret");
        for garbage in ["", "not-a-jwt", "a.b", "a.b.c"] {
            assert_eq!(
                codec.decode(garbage, ExpiryCheck::Skip, t0()),
                Err(TokenError::Malformed),
                "{garbage:?}"
            );
        }
    }

    #[test]
    fn test_refresh_kind_is_rejected() {
        let secret = "secret";
        let wire = JwtClaims {
            sub: 42,
            role: "user".into(),
            session_id: SessionId::new().to_string(),
            token_type: "refresh".into(),
            exp: (t0() + Duration::minutes(2)).timestamp(),
            iat: t0().timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &wire,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        assert_eq!(
            codec(secret).decode(&token, ExpiryCheck::Enforce, t0()),
            Err(TokenError::KindMismatch("refresh".into()))
        );
    }

    #[test]
    fn test_bad_session_id_is_malformed() {
        let secret = "secret";
        let wire = JwtClaims {
            sub: 42,
            role: "user".into(),
            session_id: "not-a-uuid".into(),
            token_type: ACCESS_TOKEN_KIND.into(),
            exp: (t0() + Duration::minutes(2)).timestamp(),
            iat: t0().timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &wire,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        assert_eq!(
            codec(secret).decode(&token, ExpiryCheck::Enforce, t0()),
            Err(TokenError::Malformed)
        );
    }
}
