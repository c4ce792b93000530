//! Credential verification.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use taskhub_core::config::AuthConfig;

use crate::error::AuthError;

use super::claims::Claims;

/// Validates credentials and produces verified [`Claims`].
///
/// Pure function of credential + current time + key material: no I/O,
/// no side effects.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a credential string.
    ///
    /// Checks:
    /// 1. Structural well-formedness
    /// 2. Signature validity
    /// 3. Expiration against current time
    /// 4. Role/tenant consistency (a platform admin bound to a tenant is
    ///    rejected as malformed even with a valid signature)
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AuthError::InvalidSignature
                    }
                    _ => AuthError::Malformed(e.to_string()),
                }
            })?;

        let claims = token_data.claims;
        if !claims.is_consistent() {
            return Err(AuthError::Malformed(
                "platform admin credential carries a tenant id".to_string(),
            ));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::JwtEncoder;

    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use taskhub_core::config::AuthConfig;
    use taskhub_core::types::{TenantId, UserId};
    use taskhub_entity::user::Role;
    use uuid::Uuid;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            token_ttl_hours: 24,
            leeway_seconds: 0,
        }
    }

    fn raw_token(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("encode")
    }

    #[test]
    fn test_roundtrip() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config);
        let decoder = JwtDecoder::new(&config);

        let user_id = UserId::new();
        let tenant_id = TenantId::new();
        let token = encoder
            .issue(user_id, Some(tenant_id), Role::Member)
            .expect("issue");

        let claims = decoder.decode(&token).expect("decode");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.tenant_id, Some(tenant_id));
        assert_eq!(claims.role, Role::Member);
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = test_config();
        let decoder = JwtDecoder::new(&config);

        let now = Utc::now();
        let claims = Claims {
            sub: UserId::new(),
            tenant_id: Some(TenantId::new()),
            role: Role::Member,
            iat: (now - chrono::Duration::hours(48)).timestamp(),
            exp: (now - chrono::Duration::hours(24)).timestamp(),
            jti: Uuid::new_v4(),
        };
        let token = raw_token(&claims, "test-secret");

        assert_eq!(decoder.decode(&token), Err(AuthError::Expired));
    }

    #[test]
    fn test_wrong_key_rejected() {
        let config = test_config();
        let decoder = JwtDecoder::new(&config);

        let now = Utc::now();
        let claims = Claims {
            sub: UserId::new(),
            tenant_id: None,
            role: Role::PlatformAdmin,
            iat: now.timestamp(),
            exp: (now + chrono::Duration::hours(1)).timestamp(),
            jti: Uuid::new_v4(),
        };
        let token = raw_token(&claims, "some-other-secret");

        assert_eq!(decoder.decode(&token), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn test_garbage_rejected_as_malformed() {
        let decoder = JwtDecoder::new(&test_config());
        assert!(matches!(
            decoder.decode("not.a.token"),
            Err(AuthError::Malformed(_))
        ));
    }

    #[test]
    fn test_platform_admin_with_tenant_is_malformed() {
        let config = test_config();
        let decoder = JwtDecoder::new(&config);

        // Valid signature, contradictory role/tenant pairing.
        let now = Utc::now();
        let claims = Claims {
            sub: UserId::new(),
            tenant_id: Some(TenantId::new()),
            role: Role::PlatformAdmin,
            iat: now.timestamp(),
            exp: (now + chrono::Duration::hours(1)).timestamp(),
            jti: Uuid::new_v4(),
        };
        let token = raw_token(&claims, "test-secret");

        assert!(matches!(
            decoder.decode(&token),
            Err(AuthError::Malformed(_))
        ));
    }
}
