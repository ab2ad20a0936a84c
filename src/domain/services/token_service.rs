use crate::domain::models::{auth::{Claims, Identity}, user::User};
use crate::error::AppError;
use crate::config::Config;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;
use chrono::{Utc, Duration};
use tracing::debug;

pub const AUDIENCE: &str = "photo-booking-frontend";

/// Issues and verifies stateless, signed session tokens.
///
/// No other component decodes tokens: callers only ever see the opaque string
/// or the [`Identity`] returned by [`TokenService::verify`].
pub struct TokenService {
    issuer: String,
    ttl: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let encoding_key = EncodingKey::from_ed_pem(config.jwt_secret_key.as_bytes())
            .map_err(|e| AppError::InternalWithMsg(format!("Invalid JWT private key PEM: {}", e)))?;
        let decoding_key = DecodingKey::from_ed_pem(config.jwt_public_key.as_bytes())
            .map_err(|e| AppError::InternalWithMsg(format!("Invalid JWT public key PEM: {}", e)))?;

        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.set_audience(&[AUDIENCE]);
        validation.set_issuer(&[config.auth_issuer.as_str()]);

        Ok(Self {
            issuer: config.auth_issuer.clone(),
            ttl: Duration::hours(config.token_ttl_hours),
            encoding_key,
            decoding_key,
            validation,
        })
    }

    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            iss: self.issuer.clone(),
            sub: user.id.clone(),
            aud: AUDIENCE.to_string(),
            exp: (now + self.ttl).timestamp() as usize,
            iat: now.timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
            role: user.role,
        };
        self.sign(&claims)
    }

    /// Fails with `Unauthenticated` on a bad signature, an expired token or a malformed token.
    pub fn verify(&self, token: &str) -> Result<Identity, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!("Token rejected: {}", e);
                AppError::Unauthenticated("Invalid or expired token".into())
            })?;

        Ok(Identity {
            subject: token_data.claims.sub,
            role: token_data.claims.role,
        })
    }

    fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::new(Algorithm::EdDSA), claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!("JWT encoding failed: {}", e);
                AppError::Internal
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::user::Role;

    fn test_config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            port: 0,
            jwt_secret_key: include_str!("../../../tests/keys/test_private.pem").to_string(),
            jwt_public_key: include_str!("../../../tests/keys/test_public.pem").to_string(),
            auth_issuer: "test-issuer".to_string(),
            token_ttl_hours: 1,
            diagnostics: false,
            strict_booking_transitions: false,
        }
    }

    fn photographer() -> User {
        User::new("Jane".into(), "jane@example.com".into(), "hash".into(), Role::Photographer)
    }

    #[test]
    fn issued_tokens_verify_to_subject_and_role() {
        let service = TokenService::new(&test_config()).unwrap();
        let user = photographer();

        let token = service.issue(&user).unwrap();
        let identity = service.verify(&token).unwrap();

        assert_eq!(identity.subject, user.id);
        assert_eq!(identity.role, Role::Photographer);
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let service = TokenService::new(&test_config()).unwrap();
        let past = Utc::now() - Duration::hours(2);
        let claims = Claims {
            iss: "test-issuer".into(),
            sub: "someone".into(),
            aud: AUDIENCE.into(),
            exp: (past + Duration::minutes(5)).timestamp() as usize,
            iat: past.timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
            role: Role::Admin,
        };
        let token = service.sign(&claims).unwrap();

        assert!(matches!(service.verify(&token), Err(AppError::Unauthenticated(_))));
    }

    #[test]
    fn tampered_and_malformed_tokens_are_rejected() {
        let service = TokenService::new(&test_config()).unwrap();
        let token = service.issue(&photographer()).unwrap();

        let mut parts: Vec<&str> = token.split('.').collect();
        let forged_payload = "eyJzdWIiOiJhdHRhY2tlciJ9";
        parts[1] = forged_payload;
        let tampered = parts.join(".");

        assert!(matches!(service.verify(&tampered), Err(AppError::Unauthenticated(_))));
        assert!(matches!(service.verify("not-a-token"), Err(AppError::Unauthenticated(_))));
        assert!(matches!(service.verify(""), Err(AppError::Unauthenticated(_))));
    }

    #[test]
    fn tokens_from_another_issuer_are_rejected() {
        let service = TokenService::new(&test_config()).unwrap();
        let mut other_config = test_config();
        other_config.auth_issuer = "someone-else".into();
        let other = TokenService::new(&other_config).unwrap();

        let token = other.issue(&photographer()).unwrap();
        assert!(service.verify(&token).is_err());
    }
}
