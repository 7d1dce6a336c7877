//! HS256 bearer token verification.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use medivault_core::config::AuthConfig;
use medivault_core::error::AppError;

use super::claims::Claims;

/// Verifies identity tokens against the shared secret.
#[derive(Clone)]
pub struct TokenVerifier {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    /// Creates a new verifier from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;

        // A configured issuer or audience must also be present in the token.
        if !config.issuer.is_empty() {
            validation.set_issuer(&[config.issuer.as_str()]);
            validation.required_spec_claims.insert("iss".to_string());
        }
        if config.audience.is_empty() {
            validation.validate_aud = false;
        } else {
            validation.set_audience(&[config.audience.as_str()]);
            validation.required_spec_claims.insert("aud".to_string());
        }

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decode and validate a token string.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::authentication("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::authentication("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::authentication("Invalid token signature")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidIssuer
                    | jsonwebtoken::errors::ErrorKind::InvalidAudience => {
                        AppError::authentication("Token was not issued for this service")
                    }
                    jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(claim) => {
                        AppError::authentication(format!("Token is missing the {claim} claim"))
                    }
                    _ => AppError::authentication(format!("Token validation failed: {e}")),
                }
            })?;

        if token_data.claims.sub.trim().is_empty() {
            return Err(AppError::authentication("Token has no subject"));
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};

    use super::*;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".into(),
            issuer: String::new(),
            audience: String::new(),
            leeway_seconds: 0,
        }
    }

    fn token(secret: &str, sub: &str, exp_in: TimeDelta) -> String {
        token_for(secret, sub, exp_in, None, None)
    }

    fn token_for(
        secret: &str,
        sub: &str,
        exp_in: TimeDelta,
        iss: Option<&str>,
        aud: Option<&str>,
    ) -> String {
        let claims = Claims {
            sub: sub.into(),
            email: Some("alex@example.com".into()),
            exp: (Utc::now() + exp_in).timestamp(),
            iat: Some(Utc::now().timestamp()),
            iss: iss.map(String::from),
            aud: aud.map(String::from),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token() {
        let verifier = TokenVerifier::new(&config());
        let claims = verifier
            .verify(&token("test-secret", "user-42", TimeDelta::hours(1)))
            .unwrap();
        assert_eq!(claims.user_id(), "user-42");
        assert_eq!(claims.email.as_deref(), Some("alex@example.com"));
    }

    #[test]
    fn test_rejects_wrong_secret_and_expired() {
        let verifier = TokenVerifier::new(&config());
        assert!(
            verifier
                .verify(&token("other-secret", "user-42", TimeDelta::hours(1)))
                .is_err()
        );
        assert!(
            verifier
                .verify(&token("test-secret", "user-42", TimeDelta::hours(-1)))
                .is_err()
        );
        assert!(verifier.verify("not.a.token").is_err());
    }

    #[test]
    fn test_rejects_blank_subject() {
        let verifier = TokenVerifier::new(&config());
        assert!(
            verifier
                .verify(&token("test-secret", " ", TimeDelta::hours(1)))
                .is_err()
        );
    }

    #[test]
    fn test_issuer_is_checked_when_configured() {
        let mut cfg = config();
        cfg.issuer = "https://id.example.com".into();
        let verifier = TokenVerifier::new(&cfg);
        assert!(
            verifier
                .verify(&token("test-secret", "user-42", TimeDelta::hours(1)))
                .is_err()
        );
    }

    fn scoped_config() -> AuthConfig {
        let mut cfg = config();
        cfg.issuer = "https://id.example.com".into();
        cfg.audience = "medivault".into();
        cfg
    }

    #[test]
    fn test_scoped_token_is_accepted() {
        let verifier = TokenVerifier::new(&scoped_config());
        let claims = verifier
            .verify(&token_for(
                "test-secret",
                "user-42",
                TimeDelta::hours(1),
                Some("https://id.example.com"),
                Some("medivault"),
            ))
            .unwrap();
        assert_eq!(claims.user_id(), "user-42");
    }

    #[test]
    fn test_missing_issuer_or_audience_is_rejected() {
        let verifier = TokenVerifier::new(&scoped_config());
        let no_iss = token_for(
            "test-secret",
            "user-42",
            TimeDelta::hours(1),
            None,
            Some("medivault"),
        );
        let no_aud = token_for(
            "test-secret",
            "user-42",
            TimeDelta::hours(1),
            Some("https://id.example.com"),
            None,
        );
        assert!(verifier.verify(&no_iss).is_err());
        assert!(verifier.verify(&no_aud).is_err());
    }

    #[test]
    fn test_wrong_audience_is_rejected() {
        let verifier = TokenVerifier::new(&scoped_config());
        let token = token_for(
            "test-secret",
            "user-42",
            TimeDelta::hours(1),
            Some("https://id.example.com"),
            Some("another-app"),
        );
        assert!(verifier.verify(&token).is_err());
    }
}
