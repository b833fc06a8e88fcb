/// Token issuance and verification
///
/// Session tokens are HS256 JWTs signed with the server-held secret. Nothing
/// is stored server-side; validity is signature + expiry + issuer.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::claims::Claims;
use crate::configuration::JwtSettings;
use crate::error::{AppError, AuthError};
use crate::models::User;

/// Issue a signed session token for a user
///
/// # Errors
/// Returns an internal error if signing fails
pub fn issue_token(user: &User, config: &JwtSettings) -> Result<String, AppError> {
    let claims = Claims::for_user(user, config.access_token_expiry, config.issuer.clone());

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

/// Verify a session token and return its claims
///
/// # Errors
/// `AuthError::InvalidToken` if the token is malformed, tampered with,
/// expired, or issued by someone else
pub fn verify_token(token: &str, config: &JwtSettings) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);
    // expired means expired; no clock tolerance
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!("JWT validation error: {}", e);
        AuthError::InvalidToken
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn get_test_config() -> JwtSettings {
        JwtSettings {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 3600,
            issuer: "test".to_string(),
        }
    }

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: None,
            email: "test@example.com".to_string(),
            password_hash: "unused".to_string(),
            token_version: 1,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let config = get_test_config();
        let user = test_user();

        let token = issue_token(&user, &config).expect("Failed to issue token");
        let claims = verify_token(&token, &config).expect("Failed to verify token");

        assert_eq!(claims.user_id().unwrap(), user.id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.ver, 1);
        assert_eq!(claims.iss, "test");
    }

    #[test]
    fn test_malformed_token() {
        let config = get_test_config();
        assert_eq!(
            verify_token("invalid.token.here", &config),
            Err(AuthError::InvalidToken)
        );
        assert!(verify_token("", &config).is_err());
    }

    #[test]
    fn test_tampered_token() {
        let config = get_test_config();
        let token = issue_token(&test_user(), &config).expect("Failed to issue token");

        let tampered = format!("{}X", token);
        assert!(verify_token(&tampered, &config).is_err());
    }

    #[test]
    fn test_wrong_secret() {
        let config = get_test_config();
        let token = issue_token(&test_user(), &config).expect("Failed to issue token");

        let other = JwtSettings {
            secret: "a-completely-different-secret-value".to_string(),
            ..config
        };
        assert_eq!(verify_token(&token, &other), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_wrong_issuer() {
        let mut config = get_test_config();
        let token = issue_token(&test_user(), &config).expect("Failed to issue token");

        config.issuer = "wrong-issuer".to_string();
        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_expired_token() {
        let config = JwtSettings {
            access_token_expiry: -3600,
            ..get_test_config()
        };
        let token = issue_token(&test_user(), &config).expect("Failed to issue token");

        assert_eq!(verify_token(&token, &config), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_token_expired_seconds_ago_is_rejected() {
        let config = JwtSettings {
            access_token_expiry: -5,
            ..get_test_config()
        };
        let token = issue_token(&test_user(), &config).expect("Failed to issue token");

        assert_eq!(verify_token(&token, &config), Err(AuthError::InvalidToken));
    }
}
