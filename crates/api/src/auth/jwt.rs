//! JWT access-token generation and validation.
//!
//! Tokens are HS256-signed and carry a [`Claims`] payload identifying
//! either a player or a staff member. Staff tokens additionally carry the
//! role used by the RBAC extractors.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use pitboss_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Principal kind for player tokens.
pub const KIND_PLAYER: &str = "player";
/// Principal kind for staff tokens.
pub const KIND_STAFF: &str = "staff";

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the principal's internal database id.
    pub sub: DbId,
    /// `"player"` or `"staff"`.
    pub kind: String,
    /// Display name.
    pub name: String,
    /// Staff role (`"floor"`, `"manager"`, `"admin"`); absent on player
    /// tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Membership card number; absent on staff tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for revocation / audit.
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in hours (default: 24).
    pub token_expiry_hours: i64,
}

/// Default token expiry in hours.
const DEFAULT_EXPIRY_HOURS: i64 = 24;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var            | Required | Default |
    /// |--------------------|----------|---------|
    /// | `JWT_SECRET`       | **yes**  | --      |
    /// | `JWT_EXPIRY_HOURS` | no       | `24`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let token_expiry_hours: i64 = std::env::var("JWT_EXPIRY_HOURS")
            .unwrap_or_else(|_| DEFAULT_EXPIRY_HOURS.to_string())
            .parse()
            .expect("JWT_EXPIRY_HOURS must be a valid i64");

        Self {
            secret,
            token_expiry_hours,
        }
    }
}

/// Generate a token for a player account.
pub fn generate_player_token(
    player_id: DbId,
    card_number: &str,
    name: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    sign(Claims {
        sub: player_id,
        kind: KIND_PLAYER.to_string(),
        name: name.to_string(),
        role: None,
        card_number: Some(card_number.to_string()),
        exp: 0,
        iat: 0,
        jti: String::new(),
    }, config)
}

/// Generate a token for a staff account.
pub fn generate_staff_token(
    staff_id: DbId,
    name: &str,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    sign(Claims {
        sub: staff_id,
        kind: KIND_STAFF.to_string(),
        name: name.to_string(),
        role: Some(role.to_string()),
        card_number: None,
        exp: 0,
        iat: 0,
        jti: String::new(),
    }, config)
}

/// Stamp issue/expiry/jti onto the claims and sign them.
fn sign(mut claims: Claims, config: &JwtConfig) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    claims.iat = now;
    claims.exp = now + config.token_expiry_hours * 3600;
    claims.jti = Uuid::new_v4().to_string();

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate a token's signature and expiry, returning its claims.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            token_expiry_hours: 24,
        }
    }

    #[test]
    fn player_token_round_trips() {
        let config = test_config();
        let token = generate_player_token(7, "12345", "David N", &config).unwrap();
        let claims = validate_token(&token, &config).unwrap();

        assert_eq!(claims.sub, 7);
        assert_eq!(claims.kind, KIND_PLAYER);
        assert_eq!(claims.card_number.as_deref(), Some("12345"));
        assert!(claims.role.is_none());
    }

    #[test]
    fn staff_token_carries_role() {
        let config = test_config();
        let token = generate_staff_token(3, "Alice B", "admin", &config).unwrap();
        let claims = validate_token(&token, &config).unwrap();

        assert_eq!(claims.kind, KIND_STAFF);
        assert_eq!(claims.role.as_deref(), Some("admin"));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let config = test_config();
        let token = generate_staff_token(3, "Alice B", "floor", &config).unwrap();

        let other = JwtConfig {
            secret: "different-secret".to_string(),
            token_expiry_hours: 24,
        };
        assert!(validate_token(&token, &other).is_err());
    }
}
