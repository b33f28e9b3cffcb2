//! Token Service
//!
//! Issues and validates HS256 bearer tokens carrying `{user_id, role, iat, exp}`.
//! Validation is pure and in-process: there is no revocation list, so a token
//! stays valid until `exp` even if its user is deleted.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// Token payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub role: UserRole,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Identity asserted by a validated token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthIdentity {
    pub user_id: UserId,
    pub role: UserRole,
}

impl AuthIdentity {
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Signs and verifies tokens with one shared secret
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(&config.jwt_secret),
            decoding: DecodingKey::from_secret(&config.jwt_secret),
            ttl_secs: config.token_ttl_secs(),
        }
    }

    /// Issue a token valid from now for the configured TTL
    pub fn issue(&self, user_id: UserId, role: UserRole) -> AuthResult<String> {
        self.issue_at(user_id, role, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(&self, user_id: UserId, role: UserRole, now: DateTime<Utc>) -> AuthResult<String> {
        let iat = now.timestamp();
        let claims = Claims {
            user_id: user_id.value(),
            role,
            iat,
            exp: iat + self.ttl_secs,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(AuthError::TokenGeneration)
    }

    /// Validate a token against the current time
    pub fn validate(&self, token: &str) -> AuthResult<AuthIdentity> {
        self.validate_at(token, Utc::now())
    }

    /// Validate signature, structure and claims; expired when `now >= exp`.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<AuthIdentity> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below with zero leeway and an inclusive bound
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let claims = decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(reason = ?e.kind(), "Token rejected");
                AuthError::InvalidToken
            })?;

        if now.timestamp() >= claims.exp {
            return Err(AuthError::TokenExpired);
        }

        Ok(AuthIdentity {
            user_id: UserId::new(claims.user_id),
            role: claims.role,
        })
    }
}
