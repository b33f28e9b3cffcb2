//! Auth Middleware
//!
//! Bearer-token gate for protected routes. A successful check stores the
//! caller's [`AuthIdentity`] in the request extensions, where handlers pick
//! it up through the `AuthIdentity` extractor.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::Response;

use crate::application::token::{AuthIdentity, TokenService};
use crate::error::{AuthError, AuthResult};

const BEARER_PREFIX: &str = "Bearer ";

/// Middleware that requires a valid bearer token
pub async fn require_auth(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let identity = authenticate(&tokens, req.headers())?;
    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

/// Middleware that requires a valid bearer token held by an admin
pub async fn require_admin(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let identity = authenticate(&tokens, req.headers())?;
    if !identity.is_admin() {
        tracing::debug!(user_id = %identity.user_id, "Admin route refused");
        return Err(AuthError::AdminRequired);
    }
    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

/// Validate the `Authorization: Bearer <token>` header
pub fn authenticate(tokens: &TokenService, headers: &HeaderMap) -> AuthResult<AuthIdentity> {
    let value = match headers.get(header::AUTHORIZATION) {
        None => return Err(AuthError::MissingAuthHeader),
        Some(value) if value.is_empty() => return Err(AuthError::MissingAuthHeader),
        Some(value) => value.to_str().map_err(|_| AuthError::InvalidAuthHeader)?,
    };

    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::InvalidAuthHeader)?;

    tokens.validate(token)
}

impl<S> FromRequestParts<S> for AuthIdentity
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthIdentity>()
            .copied()
            .ok_or(AuthError::Unauthenticated)
    }
}
