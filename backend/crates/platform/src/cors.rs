//! CORS Origin Negotiation
//!
//! A single allow-list policy applied to every route. The decision itself is
//! the pure [`negotiate`] function; [`cors_middleware`] only maps that
//! decision onto request/response headers.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Method, Request, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;

use crate::config::Environment;

/// Methods announced on every response
pub const ALLOWED_METHODS: &str = "GET,POST,PUT,DELETE,OPTIONS";

/// Request headers announced on every response
pub const ALLOWED_HEADERS: &str = "Content-Type,Authorization";

/// Allow-list policy, built once at startup
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    /// Comma-separated origins, or `*`
    pub allowed_origins: String,
    pub environment: Environment,
}

impl CorsPolicy {
    pub fn new(allowed_origins: impl Into<String>, environment: Environment) -> Self {
        Self {
            allowed_origins: allowed_origins.into(),
            environment,
        }
    }
}

/// Outcome of a successful negotiation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsDecision {
    /// Request carried no `Origin` header
    NoOrigin,
    /// Value to echo in `Access-Control-Allow-Origin` (`*` or the exact origin)
    Allowed(String),
}

impl CorsDecision {
    /// Credentials are never allowed together with the wildcard
    pub fn allows_credentials(&self) -> bool {
        matches!(self, Self::Allowed(origin) if origin != "*")
    }
}

/// Decide whether `origin` may talk to this API under `policy`.
///
/// ## Examples
/// ```rust
/// use platform::config::Environment;
/// use platform::cors::{CorsDecision, CorsPolicy, negotiate};
///
/// let policy = CorsPolicy::new("https://a.com, https://b.com", Environment::Production);
/// let decision = negotiate(&policy, Some("https://b.com")).unwrap();
/// assert_eq!(decision, CorsDecision::Allowed("https://b.com".to_string()));
/// ```
pub fn negotiate(policy: &CorsPolicy, origin: Option<&str>) -> Result<CorsDecision, AppError> {
    // An empty header counts as absent
    let Some(origin) = origin.filter(|o| !o.is_empty()) else {
        return Ok(CorsDecision::NoOrigin);
    };

    let allowed = policy.allowed_origins.trim();
    if allowed.is_empty() {
        return Err(AppError::internal(
            "CORS misconfiguration: ALLOWED_ORIGINS is empty",
        ));
    }

    if allowed == "*" {
        if policy.environment.is_production() {
            return Err(AppError::internal(
                "CORS misconfiguration: ALLOWED_ORIGINS cannot be * in production",
            ));
        }
        return Ok(CorsDecision::Allowed("*".to_string()));
    }

    allowed
        .split(',')
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty())
        .find(|candidate| *candidate == origin)
        .map(|matched| CorsDecision::Allowed(matched.to_string()))
        .ok_or_else(|| AppError::forbidden("CORS: Origin not allowed"))
}

/// Axum middleware applying [`negotiate`] to every request.
///
/// Preflight (`OPTIONS`) requests are answered here with `200` and an empty
/// body; every other request continues to the router and gets the CORS
/// headers added to its response.
pub async fn cors_middleware(
    State(policy): State<Arc<CorsPolicy>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let origin = match req.headers().get(header::ORIGIN).map(HeaderValue::to_str) {
        None => None,
        Some(Ok(value)) => Some(value.to_owned()),
        Some(Err(_)) => {
            tracing::debug!("CORS origin is not valid UTF-8");
            return AppError::forbidden("CORS: Origin not allowed").into_response();
        }
    };

    let decision = match negotiate(&policy, origin.as_deref()) {
        Ok(decision) => decision,
        Err(err) => {
            if err.is_server_error() {
                tracing::error!(error = %err, "CORS policy misconfigured");
            } else {
                tracing::debug!(origin = ?origin, "CORS origin rejected");
            }
            return err.into_response();
        }
    };

    let is_preflight = req.method() == Method::OPTIONS;

    let mut response = if is_preflight {
        StatusCode::OK.into_response()
    } else {
        next.run(req).await
    };

    apply_headers(response.headers_mut(), &decision);
    response
}

fn apply_headers(headers: &mut HeaderMap, decision: &CorsDecision) {
    if let CorsDecision::Allowed(origin) = decision {
        let Ok(origin_value) = HeaderValue::from_str(origin) else {
            return;
        };
        headers.insert(header::VARY, HeaderValue::from_static("Origin"));
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin_value);
        if decision.allows_credentials() {
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            );
        }
    }

    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::routing::get;
    use tower::ServiceExt;

    fn policy(origins: &str, environment: Environment) -> CorsPolicy {
        CorsPolicy::new(origins, environment)
    }

    #[test]
    fn test_no_origin() {
        let p = policy("", Environment::Production);
        assert_eq!(negotiate(&p, None).unwrap(), CorsDecision::NoOrigin);
    }

    #[test]
    fn test_exact_match_echoes_single_origin() {
        let p = policy("https://a.com, https://b.com", Environment::Production);
        let decision = negotiate(&p, Some("https://b.com")).unwrap();
        assert_eq!(decision, CorsDecision::Allowed("https://b.com".to_string()));
        assert!(decision.allows_credentials());
    }

    #[test]
    fn test_prefix_is_not_a_match() {
        let p = policy("https://a.com", Environment::Development);
        let err = negotiate(&p, Some("https://a.com.evil.net")).unwrap_err();
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.message(), "CORS: Origin not allowed");
    }

    #[test]
    fn test_empty_allow_list_is_misconfiguration() {
        let p = policy("   ", Environment::Development);
        let err = negotiate(&p, Some("https://a.com")).unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.message(), "CORS misconfiguration: ALLOWED_ORIGINS is empty");
    }

    #[test]
    fn test_wildcard_in_production_is_misconfiguration() {
        let p = policy("*", Environment::Production);
        let err = negotiate(&p, Some("https://x.com")).unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert_eq!(
            err.message(),
            "CORS misconfiguration: ALLOWED_ORIGINS cannot be * in production"
        );
    }

    #[test]
    fn test_wildcard_in_development() {
        let p = policy(" * ", Environment::Development);
        let decision = negotiate(&p, Some("https://x.com")).unwrap();
        assert_eq!(decision, CorsDecision::Allowed("*".to_string()));
        assert!(!decision.allows_credentials());
    }

    #[test]
    fn test_empty_origin_counts_as_absent() {
        let p = policy("https://a.com", Environment::Production);
        assert_eq!(negotiate(&p, Some("")).unwrap(), CorsDecision::NoOrigin);
    }

    #[test]
    fn test_trailing_comma_adds_no_candidate() {
        let p = policy("https://a.com,", Environment::Development);
        assert_eq!(negotiate(&p, Some("")).unwrap(), CorsDecision::NoOrigin);
        assert_eq!(
            negotiate(&p, Some("https://a.com")).unwrap(),
            CorsDecision::Allowed("https://a.com".to_string())
        );

        let p = policy("https://a.com, ,https://b.com", Environment::Development);
        assert_eq!(
            negotiate(&p, Some("https://b.com")).unwrap(),
            CorsDecision::Allowed("https://b.com".to_string())
        );
        assert_eq!(negotiate(&p, Some(" ")).unwrap_err().status_code(), 403);
    }

    fn app(p: CorsPolicy) -> Router {
        Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(axum::middleware::from_fn_with_state(
                Arc::new(p),
                cors_middleware,
            ))
    }

    fn request(method: Method, origin: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri("/ping");
        if let Some(origin) = origin {
            builder = builder.header(header::ORIGIN, origin);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_middleware_allowed_origin_headers() {
        let app = app(policy("https://a.com,https://b.com", Environment::Production));
        let res = app
            .oneshot(request(Method::GET, Some("https://a.com")))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let h = res.headers();
        assert_eq!(h[header::ACCESS_CONTROL_ALLOW_ORIGIN], "https://a.com");
        assert_eq!(h[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(h[header::VARY], "Origin");
        assert_eq!(h[header::ACCESS_CONTROL_ALLOW_METHODS], ALLOWED_METHODS);
        assert_eq!(h[header::ACCESS_CONTROL_ALLOW_HEADERS], ALLOWED_HEADERS);
    }

    #[tokio::test]
    async fn test_middleware_preflight_short_circuits() {
        let app = app(policy("https://a.com", Environment::Development));
        let res = app
            .oneshot(request(Method::OPTIONS, Some("https://a.com")))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_middleware_no_origin_only_methods_and_headers() {
        let app = app(policy("https://a.com", Environment::Development));
        let res = app.oneshot(request(Method::GET, None)).await.unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let h = res.headers();
        assert!(h.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
        assert!(h.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).is_none());
        assert_eq!(h[header::ACCESS_CONTROL_ALLOW_METHODS], ALLOWED_METHODS);
    }

    #[tokio::test]
    async fn test_middleware_wildcard_omits_credentials() {
        let app = app(policy("*", Environment::Development));
        let res = app
            .oneshot(request(Method::GET, Some("https://x.com")))
            .await
            .unwrap();

        let h = res.headers();
        assert_eq!(h[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(h.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).is_none());
    }

    #[tokio::test]
    async fn test_middleware_rejected_origin() {
        let app = app(policy("https://a.com", Environment::Development));
        let res = app
            .oneshot(request(Method::GET, Some("https://evil.com")))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        let body = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_middleware_empty_origin_passes_through() {
        let app = app(policy("https://a.com,", Environment::Development));
        let res = app
            .oneshot(request(Method::GET, Some("")))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let h = res.headers();
        assert!(h.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
        assert!(h.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).is_none());
    }

    #[tokio::test]
    async fn test_middleware_undecodable_origin_rejected() {
        let app = app(policy("https://a.com", Environment::Development));
        let req = Request::builder()
            .method(Method::GET)
            .uri("/ping")
            .header(
                header::ORIGIN,
                HeaderValue::from_bytes(b"https://a.com\xff").unwrap(),
            )
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert!(res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }
}
