use axum::{
    extract::{FromRef, FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::api::AppState;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Claims carried by a session token.
///
/// Tokens are minted by the identity provider in production; in tests
/// [`JwtKeys::sign`] produces them directly.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: usize,
    pub iat: usize,
}

/// Signing and verification keys for session tokens.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Sign a session token for `user_id`, valid for `ttl_secs`.
    ///
    /// # Errors
    ///
    /// Returns the underlying `jsonwebtoken` error if encoding fails.
    pub fn sign(
        &self,
        user_id: Uuid,
        ttl_secs: i64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            iat: usize::try_from(now).unwrap_or(0),
            exp: usize::try_from(now + ttl_secs).unwrap_or(0),
        };
        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Verify a session token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns the underlying `jsonwebtoken` error for malformed, expired,
    /// or wrongly-signed tokens.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}

/// Extractor for routes that require an authenticated session.
pub struct SessionUser(pub Uuid);

impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        session_from_parts(parts, state).map(Self).ok_or_else(unauthorized)
    }
}

/// Extractor that never rejects: resolves to `None` when the request carries
/// no valid session. Routes using it degrade gracefully instead of failing —
/// an unauthenticated scan still returns product facts, it just persists
/// nothing.
pub struct MaybeSessionUser(pub Option<Uuid>);

impl<S> FromRequestParts<S> for MaybeSessionUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(session_from_parts(parts, state)))
    }
}

fn session_from_parts<S>(parts: &Parts, state: &S) -> Option<Uuid>
where
    JwtKeys: FromRef<S>,
{
    let keys = JwtKeys::from_ref(state);
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?;
    match keys.verify(token) {
        Ok(claims) => Some(claims.sub),
        Err(e) => {
            warn!(error = %e, "invalid or expired session token");
            None
        }
    }
}

#[derive(Debug, Serialize)]
struct AuthErrorBody {
    error: AuthError,
}

#[derive(Debug, Serialize)]
struct AuthError {
    code: &'static str,
    message: &'static str,
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(AuthErrorBody {
            error: AuthError {
                code: "unauthorized",
                message: "missing or invalid session token",
            },
        }),
    )
        .into_response()
}
