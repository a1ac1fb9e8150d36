use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{token, TokenError};
use crate::database::users::UserRepository;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated identity attached to the request after the bearer token
/// is verified and the user row confirmed to exist.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: i32,
    pub email: String,
    pub name: String,
}

/// Bearer-token authentication middleware for protected routes.
///
/// Missing header, wrong scheme and empty token are all treated as "no
/// token". A verified token whose subject no longer exists is rejected
/// the same way, so a stale token cannot act for a removed account.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(request.headers())
        .ok_or_else(|| ApiError::unauthorized("Access token required. Format: Authorization: Bearer <token>"))?;

    let claims = token::verify(token, &state.config.security.jwt_secret).map_err(|err| {
        match err {
            TokenError::Expired => ApiError::unauthorized("Token expired"),
            _ => ApiError::unauthorized("Invalid or expired token"),
        }
    })?;

    let user = UserRepository::new(state.pool.clone())
        .find_by_id(claims.sub)
        .await?
        .ok_or_else(|| {
            tracing::warn!("token subject {} no longer exists", claims.sub);
            ApiError::unauthorized("User not found")
        })?;

    request.extensions_mut().insert(CurrentUser {
        id: user.id,
        email: user.email,
        name: user.name,
    });

    Ok(next.run(request).await)
}

/// Extract the token from a `Bearer <token>` Authorization header.
fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(axum::http::header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::AUTHORIZATION;

    fn headers_with(value: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(v) = value {
            headers.insert(AUTHORIZATION, v.parse().unwrap());
        }
        headers
    }

    #[test]
    fn missing_header_yields_no_token() {
        assert_eq!(extract_bearer(&headers_with(None)), None);
    }

    #[test]
    fn non_bearer_scheme_yields_no_token() {
        assert_eq!(extract_bearer(&headers_with(Some("Basic abc123"))), None);
    }

    #[test]
    fn empty_bearer_token_yields_no_token() {
        assert_eq!(extract_bearer(&headers_with(Some("Bearer "))), None);
        assert_eq!(extract_bearer(&headers_with(Some("Bearer    "))), None);
    }

    #[test]
    fn well_formed_header_yields_token() {
        assert_eq!(
            extract_bearer(&headers_with(Some("Bearer abc.def.ghi"))),
            Some("abc.def.ghi")
        );
    }
}
