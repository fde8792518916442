use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;

use crate::{api::state::AppState, error::AppError};

/// Gates the /admin surface behind the configured bearer token. An empty
/// configured token means the surface is disabled outright rather than
/// open.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let expected = state.settings.admin.api_token.as_bytes();
    if expected.is_empty() {
        return Err(AppError::Unauthorized);
    }

    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized)?;

    if !bool::from(token.as_bytes().ct_eq(expected)) {
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}
