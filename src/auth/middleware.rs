use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::jwt::{verify_token, TokenType};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::store::RecordStore;
use crate::AppState;

/// The resolved owner every protected handler scopes its store calls to.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
}

/// Reads the bearer token and resolves its owner, or `Unauthorized`.
pub fn resolve_owner(headers: &HeaderMap, config: &Config) -> AppResult<AuthUser> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::Unauthorized)?;

    let token_data = verify_token(token, config)?;

    if token_data.claims.token_type != TokenType::Access {
        return Err(AppError::Unauthorized);
    }

    Ok(AuthUser {
        id: token_data.claims.sub,
    })
}

pub async fn require_auth<S: RecordStore>(
    State(state): State<AppState<S>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_user = resolve_owner(req.headers(), &state.config)?;

    req.extensions_mut().insert(auth_user);
    Ok(next.run(req).await)
}
