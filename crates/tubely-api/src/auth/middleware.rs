use crate::auth::jwt::{bearer_token, JwtService};
use crate::auth::models::AuthUser;
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: JwtService,
}

/// Resolve the bearer token to a user and attach it to the request.
///
/// Runs before any handler of a protected route, so a request without a valid
/// credential never reaches the body.
pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let user_id = match bearer_token(header).and_then(|token| auth_state.jwt.validate_token(token)) {
        Ok(user_id) => user_id,
        Err(e) => {
            tracing::debug!(
                error = %e,
                path = %request.uri().path(),
                "Authentication failed"
            );
            return HttpAppError::from(e).into_response();
        }
    };

    request.extensions_mut().insert(AuthUser { user_id });

    next.run(request).await
}
