/*
 * Responsibility
 * - POST /auth/login: 資格情報の確認 → アクセストークン発行
 * - 失敗理由 (ユーザー不在/パスワード不一致) は応答から区別できないこと
 */
use axum::{Json, extract::State};
use chrono::Utc;

use crate::api::v1::dto::auth::{JwtResponse, LoginRequest};
use crate::error::AppError;
use crate::services::auth::ResolveError;
use crate::state::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<JwtResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_LOGIN_REQUEST", msg))?;

    let principal = match state.resolver.resolve(&req.username).await {
        Ok(principal) => principal,
        Err(ResolveError::NotFound { .. }) => return Err(AppError::BadCredentials),
        Err(ResolveError::Store(err)) => {
            tracing::error!(error = %err, "user lookup failed during login");
            return Err(AppError::Internal);
        }
    };

    if !state.verifier.verify(&req.password, &principal.password_hash) {
        return Err(AppError::BadCredentials);
    }

    let token = state
        .auth
        .issue(&principal.username, Utc::now())
        .map_err(|err| {
            tracing::error!(error = %err, "failed to sign access token");
            AppError::Internal
        })?;

    Ok(Json(JwtResponse {
        token,
        token_type: "Bearer",
        id: principal.id,
        username: principal.username,
        first_name: principal.first_name,
        last_name: principal.last_name,
        admin: principal.admin,
    }))
}
