/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health, /auth/login は匿名可。/me は AuthCtx extractor が守る
 *   (bearer_auth middleware 自体は全ルートに掛かるが、拒否はしない)
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::v1::handlers::{auth::login, health::health, users::me};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/auth/login", post(login))
        .route("/me", get(me))
}
