/*
 * Responsibility
 * - GET /me: 認証済み本人情報の返却
 * - AuthCtx は extractor 経由で受け取る (未認証は extractor が 401 を返す)
 */
use axum::Json;

use crate::api::v1::dto::users::UserResponse;
use crate::api::v1::extractors::AuthCtxExtractor;

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<UserResponse> {
    Json(UserResponse::from(ctx.principal))
}
