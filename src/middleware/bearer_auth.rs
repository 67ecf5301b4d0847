//! Bearer トークンの検証 (ヘッダ抽出 → 検証 → principal 解決)
//!
//! - 成功時は AuthCtx を request extensions に載せ、handler/extractor が読む
//! - どの失敗モードでも chain は止めない（匿名で下流へ）。401 を書くのは
//!   保護ルート側の extractor rejection の責務
use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::services::auth::ResolveError;
use crate::state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// `/api/v1/*` に認証を掛けるための middleware を適用する。
///
/// 例：
/// ```ignore
/// let v1 = api::v1::routes();
/// let v1 = middleware::bearer_auth::apply(v1, state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, bearer_auth))
}

async fn bearer_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    // A request never enters the filter carrying an identity.
    req.extensions_mut().remove::<AuthCtx>();

    if let Some(ctx) = authenticate(&state, req.headers()).await {
        req.extensions_mut().insert(ctx);
    }

    next.run(req).await
}

/// Header → token → subject → principal. Any failure means anonymous.
async fn authenticate(state: &AppState, headers: &HeaderMap) -> Option<AuthCtx> {
    let header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())?;

    let token = header.strip_prefix(BEARER_PREFIX)?;

    if !state.auth.validate(token) {
        return None;
    }

    let subject = match state.auth.extract_subject(token) {
        Ok(subject) => subject,
        Err(err) => {
            tracing::warn!(error = %err, "validated token refused to decode");
            return None;
        }
    };

    match state.resolver.resolve(&subject).await {
        Ok(principal) => Some(AuthCtx::new(principal)),
        Err(ResolveError::NotFound { .. }) => {
            // The token is genuine but its subject is gone (user deleted).
            tracing::warn!(%subject, "token subject no longer resolvable; continuing anonymous");
            None
        }
        Err(ResolveError::Store(err)) => {
            tracing::error!(%subject, error = %err, "user lookup failed; continuing anonymous");
            None
        }
    }
}
