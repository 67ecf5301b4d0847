use axum::extract::{FromRequestParts, OriginalUri};
use axum::http::request::Parts;

use crate::error::UnauthorizedResponse;

use super::AuthCtx;

/// Handler で AuthCtx を受け取るための extractor。
///
/// middleware が AuthCtx を request.extensions() に insert 済みである前提。
/// 見つからない場合（匿名リクエストが保護ルートに到達した場合）は
/// 401 + JSON body を返す。
pub struct AuthCtxExtractor(pub AuthCtx);

impl<S> FromRequestParts<S> for AuthCtxExtractor
where
    S: Send + Sync,
{
    type Rejection = UnauthorizedResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(ctx) = parts.extensions.get::<AuthCtx>() {
            return Ok(AuthCtxExtractor(ctx.clone()));
        }

        // Inside a nest, parts.uri is stripped; the contract body reports the
        // path the client actually requested.
        let path = parts
            .extensions
            .get::<OriginalUri>()
            .map(|uri| uri.0.path().to_owned())
            .unwrap_or_else(|| parts.uri.path().to_owned());

        Err(UnauthorizedResponse::new(
            "Full authentication is required to access this resource",
            path,
        ))
    }
}
