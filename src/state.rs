/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::auth::password::CredentialVerifier;
use crate::services::auth::{JwtService, PrincipalResolver};

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<JwtService>,
    pub resolver: PrincipalResolver,
    pub verifier: Arc<dyn CredentialVerifier>,
}

impl AppState {
    pub fn new(
        auth: Arc<JwtService>,
        resolver: PrincipalResolver,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            auth,
            resolver,
            verifier,
        }
    }
}
