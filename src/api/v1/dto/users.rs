/*
 * Responsibility
 * - users 系の response DTO (認証済み本人情報の返却)
 */
use serde::Serialize;

use crate::services::auth::Principal;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub admin: bool,
}

impl From<Principal> for UserResponse {
    fn from(p: Principal) -> Self {
        // The credential hash stays behind; it never serializes.
        Self {
            id: p.id,
            username: p.username,
            first_name: p.first_name,
            last_name: p.last_name,
            admin: p.admin,
        }
    }
}
