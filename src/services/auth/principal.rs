use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::repos::error::RepoError;
use crate::repos::user_repo::{UserRecord, UserStore};

/// Fully resolved identity for one authenticated request.
///
/// Constructed fresh on every resolution and owned by that request's context;
/// never cached across requests.
#[derive(Clone)]
pub struct Principal {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub admin: bool,
    /// Opaque credential hash. Only the credential verifier reads this.
    pub password_hash: String,
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the credential hash
        f.debug_struct("Principal")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("admin", &self.admin)
            .finish()
    }
}

// Identity is the database id; profile fields may drift between lookups.
impl PartialEq for Principal {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Principal {}

impl From<UserRecord> for Principal {
    fn from(u: UserRecord) -> Self {
        Self {
            id: u.id,
            username: u.username,
            first_name: u.first_name,
            last_name: u.last_name,
            admin: u.admin,
            password_hash: u.password_hash,
        }
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no user found with username: {username}")]
    NotFound { username: String },
    #[error(transparent)]
    Store(#[from] RepoError),
}

/// Maps a validated token subject to a [`Principal`] via the user store.
#[derive(Clone)]
pub struct PrincipalResolver {
    users: Arc<dyn UserStore>,
}

impl PrincipalResolver {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Look up `username` (case-sensitive exact match).
    ///
    /// `NotFound` is an expected outcome: the bearer middleware maps it to an
    /// anonymous request instead of failing the pipeline.
    pub async fn resolve(&self, username: &str) -> Result<Principal, ResolveError> {
        let record = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| ResolveError::NotFound {
                username: username.to_owned(),
            })?;

        Ok(Principal::from(record))
    }
}
