pub mod jwt;
pub mod password;
pub mod principal;

pub use jwt::JwtService;
pub use principal::{Principal, PrincipalResolver, ResolveError};
