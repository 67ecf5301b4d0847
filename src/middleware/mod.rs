/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 */
pub mod bearer_auth;
pub mod http;
