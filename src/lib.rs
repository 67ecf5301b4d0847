/*
 * Responsibility
 * - モジュール公開 (integration tests から build_router/state を使えるように lib 化)
 */
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
