//! Bookbay Book Registry
//!
//! A small Rust REST API server exposing CRUD operations over a book
//! registry table, with an in-memory mirror of the table serving reads.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod mirror;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
