//! Vending-machine catalog management API.
//!
//! Administrators curate a global catalog (machine categories, product
//! types, global products, machine templates); operators fork global
//! products into their company's catalog and manage pricing, commission and
//! customer-facing activation. Domain rules (dependency-checked deletes,
//! duplicate-import refusal, price-gated activation) are enforced in the
//! service layer so they hold for every caller.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod services;

use std::sync::Arc;

use axum::{routing::get, Router};
use sea_orm::DatabaseConnection;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub auth: Arc<auth::AuthService>,
    pub services: handlers::AppServices,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let auth = Arc::new(auth::AuthService::new(config.jwt_secret.clone()));
        let services = handlers::AppServices::new(db.clone());
        Self {
            db,
            config,
            auth,
            services,
        }
    }
}

/// Root router: banner, health and the versioned API
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "vending-catalog-api up" }))
        .route("/health", get(handlers::health::health_check))
        .nest("/api/v1", handlers::api_routes())
        .with_state(state)
}
