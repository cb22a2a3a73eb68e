//! HTTP handlers module
//!
//! This module contains the axum handlers organized by area:
//! - Catalog handlers for institutes, departments, specializations, courses and cabinets
//! - Event handlers for scheduling and retake assignment
//! - Auth handlers for accounts and the retake lifecycle

pub mod auth;
pub mod catalog;
pub mod events;
pub mod health;

use axum::middleware;
use axum::routing::get;
use axum::Router;
use crate::middleware::{authenticate, log_requests};
use crate::state::AppState;

/// Assemble every route behind the authentication and request logging layers
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .merge(catalog::routes())
        .merge(events::routes())
        .merge(auth::routes())
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}
