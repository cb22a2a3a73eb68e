//! Authentication middleware
//!
//! Resolves the acting user from the `X-User-Id` header, which an upstream
//! authenticating proxy sets, and guards the admin-only areas. Handlers read
//! the resolved [`Actor`] from the request extensions.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;
use crate::services::Actor;
use crate::state::AppState;
use crate::utils::errors::{RetakeError, Result};
use crate::utils::helpers::parse_user_id;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Reachable without a signed-in user
const PUBLIC_PATHS: &[&str] = &["/health", "/auth/register"];

/// Only administrators may enter these areas
const ADMIN_PREFIXES: &[&str] = &[
    "/institutes",
    "/departments",
    "/specializations",
    "/courses",
    "/cabinets",
    "/events",
    "/retakes",
    "/untreatedStudents",
    "/auth/registerAdmin",
    "/auth/profiles",
    "/auth/profileInfo",
];

pub fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

pub fn requires_admin(path: &str) -> bool {
    ADMIN_PREFIXES.iter().any(|prefix| {
        path == *prefix || path.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Attach the acting user to the request or reject it
pub async fn authenticate(State(state): State<AppState>, mut request: Request, next: Next) -> Result<Response> {
    let path = request.uri().path().to_string();
    if is_public(&path) {
        return Ok(next.run(request).await);
    }

    let user_id = request
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_user_id)
        .ok_or(RetakeError::Unauthorized)?;

    let actor: Actor = state.services.access.resolve(user_id).await?;
    if requires_admin(&path) {
        state.services.access.require_admin(&actor)?;
    }

    debug!(user_id = actor.id, role = %actor.role, path = %path, "Request authenticated");
    request.extensions_mut().insert(actor);
    Ok(next.run(request).await)
}
