pub mod actor;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod party;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                     login (public)
/// /auth/refresh                   refresh (public)
/// /auth/logout                    logout (requires auth)
/// /auth/me                        current user and actor profile
///
/// /actors                         list, create
/// /actors/{id}                    get, update, delete
/// /actors/{id}/parties            parties visible to that actor
///
/// /parties                        list (status, search), create
/// /parties/{id}                   get, full update, partial update, delete
///
/// /dashboard/stats                global or per-actor statistics
/// ```
///
/// Every route except login and refresh requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, refresh, logout, me).
        .nest("/auth", auth::router())
        // Actor profiles, gated by the actors page flag.
        .nest("/actors", actor::router())
        // Parties, gated by the parties page flag.
        .nest("/parties", party::router())
        .nest("/dashboard", dashboard::router())
}
