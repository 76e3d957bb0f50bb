//! Handler for the dashboard statistics endpoint.
//!
//! Superadmins and staff users get the global figures. Other actors get
//! figures over their own assignments, or all zeros when their parties page
//! is closed.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use troupe_core::access::{dashboard_scope, DashboardScope};
use troupe_core::dashboard::{actor_stats, admin_stats, ActorStats, DashboardStats};
use troupe_db::repositories::{ActorRepo, DashboardRepo};

use crate::error::AppResult;
use crate::middleware::principal::CurrentUser;
use crate::state::AppState;

/// GET /api/v1/dashboard/stats
pub async fn stats(
    State(state): State<AppState>,
    current: CurrentUser,
) -> AppResult<Json<DashboardStats>> {
    let scope = dashboard_scope(&current.principal)?;
    let today = Utc::now().date_naive();

    let stats = match scope {
        DashboardScope::Global => {
            let total_actors = ActorRepo::count(&state.pool).await?;
            let parties = DashboardRepo::party_summaries(&state.pool).await?;
            let counts = DashboardRepo::actor_party_counts(&state.pool).await?;
            DashboardStats::Admin(admin_stats(total_actors, &parties, counts, today))
        }
        DashboardScope::Actor {
            include_parties: false,
            ..
        } => DashboardStats::Actor(ActorStats::empty()),
        DashboardScope::Actor { actor_id, .. } => {
            let parties = DashboardRepo::party_summaries_for_actor(&state.pool, actor_id).await?;
            DashboardStats::Actor(actor_stats(&parties, today))
        }
    };

    tracing::debug!(user_id = current.user.id, ?scope, "Dashboard stats computed");
    Ok(Json(stats))
}
