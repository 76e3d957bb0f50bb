//! Handlers for the `/parties` resource.
//!
//! Every endpoint sits behind the parties page gate. The list degrades to an
//! empty result when the gate is closed; everything else answers 403.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use troupe_core::access::{list_scope, require_access, ListScope, Resource};
use troupe_core::duration::format_duration;
use troupe_core::error::CoreError;
use troupe_core::principal::Principal;
use troupe_core::status::PartyStatus;
use troupe_core::types::{DbId, Timestamp};
use troupe_core::visibility::is_visible_to;
use troupe_db::models::actor::ActorSummary;
use troupe_db::models::party::{PartyDetail, PartyInput, PartyPatch, PartyPatchInput};
use troupe_db::models::song::Song;
use troupe_db::repositories::{ActorRepo, PartyRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::principal::CurrentUser;
use crate::query::PartyListParams;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response type
// ---------------------------------------------------------------------------

/// A party as returned by the API.
#[derive(Debug, Serialize)]
pub struct PartyResponse {
    pub id: DbId,
    pub day: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// `HH:MM:SS`, prefixed with `D ` past one day.
    pub duration: String,
    pub place: String,
    pub event: String,
    pub number_of_actors: i32,
    pub actors: Vec<ActorSummary>,
    pub meeting_time: NaiveTime,
    pub meeting_date: NaiveDate,
    pub meeting_place: String,
    pub transport_vehicle: String,
    pub notes: String,
    pub camera_man: String,
    pub dress_details: String,
    pub songs: Vec<Song>,
    pub status: PartyStatus,
    pub status_display: &'static str,
    pub created_by: DbId,
    pub created_by_name: String,
    /// Whether the caller passes the row-level visibility rules.
    pub is_visible: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PartyResponse {
    pub fn new(detail: PartyDetail, viewer: &Principal) -> Self {
        let is_visible = is_visible_to(viewer, detail.party.status, &detail.actor_ids());
        let PartyDetail {
            party,
            actors,
            songs,
            created_by_name,
        } = detail;

        Self {
            id: party.id,
            day: party.day,
            date: party.date,
            time: party.time,
            duration: format_duration(party.duration_secs),
            place: party.place,
            event: party.event,
            number_of_actors: party.number_of_actors,
            actors,
            meeting_time: party.meeting_time,
            meeting_date: party.meeting_date,
            meeting_place: party.meeting_place,
            transport_vehicle: party.transport_vehicle,
            notes: party.notes,
            camera_man: party.camera_man,
            dress_details: party.dress_details,
            songs,
            status: party.status,
            status_display: party.status.display_name(),
            created_by: party.created_by,
            created_by_name,
            is_visible,
            created_at: party.created_at,
            updated_at: party.updated_at,
        }
    }
}

pub(crate) fn respond_all(details: Vec<PartyDetail>, viewer: &Principal) -> Vec<PartyResponse> {
    details
        .into_iter()
        .map(|d| PartyResponse::new(d, viewer))
        .collect()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/parties?status=&search=
pub async fn list(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(params): Query<PartyListParams>,
) -> AppResult<Json<Vec<PartyResponse>>> {
    if list_scope(&current.principal, Resource::Parties) == ListScope::Nothing {
        return Ok(Json(Vec::new()));
    }

    let filter = params.into_filter()?;
    let parties = PartyRepo::list(&state.pool, &filter).await?;
    let details = PartyRepo::load_details(&state.pool, parties).await?;
    Ok(Json(respond_all(details, &current.principal)))
}

/// POST /api/v1/parties
pub async fn create(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(input): Json<PartyInput>,
) -> AppResult<(StatusCode, Json<PartyResponse>)> {
    require_access(&current.principal, Resource::Parties)?;

    let input = input.into_new_party().inspect_err(log_invalid)?;
    if let Some(ref actor_ids) = input.actor_ids {
        ensure_actors_exist(&state, actor_ids).await?;
    }

    let party = PartyRepo::create(&state.pool, &input, current.user.id).await?;
    tracing::info!(party_id = party.id, user_id = current.user.id, "Party created");

    let detail = load_detail(&state, party.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(PartyResponse::new(detail, &current.principal)),
    ))
}

/// GET /api/v1/parties/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<PartyResponse>> {
    require_access(&current.principal, Resource::Parties)?;
    let detail = load_detail(&state, id).await?;
    Ok(Json(PartyResponse::new(detail, &current.principal)))
}

/// PUT /api/v1/parties/{id}
///
/// Full update: required fields are checked exactly as on create.
pub async fn update(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<DbId>,
    Json(input): Json<PartyInput>,
) -> AppResult<Json<PartyResponse>> {
    require_access(&current.principal, Resource::Parties)?;
    let input = input.into_new_party().inspect_err(log_invalid)?;
    apply_patch(&state, &current, id, PartyPatch::from(input)).await
}

/// PATCH /api/v1/parties/{id}
pub async fn patch(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<DbId>,
    Json(input): Json<PartyPatchInput>,
) -> AppResult<Json<PartyResponse>> {
    require_access(&current.principal, Resource::Parties)?;
    let patch = input.into_patch().inspect_err(log_invalid)?;
    apply_patch(&state, &current, id, patch).await
}

/// DELETE /api/v1/parties/{id}
pub async fn delete(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_access(&current.principal, Resource::Parties)?;

    if PartyRepo::delete(&state.pool, id).await? {
        tracing::info!(party_id = id, user_id = current.user.id, "Party deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Party",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn apply_patch(
    state: &AppState,
    current: &CurrentUser,
    id: DbId,
    patch: PartyPatch,
) -> AppResult<Json<PartyResponse>> {
    if let Some(ref actor_ids) = patch.actor_ids {
        ensure_actors_exist(state, actor_ids).await?;
    }

    PartyRepo::update(&state.pool, id, &patch)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Party",
            id,
        }))?;
    tracing::info!(
        party_id = id,
        user_id = current.user.id,
        replaced_songs = patch.songs.is_some(),
        "Party updated"
    );

    let detail = load_detail(state, id).await?;
    Ok(Json(PartyResponse::new(detail, &current.principal)))
}

async fn load_detail(state: &AppState, id: DbId) -> AppResult<PartyDetail> {
    PartyRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Party",
            id,
        }))
}

/// 404 on the first `actor_ids` entry that names no actor.
async fn ensure_actors_exist(state: &AppState, actor_ids: &[DbId]) -> AppResult<()> {
    match ActorRepo::find_missing_ids(&state.pool, actor_ids).await?.first() {
        Some(&id) => Err(AppError::Core(CoreError::NotFound {
            entity: "Actor",
            id,
        })),
        None => Ok(()),
    }
}

fn log_invalid(err: &CoreError) {
    if let CoreError::InvalidFields(fields) = err {
        let names: Vec<&str> = fields.keys().map(String::as_str).collect();
        tracing::warn!(fields = ?names, "Rejected party input");
    }
}
