//! Handlers for the `/actors` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use troupe_core::access::{can_view_actor_parties, list_scope, require_access, ListScope, Resource};
use troupe_core::capabilities::CapabilitySet;
use troupe_core::error::{CoreError, FieldErrors};
use troupe_core::types::DbId;
use troupe_core::validation::{collect_field_errors, validate_fields};
use troupe_core::visibility::is_party_visible;
use troupe_db::models::actor::{ActorSummary, CreateActor, PermissionFlags, UpdateActor};
use troupe_db::models::user::CreateUser;
use troupe_db::repositories::{ActorRepo, PartyRepo};
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::handlers::party::{respond_all, PartyResponse};
use crate::middleware::principal::CurrentUser;
use crate::query::ActorListParams;
use crate::state::AppState;

/// Request body for `POST /actors`: login credentials plus the profile.
///
/// Omitted permission flags take their defaults.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateActorRequest {
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_staff: bool,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub family: String,
    #[validate(range(min = 0, max = 150))]
    pub age: i32,
    #[validate(length(min = 1, max = 100))]
    pub role: String,
    #[serde(flatten)]
    pub flags: PermissionFlags,
}

impl CreateActorRequest {
    /// Field checks plus the password policy, reported together.
    fn check(&self, password_min_length: usize) -> Result<(), CoreError> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => collect_field_errors(&e),
        };
        if let Err(msg) = validate_password_strength(&self.password, password_min_length) {
            errors.entry("password".into()).or_default().push(msg);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidFields(errors))
        }
    }
}

/// GET /api/v1/actors?name=
pub async fn list(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(params): Query<ActorListParams>,
) -> AppResult<Json<Vec<ActorSummary>>> {
    if list_scope(&current.principal, Resource::Actors) == ListScope::Nothing {
        return Ok(Json(Vec::new()));
    }
    let actors = ActorRepo::list(&state.pool, params.search()).await?;
    Ok(Json(actors))
}

/// POST /api/v1/actors
///
/// Creates the backing user and the profile in one transaction. A taken
/// username surfaces as 409 through the `uq_users_username` constraint.
pub async fn create(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(input): Json<CreateActorRequest>,
) -> AppResult<(StatusCode, Json<ActorSummary>)> {
    require_access(&current.principal, Resource::Actors)?;
    input.check(state.config.password_min_length)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let user = CreateUser {
        username: input.username,
        email: input.email,
        password_hash,
        first_name: input.name.clone(),
        last_name: input.family.clone(),
        is_staff: input.is_staff,
    };
    let profile = CreateActor {
        name: input.name,
        family: input.family,
        age: input.age,
        role: input.role,
        capabilities: input.flags.apply_to(CapabilitySet::defaults()),
    };

    let actor = ActorRepo::create(&state.pool, &user, &profile).await?;
    tracing::info!(actor_id = actor.id, user_id = actor.user_id, "Actor created");

    let summary = find_summary(&state, actor.id).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// GET /api/v1/actors/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ActorSummary>> {
    require_access(&current.principal, Resource::Actors)?;
    Ok(Json(find_summary(&state, id).await?))
}

/// PUT /api/v1/actors/{id}
///
/// Only the fields present in the body change.
pub async fn update(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateActor>,
) -> AppResult<Json<ActorSummary>> {
    require_access(&current.principal, Resource::Actors)?;
    validate_fields(&input)?;

    ActorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Actor",
            id,
        }))?;
    tracing::info!(actor_id = id, user_id = current.user.id, "Actor updated");

    Ok(Json(find_summary(&state, id).await?))
}

/// DELETE /api/v1/actors/{id}
///
/// Removes the backing user; the profile and its assignments cascade.
pub async fn delete(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_access(&current.principal, Resource::Actors)?;

    if ActorRepo::delete(&state.pool, id).await? {
        tracing::info!(actor_id = id, user_id = current.user.id, "Actor deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Actor",
            id,
        }))
    }
}

/// GET /api/v1/actors/{id}/parties
///
/// The parties this actor is assigned to and allowed to see under its own
/// flags.
pub async fn list_parties(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<PartyResponse>>> {
    require_access(&current.principal, Resource::Parties)?;
    if !can_view_actor_parties(&current.principal, id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only view your own parties".into(),
        )));
    }

    let actor = ActorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Actor",
            id,
        }))?;
    let access = actor.access();

    let parties = PartyRepo::list_for_actor(&state.pool, id).await?;
    let details = PartyRepo::load_details(&state.pool, parties).await?;
    let visible = details
        .into_iter()
        .filter(|d| is_party_visible(&access, d.party.status, &d.actor_ids()))
        .collect();

    Ok(Json(respond_all(visible, &current.principal)))
}

async fn find_summary(state: &AppState, id: DbId) -> AppResult<ActorSummary> {
    ActorRepo::find_summary(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Actor",
            id,
        }))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn request(password: &str) -> CreateActorRequest {
        serde_json::from_value(serde_json::json!({
            "username": "mina",
            "password": password,
            "name": "Mina",
            "family": "Rostami",
            "age": 27,
            "role": "Singer",
            "can_access_parties": true,
        }))
        .unwrap()
    }

    #[test]
    fn flags_default_unless_given() {
        let req = request("long-enough-pass");
        let caps = req.flags.apply_to(CapabilitySet::defaults());
        assert!(caps.contains(troupe_core::capabilities::Capability::AccessParties));
        assert!(caps.contains(troupe_core::capabilities::Capability::AccessDashboard));
        assert!(!req.is_staff);
        assert_eq!(req.email, "");
    }

    #[test]
    fn weak_password_is_a_field_error() {
        let err = request("short").check(8).unwrap_err();
        let fields = assert_matches!(err, CoreError::InvalidFields(f) => f);
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn blank_name_and_bad_age_reported_together() {
        let mut req = request("long-enough-pass");
        req.name = String::new();
        req.age = -1;
        let fields = assert_matches!(req.check(8), Err(CoreError::InvalidFields(f)) => f);
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("age"));
        assert!(!fields.contains_key("password"));
    }
}
