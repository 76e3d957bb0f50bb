//! Resolves the request principal from the database.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use troupe_core::error::CoreError;
use troupe_core::principal::Principal;
use troupe_db::models::actor::Actor;
use troupe_db::models::user::User;
use troupe_db::repositories::{ActorRepo, UserRepo};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated user together with its actor profile, if any.
///
/// Flags are read on every request so a permission change applies to tokens
/// issued before it.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub actor: Option<Actor>,
    pub principal: Principal,
}

impl CurrentUser {
    pub fn new(user: User, actor: Option<Actor>) -> Self {
        let principal = match &actor {
            None => Principal::SuperAdmin { user_id: user.id },
            Some(actor) => Principal::Actor {
                user_id: user.id,
                is_staff: user.is_staff,
                access: actor.access(),
            },
        };
        Self {
            user,
            actor,
            principal,
        }
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;

        let user = UserRepo::find_by_id(&state.pool, auth.user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "User no longer exists or is inactive".into(),
                ))
            })?;
        let actor = ActorRepo::find_by_user_id(&state.pool, user.id).await?;

        Ok(CurrentUser::new(user, actor))
    }
}
