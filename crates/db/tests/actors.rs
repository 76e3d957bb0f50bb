//! Integration tests for actor profiles and their backing users.

use sqlx::PgPool;
use troupe_core::capabilities::{Capability, CapabilitySet};
use troupe_db::models::actor::{CreateActor, PermissionFlags, UpdateActor};
use troupe_db::models::user::CreateUser;
use troupe_db::repositories::{ActorRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_user(username: &str, first: &str, last: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "hash".to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        is_staff: false,
    }
}

fn new_actor(name: &str, family: &str, role: &str) -> CreateActor {
    CreateActor {
        name: name.to_string(),
        family: family.to_string(),
        age: 30,
        role: role.to_string(),
        capabilities: CapabilitySet::defaults(),
    }
}

async fn seed(pool: &PgPool, username: &str, name: &str, family: &str, role: &str) -> i64 {
    ActorRepo::create(
        pool,
        &new_user(username, name, family),
        &new_actor(name, family, role),
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_stores_default_flags(pool: PgPool) {
    let actor = ActorRepo::create(
        &pool,
        &new_user("sara", "Sara", "Karimi"),
        &new_actor("Sara", "Karimi", "Singer"),
    )
    .await
    .unwrap();

    assert_eq!(actor.capabilities(), CapabilitySet::defaults());
    assert!(actor.can_view_upcoming_parties);
    assert!(actor.can_access_dashboard);
    assert!(!actor.can_access_parties);

    let user = UserRepo::find_by_id(&pool, actor.user_id).await.unwrap().unwrap();
    assert_eq!(user.username, "sara");
    assert!(!user.is_staff);

    let by_user = ActorRepo::find_by_user_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(by_user.id, actor.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_username_rolls_back_actor(pool: PgPool) {
    seed(&pool, "dup", "A", "B", "Dancer").await;

    let err = ActorRepo::create(&pool, &new_user("dup", "C", "D"), &new_actor("C", "D", "Dancer"))
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("uq_users_username"));

    assert_eq!(ActorRepo::count(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_search_matches_name_family_and_role(pool: PgPool) {
    seed(&pool, "u1", "Nima", "Ahmadi", "Drummer").await;
    seed(&pool, "u2", "Leila", "Nimavar", "Singer").await;
    seed(&pool, "u3", "Omid", "Rahimi", "Host").await;

    let all = ActorRepo::list(&pool, None).await.unwrap();
    let names: Vec<_> = all.iter().map(|a| a.actor.name.as_str()).collect();
    assert_eq!(names, vec!["Leila", "Nima", "Omid"]);
    assert!(all.iter().all(|a| a.parties_count == 0));

    let hits = ActorRepo::list(&pool, Some("nima")).await.unwrap();
    assert_eq!(hits.len(), 2);

    let by_role = ActorRepo::list(&pool, Some("HOST")).await.unwrap();
    assert_eq!(by_role.len(), 1);
    assert_eq!(by_role[0].username, "u3");

    let none = ActorRepo::list(&pool, Some("%")).await.unwrap();
    assert!(none.is_empty(), "wildcards are matched literally");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_applies_only_given_fields(pool: PgPool) {
    let id = seed(&pool, "upd", "Old", "Name", "Host").await;

    let input = UpdateActor {
        name: Some("New".into()),
        flags: PermissionFlags {
            can_access_parties: Some(true),
            can_access_dashboard: Some(false),
            ..Default::default()
        },
        ..Default::default()
    };
    let actor = ActorRepo::update(&pool, id, &input).await.unwrap().unwrap();

    assert_eq!(actor.name, "New");
    assert_eq!(actor.family, "Name");
    assert_eq!(actor.role, "Host");
    assert!(actor.capabilities().contains(Capability::AccessParties));
    assert!(!actor.capabilities().contains(Capability::AccessDashboard));
    assert!(actor.capabilities().contains(Capability::ViewUpcomingParties));

    let user = UserRepo::find_by_id(&pool, actor.user_id).await.unwrap().unwrap();
    assert_eq!(user.first_name, "New");
    assert_eq!(user.last_name, "Name");

    let missing = ActorRepo::update(&pool, 999_999, &input).await.unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_removes_backing_user(pool: PgPool) {
    let id = seed(&pool, "gone", "Gone", "Soon", "Host").await;
    let user_id = ActorRepo::find_by_id(&pool, id).await.unwrap().unwrap().user_id;

    assert!(ActorRepo::delete(&pool, id).await.unwrap());
    assert!(ActorRepo::find_by_id(&pool, id).await.unwrap().is_none());
    assert!(UserRepo::find_by_id(&pool, user_id).await.unwrap().is_none());

    assert!(!ActorRepo::delete(&pool, id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_find_missing_ids(pool: PgPool) {
    let a = seed(&pool, "m1", "A", "A", "Host").await;
    let b = seed(&pool, "m2", "B", "B", "Host").await;

    let missing = ActorRepo::find_missing_ids(&pool, &[a, 404, b, 405]).await.unwrap();
    assert_eq!(missing, vec![404, 405]);
    assert!(ActorRepo::find_missing_ids(&pool, &[]).await.unwrap().is_empty());
}
