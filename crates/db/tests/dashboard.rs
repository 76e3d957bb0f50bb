//! Integration tests for the dashboard read queries.

use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use troupe_core::capabilities::CapabilitySet;
use troupe_core::status::PartyStatus;
use troupe_db::models::actor::CreateActor;
use troupe_db::models::party::NewParty;
use troupe_db::models::user::CreateUser;
use troupe_db::repositories::{ActorRepo, DashboardRepo, PartyRepo, UserRepo};

fn user(username: &str) -> CreateUser {
    CreateUser {
        username: username.into(),
        email: String::new(),
        password_hash: "hash".into(),
        first_name: String::new(),
        last_name: String::new(),
        is_staff: false,
    }
}

fn party(on: NaiveDate, status: PartyStatus, actor_ids: Vec<i64>) -> NewParty {
    let t = NaiveTime::from_hms_opt(20, 0, 0).unwrap();
    NewParty {
        day: "Sat".into(),
        date: on,
        time: t,
        duration_secs: 3600,
        place: "Hall".into(),
        event: "Wedding".into(),
        number_of_actors: 1,
        meeting_time: t,
        meeting_date: on,
        meeting_place: "Studio".into(),
        transport_vehicle: "Bus".into(),
        notes: String::new(),
        camera_man: "Ali".into(),
        dress_details: "Any".into(),
        status: Some(status),
        actor_ids: Some(actor_ids),
        songs: None,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_summaries_and_counts(pool: PgPool) {
    let creator = UserRepo::create(&pool, &user("boss")).await.unwrap().id;
    let mut actor_ids = Vec::new();
    for (username, name) in [("a", "Ava"), ("b", "Bita"), ("c", "Cyrus")] {
        let actor = ActorRepo::create(
            &pool,
            &user(username),
            &CreateActor {
                name: name.into(),
                family: "X".into(),
                age: 20,
                role: "Dancer".into(),
                capabilities: CapabilitySet::defaults(),
            },
        )
        .await
        .unwrap();
        actor_ids.push(actor.id);
    }
    let (a, b) = (actor_ids[0], actor_ids[1]);

    let d = |m, day| NaiveDate::from_ymd_opt(2024, m, day).unwrap();
    PartyRepo::create(&pool, &party(d(1, 5), PartyStatus::Done, vec![a, b]), creator)
        .await
        .unwrap();
    PartyRepo::create(&pool, &party(d(1, 20), PartyStatus::Pending, vec![a]), creator)
        .await
        .unwrap();
    PartyRepo::create(&pool, &party(d(3, 2), PartyStatus::Cancelled, vec![]), creator)
        .await
        .unwrap();

    let all = DashboardRepo::party_summaries(&pool).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].date, d(1, 5));
    assert_eq!(all[2].status, PartyStatus::Cancelled);

    let mine = DashboardRepo::party_summaries_for_actor(&pool, a).await.unwrap();
    assert_eq!(mine.len(), 2);
    let theirs = DashboardRepo::party_summaries_for_actor(&pool, b).await.unwrap();
    assert_eq!(theirs.len(), 1);

    let mut counts = DashboardRepo::actor_party_counts(&pool).await.unwrap();
    counts.sort_by_key(|c| c.actor_id);
    let got: Vec<_> = counts.iter().map(|c| (c.name.as_str(), c.party_count)).collect();
    assert_eq!(got, vec![("Ava", 2), ("Bita", 1), ("Cyrus", 0)]);
}
