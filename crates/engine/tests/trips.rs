use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{Engine, EngineError, NewTrip, TripSearch, TripStatus};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();
    for (username, name) in [
        ("alice", Some("Alice A")),
        ("bob", Some("Bob B")),
        ("carol", None::<&str>),
    ] {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO users (username, password, name) VALUES (?, ?, ?)",
            vec![username.into(), "password".into(), name.into()],
        ))
        .await
        .unwrap();
    }
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

fn goa_trip() -> NewTrip {
    NewTrip {
        destination: "Goa".to_string(),
        start_date: "2026-11-10".to_string(),
        end_date: "2026-11-17".to_string(),
        budget: 30000,
        max_travelers: 3,
        interests: vec!["beaches".to_string(), "nightlife".to_string()],
        description: "A week on the coast".to_string(),
        image_url: None,
    }
}

#[tokio::test]
async fn create_trip_starts_open_with_one_traveler() {
    let (engine, _db) = engine_with_db().await;

    let trip = engine.create_trip("alice", goa_trip()).await.unwrap();

    assert_eq!(trip.status, TripStatus::Open);
    assert_eq!(trip.current_travelers, 1);
    assert_eq!(trip.author_id, "alice");

    let fetched = engine
        .trip_by_id(&trip.id.to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.trip, trip);
    assert_eq!(fetched.author.name, "Alice A");
}

#[tokio::test]
async fn create_trip_requires_known_user() {
    let (engine, _db) = engine_with_db().await;

    let err = engine.create_trip("mallory", goa_trip()).await.unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("user not exists".to_string()));
}

#[tokio::test]
async fn trip_by_id_returns_none_for_unknown_trip() {
    let (engine, _db) = engine_with_db().await;

    let missing = engine
        .trip_by_id("5d6f7b1e-0000-0000-0000-000000000000")
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn author_name_falls_back_to_unknown() {
    let (engine, _db) = engine_with_db().await;

    // carol has neither a profile nor an account display name
    let trip = engine.create_trip("carol", goa_trip()).await.unwrap();
    let fetched = engine
        .trip_by_id(&trip.id.to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.author.name, "Unknown");
}

#[tokio::test]
async fn profile_name_wins_over_account_name() {
    let (engine, _db) = engine_with_db().await;

    engine
        .upsert_profile("alice", "Wanderer", None, &[], None)
        .await
        .unwrap();
    let trip = engine.create_trip("alice", goa_trip()).await.unwrap();

    let fetched = engine
        .trip_by_id(&trip.id.to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.author.name, "Wanderer");
}

#[tokio::test]
async fn list_trips_filters_by_status_and_orders_newest_first() {
    let (engine, _db) = engine_with_db().await;

    let first = engine.create_trip("alice", goa_trip()).await.unwrap();
    let mut manali = goa_trip();
    manali.destination = "Manali".to_string();
    let second = engine.create_trip("bob", manali).await.unwrap();

    let all = engine.list_trips(None, None).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].trip.id, second.id);
    assert_eq!(all[1].trip.id, first.id);

    let open = engine.list_trips(Some(TripStatus::Open), None).await.unwrap();
    assert_eq!(open.len(), 2);
    let full = engine.list_trips(Some(TripStatus::Full), None).await.unwrap();
    assert!(full.is_empty());

    let capped = engine.list_trips(None, Some(1)).await.unwrap();
    assert_eq!(capped.len(), 1);
    assert_eq!(capped[0].trip.id, second.id);
}

#[tokio::test]
async fn user_trips_lists_only_the_authors_trips() {
    let (engine, _db) = engine_with_db().await;

    engine.create_trip("alice", goa_trip()).await.unwrap();
    engine.create_trip("bob", goa_trip()).await.unwrap();

    let mine = engine.user_trips("alice").await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].author_id, "alice");
    assert!(engine.user_trips("carol").await.unwrap().is_empty());
}

#[tokio::test]
async fn search_filters_combine() {
    let (engine, _db) = engine_with_db().await;

    engine.create_trip("alice", goa_trip()).await.unwrap();
    let mut pricey = goa_trip();
    pricey.destination = "North Goa".to_string();
    pricey.budget = 90000;
    pricey.interests = vec!["diving".to_string()];
    engine.create_trip("bob", pricey).await.unwrap();

    let by_destination = engine
        .search_trips(TripSearch {
            destination: Some("goa".to_string()),
            ..TripSearch::default()
        })
        .await
        .unwrap();
    assert_eq!(by_destination.len(), 2);

    let affordable = engine
        .search_trips(TripSearch {
            destination: Some("goa".to_string()),
            max_budget: Some(50000),
            ..TripSearch::default()
        })
        .await
        .unwrap();
    assert_eq!(affordable.len(), 1);
    assert_eq!(affordable[0].trip.destination, "Goa");

    let by_interest = engine
        .search_trips(TripSearch {
            interests: Some(vec!["diving".to_string()]),
            ..TripSearch::default()
        })
        .await
        .unwrap();
    assert_eq!(by_interest.len(), 1);
    assert_eq!(by_interest[0].trip.destination, "North Goa");

    let nothing = engine
        .search_trips(TripSearch {
            destination: Some("ladakh".to_string()),
            ..TripSearch::default()
        })
        .await
        .unwrap();
    assert!(nothing.is_empty());
}
