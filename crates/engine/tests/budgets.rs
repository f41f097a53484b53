use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{CategorySet, Engine, EngineError, ExpenseCategory, NewTrip};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();
    for username in ["alice", "bob"] {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO users (username, password) VALUES (?, ?)",
            vec![username.into(), "password".into()],
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

async fn sample_trip(engine: &Engine) -> String {
    engine
        .create_trip(
            "alice",
            NewTrip {
                destination: "Jaipur".to_string(),
                start_date: "2026-12-01".to_string(),
                end_date: "2026-12-06".to_string(),
                budget: 25000,
                max_travelers: 2,
                interests: vec!["forts".to_string()],
                description: "Winter city break".to_string(),
                image_url: None,
            },
        )
        .await
        .unwrap()
        .id
        .to_string()
}

fn allocations() -> CategorySet {
    CategorySet {
        travel: 8000,
        food: 5000,
        stay: 9000,
        activities: 2000,
        misc: 1000,
    }
}

#[tokio::test]
async fn budget_total_is_the_sum_of_allocations() {
    let (engine, _db) = engine_with_db().await;
    let trip_id = sample_trip(&engine).await;

    let budget = engine
        .create_budget("alice", &trip_id, allocations())
        .await
        .unwrap();
    assert_eq!(budget.total_budget, 25000);

    let fetched = engine.trip_budget("alice", &trip_id).await.unwrap().unwrap();
    assert_eq!(fetched, budget);
}

#[tokio::test]
async fn one_budget_per_trip_and_user() {
    let (engine, _db) = engine_with_db().await;
    let trip_id = sample_trip(&engine).await;

    engine
        .create_budget("alice", &trip_id, allocations())
        .await
        .unwrap();
    let err = engine
        .create_budget("alice", &trip_id, allocations())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::ExistingKey(_)));

    // a different user gets their own budget for the same trip
    engine
        .create_budget("bob", &trip_id, allocations())
        .await
        .unwrap();
}

#[tokio::test]
async fn budget_requires_an_existing_trip() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .create_budget(
            "alice",
            "5d6f7b1e-0000-0000-0000-000000000000",
            allocations(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn summary_tracks_spending_and_goes_negative_on_overspend() {
    let (engine, _db) = engine_with_db().await;
    let trip_id = sample_trip(&engine).await;
    let budget = engine
        .create_budget("alice", &trip_id, allocations())
        .await
        .unwrap();
    let budget_id = budget.id.to_string();

    engine
        .add_expense(
            "alice",
            &budget_id,
            ExpenseCategory::Food,
            3000,
            "Street food crawl",
            "2026-12-02",
        )
        .await
        .unwrap();
    engine
        .add_expense(
            "alice",
            &budget_id,
            ExpenseCategory::Food,
            2500,
            "Dinner",
            "2026-12-03",
        )
        .await
        .unwrap();
    engine
        .add_expense(
            "alice",
            &budget_id,
            ExpenseCategory::Stay,
            24000,
            "Heritage hotel",
            "2026-12-01",
        )
        .await
        .unwrap();

    let summary = engine
        .budget_summary("alice", &budget_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(summary.spent.food, 5500);
    assert_eq!(summary.spent.stay, 24000);
    assert_eq!(summary.spent.travel, 0);
    assert_eq!(summary.total_spent, 29500);
    assert_eq!(summary.remaining, -4500);
}

#[tokio::test]
async fn expenses_list_newest_first_for_the_owner_only() {
    let (engine, _db) = engine_with_db().await;
    let trip_id = sample_trip(&engine).await;
    let budget = engine
        .create_budget("alice", &trip_id, allocations())
        .await
        .unwrap();
    let budget_id = budget.id.to_string();

    engine
        .add_expense(
            "alice",
            &budget_id,
            ExpenseCategory::Travel,
            4000,
            "Train tickets",
            "2026-11-20",
        )
        .await
        .unwrap();
    engine
        .add_expense(
            "alice",
            &budget_id,
            ExpenseCategory::Misc,
            300,
            "Snacks",
            "2026-12-01",
        )
        .await
        .unwrap();

    let expenses = engine.budget_expenses("alice", &budget_id).await.unwrap();
    assert_eq!(expenses.len(), 2);
    assert_eq!(expenses[0].description, "Snacks");
    assert_eq!(expenses[1].description, "Train tickets");

    assert!(engine.budget_expenses("bob", &budget_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn budgets_are_private() {
    let (engine, _db) = engine_with_db().await;
    let trip_id = sample_trip(&engine).await;
    let budget = engine
        .create_budget("alice", &trip_id, allocations())
        .await
        .unwrap();
    let budget_id = budget.id.to_string();

    assert!(engine.trip_budget("bob", &trip_id).await.unwrap().is_none());
    assert!(engine.budget_summary("bob", &budget_id).await.unwrap().is_none());

    let err = engine
        .add_expense(
            "bob",
            &budget_id,
            ExpenseCategory::Misc,
            100,
            "Not mine",
            "2026-12-01",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));
}

#[tokio::test]
async fn stats_count_trips_requests_and_budgets() {
    let (engine, _db) = engine_with_db().await;
    let trip_id = sample_trip(&engine).await;
    engine
        .create_budget("alice", &trip_id, allocations())
        .await
        .unwrap();

    let request = engine
        .send_trip_request("bob", &trip_id, None)
        .await
        .unwrap();
    engine
        .respond_to_trip_request(
            "alice",
            &request.id.to_string(),
            engine::RequestDecision::Accepted,
        )
        .await
        .unwrap();

    let alice = engine.user_stats("alice").await.unwrap();
    assert_eq!(alice.trips_created, 1);
    assert_eq!(alice.trips_joined, 0);
    assert_eq!(alice.total_budget_managed, 25000);
    assert_eq!(alice.completed_trips, 0);

    let bob = engine.user_stats("bob").await.unwrap();
    assert_eq!(bob.trips_created, 0);
    assert_eq!(bob.trips_joined, 1);
    assert_eq!(bob.total_budget_managed, 0);
}
