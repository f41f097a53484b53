use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{
    Engine, EngineError, MessageKind, NewTrip, ParticipantRole, RequestDecision,
};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();
    for username in ["alice", "bob", "carol"] {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO users (username, password, name) VALUES (?, ?, ?)",
            vec![username.into(), "password".into(), username.into()],
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

async fn trip_with_member(engine: &Engine) -> String {
    let trip_id = engine
        .create_trip(
            "alice",
            NewTrip {
                destination: "Munnar".to_string(),
                start_date: "2026-09-12".to_string(),
                end_date: "2026-09-16".to_string(),
                budget: 12000,
                max_travelers: 4,
                interests: vec!["tea".to_string()],
                description: "Hill station break".to_string(),
                image_url: None,
            },
        )
        .await
        .unwrap()
        .id
        .to_string();
    let request = engine
        .send_trip_request("bob", &trip_id, None)
        .await
        .unwrap();
    engine
        .respond_to_trip_request("alice", &request.id.to_string(), RequestDecision::Accepted)
        .await
        .unwrap();
    trip_id
}

#[tokio::test]
async fn members_chat_in_posting_order() {
    let (engine, _db) = engine_with_db().await;
    let trip_id = trip_with_member(&engine).await;

    engine.send_message("alice", &trip_id, "Welcome!").await.unwrap();
    engine.send_message("bob", &trip_id, "Thanks!").await.unwrap();

    let history = engine.trip_messages("bob", &trip_id).await.unwrap();
    // the join announcement comes first
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].kind, MessageKind::System);
    assert_eq!(history[1].content, "Welcome!");
    assert_eq!(history[1].sender.name, "alice");
    assert_eq!(history[2].content, "Thanks!");
    assert_eq!(history[2].sender.name, "bob");
}

#[tokio::test]
async fn outsiders_read_nothing_and_cannot_write() {
    let (engine, _db) = engine_with_db().await;
    let trip_id = trip_with_member(&engine).await;

    assert!(engine.trip_messages("carol", &trip_id).await.unwrap().is_empty());

    let err = engine
        .send_message("carol", &trip_id, "Let me in")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));
}

#[tokio::test]
async fn pending_and_rejected_requesters_stay_outside_the_chat() {
    let (engine, _db) = engine_with_db().await;
    let trip_id = trip_with_member(&engine).await;

    // a pending request grants nothing
    let request = engine
        .send_trip_request("carol", &trip_id, None)
        .await
        .unwrap();
    assert!(engine.trip_messages("carol", &trip_id).await.unwrap().is_empty());
    let err = engine
        .send_message("carol", &trip_id, "Am I in yet?")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));

    // neither does a rejected one
    engine
        .respond_to_trip_request("alice", &request.id.to_string(), RequestDecision::Rejected)
        .await
        .unwrap();
    assert!(engine.trip_messages("carol", &trip_id).await.unwrap().is_empty());
    let err = engine
        .send_message("carol", &trip_id, "Still hoping")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));
}

#[tokio::test]
async fn unknown_trip_reads_empty_but_fails_writes() {
    let (engine, _db) = engine_with_db().await;
    let missing = "5d6f7b1e-0000-0000-0000-000000000000";

    assert!(engine.trip_messages("alice", missing).await.unwrap().is_empty());

    let err = engine.send_message("alice", missing, "hello").await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn participants_list_author_first_then_members() {
    let (engine, _db) = engine_with_db().await;
    let trip_id = trip_with_member(&engine).await;

    let participants = engine.trip_participants(&trip_id).await.unwrap();
    assert_eq!(participants.len(), 2);
    assert_eq!(participants[0].user_id, "alice");
    assert_eq!(participants[0].role, ParticipantRole::Author);
    assert_eq!(participants[1].user_id, "bob");
    assert_eq!(participants[1].role, ParticipantRole::Member);

    // pending requesters are not participants
    engine
        .send_trip_request("carol", &trip_id, None)
        .await
        .unwrap();
    let participants = engine.trip_participants(&trip_id).await.unwrap();
    assert_eq!(participants.len(), 2);
}

#[tokio::test]
async fn participants_of_unknown_trip_is_empty() {
    let (engine, _db) = engine_with_db().await;

    let participants = engine
        .trip_participants("5d6f7b1e-0000-0000-0000-000000000000")
        .await
        .unwrap();
    assert!(participants.is_empty());
}
