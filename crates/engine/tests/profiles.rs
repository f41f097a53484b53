use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Statement};

use engine::Engine;
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO users (username, password, name, email) VALUES (?, ?, ?, ?)",
        vec![
            "alice".into(),
            "password".into(),
            "Alice A".into(),
            "alice@example.com".into(),
        ],
    ))
    .await
    .unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

#[tokio::test]
async fn first_upsert_creates_an_unverified_profile() {
    let (engine, _db) = engine_with_db().await;

    let profile = engine
        .upsert_profile("alice", "Wanderer", Some("Always packing"), &[], None)
        .await
        .unwrap();
    assert!(!profile.verified);

    let view = engine.get_profile("alice").await.unwrap().unwrap();
    assert_eq!(view.profile.name, "Wanderer");
    assert_eq!(view.email.as_deref(), Some("alice@example.com"));

    assert!(engine.get_profile("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn second_upsert_patches_in_place_and_keeps_verified() {
    let (engine, db) = engine_with_db().await;

    engine
        .upsert_profile("alice", "Wanderer", None, &["beaches".to_string()], None)
        .await
        .unwrap();

    // verification is granted out of band and must survive later edits
    db.execute(Statement::from_sql_and_values(
        db.get_database_backend(),
        "UPDATE profiles SET verified = ? WHERE user_id = ?",
        vec![true.into(), "alice".into()],
    ))
    .await
    .unwrap();

    let updated = engine
        .upsert_profile(
            "alice",
            "Globetrotter",
            Some("Chasing mountains"),
            &["trekking".to_string()],
            Some("https://img.example/alice.png"),
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Globetrotter");
    assert!(updated.verified);

    let view = engine.get_profile("alice").await.unwrap().unwrap();
    assert_eq!(view.profile.name, "Globetrotter");
    assert_eq!(view.profile.bio.as_deref(), Some("Chasing mountains"));
    assert_eq!(view.profile.interests, vec!["trekking".to_string()]);
    assert_eq!(
        view.profile.avatar.as_deref(),
        Some("https://img.example/alice.png")
    );
    assert!(view.profile.verified);

    let rows = engine::profiles::Entity::find().all(&db).await.unwrap();
    assert_eq!(rows.len(), 1);
}
