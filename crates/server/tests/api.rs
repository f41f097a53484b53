//! End-to-end tests against a server bound to an ephemeral port, with the
//! external providers left unconfigured so their endpoints degrade to
//! fallbacks.

use std::sync::Arc;

use connectors::{AssistClient, PhotoClient, WeatherService};
use engine::Engine;
use migration::MigratorTrait;
use sea_orm::Database;
use serde_json::{Value, json};
use server::{ServerState, spawn_with_listener};

async fn spawn_app() -> (String, reqwest::Client) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();

    let http = reqwest::Client::new();
    let state = ServerState {
        engine: Arc::new(engine),
        db,
        assist: Arc::new(AssistClient::new(
            http.clone(),
            "http://127.0.0.1:1".to_string(),
            None,
        )),
        photos: Arc::new(PhotoClient::new(
            http.clone(),
            "http://127.0.0.1:1".to_string(),
            None,
            "http://127.0.0.1:1".to_string(),
            None,
        )),
        weather: Arc::new(WeatherService::new()),
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = spawn_with_listener(state, listener).unwrap();
    (format!("http://{addr}"), http)
}

async fn signup(base: &str, client: &reqwest::Client, username: &str) {
    let response = client
        .post(format!("{base}/signup"))
        .json(&json!({ "username": username, "password": "secret" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
}

async fn create_trip(base: &str, client: &reqwest::Client, username: &str) -> String {
    let response = client
        .post(format!("{base}/trips"))
        .basic_auth(username, Some("secret"))
        .json(&json!({
            "destination": "Goa",
            "start_date": "2026-11-10",
            "end_date": "2026-11-17",
            "budget": 30000,
            "max_travelers": 2,
            "interests": ["beaches"],
            "description": "A week on the coast",
            "image_url": null
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let trip: Value = response.json().await.unwrap();
    trip["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn protected_routes_require_credentials() {
    let (base, client) = spawn_app().await;

    let response = client
        .get(format!("{base}/user/trips"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400); // missing Authorization header

    let response = client
        .get(format!("{base}/user/trips"))
        .basic_auth("nobody", Some("wrong"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn signup_rejects_a_taken_username() {
    let (base, client) = spawn_app().await;
    signup(&base, &client, "alice").await;

    let response = client
        .post(format!("{base}/signup"))
        .json(&json!({ "username": "alice", "password": "other" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 409);
}

#[tokio::test]
async fn trips_are_browsable_without_credentials() {
    let (base, client) = spawn_app().await;
    signup(&base, &client, "alice").await;
    let trip_id = create_trip(&base, &client, "alice").await;

    let listed: Value = client
        .get(format!("{base}/trips"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["trip"]["destination"], "Goa");

    let one: Value = client
        .get(format!("{base}/trips/{trip_id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(one["trip"]["status"], "open");

    let missing = client
        .get(format!("{base}/trips/5b1ad708-0000-0000-0000-000000000000"))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), 404);
}

#[tokio::test]
async fn join_request_workflow_over_http() {
    let (base, client) = spawn_app().await;
    signup(&base, &client, "alice").await;
    signup(&base, &client, "bob").await;
    let trip_id = create_trip(&base, &client, "alice").await;

    // the author cannot request their own trip
    let own = client
        .post(format!("{base}/requests"))
        .basic_auth("alice", Some("secret"))
        .json(&json!({ "trip_id": trip_id, "message": null }))
        .send()
        .await
        .unwrap();
    assert_eq!(own.status(), 422);

    let sent = client
        .post(format!("{base}/requests"))
        .basic_auth("bob", Some("secret"))
        .json(&json!({ "trip_id": trip_id, "message": "Room for one more?" }))
        .send()
        .await
        .unwrap();
    assert_eq!(sent.status(), 201);
    let request: Value = sent.json().await.unwrap();
    let request_id = request["id"].as_str().unwrap();

    let duplicate = client
        .post(format!("{base}/requests"))
        .basic_auth("bob", Some("secret"))
        .json(&json!({ "trip_id": trip_id, "message": null }))
        .send()
        .await
        .unwrap();
    assert_eq!(duplicate.status(), 409);

    // only the author may decide
    let forbidden = client
        .post(format!("{base}/requests/{request_id}/respond"))
        .basic_auth("bob", Some("secret"))
        .json(&json!({ "response": "accepted" }))
        .send()
        .await
        .unwrap();
    assert_eq!(forbidden.status(), 403);

    let accepted = client
        .post(format!("{base}/requests/{request_id}/respond"))
        .basic_auth("alice", Some("secret"))
        .json(&json!({ "response": "accepted" }))
        .send()
        .await
        .unwrap();
    assert_eq!(accepted.status(), 200);

    // capacity 2 is now reached, so the trip reads full on the public page
    let trip: Value = client
        .get(format!("{base}/trips/{trip_id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(trip["trip"]["status"], "full");
    assert_eq!(trip["trip"]["current_travelers"], 2);

    let participants: Value = client
        .get(format!("{base}/trips/{trip_id}/participants"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(participants.as_array().unwrap().len(), 2);
    assert_eq!(participants[0]["role"], "author");
    assert_eq!(participants[1]["user_id"], "bob");
}

#[tokio::test]
async fn chat_is_scoped_to_trip_members() {
    let (base, client) = spawn_app().await;
    signup(&base, &client, "alice").await;
    signup(&base, &client, "carol").await;
    let trip_id = create_trip(&base, &client, "alice").await;

    let posted = client
        .post(format!("{base}/trips/{trip_id}/messages"))
        .basic_auth("alice", Some("secret"))
        .json(&json!({ "content": "Packing list is up" }))
        .send()
        .await
        .unwrap();
    assert_eq!(posted.status(), 201);

    let outsider = client
        .post(format!("{base}/trips/{trip_id}/messages"))
        .basic_auth("carol", Some("secret"))
        .json(&json!({ "content": "hi" }))
        .send()
        .await
        .unwrap();
    assert_eq!(outsider.status(), 403);

    // reads degrade silently for outsiders
    let hidden: Value = client
        .get(format!("{base}/trips/{trip_id}/messages"))
        .basic_auth("carol", Some("secret"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(hidden.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn budget_workflow_over_http() {
    let (base, client) = spawn_app().await;
    signup(&base, &client, "alice").await;
    let trip_id = create_trip(&base, &client, "alice").await;

    let categories = json!({
        "travel": 8000, "food": 6000, "stay": 10000, "activities": 4000, "misc": 2000
    });
    let created = client
        .post(format!("{base}/budgets"))
        .basic_auth("alice", Some("secret"))
        .json(&json!({ "trip_id": trip_id, "categories": categories }))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), 201);
    let budget: Value = created.json().await.unwrap();
    assert_eq!(budget["total_budget"], 30000);
    let budget_id = budget["id"].as_str().unwrap();

    let again = client
        .post(format!("{base}/budgets"))
        .basic_auth("alice", Some("secret"))
        .json(&json!({ "trip_id": trip_id, "categories": categories }))
        .send()
        .await
        .unwrap();
    assert_eq!(again.status(), 409);

    let expense = client
        .post(format!("{base}/budgets/{budget_id}/expenses"))
        .basic_auth("alice", Some("secret"))
        .json(&json!({
            "category": "food",
            "amount": 1500,
            "description": "Beach shack dinner",
            "date": "2026-11-11"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(expense.status(), 201);

    let summary: Value = client
        .get(format!("{base}/budgets/{budget_id}/summary"))
        .basic_auth("alice", Some("secret"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(summary["total_spent"], 1500);
    assert_eq!(summary["remaining"], 28500);
    assert_eq!(summary["spent"]["food"], 1500);
}

#[tokio::test]
async fn provider_endpoints_degrade_without_keys() {
    let (base, client) = spawn_app().await;
    signup(&base, &client, "alice").await;

    let weather: Value = client
        .get(format!("{base}/weather"))
        .query(&[("location", "Jaipur, Rajasthan")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(weather["location"], "Jaipur, Rajasthan");
    assert!(weather["temperature"].as_i64().is_some());

    let photos: Value = client
        .get(format!("{base}/photos/travel"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(photos.as_array().unwrap().is_empty());

    let itinerary: Value = client
        .post(format!("{base}/assist/itinerary"))
        .basic_auth("alice", Some("secret"))
        .json(&json!({
            "destination": "Udaipur",
            "start_date": "2026-12-01",
            "end_date": "2026-12-03",
            "budget": 21000,
            "travelers": 2,
            "interests": ["heritage"]
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(itinerary["totalEstimatedCost"], 21000);
    assert!(!itinerary["days"].as_array().unwrap().is_empty());
}
