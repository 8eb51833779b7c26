//! API integration tests
//!
//! Require a running server with its database and Redis, started with an
//! administrator account (ADMIN_EMAIL / ADMIN_PASSWORD, shared with these
//! tests): `cargo test --test api_tests -- --ignored`

use reqwest::Client;
use serde_json::{json, Value};
use uuid::Uuid;

fn base_url() -> String {
    std::env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

fn url(path: &str) -> String {
    format!("{}{}", base_url(), path)
}

async fn login(client: &Client, email: &str, password: &str) -> String {
    let response = client
        .post(url("/users/login"))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to send login request");
    assert!(response.status().is_success(), "login failed for {}", email);

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

async fn admin_token(client: &Client) -> String {
    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@market.local".to_string());
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin".to_string());
    login(client, &email, &password).await
}

/// Register a fresh client account and return (id, token)
async fn new_client(client: &Client) -> (i64, String) {
    let email = format!("client-{}@example.com", Uuid::new_v4());
    let response = client
        .post(url("/users"))
        .json(&json!({ "email": email, "password": "secret123", "firstname": "Test" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.unwrap();
    let id = body["id"].as_i64().expect("No id in response");
    (id, login(client, &email, "secret123").await)
}

async fn post(client: &Client, token: &str, path: &str, body: Value) -> reqwest::Response {
    client
        .post(url(path))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .expect("Failed to send request")
}

async fn get(client: &Client, token: &str, path: &str) -> Value {
    let response = client
        .get(url(path))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success(), "GET {} failed", path);
    response.json().await.expect("Failed to parse response")
}

/// Balance of the caller and how many purchases it has paid for
async fn wallet(client: &Client, token: &str) -> (Value, usize) {
    let balance = get(client, token, "/transactions/balance").await["balance"].clone();
    let history = get(client, token, "/transactions?per_page=100").await;
    let purchases = history["items"]
        .as_array()
        .expect("No items in response")
        .iter()
        .filter(|t| t["transaction_type"] == "PURCHASE")
        .count();
    (balance, purchases)
}

async fn error_message(response: reqwest::Response) -> String {
    let body: Value = response.json().await.expect("Failed to parse error body");
    body["message"].as_str().unwrap_or_default().to_string()
}

/// Auditorium plus one screening of a new movie, returns the schedule id
async fn screening(client: &Client, admin: &str, capacity: i64) -> i64 {
    let auditorium: Value = post(
        client,
        admin,
        "/auditoriums",
        json!({ "name": format!("Room {}", Uuid::new_v4()), "capacity": capacity }),
    )
    .await
    .json()
    .await
    .unwrap();

    let movie: Value = post(
        client,
        admin,
        "/movies",
        json!({ "title": format!("Movie {}", Uuid::new_v4()), "duration": 90 }),
    )
    .await
    .json()
    .await
    .unwrap();

    let response = post(
        client,
        admin,
        "/schedules",
        json!({
            "date": "2030-06-17T14:00:00Z",
            "movie_id": movie["id"],
            "auditorium_id": auditorium["id"],
        }),
    )
    .await;
    assert_eq!(response.status(), 201);
    let schedule: Value = response.json().await.unwrap();
    schedule["id"].as_i64().unwrap()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(url("/health"))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(url("/users/login"))
        .json(&json!({ "email": "admin@market.local", "password": "wrong" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_logout_revokes_token() {
    let client = Client::new();
    let (id, token) = new_client(&client).await;

    let response = client
        .get(url(&format!("/users/{}", id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let response = post(&client, &token, "/users/logout", json!({})).await;
    assert_eq!(response.status(), 204);

    let response = client
        .get(url(&format!("/users/{}", id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client.get(url("/transactions/balance")).send().await.unwrap();
    assert_eq!(response.status(), 401);

    let (_, token) = new_client(&client).await;
    let response = client.get(url("/users")).bearer_auth(&token).send().await.unwrap();
    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_deposit_and_withdraw() {
    let client = Client::new();
    let (_, token) = new_client(&client).await;

    let response = post(&client, &token, "/transactions/deposit", json!({ "amount": "50.00" })).await;
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["balance"], "50.00");

    let response = post(&client, &token, "/transactions/withdraw", json!({ "amount": "80.00" })).await;
    assert_eq!(response.status(), 400);
    assert_eq!(error_message(response).await, "Insufficient balance");

    let response = post(&client, &token, "/transactions/withdraw", json!({ "amount": "20.00" })).await;
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["balance"], "30.00");
}

#[tokio::test]
#[ignore]
async fn test_ticket_capacity_is_enforced() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let schedule_id = screening(&client, &admin, 15).await;

    let (_, token) = new_client(&client).await;
    post(&client, &token, "/transactions/deposit", json!({ "amount": "500.00" })).await;

    for _ in 0..15 {
        let response = post(&client, &token, "/tickets", json!({ "schedule_id": schedule_id })).await;
        assert_eq!(response.status(), 201);
    }
    assert_eq!(wallet(&client, &token).await, (json!("350.00"), 15));

    let response = post(&client, &token, "/tickets", json!({ "schedule_id": schedule_id })).await;
    assert_eq!(response.status(), 400);
    assert_eq!(error_message(response).await, "Auditorium capacity has been reached");

    // A rejected sale neither charges nor records a purchase
    assert_eq!(wallet(&client, &token).await, (json!("350.00"), 15));
}

#[tokio::test]
#[ignore]
async fn test_concurrent_schedules_for_one_movie() {
    let client = Client::new();
    let admin = admin_token(&client).await;

    let movie: Value = post(
        &client,
        &admin,
        "/movies",
        json!({ "title": format!("Movie {}", Uuid::new_v4()), "duration": 90 }),
    )
    .await
    .json()
    .await
    .unwrap();

    let mut creates = tokio::task::JoinSet::new();
    for _ in 0..10 {
        let auditorium: Value = post(
            &client,
            &admin,
            "/auditoriums",
            json!({ "name": format!("Room {}", Uuid::new_v4()), "capacity": 20 }),
        )
        .await
        .json()
        .await
        .unwrap();

        let (client, admin, movie_id) = (client.clone(), admin.clone(), movie["id"].clone());
        creates.spawn(async move {
            post(
                &client,
                &admin,
                "/schedules",
                json!({
                    "date": "2030-06-17T14:00:00Z",
                    "movie_id": movie_id,
                    "auditorium_id": auditorium["id"],
                }),
            )
            .await
            .status()
        });
    }

    let mut created = 0;
    while let Some(status) = creates.join_next().await {
        match status.unwrap().as_u16() {
            201 => created += 1,
            400 => {}
            other => panic!("unexpected status {}", other),
        }
    }
    assert_eq!(created, 1);

    let schedules = get(&client, &admin, &format!("/schedules?movie_id={}", movie["id"])).await;
    assert_eq!(schedules.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
#[ignore]
async fn test_ticket_requires_balance() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let schedule_id = screening(&client, &admin, 20).await;

    let (_, token) = new_client(&client).await;
    let response = post(&client, &token, "/tickets", json!({ "schedule_id": schedule_id })).await;
    assert_eq!(response.status(), 400);
    assert_eq!(error_message(response).await, "Insufficient balance");
}

#[tokio::test]
#[ignore]
async fn test_super_ticket_booking_rules() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let schedule_id = screening(&client, &admin, 20).await;

    let (_, token) = new_client(&client).await;
    post(&client, &token, "/transactions/deposit", json!({ "amount": "100.00" })).await;

    let response = post(&client, &token, "/supertickets", json!({})).await;
    assert_eq!(response.status(), 201);
    let pass: Value = response.json().await.unwrap();
    assert_eq!(pass["uses_remaining"], 10);
    let pass_id = pass["id"].as_i64().unwrap();

    let path = format!("/supertickets/{}/book", pass_id);
    let response = post(&client, &token, &path, json!({ "schedule_id": schedule_id })).await;
    assert!(response.status().is_success());
    let pass: Value = response.json().await.unwrap();
    assert_eq!(pass["uses_remaining"], 9);
    assert_eq!(pass["used_schedules"], json!([schedule_id]));

    let response = post(&client, &token, &path, json!({ "schedule_id": schedule_id })).await;
    assert_eq!(response.status(), 400);
    assert_eq!(error_message(response).await, "Schedule already booked");
}

#[tokio::test]
#[ignore]
async fn test_super_ticket_holds_ten_schedules() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let mut schedules = Vec::new();
    for _ in 0..11 {
        schedules.push(screening(&client, &admin, 20).await);
    }

    let (_, token) = new_client(&client).await;
    post(&client, &token, "/transactions/deposit", json!({ "amount": "100.00" })).await;
    let pass: Value = post(&client, &token, "/supertickets", json!({})).await.json().await.unwrap();
    let path = format!("/supertickets/{}/book", pass["id"]);

    for schedule_id in &schedules[..10] {
        let response = post(&client, &token, &path, json!({ "schedule_id": schedule_id })).await;
        assert!(response.status().is_success());
    }

    let response = post(&client, &token, &path, json!({ "schedule_id": schedules[10] })).await;
    assert_eq!(response.status(), 400);
    assert_eq!(error_message(response).await, "Cannot book more than 10 schedules");
}

#[tokio::test]
#[ignore]
async fn test_reservation_blocks_dates() {
    let client = Client::new();
    let (_, owner) = new_client(&client).await;
    let (_, guest) = new_client(&client).await;

    let response = post(
        &client,
        &owner,
        "/properties",
        json!({
            "name": "Seaside flat",
            "address": "1 Beach Road",
            "city": "Nice",
            "price_per_night": "120.00",
            "capacity": 4,
        }),
    )
    .await;
    assert_eq!(response.status(), 201);
    let property: Value = response.json().await.unwrap();
    let property_id = property["id"].as_i64().unwrap();

    let response = post(
        &client,
        &guest,
        "/reservations",
        json!({ "property_id": property_id, "start_date": "2030-07-01", "end_date": "2030-07-05" }),
    )
    .await;
    assert_eq!(response.status(), 201);
    let reservation: Value = response.json().await.unwrap();
    assert_eq!(reservation["status"], "pending");

    let response = post(
        &client,
        &guest,
        "/reservations",
        json!({ "property_id": property_id, "start_date": "2030-07-04", "end_date": "2030-07-08" }),
    )
    .await;
    assert_eq!(response.status(), 400);
    assert_eq!(
        error_message(response).await,
        "Property is not available for the selected dates"
    );

    let check = |start: &str, end: &str| {
        client
            .get(url(&format!(
                "/availability/check?property_id={}&start_date={}&end_date={}",
                property_id, start, end
            )))
            .send()
    };

    // Bounds are inclusive: the last night still blocks
    let body: Value = check("2030-07-05", "2030-07-07").await.unwrap().json().await.unwrap();
    assert_eq!(body["available"], false);

    let body: Value = check("2030-07-06", "2030-07-08").await.unwrap().json().await.unwrap();
    assert_eq!(body["available"], true);
}

#[tokio::test]
#[ignore]
async fn test_reservation_block_is_read_only() {
    let client = Client::new();
    let (_, owner) = new_client(&client).await;
    let (_, guest) = new_client(&client).await;

    let property: Value = post(
        &client,
        &owner,
        "/properties",
        json!({
            "name": "Mountain chalet",
            "address": "3 Ridge Lane",
            "city": "Chamonix",
            "price_per_night": "200.00",
            "capacity": 6,
        }),
    )
    .await
    .json()
    .await
    .unwrap();
    let property_id = property["id"].as_i64().unwrap();

    let response = post(
        &client,
        &guest,
        "/reservations",
        json!({ "property_id": property_id, "start_date": "2030-08-01", "end_date": "2030-08-04" }),
    )
    .await;
    assert_eq!(response.status(), 201);

    let blocks = get(&client, &owner, &format!("/availability?property_id={}", property_id)).await;
    let block = blocks
        .as_array()
        .unwrap()
        .iter()
        .find(|b| !b["reservation_id"].is_null())
        .expect("No reservation block")
        .clone();
    let block_path = url(&format!("/availability/{}", block["id"]));

    let response = client
        .patch(&block_path)
        .bearer_auth(&owner)
        .json(&json!({ "end_date": "2030-08-02" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    assert_eq!(error_message(response).await, "Block belongs to a reservation");

    let response = client.delete(&block_path).bearer_auth(&owner).send().await.unwrap();
    assert_eq!(response.status(), 400);
    assert_eq!(error_message(response).await, "Block belongs to a reservation");

    // The dates stay blocked
    let check: Value = client
        .get(url(&format!(
            "/availability/check?property_id={}&start_date=2030-08-02&end_date=2030-08-03",
            property_id
        )))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(check["available"], false);

    // Blocks the owner created remain editable
    let response = post(
        &client,
        &owner,
        "/availability",
        json!({ "property_id": property_id, "start_date": "2030-09-01", "end_date": "2030-09-03" }),
    )
    .await;
    assert_eq!(response.status(), 201);
    let manual: Value = response.json().await.unwrap();
    let response = client
        .delete(url(&format!("/availability/{}", manual["id"])))
        .bearer_auth(&owner)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);
}
