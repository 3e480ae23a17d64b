//! API integration tests
//!
//! These run against a live server started with the default development
//! configuration. Tokens are minted locally with the development secret.

use reqwest::Client;
use serde_json::{json, Value};

use locallibrary_server::models::user::UserClaims;

const BASE_URL: &str = "http://localhost:8080";
const DEV_SECRET: &str = "change-this-secret-in-production";

/// Mint a staff token carrying the "can mark returned" grant
fn staff_token() -> String {
    let now = chrono::Utc::now().timestamp();
    UserClaims {
        sub: "librarian".to_string(),
        user_id: 1,
        can_mark_returned: true,
        exp: now + 3600,
        iat: now,
    }
    .create_token(DEV_SECRET)
    .expect("Failed to create token")
}

/// Mint a plain borrower token without the grant
fn borrower_token() -> String {
    let now = chrono::Utc::now().timestamp();
    UserClaims {
        sub: "reader".to_string(),
        user_id: 2,
        can_mark_returned: false,
        exp: now + 3600,
        iat: now,
    }
    .create_token(DEV_SECRET)
    .expect("Failed to create token")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_reports_database() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_index_counts_and_visit_counter() {
    let client = Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to build client");

    let response = client
        .get(format!("{}/catalog/", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["num_books"].is_number());
    assert!(body["num_instances"].is_number());
    assert!(body["num_instances_available"].is_number());
    assert!(body["num_authors"].is_number());
    let first_visits = body["num_visits"].as_u64().expect("No visit counter");

    // Same session, counter goes up by one
    let body: Value = client
        .get(format!("{}/catalog/", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["num_visits"].as_u64().unwrap(), first_visits + 1);
}

#[tokio::test]
#[ignore]
async fn test_book_list_is_public_and_paginated() {
    let client = Client::new();

    let response = client
        .get(format!("{}/catalog/books/", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["items"].is_array());
    assert_eq!(body["per_page"], 10);
}

#[tokio::test]
#[ignore]
async fn test_create_book_end_to_end() {
    let client = Client::new();
    let token = staff_token();

    let author: Value = client
        .post(format!("{}/catalog/authors/", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"first_name": "John", "last_name": "Smith"}))
        .send()
        .await
        .expect("Failed to create author")
        .json()
        .await
        .expect("Failed to parse author");
    let author_id = author["id"].as_i64().expect("No author id");

    let genre: Value = client
        .post(format!("{}/catalog/genres/", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"name": "Fantasy"}))
        .send()
        .await
        .expect("Failed to create genre")
        .json()
        .await
        .expect("Failed to parse genre");

    let language: Value = client
        .post(format!("{}/catalog/languages/", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"name": "English"}))
        .send()
        .await
        .expect("Failed to create language")
        .json()
        .await
        .expect("Failed to parse language");

    let response = client
        .post(format!("{}/catalog/books/", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "Book Title",
            "summary": "My book summary",
            "isbn": "ABCDEFG",
            "author_id": author_id,
            "language_id": language["id"],
            "genre_ids": [genre["id"]]
        }))
        .send()
        .await
        .expect("Failed to create book");
    assert_eq!(response.status(), 201);

    let book: Value = response.json().await.expect("Failed to parse book");
    let book_id = book["id"].as_i64().expect("No book id");

    // Detail resolves and carries the joined records
    let detail: Value = client
        .get(format!("{}/catalog/books/{}/", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to fetch detail")
        .json()
        .await
        .expect("Failed to parse detail");
    assert_eq!(detail["title"], "Book Title");
    assert_eq!(
        detail["public_path"],
        format!("/catalog/book/{}/", book_id)
    );
    assert_eq!(detail["author"]["last_name"], "Smith");
    assert_eq!(detail["genres"][0]["name"], "Fantasy");

    // The list entry joins the display fields
    let list: Value = client
        .get(format!("{}/catalog/books/?title=Book+Title", BASE_URL))
        .send()
        .await
        .expect("Failed to fetch list")
        .json()
        .await
        .expect("Failed to parse list");
    let entry = list["items"]
        .as_array()
        .expect("No items")
        .iter()
        .find(|b| b["id"].as_i64() == Some(book_id))
        .expect("Created book missing from list");
    assert_eq!(entry["author_name"], "Smith, John");
    assert_eq!(entry["genres"], "Fantasy");

    // The author detail carries its public path too
    let author_detail: Value = client
        .get(format!("{}/catalog/authors/{}/", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to fetch author")
        .json()
        .await
        .expect("Failed to parse author");
    assert_eq!(
        author_detail["public_path"],
        format!("/catalog/author/{}/", author_id)
    );

    // Cleanup
    let response = client
        .delete(format!("{}/catalog/books/{}/", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to delete book");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_mutation_requires_permission() {
    let client = Client::new();
    let token = borrower_token();

    let response = client
        .post(format!("{}/catalog/authors/", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"first_name": "No", "last_name": "Grant"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_mutation_requires_authentication() {
    let client = Client::new();

    let response = client
        .post(format!("{}/catalog/authors/", BASE_URL))
        .json(&json!({"first_name": "No", "last_name": "Token"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_my_loans_empty_for_borrower_without_loans() {
    let client = Client::new();

    // A valid token is enough; a principal with no loans (or no catalog
    // row at all) gets an empty list, not a 404.
    let now = chrono::Utc::now().timestamp();
    let token = UserClaims {
        sub: "new-reader".to_string(),
        user_id: 999_999,
        can_mark_returned: false,
        exp: now + 3600,
        iat: now,
    }
    .create_token(DEV_SECRET)
    .expect("Failed to create token");

    let response = client
        .get(format!("{}/catalog/mybooks/", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
#[ignore]
async fn test_borrowed_requires_permission() {
    let client = Client::new();

    let response = client
        .get(format!("{}/catalog/borrowed/", BASE_URL))
        .header("Authorization", format!("Bearer {}", borrower_token()))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    let response = client
        .get(format!("{}/catalog/borrowed/", BASE_URL))
        .header("Authorization", format!("Bearer {}", staff_token()))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_renew_unknown_copy_is_404() {
    let client = Client::new();
    let token = staff_token();

    let response = client
        .get(format!(
            "{}/catalog/bookinstance/00000000-0000-0000-0000-000000000000/renew/",
            BASE_URL
        ))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_renew_rejects_past_date() {
    let client = Client::new();
    let token = staff_token();

    // Any copy id works for the validation path only when it exists; set up a
    // book with one copy first.
    let author: Value = client
        .post(format!("{}/catalog/authors/", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"first_name": "Renewal", "last_name": "Fixture"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let language: Value = client
        .post(format!("{}/catalog/languages/", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"name": "English"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let book: Value = client
        .post(format!("{}/catalog/books/", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "Renewal Fixture",
            "summary": "",
            "author_id": author["id"],
            "language_id": language["id"]
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let copy: Value = client
        .post(format!("{}/catalog/books/{}/instances/", BASE_URL, book["id"]))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"imprint": "First edition"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let yesterday = chrono::Utc::now().date_naive() - chrono::Duration::days(1);
    let response = client
        .post(format!(
            "{}/catalog/bookinstance/{}/renew/",
            BASE_URL,
            copy["id"].as_str().unwrap()
        ))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"due_back": yesterday.to_string()}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    // Cleanup
    let _ = client
        .delete(format!(
            "{}/catalog/bookinstance/{}/",
            BASE_URL,
            copy["id"].as_str().unwrap()
        ))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
    let _ = client
        .delete(format!("{}/catalog/books/{}/", BASE_URL, book["id"]))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}
