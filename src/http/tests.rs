use serde_json::json;
use tempfile::tempdir;

use crate::http::{AppState, start_http_server};
use crate::registry::EventDispatcher;
use crate::store::BlogStore;
use crate::store::models::author_topic;

async fn setup_server() -> (String, tempfile::TempDir) {
    let dir = tempdir().expect("Failed to create temp dir");
    let (dispatcher, _rx) = EventDispatcher::channel(16);
    let store = BlogStore::open(dir.path().to_str().unwrap(), dispatcher, author_topic)
        .expect("Failed to open store");

    let addr = format!(
        "127.0.0.1:{}",
        portpicker::pick_unused_port().expect("No free ports")
    );
    tokio::spawn(start_http_server(
        addr.clone(),
        AppState {
            store,
            ws_port: 8001,
        },
    ));

    // Give the server a moment to start up
    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

    (format!("http://{addr}"), dir)
}

#[tokio::test]
async fn test_author_crud_round_trip() {
    let (base, _dir) = setup_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/author"))
        .json(&json!({"id": 7, "name": "alice", "fullname": "alice smith"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(created["name"], "Alice");

    let authors: serde_json::Value = client
        .get(format!("{base}/authors"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(authors.as_array().unwrap().len(), 1);

    let resp = client
        .put(format!("{base}/author/7"))
        .json(&json!({"name": "Alicia", "fullname": "Alicia Smith"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let fetched: serde_json::Value = client
        .get(format!("{base}/author/7"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["name"], "Alicia");

    let resp = client
        .delete(format!("{base}/author/7"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let resp = client.get(format!("{base}/author/7")).send().await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_duplicate_author_conflicts() {
    let (base, _dir) = setup_server().await;
    let client = reqwest::Client::new();
    let body = json!({"id": 1, "name": "bob", "fullname": "bob jones"});

    let resp = client
        .post(format!("{base}/author"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let resp = client
        .post(format!("{base}/author"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
    let err: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(err["code"], "CONFLICT");
}

#[tokio::test]
async fn test_article_create_validation_and_fetch() {
    let (base, _dir) = setup_server().await;
    let client = reqwest::Client::new();

    // body text too short
    let resp = client
        .post(format!("{base}/article"))
        .json(&json!({"id": 10, "title": "Short", "text": "too short", "author_id": 7}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);
    let err: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(err["code"], "INVALID");

    let resp = client
        .post(format!("{base}/article"))
        .json(&json!({
            "id": 10,
            "title": "A proper headline",
            "text": "A body comfortably past the minimum length.",
            "author_id": 7
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(created["status"], "DRAFT");

    let fetched: serde_json::Value = client
        .get(format!("{base}/article/10"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["title"], "A proper headline");

    let listed: serde_json::Value = client
        .get(format!("{base}/7/articles"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_and_delete_article() {
    let (base, _dir) = setup_server().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{base}/article"))
        .json(&json!({
            "id": 20,
            "title": "Before the rewrite",
            "text": "Original body text, long enough to pass.",
            "author_id": 3
        }))
        .send()
        .await
        .unwrap();

    let resp = client
        .put(format!("{base}/article/20"))
        .json(&json!({
            "title": "After the rewrite",
            "text": "Updated body text, also long enough.",
            "author_id": 3
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(updated["title"], "After the rewrite");
    assert_eq!(updated["status"], "DRAFT");

    let resp = client
        .delete(format!("{base}/article/20"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let resp = client
        .get(format!("{base}/article/20"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_index_serves_demo_page() {
    let (base, _dir) = setup_server().await;
    let page = reqwest::get(&base).await.unwrap().text().await.unwrap();
    assert!(page.contains("Article feed"));
    assert!(page.contains(":8001/article/"));
}
