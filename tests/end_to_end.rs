use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tempfile::tempdir;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;

use blogcast::config::Settings;
use blogcast::http::{AppState, start_http_server};
use blogcast::registry::{ConnectionRegistry, EventDispatcher, Notifier};
use blogcast::store::BlogStore;
use blogcast::store::models::author_topic;
use blogcast::transport::start_websocket_server;

#[tokio::test]
async fn end_to_end_submit_and_notify() {
    let dir = tempdir().expect("Failed to create temp dir");

    let registry = Arc::new(Mutex::new(ConnectionRegistry::new()));
    let notifier = Notifier::new(registry.clone());
    let dispatcher = EventDispatcher::spawn(notifier, 16);
    let store = BlogStore::open(dir.path().to_str().unwrap(), dispatcher, author_topic)
        .expect("Failed to open store");

    let mut settings = Settings::default();
    settings.notify.finish_delay_ms = 50;

    let http_addr = format!(
        "127.0.0.1:{}",
        portpicker::pick_unused_port().expect("No free ports")
    );
    let ws_addr = format!(
        "127.0.0.1:{}",
        portpicker::pick_unused_port().expect("No free ports")
    );

    let ws_port: u16 = ws_addr.rsplit(':').next().unwrap().parse().unwrap();
    tokio::spawn(start_http_server(
        http_addr.clone(),
        AppState {
            store: store.clone(),
            ws_port,
        },
    ));
    tokio::spawn(start_websocket_server(
        ws_addr.clone(),
        registry.clone(),
        store.clone(),
        settings,
    ));
    tokio::time::sleep(Duration::from_millis(200)).await;

    let base = format!("http://{http_addr}");
    let client = reqwest::Client::new();

    // 1. Create the author over REST
    let resp = client
        .post(format!("{base}/author"))
        .json(&json!({"id": 7, "name": "alice", "fullname": "alice smith"}))
        .send()
        .await
        .expect("author create failed");
    assert_eq!(resp.status(), 201);

    // 2. Join the author's feed
    let (mut ws, _) = connect_async(format!("ws://{ws_addr}/article/7/ws"))
        .await
        .expect("WebSocket handshake failed");
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(registry.lock().unwrap().subscriber_count("7"), 1);

    // 3. Submit an article over the feed
    ws.send(WsMessage::text(
        json!({"id": 99, "title": "Live", "text": "Posted over the socket", "author_id": 7})
            .to_string(),
    ))
    .await
    .expect("submission failed");

    // 4. The finished snapshot comes back on the same feed
    let msg = tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .expect("timed out waiting for the notification")
        .expect("stream ended")
        .expect("stream errored");
    let received: serde_json::Value = match msg {
        WsMessage::Text(text) => serde_json::from_str(&text).unwrap(),
        other => panic!("expected a text message, got {other:?}"),
    };
    assert_eq!(
        received,
        json!({"id": 99, "title": "Live", "text": "Posted over the socket", "author_id": 7, "status": "FINISHED"})
    );

    // 5. REST sees the same terminal status
    let fetched: serde_json::Value = client
        .get(format!("{base}/article/99"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["status"], "FINISHED");

    // 6. Disconnect unregisters the feed connection
    ws.close(None).await.expect("close failed");
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(registry.lock().unwrap().subscriber_count("7"), 0);
}
