use super::connection::Connection;
use tokio::sync::mpsc;
use tungstenite::protocol::Message as WsMessage;

#[test]
fn test_connection_new() {
    let (tx, _) = mpsc::unbounded_channel::<WsMessage>();
    let conn = Connection::new(tx);
    assert!(!conn.id.is_empty());
}

#[test]
fn test_connection_clones_share_id_and_channel() {
    let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();
    let conn = Connection::new(tx);
    let clone = conn.clone();
    assert_eq!(conn.id, clone.id);

    clone.sender.send(WsMessage::text("ping")).unwrap();
    assert!(rx.try_recv().is_ok());
}
