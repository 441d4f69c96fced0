//! Loopback tests for the presence client.
//!
//! Each test runs an in-process WebSocket server and drives the real
//! subscribe/hello/heartbeat/event exchange against it.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::WebSocketStream;

use noisefloor_core::presence::{PresenceClient, PresencePhase};
use noisefloor_types::PresenceConfig;

const WAIT: Duration = Duration::from_secs(5);

async fn serve() -> (TcpListener, PresenceConfig) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let config = PresenceConfig {
        account_id: "1006197798577909880".to_string(),
        socket_url: format!("ws://{addr}"),
        ..Default::default()
    };
    (listener, config)
}

async fn accept(listener: &TcpListener) -> WebSocketStream<TcpStream> {
    let (stream, _) = listener.accept().await.unwrap();
    tokio_tungstenite::accept_async(stream).await.unwrap()
}

async fn next_text(ws: &mut WebSocketStream<TcpStream>) -> String {
    loop {
        match timeout(WAIT, ws.next()).await.unwrap().unwrap().unwrap() {
            Message::Text(text) => return text.to_string(),
            Message::Close(_) => panic!("unexpected close"),
            _ => continue,
        }
    }
}

async fn wait_for_phase(
    rx: &mut watch::Receiver<PresencePhase>,
    mut predicate: impl FnMut(&PresencePhase) -> bool,
) {
    timeout(WAIT, async {
        loop {
            if predicate(&rx.borrow()) {
                return;
            }
            rx.changed().await.unwrap();
        }
    })
    .await
    .expect("phase never reached");
}

fn event_frame(status: &str, activity_name: Option<&str>) -> String {
    let activities = match activity_name {
        Some(name) => format!(r#"[{{"name":"{name}","type":0}}]"#),
        None => "[]".to_string(),
    };
    format!(
        r#"{{"op":0,"d":{{
            "discord_user":{{"id":"42","username":"ender","discriminator":"0"}},
            "discord_status":"{status}",
            "activities":{activities},
            "listening_to_spotify":false
        }}}}"#
    )
}

#[tokio::test]
async fn subscribe_heartbeat_and_event_replacement() {
    let (listener, config) = serve().await;
    let handle = PresenceClient::spawn(config);
    let mut ws = accept(&listener).await;

    // First frame must be the subscribe envelope.
    let subscribe: serde_json::Value =
        serde_json::from_str(&next_text(&mut ws).await).unwrap();
    assert_eq!(subscribe["op"], 2);
    assert_eq!(subscribe["d"]["subscribe_to_id"], "1006197798577909880");

    // Hello with a short interval; expect paced heartbeats.
    ws.send(Message::text(r#"{"op":1,"d":{"heartbeat_interval":50}}"#))
        .await
        .unwrap();
    for _ in 0..2 {
        let beat: serde_json::Value =
            serde_json::from_str(&next_text(&mut ws).await).unwrap();
        assert_eq!(beat["op"], 3);
    }

    // Loading phase persists until the first event.
    assert!(matches!(handle.phase(), PresencePhase::Connecting));

    ws.send(Message::text(event_frame("online", Some("Factorio"))))
        .await
        .unwrap();
    let mut rx = handle.subscribe();
    wait_for_phase(&mut rx, |p| matches!(p, PresencePhase::Live(_))).await;

    // A later event replaces the earlier one wholesale.
    ws.send(Message::text(event_frame("idle", None)))
        .await
        .unwrap();
    wait_for_phase(&mut rx, |p| match p {
        PresencePhase::Live(snapshot) => {
            snapshot.activities.is_empty()
                && snapshot.discord_status == noisefloor_core::presence::OnlineStatus::Idle
        }
        _ => false,
    })
    .await;

    handle.close().await;
}

#[tokio::test]
async fn malformed_frames_are_dropped_without_ending_the_session() {
    let (listener, config) = serve().await;
    let handle = PresenceClient::spawn(config);
    let mut ws = accept(&listener).await;
    let _ = next_text(&mut ws).await; // subscribe

    ws.send(Message::text("{ not json")).await.unwrap();
    ws.send(Message::text(r#"{"op":0,"d":{"discord_user":"wrong-shape"}}"#))
        .await
        .unwrap();
    ws.send(Message::text(event_frame("dnd", None))).await.unwrap();

    let mut rx = handle.subscribe();
    wait_for_phase(&mut rx, |p| matches!(p, PresencePhase::Live(_))).await;
    handle.close().await;
}

#[tokio::test]
async fn abrupt_disconnect_is_a_terminal_failure() {
    let (listener, config) = serve().await;
    let handle = PresenceClient::spawn(config);
    let mut ws = accept(&listener).await;
    let _ = next_text(&mut ws).await; // subscribe

    ws.send(Message::text(event_frame("online", None)))
        .await
        .unwrap();
    let mut rx = handle.subscribe();
    wait_for_phase(&mut rx, |p| matches!(p, PresencePhase::Live(_))).await;

    // Drop the TCP stream without a closing handshake.
    drop(ws);

    wait_for_phase(&mut rx, |p| matches!(p, PresencePhase::Failed)).await;

    timeout(WAIT, async {
        while !handle.is_finished() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("session task should end after failure");
}

#[tokio::test]
async fn connect_refusal_is_a_terminal_failure() {
    // Bind then drop the listener so the port refuses connections.
    let (listener, config) = serve().await;
    drop(listener);

    let handle = PresenceClient::spawn(config);
    let mut rx = handle.subscribe();
    wait_for_phase(&mut rx, |p| matches!(p, PresencePhase::Failed)).await;
}

#[tokio::test]
async fn close_cancels_heartbeat_and_ends_the_task() {
    let (listener, config) = serve().await;
    let handle = PresenceClient::spawn(config);
    let mut ws = accept(&listener).await;
    let _ = next_text(&mut ws).await; // subscribe

    ws.send(Message::text(r#"{"op":1,"d":{"heartbeat_interval":30}}"#))
        .await
        .unwrap();
    let _ = next_text(&mut ws).await; // at least one heartbeat observed

    handle.close().await;

    // The client sent a close frame; after it the stream ends and no
    // further heartbeats arrive.
    let rest = timeout(WAIT, async {
        let mut saw_close = false;
        while let Some(frame) = ws.next().await {
            match frame {
                Ok(Message::Close(_)) => saw_close = true,
                Ok(Message::Text(text)) if saw_close => {
                    panic!("frame after close: {text}")
                }
                _ => {}
            }
        }
        saw_close
    })
    .await
    .unwrap();
    assert!(rest, "expected a close frame from the client");
}
