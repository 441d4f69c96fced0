//! The realtime presence client.
//!
//! One task owns the socket: it sends the subscribe envelope on open,
//! answers the server's hello with a paced heartbeat task, and publishes
//! every inbound event wholesale through a watch channel. A connection
//! error is terminal for the session; there is no reconnect or backoff.
//! Message handling is strictly in arrival order.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use noisefloor_types::PresenceConfig;

use crate::error::CoreError;

use super::view::PresencePhase;
use super::wire::{self, Inbound};

pub struct PresenceClient;

/// Handle to a running presence session. Dropping the handle leaves the
/// session running; call [`PresenceHandle::close`] to stop it cleanly.
pub struct PresenceHandle {
    rx: watch::Receiver<PresencePhase>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PresenceHandle {
    /// Latest published phase.
    pub fn phase(&self) -> PresencePhase {
        self.rx.borrow().clone()
    }

    /// A receiver that observes every phase change.
    pub fn subscribe(&self) -> watch::Receiver<PresencePhase> {
        self.rx.clone()
    }

    /// Whether the session task has ended (closed or failed).
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancel the session: stops the heartbeat, closes the socket, and
    /// waits for the task to finish. No frames are sent afterwards.
    pub async fn close(self) {
        self.cancel.cancel();
        let _ = self.task.await;
    }
}

impl PresenceClient {
    /// Spawn the session task. The initial phase is `Connecting`; the first
    /// inbound event flips it to `Live`, a connection failure to `Failed`.
    pub fn spawn(config: PresenceConfig) -> PresenceHandle {
        let (tx, rx) = watch::channel(PresencePhase::Connecting);
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let task = tokio::spawn(async move {
            if let Err(e) = run_session(config, &tx, task_cancel).await {
                error!("[presence] session failed: {e}");
                tx.send_replace(PresencePhase::Failed);
            }
        });

        PresenceHandle { rx, cancel, task }
    }
}

async fn run_session(
    config: PresenceConfig,
    tx: &watch::Sender<PresencePhase>,
    cancel: CancellationToken,
) -> Result<(), CoreError> {
    let ws = tokio::select! {
        _ = cancel.cancelled() => return Ok(()),
        connected = connect_async(&config.socket_url) => connected?.0,
    };
    info!("[presence] connected to {}", config.socket_url);

    let (mut sink, mut stream) = ws.split();

    sink.send(Message::text(wire::subscribe_frame(&config.account_id)))
        .await?;
    debug!("[presence] subscribed to {}", config.account_id);

    // Heartbeats are produced by a child task and funneled through this
    // channel so the session task remains the only writer to the sink.
    let (out_tx, mut out_rx) = mpsc::channel::<Message>(8);
    let mut heartbeat: Option<JoinHandle<()>> = None;

    let result = loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                let _ = sink.send(Message::Close(None)).await;
                info!("[presence] session cancelled");
                break Ok(());
            }
            Some(frame) = out_rx.recv() => {
                if let Err(e) = sink.send(frame).await {
                    break Err(e.into());
                }
            }
            inbound = stream.next() => match inbound {
                None => {
                    // Clean server close: the session ends, the last
                    // published phase is retained.
                    info!("[presence] socket closed by server");
                    break Ok(());
                }
                Some(Err(e)) => break Err(e.into()),
                Some(Ok(Message::Text(text))) => {
                    handle_text(text.as_str(), tx, &out_tx, &mut heartbeat);
                }
                Some(Ok(Message::Close(_))) => {
                    info!("[presence] close frame received");
                    break Ok(());
                }
                Some(Ok(_)) => {} // ping/pong/binary: nothing to do
            },
        }
    };

    if let Some(task) = heartbeat.take() {
        task.abort();
    }
    result
}

fn handle_text(
    text: &str,
    tx: &watch::Sender<PresencePhase>,
    out_tx: &mpsc::Sender<Message>,
    heartbeat: &mut Option<JoinHandle<()>>,
) {
    match wire::parse_inbound(text) {
        Ok(Inbound::Hello { heartbeat_interval }) => {
            if heartbeat.is_some() {
                warn!("[presence] duplicate hello; keeping existing heartbeat");
                return;
            }
            debug!("[presence] heartbeat every {heartbeat_interval:?}");
            let out_tx = out_tx.clone();
            *heartbeat = Some(tokio::spawn(async move {
                let mut ticker = tokio::time::interval(heartbeat_interval);
                // First tick fires immediately; the server expects the
                // first heartbeat one full period after hello.
                ticker.tick().await;
                loop {
                    ticker.tick().await;
                    if out_tx
                        .send(Message::text(wire::heartbeat_frame()))
                        .await
                        .is_err()
                    {
                        break;
                    }
                }
            }));
        }
        Ok(Inbound::Event(snapshot)) => {
            debug!(
                "[presence] event: status={:?} activities={}",
                snapshot.discord_status,
                snapshot.activities.len()
            );
            tx.send_replace(PresencePhase::Live(snapshot));
        }
        Ok(Inbound::Ignored(op)) => {
            debug!("[presence] ignoring op {op}");
        }
        Err(e) => {
            // Malformed frames are dropped; the session continues.
            warn!("[presence] dropping malformed frame: {e}");
        }
    }
}
