//! WebSocket session lifecycle.
//!
//! Responsibilities:
//! - Upgrade HTTP -> WS
//! - Mint a participant id and register it before anything else is read
//! - Handshake: queue `INIT` then `READY` ahead of the first inbound frame
//! - Lifecycle: ping/pong + idle timeout, `Connecting -> Ready -> Closed`
//! - Teardown: unregister exactly once, on every exit path

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::{ws::Message, ws::WebSocket, ws::WebSocketUpgrade, State},
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};

use linguasync_core::error::{LinguaSyncError, Result};
use linguasync_core::protocol::Outbound;

use crate::app_state::AppState;
use crate::transport::codec::{self, Frame};

/// Outbound queue depth per connection. Fan-out delivery is lossy beyond
/// this backlog.
const OUTBOUND_QUEUE: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Connecting,
    Ready,
    Closed,
}

#[derive(Debug)]
struct SessionState {
    phase: Phase,
    last_activity: Instant,
}

/// Mint a connection-unique participant id. The counter guarantees ids are
/// never reused within a process; the timestamp keeps them hard to guess
/// across restarts.
fn next_socket_id() -> String {
    static SEQ: AtomicU64 = AtomicU64::new(1);
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos();
    format!("sock_{nanos:08x}{seq:x}")
}

fn encode(out: &Outbound) -> Result<Message> {
    let s = serde_json::to_string(out)
        .map_err(|e| LinguaSyncError::Internal(format!("json encode failed: {e}")))?;
    Ok(Message::Text(s))
}

pub async fn ws_upgrade(State(app): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| async move {
        if let Err(e) = run_session(app, socket).await {
            tracing::warn!(error = %e, "session ended with error");
        }
    })
}

async fn run_session(app: AppState, socket: WebSocket) -> Result<()> {
    let socket_id = next_socket_id();
    let (out_tx, out_rx) = mpsc::channel::<Message>(OUTBOUND_QUEUE);

    // Handshake then readiness, queued before the registry insert. Until the
    // participant is registered no fan-out can reach this queue, so the
    // client is guaranteed to see INIT and READY ahead of any envelope.
    out_tx
        .send(encode(&Outbound::Init {
            socket_id: socket_id.clone(),
        })?)
        .await
        .map_err(|_| LinguaSyncError::Closed)?;
    out_tx
        .send(encode(&Outbound::Ready)?)
        .await
        .map_err(|_| LinguaSyncError::Closed)?;

    app.registry().register(&socket_id, out_tx.clone())?;
    tracing::info!(participant = %socket_id, "client connected");

    let res = drive_session(&app, &socket_id, out_tx, out_rx, socket).await;

    // Teardown runs on every exit path. The registry guard makes a second
    // close/error event for the same id a no-op.
    if app.registry().unregister(&socket_id) {
        tracing::info!(participant = %socket_id, "client disconnected");
    }
    res
}

async fn drive_session(
    app: &AppState,
    socket_id: &str,
    out_tx: mpsc::Sender<Message>,
    mut out_rx: mpsc::Receiver<Message>,
    socket: WebSocket,
) -> Result<()> {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let mut sess = SessionState {
        phase: Phase::Connecting,
        last_activity: Instant::now(),
    };
    // Handshake and readiness are already queued; the connection is live.
    sess.phase = Phase::Ready;

    let srv = &app.cfg().server;
    let idle_timeout = Duration::from_millis(srv.idle_timeout_ms);
    let mut ping_tick = tokio::time::interval(Duration::from_millis(srv.ping_interval_ms));
    ping_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            // outbound writer
            maybe_out = out_rx.recv() => {
                match maybe_out {
                    Some(m) => {
                        if ws_tx.send(m).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }

            // inbound reader
            incoming = ws_rx.next() => {
                let Some(incoming) = incoming else { break; };
                let Ok(msg) = incoming else { break; };

                sess.last_activity = Instant::now();

                match codec::decode(msg) {
                    Ok(Frame::Inbound(inbound)) => {
                        if let Err(e) = app.relay().handle(socket_id, inbound).await {
                            tracing::warn!(participant = %socket_id, error = %e, "message handling failed");
                        }
                    }
                    Ok(Frame::Ping(payload)) => {
                        let _ = out_tx.send(Message::Pong(payload)).await;
                    }
                    Ok(Frame::Pong) => {}
                    Ok(Frame::Close) => break,
                    Ok(Frame::Unsupported) => {
                        tracing::warn!(participant = %socket_id, "binary frame dropped");
                    }
                    // Malformed input never closes the channel.
                    Err(e) => {
                        tracing::warn!(participant = %socket_id, error = %e, "malformed message dropped");
                    }
                }
            }

            // ping
            _ = ping_tick.tick() => {
                let _ = out_tx.send(Message::Ping(Vec::new())).await;
            }

            // idle timeout
            _ = tokio::time::sleep(Duration::from_millis(250)) => {
                if sess.last_activity.elapsed() >= idle_timeout {
                    tracing::info!(participant = %socket_id, "idle timeout");
                    break;
                }
            }
        }
    }

    sess.phase = Phase::Closed;
    tracing::debug!(participant = %socket_id, phase = ?sess.phase, "session closed");
    Ok(())
}
