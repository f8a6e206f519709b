//! Connection state machine and run loop.
//!
//! Exactly one logical connection to the companion exists at a time. The
//! run loop is a single task, so reconnect attempts are inherently
//! serialized: a new transport is only dialed after the previous one is
//! fully torn down, and transports are never reused.
//!
//! # Event Loop
//!
//! While a connection is open the loop handles:
//!
//! - Inbound companion frames → parsed and dispatched to the registry
//! - Outbound reports from handlers → serialized onto the socket
//!
//! Any transport error or close exits the open phase; the loop then waits
//! the fixed reconnect interval and dials again, indefinitely.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, error, info, warn};

use crate::protocol::{InboundMessage, OutboundMessage};
use crate::registry::Registry;

use super::outbound::Outbound;

// ============================================================================
// Types
// ============================================================================

/// The transport stream produced by dialing the companion endpoint.
type Transport = WebSocketStream<MaybeTlsStream<TcpStream>>;

// ============================================================================
// ConnectionState
// ============================================================================

/// Lifecycle state of the logical companion connection.
///
/// Transitions: `Disconnected → Connecting → Open → Disconnected`, forever.
/// Teardown is synchronous within the run loop, so there is no observable
/// closing state between `Open` and `Disconnected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No transport exists. The initial state, and the state between a
    /// close and the next dial.
    Disconnected,
    /// A dial is in flight.
    Connecting,
    /// The channel is up; reports flow and commands are dispatched.
    Open,
}

// ============================================================================
// ConnectionManager
// ============================================================================

/// Owns the single outbound channel to the companion process.
///
/// # Example
///
/// ```ignore
/// let outbound = Outbound::new();
/// let manager = ConnectionManager::new(
///     "ws://127.0.0.1:2394".into(),
///     Duration::from_secs(2),
///     registry,
///     outbound,
/// );
/// let _loop = manager.initialize();
/// ```
pub struct ConnectionManager {
    /// Companion WebSocket endpoint.
    endpoint: String,
    /// Fixed delay between a close (or failed dial) and the next dial.
    reconnect_interval: Duration,
    /// Dispatch target for inbound messages and resync.
    registry: Arc<Registry>,
    /// The send handle attached while the connection is open.
    outbound: Outbound,
    /// Observable lifecycle state.
    state: Arc<Mutex<ConnectionState>>,
}

impl ConnectionManager {
    /// Creates a manager; no connection is attempted until
    /// [`initialize`](Self::initialize).
    #[must_use]
    pub fn new(
        endpoint: String,
        reconnect_interval: Duration,
        registry: Arc<Registry>,
        outbound: Outbound,
    ) -> Self {
        Self {
            endpoint,
            reconnect_interval,
            registry,
            outbound,
            state: Arc::new(Mutex::new(ConnectionState::Disconnected)),
        }
    }

    /// Returns the current lifecycle state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        *self.state.lock()
    }

    /// Returns a clone of the outbound send handle.
    #[inline]
    #[must_use]
    pub fn outbound(&self) -> Outbound {
        self.outbound.clone()
    }

    /// Spawns the connect/reconnect run loop.
    ///
    /// The loop runs for the life of the returned task: dial, serve the
    /// connection until it drops, wait the reconnect interval, dial again.
    pub fn initialize(&self) -> JoinHandle<()> {
        let endpoint = self.endpoint.clone();
        let interval = self.reconnect_interval;
        let registry = Arc::clone(&self.registry);
        let outbound = self.outbound.clone();
        let state = Arc::clone(&self.state);

        tokio::spawn(Self::run(endpoint, interval, registry, outbound, state))
    }

    /// The connect/reconnect loop.
    async fn run(
        endpoint: String,
        interval: Duration,
        registry: Arc<Registry>,
        outbound: Outbound,
        state: Arc<Mutex<ConnectionState>>,
    ) {
        loop {
            *state.lock() = ConnectionState::Connecting;

            match connect_async(&endpoint).await {
                Ok((transport, _)) => {
                    info!(endpoint = %endpoint, "Companion connection established");
                    *state.lock() = ConnectionState::Open;

                    let (report_tx, report_rx) = mpsc::unbounded_channel();
                    outbound.attach(report_tx);

                    // Push every handler's current state so the companion can
                    // redraw its buttons. Partial resync is fine; the UI may
                    // still be loading.
                    registry.resync();

                    Self::serve(transport, report_rx, &registry).await;

                    outbound.detach();
                    *state.lock() = ConnectionState::Disconnected;
                    debug!("Companion connection closed");
                }
                Err(e) => {
                    *state.lock() = ConnectionState::Disconnected;
                    debug!(endpoint = %endpoint, error = %e, "Companion connect failed");
                }
            }

            // Fixed interval, not exponential: the companion is on localhost
            // and is either running or not.
            sleep(interval).await;
        }
    }

    /// Serves one open connection until it closes or errors.
    async fn serve(
        transport: Transport,
        mut report_rx: mpsc::UnboundedReceiver<OutboundMessage>,
        registry: &Registry,
    ) {
        let (mut sink, mut source) = transport.split();

        loop {
            tokio::select! {
                frame = source.next() => {
                    if !Self::handle_frame(frame, registry).await {
                        break;
                    }
                }

                report = report_rx.recv() => {
                    let Some(report) = report else { break };
                    if !Self::handle_report(report, &mut sink).await {
                        break;
                    }
                }
            }
        }

        let _ = sink.close().await;
    }

    /// Handles one inbound frame. Returns `false` when the connection is done.
    async fn handle_frame(
        frame: Option<Result<Message, tokio_tungstenite::tungstenite::Error>>,
        registry: &Registry,
    ) -> bool {
        match frame {
            Some(Ok(Message::Text(text))) => {
                match InboundMessage::parse(&text) {
                    Ok(message) => registry.dispatch(&message).await,
                    // Fatal for this message only; the connection stays up.
                    Err(e) => warn!(error = %e, "Dropping malformed companion message"),
                }
                true
            }

            Some(Ok(Message::Close(_))) => {
                debug!("Companion closed the connection");
                false
            }

            Some(Err(e)) => {
                error!(error = %e, "Companion transport error");
                false
            }

            None => {
                debug!("Companion stream ended");
                false
            }

            // Ignore Binary, Ping, Pong
            _ => true,
        }
    }

    /// Writes one report to the socket. Returns `false` when the connection
    /// is done.
    async fn handle_report(
        report: OutboundMessage,
        sink: &mut SplitSink<Transport, Message>,
    ) -> bool {
        match report.to_wire() {
            Ok(json) => {
                if let Err(e) = sink.send(Message::Text(json.into())).await {
                    warn!(error = %e, "Failed to send state report");
                    return false;
                }
                true
            }
            Err(e) => {
                warn!(event = %report.event, error = %e, "Failed to serialize state report");
                true
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tokio::net::TcpListener;
    use tokio::time::timeout;
    use tokio_tungstenite::accept_async;

    use crate::error::Result;
    use crate::registry::EventHandler;

    /// Resync-reports a fixed state and records inbound events.
    struct ReportingHandler {
        outbound: Outbound,
        events: Mutex<Vec<String>>,
        resyncs: AtomicUsize,
    }

    impl ReportingHandler {
        fn new(outbound: Outbound) -> Self {
            Self {
                outbound,
                events: Mutex::new(Vec::new()),
                resyncs: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl EventHandler for ReportingHandler {
        async fn handle_event(&self, message: &InboundMessage) -> Result<()> {
            self.events.lock().push(message.event.clone());
            Ok(())
        }

        fn on_connection(&self) -> Result<()> {
            self.resyncs.fetch_add(1, Ordering::SeqCst);
            self.outbound.send(OutboundMessage::state("micMutedState", true));
            Ok(())
        }
    }

    struct Harness {
        listener: TcpListener,
        manager: ConnectionManager,
        handler: Arc<ReportingHandler>,
    }

    async fn harness() -> Harness {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let port = listener.local_addr().expect("addr").port();

        let outbound = Outbound::new();
        let handler = Arc::new(ReportingHandler::new(outbound.clone()));

        let mut registry = Registry::new();
        registry.register(handler.clone() as Arc<dyn EventHandler>);

        let manager = ConnectionManager::new(
            format!("ws://127.0.0.1:{port}"),
            Duration::from_millis(100),
            Arc::new(registry),
            outbound,
        );

        Harness {
            listener,
            manager,
            handler,
        }
    }

    async fn accept_companion(listener: &TcpListener) -> WebSocketStream<TcpStream> {
        let (stream, _) = timeout(Duration::from_secs(5), listener.accept())
            .await
            .expect("companion accept timed out")
            .expect("accept");
        accept_async(stream).await.expect("upgrade")
    }

    async fn wait_until(mut condition: impl FnMut() -> bool) {
        timeout(Duration::from_secs(5), async {
            while !condition() {
                sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("condition timed out");
    }

    #[tokio::test]
    async fn test_open_triggers_resync_report() {
        let h = harness().await;
        let run = h.manager.initialize();

        let mut companion = accept_companion(&h.listener).await;

        let frame = timeout(Duration::from_secs(5), companion.next())
            .await
            .expect("report timed out")
            .expect("frame")
            .expect("ok");
        assert_eq!(
            frame.into_text().expect("text").as_str(),
            r#"{"event":"micMutedState","muted":true}"#
        );
        assert_eq!(h.handler.resyncs.load(Ordering::SeqCst), 1);
        assert_eq!(h.manager.state(), ConnectionState::Open);

        run.abort();
    }

    #[tokio::test]
    async fn test_inbound_commands_reach_handlers() {
        let h = harness().await;
        let run = h.manager.initialize();

        let mut companion = accept_companion(&h.listener).await;
        let _resync = companion.next().await;

        companion
            .send(Message::Text(r#"{"event":"toggleMic"}"#.into()))
            .await
            .expect("send");

        let handler = h.handler.clone();
        wait_until(|| !handler.events.lock().is_empty()).await;
        assert_eq!(h.handler.events.lock().as_slice(), ["toggleMic"]);

        run.abort();
    }

    #[tokio::test]
    async fn test_malformed_message_does_not_drop_connection() {
        let h = harness().await;
        let run = h.manager.initialize();

        let mut companion = accept_companion(&h.listener).await;
        let _resync = companion.next().await;

        companion
            .send(Message::Text("not json".into()))
            .await
            .expect("send");
        companion
            .send(Message::Text(r#"{"event":"getCameraState"}"#.into()))
            .await
            .expect("send");

        // The well-formed follow-up arrives on the same connection.
        let handler = h.handler.clone();
        wait_until(|| !handler.events.lock().is_empty()).await;
        assert_eq!(h.handler.events.lock().as_slice(), ["getCameraState"]);
        assert_eq!(h.manager.state(), ConnectionState::Open);

        run.abort();
    }

    #[tokio::test]
    async fn test_reconnects_after_drop_and_resyncs_again() {
        let h = harness().await;
        let run = h.manager.initialize();

        let companion = accept_companion(&h.listener).await;
        drop(companion);

        let handler = h.handler.clone();
        let mut second = accept_companion(&h.listener).await;
        wait_until(|| handler.resyncs.load(Ordering::SeqCst) >= 2).await;

        // The replacement connection carries a fresh resync report.
        let frame = timeout(Duration::from_secs(5), second.next())
            .await
            .expect("report timed out")
            .expect("frame")
            .expect("ok");
        assert!(frame.into_text().expect("text").contains("micMutedState"));

        run.abort();
    }

    #[tokio::test]
    async fn test_failed_dial_eventually_connects() {
        // Reserve a port, refuse connections on it at first.
        let port_holder = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = port_holder.local_addr().expect("addr");
        drop(port_holder);

        let outbound = Outbound::new();
        let handler = Arc::new(ReportingHandler::new(outbound.clone()));
        let mut registry = Registry::new();
        registry.register(handler.clone() as Arc<dyn EventHandler>);

        let manager = ConnectionManager::new(
            format!("ws://{addr}"),
            Duration::from_millis(50),
            Arc::new(registry),
            outbound,
        );
        let run = manager.initialize();

        // A few dials fail while nothing is listening.
        sleep(Duration::from_millis(200)).await;
        assert_ne!(manager.state(), ConnectionState::Open);

        // Once the companion appears, the next retry succeeds.
        let listener = TcpListener::bind(addr).await.expect("rebind");
        let _companion = accept_companion(&listener).await;
        wait_until(|| handler.resyncs.load(Ordering::SeqCst) >= 1).await;
        assert_eq!(manager.state(), ConnectionState::Open);

        run.abort();
    }

    #[tokio::test]
    async fn test_outbound_drops_silently_while_disconnected() {
        let h = harness().await;

        // Not initialized: nothing is attached.
        let outbound = h.manager.outbound();
        assert!(!outbound.is_open());
        outbound.send(OutboundMessage::state("micMutedState", false));
        assert_eq!(h.manager.state(), ConnectionState::Disconnected);
    }
}
