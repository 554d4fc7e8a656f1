//! RealtimeNotificationClient - reconnecting event channel feeding notices
//! and local signals.
//!
//! ## Lifecycle
//!
//! `open` spawns one connection worker. The worker connects, identifies the
//! user, then handles inbound events one at a time until the connection
//! drops, after which it reconnects under the `ReconnectPolicy`. After
//! `max_attempts` consecutive failures it gives up and the client stays
//! disconnected.
//!
//! ## Teardown
//!
//! `close` flips a torn-down flag synchronously and signals the worker. The
//! worker leaves whatever it is awaiting (connect, event, reconnect delay),
//! closes the connection and exits. Each effect is checked and applied under
//! the same gate that `close` takes to flip the flag, so an effect already
//! being applied finishes before `close` returns and none starts afterwards.
//! Notice sinks and publishers must therefore not close the client from
//! inside `show` / `publish`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::domain::foundation::{DomainError, ErrorCode, StateMachine, UserId, VehicleId};
use crate::domain::realtime::{
    dispatch, ConnectionState, Effect, EventDecodeError, NotificationEvent, OutboundEvent,
    ReconnectPolicy,
};
use crate::ports::{
    ConnectionFailure, InboundMessage, LocalEventPublisher, NoticeSink, RealtimeConnection,
    RealtimeTransport,
};

/// Errors surfaced by the client API. Connection failures never are; they
/// are absorbed by reconnection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RealtimeError {
    #[error("realtime client has been torn down")]
    TornDown,

    #[error("no async runtime available to run the connection")]
    NoRuntime,
}

impl From<RealtimeError> for DomainError {
    fn from(err: RealtimeError) -> Self {
        let code = match err {
            RealtimeError::TornDown => ErrorCode::ConnectionTornDown,
            RealtimeError::NoRuntime => ErrorCode::InternalError,
        };
        DomainError::new(code, err.to_string())
    }
}

/// Client tuning.
#[derive(Debug, Clone)]
pub struct RealtimeClientConfig {
    pub reconnect: ReconnectPolicy,
    /// Outbound signals buffered between the API and the worker.
    pub outbound_capacity: usize,
}

impl Default for RealtimeClientConfig {
    fn default() -> Self {
        Self {
            reconnect: ReconnectPolicy::default(),
            outbound_capacity: 64,
        }
    }
}

/// State shared between the client handle and its worker.
struct Shared {
    torn_down: AtomicBool,
    /// Held while an effect is applied and while teardown flips the flag.
    effects: Mutex<()>,
    state: watch::Sender<ConnectionState>,
    identity: watch::Sender<Option<UserId>>,
    shutdown: watch::Sender<bool>,
}

impl Shared {
    fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }

    /// Applies a validated transition. Invalid ones (e.g. anything after
    /// teardown) are ignored.
    fn transition(&self, target: ConnectionState) -> bool {
        let mut applied = false;
        self.state.send_if_modified(|current| {
            if *current == target {
                return false;
            }
            match current.transition_to(target) {
                Ok(next) => {
                    *current = next;
                    applied = true;
                    true
                }
                Err(_) => {
                    tracing::trace!(from = ?current, to = ?target, "Ignoring connection transition");
                    false
                }
            }
        });
        applied
    }
}

struct Worker {
    handle: JoinHandle<()>,
    outbound: mpsc::Sender<OutboundEvent>,
}

/// Reconnecting realtime client. Owned by a single `NotificationProvider`.
pub struct RealtimeNotificationClient {
    transport: Arc<dyn RealtimeTransport>,
    notices: Arc<dyn NoticeSink>,
    signals: Arc<dyn LocalEventPublisher>,
    config: RealtimeClientConfig,
    shared: Arc<Shared>,
    worker: Mutex<Option<Worker>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RealtimeNotificationClient {
    pub fn new(
        transport: Arc<dyn RealtimeTransport>,
        notices: Arc<dyn NoticeSink>,
        signals: Arc<dyn LocalEventPublisher>,
        config: RealtimeClientConfig,
    ) -> Self {
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        let (identity, _) = watch::channel(None);
        let (shutdown, _) = watch::channel(false);

        Self {
            transport,
            notices,
            signals,
            config,
            shared: Arc::new(Shared {
                torn_down: AtomicBool::new(false),
                effects: Mutex::new(()),
                state,
                identity,
                shutdown,
            }),
            worker: Mutex::new(None),
        }
    }

    /// Starts the connection worker.
    ///
    /// Idempotent while a worker is running. Once a worker has given up
    /// after exhausting its attempts, `open` starts a fresh one.
    ///
    /// # Errors
    ///
    /// - `TornDown` after `close`
    /// - `NoRuntime` outside a tokio runtime
    pub fn open(&self) -> Result<(), RealtimeError> {
        if self.shared.is_torn_down() {
            return Err(RealtimeError::TornDown);
        }

        let mut slot = lock(&self.worker);
        if let Some(worker) = slot.as_ref() {
            if !worker.handle.is_finished() {
                tracing::debug!("Realtime client already open");
                return Ok(());
            }
        }

        let runtime = Handle::try_current().map_err(|_| RealtimeError::NoRuntime)?;
        let (outbound_tx, outbound_rx) = mpsc::channel(self.config.outbound_capacity.max(1));

        let worker = ConnectionWorker {
            transport: Arc::clone(&self.transport),
            notices: Arc::clone(&self.notices),
            signals: Arc::clone(&self.signals),
            policy: self.config.reconnect,
            shared: Arc::clone(&self.shared),
            shutdown: self.shared.shutdown.subscribe(),
            identity: self.shared.identity.subscribe(),
            outbound: outbound_rx,
        };

        *slot = Some(Worker {
            handle: runtime.spawn(worker.run()),
            outbound: outbound_tx,
        });
        tracing::info!("Realtime client opened");
        Ok(())
    }

    /// Tears the client down. Only the first call has any effect.
    pub fn close(&self) {
        let already = {
            let _gate = lock(&self.shared.effects);
            self.shared.torn_down.swap(true, Ordering::SeqCst)
        };
        if already {
            return;
        }
        self.shared.shutdown.send_replace(true);
        self.shared.transition(ConnectionState::TornDown);
        // The worker exits on its own after closing the connection.
        lock(&self.worker).take();
        tracing::info!("Realtime client torn down");
    }

    /// Sets or clears the signed-in user. A known user is announced with
    /// `join-user` on every connect and immediately if already connected.
    pub fn set_identity(&self, user: Option<UserId>) {
        self.shared.identity.send_if_modified(|current| {
            if *current == user {
                false
            } else {
                *current = user;
                true
            }
        });
    }

    pub fn identity(&self) -> Option<UserId> {
        self.shared.identity.borrow().clone()
    }

    /// Subscribes to this vehicle's updates. Dropped when not connected.
    pub fn join_vehicle_room(&self, vehicle_id: VehicleId) -> bool {
        self.send(OutboundEvent::JoinVehicle(vehicle_id))
    }

    /// Unsubscribes from this vehicle's updates. Dropped when not connected.
    pub fn leave_vehicle_room(&self, vehicle_id: VehicleId) -> bool {
        self.send(OutboundEvent::LeaveVehicle(vehicle_id))
    }

    fn send(&self, event: OutboundEvent) -> bool {
        if !self.is_connected() {
            tracing::debug!(event = event.name(), "Not connected, dropping outbound signal");
            return false;
        }
        match lock(&self.worker).as_ref() {
            Some(worker) => match worker.outbound.try_send(event) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(error = %e, "Outbound signal dropped");
                    false
                }
            },
            None => false,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state().is_connected()
    }

    pub fn state(&self) -> ConnectionState {
        *self.shared.state.borrow()
    }

    /// Watches connection state changes.
    pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.shared.state.subscribe()
    }

    pub fn is_torn_down(&self) -> bool {
        self.shared.is_torn_down()
    }
}

impl Drop for RealtimeNotificationClient {
    fn drop(&mut self) {
        self.close();
    }
}

/// How a connected session ended.
enum SessionEnd {
    Shutdown,
    Dropped(ConnectionFailure),
}

struct ConnectionWorker {
    transport: Arc<dyn RealtimeTransport>,
    notices: Arc<dyn NoticeSink>,
    signals: Arc<dyn LocalEventPublisher>,
    policy: ReconnectPolicy,
    shared: Arc<Shared>,
    shutdown: watch::Receiver<bool>,
    identity: watch::Receiver<Option<UserId>>,
    outbound: mpsc::Receiver<OutboundEvent>,
}

impl ConnectionWorker {
    async fn run(mut self) {
        let mut schedule = self.policy.schedule();

        loop {
            if self.stopping() {
                break;
            }

            self.shared.transition(ConnectionState::Connecting);
            tracing::debug!(attempt = schedule.failures() + 1, "Connecting realtime channel");

            let attempt = tokio::select! {
                biased;
                _ = self.shutdown.changed() => break,
                result = self.transport.connect() => result,
            };

            match attempt {
                Ok(connection) => {
                    schedule.reset();
                    // Signals queued for an earlier session are stale.
                    while self.outbound.try_recv().is_ok() {}
                    if !self.shared.transition(ConnectionState::Connected) {
                        let mut connection = connection;
                        connection.close().await;
                        break;
                    }
                    tracing::info!("Realtime channel connected");

                    match self.serve(connection).await {
                        SessionEnd::Shutdown => break,
                        SessionEnd::Dropped(failure) => {
                            tracing::warn!(error = %failure, "Realtime channel dropped");
                            self.shared.transition(ConnectionState::Disconnected);
                            if !self.pause(self.policy.delay_after(1)).await {
                                break;
                            }
                        }
                    }
                }
                Err(failure) => {
                    self.shared.transition(ConnectionState::Disconnected);
                    match schedule.record_failure() {
                        Some(delay) => {
                            tracing::warn!(
                                error = %failure,
                                failures = schedule.failures(),
                                retry_in_ms = delay.as_millis() as u64,
                                "Realtime connection attempt failed"
                            );
                            if !self.pause(delay).await {
                                break;
                            }
                        }
                        None => {
                            tracing::warn!(
                                error = %failure,
                                failures = schedule.failures(),
                                "Realtime reconnection attempts exhausted"
                            );
                            break;
                        }
                    }
                }
            }
        }

        tracing::debug!("Realtime worker stopped");
    }

    fn stopping(&self) -> bool {
        self.shared.is_torn_down() || *self.shutdown.borrow()
    }

    /// Sleeps unless shutdown arrives first. Returns false on shutdown.
    async fn pause(&mut self, delay: Duration) -> bool {
        tokio::select! {
            biased;
            _ = self.shutdown.changed() => false,
            _ = tokio::time::sleep(delay) => !self.stopping(),
        }
    }

    async fn serve(&mut self, mut connection: Box<dyn RealtimeConnection>) -> SessionEnd {
        let identity = self.identity.borrow_and_update().clone();
        if let Some(user) = identity {
            if let Err(failure) = Self::emit(&mut connection, OutboundEvent::JoinUser(user)).await {
                return SessionEnd::Dropped(failure);
            }
        }

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.changed() => {
                    connection.close().await;
                    return SessionEnd::Shutdown;
                }
                changed = self.identity.changed() => {
                    if changed.is_err() {
                        connection.close().await;
                        return SessionEnd::Shutdown;
                    }
                    let identity = self.identity.borrow_and_update().clone();
                    if let Some(user) = identity {
                        if let Err(failure) =
                            Self::emit(&mut connection, OutboundEvent::JoinUser(user)).await
                        {
                            return SessionEnd::Dropped(failure);
                        }
                    }
                }
                command = self.outbound.recv() => match command {
                    Some(event) => {
                        if let Err(failure) = Self::emit(&mut connection, event).await {
                            return SessionEnd::Dropped(failure);
                        }
                    }
                    None => {
                        connection.close().await;
                        return SessionEnd::Shutdown;
                    }
                },
                inbound = connection.next_event() => match inbound {
                    Some(Ok(message)) => self.handle(message),
                    Some(Err(failure)) => return SessionEnd::Dropped(failure),
                    None => {
                        return SessionEnd::Dropped(ConnectionFailure::Lost(
                            "closed by server".to_string(),
                        ))
                    }
                },
            }
        }
    }

    async fn emit(
        connection: &mut Box<dyn RealtimeConnection>,
        event: OutboundEvent,
    ) -> Result<(), ConnectionFailure> {
        tracing::debug!(event = event.name(), "Emitting realtime signal");
        connection.emit(event.name(), event.payload()).await
    }

    fn handle(&self, message: InboundMessage) {
        let event = match NotificationEvent::decode(&message.name, message.payload) {
            Ok(event) => event,
            Err(EventDecodeError::UnknownEvent(name)) => {
                tracing::trace!(event = %name, "Ignoring unhandled realtime event");
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Dropping malformed realtime event");
                return;
            }
        };

        tracing::debug!(kind = event.kind(), "Realtime event received");
        for effect in dispatch(event) {
            let _gate = lock(&self.shared.effects);
            if self.shared.is_torn_down() {
                tracing::debug!("Suppressing realtime effect after teardown");
                return;
            }
            match effect {
                Effect::Notice(notice) => self.notices.show(notice),
                Effect::Broadcast(signal) => self.signals.publish(signal),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemorySignalPublisher, RecordingNoticeSink, ScriptedTransport};
    use crate::domain::realtime::Notice;
    use serde_json::json;

    struct Harness {
        transport: ScriptedTransport,
        notices: Arc<RecordingNoticeSink>,
        signals: Arc<InMemorySignalPublisher>,
        client: RealtimeNotificationClient,
    }

    fn harness(transport: ScriptedTransport, policy: ReconnectPolicy) -> Harness {
        let notices = Arc::new(RecordingNoticeSink::new());
        let signals = Arc::new(InMemorySignalPublisher::new());
        let client = RealtimeNotificationClient::new(
            Arc::new(transport.clone()),
            notices.clone(),
            signals.clone(),
            RealtimeClientConfig {
                reconnect: policy,
                outbound_capacity: 8,
            },
        );
        Harness {
            transport,
            notices,
            signals,
            client,
        }
    }

    async fn wait_for(client: &RealtimeNotificationClient, target: ConnectionState) {
        let mut state = client.watch_state();
        tokio::time::timeout(Duration::from_secs(5), state.wait_for(|s| *s == target))
            .await
            .expect("state not reached in time")
            .expect("state channel closed");
    }

    async fn eventually(condition: impl Fn() -> bool) {
        for _ in 0..500 {
            if condition() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("condition not met in time");
    }

    #[tokio::test]
    async fn starts_disconnected() {
        let h = harness(ScriptedTransport::always_accept(), ReconnectPolicy::default());
        assert_eq!(h.client.state(), ConnectionState::Disconnected);
        assert!(!h.client.is_connected());
    }

    #[tokio::test]
    async fn connects_and_dispatches_low_stock() {
        let h = harness(ScriptedTransport::always_accept(), ReconnectPolicy::default());
        h.client.open().unwrap();
        wait_for(&h.client, ConnectionState::Connected).await;

        h.transport
            .push_event("inventory-update", json!({"type": "LOW_STOCK", "stockCount": 2}));
        eventually(|| h.notices.count() > 0).await;

        assert_eq!(h.notices.count(), 1);
        assert!(h.notices.last().unwrap().description.unwrap().contains('2'));
        assert_eq!(h.signals.signal_count(), 0);
    }

    #[tokio::test]
    async fn second_open_does_not_start_another_connection() {
        let h = harness(ScriptedTransport::always_accept(), ReconnectPolicy::default());
        h.client.open().unwrap();
        h.client.open().unwrap();
        wait_for(&h.client, ConnectionState::Connected).await;

        assert_eq!(h.transport.attempts(), 1);
    }

    #[tokio::test]
    async fn open_after_close_is_rejected() {
        let h = harness(ScriptedTransport::always_accept(), ReconnectPolicy::default());
        h.client.close();
        assert_eq!(h.client.open(), Err(RealtimeError::TornDown));
        assert_eq!(h.client.state(), ConnectionState::TornDown);
    }

    #[tokio::test]
    async fn join_vehicle_is_dropped_while_disconnected() {
        let h = harness(ScriptedTransport::always_refuse(), ReconnectPolicy::default());
        assert!(!h.client.join_vehicle_room(VehicleId::new("veh_1").unwrap()));
    }

    #[tokio::test]
    async fn close_severs_the_live_connection() {
        let h = harness(ScriptedTransport::always_accept(), ReconnectPolicy::default());
        h.client.open().unwrap();
        wait_for(&h.client, ConnectionState::Connected).await;

        h.client.close();
        eventually(|| h.transport.closed() > 0).await;

        assert_eq!(h.transport.closed(), 1);
        assert!(!h.client.is_connected());
    }

    /// Notice sink that takes a while to show each notice.
    #[derive(Default)]
    struct SlowNoticeSink {
        entered: AtomicBool,
        shown: Mutex<Vec<Notice>>,
    }

    impl SlowNoticeSink {
        fn count(&self) -> usize {
            self.shown.lock().unwrap().len()
        }
    }

    impl NoticeSink for SlowNoticeSink {
        fn show(&self, notice: Notice) {
            self.entered.store(true, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(150));
            self.shown.lock().unwrap().push(notice);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn close_waits_for_the_effect_being_applied() {
        let transport = ScriptedTransport::always_accept();
        let notices = Arc::new(SlowNoticeSink::default());
        let signals = Arc::new(InMemorySignalPublisher::new());
        let client = RealtimeNotificationClient::new(
            Arc::new(transport.clone()),
            notices.clone(),
            signals.clone(),
            RealtimeClientConfig::default(),
        );
        client.open().unwrap();
        wait_for(&client, ConnectionState::Connected).await;

        transport.push_event(
            "notification",
            json!({"title": "Reservation confirmed", "message": "See you Saturday"}),
        );
        eventually(|| notices.entered.load(Ordering::SeqCst)).await;

        client.close();
        let shown_at_close = notices.count();
        let published_at_close = signals.signal_count();
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(shown_at_close, 1);
        assert_eq!(notices.count(), shown_at_close);
        assert_eq!(signals.signal_count(), published_at_close);
    }

    #[test]
    fn open_outside_runtime_fails() {
        let h = harness(ScriptedTransport::always_accept(), ReconnectPolicy::default());
        assert_eq!(h.client.open(), Err(RealtimeError::NoRuntime));
    }
}
