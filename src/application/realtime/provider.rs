//! NotificationProvider - owns at most one realtime client at a time.
//!
//! `mount` creates and opens a client unless one is already mounted;
//! `unmount` tears it down. Mounting again afterwards creates a fresh
//! client. Everything below the provider only gets a `NotificationHandle`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use super::client::{RealtimeClientConfig, RealtimeError, RealtimeNotificationClient};
use crate::domain::foundation::{UserId, VehicleId};
use crate::domain::realtime::ConnectionState;
use crate::ports::{LocalEventPublisher, NoticeSink, RealtimeTransport};

pub struct NotificationProvider {
    transport: Arc<dyn RealtimeTransport>,
    notices: Arc<dyn NoticeSink>,
    signals: Arc<dyn LocalEventPublisher>,
    config: RealtimeClientConfig,
    identity: Mutex<Option<UserId>>,
    mounted: Mutex<Option<Arc<RealtimeNotificationClient>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl NotificationProvider {
    pub fn new(
        transport: Arc<dyn RealtimeTransport>,
        notices: Arc<dyn NoticeSink>,
        signals: Arc<dyn LocalEventPublisher>,
        config: RealtimeClientConfig,
    ) -> Self {
        Self {
            transport,
            notices,
            signals,
            config,
            identity: Mutex::new(None),
            mounted: Mutex::new(None),
        }
    }

    /// Returns a handle to the mounted client, creating and opening one if
    /// none is mounted.
    pub fn mount(&self) -> Result<NotificationHandle, RealtimeError> {
        let mut mounted = lock(&self.mounted);
        if let Some(client) = mounted.as_ref() {
            return Ok(NotificationHandle {
                client: Arc::clone(client),
            });
        }

        let client = Arc::new(RealtimeNotificationClient::new(
            Arc::clone(&self.transport),
            Arc::clone(&self.notices),
            Arc::clone(&self.signals),
            self.config.clone(),
        ));
        client.set_identity(lock(&self.identity).clone());
        client.open()?;

        *mounted = Some(Arc::clone(&client));
        tracing::debug!("Notification provider mounted");
        Ok(NotificationHandle { client })
    }

    /// Tears down the mounted client, if any.
    pub fn unmount(&self) {
        if let Some(client) = lock(&self.mounted).take() {
            client.close();
            tracing::debug!("Notification provider unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        lock(&self.mounted).is_some()
    }

    /// Records the signed-in user and forwards it to the mounted client.
    pub fn set_identity(&self, user: Option<UserId>) {
        *lock(&self.identity) = user.clone();
        if let Some(client) = lock(&self.mounted).as_ref() {
            client.set_identity(user);
        }
    }
}

impl Drop for NotificationProvider {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Read-only view of the mounted client plus room membership.
#[derive(Clone)]
pub struct NotificationHandle {
    client: Arc<RealtimeNotificationClient>,
}

impl NotificationHandle {
    pub fn is_connected(&self) -> bool {
        self.client.is_connected()
    }

    pub fn state(&self) -> ConnectionState {
        self.client.state()
    }

    pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.client.watch_state()
    }

    pub fn join_vehicle_room(&self, vehicle_id: VehicleId) -> bool {
        self.client.join_vehicle_room(vehicle_id)
    }

    pub fn leave_vehicle_room(&self, vehicle_id: VehicleId) -> bool {
        self.client.leave_vehicle_room(vehicle_id)
    }
}
