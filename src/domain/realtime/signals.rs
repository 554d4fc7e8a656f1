//! In-process signals relayed to other parts of the application.

use serde_json::Value;

/// Local broadcast emitted after an inbound realtime event.
#[derive(Debug, Clone, PartialEq)]
pub enum LocalSignal {
    /// Carries the inventory update exactly as received.
    VehicleUpdated(Value),
    /// Carries the notification object exactly as received.
    NewNotification(Value),
}

impl LocalSignal {
    pub const VEHICLE_UPDATED: &'static str = "vehicle-updated";
    pub const NEW_NOTIFICATION: &'static str = "new-notification";

    pub fn name(&self) -> &'static str {
        match self {
            LocalSignal::VehicleUpdated(_) => Self::VEHICLE_UPDATED,
            LocalSignal::NewNotification(_) => Self::NEW_NOTIFICATION,
        }
    }

    pub fn payload(&self) -> &Value {
        match self {
            LocalSignal::VehicleUpdated(payload) | LocalSignal::NewNotification(payload) => {
                payload
            }
        }
    }
}
