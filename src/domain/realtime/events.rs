//! Realtime channel events.
//!
//! Inbound event names:
//!
//! | Name | Payload |
//! |------|---------|
//! | `inventory-update` | `{ type: NEW_VEHICLE \| VEHICLE_UPDATED \| LOW_STOCK, ... }` |
//! | `notification` | `{ title, message, ... }` |
//!
//! Outbound event names: `join-user`, `join-vehicle`, `leave-vehicle`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::foundation::{UserId, VehicleId};

pub const INVENTORY_UPDATE: &str = "inventory-update";
pub const NOTIFICATION: &str = "notification";
pub const JOIN_USER: &str = "join-user";
pub const JOIN_VEHICLE: &str = "join-vehicle";
pub const LEAVE_VEHICLE: &str = "leave-vehicle";

/// Vehicle announced by a `NEW_VEHICLE` update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnouncedVehicle {
    pub brand: String,
    pub model: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Inbound event, decoded once and consumed by dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationEvent {
    NewVehicle { vehicle: AnnouncedVehicle },
    /// Payload is kept verbatim for listeners to refresh from.
    VehicleUpdated { payload: Value },
    LowStock { stock_count: u32 },
    /// `payload` is the full notification object as received.
    UserNotification {
        title: String,
        message: String,
        payload: Value,
    },
}

/// Why an inbound event could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventDecodeError {
    #[error("Unknown event '{0}'")]
    UnknownEvent(String),

    #[error("Unknown inventory update type '{0}'")]
    UnknownInventoryType(String),

    #[error("Malformed '{event}' payload: {reason}")]
    Malformed { event: String, reason: String },
}

impl EventDecodeError {
    fn malformed(event: &str, reason: impl ToString) -> Self {
        EventDecodeError::Malformed {
            event: event.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LowStockPayload {
    stock_count: u32,
}

#[derive(Deserialize)]
struct NewVehiclePayload {
    vehicle: AnnouncedVehicle,
}

#[derive(Deserialize)]
struct NotificationPayload {
    title: String,
    #[serde(default)]
    message: String,
}

impl NotificationEvent {
    /// Decodes an inbound event by channel name and JSON payload.
    pub fn decode(name: &str, payload: Value) -> Result<Self, EventDecodeError> {
        match name {
            INVENTORY_UPDATE => Self::decode_inventory(payload),
            NOTIFICATION => {
                let parsed: NotificationPayload = serde_json::from_value(payload.clone())
                    .map_err(|e| EventDecodeError::malformed(NOTIFICATION, e))?;
                Ok(NotificationEvent::UserNotification {
                    title: parsed.title,
                    message: parsed.message,
                    payload,
                })
            }
            other => Err(EventDecodeError::UnknownEvent(other.to_string())),
        }
    }

    fn decode_inventory(payload: Value) -> Result<Self, EventDecodeError> {
        let kind = payload
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| EventDecodeError::malformed(INVENTORY_UPDATE, "missing 'type'"))?;

        match kind {
            "NEW_VEHICLE" => {
                let parsed: NewVehiclePayload = serde_json::from_value(payload)
                    .map_err(|e| EventDecodeError::malformed(INVENTORY_UPDATE, e))?;
                Ok(NotificationEvent::NewVehicle {
                    vehicle: parsed.vehicle,
                })
            }
            "VEHICLE_UPDATED" => Ok(NotificationEvent::VehicleUpdated { payload }),
            "LOW_STOCK" => {
                let parsed: LowStockPayload = serde_json::from_value(payload)
                    .map_err(|e| EventDecodeError::malformed(INVENTORY_UPDATE, e))?;
                Ok(NotificationEvent::LowStock {
                    stock_count: parsed.stock_count,
                })
            }
            other => Err(EventDecodeError::UnknownInventoryType(other.to_string())),
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            NotificationEvent::NewVehicle { .. } => "new_vehicle",
            NotificationEvent::VehicleUpdated { .. } => "vehicle_updated",
            NotificationEvent::LowStock { .. } => "low_stock",
            NotificationEvent::UserNotification { .. } => "user_notification",
        }
    }
}

/// Signals the client sends to the server. No acknowledgment is expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    JoinUser(UserId),
    JoinVehicle(VehicleId),
    LeaveVehicle(VehicleId),
}

impl OutboundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            OutboundEvent::JoinUser(_) => JOIN_USER,
            OutboundEvent::JoinVehicle(_) => JOIN_VEHICLE,
            OutboundEvent::LeaveVehicle(_) => LEAVE_VEHICLE,
        }
    }

    /// The single argument sent with the event: the bare id string.
    pub fn payload(&self) -> Value {
        match self {
            OutboundEvent::JoinUser(user_id) => Value::String(user_id.to_string()),
            OutboundEvent::JoinVehicle(id) | OutboundEvent::LeaveVehicle(id) => {
                Value::String(id.to_string())
            }
        }
    }
}
