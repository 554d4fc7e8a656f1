//! Maps inbound events to user-visible effects.

use super::events::NotificationEvent;
use super::notice::Notice;
use super::signals::LocalSignal;

/// Something the client does in response to an inbound event.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Notice(Notice),
    Broadcast(LocalSignal),
}

/// Computes the effects of one inbound event.
///
/// | Event | Notice | Broadcast |
/// |-------|--------|-----------|
/// | `NEW_VEHICLE` | "New Vehicle Available!" | - |
/// | `VEHICLE_UPDATED` | - | `vehicle-updated` |
/// | `LOW_STOCK` | "Low Stock Alert" | - |
/// | `notification` | title / message | `new-notification` |
pub fn dispatch(event: NotificationEvent) -> Vec<Effect> {
    match event {
        NotificationEvent::NewVehicle { vehicle } => vec![Effect::Notice(
            Notice::new("New Vehicle Available!").with_description(format!(
                "{} {} is now available.",
                vehicle.brand, vehicle.model
            )),
        )],
        NotificationEvent::VehicleUpdated { payload } => {
            vec![Effect::Broadcast(LocalSignal::VehicleUpdated(payload))]
        }
        NotificationEvent::LowStock { stock_count } => vec![Effect::Notice(
            Notice::new("Low Stock Alert")
                .with_description(format!("Only {} units left!", stock_count)),
        )],
        NotificationEvent::UserNotification {
            title,
            message,
            payload,
        } => vec![
            Effect::Notice(Notice::new(title).with_description(message)),
            Effect::Broadcast(LocalSignal::NewNotification(payload)),
        ],
    }
}
