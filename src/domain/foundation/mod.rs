//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, money and error types
//! that form the vocabulary of the showroom domain.

mod errors;
mod ids;
mod price;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{NoticeId, UserId, VehicleId, VehicleSlug};
pub use price::Price;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
