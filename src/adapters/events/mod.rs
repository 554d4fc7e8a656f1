//! Local signal adapters.

mod in_memory;
mod local_bus;

pub use in_memory::InMemorySignalPublisher;
pub use local_bus::LocalEventBus;
