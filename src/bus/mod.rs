pub mod events;
pub mod queue;

pub use events::{DeliveryTask, InboundEvent};
pub use queue::{DeliveryBus, DeliveryQueue};
