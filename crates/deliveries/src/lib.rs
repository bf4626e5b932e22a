//! Deliveries plugin: state changes of a delivery.
//!
//! Deterministic domain logic only; persistence is out of scope.

pub mod state_change;

pub use state_change::{
    DeliveryState, DeliveryStateChange, DeliveryStateChangeFields, StateChangeMessage,
    StateChangeStatus,
};
