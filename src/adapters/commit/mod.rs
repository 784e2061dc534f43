//! Commit adapters.

mod state_slot;

pub use state_slot::StateSlot;
