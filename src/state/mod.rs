//! Follow-state machine and viewport observation types.

pub mod follow;

pub use follow::{FollowController, FollowState, ScrollCommand, ScrollObservation};
