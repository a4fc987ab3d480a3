//! Proactive ID token refresh and its projection into Swagger UI's
//! authorization store.

mod authorization;
mod coordinator;
mod identity;
mod timer;

pub use authorization::*;
pub use coordinator::{refresh_delay, system_now_ms, Clock, RefreshCoordinator};
pub use identity::*;
pub use timer::PendingRefresh;
