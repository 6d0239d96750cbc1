//! Back-office access control: the actor identity model, sessions, and the
//! role/permission gate that decides what a dashboard region shows.

pub mod config;
pub mod error;
pub mod gate;
pub mod identity;

pub use config::EffectiveConfig;
pub use error::{error_message, AppError, AppResult};
pub use gate::{AccessGate, AccessOutcome, AccessRequest, Rendered};
pub use identity::{ActorContext, Permission, PermissionSource, Principal, Role};
