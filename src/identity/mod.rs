//! Actor identity for the back-office: roles, permissions, the principal, and
//! the sessions that pin a principal for its lifetime.
//! Keep the public surface thin and split implementation across sub-modules.

mod error;
mod role;
mod permission;
mod principal;
mod catalog;
mod source;
mod request_context;
mod session;

pub use error::IdentityError;
pub use role::Role;
pub use permission::{Permission, PermissionSet};
pub use principal::Principal;
pub use catalog::RoleCatalog;
pub use source::PermissionSource;
pub use request_context::ActorContext;
pub use session::{Session, SessionToken, SessionManager};
