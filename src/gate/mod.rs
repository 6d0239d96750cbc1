//! Access gate: declarative role/permission constraints evaluated against an
//! explicit actor context, plus the shell that picks what to render.

mod request;
mod evaluate;
mod render;

pub use request::AccessRequest;
pub use evaluate::{
    check_permissions, check_roles, decide, evaluate, explain, AccessDecision, AccessOutcome,
    DimensionCheck,
};
pub use render::{AccessGate, Rendered, DENIED_NOTICE};
