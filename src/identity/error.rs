use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("unknown role '{0}'")]
    UnknownRole(String),
    #[error("permission identifier must not be empty")]
    EmptyPermission,
}
