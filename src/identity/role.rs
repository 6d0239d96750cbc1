use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::IdentityError;

/// Coarse actor classification assigned by the external auth system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Member,
}

impl Role {
    pub fn all() -> &'static [Role] {
        &[Role::SuperAdmin, Role::Admin, Role::Member]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::Member => "member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Role::all()
            .iter()
            .copied()
            .find(|r| r.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| IdentityError::UnknownRole(name.to_string()))
    }
}
