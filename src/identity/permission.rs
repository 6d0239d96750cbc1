use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::IdentityError;

/// Fine-grained capability identifier such as `invoices.edit`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(String);

impl Permission {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Validating constructor for identifiers coming from config or the command line.
    pub fn parse(name: &str) -> Result<Self, IdentityError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(IdentityError::EmptyPermission);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Permission {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Set of permissions held by an actor. Empty is a valid state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<Permission>);

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, permission: &Permission) -> bool {
        self.0.contains(permission)
    }

    pub fn insert(&mut self, permission: Permission) -> bool {
        self.0.insert(permission)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.0.iter()
    }
}

impl Extend<Permission> for PermissionSet {
    fn extend<I: IntoIterator<Item = Permission>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for PermissionSet {
    type Item = Permission;
    type IntoIter = std::collections::btree_set::IntoIter<Permission>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PermissionSet {
    type Item = &'a Permission;
    type IntoIter = std::collections::btree_set::Iter<'a, Permission>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_rejects_blank() {
        assert_eq!(Permission::parse("  invoices.view ").unwrap().as_str(), "invoices.view");
        assert_eq!(Permission::parse("   ").unwrap_err(), IdentityError::EmptyPermission);
    }

    #[test]
    fn set_deduplicates() {
        let set: PermissionSet = ["invoices.view", "invoices.view", "parties.view"]
            .into_iter()
            .map(Permission::from)
            .collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&Permission::from("parties.view")));
        assert!(!set.contains(&Permission::from("parties.edit")));
    }

    #[test]
    fn owned_set_extends_another() {
        let mut held: PermissionSet = [Permission::from("reports.export")].into_iter().collect();
        let derived: PermissionSet = ["invoices.view", "reports.export"].into_iter().map(Permission::from).collect();
        held.extend(derived);
        let names: Vec<&str> = held.iter().map(|p| p.as_str()).collect();
        assert_eq!(names, vec!["invoices.view", "reports.export"]);
    }

    #[test]
    fn set_serializes_as_plain_list() {
        let set: PermissionSet = [Permission::from("b.x"), Permission::from("a.y")].into_iter().collect();
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json, serde_json::json!(["a.y", "b.x"]));
    }
}
