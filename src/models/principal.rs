use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalKind {
    User,
    Group,
}

impl PrincipalKind {
    pub fn from_group_flag(is_group: bool) -> Self {
        if is_group {
            PrincipalKind::Group
        } else {
            PrincipalKind::User
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalKind::User => "user",
            PrincipalKind::Group => "group",
        }
    }
}

impl fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable identifier the SSO service hands back from a lookup.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PrincipalId {
    pub name: String,
    pub domain: String,
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.domain)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PrincipalRef {
    pub kind: PrincipalKind,
    #[serde(flatten)]
    pub id: PrincipalId,
}

impl PrincipalRef {
    pub fn user(id: PrincipalId) -> Self {
        Self {
            kind: PrincipalKind::User,
            id,
        }
    }

    pub fn group(id: PrincipalId) -> Self {
        Self {
            kind: PrincipalKind::Group,
            id,
        }
    }
}

/// A principal named by the caller, not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub kind: PrincipalKind,
}

impl Target {
    pub fn new(name: impl Into<String>, kind: PrincipalKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Requested changes for one update of a group. Consumed once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub description: Option<String>,
    pub add: Option<Target>,
    pub remove: Option<Target>,
}

impl ChangeSet {
    /// Empty strings mean "leave unchanged". `target_is_group` applies to both
    /// the add and the remove target.
    pub fn new(
        description: Option<String>,
        add: Option<String>,
        remove: Option<String>,
        target_is_group: bool,
    ) -> Self {
        let kind = PrincipalKind::from_group_flag(target_is_group);
        Self {
            description: non_empty(description),
            add: non_empty(add).map(|name| Target::new(name, kind)),
            remove: non_empty(remove).map(|name| Target::new(name, kind)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.add.is_none() && self.remove.is_none()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
