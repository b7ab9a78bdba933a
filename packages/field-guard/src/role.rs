use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A caller role, e.g. `user`, `admin` or `all`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Role {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Named variant of an ownership decision.
///
/// One scope entity can back several ownership policies (`owner`, `member`,
/// `same_org`, ...); the rule tells the policy which one applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rule(String);

impl Rule {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self::new("default")
    }
}

impl From<&str> for Rule {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Rule {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Role(s) a field is declared for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Permission {
    Single(Role),
    AnyOf(Vec<Role>),
}

impl Permission {
    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        match self {
            Permission::Single(role) => std::slice::from_ref(role).iter(),
            Permission::AnyOf(roles) => roles.iter(),
        }
    }

    /// True when every declared role is one of `known`.
    pub fn is_subset_of(&self, known: &HashSet<Role>) -> bool {
        self.roles().all(|role| known.contains(role))
    }

    /// True when every declared role skips ownership checks.
    ///
    /// An empty `AnyOf` is never exempt.
    pub fn is_exempt(&self, not_scoped: &HashSet<Role>) -> bool {
        let mut roles = self.roles().peekable();
        roles.peek().is_some() && roles.all(|role| not_scoped.contains(role))
    }
}

impl From<&str> for Permission {
    fn from(role: &str) -> Self {
        Permission::Single(role.into())
    }
}

impl From<Role> for Permission {
    fn from(role: Role) -> Self {
        Permission::Single(role)
    }
}

impl From<Vec<&str>> for Permission {
    fn from(roles: Vec<&str>) -> Self {
        Permission::AnyOf(roles.into_iter().map(Role::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Permission {
    fn from(roles: [&str; N]) -> Self {
        Permission::AnyOf(roles.into_iter().map(Role::from).collect())
    }
}

impl From<Vec<Role>> for Permission {
    fn from(roles: Vec<Role>) -> Self {
        Permission::AnyOf(roles)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Permission::Single(role) => write!(f, "{}", role),
            Permission::AnyOf(roles) => {
                let names: Vec<&str> = roles.iter().map(Role::as_str).collect();
                write!(f, "[{}]", names.join(", "))
            }
        }
    }
}

/// Builds a role set from string names.
pub fn role_set<I, R>(roles: I) -> HashSet<Role>
where
    I: IntoIterator<Item = R>,
    R: Into<Role>,
{
    roles.into_iter().map(Into::into).collect()
}
