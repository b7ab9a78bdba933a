//! Shared fixtures: an application-like policy with a `User` and a
//! `Membership` scope entity.

#![allow(dead_code)]

use field_guard::{role_set, AuthorizationPolicy, ErrorPayload, Permission, Resolution, Role, Rule};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub role: Role,
    pub group_ids: Vec<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub current_user: Option<CurrentUser>,
}

impl RequestContext {
    pub fn as_user(id: i64, role: &str) -> Self {
        Self {
            current_user: Some(CurrentUser {
                id,
                role: Role::from(role),
                group_ids: Vec::new(),
            }),
        }
    }

    pub fn in_groups(mut self, group_ids: &[i64]) -> Self {
        if let Some(user) = self.current_user.as_mut() {
            user.group_ids = group_ids.to_vec();
        }
        self
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Membership {
    pub code: Option<String>,
    pub group_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scope {
    User(User),
    Membership(Membership),
}

impl From<User> for Scope {
    fn from(user: User) -> Self {
        Scope::User(user)
    }
}

impl From<Membership> for Scope {
    fn from(membership: Membership) -> Self {
        Scope::Membership(membership)
    }
}

/// Users own themselves; group members may act on their group's memberships.
#[derive(Default)]
pub struct AppPolicy {
    pub ownership_calls: AtomicUsize,
}

impl AppPolicy {
    pub fn ownership_calls(&self) -> usize {
        self.ownership_calls.load(Ordering::SeqCst)
    }
}

impl AuthorizationPolicy for AppPolicy {
    type Context = RequestContext;
    type Scope = Scope;

    fn valid_roles(&self) -> HashSet<Role> {
        role_set(["admin", "user", "all"])
    }

    fn not_scoped_roles(&self) -> HashSet<Role> {
        role_set(["admin", "all"])
    }

    fn default_rule(&self) -> Rule {
        Rule::from("owner")
    }

    fn is_authorized(&self, resolution: &Resolution<'_, RequestContext>, permission: &Permission) -> bool {
        permission.roles().any(|role| match role.as_str() {
            "all" => true,
            _ => resolution
                .context()
                .current_user
                .as_ref()
                .is_some_and(|user| &user.role == role || user.role.as_str() == "admin"),
        })
    }

    fn context_user_authorized(
        &self,
        context: &RequestContext,
        scope: &Scope,
        rule: &Rule,
    ) -> anyhow::Result<bool> {
        self.ownership_calls.fetch_add(1, Ordering::SeqCst);
        let Some(user) = context.current_user.as_ref() else {
            return Ok(false);
        };

        match (scope, rule.as_str()) {
            (Scope::User(target), "owner") => Ok(target.id == user.id),
            (Scope::Membership(target), "member") => Ok(user.group_ids.contains(&target.group_id)),
            (_, other) => anyhow::bail!("unknown rule `{}`", other),
        }
    }

    fn unauthorized_message(&self, resolution: &Resolution<'_, RequestContext>) -> ErrorPayload {
        ErrorPayload::new(format!("not allowed to call {}", resolution.field_name()))
            .with_code("FORBIDDEN")
    }

    fn unauthorized_scope_message(
        &self,
        _resolution: &Resolution<'_, RequestContext>,
        type_name: &str,
    ) -> ErrorPayload {
        ErrorPayload::new(format!("not allowed to act on this {}", type_name)).with_code("FORBIDDEN")
    }
}
