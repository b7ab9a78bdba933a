//! Test doubles for code built on the guard.
//!
//! Available with the `testing` feature:
//!
//! ```toml
//! [dev-dependencies]
//! field-guard = { path = "../field-guard", features = ["testing"] }
//! ```
//!
//! [`StubPolicy`] answers with fixed verdicts and records every call, which
//! makes "the policy was never asked" assertions straightforward.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::policy::AuthorizationPolicy;
use crate::resolution::Resolution;
use crate::role::{role_set, Permission, Role, Rule};

/// Scope entity that keeps whatever fields the probe produced.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct StubScope(Map<String, Value>);

impl StubScope {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

/// Policy with canned answers. Context is `()`.
pub struct StubPolicy {
    valid: HashSet<Role>,
    not_scoped: HashSet<Role>,
    default_rule: Rule,
    grant_role: bool,
    ownership: Result<bool, String>,
    role_checks: AtomicUsize,
    ownership_calls: AtomicUsize,
    seen_rules: Mutex<Vec<Rule>>,
    seen_scopes: Mutex<Vec<StubScope>>,
}

impl Default for StubPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl StubPolicy {
    /// Knows `user`, `admin` and `all`; grants every role check and every
    /// ownership check; nothing is exempt from scoping.
    pub fn new() -> Self {
        Self {
            valid: role_set(["user", "admin", "all"]),
            not_scoped: HashSet::new(),
            default_rule: Rule::default(),
            grant_role: true,
            ownership: Ok(true),
            role_checks: AtomicUsize::new(0),
            ownership_calls: AtomicUsize::new(0),
            seen_rules: Mutex::new(Vec::new()),
            seen_scopes: Mutex::new(Vec::new()),
        }
    }

    pub fn valid<const N: usize>(mut self, roles: [&str; N]) -> Self {
        self.valid = role_set(roles);
        self
    }

    pub fn not_scoped<const N: usize>(mut self, roles: [&str; N]) -> Self {
        self.not_scoped = role_set(roles);
        self
    }

    pub fn with_default_rule(mut self, rule: &str) -> Self {
        self.default_rule = Rule::from(rule);
        self
    }

    pub fn granting(mut self, grant: bool) -> Self {
        self.grant_role = grant;
        self
    }

    pub fn owning(mut self, owns: bool) -> Self {
        self.ownership = Ok(owns);
        self
    }

    /// Makes the ownership predicate fail with `message`.
    pub fn failing(mut self, message: &str) -> Self {
        self.ownership = Err(message.to_string());
        self
    }

    pub fn role_checks(&self) -> usize {
        self.role_checks.load(Ordering::SeqCst)
    }

    pub fn ownership_calls(&self) -> usize {
        self.ownership_calls.load(Ordering::SeqCst)
    }

    pub fn seen_rules(&self) -> Vec<Rule> {
        self.seen_rules.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn seen_scopes(&self) -> Vec<StubScope> {
        self.seen_scopes.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl AuthorizationPolicy for StubPolicy {
    type Context = ();
    type Scope = StubScope;

    fn valid_roles(&self) -> HashSet<Role> {
        self.valid.clone()
    }

    fn not_scoped_roles(&self) -> HashSet<Role> {
        self.not_scoped.clone()
    }

    fn default_rule(&self) -> Rule {
        self.default_rule.clone()
    }

    fn is_authorized(&self, _resolution: &Resolution<'_, ()>, _permission: &Permission) -> bool {
        self.role_checks.fetch_add(1, Ordering::SeqCst);
        self.grant_role
    }

    fn context_user_authorized(
        &self,
        _context: &(),
        scope: &StubScope,
        rule: &Rule,
    ) -> anyhow::Result<bool> {
        self.ownership_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut rules) = self.seen_rules.lock() {
            rules.push(rule.clone());
        }
        if let Ok(mut scopes) = self.seen_scopes.lock() {
            scopes.push(scope.clone());
        }
        self.ownership.clone().map_err(anyhow::Error::msg)
    }
}
