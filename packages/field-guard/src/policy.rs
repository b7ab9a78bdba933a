//! The pluggable authorization policy.
//!
//! The guard never decides on its own what a role may do or who owns an
//! entity. Every decision and every user-facing message comes from an
//! [`AuthorizationPolicy`] injected into the [`Authorizer`](crate::Authorizer).
//!
//! ```ignore
//! struct AppPolicy;
//!
//! impl AuthorizationPolicy for AppPolicy {
//!     type Context = RequestContext;
//!     type Scope = Scope;
//!
//!     fn valid_roles(&self) -> HashSet<Role> {
//!         role_set(["admin", "user", "all"])
//!     }
//!
//!     fn not_scoped_roles(&self) -> HashSet<Role> {
//!         role_set(["admin", "all"])
//!     }
//!
//!     fn is_authorized(&self, resolution: &Resolution<'_, RequestContext>, permission: &Permission) -> bool {
//!         permission.roles().any(|role| resolution.context().roles.contains(role))
//!     }
//!
//!     fn context_user_authorized(&self, ctx: &RequestContext, scope: &Scope, _rule: &Rule) -> anyhow::Result<bool> {
//!         match scope {
//!             Scope::User(user) => Ok(ctx.current_user.id == user.id),
//!         }
//!     }
//! }
//! ```

use std::collections::HashSet;

use crate::resolution::{ErrorPayload, Resolution};
use crate::role::{Permission, Role, Rule};

/// Role and ownership decisions plus the text of denial messages.
///
/// `Scope` is the policy's own representation of "the thing being acted
/// upon", usually an enum over the application's scope entity structs.
/// Implementations are shared between concurrent requests and must not rely
/// on per-call mutable state.
pub trait AuthorizationPolicy: Send + Sync {
    type Context;
    type Scope;

    /// Every role a field may be declared for.
    fn valid_roles(&self) -> HashSet<Role>;

    /// Roles that skip ownership checks entirely.
    fn not_scoped_roles(&self) -> HashSet<Role> {
        HashSet::new()
    }

    /// Rule used when a field does not name one.
    fn default_rule(&self) -> Rule {
        Rule::default()
    }

    /// Role-level decision for the resolution's caller.
    fn is_authorized(
        &self,
        resolution: &Resolution<'_, Self::Context>,
        permission: &Permission,
    ) -> bool;

    /// Ownership decision for a partially built scope entity.
    ///
    /// Errors are not treated as denials; they abort the pipeline and reach
    /// the caller unchanged.
    fn context_user_authorized(
        &self,
        context: &Self::Context,
        scope: &Self::Scope,
        rule: &Rule,
    ) -> anyhow::Result<bool>;

    fn unauthorized_message(&self, _resolution: &Resolution<'_, Self::Context>) -> ErrorPayload {
        ErrorPayload::new("unauthorized").with_code("UNAUTHORIZED")
    }

    /// `type_name` is the field's result type with list/non-null wrappers removed.
    fn unauthorized_scope_message(
        &self,
        _resolution: &Resolution<'_, Self::Context>,
        type_name: &str,
    ) -> ErrorPayload {
        ErrorPayload::new(format!("unauthorized to access this {}", type_name))
            .with_code("UNAUTHORIZED")
    }
}
