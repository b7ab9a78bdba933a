//! Ownership rules for the playground's users.

use field_guard::{
    role_set, AuthorizationPolicy, ErrorPayload, Permission, Resolution, Role, Rule,
};
use serde::Deserialize;
use std::collections::HashSet;

/// Who is running the query.
#[derive(Debug, Clone)]
pub struct Caller {
    pub user_id: Option<i64>,
    pub role: Role,
}

/// Partial user built from field arguments.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserScope {
    pub id: i64,
    pub org_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub enum Scope {
    User(UserScope),
}

impl From<UserScope> for Scope {
    fn from(user: UserScope) -> Self {
        Scope::User(user)
    }
}

/// `admin` and `all` skip ownership checks; a `user` may only act on itself.
pub struct PlaygroundPolicy;

impl AuthorizationPolicy for PlaygroundPolicy {
    type Context = Caller;
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

    fn is_authorized(&self, resolution: &Resolution<'_, Caller>, permission: &Permission) -> bool {
        let caller = resolution.context();
        permission.roles().any(|role| match role.as_str() {
            "all" => true,
            _ => caller.user_id.is_some() && (&caller.role == role || caller.role.as_str() == "admin"),
        })
    }

    fn context_user_authorized(
        &self,
        caller: &Caller,
        scope: &Scope,
        rule: &Rule,
    ) -> anyhow::Result<bool> {
        match (scope, rule.as_str()) {
            (Scope::User(user), "owner") => Ok(caller.user_id == Some(user.id)),
            (_, other) => anyhow::bail!("unknown ownership rule `{}`", other),
        }
    }

    fn unauthorized_message(&self, resolution: &Resolution<'_, Caller>) -> ErrorPayload {
        ErrorPayload::new(format!(
            "role `{}` may not call `{}`",
            resolution.context().role,
            resolution.field_name()
        ))
        .with_code("FORBIDDEN")
    }

    fn unauthorized_scope_message(
        &self,
        _resolution: &Resolution<'_, Caller>,
        type_name: &str,
    ) -> ErrorPayload {
        ErrorPayload::new(format!("you do not own this {}", type_name)).with_code("FORBIDDEN")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use field_guard::{Authorizer, FieldAuthorization, ScopeType, TypeRef};
    use serde_json::json;
    use std::sync::Arc;

    fn caller(user_id: Option<i64>, role: &str) -> Caller {
        Caller {
            user_id,
            role: Role::from(role),
        }
    }

    #[test]
    fn test_owner_rule() {
        let guard = Authorizer::new(Arc::new(PlaygroundPolicy))
            .attach(
                "updateUser",
                FieldAuthorization::permit("user").scope(ScopeType::of::<UserScope>("User")),
            )
            .unwrap();

        let owner = caller(Some(7), "user");
        assert!(guard.check(json!({"id": 7}), TypeRef::named("User"), &owner).is_ok());

        let stranger = caller(Some(9), "user");
        let error = guard
            .check(json!({"id": 7}), TypeRef::named("User"), &stranger)
            .unwrap_err();
        assert_eq!(error.message(), "you do not own this User");
    }

    #[test]
    fn test_anonymous_user_role_is_denied() {
        let guard = Authorizer::new(Arc::new(PlaygroundPolicy))
            .attach(
                "updateUser",
                FieldAuthorization::permit("user").scope(ScopeType::of::<UserScope>("User")),
            )
            .unwrap();

        let anonymous = caller(None, "user");
        let error = guard
            .check(json!({"id": 7}), TypeRef::named("User"), &anonymous)
            .unwrap_err();
        assert_eq!(error.message(), "role `user` may not call `updateUser`");
    }
}
