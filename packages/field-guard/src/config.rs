use crate::args::{ArgumentFieldMapping, ArgumentPathSpec};
use crate::role::{Permission, Rule};
use crate::scope::ScopeType;

/// Whether, and against what, a field is ownership-checked.
#[derive(Debug)]
pub enum ScopeSetting<S> {
    /// Nothing declared. Only valid for roles exempt from scoping.
    Unset,
    /// Scoping explicitly turned off for this field.
    Disabled,
    Type(ScopeType<S>),
}

impl<S> Clone for ScopeSetting<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for ScopeSetting<S> {}

impl<S> Default for ScopeSetting<S> {
    fn default() -> Self {
        ScopeSetting::Unset
    }
}

/// Authorization declared on one field.
///
/// ```ignore
/// let update_user = FieldAuthorization::permit("user")
///     .scope(ScopeType::of::<User>("User"))
///     .args([("id", ArgumentPath::nested(["input", "id"]))])
///     .rule("owner");
/// ```
#[derive(Debug)]
pub struct FieldAuthorization<S> {
    pub(crate) permit: Permission,
    pub(crate) scope: ScopeSetting<S>,
    pub(crate) args: ArgumentFieldMapping,
    pub(crate) optional: bool,
    pub(crate) rule: Option<Rule>,
}

impl<S> Clone for FieldAuthorization<S> {
    fn clone(&self) -> Self {
        Self {
            permit: self.permit.clone(),
            scope: self.scope,
            args: self.args.clone(),
            optional: self.optional,
            rule: self.rule.clone(),
        }
    }
}

impl<S> FieldAuthorization<S> {
    pub fn permit(permission: impl Into<Permission>) -> Self {
        Self {
            permit: permission.into(),
            scope: ScopeSetting::Unset,
            args: ArgumentFieldMapping::default(),
            optional: false,
            rule: None,
        }
    }

    pub fn scope(mut self, scope: ScopeType<S>) -> Self {
        self.scope = ScopeSetting::Type(scope);
        self
    }

    pub fn no_scope(mut self) -> Self {
        self.scope = ScopeSetting::Disabled;
        self
    }

    pub fn args(mut self, spec: impl Into<ArgumentPathSpec>) -> Self {
        self.args = spec.into().normalize();
        self
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn rule(mut self, rule: impl Into<Rule>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    pub fn permission(&self) -> &Permission {
        &self.permit
    }

    pub fn scope_setting(&self) -> &ScopeSetting<S> {
        &self.scope
    }

    pub fn mapping(&self) -> &ArgumentFieldMapping {
        &self.args
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn declared_rule(&self) -> Option<&Rule> {
        self.rule.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::ArgumentPath;

    #[derive(Debug, Default, serde::Deserialize)]
    struct User {
        #[allow(dead_code)]
        id: i64,
    }

    #[test]
    fn test_defaults() {
        let config = FieldAuthorization::<User>::permit("user");

        assert_eq!(config.permission(), &Permission::from("user"));
        assert!(matches!(config.scope_setting(), ScopeSetting::Unset));
        assert_eq!(config.mapping(), &ArgumentFieldMapping::default());
        assert!(!config.is_optional());
        assert_eq!(config.declared_rule(), None);
    }

    #[test]
    fn test_builder_sets_every_option() {
        let config = FieldAuthorization::permit(["user", "admin"])
            .scope(ScopeType::<User>::of::<User>("User"))
            .args([("id", ArgumentPath::nested(["params", "id"]))])
            .optional(true)
            .rule("owner");

        assert_eq!(config.permission(), &Permission::from(["user", "admin"]));
        assert!(matches!(config.scope_setting(), ScopeSetting::Type(s) if s.name() == "User"));
        assert_eq!(
            config.mapping().get("id"),
            Some(&ArgumentPath::nested(["params", "id"]))
        );
        assert!(config.is_optional());
        assert_eq!(config.declared_rule(), Some(&Rule::new("owner")));
    }

    #[test]
    fn test_no_scope_disables_scoping() {
        let config = FieldAuthorization::<User>::permit("user").no_scope();
        assert!(matches!(config.scope_setting(), ScopeSetting::Disabled));
    }
}
