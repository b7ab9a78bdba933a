use tracing::info;

use crate::policy::AuthorizationPolicy;
use crate::resolution::Resolution;

/// Applies an ownership verdict to the resolution.
///
/// A grant leaves the resolution untouched. A denial fails it with the
/// policy's scope message for the field's underlying result type.
pub fn apply_scope_verdict<P>(
    policy: &P,
    verdict: bool,
    resolution: &mut Resolution<'_, P::Context>,
) where
    P: AuthorizationPolicy + ?Sized,
{
    if verdict {
        return;
    }

    let type_name = resolution.return_type().base_name().to_string();
    info!(
        field = resolution.field_name(),
        result_type = %type_name,
        "scope check denied"
    );
    let error = policy.unauthorized_scope_message(resolution, &type_name);
    resolution.put_error(error);
}

/// Fails the resolution with the policy's role-denial message.
pub fn apply_role_denial<P>(policy: &P, resolution: &mut Resolution<'_, P::Context>)
where
    P: AuthorizationPolicy + ?Sized,
{
    info!(field = resolution.field_name(), "role check denied");
    let error = policy.unauthorized_message(resolution);
    resolution.put_error(error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolution::{ResolutionState, TypeRef};
    use crate::testing::StubPolicy;
    use serde_json::json;

    #[test]
    fn test_grant_is_pass_through() {
        let policy = StubPolicy::new();
        let mut res = Resolution::new("user", json!({"id": 1}), &(), TypeRef::named("User"));

        apply_scope_verdict(&policy, true, &mut res);

        assert_eq!(res.state(), ResolutionState::Unresolved);
        assert!(res.errors().is_empty());
    }

    #[test]
    fn test_denial_uses_unwrapped_type_name() {
        let policy = StubPolicy::new();
        let return_type: TypeRef = "[User!]!".parse().unwrap();
        let mut res = Resolution::new("users", json!({}), &(), return_type);

        apply_scope_verdict(&policy, false, &mut res);

        assert_eq!(res.state(), ResolutionState::Errored);
        assert_eq!(res.errors()[0].message, "unauthorized to access this User");
    }

    #[test]
    fn test_role_denial_uses_generic_message() {
        let policy = StubPolicy::new();
        let mut res = Resolution::new("users", json!({}), &(), TypeRef::named("User"));

        apply_role_denial(&policy, &mut res);

        assert_eq!(res.state(), ResolutionState::Errored);
        assert_eq!(res.errors()[0].message, "unauthorized");
    }
}
