use tracing::{debug, error};

use super::entity::ScopeType;
use super::probe::ScopeProbe;
use crate::error::{ConfigurationError, GuardResult};
use crate::policy::AuthorizationPolicy;
use crate::role::Rule;

/// Asks the policy whether the caller may act on the probed entity.
///
/// An empty probe on an optional field grants access without consulting the
/// policy. A probe with at least one field always goes to the policy, even
/// when other optional fields were absent.
pub fn authorize<P>(
    policy: &P,
    probe: &ScopeProbe,
    scope_type: &ScopeType<P::Scope>,
    context: &P::Context,
    rule: &Rule,
    optional: bool,
) -> GuardResult<bool>
where
    P: AuthorizationPolicy + ?Sized,
{
    if probe.is_empty() && optional {
        debug!(scope = scope_type.name(), "no optional scope arguments given, nothing to check");
        return Ok(true);
    }

    if probe.is_empty() {
        error!(scope = scope_type.name(), "required scope probe is empty");
        return Err(ConfigurationError::EmptyProbe {
            scope: scope_type.name(),
        }
        .into());
    }

    let entity = scope_type.build(probe)?;
    let verdict = policy.context_user_authorized(context, &entity, rule)?;

    debug!(
        scope = scope_type.name(),
        rule = %rule,
        fields = probe.len(),
        verdict,
        "ownership decision"
    );

    Ok(verdict)
}
