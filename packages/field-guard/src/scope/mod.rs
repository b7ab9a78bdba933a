//! Ownership ("scope") authorization.
//!
//! The stage runs after the role check has passed:
//!
//! 1. [`ScopeProbe::build`] collects the mapped fields from the arguments
//! 2. [`authorize`] assembles a partial [`ScopeType`] instance and asks the policy
//! 3. [`apply_scope_verdict`](crate::translate::apply_scope_verdict) records a denial

mod dispatch;
mod entity;
mod probe;

pub use dispatch::authorize;
pub use entity::ScopeType;
pub use probe::ScopeProbe;

use crate::args::ArgumentFieldMapping;
use crate::error::GuardResult;
use crate::policy::AuthorizationPolicy;
use crate::resolution::Resolution;
use crate::role::Rule;
use crate::translate::apply_scope_verdict;

/// Runs the whole scope stage for one resolution.
pub fn check_scope<P>(
    policy: &P,
    resolution: &mut Resolution<'_, P::Context>,
    scope_type: &ScopeType<P::Scope>,
    mapping: &ArgumentFieldMapping,
    optional: bool,
    rule: Option<&Rule>,
) -> GuardResult<()>
where
    P: AuthorizationPolicy + ?Sized,
{
    let probe = ScopeProbe::build(resolution, mapping, optional)?;
    let rule = rule.cloned().unwrap_or_else(|| policy.default_rule());

    let verdict = authorize(
        policy,
        &probe,
        scope_type,
        resolution.context(),
        &rule,
        optional,
    )?;

    apply_scope_verdict(policy, verdict, resolution);
    Ok(())
}
