//! Role gate: the entry point of the two-stage pipeline.
//!
//! ```text
//! already resolved? ──yes──► pass through
//!        │ no
//!        ▼
//! permission ⊆ valid_roles? ──no──► ConfigurationError
//!        │ yes
//!        ▼
//! is_authorized? ──no──► unauthorized_message
//!        │ yes
//!        ▼
//! scope disabled or role exempt? ──yes──► pass through
//!        │ no
//!        ▼
//! scope stage (missing scope ──► ConfigurationError)
//! ```

use std::sync::Arc;
use tracing::{debug, error};

use crate::config::{FieldAuthorization, ScopeSetting};
use crate::error::{ConfigurationError, GuardResult};
use crate::policy::AuthorizationPolicy;
use crate::resolution::Resolution;
use crate::role::{Permission, Role};
use crate::scope::check_scope;
use crate::translate::apply_role_denial;

/// Holds the injected policy and hands out per-field guards.
pub struct Authorizer<P> {
    policy: Arc<P>,
}

impl<P> Clone for Authorizer<P> {
    fn clone(&self) -> Self {
        Self {
            policy: Arc::clone(&self.policy),
        }
    }
}

impl<P: AuthorizationPolicy> Authorizer<P> {
    pub fn new(policy: Arc<P>) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Binds `config` to `field`, rejecting permissions the policy does not
    /// know before any request is served.
    pub fn attach(
        &self,
        field: impl Into<String>,
        config: FieldAuthorization<P::Scope>,
    ) -> Result<FieldGuard<P>, ConfigurationError> {
        let field = field.into();
        validate_permission(self.policy.as_ref(), &field, &config.permit)?;

        Ok(FieldGuard {
            policy: Arc::clone(&self.policy),
            field,
            config,
        })
    }

    /// Runs the pipeline for a field that was not attached up front.
    pub fn authorize(
        &self,
        config: &FieldAuthorization<P::Scope>,
        resolution: &mut Resolution<'_, P::Context>,
    ) -> GuardResult<()> {
        authorize_field(self.policy.as_ref(), config, resolution)
    }
}

/// A field's authorization, validated and bound to a policy.
pub struct FieldGuard<P: AuthorizationPolicy> {
    policy: Arc<P>,
    field: String,
    config: FieldAuthorization<P::Scope>,
}

impl<P: AuthorizationPolicy> FieldGuard<P> {
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn config(&self) -> &FieldAuthorization<P::Scope> {
        &self.config
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Runs both stages against `resolution`.
    ///
    /// `Ok(())` means the pipeline finished; the resolution may now be
    /// errored with a denial. `Err` is a setup fault or a policy failure.
    pub fn call(&self, resolution: &mut Resolution<'_, P::Context>) -> GuardResult<()> {
        authorize_field(self.policy.as_ref(), &self.config, resolution)
    }
}

impl<P: AuthorizationPolicy> Clone for FieldGuard<P> {
    fn clone(&self) -> Self {
        Self {
            policy: Arc::clone(&self.policy),
            field: self.field.clone(),
            config: self.config.clone(),
        }
    }
}

/// Role check followed, when applicable, by the scope check.
pub fn authorize_field<P>(
    policy: &P,
    config: &FieldAuthorization<P::Scope>,
    resolution: &mut Resolution<'_, P::Context>,
) -> GuardResult<()>
where
    P: AuthorizationPolicy + ?Sized,
{
    if !resolution.is_unresolved() {
        debug!(field = resolution.field_name(), "already resolved, passing through");
        return Ok(());
    }

    validate_permission(policy, resolution.field_name(), &config.permit)?;

    if !policy.is_authorized(resolution, &config.permit) {
        apply_role_denial(policy, resolution);
        return Ok(());
    }

    let scope_type = match &config.scope {
        ScopeSetting::Disabled => {
            debug!(field = resolution.field_name(), "scoping disabled");
            return Ok(());
        }
        _ if config.permit.is_exempt(&policy.not_scoped_roles()) => {
            debug!(
                field = resolution.field_name(),
                permission = %config.permit,
                "role exempt from scoping"
            );
            return Ok(());
        }
        ScopeSetting::Unset => {
            error!(field = resolution.field_name(), "no scope argument found");
            return Err(ConfigurationError::MissingScope {
                field: resolution.field_name().to_string(),
            }
            .into());
        }
        ScopeSetting::Type(scope_type) => *scope_type,
    };

    check_scope(
        policy,
        resolution,
        &scope_type,
        &config.args,
        config.optional,
        config.rule.as_ref(),
    )
}

fn validate_permission<P>(
    policy: &P,
    field: &str,
    permission: &Permission,
) -> Result<(), ConfigurationError>
where
    P: AuthorizationPolicy + ?Sized,
{
    let valid = policy.valid_roles();
    if permission.is_subset_of(&valid) {
        return Ok(());
    }

    error!(field, permission = %permission, "permission not in the policy's valid roles");
    let mut valid: Vec<Role> = valid.into_iter().collect();
    valid.sort();
    Err(ConfigurationError::InvalidPermission {
        field: field.to_string(),
        roles: permission.roles().cloned().collect(),
        valid,
    })
}
