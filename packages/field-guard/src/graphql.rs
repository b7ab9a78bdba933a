//! Juniper integration.
//!
//! Juniper has no per-field middleware, so the guard runs at the top of a
//! resolver:
//!
//! ```ignore
//! #[graphql_object(context = AppContext)]
//! impl Mutation {
//!     fn update_user(context: &AppContext, id: i32, name: String) -> FieldResult<User> {
//!         context.guards.update_user.check(
//!             json!({ "id": id, "name": name }),
//!             TypeRef::non_null(TypeRef::named("User")),
//!             context,
//!         )?;
//!         context.users.update(id, name)
//!     }
//! }
//! ```

use juniper::{FieldError, FieldResult, Object, Value};
use tracing::error;

use crate::error::GuardError;
use crate::gate::FieldGuard;
use crate::policy::AuthorizationPolicy;
use crate::resolution::{ErrorPayload, Resolution, ResolutionState, TypeRef};

fn extensions(code: &str) -> Value {
    let mut object = Object::with_capacity(1);
    object.add_field("code", Value::scalar(code.to_string()));
    Value::object(object)
}

impl ErrorPayload {
    /// Message plus, when present, `{"code": ...}` extensions.
    pub fn into_field_error(self) -> FieldError {
        match self.code {
            Some(code) => FieldError::new(self.message, extensions(&code)),
            None => FieldError::new(self.message, Value::null()),
        }
    }
}

impl GuardError {
    /// Setup faults and policy failures are reported as internal errors,
    /// never as an authorization denial. Details go to the log only.
    pub fn into_field_error(self) -> FieldError {
        error!(error = %self, "field authorization aborted");
        match self {
            GuardError::Configuration(_) => FieldError::new(
                "authorization is misconfigured for this field",
                extensions("CONFIGURATION_ERROR"),
            ),
            GuardError::Policy(_) => FieldError::new(
                "authorization could not be completed",
                extensions("INTERNAL_SERVER_ERROR"),
            ),
        }
    }
}

impl<C> Resolution<'_, C> {
    /// `Err` with the first recorded error when the resolution failed.
    ///
    /// An errored resolution always carries the payload `put_error` recorded.
    pub fn into_field_result(self) -> FieldResult<()> {
        match self.errors().first() {
            Some(error) if self.state() == ResolutionState::Errored => {
                Err(error.clone().into_field_error())
            }
            _ => Ok(()),
        }
    }
}

impl<P: AuthorizationPolicy> FieldGuard<P> {
    /// Builds a resolution for this field and runs the guard over it.
    pub fn check(
        &self,
        arguments: serde_json::Value,
        return_type: TypeRef,
        context: &P::Context,
    ) -> FieldResult<()> {
        let mut resolution = Resolution::new(self.field(), arguments, context, return_type);
        self.call(&mut resolution)
            .map_err(GuardError::into_field_error)?;
        resolution.into_field_result()
    }
}
