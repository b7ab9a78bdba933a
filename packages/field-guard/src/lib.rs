//! # Field Guard
//!
//! Two-stage authorization for individual GraphQL fields.
//!
//! 1. **Role gate**: may the caller's role invoke this field at all?
//! 2. **Scope check**: may this caller act on the *specific entity* the
//!    field's arguments point at?
//!
//! ```text
//! Resolution ──► role gate ──denied──► unauthorized_message
//!                   │
//!                   ▼ granted
//!             scope check
//!   args ──► ScopeProbe ──► ScopeType::build ──► context_user_authorized
//!                                                     │
//!                                          denied ◄───┴───► pass through
//!                                            │
//!                                 unauthorized_scope_message
//! ```
//!
//! Policy decisions and messages come from an injected
//! [`AuthorizationPolicy`]. Denials are recorded on the [`Resolution`];
//! setup mistakes are returned as [`ConfigurationError`] and must never be
//! shown to callers as a denial.
//!
//! ## Example
//!
//! ```ignore
//! let authorizer = Authorizer::new(Arc::new(AppPolicy));
//!
//! let update_user = authorizer.attach(
//!     "updateUser",
//!     FieldAuthorization::permit("user")
//!         .scope(ScopeType::of::<User>("User"))
//!         .args("id"),
//! )?;
//!
//! let mut resolution = Resolution::new("updateUser", json!({"id": 7}), &ctx, TypeRef::named("User"));
//! update_user.call(&mut resolution)?;
//! ```

pub mod args;
pub mod config;
pub mod error;
pub mod gate;
pub mod graphql;
pub mod policy;
pub mod resolution;
pub mod role;
pub mod scope;
pub mod translate;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use args::{ArgumentFieldMapping, ArgumentPath, ArgumentPathSpec, PathSegment};
pub use config::{FieldAuthorization, ScopeSetting};
pub use error::{ConfigurationError, GuardError, GuardResult};
pub use gate::{authorize_field, Authorizer, FieldGuard};
pub use policy::AuthorizationPolicy;
pub use resolution::{ErrorPayload, Resolution, ResolutionState, TypeRef};
pub use role::{role_set, Permission, Role, Rule};
pub use scope::{ScopeProbe, ScopeType};
