use serde_json::Value;
use thiserror::Error;

use crate::role::Role;

/// Setup faults in how a field was wired to the guard.
///
/// These are developer bugs, not access decisions. They are returned as
/// errors and must never be turned into an "unauthorized" response, since that
/// would make a broken deployment look like a legitimate denial.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("invalid permission {roles:?} on field `{field}`; valid roles are {valid:?}")]
    InvalidPermission {
        field: String,
        roles: Vec<Role>,
        valid: Vec<Role>,
    },

    #[error("no scope argument found for field `{field}`; declare a scope type or disable scoping")]
    MissingScope { field: String },

    #[error(
        "no argument found for scope field `{scope_field}` in field `{field}`; searched arguments: {arguments}"
    )]
    MissingArgument {
        scope_field: String,
        field: String,
        arguments: Value,
    },

    #[error("scope `{scope}` has no fields to check; map at least one argument or mark it optional")]
    EmptyProbe { scope: &'static str },

    #[error("could not build scope entity `{scope}` from arguments: {source}")]
    ScopeEntity {
        scope: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Anything that aborts the guard pipeline.
///
/// Authorization denials are not represented here; they are recorded on the
/// [`Resolution`](crate::Resolution) instead.
#[derive(Error, Debug)]
pub enum GuardError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("authorization policy failed: {0}")]
    Policy(#[from] anyhow::Error),
}

pub type GuardResult<T> = Result<T, GuardError>;
