//! The per-field execution context the guard operates on.
//!
//! A [`Resolution`] is created by the execution engine for one field
//! invocation. The guard reads its arguments, context and return type, and
//! only ever writes to its state/error slot.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Declared GraphQL type of a field's result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn list(of: TypeRef) -> Self {
        TypeRef::List(Box::new(of))
    }

    pub fn non_null(of: TypeRef) -> Self {
        TypeRef::NonNull(Box::new(of))
    }

    /// Underlying named type with every list and non-null wrapper removed.
    pub fn base_name(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::List(inner) | TypeRef::NonNull(inner) => inner.base_name(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => f.write_str(name),
            TypeRef::List(inner) => write!(f, "[{}]", inner),
            TypeRef::NonNull(inner) => write!(f, "{}!", inner),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid GraphQL type reference `{0}`")]
pub struct ParseTypeRefError(String);

impl FromStr for TypeRef {
    type Err = ParseTypeRefError;

    /// Parses GraphQL type notation such as `User`, `[User]` or `[User!]!`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ParseTypeRefError(s.to_string());

        if let Some(inner) = trimmed.strip_suffix('!') {
            let inner: TypeRef = inner.parse().map_err(|_| invalid())?;
            if matches!(inner, TypeRef::NonNull(_)) {
                return Err(invalid());
            }
            return Ok(TypeRef::non_null(inner));
        }

        if let Some(inner) = trimmed.strip_prefix('[') {
            let inner = inner.strip_suffix(']').ok_or_else(invalid)?;
            let inner: TypeRef = inner.parse().map_err(|_| invalid())?;
            return Ok(TypeRef::list(inner));
        }

        let is_name = !trimmed.is_empty()
            && trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            && !trimmed.starts_with(|c: char| c.is_ascii_digit());
        if !is_name {
            return Err(invalid());
        }
        Ok(TypeRef::named(trimmed))
    }
}

/// Error text attached to a failed resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorPayload {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState {
    Unresolved,
    Resolved,
    Errored,
}

/// One field invocation flowing through the guard.
#[derive(Debug)]
pub struct Resolution<'a, C> {
    field_name: String,
    arguments: Value,
    context: &'a C,
    return_type: TypeRef,
    state: ResolutionState,
    errors: Vec<ErrorPayload>,
}

impl<'a, C> Resolution<'a, C> {
    /// `arguments` is the caller-supplied argument tree, normally a JSON object.
    pub fn new(
        field_name: impl Into<String>,
        arguments: Value,
        context: &'a C,
        return_type: TypeRef,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            arguments,
            context,
            return_type,
            state: ResolutionState::Unresolved,
            errors: Vec::new(),
        }
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn arguments(&self) -> &Value {
        &self.arguments
    }

    pub fn context(&self) -> &'a C {
        self.context
    }

    pub fn return_type(&self) -> &TypeRef {
        &self.return_type
    }

    pub fn state(&self) -> ResolutionState {
        self.state
    }

    pub fn errors(&self) -> &[ErrorPayload] {
        &self.errors
    }

    pub fn is_unresolved(&self) -> bool {
        self.state == ResolutionState::Unresolved
    }

    /// Marks the field as resolved by the engine.
    pub fn resolve(&mut self) {
        self.state = ResolutionState::Resolved;
    }

    /// Fails the resolution with `error`.
    pub fn put_error(&mut self, error: ErrorPayload) {
        self.state = ResolutionState::Errored;
        self.errors.push(error);
    }
}
