use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::args::ArgumentFieldMapping;
use crate::error::ConfigurationError;
use crate::resolution::Resolution;

/// Scope-entity fields resolved from one call's arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeProbe {
    fields: Vec<(String, Value)>,
}

impl ScopeProbe {
    /// Resolves every mapped field against the resolution's arguments.
    ///
    /// An absent argument (missing, or explicitly `null`) is skipped when
    /// `optional` is set and is a [`ConfigurationError::MissingArgument`]
    /// otherwise. The probe is only ever empty when `optional` is set.
    pub fn build<C>(
        resolution: &Resolution<'_, C>,
        mapping: &ArgumentFieldMapping,
        optional: bool,
    ) -> Result<Self, ConfigurationError> {
        let arguments = resolution.arguments();
        let mut probe = ScopeProbe::default();

        for (scope_field, path) in mapping.iter() {
            match path.resolve(arguments).filter(|value| !value.is_null()) {
                Some(value) => probe.push(scope_field, value.clone()),
                None if optional => {
                    debug!(
                        field = resolution.field_name(),
                        scope_field,
                        path = %path,
                        "optional scope argument absent, skipping"
                    );
                }
                None => {
                    error!(
                        field = resolution.field_name(),
                        scope_field,
                        path = %path,
                        "required scope argument absent"
                    );
                    return Err(ConfigurationError::MissingArgument {
                        scope_field: scope_field.to_string(),
                        field: resolution.field_name().to_string(),
                        arguments: arguments.clone(),
                    });
                }
            }
        }

        Ok(probe)
    }

    pub fn push(&mut self, scope_field: impl Into<String>, value: Value) {
        self.fields.push((scope_field.into(), value));
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(field, value)| (field.as_str(), value))
    }

    pub fn get(&self, scope_field: &str) -> Option<&Value> {
        self.iter()
            .find(|(field, _)| *field == scope_field)
            .map(|(_, value)| value)
    }

    /// The probe as a JSON object, ready to deserialize into an entity.
    pub fn to_object(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .cloned()
                .collect::<Map<String, Value>>(),
        )
    }
}
