use serde::de::DeserializeOwned;
use std::fmt;

use super::probe::ScopeProbe;
use crate::error::ConfigurationError;

/// The entity type a field's arguments identify.
///
/// Built from a [`ScopeProbe`] by deserializing the collected fields into a
/// concrete struct `T`. Give `T` a `#[serde(default)]` attribute so that
/// fields the mapping does not produce fall back to `Default`. The result is
/// converted into the policy's scope representation `S`.
///
/// ```ignore
/// #[derive(Debug, Default, Deserialize)]
/// #[serde(default, rename_all = "camelCase")]
/// struct User { id: i64, org_id: Option<i64> }
///
/// let scope = ScopeType::<Scope>::of::<User>("User");
/// ```
pub struct ScopeType<S> {
    name: &'static str,
    build: fn(&ScopeProbe) -> Result<S, serde_json::Error>,
}

impl<S> ScopeType<S> {
    pub fn of<T>(name: &'static str) -> Self
    where
        T: DeserializeOwned + Into<S>,
    {
        Self {
            name,
            build: build_partial::<T, S>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Assembles a partial entity from the probe. A value that does not fit
    /// the entity's field type is a configuration error.
    pub fn build(&self, probe: &ScopeProbe) -> Result<S, ConfigurationError> {
        (self.build)(probe).map_err(|source| ConfigurationError::ScopeEntity {
            scope: self.name,
            source,
        })
    }
}

fn build_partial<T, S>(probe: &ScopeProbe) -> Result<S, serde_json::Error>
where
    T: DeserializeOwned + Into<S>,
{
    serde_json::from_value::<T>(probe.to_object()).map(Into::into)
}

impl<S> Clone for ScopeType<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for ScopeType<S> {}

impl<S> fmt::Debug for ScopeType<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ScopeType").field(&self.name).finish()
    }
}
