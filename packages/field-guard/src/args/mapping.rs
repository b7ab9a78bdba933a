use serde::Deserialize;

use super::path::ArgumentPath;

/// The three ways a field can say which arguments identify its scope entity.
///
/// Deserializes from a JSON string, an array of strings, or an object whose
/// values are argument paths. Anything else is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ArgumentPathSpec {
    /// `"id"`: the same name on both sides.
    SingleField(String),
    /// `["code", "groupId"]`: each name on both sides.
    FieldList(Vec<String>),
    /// `{"userId": ["params", "id"]}`: renaming and nesting.
    ExplicitMapping(ArgumentFieldMapping),
}

impl ArgumentPathSpec {
    /// Normalizes any accepted shape into a canonical mapping.
    pub fn normalize(self) -> ArgumentFieldMapping {
        match self {
            ArgumentPathSpec::SingleField(field) => {
                ArgumentFieldMapping(vec![(field.clone(), ArgumentPath::Field(field))])
            }
            ArgumentPathSpec::FieldList(fields) => ArgumentFieldMapping(
                fields
                    .into_iter()
                    .map(|field| (field.clone(), ArgumentPath::Field(field)))
                    .collect(),
            ),
            ArgumentPathSpec::ExplicitMapping(mapping) => mapping,
        }
    }
}

impl From<&str> for ArgumentPathSpec {
    fn from(field: &str) -> Self {
        ArgumentPathSpec::SingleField(field.to_string())
    }
}

impl From<String> for ArgumentPathSpec {
    fn from(field: String) -> Self {
        ArgumentPathSpec::SingleField(field)
    }
}

impl From<Vec<&str>> for ArgumentPathSpec {
    fn from(fields: Vec<&str>) -> Self {
        ArgumentPathSpec::FieldList(fields.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ArgumentPathSpec {
    fn from(fields: [&str; N]) -> Self {
        ArgumentPathSpec::FieldList(fields.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[(&str, ArgumentPath); N]> for ArgumentPathSpec {
    fn from(entries: [(&str, ArgumentPath); N]) -> Self {
        ArgumentPathSpec::ExplicitMapping(entries.into_iter().collect())
    }
}

impl From<ArgumentFieldMapping> for ArgumentPathSpec {
    fn from(mapping: ArgumentFieldMapping) -> Self {
        ArgumentPathSpec::ExplicitMapping(mapping)
    }
}

/// Scope-entity field name to argument path, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentFieldMapping(Vec<(String, ArgumentPath)>);

impl ArgumentFieldMapping {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgumentPath)> {
        self.0.iter().map(|(field, path)| (field.as_str(), path))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, scope_field: &str) -> Option<&ArgumentPath> {
        self.iter()
            .find(|(field, _)| *field == scope_field)
            .map(|(_, path)| path)
    }
}

/// The entity's `id` comes from the `id` argument.
impl Default for ArgumentFieldMapping {
    fn default() -> Self {
        ArgumentPathSpec::from("id").normalize()
    }
}

impl<K: Into<String>> FromIterator<(K, ArgumentPath)> for ArgumentFieldMapping {
    fn from_iter<T: IntoIterator<Item = (K, ArgumentPath)>>(iter: T) -> Self {
        let mut entries: Vec<(String, ArgumentPath)> = Vec::new();
        for (field, path) in iter {
            let field = field.into();
            match entries.iter_mut().find(|(existing, _)| *existing == field) {
                Some(entry) => entry.1 = path,
                None => entries.push((field, path)),
            }
        }
        ArgumentFieldMapping(entries)
    }
}

impl<'de> Deserialize<'de> for ArgumentFieldMapping {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        entries
            .into_iter()
            .map(|(field, path)| {
                serde_json::from_value::<ArgumentPath>(path)
                    .map(|path| (field, path))
                    .map_err(serde::de::Error::custom)
            })
            .collect()
    }
}
