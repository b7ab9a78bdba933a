use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One step of a nested argument path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Where a scope field's value lives in the argument tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgumentPath {
    /// Top-level argument name.
    Field(String),
    /// Traversed in order through objects (by key) and lists (by index).
    Nested(Vec<PathSegment>),
}

impl ArgumentPath {
    pub fn nested<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        ArgumentPath::Nested(segments.into_iter().map(Into::into).collect())
    }

    /// Looks the path up in `arguments`. Values are returned as-is; a missing
    /// segment (or a segment of the wrong kind for the node) yields `None`.
    pub fn resolve<'v>(&self, arguments: &'v Value) -> Option<&'v Value> {
        match self {
            ArgumentPath::Field(name) => arguments.as_object()?.get(name),
            ArgumentPath::Nested(segments) => segments
                .iter()
                .try_fold(arguments, |node, segment| match segment {
                    PathSegment::Key(key) => node.as_object()?.get(key),
                    PathSegment::Index(index) => node.as_array()?.get(*index),
                }),
        }
    }
}

impl From<&str> for ArgumentPath {
    fn from(name: &str) -> Self {
        ArgumentPath::Field(name.to_string())
    }
}

impl From<String> for ArgumentPath {
    fn from(name: String) -> Self {
        ArgumentPath::Field(name)
    }
}

impl From<Vec<PathSegment>> for ArgumentPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        ArgumentPath::Nested(segments)
    }
}

impl fmt::Display for ArgumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentPath::Field(name) => f.write_str(name),
            ArgumentPath::Nested(segments) => {
                for (i, segment) in segments.iter().enumerate() {
                    match segment {
                        PathSegment::Key(key) if i == 0 => write!(f, "{}", key)?,
                        PathSegment::Key(key) => write!(f, ".{}", key)?,
                        PathSegment::Index(index) => write!(f, "[{}]", index)?,
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_resolves_top_level_only() {
        let args = json!({"id": 7, "params": {"id": 9}});
        assert_eq!(ArgumentPath::from("id").resolve(&args), Some(&json!(7)));
        assert_eq!(ArgumentPath::from("missing").resolve(&args), None);
    }

    #[test]
    fn test_nested_traversal() {
        let args = json!({"params": {"id": 9}});
        let path = ArgumentPath::nested(["params", "id"]);
        assert_eq!(path.resolve(&args), Some(&json!(9)));
    }

    #[test]
    fn test_nested_traversal_through_list_index() {
        let args = json!({"input": {"members": [{"id": 1}, {"id": 2}]}});
        let path = ArgumentPath::Nested(vec![
            "input".into(),
            "members".into(),
            1usize.into(),
            "id".into(),
        ]);
        assert_eq!(path.resolve(&args), Some(&json!(2)));
        assert_eq!(path.to_string(), "input.members[1].id");
    }

    #[test]
    fn test_missing_segment_is_absent() {
        let args = json!({"params": {"name": "x"}});
        assert_eq!(ArgumentPath::nested(["params", "id"]).resolve(&args), None);
        assert_eq!(ArgumentPath::nested(["nope", "id"]).resolve(&args), None);
        assert_eq!(
            ArgumentPath::Nested(vec!["params".into(), 0usize.into()]).resolve(&args),
            None
        );
    }

    #[test]
    fn test_explicit_null_is_returned_as_is() {
        let args = json!({"id": null});
        assert_eq!(ArgumentPath::from("id").resolve(&args), Some(&Value::Null));
    }

    #[test]
    fn test_no_coercion() {
        let args = json!({"id": "7"});
        assert_eq!(ArgumentPath::from("id").resolve(&args), Some(&json!("7")));
    }
}
