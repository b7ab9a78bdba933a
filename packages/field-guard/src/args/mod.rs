//! Locating scope-identifying values inside a field's argument tree.

mod mapping;
mod path;

pub use mapping::{ArgumentFieldMapping, ArgumentPathSpec};
pub use path::{ArgumentPath, PathSegment};
