//! Whitelisting of client-supplied metadata.
//!
//! Client metadata is untrusted. Only six keys are recognized, each with a
//! fixed value type:
//!
//! | key           | type             |
//! |---------------|------------------|
//! | `public`      | boolean          |
//! | `author`      | string           |
//! | `email`       | string           |
//! | `title`       | string           |
//! | `tags`        | list of strings  |
//! | `description` | string           |
//!
//! Anything else, including a recognized key with a value of the wrong type,
//! is dropped silently. Filtering never fails.

use quire_types::Metadata;
use serde_json::Value;
use tracing::trace;

/// Keys a client may set.
pub const RECOGNIZED_KEYS: [&str; 6] = ["public", "author", "email", "title", "tags", "description"];

/// Keep only the recognized, well-typed fields of `raw`.
///
/// An absent or non-object input yields an empty record. The result never
/// carries `user` or `peer`.
pub fn filter_metadata(raw: Option<&Value>) -> Metadata {
    let mut meta = Metadata::default();
    let Some(Value::Object(map)) = raw else {
        return meta;
    };

    for (key, value) in map {
        match (key.as_str(), value) {
            ("public", Value::Bool(b)) => meta.public = Some(*b),
            ("author", Value::String(s)) => meta.author = Some(s.clone()),
            ("email", Value::String(s)) => meta.email = Some(s.clone()),
            ("title", Value::String(s)) => meta.title = Some(s.clone()),
            ("description", Value::String(s)) => meta.description = Some(s.clone()),
            ("tags", Value::Array(items)) => match string_list(items) {
                Some(tags) => meta.tags = Some(tags),
                None => trace!("dropping tags with non-string members"),
            },
            _ => trace!(key = %key, "dropping metadata field"),
        }
    }
    meta
}

fn string_list(items: &[Value]) -> Option<Vec<String>> {
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}
