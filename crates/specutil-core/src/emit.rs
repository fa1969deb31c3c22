//! Output emitters, registered under dotted paths.
pub mod json;
pub mod yaml;

use crate::resolver::ClassRegistry;
use serde_json::{Map as JsonMap, Value as JsonValue};

pub use json::JsonEmitter;
pub use yaml::YamlEmitter;

/// Dotted path of the default emitter
pub const DEFAULT_EMITTER: &str = "specutil.emit.Yaml";

/// Trait for rendering a document tree as text.
pub trait Emitter: Send + Sync {
    fn emit(&self, value: &JsonValue) -> crate::Result<String>;
}

pub type EmitterRegistry = ClassRegistry<Box<dyn Emitter>>;

/// The registry of built-in emitters
pub fn emitters() -> crate::Result<EmitterRegistry> {
    ClassRegistry::new()
        .with(DEFAULT_EMITTER, Box::new(YamlEmitter) as Box<dyn Emitter>)?
        .with("specutil.emit.Json", Box::new(JsonEmitter::default()))
}

/// Copy of `value` with the keys of every mapping sorted
pub fn sort_keys(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let sorted: JsonMap<String, JsonValue> = entries
                .into_iter()
                .map(|(k, v)| (k.clone(), sort_keys(v)))
                .collect();
            JsonValue::Object(sorted)
        }
        JsonValue::Array(items) => JsonValue::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}
