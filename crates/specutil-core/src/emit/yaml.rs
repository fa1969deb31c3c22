//! YAML emitter backed by the ordered codec.

use super::Emitter;
use crate::yaml::OrderedYaml;
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Copy, Default)]
pub struct YamlEmitter;

impl Emitter for YamlEmitter {
    fn emit(&self, value: &JsonValue) -> crate::Result<String> {
        OrderedYaml::global().dump(value)
    }
}
