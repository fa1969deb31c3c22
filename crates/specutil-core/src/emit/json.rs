//! JSON emitter.

use super::Emitter;
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Copy)]
pub struct JsonEmitter {
    /// Pretty-print with two-space indentation
    pub pretty: bool,
}

impl Default for JsonEmitter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl Emitter for JsonEmitter {
    fn emit(&self, value: &JsonValue) -> crate::Result<String> {
        let mut out = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        out.push('\n');
        Ok(out)
    }
}
