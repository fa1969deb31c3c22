//! Order-preserving YAML loading and dumping.
//!
//! Mappings are loaded into `serde_json::Value` objects, which keep their keys
//! in insertion order, so a document can be loaded, edited and dumped back
//! without reshuffling its keys. Parse failures are not errors here: loading
//! invalid text yields `None`.
//!
//! # Examples
//!
//! ```
//! use specutil_core::yaml::OrderedYaml;
//!
//! let codec = OrderedYaml::global();
//! let doc = codec.load("zeta: 1\nalpha: 2\n").unwrap();
//! let keys: Vec<_> = doc.as_object().unwrap().keys().cloned().collect();
//! assert_eq!(keys, ["zeta", "alpha"]);
//!
//! assert!(codec.load("key: [unclosed").is_none());
//! ```

// Internal imports (std, crate)
use std::fmt;

// External imports (alphabetized)
use once_cell::sync::Lazy;
use serde::de::{self, DeserializeOwned, IgnoredAny, VariantAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::{Map as JsonMap, Number, Value as JsonValue};
use serde_yaml::Value as YamlValue;

static GLOBAL: Lazy<OrderedYaml> = Lazy::new(OrderedYaml::default);

/// YAML codec that maps every YAML mapping to an ordered JSON object.
///
/// Loading rules beyond plain YAML:
///
/// - scalar mapping keys are stringified (`200` becomes `"200"`, `~` becomes
///   `"null"`); composite keys fail to load,
/// - a repeated key keeps its first position and its last value, which also
///   applies to keys that only collide after stringification (`1` and `'1'`),
/// - `.inf`, `-.inf` and `.nan` load as the strings `".inf"`, `"-.inf"` and
///   `".nan"`,
/// - tags are dropped and the tagged value is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderedYaml {
    _private: (),
}

impl OrderedYaml {
    /// The process-wide codec, created on first use
    pub fn global() -> &'static OrderedYaml {
        &GLOBAL
    }

    /// Parse YAML text, returning `None` on any parse error
    pub fn load(&self, text: &str) -> Option<JsonValue> {
        match serde_yaml::from_str::<Ordered>(text) {
            Ok(Ordered(value)) => Some(value),
            Err(e) => {
                log::debug!("discarding unparsable YAML: {}", e);
                None
            }
        }
    }

    /// Parse YAML text into a typed value, returning `None` on any error
    pub fn load_as<T: DeserializeOwned>(&self, text: &str) -> Option<T> {
        let value = self.load(text)?;
        serde_json::from_value(value)
            .map_err(|e| log::debug!("YAML does not match the target type: {}", e))
            .ok()
    }

    /// Serialize a value as YAML, keeping mapping keys in insertion order
    pub fn dump(&self, value: &JsonValue) -> crate::Result<String> {
        Ok(serde_yaml::to_string(value)?)
    }
}

/// Opt-in loader behaviour for types that read YAML documents.
pub trait YamlLoader {
    /// Parse YAML text, returning `None` on any parse error
    fn yaml_load(text: &str) -> Option<JsonValue> {
        OrderedYaml::global().load(text)
    }
}

/// Parse YAML text with the process-wide codec.
pub fn yaml_load(text: &str) -> Option<JsonValue> {
    OrderedYaml::global().load(text)
}

/// Parse YAML text into `T` with the process-wide codec.
pub fn yaml_load_as<T: DeserializeOwned>(text: &str) -> Option<T> {
    OrderedYaml::global().load_as(text)
}

/// Dump a value with the process-wide codec.
pub fn yaml_dump(value: &JsonValue) -> crate::Result<String> {
    OrderedYaml::global().dump(value)
}

/// A loaded node
struct Ordered(JsonValue);

impl<'de> Deserialize<'de> for Ordered {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(OrderedVisitor)
    }
}

struct OrderedVisitor;

impl<'de> Visitor<'de> for OrderedVisitor {
    type Value = Ordered;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any YAML node")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Ordered, E> {
        Ok(Ordered(JsonValue::Bool(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Ordered, E> {
        Ok(Ordered(JsonValue::Number(v.into())))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Ordered, E> {
        Ok(Ordered(JsonValue::Number(v.into())))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Ordered, E> {
        Ok(Ordered(float_value(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Ordered, E> {
        Ok(Ordered(JsonValue::String(v.to_string())))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Ordered, E> {
        Ok(Ordered(JsonValue::String(v)))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Ordered, E> {
        Ok(Ordered(JsonValue::Null))
    }

    fn visit_none<E: de::Error>(self) -> Result<Ordered, E> {
        Ok(Ordered(JsonValue::Null))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Ordered, D::Error> {
        Ordered::deserialize(deserializer)
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Ordered, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(Ordered(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Ordered(JsonValue::Array(items)))
    }

    fn visit_map<A: de::MapAccess<'de>>(self, mut access: A) -> Result<Ordered, A::Error> {
        let mut map = JsonMap::new();
        while let Some(key) = access.next_key::<YamlValue>()? {
            let key = key_string(key).map_err(de::Error::custom)?;
            let Ordered(value) = access.next_value()?;
            if map.insert(key.clone(), value).is_some() {
                log::debug!("duplicate mapping key {}, keeping the last value", key);
            }
        }
        Ok(Ordered(JsonValue::Object(map)))
    }

    // Tagged nodes arrive as single-variant enums; the tag carries no meaning here
    fn visit_enum<A: de::EnumAccess<'de>>(self, data: A) -> Result<Ordered, A::Error> {
        let (IgnoredAny, variant) = data.variant::<IgnoredAny>()?;
        variant.newtype_variant()
    }
}

fn float_value(v: f64) -> JsonValue {
    match Number::from_f64(v) {
        Some(n) => JsonValue::Number(n),
        None if v.is_nan() => JsonValue::String(".nan".to_string()),
        None if v > 0.0 => JsonValue::String(".inf".to_string()),
        None => JsonValue::String("-.inf".to_string()),
    }
}

fn key_string(key: YamlValue) -> Result<String, String> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Null => Ok("null".to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Tagged(tagged) => key_string(tagged.value),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => {
            Err("composite mapping keys are not supported".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn keys(value: &JsonValue) -> Vec<String> {
        value.as_object().unwrap().keys().cloned().collect()
    }

    #[test]
    fn test_load_keeps_document_order() {
        let doc = yaml_load("paths:\n  /b: {}\n  /a: {}\ninfo:\n  title: t\n").unwrap();
        assert_eq!(keys(&doc), ["paths", "info"]);
        assert_eq!(keys(&doc["paths"]), ["/b", "/a"]);
    }

    #[test]
    fn test_roundtrip_preserves_order_and_values() {
        let mut map = JsonMap::new();
        map.insert("z".into(), json!(1));
        map.insert("m".into(), json!({"y": [1, 2.5, "x"], "b": null}));
        map.insert("a".into(), json!(true));
        let original = JsonValue::Object(map);

        let text = yaml_dump(&original).unwrap();
        let reloaded = yaml_load(&text).unwrap();
        assert_eq!(reloaded, original);
        assert_eq!(keys(&reloaded), ["z", "m", "a"]);
        assert_eq!(keys(&reloaded["m"]), ["y", "b"]);
    }

    #[test]
    fn test_dump_is_plain_mapping() {
        let text = yaml_dump(&json!({"b": 1, "a": 2})).unwrap();
        assert_eq!(text, "b: 1\na: 2\n");
        assert!(!text.contains('!'));
    }

    #[test]
    fn test_invalid_yaml_is_absent() {
        assert!(yaml_load("key: [unclosed").is_none());
        assert!(yaml_load("a: b: c").is_none());
    }

    #[test]
    fn test_scalar_keys_become_strings() {
        let doc = yaml_load("200: ok\ntrue: yes\n~: nothing\n").unwrap();
        assert_eq!(keys(&doc), ["200", "true", "null"]);
        assert_eq!(doc["200"], json!("ok"));
    }

    #[test]
    fn test_composite_keys_are_absent() {
        assert!(yaml_load("? [a, b]\n: value\n").is_none());
    }

    #[test]
    fn test_duplicate_keys_keep_first_position_and_last_value() {
        let doc = yaml_load("a: 1\nb: 2\na: 3\n").unwrap();
        assert_eq!(keys(&doc), ["a", "b"]);
        assert_eq!(doc["a"], json!(3));

        let doc = yaml_load("1: x\n'1': y\n").unwrap();
        assert_eq!(doc, json!({"1": "y"}));
    }

    #[test]
    fn test_non_finite_floats_load_as_strings() {
        let doc = yaml_load("up: .inf\ndown: -.inf\nnothing: .nan\nhalf: 0.5\n").unwrap();
        assert_eq!(
            doc,
            json!({"up": ".inf", "down": "-.inf", "nothing": ".nan", "half": 0.5})
        );
    }

    #[test]
    fn test_tags_are_dropped() {
        let doc = yaml_load("value: !custom [1, 2]\n").unwrap();
        assert_eq!(doc, json!({"value": [1, 2]}));
    }

    #[test]
    fn test_load_as_typed() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Info {
            title: String,
            version: String,
        }
        let info: Info = yaml_load_as("title: Pets\nversion: '1.0'\n").unwrap();
        assert_eq!(
            info,
            Info {
                title: "Pets".into(),
                version: "1.0".into()
            }
        );
        assert!(yaml_load_as::<Info>("title: Pets\n").is_none());
    }

    #[test]
    fn test_loader_trait_default() {
        struct View;
        impl YamlLoader for View {}
        assert_eq!(View::yaml_load("- 1\n- 2\n"), Some(json!([1, 2])));
        assert_eq!(View::yaml_load("[1, 2"), None);
    }
}
