//! Cleaning of Swagger parameter lists.
//!
//! An operation collects parameter descriptors from several places (the path
//! item, the operation itself, shared definitions), so the combined list can
//! hold duplicates and mutually exclusive locations. [`clean_parameters`]
//! reduces it to the list a single operation should publish:
//!
//! - a `formData` parameter of type `file` means the operation takes a
//!   multipart upload, so `body` parameters are dropped; otherwise every
//!   `formData` parameter is dropped,
//! - the first parameter with a given `name` wins,
//! - descriptors restricted to other methods through `methods` are dropped.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use specutil_core::parameters::clean_parameters;
//!
//! let params = vec![
//!     json!({"in": "query", "name": "limit", "methods": ["GET"]}),
//!     json!({"in": "body", "name": "pet"}),
//! ];
//! let cleaned = clean_parameters(&params, "POST")?;
//! assert_eq!(cleaned, vec![json!({"in": "body", "name": "pet"})]);
//! # Ok::<(), specutil_core::Error>(())
//! ```

// Internal imports (std, crate)
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

// External imports (alphabetized)
use serde_json::Value as JsonValue;

/// Method tag that matches every method
pub const ALLOWED: &str = "all";

/// Known values of a descriptor's `in` key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterLocation {
    Body,
    FormData,
    Query,
    Header,
    Path,
    Cookie,
}

impl ParameterLocation {
    /// Returns the location as it is spelled in a Swagger document
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::FormData => "formData",
            Self::Query => "query",
            Self::Header => "header",
            Self::Path => "path",
            Self::Cookie => "cookie",
        }
    }
}

impl FromStr for ParameterLocation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "body" => Ok(Self::Body),
            "formData" => Ok(Self::FormData),
            "query" => Ok(Self::Query),
            "header" => Ok(Self::Header),
            "path" => Ok(Self::Path),
            "cookie" => Ok(Self::Cookie),
            _ => Err(format!("Unknown parameter location: {}", s)),
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clean a parameter list for every method.
pub fn clean_all_parameters(parameters: &[JsonValue]) -> Result<Vec<JsonValue>> {
    clean_parameters(parameters, ALLOWED)
}

/// Clean a parameter list for `method`.
///
/// The input is left untouched; the returned descriptors are copies with the
/// `methods` key removed and their remaining keys in their original order.
///
/// `in` and `name` may hold any value. Only the strings `body` and `formData`
/// take part in location filtering, and names are compared as values, so the
/// number `1` and the string `"1"` are different names.
///
/// # Errors
///
/// Returns [`Error::MissingKey`] if a descriptor has no `in`, or if a
/// descriptor that survives location filtering has no `name`.
pub fn clean_parameters(parameters: &[JsonValue], method: &str) -> Result<Vec<JsonValue>> {
    let locations = parameters
        .iter()
        .map(|p| required_key(p, "in").map(JsonValue::as_str))
        .collect::<Result<Vec<_>>>()?;

    let formdata_file = parameters.iter().zip(&locations).any(|(p, loc)| {
        *loc == Some(ParameterLocation::FormData.as_str())
            && p.get("type").and_then(JsonValue::as_str) == Some("file")
    });
    let dropped = if formdata_file {
        ParameterLocation::Body
    } else {
        ParameterLocation::FormData
    };

    let mut seen = HashSet::new();
    let mut cleaned = Vec::new();
    for (parameter, location) in parameters.iter().zip(locations) {
        if location == Some(dropped.as_str()) {
            log::trace!("dropping {} parameter {}", dropped, parameter);
            continue;
        }

        // Display of a JSON value is its JSON text, so "1" and 1 stay distinct
        let name = required_key(parameter, "name")?.to_string();
        if seen.contains(&name) {
            log::trace!("dropping duplicate parameter {}", name);
            continue;
        }

        let mut p = parameter.clone();
        let methods = p.as_object_mut().and_then(|obj| obj.shift_remove("methods"));
        if applies_to(methods.as_ref(), method) {
            cleaned.push(p);
            seen.insert(name);
        }
    }

    Ok(cleaned)
}

fn required_key<'a>(parameter: &'a JsonValue, key: &'static str) -> Result<&'a JsonValue> {
    parameter.get(key).ok_or(Error::MissingKey(key))
}

/// Whether a descriptor's `methods` value admits `method`.
fn applies_to(methods: Option<&JsonValue>, method: &str) -> bool {
    match methods {
        None => true,
        Some(JsonValue::String(tag)) => tag == method || tag == ALLOWED,
        Some(JsonValue::Array(tags)) => tags
            .iter()
            .filter_map(JsonValue::as_str)
            .any(|tag| tag == method || tag == ALLOWED),
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(params: &[JsonValue]) -> Vec<&str> {
        params.iter().map(|p| p["name"].as_str().unwrap()).collect()
    }

    #[test]
    fn test_file_upload_drops_body() -> Result<()> {
        let params = vec![
            json!({"in": "body", "name": "b"}),
            json!({"in": "formData", "name": "f", "type": "file"}),
        ];
        let cleaned = clean_all_parameters(&params)?;
        assert_eq!(cleaned, vec![json!({"in": "formData", "name": "f", "type": "file"})]);
        Ok(())
    }

    #[test]
    fn test_form_data_without_file_is_dropped() -> Result<()> {
        let params = vec![
            json!({"in": "formData", "name": "f1"}),
            json!({"in": "formData", "name": "f2", "type": "string"}),
        ];
        assert!(clean_all_parameters(&params)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_form_data_and_body_without_file_keeps_body() -> Result<()> {
        let params = vec![
            json!({"in": "formData", "name": "f"}),
            json!({"in": "body", "name": "b"}),
            json!({"in": "query", "name": "q"}),
        ];
        assert_eq!(names(&clean_all_parameters(&params)?), ["b", "q"]);
        Ok(())
    }

    #[test]
    fn test_first_duplicate_wins() -> Result<()> {
        let params = vec![
            json!({"in": "query", "name": "id", "type": "integer"}),
            json!({"in": "path", "name": "id", "type": "string"}),
            json!({"in": "header", "name": "token"}),
        ];
        let cleaned = clean_all_parameters(&params)?;
        assert_eq!(names(&cleaned), ["id", "token"]);
        assert_eq!(cleaned[0]["in"], "query");
        Ok(())
    }

    #[test]
    fn test_method_filter() -> Result<()> {
        let params = vec![
            json!({"in": "query", "name": "get_only", "methods": ["GET"]}),
            json!({"in": "query", "name": "everywhere", "methods": ["all"]}),
            json!({"in": "query", "name": "default"}),
        ];
        assert_eq!(names(&clean_parameters(&params, "POST")?), ["everywhere", "default"]);
        assert_eq!(
            names(&clean_parameters(&params, "GET")?),
            ["get_only", "everywhere", "default"]
        );
        Ok(())
    }

    #[test]
    fn test_all_method_only_matches_all_tag() -> Result<()> {
        let params = vec![json!({"in": "query", "name": "q", "methods": ["GET"]})];
        assert!(clean_all_parameters(&params)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_single_method_string() -> Result<()> {
        let params = vec![json!({"in": "query", "name": "q", "methods": "GET"})];
        assert_eq!(clean_parameters(&params, "GET")?.len(), 1);
        assert!(clean_parameters(&params, "PUT")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_filtered_name_does_not_shadow_later_duplicate() -> Result<()> {
        let params = vec![
            json!({"in": "query", "name": "id", "methods": ["GET"]}),
            json!({"in": "path", "name": "id", "methods": ["POST"]}),
        ];
        let cleaned = clean_parameters(&params, "POST")?;
        assert_eq!(cleaned, vec![json!({"in": "path", "name": "id"})]);
        Ok(())
    }

    #[test]
    fn test_methods_key_removed_and_input_untouched() -> Result<()> {
        let params = vec![json!({"in": "query", "name": "q", "methods": ["all"]})];
        let before = params.clone();
        let cleaned = clean_all_parameters(&params)?;
        assert_eq!(cleaned, vec![json!({"in": "query", "name": "q"})]);
        assert_eq!(params, before);
        Ok(())
    }

    #[test]
    fn test_key_order_survives_methods_removal() -> Result<()> {
        let params = vec![json!({
            "in": "query",
            "name": "status",
            "methods": ["all"],
            "type": "string",
            "description": "Status values to filter by",
            "required": true
        })];
        let cleaned = clean_all_parameters(&params)?;
        let keys: Vec<&str> = cleaned[0]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["in", "name", "type", "description", "required"]);
        assert_eq!(cleaned[0]["description"], "Status values to filter by");
        assert_eq!(cleaned[0]["required"], true);
        Ok(())
    }

    #[test]
    fn test_non_string_names_and_locations() -> Result<()> {
        let params = vec![
            json!({"in": "query", "name": 1}),
            json!({"in": "query", "name": "1"}),
            json!({"in": "query", "name": 1, "type": "integer"}),
            json!({"in": 7, "name": "odd"}),
        ];
        let cleaned = clean_all_parameters(&params)?;
        assert_eq!(
            cleaned,
            vec![
                json!({"in": "query", "name": 1}),
                json!({"in": "query", "name": "1"}),
                json!({"in": 7, "name": "odd"}),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_missing_keys() {
        let missing_in = vec![json!({"name": "q"})];
        assert!(matches!(
            clean_all_parameters(&missing_in),
            Err(Error::MissingKey("in"))
        ));

        let missing_name = vec![json!({"in": "query"})];
        assert!(matches!(
            clean_all_parameters(&missing_name),
            Err(Error::MissingKey("name"))
        ));

        // Dropped before the name is read
        let dropped = vec![json!({"in": "formData"})];
        assert!(clean_all_parameters(&dropped).unwrap().is_empty());
    }

    #[test]
    fn test_location_parse() {
        assert_eq!("formData".parse(), Ok(ParameterLocation::FormData));
        assert_eq!(ParameterLocation::Body.to_string(), "body");
        assert!("formdata".parse::<ParameterLocation>().is_err());
    }
}
