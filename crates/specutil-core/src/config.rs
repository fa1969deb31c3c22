//! Configuration for the specutil command line.
//!
//! The configuration is a YAML file; every field has a default, so an empty
//! file is a valid configuration.
//!
//! # Examples
//!
//! ```no_run
//! use specutil_core::config::Config;
//!
//! # #[tokio::main]
//! # async fn main() -> specutil_core::Result<()> {
//! let mut config = Config::default();
//! config.method = "POST".to_string();
//! config.save("specutil.yaml").await?;
//!
//! let loaded = Config::from_file("specutil.yaml").await?;
//! assert_eq!(loaded.method, "POST");
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::Path;

use crate::emit::DEFAULT_EMITTER;
use crate::parameters::ALLOWED;

// External imports (alphabetized)
use serde::{Deserialize, Deserializer, Serialize};
use serde_value::Value as SerdeValue;
use tokio::fs;

/// Defaults for cleaning and emitting documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Method tag parameters are cleaned for
    #[serde(default = "default_method")]
    pub method: String,

    /// Emit mappings with sorted keys instead of document order
    #[serde(default)]
    pub sort_keys: bool,

    /// Output file; stdout when unset
    #[serde(default)]
    pub output: Option<String>,

    /// Dotted path of the registered emitter
    #[serde(default = "default_emitter")]
    pub emitter: String,

    /// Method tags whose cleaned parameter list is emptied
    #[serde(default, deserialize_with = "deserialize_methods")]
    pub skip_methods: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            method: default_method(),
            sort_keys: false,
            output: None,
            emitter: default_emitter(),
            skip_methods: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|e| {
            crate::Error::config(format!("Invalid configuration in {}: {}", path.display(), e))
        })
    }

    /// Save configuration to a file
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Whether cleaning for `method` should yield no parameters
    pub fn skips(&self, method: &str) -> bool {
        self.skip_methods.iter().any(|m| m == method)
    }
}

fn default_method() -> String {
    ALLOWED.to_string()
}

fn default_emitter() -> String {
    DEFAULT_EMITTER.to_string()
}

/// Accept either a single method tag or a list of them
fn deserialize_methods<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = SerdeValue::deserialize(deserializer)?;

    match value {
        SerdeValue::String(s) => Ok(vec![s]),
        SerdeValue::Seq(seq) => seq
            .into_iter()
            .map(|item| match item {
                SerdeValue::String(s) => Ok(s),
                _ => Err(serde::de::Error::custom(
                    "Expected string or array of strings",
                )),
            })
            .collect(),
        SerdeValue::Unit | SerdeValue::Option(None) => Ok(Vec::new()),
        _ => Err(serde::de::Error::custom(
            "Expected string or array of strings",
        )),
    }
}
