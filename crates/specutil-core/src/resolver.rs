//! Resolution of registered symbols by dotted path.
//!
//! Symbols are registered up front under a dotted path such as
//! `specutil.emit.Yaml`. Resolving a path splits it on its last `.` into a
//! module path and a symbol name and looks both up in the registry. Relative
//! paths (leading `.`) and bare names (no module) are rejected before lookup.
//!
//! # Examples
//!
//! ```
//! use specutil_core::resolver::ClassRegistry;
//!
//! let mut registry = ClassRegistry::new();
//! registry.register("pkg.sub.Widget", "widget")?;
//!
//! assert_eq!(*registry.load_class("pkg.sub.Widget")?, "widget");
//! assert!(registry.load_class("Widget").is_err());
//! assert!(registry.load_class(".sub.Widget").is_err());
//! # Ok::<(), specutil_core::Error>(())
//! ```

// Internal imports (std, crate)
use std::collections::HashMap;
use std::fmt;

use crate::{Error, Result};

// External imports (alphabetized)
use once_cell::sync::Lazy;
use regex::Regex;

static SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid segment regex"));

/// A dotted path split into its module path and symbol name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DottedPath<'a> {
    pub module: &'a str,
    pub name: &'a str,
}

impl<'a> DottedPath<'a> {
    /// Split `path` on its last separator.
    ///
    /// # Errors
    ///
    /// - [`Error::RelativePath`] if `path` starts with `.`
    /// - [`Error::MissingModule`] if `path` has no `.`
    /// - [`Error::InvalidPath`] if any segment is not an identifier
    pub fn parse(path: &'a str) -> Result<Self> {
        if path.starts_with('.') {
            return Err(Error::RelativePath(path.to_string()));
        }
        let (module, name) = path
            .rsplit_once('.')
            .ok_or_else(|| Error::MissingModule(path.to_string()))?;
        if !module.split('.').chain([name]).all(|s| SEGMENT.is_match(s)) {
            return Err(Error::InvalidPath(path.to_string()));
        }
        Ok(Self { module, name })
    }
}

impl fmt::Display for DottedPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.name)
    }
}

/// Registry of symbols addressable by dotted path
#[derive(Debug, Clone)]
pub struct ClassRegistry<T> {
    modules: HashMap<String, HashMap<String, T>>,
}

impl<T> Default for ClassRegistry<T> {
    fn default() -> Self {
        Self {
            modules: HashMap::new(),
        }
    }
}

impl<T> ClassRegistry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `item` under `path`, replacing anything already there.
    pub fn register(&mut self, path: &str, item: T) -> Result<()> {
        let dotted = DottedPath::parse(path)?;
        let previous = self
            .modules
            .entry(dotted.module.to_string())
            .or_default()
            .insert(dotted.name.to_string(), item);
        if previous.is_some() {
            log::warn!("replacing symbol registered at {}", path);
        }
        Ok(())
    }

    /// Builder-style [`register`](Self::register)
    pub fn with(mut self, path: &str, item: T) -> Result<Self> {
        self.register(path, item)?;
        Ok(self)
    }

    /// Resolve `path` to the symbol registered under it.
    ///
    /// # Errors
    ///
    /// Fails with the errors of [`DottedPath::parse`], or with
    /// [`Error::NotFound`] when either the module or the symbol is unknown.
    pub fn load_class(&self, path: &str) -> Result<&T> {
        let dotted = DottedPath::parse(path)?;
        let module = self.modules.get(dotted.module);
        if module.is_none() {
            log::debug!("no symbols registered in module {}", dotted.module);
        }
        module
            .and_then(|symbols| symbols.get(dotted.name))
            .ok_or_else(|| Error::NotFound(path.to_string()))
    }

    /// Whether something is registered under `path`
    pub fn contains(&self, path: &str) -> bool {
        self.load_class(path).is_ok()
    }

    /// Number of registered symbols
    pub fn len(&self) -> usize {
        self.modules.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All registered paths, sorted
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .modules
            .iter()
            .flat_map(|(module, symbols)| symbols.keys().map(move |name| format!("{module}.{name}")))
            .collect();
        paths.sort();
        paths
    }
}
