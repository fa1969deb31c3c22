//! Explicit type hierarchies and their method resolution order.
//!
//! Types declare their direct parents when they are described, and the
//! ancestor list is derived from those declarations with the C3
//! linearization: a type precedes its parents, and parents keep the order in
//! which they were declared.

// Internal imports (std, crate)
use std::fmt;
use std::sync::Arc;

use crate::{Error, Result};

/// A type together with its directly declared parents
#[derive(Debug, PartialEq, Eq)]
pub struct TypeDescriptor {
    name: String,
    parents: Vec<Arc<TypeDescriptor>>,
}

impl TypeDescriptor {
    /// Describe a type without parents
    pub fn root(name: impl Into<String>) -> Arc<Self> {
        Self::new(name, Vec::new())
    }

    /// Describe a type deriving from `parents`, in declaration order
    pub fn new(name: impl Into<String>, parents: Vec<Arc<TypeDescriptor>>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            parents,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parents(&self) -> &[Arc<TypeDescriptor>] {
        &self.parents
    }

    /// The C3 linearization of `this`, starting with `this` itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InconsistentHierarchy`] when the declared parent
    /// orders contradict each other.
    pub fn mro(this: &Arc<Self>) -> Result<Vec<Arc<TypeDescriptor>>> {
        let mut sequences = this
            .parents
            .iter()
            .map(Self::mro)
            .collect::<Result<Vec<_>>>()?;
        sequences.push(this.parents.clone());

        let mut result = vec![Arc::clone(this)];
        loop {
            sequences.retain(|seq| !seq.is_empty());
            if sequences.is_empty() {
                return Ok(result);
            }

            // First head that appears in no tail
            let candidate = sequences
                .iter()
                .map(|seq| &seq[0])
                .find(|head| {
                    !sequences
                        .iter()
                        .any(|seq| seq[1..].iter().any(|t| Arc::ptr_eq(t, head)))
                })
                .cloned()
                .ok_or_else(|| Error::InconsistentHierarchy(this.name.clone()))?;

            for seq in &mut sequences {
                if Arc::ptr_eq(&seq[0], &candidate) {
                    seq.remove(0);
                }
            }
            result.push(candidate);
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Something that may or may not be a type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    /// A described type
    Class(Arc<TypeDescriptor>),
    /// Any other value, identified by the name of its type
    Value(String),
}

/// Ancestors of `symbol` when it is a type, otherwise an empty list.
///
/// With `only_parents` the type itself is left out.
pub fn get_mro_list(symbol: &Symbol, only_parents: bool) -> Result<Vec<Arc<TypeDescriptor>>> {
    match symbol {
        Symbol::Class(descriptor) => {
            let mut mro = TypeDescriptor::mro(descriptor)?;
            if only_parents {
                mro.remove(0);
            }
            Ok(mro)
        }
        Symbol::Value(_) => Ok(Vec::new()),
    }
}
