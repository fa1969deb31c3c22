//! Wrapper chains built from explicit wrap relations.
//!
//! A [`Layer`] records the layers it wraps at construction time, so walking a
//! decorated handler down to the function it ultimately calls is a plain
//! traversal.
//!
//! # Examples
//!
//! ```
//! use specutil_core::decorators::{get_decorators, Layer};
//!
//! let view = Layer::new("get_user", ());
//! let cached = Layer::wrapping("cached", (), view);
//! let authed = Layer::wrapping("requires_auth", (), cached);
//!
//! let chain: Vec<_> = get_decorators(&authed).iter().map(|l| l.name().to_string()).collect();
//! assert_eq!(chain, ["requires_auth", "cached", "get_user"]);
//! ```

use std::sync::Arc;

/// One layer of a decorated function
#[derive(Debug)]
pub struct Layer<F> {
    name: String,
    callable: F,
    wraps: Vec<Arc<Layer<F>>>,
}

impl<F> Layer<F> {
    /// A function that wraps nothing
    pub fn new(name: impl Into<String>, callable: F) -> Arc<Self> {
        Self::wrapping_all(name, callable, Vec::new())
    }

    /// A wrapper around `inner`
    pub fn wrapping(name: impl Into<String>, callable: F, inner: Arc<Layer<F>>) -> Arc<Self> {
        Self::wrapping_all(name, callable, vec![inner])
    }

    /// A wrapper around several functions, in declaration order
    pub fn wrapping_all(
        name: impl Into<String>,
        callable: F,
        wraps: Vec<Arc<Layer<F>>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            callable,
            wraps,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn callable(&self) -> &F {
        &self.callable
    }

    pub fn wraps(&self) -> &[Arc<Layer<F>>] {
        &self.wraps
    }

    /// Follow the first wrapped layer until reaching one that wraps nothing
    pub fn innermost(this: &Arc<Self>) -> Arc<Self> {
        let mut current = Arc::clone(this);
        while let Some(inner) = current.wraps.first().cloned() {
            current = inner;
        }
        current
    }
}

/// `layer` followed by everything it wraps, outermost to innermost.
pub fn get_decorators<F>(layer: &Arc<Layer<F>>) -> Vec<Arc<Layer<F>>> {
    let mut chain = vec![Arc::clone(layer)];
    for inner in &layer.wraps {
        chain.extend(get_decorators(inner));
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    type Handler = fn(i32) -> i32;

    fn double(x: i32) -> i32 {
        x * 2
    }

    fn add_one(x: i32) -> i32 {
        x + 1
    }

    fn negate(x: i32) -> i32 {
        -x
    }

    fn names<F>(chain: &[Arc<Layer<F>>]) -> Vec<&str> {
        chain.iter().map(|l| l.name()).collect()
    }

    #[test]
    fn test_plain_function_is_its_own_chain() {
        let f = Layer::<Handler>::new("double", double);
        let chain = get_decorators(&f);
        assert_eq!(chain.len(), 1);
        assert!(Arc::ptr_eq(&chain[0], &f));
    }

    #[test]
    fn test_chain_outermost_to_innermost() {
        let inner = Layer::<Handler>::new("double", double);
        let mid = Layer::<Handler>::wrapping("add_one", add_one, inner);
        let outer = Layer::<Handler>::wrapping("negate", negate, mid);

        let chain = get_decorators(&outer);
        assert_eq!(names(&chain), ["negate", "add_one", "double"]);
        assert_eq!((chain[2].callable())(4), 8);
        assert_eq!((outer.callable())(4), -4);
        assert_eq!(Layer::innermost(&outer).name(), "double");
    }

    #[test]
    fn test_multiple_wrapped_functions() {
        let a: Arc<Layer<()>> = Layer::new("a", ());
        let b = Layer::new("b", ());
        let wrapped_b = Layer::wrapping("wrap_b", (), b);
        let both = Layer::wrapping_all("both", (), vec![a, wrapped_b]);

        assert_eq!(names(&get_decorators(&both)), ["both", "a", "wrap_b", "b"]);
        assert_eq!(Layer::innermost(&both).name(), "a");
        assert_eq!(both.wraps().len(), 2);
    }
}
