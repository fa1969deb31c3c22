//! specutil Core Library
//!
//! Helpers for API documentation tooling: order-preserving YAML, cleaning of
//! Swagger parameter lists, explicit decorator chains and type hierarchies,
//! and a registry that resolves symbols by dotted path.

pub mod config;
pub mod decorators;
pub mod emit;
pub mod error;
pub mod flatten;
pub mod hierarchy;
pub mod parameters;
pub mod resolver;
pub mod yaml;

pub use crate::{
    config::Config,
    decorators::{get_decorators, Layer},
    emit::{emitters, Emitter, EmitterRegistry},
    error::{Error, Result},
    flatten::{flatten, flatten_json, Nested},
    hierarchy::{get_mro_list, Symbol, TypeDescriptor},
    parameters::{clean_all_parameters, clean_parameters, ParameterLocation, ALLOWED},
    resolver::{ClassRegistry, DottedPath},
    yaml::{yaml_dump, yaml_load, yaml_load_as, OrderedYaml, YamlLoader},
};
