//! ClassRegistry - qualified-name keyed storage for derived classes.
//!
//! Derived classes are self-contained `Arc` handles; this crate provides the
//! optional registry that stores them by [`classkit_core::QualifiedName`]
//! with a namespace-partitioned index for lookup by ancestor path.

mod registry;

pub use registry::{ClassRegistry, RegistryError};
