//! Unified class storage keyed by qualified name.
//!
//! # Storage Model
//!
//! - **Classes**: stored in a single map by `QualifiedName` (primary key).
//! - **Namespace index**: namespace string -> (simple name -> qualified
//!   name), maintained on registration for O(1) per-namespace listing.
//!
//! # Thread Safety
//!
//! `ClassRegistry` is **not thread-safe** by design. Registration happens
//! single-threaded while hierarchies are declared; afterwards the registry is
//! effectively read-only. Callers needing shared mutation must wrap it in
//! their own synchronization.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use classkit_core::{Class, QualifiedName};

/// Errors that occur during class registration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    /// A class with this qualified name is already registered.
    #[error("class '{name}' is already registered")]
    DuplicateClass { name: String },

    /// The root class (empty name) cannot be registered.
    #[error("cannot register the root class")]
    UnnamedClass,
}

/// Registry of derived classes.
///
/// # Example
///
/// ```
/// use classkit_core::{Class, ClassDef};
/// use classkit_registry::ClassRegistry;
///
/// let mut registry = ClassRegistry::new();
/// let animal = Class::derive(&Class::base(), "Animal", ClassDef::new()).unwrap();
/// let cat = Class::derive(&animal, "Cat", ClassDef::new()).unwrap();
///
/// registry.register(animal).unwrap();
/// registry.register(cat).unwrap();
///
/// assert!(registry.get_by_name("Animal.Cat").is_some());
/// assert_eq!(registry.classes_in_namespace("Animal").count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ClassRegistry {
    /// Classes stored by qualified name (primary storage).
    classes: FxHashMap<QualifiedName, Arc<Class>>,

    /// Registered namespace strings.
    namespaces: FxHashSet<String>,

    /// Classes indexed by namespace: namespace -> (simple name -> qualified
    /// name).
    by_namespace: FxHashMap<String, FxHashMap<String, QualifiedName>>,
}

impl ClassRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a derived class.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnnamedClass`] for the root class,
    /// [`RegistryError::DuplicateClass`] when the qualified name is taken.
    pub fn register(&mut self, class: Arc<Class>) -> Result<(), RegistryError> {
        let qualified_name = class.qualified_name().clone();
        if qualified_name.is_root() {
            return Err(RegistryError::UnnamedClass);
        }
        if self.classes.contains_key(&qualified_name) {
            return Err(RegistryError::DuplicateClass {
                name: qualified_name.to_string(),
            });
        }

        let namespace = qualified_name.namespace_string();
        self.namespaces.insert(namespace.clone());
        self.by_namespace
            .entry(namespace)
            .or_default()
            .insert(qualified_name.simple_name().to_string(), qualified_name.clone());

        self.classes.insert(qualified_name, class);
        Ok(())
    }

    /// Get a class by qualified name (primary lookup).
    pub fn get(&self, name: &QualifiedName) -> Option<&Arc<Class>> {
        self.classes.get(name)
    }

    /// Get a class by its dotted qualified name string.
    pub fn get_by_name(&self, name: &str) -> Option<&Arc<Class>> {
        self.classes.get(&QualifiedName::from_dotted(name))
    }

    /// Check if a class exists by qualified name.
    pub fn contains(&self, name: &QualifiedName) -> bool {
        self.classes.contains_key(name)
    }

    /// Iterate over the classes registered under one namespace.
    pub fn classes_in_namespace<'a>(
        &'a self,
        namespace: &str,
    ) -> impl Iterator<Item = &'a Arc<Class>> {
        self.by_namespace
            .get(namespace)
            .into_iter()
            .flat_map(|names| names.values())
            .filter_map(|qualified| self.classes.get(qualified))
    }

    /// Iterate over registered namespace strings.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespaces.iter().map(String::as_str)
    }

    /// Iterate over all registered classes.
    pub fn iter(&self) -> impl Iterator<Item = (&QualifiedName, &Arc<Class>)> {
        self.classes.iter()
    }

    /// Number of registered classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
