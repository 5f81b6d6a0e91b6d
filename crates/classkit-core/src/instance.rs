//! Runtime instances of derived classes.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::call_context::CallContext;
use crate::class::Class;
use crate::convert::FromValue;
use crate::error::CallError;
use crate::qualified_name::QualifiedName;
use crate::value::Value;

/// A runtime object created from a [`Class`].
///
/// Every instance owns its fields: construction deep-clones each inherited
/// default, so two instances of the same class never share a mutable
/// aggregate. Methods stay on the class and are reached through dispatch.
///
/// Ad-hoc fields may be set after construction; they exist on this instance
/// only.
pub struct Instance {
    class: Arc<Class>,
    fields: FxHashMap<String, Value>,
}

impl Instance {
    pub(crate) fn new(class: Arc<Class>, fields: FxHashMap<String, Value>) -> Self {
        Self { class, fields }
    }

    /// The class this instance was created from.
    pub fn class(&self) -> &Arc<Class> {
        &self.class
    }

    /// Dot-joined qualified name of this instance's class.
    pub fn qualified_name(&self) -> &QualifiedName {
        self.class.qualified_name()
    }

    /// Get a field value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Get a field value mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields.get_mut(name)
    }

    /// Get a typed field value.
    ///
    /// # Errors
    ///
    /// [`CallError::UnknownField`] when no such field exists, or a
    /// conversion error when the kinds are incompatible.
    pub fn field<T: FromValue>(&self, name: &str) -> Result<T, CallError> {
        let value = self.fields.get(name).ok_or_else(|| CallError::UnknownField {
            field: name.to_string(),
            class: self.class.qualified_name().to_string(),
        })?;
        T::from_value(value).map_err(CallError::Conversion)
    }

    /// Set a field value, creating the field if it does not exist.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Iterate over field names and values.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Check if an instance method with this name is callable.
    pub fn has_method(&self, name: &str) -> bool {
        self.class.has_method(name)
    }

    /// Check whether this instance's class is `class` or derives from it.
    pub fn instance_of(&self, class: &Class) -> bool {
        self.class.derives_from(class)
    }

    /// Dispatch an instance method.
    ///
    /// Builds a fresh [`CallContext`] for the invocation; if the resolved
    /// entry is an override, the context carries the ancestor
    /// implementation for [`CallContext::call_super`].
    ///
    /// # Errors
    ///
    /// [`CallError::UnknownMethod`] when the class has no instance method
    /// with this name (static members are not reachable through instances),
    /// or whatever error the method body returns.
    pub fn call(&mut self, method: &str, args: &[Value]) -> Result<Value, CallError> {
        let class = Arc::clone(&self.class);
        let entry = class
            .find_method(method)
            .cloned()
            .ok_or_else(|| CallError::UnknownMethod {
                method: method.to_string(),
                class: class.qualified_name().to_string(),
            })?;

        let mut ctx = CallContext::new(
            Some(self),
            &class,
            args,
            &entry.name,
            entry.super_entry.clone(),
        );
        entry.invoke(&mut ctx)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.class.qualified_name().to_string())
            .field("fields", &self.fields)
            .finish()
    }
}
