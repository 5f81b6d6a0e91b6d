//! Class descriptors and the derive operation.
//!
//! [`Class`] is the definition-time representation of a class: its qualified
//! name, parent link, field defaults, and member tables. [`Class::derive`]
//! produces a new class from a parent and a [`ClassDef`] property bag,
//! enforcing the visibility policy and wiring superclass dispatch for
//! overridden methods.

use std::fmt;
use std::sync::{Arc, Weak};

use rustc_hash::FxHashMap;

use crate::call_context::CallContext;
use crate::class_hash::ClassHash;
use crate::error::{CallError, DeriveError};
use crate::instance::Instance;
use crate::method::{MethodDecl, MethodEntry};
use crate::qualified_name::QualifiedName;
use crate::value::Value;

/// Property bag for [`Class::derive`]: field defaults, method declarations,
/// and static values.
///
/// # Example
///
/// ```
/// use classkit_core::{Class, ClassDef, MethodDecl, Value};
///
/// let animal = Class::derive(
///     &Class::base(),
///     "Animal",
///     ClassDef::new()
///         .field("name", "")
///         .method("eat", |ctx| {
///             Ok(Value::String(format!("{}:eat", ctx.qualified_name())))
///         })
///         .declare(MethodDecl::new("sleep", |_ctx| Ok(Value::from("zzz"))).protected()),
/// )
/// .unwrap();
///
/// let mut instance = animal.instantiate(&[]).unwrap();
/// assert_eq!(instance.call("eat", &[]).unwrap(), Value::from("Animal:eat"));
/// ```
#[derive(Debug, Default)]
pub struct ClassDef {
    fields: Vec<(String, Value)>,
    methods: Vec<MethodDecl>,
    static_values: Vec<(String, Value)>,
}

impl ClassDef {
    /// Create an empty property bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an instance field with a default value.
    ///
    /// Aggregate defaults (lists, records) are deep-copied into every
    /// instance, so mutating one instance's field never affects another.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Add a public instance method.
    pub fn method<F>(mut self, name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut CallContext) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        self.methods.push(MethodDecl::new(name, body));
        self
    }

    /// Add a fully-specified member declaration (visibility, staticness,
    /// hints).
    pub fn declare(mut self, decl: MethodDecl) -> Self {
        self.methods.push(decl);
        self
    }

    /// Add a static data value, installed on the class rather than on
    /// instances.
    pub fn static_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.static_values.push((name.into(), value.into()));
        self
    }
}

/// Definition-time representation of a class.
///
/// Classes are structurally immutable once derived: members and the parent
/// link never change. Identity is the deterministic [`ClassHash`] of the
/// qualified name, so independently built roots (and their identically named
/// descendants) compare equal in ancestry checks.
pub struct Class {
    name: String,
    qualified_name: QualifiedName,
    hash: ClassHash,
    parent: Option<Arc<Class>>,
    field_defaults: FxHashMap<String, Value>,
    methods: FxHashMap<String, Arc<MethodEntry>>,
    statics: FxHashMap<String, Arc<MethodEntry>>,
    static_values: FxHashMap<String, Value>,
    // Classes only exist behind an Arc (base/derive return Arc<Class>), so
    // this back-reference always upgrades while `&self` is reachable.
    self_ref: Weak<Class>,
}

impl Class {
    /// The root class every hierarchy derives from.
    ///
    /// It has the empty name, no parent, and one fixed protected built-in:
    /// `qualified_name`, returning the receiver class's dot-joined path.
    /// Redefinitions of fixed members in a property bag are silently
    /// ignored.
    pub fn base() -> Arc<Class> {
        let hash = ClassHash::from_name("");
        let decl = MethodDecl::new("qualified_name", |ctx: &mut CallContext| {
            Ok(Value::String(ctx.qualified_name().to_string()))
        })
        .protected()
        .fixed();

        let mut methods = FxHashMap::default();
        methods.insert(
            decl.name.clone(),
            Arc::new(MethodEntry::from_decl(decl, hash, None)),
        );

        Arc::new_cyclic(|self_ref| Class {
            name: String::new(),
            qualified_name: QualifiedName::root(),
            hash,
            parent: None,
            field_defaults: FxHashMap::default(),
            methods,
            statics: FxHashMap::default(),
            static_values: FxHashMap::default(),
            self_ref: self_ref.clone(),
        })
    }

    /// Derive a new class from `parent` with the given name and property
    /// bag.
    ///
    /// The new class inherits every non-private member of the parent, then
    /// applies the bag:
    ///
    /// - A method replacing an overridable inherited method is installed
    ///   with a superclass link to the entry it replaced.
    /// - Declarations colliding with protected or fixed inherited members
    ///   are dropped silently; the inherited implementation stays.
    /// - Private declarations are installed here but skipped by any further
    ///   derivation.
    /// - Static declarations install on the class and are never wrapped.
    ///
    /// # Errors
    ///
    /// [`DeriveError::EmptyClassName`] when `name` is empty or blank. Derive
    /// never partially applies.
    pub fn derive(
        parent: &Arc<Class>,
        name: &str,
        def: ClassDef,
    ) -> Result<Arc<Class>, DeriveError> {
        if name.trim().is_empty() {
            return Err(DeriveError::EmptyClassName);
        }

        let qualified_name = parent.qualified_name.child(name);
        let hash = ClassHash::from_name(&qualified_name.to_string());

        // Inherit non-private members; entries are shared, defaults cloned.
        let mut methods: FxHashMap<String, Arc<MethodEntry>> = parent
            .methods
            .iter()
            .filter(|(_, entry)| entry.visibility.is_inherited())
            .map(|(name, entry)| (name.clone(), Arc::clone(entry)))
            .collect();
        let mut statics: FxHashMap<String, Arc<MethodEntry>> = parent
            .statics
            .iter()
            .filter(|(_, entry)| entry.visibility.is_inherited())
            .map(|(name, entry)| (name.clone(), Arc::clone(entry)))
            .collect();
        let mut field_defaults = parent.field_defaults.clone();
        let mut static_values = parent.static_values.clone();

        for (field_name, value) in def.fields {
            if let Some(existing) = methods.get(&field_name) {
                if existing.traits.is_fixed || !existing.visibility.allows_override() {
                    tracing::debug!(
                        class = %qualified_name,
                        member = %field_name,
                        "field dropped: collides with a non-overridable method"
                    );
                    continue;
                }
                methods.remove(&field_name);
            }
            field_defaults.insert(field_name, value);
        }

        for decl in def.methods {
            let table = if decl.traits.is_static {
                &statics
            } else {
                &methods
            };
            let existing = table.get(&decl.name).cloned();

            if let Some(previous) = &existing {
                if previous.traits.is_fixed || !previous.visibility.allows_override() {
                    tracing::debug!(
                        class = %qualified_name,
                        member = %decl.name,
                        visibility = %previous.visibility,
                        "override dropped: inherited member is not overridable"
                    );
                    continue;
                }
            }

            if decl.traits.is_static {
                // Statics are never wrapped: no superclass semantics.
                static_values.remove(&decl.name);
                let entry = MethodEntry::from_decl(decl, hash, None);
                statics.insert(entry.name.clone(), Arc::new(entry));
            } else {
                // A method takes the place of an inherited field default.
                field_defaults.remove(&decl.name);
                let entry = MethodEntry::from_decl(decl, hash, existing);
                methods.insert(entry.name.clone(), Arc::new(entry));
            }
        }

        for (static_name, value) in def.static_values {
            if let Some(existing) = statics.get(&static_name) {
                if existing.traits.is_fixed || !existing.visibility.allows_override() {
                    tracing::debug!(
                        class = %qualified_name,
                        member = %static_name,
                        "static value dropped: collides with a non-overridable member"
                    );
                    continue;
                }
                statics.remove(&static_name);
            }
            static_values.insert(static_name, value);
        }

        tracing::debug!(
            class = %qualified_name,
            methods = methods.len(),
            statics = statics.len() + static_values.len(),
            fields = field_defaults.len(),
            "derived class"
        );

        Ok(Arc::new_cyclic(|self_ref| Class {
            name: name.to_string(),
            qualified_name,
            hash,
            parent: Some(Arc::clone(parent)),
            field_defaults,
            methods,
            statics,
            static_values,
            self_ref: self_ref.clone(),
        }))
    }

    /// Simple (unqualified) class name. Empty for the root.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dot-joined qualified name.
    pub fn qualified_name(&self) -> &QualifiedName {
        &self.qualified_name
    }

    /// Deterministic identity hash.
    pub fn hash(&self) -> ClassHash {
        self.hash
    }

    /// The immediate parent class, if any.
    pub fn parent(&self) -> Option<&Arc<Class>> {
        self.parent.as_ref()
    }

    /// Find an instance method by name.
    pub fn find_method(&self, name: &str) -> Option<&Arc<MethodEntry>> {
        self.methods.get(name)
    }

    /// Find a static method by name.
    pub fn find_static(&self, name: &str) -> Option<&Arc<MethodEntry>> {
        self.statics.get(name)
    }

    /// Look up a static data value by name.
    pub fn static_value(&self, name: &str) -> Option<&Value> {
        self.static_values.get(name)
    }

    /// Look up an instance field default by name.
    pub fn field_default(&self, name: &str) -> Option<&Value> {
        self.field_defaults.get(name)
    }

    /// Check if an instance method with this name exists.
    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Check ancestry: whether this class is `ancestor` or derives from it.
    ///
    /// Comparison is by [`ClassHash`], so structurally recreated hierarchies
    /// compare equal.
    pub fn derives_from(&self, ancestor: &Class) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if class.hash == ancestor.hash {
                return true;
            }
            current = class.parent.as_deref();
        }
        false
    }

    /// Create an instance: clone every field default, then dispatch the
    /// user-supplied `init` method (if any) with `args`.
    ///
    /// `init` goes through normal dispatch, so an overriding `init` may call
    /// super to reach its ancestor's initializer.
    pub fn instantiate(&self, args: &[Value]) -> Result<Instance, CallError> {
        let mut instance = self.instantiate_raw();
        if self.has_method("init") {
            instance.call("init", args)?;
        }
        Ok(instance)
    }

    /// Create an instance without running the initializer.
    ///
    /// Field defaults are still cloned per instance. This is the explicit
    /// initializer-suppressing constructor used for introspection and
    /// skeleton instances.
    pub fn instantiate_raw(&self) -> Instance {
        Instance::new(self.as_arc(), self.field_defaults.clone())
    }

    /// Call a static method on this class.
    ///
    /// # Errors
    ///
    /// [`CallError::UnknownStatic`] when no static method with this name
    /// exists.
    pub fn call_static(&self, name: &str, args: &[Value]) -> Result<Value, CallError> {
        let entry = self
            .statics
            .get(name)
            .cloned()
            .ok_or_else(|| CallError::UnknownStatic {
                member: name.to_string(),
                class: self.qualified_name.to_string(),
            })?;

        let arc = self.as_arc();
        let mut ctx = CallContext::new(None, &arc, args, &entry.name, None);
        entry.invoke(&mut ctx)
    }

    fn as_arc(&self) -> Arc<Class> {
        self.self_ref
            .upgrade()
            .expect("a Class is always owned by an Arc")
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("qualified_name", &self.qualified_name.to_string())
            .field("hash", &self.hash)
            .field("parent", &self.parent.as_ref().map(|p| p.qualified_name.to_string()))
            .field("fields", &self.field_defaults.len())
            .field("methods", &self.methods.len())
            .field("statics", &(self.statics.len() + self.static_values.len()))
            .finish()
    }
}
