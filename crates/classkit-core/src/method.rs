//! Method declarations, storage, and callable wrappers.
//!
//! A method passes through three forms:
//!
//! - [`MethodFn`]: a type-erased callable wrapping any [`MethodBody`]
//! - [`MethodDecl`]: a declaration collected into a property bag — name,
//!   implementation, visibility, traits, optional argument hints
//! - [`MethodEntry`]: the resolved member installed on a class by derive,
//!   carrying the superclass link for overridden methods

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::call_context::CallContext;
use crate::class_hash::ClassHash;
use crate::error::CallError;
use crate::value::{Value, ValueKind};
use crate::visibility::Visibility;

/// Trait for callable method bodies.
///
/// Implemented for any closure taking a [`CallContext`] and returning a
/// [`Value`].
pub trait MethodBody {
    /// Call this body with the given context.
    fn call(&self, ctx: &mut CallContext) -> Result<Value, CallError>;
}

impl<F> MethodBody for F
where
    F: Fn(&mut CallContext) -> Result<Value, CallError>,
{
    fn call(&self, ctx: &mut CallContext) -> Result<Value, CallError> {
        (self)(ctx)
    }
}

/// Type-erased method implementation.
///
/// Wraps any callable implementing [`MethodBody`], allowing bodies of
/// different closure types to be stored uniformly. The inner callable is in
/// an `Arc` so inherited entries share one implementation.
pub struct MethodFn {
    inner: Arc<dyn MethodBody + Send + Sync>,
}

impl MethodFn {
    /// Create a new method implementation from a callable.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut CallContext) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Call this implementation with the given context.
    pub fn call(&self, ctx: &mut CallContext) -> Result<Value, CallError> {
        self.inner.call(ctx)
    }
}

impl Clone for MethodFn {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl fmt::Debug for MethodFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodFn").finish_non_exhaustive()
    }
}

/// Method traits (special member behaviors).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MethodTraits {
    /// This member lives on the class, not on instances.
    pub is_static: bool,
    /// This member is a fixed system member supplied by the root class.
    /// Property-bag redefinitions are silently dropped.
    pub is_fixed: bool,
}

impl MethodTraits {
    /// Create default method traits (no special behaviors).
    pub const fn new() -> Self {
        Self {
            is_static: false,
            is_fixed: false,
        }
    }
}

/// A method declaration destined for a property bag.
///
/// Visibility and staticness are declaration-time data, set with the builder
/// methods below before the declaration is handed to derive.
///
/// # Example
///
/// ```
/// use classkit_core::{MethodDecl, Value};
///
/// let decl = MethodDecl::new("sleep", |ctx| {
///     Ok(Value::String(format!("{}:sleep", ctx.qualified_name())))
/// })
/// .protected();
/// assert_eq!(decl.name, "sleep");
/// ```
#[derive(Debug, Clone)]
pub struct MethodDecl {
    /// Member name.
    pub name: String,
    /// Implementation.
    pub body: MethodFn,
    /// Visibility modifier.
    pub visibility: Visibility,
    /// Static/fixed traits.
    pub traits: MethodTraits,
    /// Optional per-argument kind hints, checked at dispatch. Null arguments
    /// always pass; arguments beyond the hint list are unchecked.
    pub param_hints: Option<Vec<ValueKind>>,
    /// Deprecation message. A deprecated method logs a warning on first
    /// invocation and then runs normally.
    pub deprecated: Option<String>,
}

impl MethodDecl {
    /// Create a public instance method declaration.
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut CallContext) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            body: MethodFn::new(body),
            visibility: Visibility::Public,
            traits: MethodTraits::new(),
            param_hints: None,
            deprecated: None,
        }
    }

    /// Mark as protected: inherited, but override attempts are dropped.
    pub fn protected(mut self) -> Self {
        self.visibility = Visibility::Protected;
        self
    }

    /// Mark as private: callable on the declaring class only, not inherited.
    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    /// Mark as static: installed on the class, never wrapped for superclass
    /// calls.
    pub fn as_static(mut self) -> Self {
        self.traits.is_static = true;
        self
    }

    /// Mark as a fixed system member. Root-class built-ins only.
    pub(crate) fn fixed(mut self) -> Self {
        self.traits.is_fixed = true;
        self
    }

    /// Attach per-argument kind hints.
    pub fn with_param_hints<I>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = ValueKind>,
    {
        self.param_hints = Some(hints.into_iter().collect());
        self
    }

    /// Mark as deprecated with a message logged on first invocation.
    pub fn deprecated(mut self, message: impl Into<String>) -> Self {
        self.deprecated = Some(message.into());
        self
    }
}

/// A resolved method member installed on a class.
///
/// Entries are shared between a class and its descendants via `Arc`; an
/// overriding entry links the ancestor entry it replaced through
/// `super_entry`, one level per derivation.
pub struct MethodEntry {
    /// Member name.
    pub name: String,
    /// Deterministic member hash (owning class hash mixed with the name).
    pub hash: ClassHash,
    /// Visibility modifier.
    pub visibility: Visibility,
    /// Static/fixed traits.
    pub traits: MethodTraits,
    /// Optional per-argument kind hints.
    pub param_hints: Option<Vec<ValueKind>>,
    /// Deprecation message, if any.
    pub deprecated: Option<String>,
    /// The ancestor implementation this entry replaced, if it is an override.
    pub super_entry: Option<Arc<MethodEntry>>,
    body: MethodFn,
    warned: AtomicBool,
}

impl MethodEntry {
    /// Resolve a declaration into an entry for the class identified by
    /// `class_hash`, linking the inherited entry it replaces (if any).
    pub(crate) fn from_decl(
        decl: MethodDecl,
        class_hash: ClassHash,
        super_entry: Option<Arc<MethodEntry>>,
    ) -> Self {
        let hash = if decl.traits.is_static {
            ClassHash::from_static(class_hash, &decl.name)
        } else {
            ClassHash::from_method(class_hash, &decl.name)
        };
        Self {
            name: decl.name,
            hash,
            visibility: decl.visibility,
            traits: decl.traits,
            param_hints: decl.param_hints,
            deprecated: decl.deprecated,
            super_entry,
            body: decl.body,
            warned: AtomicBool::new(false),
        }
    }

    /// Check the argument hints, emit the deprecation warning if due, and
    /// run the body.
    pub(crate) fn invoke(&self, ctx: &mut CallContext) -> Result<Value, CallError> {
        if let Some(hints) = &self.param_hints {
            for (index, hint) in hints.iter().enumerate() {
                let Some(arg) = ctx.args().get(index) else {
                    break;
                };
                // Null arguments skip the check
                if !arg.is_null() && arg.kind() != *hint {
                    return Err(CallError::ArgumentType {
                        index,
                        method: self.name.clone(),
                        expected: *hint,
                        actual: arg.kind(),
                    });
                }
            }
        }

        if let Some(message) = &self.deprecated {
            if !self.warned.swap(true, Ordering::Relaxed) {
                tracing::warn!(method = %self.name, "deprecated method called: {message}");
            }
        }

        self.body.call(ctx)
    }

    /// Whether this entry is an override with an ancestor implementation.
    pub fn has_super(&self) -> bool {
        self.super_entry.is_some()
    }
}

impl fmt::Debug for MethodEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodEntry")
            .field("name", &self.name)
            .field("hash", &self.hash)
            .field("visibility", &self.visibility)
            .field("traits", &self.traits)
            .field("has_super", &self.has_super())
            .finish_non_exhaustive()
    }
}
