//! Call context carrying per-invocation dispatch state.

use std::fmt;
use std::sync::Arc;

use crate::class::Class;
use crate::convert::{FromValue, IntoValue};
use crate::error::CallError;
use crate::instance::Instance;
use crate::method::MethodEntry;
use crate::qualified_name::QualifiedName;
use crate::value::Value;

/// Context for a single method invocation.
///
/// A fresh context is built for every dispatch and dropped when the method
/// returns, so a throwing override can never leave stale superclass-dispatch
/// state behind, and recursive calls each carry their own context.
///
/// The context provides access to the receiver and arguments, and is the
/// home of the two root-class operations: [`CallContext::qualified_name`]
/// and [`CallContext::call_super`].
///
/// ## Typed Argument Access
///
/// Use `arg::<T>()` for typed extraction with automatic conversion:
///
/// ```ignore
/// let name: String = ctx.arg(0)?;
/// let count: i64 = ctx.arg_or(1, 1)?;
/// ```
pub struct CallContext<'a> {
    /// Receiver instance (`None` for static calls).
    receiver: Option<&'a mut Instance>,
    /// The class the call was dispatched on (the receiver's class for
    /// instance calls).
    class: &'a Arc<Class>,
    /// Argument slots.
    args: &'a [Value],
    /// Name of the executing method.
    method: &'a str,
    /// Ancestor implementation [`CallContext::call_super`] dispatches to.
    super_entry: Option<Arc<MethodEntry>>,
}

impl<'a> CallContext<'a> {
    pub(crate) fn new(
        receiver: Option<&'a mut Instance>,
        class: &'a Arc<Class>,
        args: &'a [Value],
        method: &'a str,
        super_entry: Option<Arc<MethodEntry>>,
    ) -> Self {
        Self {
            receiver,
            class,
            args,
            method,
            super_entry,
        }
    }

    /// Get the number of arguments.
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    /// Get all argument slots.
    pub fn args(&self) -> &[Value] {
        self.args
    }

    /// Get a raw reference to an argument slot.
    pub fn arg_slot(&self, index: usize) -> Result<&Value, CallError> {
        self.args
            .get(index)
            .ok_or(CallError::ArgumentIndexOutOfBounds {
                index,
                count: self.args.len(),
            })
    }

    /// Get a typed argument value.
    ///
    /// Uses [`FromValue`] to convert the slot to the requested type, with
    /// bounds checking for narrowing integer conversions.
    pub fn arg<T: FromValue>(&self, index: usize) -> Result<T, CallError> {
        let slot = self.arg_slot(index)?;
        T::from_value(slot).map_err(CallError::Conversion)
    }

    /// Get a typed argument, or `None` when the slot is missing or null.
    pub fn opt_arg<T: FromValue>(&self, index: usize) -> Result<Option<T>, CallError> {
        match self.args.get(index) {
            None | Some(Value::Null) => Ok(None),
            Some(slot) => T::from_value(slot).map(Some).map_err(CallError::Conversion),
        }
    }

    /// Get a typed argument, or `default` when the slot is missing or null.
    pub fn arg_or<T: FromValue>(&self, index: usize, default: T) -> Result<T, CallError> {
        Ok(self.opt_arg(index)?.unwrap_or(default))
    }

    /// Get the receiver instance.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::NoReceiver`] inside a static call.
    pub fn this(&self) -> Result<&Instance, CallError> {
        self.receiver.as_deref().ok_or_else(|| CallError::NoReceiver {
            method: self.method.to_string(),
        })
    }

    /// Get the receiver instance mutably.
    pub fn this_mut(&mut self) -> Result<&mut Instance, CallError> {
        let method = self.method;
        self.receiver
            .as_deref_mut()
            .ok_or_else(|| CallError::NoReceiver {
                method: method.to_string(),
            })
    }

    /// Get a typed field value from the receiver.
    pub fn field<T: FromValue>(&self, name: &str) -> Result<T, CallError> {
        let instance = self.this()?;
        let value = instance.get(name).ok_or_else(|| CallError::UnknownField {
            field: name.to_string(),
            class: instance.qualified_name().to_string(),
        })?;
        T::from_value(value).map_err(CallError::Conversion)
    }

    /// Set a field on the receiver.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl IntoValue) -> Result<(), CallError> {
        self.this_mut()?.set(name, value.into_value());
        Ok(())
    }

    /// The class this call was dispatched on.
    pub fn class(&self) -> &Arc<Class> {
        self.class
    }

    /// Name of the executing method.
    pub fn method_name(&self) -> &str {
        self.method
    }

    /// The dot-joined qualified name of the dispatching class.
    ///
    /// This is the receiver's class for instance calls, so an ancestor
    /// method observes the path of the class it was called on, not the
    /// class that declared it.
    pub fn qualified_name(&self) -> &QualifiedName {
        self.class.qualified_name()
    }

    /// Whether a superclass implementation is available to
    /// [`CallContext::call_super`].
    pub fn has_super(&self) -> bool {
        self.super_entry.is_some()
    }

    /// Invoke the ancestor implementation of the executing method.
    ///
    /// The ancestor runs with the same receiver. Chained overrides resolve
    /// one level at a time: the ancestor's own context links the next entry
    /// up, so it may itself call super.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::InvalidSuperCall`] when the executing method did
    /// not override anything (no ancestor target exists).
    pub fn call_super(&mut self, args: &[Value]) -> Result<Value, CallError> {
        let target = self
            .super_entry
            .clone()
            .ok_or_else(|| CallError::InvalidSuperCall {
                method: self.method.to_string(),
            })?;

        let mut ctx = CallContext {
            receiver: self.receiver.as_deref_mut(),
            class: self.class,
            args,
            method: &target.name,
            super_entry: target.super_entry.clone(),
        };
        target.invoke(&mut ctx)
    }
}

impl fmt::Debug for CallContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallContext")
            .field("method", &self.method)
            .field("class", &self.class.qualified_name().to_string())
            .field("arg_count", &self.arg_count())
            .field("has_super", &self.has_super())
            .finish()
    }
}
