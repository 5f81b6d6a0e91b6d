//! Unified error types for the class system.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ClasskitError (top-level wrapper)
//! ├── DeriveError     - Class definition errors (programmer errors, fail fast)
//! └── CallError       - Dispatch/runtime errors
//!     └── ConversionError - Typed argument/field extraction errors
//! ```
//!
//! Note that visibility policy outcomes are deliberately NOT errors: an
//! attempt to override a protected method, or to redefine a fixed system
//! member, is silently dropped and the inherited implementation remains
//! authoritative.

use thiserror::Error;

use crate::value::ValueKind;

/// Errors that can occur when converting between [`crate::Value`] and Rust types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Type mismatch during conversion.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// Integer overflow during narrowing conversion.
    #[error("integer overflow: value {value} does not fit in {target_type}")]
    IntegerOverflow { value: i64, target_type: &'static str },
}

/// Errors that occur while deriving a new class.
///
/// These are programmer errors in the class declaration itself. Derive never
/// partially applies: it either returns a usable class or fails before any
/// class is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeriveError {
    /// The new class was given an empty (or blank) name.
    #[error("cannot derive a class with an empty name")]
    EmptyClassName,
}

/// Errors that occur during method dispatch and execution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CallError {
    /// A superclass call was made with no ancestor implementation to
    /// dispatch to. Raised when the executing method is not an override, or
    /// when the override chain is exhausted.
    #[error("no superclass implementation to call from '{method}'")]
    InvalidSuperCall { method: String },

    /// No instance method with this name exists on the class.
    #[error("unknown method '{method}' on class '{class}'")]
    UnknownMethod { method: String, class: String },

    /// No static member with this name exists on the class.
    #[error("unknown static member '{member}' on class '{class}'")]
    UnknownStatic { member: String, class: String },

    /// No field with this name exists on the instance.
    #[error("unknown field '{field}' on class '{class}'")]
    UnknownField { field: String, class: String },

    /// Receiver access from a static call context.
    #[error("no receiver available in a static call to '{method}'")]
    NoReceiver { method: String },

    /// Argument index out of bounds.
    #[error("argument index {index} out of bounds (call has {count} arguments)")]
    ArgumentIndexOutOfBounds { index: usize, count: usize },

    /// An argument did not match the method's declared hint.
    #[error("argument {index} of '{method}' must be of type {expected}, got {actual}")]
    ArgumentType {
        index: usize,
        method: String,
        expected: ValueKind,
        actual: ValueKind,
    },

    /// Error converting an argument, field, or return value.
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),
}

/// Top-level error type wrapping all phases.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClasskitError {
    /// Class definition error.
    #[error(transparent)]
    Derive(#[from] DeriveError),

    /// Dispatch/runtime error.
    #[error(transparent)]
    Call(#[from] CallError),
}
