//! Conversion traits for typed argument extraction and return values.
//!
//! This module provides traits for converting between Rust types and
//! [`Value`]s:
//! - [`FromValue`]: Extract a Rust value from a [`Value`]
//! - [`IntoValue`]: Convert a Rust value into a [`Value`]
//!
//! ## Supported Types
//!
//! - Integers: `i8`, `i16`, `i32`, `i64`, `u8`, `u16`, `u32` (bounds checked)
//! - Floats: `f32`, `f64` (integers convert implicitly to floats)
//! - `bool`, `String`, `Vec<Value>`, record maps, `Value` itself
//! - `()` converts into [`Value::Null`]

use rustc_hash::FxHashMap;

use crate::error::ConversionError;
use crate::value::Value;

/// Extract a value from a [`Value`].
pub trait FromValue: Sized {
    /// Extract a value, or a [`ConversionError`] if the kinds are
    /// incompatible.
    fn from_value(value: &Value) -> Result<Self, ConversionError>;
}

/// Convert a value into a [`Value`].
pub trait IntoValue {
    /// Convert this value into a [`Value`].
    fn into_value(self) -> Value;
}

// ============================================================================
// Integer implementations
// ============================================================================

macro_rules! impl_from_value_int {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Result<Self, ConversionError> {
                    match value {
                        Value::Int(v) => {
                            // Bounds check for narrowing conversions
                            if *v >= Self::MIN as i64 && *v <= Self::MAX as i64 {
                                Ok(*v as Self)
                            } else {
                                Err(ConversionError::IntegerOverflow {
                                    value: *v,
                                    target_type: stringify!($ty),
                                })
                            }
                        }
                        _ => Err(ConversionError::TypeMismatch {
                            expected: "int",
                            actual: value.type_name(),
                        }),
                    }
                }
            }

            impl IntoValue for $ty {
                fn into_value(self) -> Value {
                    Value::Int(self as i64)
                }
            }
        )*
    };
}

impl_from_value_int!(i8, i16, i32, i64);

macro_rules! impl_from_value_uint {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Result<Self, ConversionError> {
                    match value {
                        Value::Int(v) => {
                            if *v >= 0 && *v <= Self::MAX as i64 {
                                Ok(*v as Self)
                            } else {
                                Err(ConversionError::IntegerOverflow {
                                    value: *v,
                                    target_type: stringify!($ty),
                                })
                            }
                        }
                        _ => Err(ConversionError::TypeMismatch {
                            expected: "int",
                            actual: value.type_name(),
                        }),
                    }
                }
            }

            impl IntoValue for $ty {
                fn into_value(self) -> Value {
                    Value::Int(self as i64)
                }
            }
        )*
    };
}

impl_from_value_uint!(u8, u16, u32);

// ============================================================================
// Float implementations
// ============================================================================

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Float(v) => Ok(*v),
            Value::Int(v) => Ok(*v as f64),
            _ => Err(ConversionError::TypeMismatch {
                expected: "float",
                actual: value.type_name(),
            }),
        }
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        f64::from_value(value).map(|v| v as f32)
    }
}

impl IntoValue for f32 {
    fn into_value(self) -> Value {
        Value::Float(self as f64)
    }
}

// ============================================================================
// Other primitives
// ============================================================================

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Bool(v) => Ok(*v),
            _ => Err(ConversionError::TypeMismatch {
                expected: "bool",
                actual: value.type_name(),
            }),
        }
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            _ => Err(ConversionError::TypeMismatch {
                expected: "string",
                actual: value.type_name(),
            }),
        }
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::String(self)
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::String(self.to_string())
    }
}

impl FromValue for Vec<Value> {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::List(items) => Ok(items.clone()),
            _ => Err(ConversionError::TypeMismatch {
                expected: "list",
                actual: value.type_name(),
            }),
        }
    }
}

impl IntoValue for Vec<Value> {
    fn into_value(self) -> Value {
        Value::List(self)
    }
}

impl FromValue for FxHashMap<String, Value> {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Record(map) => Ok(map.clone()),
            _ => Err(ConversionError::TypeMismatch {
                expected: "record",
                actual: value.type_name(),
            }),
        }
    }
}

impl IntoValue for FxHashMap<String, Value> {
    fn into_value(self) -> Value {
        Value::Record(self)
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        Ok(value.clone())
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl IntoValue for () {
    fn into_value(self) -> Value {
        Value::Null
    }
}
