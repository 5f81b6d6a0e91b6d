//! Runtime value type for fields, arguments, and return values.

use std::fmt;

use rustc_hash::FxHashMap;

/// A dynamically-typed value.
///
/// This enum represents everything that can be stored in an instance field,
/// passed as a method argument, or returned from a method. Aggregates
/// ([`Value::List`] and [`Value::Record`]) own their contents, and `clone()`
/// is a deep copy: a cloned list or record never shares storage with its
/// source. Instance construction relies on this to keep sibling instances
/// from aliasing a shared default.
#[derive(Clone, PartialEq, Default)]
pub enum Value {
    /// Absent/null value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value (all integer widths stored as i64).
    Int(i64),
    /// Floating point value (f32 and f64 both stored as f64).
    Float(f64),
    /// String value (owned).
    String(String),
    /// Ordered sequence of values.
    List(Vec<Value>),
    /// Keyed record of values.
    Record(FxHashMap<String, Value>),
}

/// The kind of a [`Value`], used for type detection and argument hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    String,
    List,
    Record,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::List => "list",
            ValueKind::Record => "record",
        };
        write!(f, "{name}")
    }
}

impl Value {
    /// Determine the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::List(_) => ValueKind::List,
            Value::Record(_) => ValueKind::Record,
        }
    }

    /// Get a human-readable name for this value's kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this is an aggregate (list or record) whose storage must not
    /// be shared between instances.
    pub fn is_aggregate(&self) -> bool {
        matches!(self, Value::List(_) | Value::Record(_))
    }

    /// Build a list value from anything convertible.
    ///
    /// ```
    /// use classkit_core::Value;
    ///
    /// let traits = Value::list(["Beast"]);
    /// assert_eq!(traits, Value::List(vec![Value::from("Beast")]));
    /// ```
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a record value from key/value pairs.
    pub fn record<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Record(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Borrow as a string slice, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow as a list, if this is a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow as a mutable list, if this is a list.
    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow as a record, if this is a record.
    pub fn as_record(&self) -> Option<&FxHashMap<String, Value>> {
        match self {
            Value::Record(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow as a mutable record, if this is a record.
    pub fn as_record_mut(&mut self) -> Option<&mut FxHashMap<String, Value>> {
        match self {
            Value::Record(map) => Some(map),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(v) => write!(f, "Bool({})", v),
            Value::Int(v) => write!(f, "Int({})", v),
            Value::Float(v) => write!(f, "Float({})", v),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Record(map) => f.debug_tuple("Record").field(map).finish(),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<FxHashMap<String, Value>> for Value {
    fn from(v: FxHashMap<String, Value>) -> Self {
        Value::Record(v)
    }
}
