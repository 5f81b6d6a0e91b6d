//! Core class mechanism: descriptors, instances, visibility, and dispatch.
//!
//! This crate implements classical inheritance over dynamically-typed
//! runtime objects:
//!
//! - [`Class`] / [`ClassDef`] - type descriptors and the derive operation
//! - [`Instance`] - runtime objects with per-instance field storage
//! - [`Visibility`] / [`MethodDecl`] - declaration-time member policy
//! - [`CallContext`] - per-invocation state, home of `call_super` and
//!   `qualified_name`
//! - [`Value`] / [`FromValue`] / [`IntoValue`] - the dynamic value system
//! - [`QualifiedName`] / [`ClassHash`] - naming and identity
//!
//! # Example
//!
//! ```
//! use classkit_core::{Class, ClassDef, MethodDecl, Value};
//!
//! let animal = Class::derive(
//!     &Class::base(),
//!     "Animal",
//!     ClassDef::new()
//!         .field("name", "")
//!         .method("growl", |_ctx| Ok(Value::from("growl"))),
//! )?;
//!
//! let cat = Class::derive(
//!     &animal,
//!     "Cat",
//!     ClassDef::new().method("growl", |ctx| {
//!         let base: String = ctx.call_super(&[])?.as_str().unwrap_or("").to_string();
//!         Ok(Value::String(format!("{base}:meow")))
//!     }),
//! )?;
//!
//! let mut felix = cat.instantiate(&[])?;
//! assert_eq!(felix.call("growl", &[])?, Value::from("growl:meow"));
//! assert_eq!(felix.qualified_name().to_string(), "Animal.Cat");
//! # Ok::<(), classkit_core::ClasskitError>(())
//! ```

mod call_context;
mod class;
mod class_hash;
mod convert;
mod error;
mod instance;
mod method;
mod qualified_name;
mod value;
mod visibility;

pub use call_context::CallContext;
pub use class::{Class, ClassDef};
pub use class_hash::ClassHash;
pub use convert::{FromValue, IntoValue};
pub use error::{CallError, ClasskitError, ConversionError, DeriveError};
pub use instance::Instance;
pub use method::{MethodBody, MethodDecl, MethodEntry, MethodFn, MethodTraits};
pub use qualified_name::QualifiedName;
pub use value::{Value, ValueKind};
pub use visibility::Visibility;
