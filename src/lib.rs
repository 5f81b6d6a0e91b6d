//! classkit - classical inheritance over dynamically-typed runtime objects.
//!
//! This facade crate re-exports the class mechanism from `classkit-core`
//! (descriptors, instances, visibility, superclass dispatch) and the
//! optional class registry from `classkit-registry`.
//!
//! # Quick Start
//!
//! ```
//! use classkit::prelude::*;
//!
//! let animal = Class::derive(
//!     &Class::base(),
//!     "Animal",
//!     ClassDef::new()
//!         .field("name", "")
//!         .method("init", |ctx| {
//!             let name: String = ctx.arg_or(0, String::new())?;
//!             ctx.set_field("name", name)?;
//!             Ok(Value::Null)
//!         })
//!         .method("eat", |ctx| {
//!             Ok(Value::String(format!("{}:eat", ctx.qualified_name())))
//!         }),
//! )?;
//!
//! let cat = Class::derive(&animal, "Cat", ClassDef::new())?;
//!
//! let mut simba = cat.instantiate(&[Value::from("Simba")])?;
//! assert_eq!(simba.field::<String>("name")?, "Simba");
//! assert_eq!(simba.call("eat", &[])?, Value::from("Animal.Cat:eat"));
//! # Ok::<(), classkit::ClasskitError>(())
//! ```

pub use classkit_core::{
    CallContext, CallError, Class, ClassDef, ClassHash, ClasskitError, ConversionError,
    DeriveError, FromValue, Instance, IntoValue, MethodBody, MethodDecl, MethodEntry, MethodFn,
    MethodTraits, QualifiedName, Value, ValueKind, Visibility,
};
pub use classkit_registry::{ClassRegistry, RegistryError};

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use crate::{
        CallContext, CallError, Class, ClassDef, ClasskitError, ClassRegistry, DeriveError,
        FromValue, Instance, IntoValue, MethodDecl, QualifiedName, Value, ValueKind, Visibility,
    };
}
