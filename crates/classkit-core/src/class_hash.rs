//! Deterministic hash-based class and member identity.
//!
//! This module provides [`ClassHash`], a 64-bit hash identifying classes and
//! their members. Hashes are computed deterministically from qualified names,
//! so two structurally identical hierarchies built independently (for example
//! two separately created roots) compare equal. Ancestry checks walk parent
//! links comparing hashes rather than pointer identity.

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// Domain-mixing constants for hash computation.
///
/// Different entity kinds (classes, instance methods, static members) get
/// distinct domain markers so a class and a member sharing a name never
/// collide.
mod hash_constants {
    /// Separator constant mixed between path components.
    pub const SEP: u64 = 0x4bc94d6bd06053ad;

    /// Domain marker for class hashes.
    pub const CLASS: u64 = 0x2fac10b63a6cc57c;

    /// Domain marker for instance method hashes.
    pub const METHOD: u64 = 0x7d3c8b4a92e15f6d;

    /// Domain marker for static member hashes.
    pub const STATIC: u64 = 0x5ea77ffbcdf5f302;
}

/// A deterministic 64-bit hash identifying a class or member.
///
/// Computed from the qualified name (for classes) or owning class hash plus
/// member name (for members). The same input always produces the same hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ClassHash(pub u64);

impl ClassHash {
    /// Empty/invalid hash constant.
    pub const EMPTY: ClassHash = ClassHash(0);

    /// Create a class hash from a dot-joined qualified name.
    ///
    /// ```
    /// use classkit_core::ClassHash;
    ///
    /// let a = ClassHash::from_name("Animal.Cat");
    /// let b = ClassHash::from_name("Animal.Cat");
    /// assert_eq!(a, b);
    /// assert_ne!(a, ClassHash::from_name("Animal"));
    /// ```
    pub fn from_name(qualified_name: &str) -> Self {
        let base = xxh64(qualified_name.as_bytes(), hash_constants::CLASS);
        Self(base.wrapping_mul(hash_constants::SEP) ^ hash_constants::CLASS)
    }

    /// Create an instance method hash from its owning class and name.
    pub fn from_method(class: ClassHash, name: &str) -> Self {
        let base = xxh64(name.as_bytes(), hash_constants::METHOD);
        Self(base ^ class.0.rotate_left(17) ^ hash_constants::METHOD)
    }

    /// Create a static member hash from its owning class and name.
    pub fn from_static(class: ClassHash, name: &str) -> Self {
        let base = xxh64(name.as_bytes(), hash_constants::STATIC);
        Self(base ^ class.0.rotate_left(17) ^ hash_constants::STATIC)
    }

    /// Check if this is the empty hash.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for ClassHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassHash({:#018x})", self.0)
    }
}

impl fmt::Display for ClassHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
