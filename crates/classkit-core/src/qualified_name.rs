use std::fmt;

/// Qualified name identifying a class within its ancestor chain.
///
/// Segments are dot-joined: a class `Lion` derived from `Cat` derived from
/// `Animal` has the qualified name `Animal.Cat.Lion`. The root class has the
/// empty name and contributes nothing to the paths of its descendants.
///
/// # Examples
///
/// ```
/// use classkit_core::QualifiedName;
///
/// let animal = QualifiedName::root().child("Animal");
/// assert_eq!(animal.to_string(), "Animal");
///
/// let cat = animal.child("Cat");
/// assert_eq!(cat.to_string(), "Animal.Cat");
/// assert_eq!(cat.namespace_string(), "Animal");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    /// Simple name (e.g., "Lion"). Empty for the root class.
    pub name: String,
    /// Ancestor path (e.g., ["Animal", "Cat"]). Empty at the top level.
    pub namespace: Vec<String>,
}

impl QualifiedName {
    /// Create a qualified name with an explicit ancestor path.
    pub fn new(name: impl Into<String>, namespace: Vec<String>) -> Self {
        Self {
            name: name.into(),
            namespace,
        }
    }

    /// The root name: empty, no ancestors.
    pub fn root() -> Self {
        Self {
            name: String::new(),
            namespace: Vec::new(),
        }
    }

    /// Create a top-level qualified name (derived directly from the root).
    pub fn top_level(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Vec::new(),
        }
    }

    /// Parse from a dotted string (e.g., "Animal.Cat.Lion").
    ///
    /// The last segment is the simple name, the rest is the ancestor path.
    /// Empty segments are discarded, so "Animal..Cat" == "Animal.Cat".
    pub fn from_dotted(s: &str) -> Self {
        let parts: Vec<&str> = s.split('.').filter(|p| !p.is_empty()).collect();
        match parts.split_last() {
            None => Self::root(),
            Some((name, namespace)) => Self {
                name: (*name).to_string(),
                namespace: namespace.iter().map(|s| s.to_string()).collect(),
            },
        }
    }

    /// Check if this is the root name.
    pub fn is_root(&self) -> bool {
        self.name.is_empty() && self.namespace.is_empty()
    }

    /// Get the simple (unqualified) name.
    pub fn simple_name(&self) -> &str {
        &self.name
    }

    /// Get the ancestor path.
    pub fn namespace_path(&self) -> &[String] {
        &self.namespace
    }

    /// Get the ancestor path as a dot-joined string.
    pub fn namespace_string(&self) -> String {
        self.namespace.join(".")
    }

    /// Create a child name beneath this one.
    ///
    /// The root contributes no path segment, so `root.child("Animal")` is
    /// just `Animal`, while `Animal.child("Cat")` is `Animal.Cat`.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut namespace = self.namespace.clone();
        if !self.name.is_empty() {
            namespace.push(self.name.clone());
        }
        Self {
            name: name.into(),
            namespace,
        }
    }

    /// Get the parent qualified name, if any.
    ///
    /// Example: `Animal.Cat.Lion` -> Some(`Animal.Cat`).
    pub fn parent(&self) -> Option<Self> {
        let (name, namespace) = self.namespace.split_last()?;
        Some(Self {
            name: name.clone(),
            namespace: namespace.to_vec(),
        })
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.namespace.join("."), self.name)
        }
    }
}

impl From<&str> for QualifiedName {
    fn from(s: &str) -> Self {
        Self::from_dotted(s)
    }
}

impl From<String> for QualifiedName {
    fn from(s: String) -> Self {
        Self::from_dotted(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_name() {
        let root = QualifiedName::root();
        assert!(root.is_root());
        assert_eq!(root.to_string(), "");
        assert!(root.parent().is_none());
    }

    #[test]
    fn top_level_name() {
        let name = QualifiedName::top_level("Animal");
        assert_eq!(name.simple_name(), "Animal");
        assert!(name.namespace.is_empty());
        assert_eq!(name.to_string(), "Animal");
    }

    #[test]
    fn child_of_root_has_no_namespace() {
        let animal = QualifiedName::root().child("Animal");
        assert_eq!(animal.to_string(), "Animal");
        assert_eq!(animal.namespace_string(), "");
    }

    #[test]
    fn child_chain() {
        let lion = QualifiedName::root().child("Animal").child("Cat").child("Lion");
        assert_eq!(lion.to_string(), "Animal.Cat.Lion");
        assert_eq!(lion.simple_name(), "Lion");
        assert_eq!(lion.namespace_string(), "Animal.Cat");
    }

    #[test]
    fn from_dotted() {
        let name = QualifiedName::from_dotted("Animal.Cat.Lion");
        assert_eq!(name.simple_name(), "Lion");
        assert_eq!(name.namespace, vec!["Animal", "Cat"]);

        let top = QualifiedName::from_dotted("Animal");
        assert_eq!(top.simple_name(), "Animal");
        assert!(top.namespace.is_empty());

        assert!(QualifiedName::from_dotted("").is_root());
    }

    #[test]
    fn from_dotted_discards_empty_segments() {
        let a = QualifiedName::from_dotted("Animal..Cat");
        let b = QualifiedName::from_dotted("Animal.Cat");
        assert_eq!(a, b);
    }

    #[test]
    fn parent_name() {
        let lion = QualifiedName::from_dotted("Animal.Cat.Lion");
        let parent = lion.parent().unwrap();
        assert_eq!(parent.to_string(), "Animal.Cat");
        assert!(QualifiedName::top_level("Animal").parent().is_none());
    }

    #[test]
    fn hash_equality() {
        use std::collections::HashSet;

        let a = QualifiedName::from_dotted("Animal.Cat");
        let b = QualifiedName::root().child("Animal").child("Cat");
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }
}
