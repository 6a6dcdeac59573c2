//! Structural identifiers for packages, classes and members.
//!
//! All names are immutable and cheap to clone: a [`PackageName`] is a shared
//! linked chain of segments and a [`ClassName`] shares its enclosing chain.

use std::{fmt, sync::Arc};

/// A dotted package path stored as a chain `EMPTY <- p1 <- p2 <- ...`.
///
/// Only [`PackageName::EMPTY`] has no previous link. Segments are not
/// validated; callers decide what an acceptable segment looks like.
///
/// # Example
///
/// ```
/// use quill_core::PackageName;
///
/// let pkg = PackageName::of("java.util.concurrent");
/// assert_eq!(pkg.simple_name(), Some("concurrent"));
/// assert_eq!(pkg.previous().unwrap().to_string(), "java.util");
/// assert_eq!(pkg.to_string(), "java.util.concurrent");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PackageName(Option<Arc<Segment>>);

#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct Segment {
    previous: PackageName,
    name: String,
}

impl PackageName {
    /// The root of every package chain.
    pub const EMPTY: Self = Self(None);

    /// Parse a dotted string. The empty string yields [`PackageName::EMPTY`].
    pub fn of(dotted: &str) -> Self {
        if dotted.is_empty() {
            return Self::EMPTY;
        }
        Self::from_segments(dotted.split('.'))
    }

    /// Build a package from its segments, outermost first.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        segments
            .into_iter()
            .fold(Self::EMPTY, |package, segment| package.nested(segment))
    }

    /// Append one segment.
    pub fn nested(&self, segment: impl Into<String>) -> Self {
        Self(Some(Arc::new(Segment {
            previous: self.clone(),
            name: segment.into(),
        })))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// The enclosing package, `None` only for [`PackageName::EMPTY`].
    pub fn previous(&self) -> Option<&PackageName> {
        self.0.as_ref().map(|segment| &segment.previous)
    }

    /// The last segment, `None` only for [`PackageName::EMPTY`].
    pub fn simple_name(&self) -> Option<&str> {
        self.0.as_ref().map(|segment| segment.name.as_str())
    }

    /// All segments, outermost first.
    pub fn segments(&self) -> Vec<&str> {
        let mut segments = Vec::new();
        let mut current = self;
        while let Some(segment) = &current.0 {
            segments.push(segment.name.as_str());
            current = &segment.previous;
        }
        segments.reverse();
        segments
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments().join("."))
    }
}

impl From<&str> for PackageName {
    fn from(dotted: &str) -> Self {
        Self::of(dotted)
    }
}

/// A declared class, interface, enum or annotation type.
///
/// Nested classes keep a link to their enclosing class; the package is
/// shared by the whole chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName {
    package: PackageName,
    enclosing: Option<Arc<ClassName>>,
    simple_name: String,
}

impl ClassName {
    /// A top-level class.
    pub fn new(package: impl Into<PackageName>, simple_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            enclosing: None,
            simple_name: simple_name.into(),
        }
    }

    /// A top-level class followed by a path of nested simple names.
    ///
    /// ```
    /// use quill_core::ClassName;
    ///
    /// let entry = ClassName::get("java.util", "Map", &["Entry"]);
    /// assert_eq!(entry.canonical_name(), "java.util.Map.Entry");
    /// ```
    pub fn get(package: impl Into<PackageName>, top_level: &str, nested: &[&str]) -> Self {
        nested
            .iter()
            .fold(Self::new(package, top_level), |class, name| {
                class.nested_class(*name)
            })
    }

    /// Parse a canonical name using the convention that package segments start
    /// lowercase and class segments start uppercase.
    pub fn best_guess(canonical: &str) -> Self {
        let segments: Vec<&str> = canonical.split('.').collect();
        let split = segments
            .iter()
            .position(|segment| segment.starts_with(|c: char| c.is_uppercase()))
            .unwrap_or(segments.len().saturating_sub(1));
        let package = PackageName::from_segments(segments[..split].iter().copied());
        let mut class = Self::new(package, segments[split]);
        for name in &segments[split + 1..] {
            class = class.nested_class(*name);
        }
        class
    }

    /// A class nested directly inside `self`.
    pub fn nested_class(&self, simple_name: impl Into<String>) -> Self {
        Self {
            package: self.package.clone(),
            enclosing: Some(Arc::new(self.clone())),
            simple_name: simple_name.into(),
        }
    }

    /// A sibling class sharing `self`'s enclosing class or package.
    pub fn peer_class(&self, simple_name: impl Into<String>) -> Self {
        Self {
            package: self.package.clone(),
            enclosing: self.enclosing.clone(),
            simple_name: simple_name.into(),
        }
    }

    pub fn package_name(&self) -> &PackageName {
        &self.package
    }

    pub fn enclosing_class_name(&self) -> Option<&ClassName> {
        self.enclosing.as_deref()
    }

    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    /// Walk the enclosing chain to its root.
    pub fn top_level_class_name(&self) -> &ClassName {
        let mut current = self;
        while let Some(enclosing) = current.enclosing_class_name() {
            current = enclosing;
        }
        current
    }

    /// Simple names from the top-level class down to `self`.
    pub fn simple_names(&self) -> Vec<&str> {
        let mut names = vec![self.simple_name()];
        let mut current = self;
        while let Some(enclosing) = current.enclosing_class_name() {
            names.push(enclosing.simple_name());
            current = enclosing;
        }
        names.reverse();
        names
    }

    /// Dotted simple names without the package, e.g. `Map.Entry`.
    pub fn relative_name(&self) -> String {
        self.simple_names().join(".")
    }

    pub fn canonical_name(&self) -> String {
        if self.package.is_empty() {
            self.relative_name()
        } else {
            format!("{}.{}", self.package, self.relative_name())
        }
    }

    /// Reference to a member declared inside this class.
    pub fn member(&self, name: impl Into<String>) -> MemberName {
        MemberName::in_class(self.clone(), name)
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_name())
    }
}

/// A field, function or constant, either top-level or declared in a class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberName {
    package: PackageName,
    enclosing: Option<ClassName>,
    name: String,
}

impl MemberName {
    /// A top-level member of `package`.
    pub fn new(package: impl Into<PackageName>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            enclosing: None,
            name: name.into(),
        }
    }

    /// A member declared in `class`.
    pub fn in_class(class: ClassName, name: impl Into<String>) -> Self {
        Self {
            package: class.package_name().clone(),
            enclosing: Some(class),
            name: name.into(),
        }
    }

    pub fn package_name(&self) -> &PackageName {
        &self.package
    }

    pub fn enclosing_class_name(&self) -> Option<&ClassName> {
        self.enclosing.as_ref()
    }

    pub fn simple_name(&self) -> &str {
        &self.name
    }

    pub fn canonical_name(&self) -> String {
        match &self.enclosing {
            Some(class) => format!("{}.{}", class.canonical_name(), self.name),
            None if self.package.is_empty() => self.name.clone(),
            None => format!("{}.{}", self.package, self.name),
        }
    }
}

impl fmt::Display for MemberName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_round_trips_dotted_string() {
        for dotted in ["a", "java.util", "com.example.deep.pkg"] {
            assert_eq!(PackageName::of(dotted).to_string(), dotted);
        }
    }

    #[test]
    fn test_empty_package() {
        let empty = PackageName::of("");
        assert!(empty.is_empty());
        assert_eq!(empty, PackageName::EMPTY);
        assert!(empty.previous().is_none());
        assert_eq!(empty.to_string(), "");
    }

    #[test]
    fn test_only_empty_has_no_previous() {
        let pkg = PackageName::of("a.b");
        let a = pkg.previous().unwrap();
        assert_eq!(a.to_string(), "a");
        assert_eq!(a.previous(), Some(&PackageName::EMPTY));
    }

    #[test]
    fn test_package_structural_equality_and_order() {
        assert_eq!(PackageName::of("a.b"), PackageName::from_segments(["a", "b"]));
        assert!(PackageName::of("a.b") < PackageName::of("a.c"));
        assert!(PackageName::of("a") < PackageName::of("a.b"));
    }

    #[test]
    fn test_class_name_nesting() {
        let entry = ClassName::get("java.util", "Map", &["Entry"]);
        assert_eq!(entry.simple_name(), "Entry");
        assert_eq!(entry.top_level_class_name().simple_name(), "Map");
        assert_eq!(entry.relative_name(), "Map.Entry");
        assert_eq!(
            entry.peer_class("Other").canonical_name(),
            "java.util.Map.Other"
        );
    }

    #[test]
    fn test_best_guess() {
        let name = ClassName::best_guess("com.example.Outer.Inner");
        assert_eq!(name.package_name().to_string(), "com.example");
        assert_eq!(name.simple_names(), vec!["Outer", "Inner"]);

        let bare = ClassName::best_guess("Foo");
        assert!(bare.package_name().is_empty());
        assert_eq!(bare.canonical_name(), "Foo");
    }

    #[test]
    fn test_member_canonical_name() {
        let class = ClassName::new("java.util", "Collections");
        assert_eq!(
            class.member("emptyList").canonical_name(),
            "java.util.Collections.emptyList"
        );
        assert_eq!(
            MemberName::new("kotlin.collections", "listOf").canonical_name(),
            "kotlin.collections.listOf"
        );
    }
}
