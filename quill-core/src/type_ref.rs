//! Type references decorated with an extensible status bag.
//!
//! A [`TypeRef`] pairs a type name with a [`Status`]: a small heterogeneous
//! map keyed by typed [`StatusKey`]s. Annotations and nullability ship as
//! built-in keys; target languages can define their own keys without
//! touching `TypeRef` itself.

use std::{any::Any, collections::BTreeMap, fmt, marker::PhantomData, sync::Arc};

use crate::{
    annotation::AnnotationRef,
    names::ClassName,
    types::{
        ArrayTypeName, ParameterizedTypeName, Primitive, TypeName, TypeVariableName,
        WildcardTypeName,
    },
};

/// A typed key into a [`Status`] bag.
pub struct StatusKey<V> {
    name: &'static str,
    _value: PhantomData<fn() -> V>,
}

impl<V> StatusKey<V> {
    /// Keys are identified by name; two keys with the same name must share a value type.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _value: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Annotations applied at the type use site.
pub const ANNOTATIONS: StatusKey<Vec<AnnotationRef>> = StatusKey::new("annotations");

/// Whether the type admits `null`.
pub const NULLABLE: StatusKey<bool> = StatusKey::new("nullable");

trait StatusValue: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn eq_value(&self, other: &dyn StatusValue) -> bool;
}

impl<T> StatusValue for T
where
    T: Any + fmt::Debug + PartialEq + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_value(&self, other: &dyn StatusValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| other == self)
    }
}

/// Emission-time decorations of a [`TypeRef`].
#[derive(Clone, Default)]
pub struct Status {
    entries: BTreeMap<&'static str, Arc<dyn StatusValue>>,
}

impl Status {
    pub fn get<V: 'static>(&self, key: &StatusKey<V>) -> Option<&V> {
        self.entries
            .get(key.name)
            .and_then(|value| (**value).as_any().downcast_ref::<V>())
    }

    pub fn contains<V>(&self, key: &StatusKey<V>) -> bool {
        self.entries.contains_key(key.name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the value stored under `key`.
    pub fn insert<V>(&mut self, key: &StatusKey<V>, value: V)
    where
        V: Any + fmt::Debug + PartialEq + Send + Sync,
    {
        self.entries.insert(key.name, Arc::new(value));
    }

    /// Edit the value under `key` in place, starting from `V::default()` when absent.
    pub fn update<V>(&mut self, key: &StatusKey<V>, edit: impl FnOnce(&mut V))
    where
        V: Any + fmt::Debug + PartialEq + Clone + Default + Send + Sync,
    {
        let mut value = self.get(key).cloned().unwrap_or_default();
        edit(&mut value);
        self.insert(key, value);
    }
}

impl PartialEq for Status {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().all(|(key, value)| {
                other
                    .entries
                    .get(key)
                    .is_some_and(|other| (**value).eq_value(&**other))
            })
    }
}

impl Eq for Status {}

impl fmt::Debug for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

/// A type name plus its status bag.
///
/// The type parameter narrows what kind of name is referenced; writers work
/// with the erased `TypeRef<TypeName>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef<T = TypeName> {
    pub type_name: T,
    pub status: Status,
}

impl<T> TypeRef<T> {
    /// An undecorated reference.
    pub fn new(type_name: T) -> Self {
        Self {
            type_name,
            status: Status::default(),
        }
    }

    /// Start a builder for a decorated reference.
    pub fn builder(type_name: T) -> TypeRefBuilder<T> {
        TypeRefBuilder {
            type_name,
            status: Status::default(),
        }
    }

    pub fn annotations(&self) -> &[AnnotationRef] {
        self.status.get(&ANNOTATIONS).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_nullable(&self) -> bool {
        self.status.get(&NULLABLE).copied().unwrap_or(false)
    }

    /// Same decorations, different name.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> TypeRef<U> {
        TypeRef {
            type_name: f(self.type_name),
            status: self.status,
        }
    }

    /// Forget the narrowed name kind.
    pub fn erase(self) -> TypeRef
    where
        T: Into<TypeName>,
    {
        self.map(Into::into)
    }
}

impl TypeRef {
    /// An undecorated reference to any type name.
    pub fn of(type_name: impl Into<TypeName>) -> Self {
        Self::new(type_name.into())
    }

    /// Copy with `nullable` set.
    pub fn nullable(mut self) -> Self {
        self.status.insert(&NULLABLE, true);
        self
    }

    /// Copy with one more type-use annotation.
    pub fn annotated(mut self, annotation: AnnotationRef) -> Self {
        self.status
            .update(&ANNOTATIONS, |annotations| annotations.push(annotation));
        self
    }
}

/// Builder for a decorated [`TypeRef`].
///
/// ```
/// use quill_core::{ClassName, StatusKey, TypeRef};
///
/// const MUTABLE: StatusKey<bool> = StatusKey::new("mutable");
///
/// let list = TypeRef::builder(ClassName::new("java.util", "List"))
///     .nullable()
///     .status(&MUTABLE, |mutable| *mutable = true)
///     .build();
/// assert!(list.is_nullable());
/// assert_eq!(list.status.get(&MUTABLE), Some(&true));
/// ```
#[derive(Debug, Clone)]
pub struct TypeRefBuilder<T> {
    type_name: T,
    status: Status,
}

impl<T> TypeRefBuilder<T> {
    /// Edit one status entry through its own value.
    pub fn status<V>(mut self, key: &StatusKey<V>, edit: impl FnOnce(&mut V)) -> Self
    where
        V: Any + fmt::Debug + PartialEq + Clone + Default + Send + Sync,
    {
        self.status.update(key, edit);
        self
    }

    pub fn annotation(self, annotation: AnnotationRef) -> Self {
        self.status(&ANNOTATIONS, |annotations| annotations.push(annotation))
    }

    pub fn nullable(self) -> Self {
        self.status(&NULLABLE, |nullable| *nullable = true)
    }

    pub fn build(self) -> TypeRef<T> {
        TypeRef {
            type_name: self.type_name,
            status: self.status,
        }
    }
}

macro_rules! impl_into_type_ref {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for TypeRef {
                fn from(type_name: $ty) -> Self {
                    TypeRef::of(type_name)
                }
            }
        )*
    };
}

impl_into_type_ref!(
    TypeName,
    Primitive,
    ClassName,
    ParameterizedTypeName,
    ArrayTypeName,
    TypeVariableName,
    WildcardTypeName,
);

impl From<ClassName> for TypeRef<ClassName> {
    fn from(class: ClassName) -> Self {
        TypeRef::new(class)
    }
}

impl From<TypeRef<ClassName>> for TypeRef {
    fn from(type_ref: TypeRef<ClassName>) -> Self {
        type_ref.erase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXTRA: StatusKey<Vec<String>> = StatusKey::new("extra");

    #[test]
    fn test_status_round_trip() {
        let ty = TypeRef::builder(TypeName::from(Primitive::Int))
            .status(&EXTRA, |extra| extra.push("a".into()))
            .status(&EXTRA, |extra| extra.push("b".into()))
            .build();
        assert_eq!(ty.status.get(&EXTRA).unwrap(), &vec!["a", "b"]);
        assert!(!ty.is_nullable());
        assert!(ty.annotations().is_empty());
    }

    #[test]
    fn test_status_equality_is_structural() {
        let class = ClassName::new("java.lang", "String");
        let a = TypeRef::of(class.clone()).nullable();
        let b = TypeRef::of(class.clone()).nullable();
        let c = TypeRef::of(class);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_erase_keeps_status() {
        let narrow = TypeRef::builder(ClassName::new("java.io", "IOException"))
            .nullable()
            .build();
        let erased: TypeRef = narrow.into();
        assert!(erased.is_nullable());
        assert!(matches!(erased.type_name, TypeName::Class(_)));
    }
}
