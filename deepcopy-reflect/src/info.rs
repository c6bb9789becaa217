//! Type descriptors.
//!
//! A [`TypeInfo`] is built on demand by [`Reflect::type_info`] and is cheap to
//! clone: it holds a `TypeId`, a static name, function pointers and (for
//! objects) a list of property descriptors. Nested types are referenced
//! through [`TypeInfoFn`] so describing a self-referential type never recurses.

use crate::{PropertyInfo, ReflectError, Result};
use std::any::{type_name, Any, TypeId};
use std::fmt;

/// A type that can describe its own shape to the copier.
pub trait Reflect: Any {
    fn type_info() -> TypeInfo;
}

/// Lazily produces a nested type's descriptor.
pub type TypeInfoFn = fn() -> TypeInfo;

/// Clones a leaf value behind `&dyn Any`.
pub type CloneFn = fn(&dyn Any) -> Result<Box<dyn Any>>;

/// Borrows every element of a container, in order.
pub type ItemsFn = for<'a> fn(&'a dyn Any) -> Result<Vec<&'a dyn Any>>;

/// Rebuilds a container from owned elements, in order.
pub type CollectFn = fn(Vec<Box<dyn Any>>) -> Result<Box<dyn Any>>;

/// Downcasts a borrowed erased value.
pub fn downcast_ref<T: Any>(value: &dyn Any) -> Result<&T> {
    value.downcast_ref::<T>().ok_or(ReflectError::TypeMismatch {
        expected: type_name::<T>(),
    })
}

/// Downcasts an owned erased value.
pub fn downcast<T: Any>(value: Box<dyn Any>) -> Result<T> {
    value
        .downcast::<T>()
        .map(|boxed| *boxed)
        .map_err(|_| ReflectError::TypeMismatch {
            expected: type_name::<T>(),
        })
}

/// Boxes a value as `dyn Any`.
pub fn erase<T: Any>(value: T) -> Box<dyn Any> {
    Box::new(value)
}

/// Describes one type: who it is and what shape it has.
#[derive(Clone)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
    kind: TypeKind,
}

impl TypeInfo {
    /// Creates a descriptor for `T` with the given shape.
    pub fn new<T: Any>(kind: TypeKind) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            kind,
        }
    }

    /// Shorthand for `T::type_info()`.
    pub fn of<T: Reflect>() -> Self {
        T::type_info()
    }

    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Ordered public properties. Empty for anything that is not an object.
    #[must_use]
    pub fn properties(&self) -> &[PropertyInfo] {
        match &self.kind {
            TypeKind::Object(object) => object.properties(),
            _ => &[],
        }
    }

    /// Looks up a property by exact name.
    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties().iter().find(|p| p.name() == name)
    }

    #[must_use]
    pub fn is_value(&self) -> bool {
        matches!(self.kind, TypeKind::Value(_))
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self.kind, TypeKind::Text(_))
    }

    /// True for every shape except plain values and text.
    #[must_use]
    pub fn is_reference(&self) -> bool {
        !self.is_value() && !self.is_text()
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("name", &self.name)
            .field("kind", &self.kind.label())
            .finish()
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// The shape of a type, as far as copying is concerned.
#[derive(Clone)]
pub enum TypeKind {
    /// Plain value (numbers, `bool`, `char`): copied by assignment.
    Value(ScalarInfo),
    /// Text: copied by assignment.
    Text(ScalarInfo),
    /// Struct with named properties.
    Object(ObjectInfo),
    /// Fixed-size array `[E; N]`.
    Array(ListInfo),
    /// Growable ordered sequence (`Vec`, `VecDeque`, `LinkedList`).
    Sequence(ListInfo),
    /// Enumerable container the copier does not know how to rebuild.
    Collection(CollectionShape),
    /// `Option<T>`, the nullable wrapper.
    Optional(OptionInfo),
    /// Owning smart pointer (`Box<T>`, `Arc<T>`).
    Pointer(PointerInfo),
}

impl TypeKind {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            TypeKind::Value(_) => "value",
            TypeKind::Text(_) => "text",
            TypeKind::Object(_) => "object",
            TypeKind::Array(_) => "array",
            TypeKind::Sequence(_) => "sequence",
            TypeKind::Collection(CollectionShape::Set) => "set",
            TypeKind::Collection(CollectionShape::Map) => "map",
            TypeKind::Optional(_) => "optional",
            TypeKind::Pointer(_) => "pointer",
        }
    }
}

/// Unordered container shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionShape {
    Set,
    Map,
}

/// Leaf copy behavior for values and text.
#[derive(Clone, Copy)]
pub struct ScalarInfo {
    clone: CloneFn,
}

impl ScalarInfo {
    pub fn of<T: Clone + Any>() -> Self {
        Self {
            clone: clone_erased::<T>,
        }
    }

    pub fn clone_value(&self, value: &dyn Any) -> Result<Box<dyn Any>> {
        (self.clone)(value)
    }
}

fn clone_erased<T: Clone + Any>(value: &dyn Any) -> Result<Box<dyn Any>> {
    Ok(erase(downcast_ref::<T>(value)?.clone()))
}

/// Describes a struct: its constructor and its ordered properties.
#[derive(Clone)]
pub struct ObjectInfo {
    construct: Option<fn() -> Box<dyn Any>>,
    properties: Vec<PropertyInfo>,
}

impl ObjectInfo {
    /// An object the copier can allocate through `Default`.
    pub fn new<T: Default + Any>(properties: Vec<PropertyInfo>) -> Self {
        Self {
            construct: Some(construct_default::<T>),
            properties,
        }
    }

    /// An object that can only be copied into an existing instance.
    pub fn without_constructor(properties: Vec<PropertyInfo>) -> Self {
        Self {
            construct: None,
            properties,
        }
    }

    #[must_use]
    pub fn properties(&self) -> &[PropertyInfo] {
        &self.properties
    }

    #[must_use]
    pub fn is_constructible(&self) -> bool {
        self.construct.is_some()
    }

    /// Allocates a default instance, if the type has a constructor.
    pub fn construct(&self) -> Option<Box<dyn Any>> {
        self.construct.map(|construct| construct())
    }
}

fn construct_default<T: Default + Any>() -> Box<dyn Any> {
    erase(T::default())
}

/// Element access for arrays and sequences.
#[derive(Clone, Copy)]
pub struct ListInfo {
    element: TypeInfoFn,
    fixed_len: Option<usize>,
    items: ItemsFn,
    collect: CollectFn,
}

impl ListInfo {
    pub fn new(element: TypeInfoFn, items: ItemsFn, collect: CollectFn) -> Self {
        Self {
            element,
            fixed_len: None,
            items,
            collect,
        }
    }

    /// Marks the container as holding exactly `len` elements.
    #[must_use]
    pub fn with_fixed_len(mut self, len: usize) -> Self {
        self.fixed_len = Some(len);
        self
    }

    pub fn element(&self) -> TypeInfo {
        (self.element)()
    }

    #[must_use]
    pub fn fixed_len(&self) -> Option<usize> {
        self.fixed_len
    }

    pub fn items<'a>(&self, container: &'a dyn Any) -> Result<Vec<&'a dyn Any>> {
        (self.items)(container)
    }

    pub fn collect(&self, elements: Vec<Box<dyn Any>>) -> Result<Box<dyn Any>> {
        (self.collect)(elements)
    }
}

/// Access to the payload of an `Option`.
#[derive(Clone, Copy)]
pub struct OptionInfo {
    inner: TypeInfoFn,
    get: for<'a> fn(&'a dyn Any) -> Result<Option<&'a dyn Any>>,
    wrap: fn(Option<Box<dyn Any>>) -> Result<Box<dyn Any>>,
}

impl OptionInfo {
    pub fn new(
        inner: TypeInfoFn,
        get: for<'a> fn(&'a dyn Any) -> Result<Option<&'a dyn Any>>,
        wrap: fn(Option<Box<dyn Any>>) -> Result<Box<dyn Any>>,
    ) -> Self {
        Self { inner, get, wrap }
    }

    pub fn inner(&self) -> TypeInfo {
        (self.inner)()
    }

    pub fn get<'a>(&self, value: &'a dyn Any) -> Result<Option<&'a dyn Any>> {
        (self.get)(value)
    }

    pub fn wrap(&self, inner: Option<Box<dyn Any>>) -> Result<Box<dyn Any>> {
        (self.wrap)(inner)
    }
}

/// Access to the pointee of an owning smart pointer.
#[derive(Clone, Copy)]
pub struct PointerInfo {
    inner: TypeInfoFn,
    get: for<'a> fn(&'a dyn Any) -> Result<&'a dyn Any>,
    wrap: fn(Box<dyn Any>) -> Result<Box<dyn Any>>,
}

impl PointerInfo {
    pub fn new(
        inner: TypeInfoFn,
        get: for<'a> fn(&'a dyn Any) -> Result<&'a dyn Any>,
        wrap: fn(Box<dyn Any>) -> Result<Box<dyn Any>>,
    ) -> Self {
        Self { inner, get, wrap }
    }

    pub fn inner(&self) -> TypeInfo {
        (self.inner)()
    }

    pub fn get<'a>(&self, value: &'a dyn Any) -> Result<&'a dyn Any> {
        (self.get)(value)
    }

    pub fn wrap(&self, inner: Box<dyn Any>) -> Result<Box<dyn Any>> {
        (self.wrap)(inner)
    }
}
