//! Type introspection for structural object copying.
//!
//! Rust has no runtime reflection, so every type that takes part in a copy
//! describes itself through the [`Reflect`] trait:
//! - [`TypeInfo`]: identity (`TypeId` + name) and the [`TypeKind`] shape
//! - [`ObjectInfo`]: a struct's ordered, named [`PropertyInfo`]s and its constructor
//! - [`ListInfo`], [`OptionInfo`], [`PointerInfo`]: type-erased element access
//!   for arrays, sequences, `Option` and smart pointers
//!
//! Standard library leaves and containers are described in this crate; user
//! structs are described with [`reflect_object!`].

mod error;
mod impls;
mod info;
mod macros;
mod property;

pub use error::ReflectError;
pub use info::{
    downcast, downcast_ref, erase, CloneFn, CollectFn, CollectionShape, ItemsFn, ListInfo,
    ObjectInfo, OptionInfo, PointerInfo, Reflect, ScalarInfo, TypeInfo, TypeInfoFn, TypeKind,
};
pub use property::{PropertyAccess, PropertyInfo};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, ReflectError>;
