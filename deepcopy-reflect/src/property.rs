//! Property descriptors and type-erased accessors.

use crate::info::{downcast, downcast_ref, Reflect, TypeInfo, TypeInfoFn};
use crate::{ReflectError, Result};
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Reads and writes one property of an erased owner.
///
/// Implementations downcast the owner and value to their concrete types and
/// report a [`ReflectError`] on mismatch instead of panicking.
pub trait PropertyAccess: Send + Sync {
    fn get<'a>(&self, owner: &'a dyn Any) -> Result<&'a dyn Any>;

    fn set(&self, owner: &mut dyn Any, value: Box<dyn Any>) -> Result<()>;

    /// Reports whether `set` would accept `value` on `owner`, without writing.
    ///
    /// The default accepts everything; accessors whose `set` can fail should
    /// report those failures here too.
    fn check_set(&self, owner: &dyn Any, value: &dyn Any) -> Result<()> {
        let _ = (owner, value);
        Ok(())
    }
}

/// Field accessor built from plain function pointers.
struct FieldAccess<O, V> {
    name: &'static str,
    get: Option<fn(&O) -> &V>,
    set: Option<fn(&mut O, V)>,
}

impl<O: Any, V: Any> PropertyAccess for FieldAccess<O, V> {
    fn get<'a>(&self, owner: &'a dyn Any) -> Result<&'a dyn Any> {
        let get = self.get.ok_or(ReflectError::NotReadable { property: self.name })?;
        let owner = downcast_ref::<O>(owner)?;
        Ok(get(owner) as &dyn Any)
    }

    fn set(&self, owner: &mut dyn Any, value: Box<dyn Any>) -> Result<()> {
        let set = self.set.ok_or(ReflectError::NotWritable { property: self.name })?;
        let value = downcast::<V>(value)?;
        let owner = owner
            .downcast_mut::<O>()
            .ok_or(ReflectError::TypeMismatch {
                expected: std::any::type_name::<O>(),
            })?;
        set(owner, value);
        Ok(())
    }

    fn check_set(&self, owner: &dyn Any, value: &dyn Any) -> Result<()> {
        if self.set.is_none() {
            return Err(ReflectError::NotWritable { property: self.name });
        }
        downcast_ref::<V>(value)?;
        downcast_ref::<O>(owner)?;
        Ok(())
    }
}

/// One named property of an object type.
#[derive(Clone)]
pub struct PropertyInfo {
    name: &'static str,
    declared: TypeId,
    ty: TypeInfoFn,
    readable: bool,
    writable: bool,
    access: Arc<dyn PropertyAccess>,
}

impl PropertyInfo {
    /// Describes a property of `O` with declared type `V`.
    pub fn new<O: Any, V: Reflect>(
        name: &'static str,
        get: Option<fn(&O) -> &V>,
        set: Option<fn(&mut O, V)>,
    ) -> Self {
        Self {
            name,
            declared: TypeId::of::<V>(),
            ty: V::type_info,
            readable: get.is_some(),
            writable: set.is_some(),
            access: Arc::new(FieldAccess { name, get, set }),
        }
    }

    pub fn read_write<O: Any, V: Reflect>(
        name: &'static str,
        get: fn(&O) -> &V,
        set: fn(&mut O, V),
    ) -> Self {
        Self::new(name, Some(get), Some(set))
    }

    pub fn read_only<O: Any, V: Reflect>(name: &'static str, get: fn(&O) -> &V) -> Self {
        Self::new(name, Some(get), None)
    }

    pub fn write_only<O: Any, V: Reflect>(name: &'static str, set: fn(&mut O, V)) -> Self {
        Self::new(name, None, Some(set))
    }

    /// Uses a custom accessor instead of function pointers.
    pub fn with_access<V: Reflect>(
        name: &'static str,
        readable: bool,
        writable: bool,
        access: Arc<dyn PropertyAccess>,
    ) -> Self {
        Self {
            name,
            declared: TypeId::of::<V>(),
            ty: V::type_info,
            readable,
            writable,
            access,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Identity of the declared type, without building its descriptor.
    #[must_use]
    pub fn declared_type_id(&self) -> TypeId {
        self.declared
    }

    pub fn type_info(&self) -> TypeInfo {
        (self.ty)()
    }

    #[must_use]
    pub fn can_read(&self) -> bool {
        self.readable
    }

    #[must_use]
    pub fn can_write(&self) -> bool {
        self.writable
    }

    pub fn get<'a>(&self, owner: &'a dyn Any) -> Result<&'a dyn Any> {
        self.access.get(owner)
    }

    pub fn set(&self, owner: &mut dyn Any, value: Box<dyn Any>) -> Result<()> {
        self.access.set(owner, value)
    }

    /// Dry run of [`set`](Self::set): validates without writing.
    pub fn check_set(&self, owner: &dyn Any, value: &dyn Any) -> Result<()> {
        if !self.writable {
            return Err(ReflectError::NotWritable { property: self.name });
        }
        self.access.check_set(owner, value)
    }
}

impl fmt::Debug for PropertyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyInfo")
            .field("name", &self.name)
            .field("readable", &self.readable)
            .field("writable", &self.writable)
            .finish()
    }
}
