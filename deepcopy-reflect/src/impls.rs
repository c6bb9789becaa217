//! `Reflect` impls for standard library types.

use crate::info::{
    downcast, downcast_ref, erase, CollectionShape, ListInfo, OptionInfo, PointerInfo, Reflect,
    ScalarInfo, TypeInfo, TypeKind,
};
use crate::{ReflectError, Result};
use std::any::Any;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::hash::Hash;
use std::sync::Arc;

macro_rules! impl_reflect_leaf {
    ($variant:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl Reflect for $ty {
                fn type_info() -> TypeInfo {
                    TypeInfo::new::<$ty>(TypeKind::$variant(ScalarInfo::of::<$ty>()))
                }
            }
        )+
    };
}

impl_reflect_leaf!(Value => i8, i16, i32, i64, i128, isize);
impl_reflect_leaf!(Value => u8, u16, u32, u64, u128, usize);
impl_reflect_leaf!(Value => f32, f64, bool, char, ());
impl_reflect_leaf!(Text => String, &'static str);

// ── Element access ───────────────────────────────────────────────

fn iter_items<C, E>(container: &dyn Any) -> Result<Vec<&dyn Any>>
where
    C: Any,
    E: Any,
    for<'b> &'b C: IntoIterator<Item = &'b E>,
{
    Ok(downcast_ref::<C>(container)?
        .into_iter()
        .map(|item| item as &dyn Any)
        .collect())
}

fn collect_items<C, E>(elements: Vec<Box<dyn Any>>) -> Result<Box<dyn Any>>
where
    C: FromIterator<E> + Any,
    E: Any,
{
    let container = elements
        .into_iter()
        .map(downcast::<E>)
        .collect::<Result<C>>()?;
    Ok(erase(container))
}

fn collect_array<E: Any, const N: usize>(elements: Vec<Box<dyn Any>>) -> Result<Box<dyn Any>> {
    let items = elements
        .into_iter()
        .map(downcast::<E>)
        .collect::<Result<Vec<E>>>()?;
    let actual = items.len();
    let array: [E; N] = items
        .try_into()
        .map_err(|_| ReflectError::LengthMismatch { expected: N, actual })?;
    Ok(erase(array))
}

// ── Arrays and sequences ─────────────────────────────────────────

impl<E: Reflect, const N: usize> Reflect for [E; N] {
    fn type_info() -> TypeInfo {
        let list = ListInfo::new(E::type_info, iter_items::<[E; N], E>, collect_array::<E, N>)
            .with_fixed_len(N);
        TypeInfo::new::<Self>(TypeKind::Array(list))
    }
}

impl<E: Reflect> Reflect for Vec<E> {
    fn type_info() -> TypeInfo {
        let list = ListInfo::new(E::type_info, iter_items::<Vec<E>, E>, collect_items::<Vec<E>, E>);
        TypeInfo::new::<Self>(TypeKind::Sequence(list))
    }
}

impl<E: Reflect> Reflect for VecDeque<E> {
    fn type_info() -> TypeInfo {
        let list = ListInfo::new(
            E::type_info,
            iter_items::<VecDeque<E>, E>,
            collect_items::<VecDeque<E>, E>,
        );
        TypeInfo::new::<Self>(TypeKind::Sequence(list))
    }
}

impl<E: Reflect> Reflect for LinkedList<E> {
    fn type_info() -> TypeInfo {
        let list = ListInfo::new(
            E::type_info,
            iter_items::<LinkedList<E>, E>,
            collect_items::<LinkedList<E>, E>,
        );
        TypeInfo::new::<Self>(TypeKind::Sequence(list))
    }
}

// ── Unordered collections ────────────────────────────────────────

impl<E: Reflect + Eq + Hash> Reflect for HashSet<E> {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>(TypeKind::Collection(CollectionShape::Set))
    }
}

impl<E: Reflect + Ord> Reflect for BTreeSet<E> {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>(TypeKind::Collection(CollectionShape::Set))
    }
}

impl<K: Reflect + Eq + Hash, V: Reflect> Reflect for HashMap<K, V> {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>(TypeKind::Collection(CollectionShape::Map))
    }
}

impl<K: Reflect + Ord, V: Reflect> Reflect for BTreeMap<K, V> {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>(TypeKind::Collection(CollectionShape::Map))
    }
}

// ── Option ───────────────────────────────────────────────────────

fn option_get<T: Reflect>(value: &dyn Any) -> Result<Option<&dyn Any>> {
    Ok(downcast_ref::<Option<T>>(value)?
        .as_ref()
        .map(|inner| inner as &dyn Any))
}

fn option_wrap<T: Reflect>(inner: Option<Box<dyn Any>>) -> Result<Box<dyn Any>> {
    let inner = inner.map(downcast::<T>).transpose()?;
    Ok(erase(inner))
}

impl<T: Reflect> Reflect for Option<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>(TypeKind::Optional(OptionInfo::new(
            T::type_info,
            option_get::<T>,
            option_wrap::<T>,
        )))
    }
}

// ── Owning pointers ──────────────────────────────────────────────

fn box_get<T: Reflect>(value: &dyn Any) -> Result<&dyn Any> {
    let boxed = downcast_ref::<Box<T>>(value)?;
    Ok(&**boxed as &dyn Any)
}

fn box_wrap<T: Reflect>(inner: Box<dyn Any>) -> Result<Box<dyn Any>> {
    Ok(erase(Box::new(downcast::<T>(inner)?)))
}

fn arc_get<T: Reflect>(value: &dyn Any) -> Result<&dyn Any> {
    let shared = downcast_ref::<Arc<T>>(value)?;
    Ok(&**shared as &dyn Any)
}

fn arc_wrap<T: Reflect>(inner: Box<dyn Any>) -> Result<Box<dyn Any>> {
    Ok(erase(Arc::new(downcast::<T>(inner)?)))
}

impl<T: Reflect> Reflect for Box<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>(TypeKind::Pointer(PointerInfo::new(
            T::type_info,
            box_get::<T>,
            box_wrap::<T>,
        )))
    }
}

impl<T: Reflect> Reflect for Arc<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>(TypeKind::Pointer(PointerInfo::new(
            T::type_info,
            arc_get::<T>,
            arc_wrap::<T>,
        )))
    }
}
