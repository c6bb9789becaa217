//! Shared fixture types for copier tests.

#![allow(dead_code)]

use deepcopy_core::reflect_object;
use deepcopy_reflect::{
    downcast_ref, ObjectInfo, PropertyAccess, PropertyInfo, Reflect, ReflectError, TypeInfo,
    TypeKind,
};
use std::any::Any;
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::sync::Arc;

#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Basic {
    pub value: i32,
    pub text: String,
}

reflect_object!(Basic {
    value: i32,
    text: String,
});

impl Basic {
    pub fn new(value: i32, text: &str) -> Self {
        Self {
            value,
            text: text.into(),
        }
    }
}

/// Same shape as `Basic` plus a property with no source counterpart.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BasicDto {
    pub value: i32,
    pub text: String,
    pub note: String,
}

reflect_object!(BasicDto {
    value: i32,
    text: String,
    note: String,
});

/// `value` has the same name as `Basic::value` but a different type.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Widened {
    pub value: i64,
    pub text: String,
}

reflect_object!(Widened {
    value: i64,
    text: String,
});

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Parent {
    pub value: i32,
    pub text: String,
    pub child: Basic,
    pub boxed: Option<Box<Basic>>,
    pub shared: Option<Arc<Basic>>,
}

reflect_object!(Parent {
    value: i32,
    text: String,
    child: Basic,
    boxed: Option<Box<Basic>>,
    shared: Option<Arc<Basic>>,
});

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParentDto {
    pub value: i32,
    pub text: String,
    pub child: Basic,
    pub boxed: Option<Box<Basic>>,
    pub shared: Option<Arc<Basic>>,
}

reflect_object!(ParentDto {
    value: i32,
    text: String,
    child: Basic,
    boxed: Option<Box<Basic>>,
    shared: Option<Arc<Basic>>,
});

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Containers {
    pub ints: Option<[i32; 3]>,
    pub basics: Option<[Basic; 2]>,
    pub int_list: Option<Vec<i32>>,
    pub basic_list: Option<Vec<Basic>>,
    pub grid: Vec<Vec<i32>>,
    pub names: VecDeque<String>,
}

reflect_object!(Containers {
    ints: Option<[i32; 3]>,
    basics: Option<[Basic; 2]>,
    int_list: Option<Vec<i32>>,
    basic_list: Option<Vec<Basic>>,
    grid: Vec<Vec<i32>>,
    names: VecDeque<String>,
});

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ContainersDto {
    pub ints: Option<[i32; 3]>,
    pub basics: Option<[Basic; 2]>,
    pub int_list: Option<Vec<i32>>,
    pub basic_list: Option<Vec<Basic>>,
    pub grid: Vec<Vec<i32>>,
    pub names: VecDeque<String>,
}

reflect_object!(ContainersDto {
    ints: Option<[i32; 3]>,
    basics: Option<[Basic; 2]>,
    int_list: Option<Vec<i32>>,
    basic_list: Option<Vec<Basic>>,
    grid: Vec<Vec<i32>>,
    names: VecDeque<String>,
});

/// Holds collections the copier does not rebuild.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Tagged {
    pub name: String,
    pub tags: HashSet<Basic>,
    pub scores: BTreeMap<String, i32>,
}

reflect_object!(Tagged {
    name: String,
    tags: HashSet<Basic>,
    scores: BTreeMap<String, i32>,
});

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Restricted {
    pub value: i32,
    pub text: String,
}

reflect_object!(Restricted {
    #[read_only]
    value: i32,
    #[write_only]
    text: String,
});

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Node {
    pub value: i32,
    pub next: Option<Box<Node>>,
}

reflect_object!(Node {
    value: i32,
    next: Option<Box<Node>>,
});

impl Node {
    /// Builds a chain `values[0] -> values[1] -> ...`.
    pub fn chain(values: &[i32]) -> Option<Box<Node>> {
        values.iter().rev().fold(None, |next, &value| {
            Some(Box::new(Node { value, next }))
        })
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Tree {
    pub label: String,
    pub children: Vec<Tree>,
}

reflect_object!(Tree {
    label: String,
    children: Vec<Tree>,
});

/// Has no `Default`, so the copier can only copy into existing instances.
#[derive(Debug, Clone, PartialEq)]
pub struct Sealed {
    pub value: i32,
    pub text: String,
}

impl Reflect for Sealed {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>(TypeKind::Object(ObjectInfo::without_constructor(vec![
            PropertyInfo::read_write::<Sealed, i32>("value", |s| &s.value, |s, v| s.value = v),
            PropertyInfo::read_write::<Sealed, String>("text", |s| &s.text, |s, v| s.text = v),
        ])))
    }
}

/// Holds a `Sealed` value, which cannot be constructed by the copier.
#[derive(Debug, Clone, PartialEq)]
pub struct SealedHolder {
    pub inner: Sealed,
}

impl Default for SealedHolder {
    fn default() -> Self {
        Self {
            inner: Sealed {
                value: 0,
                text: String::new(),
            },
        }
    }
}

reflect_object!(SealedHolder { inner: Sealed });

/// Accessor whose setter always fails. With `checked` it also reports the
/// failure from `check_set`; without it the failure only shows up on `set`.
pub struct RefusingSetter<O> {
    pub property: &'static str,
    pub read: fn(&O) -> &i32,
    pub checked: bool,
}

impl<O: Any> PropertyAccess for RefusingSetter<O> {
    fn get<'a>(&self, owner: &'a dyn Any) -> deepcopy_reflect::Result<&'a dyn Any> {
        Ok((self.read)(downcast_ref::<O>(owner)?) as &dyn Any)
    }

    fn set(&self, _owner: &mut dyn Any, _value: Box<dyn Any>) -> deepcopy_reflect::Result<()> {
        Err(ReflectError::NotWritable {
            property: self.property,
        })
    }

    fn check_set(&self, _owner: &dyn Any, _value: &dyn Any) -> deepcopy_reflect::Result<()> {
        if self.checked {
            return Err(ReflectError::NotWritable {
                property: self.property,
            });
        }
        Ok(())
    }
}

/// `a` is a plain field; `b` goes through a setter that fails on `set`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Pair {
    pub a: i32,
    pub b: i32,
}

impl Reflect for Pair {
    fn type_info() -> TypeInfo {
        pair_info::<Pair>(|p| &p.a, |p, v| p.a = v, |p| &p.b, false)
    }
}

/// Same as `Pair`, but the failing setter reports itself up front.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CheckedPair {
    pub a: i32,
    pub b: i32,
}

impl Reflect for CheckedPair {
    fn type_info() -> TypeInfo {
        pair_info::<CheckedPair>(|p| &p.a, |p, v| p.a = v, |p| &p.b, true)
    }
}

fn pair_info<O: Default + Any>(
    get_a: fn(&O) -> &i32,
    set_a: fn(&mut O, i32),
    get_b: fn(&O) -> &i32,
    checked: bool,
) -> TypeInfo {
    let b = RefusingSetter {
        property: "b",
        read: get_b,
        checked,
    };
    TypeInfo::new::<O>(TypeKind::Object(ObjectInfo::new::<O>(vec![
        PropertyInfo::read_write::<O, i32>("a", get_a, set_a),
        PropertyInfo::with_access::<i32>("b", true, true, Arc::new(b)),
    ])))
}

pub fn sample_parent() -> Parent {
    Parent {
        value: 1,
        text: "string1".into(),
        child: Basic::new(2, "string2"),
        boxed: Some(Box::new(Basic::new(3, "string3"))),
        shared: Some(Arc::new(Basic::new(4, "string4"))),
    }
}

pub fn sample_containers() -> Containers {
    Containers {
        ints: Some([1, 2, 3]),
        basics: Some([Basic::new(1, "string1"), Basic::new(2, "string2")]),
        int_list: Some(vec![1, 2, 3]),
        basic_list: Some(vec![Basic::new(1, "string1"), Basic::new(2, "string2")]),
        grid: vec![vec![1, 2, 3], vec![1, 2, 3], vec![1, 2, 3]],
        names: VecDeque::from(vec!["a".to_string(), "b".to_string()]),
    }
}
