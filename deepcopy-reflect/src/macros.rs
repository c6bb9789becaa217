/// Implements [`Reflect`](crate::Reflect) for a struct by listing its
/// copyable fields.
///
/// Every listed field becomes a readable and writable property named after
/// the field. `#[read_only]` drops the setter, `#[write_only]` drops the
/// getter. The struct must implement `Default`; fields that are not listed
/// are invisible to the copier and keep their default value in copies.
///
/// ```
/// use deepcopy_reflect::{reflect_object, TypeInfo};
///
/// #[derive(Default)]
/// struct Account {
///     id: u64,
///     owner: String,
///     tags: Vec<String>,
/// }
///
/// reflect_object!(Account {
///     #[read_only]
///     id: u64,
///     owner: String,
///     tags: Vec<String>,
/// });
///
/// let info = TypeInfo::of::<Account>();
/// assert_eq!(info.properties().len(), 3);
/// assert!(!info.property("id").unwrap().can_write());
/// ```
#[macro_export]
macro_rules! reflect_object {
    (@property $owner:ident, $field:ident, $ty:ty) => {
        $crate::PropertyInfo::read_write::<$owner, $ty>(
            stringify!($field),
            |owner| &owner.$field,
            |owner, value| owner.$field = value,
        )
    };
    (@property $owner:ident, $field:ident, $ty:ty, read_only) => {
        $crate::PropertyInfo::read_only::<$owner, $ty>(stringify!($field), |owner| &owner.$field)
    };
    (@property $owner:ident, $field:ident, $ty:ty, write_only) => {
        $crate::PropertyInfo::write_only::<$owner, $ty>(
            stringify!($field),
            |owner, value| owner.$field = value,
        )
    };
    ($owner:ident { $( $(#[$access:ident])? $field:ident : $ty:ty ),* $(,)? }) => {
        impl $crate::Reflect for $owner {
            fn type_info() -> $crate::TypeInfo {
                $crate::TypeInfo::new::<$owner>($crate::TypeKind::Object(
                    $crate::ObjectInfo::new::<$owner>(vec![
                        $( $crate::reflect_object!(@property $owner, $field, $ty $(, $access)?) ),*
                    ]),
                ))
            }
        }
    };
}
