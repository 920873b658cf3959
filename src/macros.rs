//! 宏集合：字段列表的可变参数封装，以及 `mutates!` / `filters!` 这类简写。

#[doc(hidden)]
#[macro_export]
macro_rules! __collect_strings {
    () => {
        Vec::<String>::new()
    };
    ($($value:expr),+ $(,)?) => {{
        let mut values = Vec::<String>::new();
        $(
            $crate::macros::extend_into_strings($value, &mut values);
        )*
        values
    }};
}

/// 可以展开成若干字段名的类型：单个字符串、数组、切片或 `Vec`。
pub trait IntoStrings {
    fn extend_into_strings(self, dst: &mut Vec<String>);
}

impl IntoStrings for String {
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.push(self);
    }
}

impl<'a> IntoStrings for &'a str {
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.push(self.to_string());
    }
}

impl<const N: usize, T> IntoStrings for [T; N]
where
    T: Into<String>,
{
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.extend(self.into_iter().map(Into::into));
    }
}

impl<'a, T> IntoStrings for &'a [T]
where
    T: Into<String> + Clone,
{
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        for item in self {
            dst.push(item.clone().into());
        }
    }
}

impl<T> IntoStrings for Vec<T>
where
    T: Into<String>,
{
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        for item in self {
            dst.push(item.into());
        }
    }
}

#[doc(hidden)]
pub fn extend_into_strings<T>(value: T, dst: &mut Vec<String>)
where
    T: IntoStrings,
{
    value.extend_into_strings(dst);
}

#[doc(hidden)]
pub fn collect_into_strings<T>(value: T) -> Vec<String>
where
    T: IntoStrings,
{
    let mut dst = Vec::new();
    value.extend_into_strings(&mut dst);
    dst
}

/// 用可变参数设置 SELECT 字段：`select_fields!(query, "id", "name")`。
#[macro_export]
macro_rules! select_fields {
    ($query:expr $(, $field:expr)* $(,)?) => {
        $query.select($crate::__collect_strings!($($field),*))
    };
}
pub use crate::select_fields;

/// 构造 [`crate::Mutates`]：`field => value` 为赋值，`inc field => delta` 为自增。
///
/// ```
/// use halo_rel::mutates;
///
/// let m = mutates! { "name" => "Alice", inc "visits" => 1 };
/// assert_eq!(m.len(), 2);
/// ```
#[macro_export]
macro_rules! mutates {
    (@acc $m:ident;) => {};
    (@acc $m:ident; inc $field:expr => $delta:expr $(, $($rest:tt)*)?) => {
        $m.insert($crate::Mutate::inc($field, $delta));
        $crate::mutates!(@acc $m; $($($rest)*)?);
    };
    (@acc $m:ident; $field:expr => $value:expr $(, $($rest:tt)*)?) => {
        $m.insert($crate::Mutate::set($field, $value));
        $crate::mutates!(@acc $m; $($($rest)*)?);
    };
    ($($body:tt)*) => {{
        #[allow(unused_mut)]
        let mut m = $crate::Mutates::new();
        $crate::mutates!(@acc m; $($body)*);
        m
    }};
}
pub use crate::mutates;

/// 把多个条件以 AND 组合：`filters![Filter::eq("id", 1), Filter::nil("deleted_at")]`。
#[macro_export]
macro_rules! filters {
    () => {
        $crate::Filter::None
    };
    ($($filter:expr),+ $(,)?) => {
        $crate::Filter::and(vec![$($filter),+])
    };
}
pub use crate::filters;
