//! Arg：编译结果里参数列表的元素类型。

use crate::value::{SqlDateTime, SqlValue};
use crate::valuer::SqlValuer;

/// 绑定参数：普通值，或在执行阶段求值的 valuer。
#[derive(Clone)]
pub enum Arg {
    Value(SqlValue),
    Valuer(Box<dyn SqlValuer>),
}

impl Arg {
    /// 取出可直接比较/转换的值；valuer 会被调用一次。
    pub fn resolve(&self) -> Result<SqlValue, crate::valuer::ValuerError> {
        match self {
            Self::Value(v) => Ok(v.clone()),
            Self::Valuer(v) => v.value(),
        }
    }

    pub fn as_value(&self) -> Option<&SqlValue> {
        match self {
            Self::Value(v) => Some(v),
            Self::Valuer(_) => None,
        }
    }
}

impl std::fmt::Debug for Arg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Valuer(v) => f.debug_tuple("Valuer").field(v).finish(),
        }
    }
}

impl PartialEq for Arg {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => a == b,
            // valuer 可能有副作用，不参与相等比较
            _ => false,
        }
    }
}

impl From<SqlValue> for Arg {
    fn from(v: SqlValue) -> Self {
        Self::Value(v)
    }
}

impl From<Box<dyn SqlValuer>> for Arg {
    fn from(v: Box<dyn SqlValuer>) -> Self {
        Self::Valuer(v)
    }
}

macro_rules! impl_arg_from {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Arg {
                fn from(v: $ty) -> Self {
                    Self::Value(SqlValue::from(v))
                }
            }
        )+
    };
}

impl_arg_from!(
    (),
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    String,
    &'static str,
    Vec<u8>,
    time::OffsetDateTime,
    SqlDateTime,
);

impl<T: Into<SqlValue>> From<Option<T>> for Arg {
    fn from(v: Option<T>) -> Self {
        Self::Value(SqlValue::from_option(v))
    }
}

/// 把一组值转换成参数列表（`fragment` 等接口的便捷入口）。
pub fn args<T: Into<Arg>>(values: impl IntoIterator<Item = T>) -> Vec<Arg> {
    values.into_iter().map(Into::into).collect()
}
