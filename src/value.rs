//! SQL 参数值类型：内联与绑定两种模式共用的封闭字面量集合。

use std::borrow::Cow;

/// SQL 参数值。
///
/// `F32` 单独保留，内联时按 32 位精度输出，避免升为 `f64` 后出现 `0.10000000149011612` 这类尾数。
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    String(Cow<'static, str>),
    Bytes(Vec<u8>),
    DateTime(SqlDateTime),
}

/// 时间值（可选时区缩写，仅影响内联输出）。
#[derive(Debug, Clone, PartialEq)]
pub struct SqlDateTime {
    pub dt: time::OffsetDateTime,
    pub tz_abbr: Option<Cow<'static, str>>,
}

impl SqlDateTime {
    pub fn new(dt: time::OffsetDateTime) -> Self {
        Self { dt, tz_abbr: None }
    }

    pub fn with_tz_abbr(mut self, abbr: impl Into<Cow<'static, str>>) -> Self {
        self.tz_abbr = Some(abbr.into());
        self
    }
}

impl SqlValue {
    /// 将 `Option<T>` 映射为 `SqlValue`：`None => Null`，`Some(v) => v.into()`。
    pub fn from_option<T: Into<SqlValue>>(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }

    /// 尽力转换为 `i64`：整数原样返回，其它类型返回 `None`。
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(n) => Some(*n),
            Self::U64(n) => i64::try_from(*n).ok(),
            _ => None,
        }
    }
}

impl From<()> for SqlValue {
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i8> for SqlValue {
    fn from(v: i8) -> Self {
        Self::I64(v as i64)
    }
}

impl From<i16> for SqlValue {
    fn from(v: i16) -> Self {
        Self::I64(v as i64)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        Self::I64(v as i64)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        Self::I64(v)
    }
}

impl From<u8> for SqlValue {
    fn from(v: u8) -> Self {
        Self::U64(v as u64)
    }
}

impl From<u16> for SqlValue {
    fn from(v: u16) -> Self {
        Self::U64(v as u64)
    }
}

impl From<u32> for SqlValue {
    fn from(v: u32) -> Self {
        Self::U64(v as u64)
    }
}

impl From<u64> for SqlValue {
    fn from(v: u64) -> Self {
        Self::U64(v)
    }
}

impl From<f32> for SqlValue {
    fn from(v: f32) -> Self {
        Self::F32(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::String(Cow::Owned(v))
    }
}

impl From<&'static str> for SqlValue {
    fn from(v: &'static str) -> Self {
        Self::String(Cow::Borrowed(v))
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<time::OffsetDateTime> for SqlValue {
    fn from(v: time::OffsetDateTime) -> Self {
        Self::DateTime(SqlDateTime::new(v))
    }
}

impl From<SqlDateTime> for SqlValue {
    fn from(v: SqlDateTime) -> Self {
        Self::DateTime(v)
    }
}

#[cfg(test)]
mod tests {
    use super::SqlValue;

    #[test]
    fn from_option_some() {
        assert_eq!(SqlValue::from_option(Some(123_i64)), SqlValue::I64(123));
    }

    #[test]
    fn from_option_none() {
        assert_eq!(SqlValue::from_option::<i64>(None), SqlValue::Null);
    }

    #[test]
    fn from_f32_keeps_width() {
        let v: SqlValue = 0.1_f32.into();
        assert_eq!(v, SqlValue::F32(0.1));
    }

    #[test]
    fn as_i64_only_for_integers() {
        assert_eq!(SqlValue::U64(7).as_i64(), Some(7));
        assert_eq!(SqlValue::U64(u64::MAX).as_i64(), None);
        assert_eq!(SqlValue::from("7").as_i64(), None);
    }
}
