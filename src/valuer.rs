//! SqlValuer：自定义类型转换为 [`SqlValue`] 的唯一扩展点。
//!
//! 绑定模式下 valuer 原样进入参数列表，由执行方决定何时求值；
//! 内联模式下编译期即调用 `value()`，失败会让整条语句编译失败。

use crate::value::SqlValue;

/// Valuer 错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("sql valuer error: {0}")]
pub struct ValuerError(pub String);

/// 可在编译或执行阶段动态计算实际值的 trait。
pub trait SqlValuer: dyn_clone::DynClone + std::fmt::Debug + Send + Sync {
    fn value(&self) -> Result<SqlValue, ValuerError>;
}

dyn_clone::clone_trait_object!(SqlValuer);
