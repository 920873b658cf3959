//! Builder：所有语句编译器共享的入口。

use crate::args::Arg;
use crate::buffer::{BuildError, Buffer};
use crate::dialect::Dialect;
use crate::flavor::default_flavor;
use dyn_clone::DynClone;
use std::fmt;

/// 可编译为 `(sql, args)` 的语句。
///
/// 实现者只需提供 [`Builder::write_to`]，写出包含结尾 `;` 的完整语句。
pub trait Builder: DynClone + fmt::Debug {
    fn write_to(&self, buf: &mut Buffer<'_>) -> Result<(), BuildError>;

    /// DDL 没有绑定参数，值一律内联。
    fn inline_values(&self) -> bool {
        false
    }

    fn build_with(&self, dialect: &Dialect) -> Result<(String, Vec<Arg>), BuildError> {
        let mut buf = if self.inline_values() {
            Buffer::inline(dialect)
        } else {
            Buffer::new(dialect)
        };
        self.write_to(&mut buf)?;
        Ok(buf.finish())
    }

    /// 使用全局默认 flavor 的共享方言编译。
    fn build(&self) -> Result<(String, Vec<Arg>), BuildError> {
        self.build_with(default_flavor().shared())
    }
}

dyn_clone::clone_trait_object!(Builder);
