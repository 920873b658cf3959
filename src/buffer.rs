//! Buffer：单次编译使用的 SQL 文本与参数累积器。
//!
//! 绑定模式下每个值写一个占位符并追加到参数列表；内联模式下直接写字面量，
//! 无法内联的值（NaN、valuer 求值失败等）以 [`BuildError`] 返回，不会被静默丢弃。

use crate::args::Arg;
use crate::dialect::Dialect;
use crate::quote::Literal;
use crate::value::{SqlDateTime, SqlValue};
use crate::valuer::ValuerError;
use thiserror::Error;
use time::macros::format_description;

/// 编译错误。
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("sql: inline value failed: {0}")]
    Valuer(#[from] ValuerError),
    #[error("sql: cannot inline non-finite float {0}")]
    NonFiniteFloat(f64),
    #[error("sql: cannot inline datetime: {0}")]
    DateTime(#[from] time::error::Format),
    #[error("sql: cannot inline bytes that are not valid UTF-8: {0}")]
    NonUtf8Bytes(#[from] std::str::Utf8Error),
    #[error("sql: dialect {0} has no on-conflict syntax")]
    OnConflictUnsupported(String),
}

/// SQL 文本 + 参数。
#[derive(Debug)]
pub struct Buffer<'d> {
    sql: String,
    dialect: &'d Dialect,
    value_count: usize,
    arguments: Vec<Arg>,
    inline: bool,
}

impl<'d> Buffer<'d> {
    /// 按方言配置决定是否内联。
    pub fn new(dialect: &'d Dialect) -> Self {
        Self {
            sql: String::new(),
            dialect,
            value_count: 0,
            arguments: Vec::new(),
            inline: dialect.inline_values,
        }
    }

    /// 强制内联（DDL 不携带绑定参数）。
    pub fn inline(dialect: &'d Dialect) -> Self {
        Self {
            inline: true,
            ..Self::new(dialect)
        }
    }

    pub fn dialect(&self) -> &'d Dialect {
        self.dialect
    }

    pub fn is_inline(&self) -> bool {
        self.inline
    }

    pub fn write_str(&mut self, s: &str) {
        self.sql.push_str(s);
    }

    pub fn write_char(&mut self, c: char) {
        self.sql.push(c);
    }

    /// 写入编译后的字段表达式。
    pub fn write_escape(&mut self, field: &str) {
        let escaped = self.dialect.name.build(field);
        self.sql.push_str(&escaped);
    }

    /// `items` 逐个编译后用 `sep` 连接。
    pub fn write_escape_list(&mut self, items: &[String], sep: &str) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(sep);
            }
            self.write_escape(item);
        }
    }

    /// 写入一个值：绑定模式写占位符，内联模式写字面量。
    pub fn write_value(&mut self, arg: &Arg) -> Result<(), BuildError> {
        if !self.inline {
            self.write_placeholder();
            self.arguments.push(arg.clone());
            return Ok(());
        }

        match arg {
            Arg::Value(v) => self.write_literal(v),
            Arg::Valuer(v) => {
                let resolved = v.value()?;
                self.write_literal(&resolved)
            }
        }
    }

    /// 只写占位符，参数稍后通过 [`Buffer::add_arguments`] 补上。
    pub fn write_placeholder(&mut self) {
        self.value_count += 1;
        self.sql.push_str(&self.dialect.placeholder);
        if self.dialect.ordinal {
            self.sql.push_str(&self.value_count.to_string());
        }
    }

    /// 追加已经自带占位符的参数，不写任何文本。
    pub fn add_arguments(&mut self, args: &[Arg]) {
        self.arguments.extend_from_slice(args);
    }

    pub fn arguments(&self) -> &[Arg] {
        &self.arguments
    }

    pub fn as_str(&self) -> &str {
        &self.sql
    }

    pub fn finish(self) -> (String, Vec<Arg>) {
        (self.sql, self.arguments)
    }

    fn write_literal(&mut self, v: &SqlValue) -> Result<(), BuildError> {
        match v {
            SqlValue::Null => self.sql.push_str("NULL"),
            SqlValue::Bool(b) => {
                let token = if *b {
                    &self.dialect.bool_true
                } else {
                    &self.dialect.bool_false
                };
                self.sql.push_str(token);
            }
            SqlValue::I64(n) => self.sql.push_str(&n.to_string()),
            SqlValue::U64(n) => self.sql.push_str(&n.to_string()),
            SqlValue::F32(n) => {
                if !n.is_finite() {
                    return Err(BuildError::NonFiniteFloat(f64::from(*n)));
                }
                self.sql.push_str(&n.to_string());
            }
            SqlValue::F64(n) => {
                if !n.is_finite() {
                    return Err(BuildError::NonFiniteFloat(*n));
                }
                self.sql.push_str(&n.to_string());
            }
            SqlValue::String(s) => {
                let quoted = self.dialect.quoter().value(Literal::Str(s));
                self.sql.push_str(&quoted);
            }
            SqlValue::Bytes(b) => {
                // 替换字符会悄悄改写数据
                let text = std::str::from_utf8(b)?;
                let quoted = self.dialect.quoter().value(Literal::Str(text));
                self.sql.push_str(&quoted);
            }
            SqlValue::DateTime(dt) => {
                let text = format_datetime(dt)?;
                let quoted = self.dialect.quoter().value(Literal::Str(&text));
                self.sql.push_str(&quoted);
            }
        }
        Ok(())
    }
}

/// `YYYY-MM-DD HH:MM:SS.ffffff`，有时区缩写时追加缩写，否则追加偏移。
fn format_datetime(v: &SqlDateTime) -> Result<String, BuildError> {
    let mut out = v.dt.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6]"
    ))?;
    out.push(' ');
    match &v.tz_abbr {
        Some(abbr) => out.push_str(abbr),
        None => out.push_str(&v.dt.format(format_description!(
            "[offset_hour sign:mandatory]:[offset_minute]"
        ))?),
    }
    Ok(out)
}
