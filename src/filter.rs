//! Filter：WHERE / HAVING / JOIN 条件树及其编译。

use crate::args::Arg;
use crate::buffer::{BuildError, Buffer};
use crate::query::Query;
use crate::value::SqlValue;

/// 比较运算符。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl CompareOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
        }
    }
}

/// 子查询，`prefix` 为 `ANY`、`ALL` 等量词，可为空。
#[derive(Debug, Clone, PartialEq)]
pub struct SubQuery {
    pub prefix: String,
    pub query: Box<Query>,
}

impl SubQuery {
    pub fn new(query: Query) -> Self {
        Self {
            prefix: String::new(),
            query: Box::new(query),
        }
    }

    pub fn any(query: Query) -> Self {
        Self::prefixed("ANY", query)
    }

    pub fn all(query: Query) -> Self {
        Self::prefixed("ALL", query)
    }

    pub fn prefixed(prefix: impl Into<String>, query: Query) -> Self {
        Self {
            prefix: prefix.into(),
            query: Box::new(query),
        }
    }

    fn write(&self, buf: &mut Buffer<'_>) -> Result<(), BuildError> {
        buf.write_str(&self.prefix);
        buf.write_char('(');
        self.query.write_query(buf)?;
        buf.write_char(')');
        Ok(())
    }
}

/// 比较右侧或 IN 列表中的一项。
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Value(Arg),
    SubQuery(SubQuery),
}

impl Operand {
    fn write(&self, buf: &mut Buffer<'_>) -> Result<(), BuildError> {
        match self {
            Self::Value(arg) => buf.write_value(arg),
            Self::SubQuery(sub) => sub.write(buf),
        }
    }
}

macro_rules! impl_operand_from {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Operand {
                fn from(v: $ty) -> Self {
                    Self::Value(Arg::from(v))
                }
            }
        )+
    };
}

impl_operand_from!(
    Arg,
    SqlValue,
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
);

impl<T: Into<SqlValue>> From<Option<T>> for Operand {
    fn from(v: Option<T>) -> Self {
        Self::Value(Arg::from(v))
    }
}

impl From<SubQuery> for Operand {
    fn from(v: SubQuery) -> Self {
        Self::SubQuery(v)
    }
}

impl From<Query> for Operand {
    fn from(v: Query) -> Self {
        Self::SubQuery(SubQuery::new(v))
    }
}

/// 条件树。
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Filter {
    /// 空条件，不输出 WHERE / HAVING。
    #[default]
    None,
    And(Vec<Filter>),
    Or(Vec<Filter>),
    /// `NOT` 后跟子条件的 AND 组合。
    Not(Vec<Filter>),
    Compare {
        op: CompareOp,
        field: String,
        value: Operand,
    },
    Null {
        field: String,
        negated: bool,
    },
    In {
        field: String,
        negated: bool,
        values: Vec<Operand>,
    },
    Like {
        field: String,
        negated: bool,
        pattern: Arg,
    },
    /// 原样拼接的 SQL 片段，占位符由调用方写好。
    Fragment {
        sql: String,
        args: Vec<Arg>,
    },
}

fn compare(op: CompareOp, field: impl Into<String>, value: impl Into<Operand>) -> Filter {
    Filter::Compare {
        op,
        field: field.into(),
        value: value.into(),
    }
}

fn prune(inner: impl IntoIterator<Item = Filter>) -> Vec<Filter> {
    inner.into_iter().filter(|f| !f.is_none()).collect()
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        compare(CompareOp::Eq, field, value)
    }

    pub fn ne(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        compare(CompareOp::Ne, field, value)
    }

    pub fn lt(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        compare(CompareOp::Lt, field, value)
    }

    pub fn lte(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        compare(CompareOp::Lte, field, value)
    }

    pub fn gt(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        compare(CompareOp::Gt, field, value)
    }

    pub fn gte(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        compare(CompareOp::Gte, field, value)
    }

    pub fn nil(field: impl Into<String>) -> Self {
        Self::Null {
            field: field.into(),
            negated: false,
        }
    }

    pub fn not_nil(field: impl Into<String>) -> Self {
        Self::Null {
            field: field.into(),
            negated: true,
        }
    }

    pub fn in_<T: Into<Operand>>(field: impl Into<String>, values: impl IntoIterator<Item = T>) -> Self {
        Self::In {
            field: field.into(),
            negated: false,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn not_in<T: Into<Operand>>(
        field: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        Self::In {
            field: field.into(),
            negated: true,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// `field IN (<subquery>)`。
    pub fn in_query(field: impl Into<String>, query: Query) -> Self {
        Self::In {
            field: field.into(),
            negated: false,
            values: vec![Operand::from(query)],
        }
    }

    pub fn not_in_query(field: impl Into<String>, query: Query) -> Self {
        Self::In {
            field: field.into(),
            negated: true,
            values: vec![Operand::from(query)],
        }
    }

    pub fn like(field: impl Into<String>, pattern: impl Into<Arg>) -> Self {
        Self::Like {
            field: field.into(),
            negated: false,
            pattern: pattern.into(),
        }
    }

    pub fn not_like(field: impl Into<String>, pattern: impl Into<Arg>) -> Self {
        Self::Like {
            field: field.into(),
            negated: true,
            pattern: pattern.into(),
        }
    }

    pub fn fragment(sql: impl Into<String>, args: Vec<Arg>) -> Self {
        Self::Fragment {
            sql: sql.into(),
            args,
        }
    }

    /// 空子条件会被丢弃。
    pub fn and(inner: impl IntoIterator<Item = Filter>) -> Self {
        Self::And(prune(inner))
    }

    pub fn or(inner: impl IntoIterator<Item = Filter>) -> Self {
        Self::Or(prune(inner))
    }

    pub fn not(inner: impl IntoIterator<Item = Filter>) -> Self {
        Self::Not(prune(inner))
    }

    /// 与另一个条件做 AND，已经是 AND 组时直接追加。
    pub fn and_with(self, other: Filter) -> Self {
        match (self, other) {
            (a, b) if b.is_none() => a,
            (a, b) if a.is_none() => b,
            (Self::And(mut inner), b) => {
                inner.push(b);
                Self::And(inner)
            }
            (a, b) => Self::And(vec![a, b]),
        }
    }

    pub fn or_with(self, other: Filter) -> Self {
        match (self, other) {
            (a, b) if b.is_none() => a,
            (a, b) if a.is_none() => b,
            (Self::Or(mut inner), b) => {
                inner.push(b);
                Self::Or(inner)
            }
            (a, b) => Self::Or(vec![a, b]),
        }
    }

    pub fn is_none(&self) -> bool {
        match self {
            Self::None => true,
            // 组内全部为空时整组为空
            Self::And(inner) | Self::Or(inner) | Self::Not(inner) => inner.iter().all(Filter::is_none),
            _ => false,
        }
    }

    /// 编译到 buffer。
    pub fn write(&self, buf: &mut Buffer<'_>) -> Result<(), BuildError> {
        if self.is_none() {
            return Ok(());
        }
        match self {
            Self::None => Ok(()),
            Self::And(inner) => write_logical(buf, "AND", inner),
            Self::Or(inner) => write_logical(buf, "OR", inner),
            Self::Not(inner) => {
                buf.write_str("NOT ");
                write_logical(buf, "AND", inner)
            }
            Self::Compare { op, field, value } => {
                buf.write_escape(field);
                buf.write_str(op.as_str());
                value.write(buf)
            }
            Self::Null { field, negated } => {
                buf.write_escape(field);
                buf.write_str(if *negated { " IS NOT NULL" } else { " IS NULL" });
                Ok(())
            }
            Self::In {
                field,
                negated,
                values,
            } => write_inclusion(buf, field, *negated, values),
            Self::Like {
                field,
                negated,
                pattern,
            } => {
                buf.write_escape(field);
                buf.write_str(if *negated { " NOT LIKE " } else { " LIKE " });
                buf.write_value(pattern)
            }
            Self::Fragment { sql, args } => {
                buf.write_str(sql);
                buf.add_arguments(args);
                Ok(())
            }
        }
    }
}

fn write_logical(buf: &mut Buffer<'_>, op: &str, inner: &[Filter]) -> Result<(), BuildError> {
    let present: Vec<&Filter> = inner.iter().filter(|f| !f.is_none()).collect();
    let grouped = present.len() > 1;
    if grouped {
        buf.write_char('(');
    }
    for (i, f) in present.into_iter().enumerate() {
        if i > 0 {
            buf.write_char(' ');
            buf.write_str(op);
            buf.write_char(' ');
        }
        f.write(buf)?;
    }
    if grouped {
        buf.write_char(')');
    }
    Ok(())
}

fn write_inclusion(
    buf: &mut Buffer<'_>,
    field: &str,
    negated: bool,
    values: &[Operand],
) -> Result<(), BuildError> {
    // 空集合：IN 恒假，NOT IN 恒真
    if values.is_empty() {
        buf.write_str(if negated { "1=1" } else { "1=0" });
        return Ok(());
    }

    buf.write_escape(field);
    buf.write_str(if negated { " NOT IN " } else { " IN " });

    if let [Operand::SubQuery(sub)] = values {
        return sub.write(buf);
    }

    buf.write_char('(');
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            buf.write_char(',');
        }
        v.write(buf)?;
    }
    buf.write_char(')');
    Ok(())
}
