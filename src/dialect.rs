//! Dialect：一种数据库方言的全部生成配置。
//!
//! 构造一次后只读共享。`Clone` 共享同一份字段转义缓存；
//! 更换 quoter 时会换成一份新缓存，旧条目不会被错误复用。

use crate::column_mapper::{ColumnMapperFunc, ColumnSpec, mysql_column_mapper};
use crate::name::Name;
use crate::quote::Quoter;
use crate::schema::Column;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// ON CONFLICT 子句的方言语法。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnConflictSyntax {
    /// 子句关键字，如 `ON CONFLICT`、`ON DUPLICATE KEY`。
    pub statement: Cow<'static, str>,
    pub ignore_statement: Cow<'static, str>,
    pub update_statement: Cow<'static, str>,
    /// 替换时引用新值的表别名，如 `EXCLUDED`。
    pub table_qualifier: Cow<'static, str>,
    /// 是否输出 `(key, ...)` 冲突目标。
    pub support_key: bool,
    /// 替换时用 `VALUES(field)` 而不是 `qualifier.field`。
    pub use_values: bool,
    /// 忽略冲突时输出 `key=key` 自赋值（没有真正 no-op 语法的方言）。
    pub ignore_self_assign: bool,
}

impl OnConflictSyntax {
    pub fn postgres() -> Self {
        Self {
            statement: "ON CONFLICT".into(),
            ignore_statement: "DO NOTHING".into(),
            update_statement: "DO UPDATE SET".into(),
            table_qualifier: "EXCLUDED".into(),
            support_key: true,
            use_values: false,
            ignore_self_assign: false,
        }
    }

    pub fn mysql() -> Self {
        Self {
            statement: "ON DUPLICATE KEY".into(),
            ignore_statement: "UPDATE".into(),
            update_statement: "UPDATE".into(),
            table_qualifier: "".into(),
            support_key: false,
            use_values: true,
            ignore_self_assign: true,
        }
    }

    pub fn sqlite() -> Self {
        Self {
            table_qualifier: "excluded".into(),
            ..Self::postgres()
        }
    }
}

/// 方言配置。
#[derive(Clone)]
pub struct Dialect {
    pub(crate) label: Cow<'static, str>,
    pub(crate) name: Name,
    pub(crate) placeholder: Cow<'static, str>,
    pub(crate) ordinal: bool,
    pub(crate) inline_values: bool,
    pub(crate) bool_true: Cow<'static, str>,
    pub(crate) bool_false: Cow<'static, str>,
    pub(crate) on_conflict: Option<OnConflictSyntax>,
    pub(crate) returning_primary: bool,
    pub(crate) insert_default_values: bool,
    pub(crate) drop_index_on_table: bool,
    pub(crate) column_mapper: ColumnMapperFunc,
}

impl fmt::Debug for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dialect")
            .field("label", &self.label)
            .field("quoter", &self.name.quoter())
            .field("placeholder", &self.placeholder)
            .field("ordinal", &self.ordinal)
            .field("inline_values", &self.inline_values)
            .field("on_conflict", &self.on_conflict)
            .field("returning_primary", &self.returning_primary)
            .field("insert_default_values", &self.insert_default_values)
            .field("drop_index_on_table", &self.drop_index_on_table)
            .finish_non_exhaustive()
    }
}

impl Dialect {
    /// 以给定 quoter 创建方言，其余配置取 `?` 占位符等通用默认值。
    pub fn new(label: impl Into<Cow<'static, str>>, quoter: impl Quoter + 'static) -> Self {
        Self {
            label: label.into(),
            name: Name::new(Arc::new(quoter)),
            placeholder: "?".into(),
            ordinal: false,
            inline_values: false,
            bool_true: "TRUE".into(),
            bool_false: "FALSE".into(),
            on_conflict: None,
            returning_primary: false,
            insert_default_values: false,
            drop_index_on_table: false,
            column_mapper: Arc::new(mysql_column_mapper),
        }
    }

    pub fn with_quoter(mut self, quoter: impl Quoter + 'static) -> Self {
        self.name = Name::new(Arc::new(quoter));
        self
    }

    /// `ordinal` 为 true 时占位符后追加从 1 开始的序号（`$1`、`@p1`）。
    pub fn with_placeholder(mut self, symbol: impl Into<Cow<'static, str>>, ordinal: bool) -> Self {
        self.placeholder = symbol.into();
        self.ordinal = ordinal;
        self
    }

    pub fn with_inline_values(mut self, inline: bool) -> Self {
        self.inline_values = inline;
        self
    }

    pub fn with_bool_literals(
        mut self,
        yes: impl Into<Cow<'static, str>>,
        no: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.bool_true = yes.into();
        self.bool_false = no.into();
        self
    }

    pub fn with_on_conflict(mut self, syntax: Option<OnConflictSyntax>) -> Self {
        self.on_conflict = syntax;
        self
    }

    pub fn with_returning_primary(mut self, on: bool) -> Self {
        self.returning_primary = on;
        self
    }

    pub fn with_insert_default_values(mut self, on: bool) -> Self {
        self.insert_default_values = on;
        self
    }

    pub fn with_drop_index_on_table(mut self, on: bool) -> Self {
        self.drop_index_on_table = on;
        self
    }

    pub fn with_column_mapper(
        mut self,
        mapper: impl Fn(&Column) -> ColumnSpec + Send + Sync + 'static,
    ) -> Self {
        self.column_mapper = Arc::new(mapper);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn quoter(&self) -> &dyn Quoter {
        self.name.quoter()
    }

    pub fn inline_values(&self) -> bool {
        self.inline_values
    }

    pub fn on_conflict(&self) -> Option<&OnConflictSyntax> {
        self.on_conflict.as_ref()
    }

    pub fn map_column(&self, column: &Column) -> ColumnSpec {
        (self.column_mapper)(column)
    }
}

impl Default for Dialect {
    fn default() -> Self {
        crate::flavor::default_flavor().dialect()
    }
}
