//! DDL 节点：表、列、键、索引，以及按顺序累积迁移的 [`Schema`]。

use crate::buffer::BuildError;
use crate::builder::Builder;
use crate::dialect::Dialect;
use crate::filter::Filter;
use crate::macros::{IntoStrings, collect_into_strings};

/// 表/列/键/索引上的操作类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaOp {
    #[default]
    Create,
    Alter,
    Rename,
    Drop,
}

/// 与方言无关的列类型，具体 SQL 类型名由 [`crate::ColumnMapperFunc`] 决定。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    Id,
    BigId,
    Bool,
    SmallInt,
    Int,
    BigInt,
    Float,
    Decimal,
    String,
    Text,
    Json,
    Date,
    DateTime,
    Time,
    Timestamp,
    /// 原样使用的类型名。
    Custom(String),
}

/// 列定义。`op` 只在 ALTER TABLE 中有意义。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Column {
    pub op: SchemaOp,
    pub name: String,
    pub column_type: Option<ColumnType>,
    pub rename: Option<String>,
    pub limit: u32,
    pub precision: u32,
    pub scale: u32,
    pub unsigned: bool,
    pub required: bool,
    pub unique: bool,
    /// 字符串默认值按方言的字面量规则转义，其它类型按 JSON 字面量输出。
    pub default: Option<serde_json::Value>,
    pub options: String,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type: Some(column_type),
            ..Self::default()
        }
    }

    /// ALTER TABLE 中的重命名列。
    pub fn rename(name: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            op: SchemaOp::Rename,
            name: name.into(),
            rename: Some(to.into()),
            ..Self::default()
        }
    }

    /// ALTER TABLE 中的删除列。
    pub fn drop(name: impl Into<String>) -> Self {
        Self {
            op: SchemaOp::Drop,
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    pub fn unsigned(mut self) -> Self {
        self.unsigned = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn options(mut self, options: impl Into<String>) -> Self {
        self.options = options.into();
        self
    }
}

/// 键类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    Primary,
    Unique,
    Foreign,
    Plain,
}

impl KeyType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "PRIMARY KEY",
            Self::Unique => "UNIQUE",
            Self::Foreign => "FOREIGN KEY",
            Self::Plain => "KEY",
        }
    }
}

/// 外键引用的目标及级联动作。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ForeignKeyReference {
    pub table: String,
    pub columns: Vec<String>,
    pub on_delete: String,
    pub on_update: String,
}

/// 表级键定义。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub op: SchemaOp,
    pub name: String,
    pub key_type: KeyType,
    pub columns: Vec<String>,
    pub reference: ForeignKeyReference,
    pub options: String,
}

impl Key {
    pub fn new<T: IntoStrings>(key_type: KeyType, columns: T) -> Self {
        Self {
            op: SchemaOp::Create,
            name: String::new(),
            key_type,
            columns: collect_into_strings(columns),
            reference: ForeignKeyReference::default(),
            options: String::new(),
        }
    }

    pub fn primary<T: IntoStrings>(columns: T) -> Self {
        Self::new(KeyType::Primary, columns)
    }

    pub fn unique<T: IntoStrings>(columns: T) -> Self {
        Self::new(KeyType::Unique, columns)
    }

    pub fn foreign<C: IntoStrings, R: IntoStrings>(
        columns: C,
        ref_table: impl Into<String>,
        ref_columns: R,
    ) -> Self {
        let mut key = Self::new(KeyType::Foreign, columns);
        key.reference.table = ref_table.into();
        key.reference.columns = collect_into_strings(ref_columns);
        key
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn on_delete(mut self, action: impl Into<String>) -> Self {
        self.reference.on_delete = action.into();
        self
    }

    pub fn on_update(mut self, action: impl Into<String>) -> Self {
        self.reference.on_update = action.into();
        self
    }

    pub fn options(mut self, options: impl Into<String>) -> Self {
        self.options = options.into();
        self
    }
}

/// CREATE/ALTER TABLE 内的一项定义。
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Column(Column),
    Key(Key),
    Raw(String),
}

impl From<Column> for Definition {
    fn from(v: Column) -> Self {
        Self::Column(v)
    }
}

impl From<Key> for Definition {
    fn from(v: Key) -> Self {
        Self::Key(v)
    }
}

/// 表级 DDL。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub op: SchemaOp,
    pub name: String,
    /// CREATE 时输出 `IF NOT EXISTS`，DROP 时输出 `IF EXISTS`。
    pub optional: bool,
    pub definitions: Vec<Definition>,
    pub rename: Option<String>,
    /// 原样附加在语句末尾（engine、charset 等）。
    pub options: String,
}

impl Table {
    pub fn create(name: impl Into<String>) -> Self {
        Self {
            op: SchemaOp::Create,
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn alter(name: impl Into<String>) -> Self {
        Self {
            op: SchemaOp::Alter,
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn rename(name: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            op: SchemaOp::Rename,
            name: name.into(),
            rename: Some(to.into()),
            ..Self::default()
        }
    }

    pub fn drop(name: impl Into<String>) -> Self {
        Self {
            op: SchemaOp::Drop,
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn definition(mut self, def: impl Into<Definition>) -> Self {
        self.definitions.push(def.into());
        self
    }

    pub fn column(self, column: Column) -> Self {
        self.definition(column)
    }

    pub fn key(self, key: Key) -> Self {
        self.definition(key)
    }

    pub fn raw(self, sql: impl Into<String>) -> Self {
        self.definition(Definition::Raw(sql.into()))
    }

    pub fn options(mut self, options: impl Into<String>) -> Self {
        self.options = options.into();
        self
    }

    /// 按名字查找列定义。
    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.definitions.iter().find_map(|def| match def {
            Definition::Column(c) if c.name == name => Some(c),
            _ => None,
        })
    }
}

/// 索引 DDL。
#[derive(Debug, Clone, PartialEq)]
pub struct Index {
    pub op: SchemaOp,
    pub name: String,
    pub table: String,
    pub unique: bool,
    pub optional: bool,
    pub columns: Vec<String>,
    /// 部分索引条件，编译时内联为字面量。
    pub filter: Filter,
    pub options: String,
}

impl Index {
    pub fn create<T: IntoStrings>(
        name: impl Into<String>,
        table: impl Into<String>,
        columns: T,
    ) -> Self {
        Self {
            op: SchemaOp::Create,
            name: name.into(),
            table: table.into(),
            unique: false,
            optional: false,
            columns: collect_into_strings(columns),
            filter: Filter::None,
            options: String::new(),
        }
    }

    pub fn drop(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            op: SchemaOp::Drop,
            name: name.into(),
            table: table.into(),
            unique: false,
            optional: false,
            columns: Vec::new(),
            filter: Filter::None,
            options: String::new(),
        }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn options(mut self, options: impl Into<String>) -> Self {
        self.options = options.into();
        self
    }
}

/// 一次迁移步骤。
#[derive(Debug, Clone, PartialEq)]
pub enum Migration {
    Table(Table),
    Index(Index),
    Raw(String),
}

impl Migration {
    /// 编译为可直接执行的 DDL 文本；`Raw` 原样返回。
    pub fn build_with(&self, dialect: &Dialect) -> Result<String, BuildError> {
        match self {
            Self::Table(t) => Ok(t.build_with(dialect)?.0),
            Self::Index(i) => Ok(i.build_with(dialect)?.0),
            Self::Raw(sql) => Ok(sql.clone()),
        }
    }
}

impl From<Table> for Migration {
    fn from(v: Table) -> Self {
        Self::Table(v)
    }
}

impl From<Index> for Migration {
    fn from(v: Index) -> Self {
        Self::Index(v)
    }
}

/// 迁移累积器：按调用顺序记录每一步。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    pub migrations: Vec<Migration>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, migration: impl Into<Migration>) -> &mut Self {
        self.migrations.push(migration.into());
        self
    }

    /// 用闭包填充定义后记录一条 CREATE TABLE。
    pub fn create_table(
        &mut self,
        name: impl Into<String>,
        define: impl FnOnce(Table) -> Table,
    ) -> &mut Self {
        self.add(define(Table::create(name)))
    }

    pub fn alter_table(
        &mut self,
        name: impl Into<String>,
        define: impl FnOnce(Table) -> Table,
    ) -> &mut Self {
        self.add(define(Table::alter(name)))
    }

    pub fn rename_table(&mut self, name: impl Into<String>, to: impl Into<String>) -> &mut Self {
        self.add(Table::rename(name, to))
    }

    pub fn drop_table(&mut self, name: impl Into<String>) -> &mut Self {
        self.add(Table::drop(name))
    }

    pub fn create_index<T: IntoStrings>(
        &mut self,
        table: impl Into<String>,
        name: impl Into<String>,
        columns: T,
    ) -> &mut Self {
        self.add(Index::create(name, table, columns))
    }

    pub fn drop_index(&mut self, table: impl Into<String>, name: impl Into<String>) -> &mut Self {
        self.add(Index::drop(name, table))
    }

    pub fn exec(&mut self, sql: impl Into<String>) -> &mut Self {
        self.add(Migration::Raw(sql.into()))
    }

    /// 依次编译所有迁移。
    pub fn build_with(&self, dialect: &Dialect) -> Result<Vec<String>, BuildError> {
        self.migrations
            .iter()
            .map(|m| m.build_with(dialect))
            .collect()
    }
}
