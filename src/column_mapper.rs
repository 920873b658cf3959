//! Column mapper：把方言无关的 [`ColumnType`] 映射为具体 SQL 类型名与尺寸。

use crate::schema::{Column, ColumnType};
use std::sync::Arc;

/// 映射结果：`sql_type(m[,n])`；`m == 0` 时不输出括号，`n == 0` 时只输出 `m`。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnSpec {
    pub sql_type: String,
    pub m: u32,
    pub n: u32,
}

impl ColumnSpec {
    pub fn new(sql_type: impl Into<String>) -> Self {
        Self {
            sql_type: sql_type.into(),
            m: 0,
            n: 0,
        }
    }

    pub fn sized(sql_type: impl Into<String>, m: u32, n: u32) -> Self {
        Self {
            sql_type: sql_type.into(),
            m,
            n,
        }
    }
}

/// 列映射函数类型。
pub type ColumnMapperFunc = Arc<dyn Fn(&Column) -> ColumnSpec + Send + Sync + 'static>;

fn custom_or_empty(column: &Column) -> ColumnSpec {
    match &column.column_type {
        Some(ColumnType::Custom(name)) => ColumnSpec::sized(name.clone(), column.limit, 0),
        _ => ColumnSpec::new(""),
    }
}

/// MySQL 列映射。
pub fn mysql_column_mapper(column: &Column) -> ColumnSpec {
    let Some(ty) = &column.column_type else {
        return ColumnSpec::new("");
    };
    match ty {
        ColumnType::Id => ColumnSpec::new("INT UNSIGNED AUTO_INCREMENT PRIMARY KEY"),
        ColumnType::BigId => ColumnSpec::new("BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY"),
        ColumnType::Bool => ColumnSpec::new("BOOL"),
        ColumnType::SmallInt => ColumnSpec::sized("SMALLINT", column.limit, 0),
        ColumnType::Int => ColumnSpec::sized("INT", column.limit, 0),
        ColumnType::BigInt => ColumnSpec::sized("BIGINT", column.limit, 0),
        ColumnType::Float => ColumnSpec::sized("FLOAT", column.precision, 0),
        ColumnType::Decimal => ColumnSpec::sized("DECIMAL", column.precision, column.scale),
        ColumnType::String => ColumnSpec::sized("VARCHAR", default_limit(column.limit), 0),
        ColumnType::Text => ColumnSpec::sized("TEXT", column.limit, 0),
        ColumnType::Json => ColumnSpec::new("JSON"),
        ColumnType::Date => ColumnSpec::new("DATE"),
        ColumnType::DateTime => ColumnSpec::new("DATETIME"),
        ColumnType::Time => ColumnSpec::new("TIME"),
        ColumnType::Timestamp => ColumnSpec::new("TIMESTAMP"),
        ColumnType::Custom(_) => custom_or_empty(column),
    }
}

/// PostgreSQL 列映射：没有 UNSIGNED，整型不带显示宽度。
pub fn postgres_column_mapper(column: &Column) -> ColumnSpec {
    let Some(ty) = &column.column_type else {
        return ColumnSpec::new("");
    };
    match ty {
        ColumnType::Id => ColumnSpec::new("SERIAL NOT NULL PRIMARY KEY"),
        ColumnType::BigId => ColumnSpec::new("BIGSERIAL NOT NULL PRIMARY KEY"),
        ColumnType::Bool => ColumnSpec::new("BOOLEAN"),
        ColumnType::SmallInt => ColumnSpec::new("SMALLINT"),
        ColumnType::Int => ColumnSpec::new("INTEGER"),
        ColumnType::BigInt => ColumnSpec::new("BIGINT"),
        ColumnType::Float => ColumnSpec::new("REAL"),
        ColumnType::Decimal => ColumnSpec::sized("NUMERIC", column.precision, column.scale),
        ColumnType::String => ColumnSpec::sized("VARCHAR", default_limit(column.limit), 0),
        ColumnType::Text => ColumnSpec::new("TEXT"),
        ColumnType::Json => ColumnSpec::new("JSONB"),
        ColumnType::Date => ColumnSpec::new("DATE"),
        ColumnType::DateTime => ColumnSpec::new("TIMESTAMPTZ"),
        ColumnType::Time => ColumnSpec::new("TIME"),
        ColumnType::Timestamp => ColumnSpec::new("TIMESTAMP"),
        ColumnType::Custom(_) => custom_or_empty(column),
    }
}

/// SQLite 列映射：按类型亲和性收敛。
pub fn sqlite_column_mapper(column: &Column) -> ColumnSpec {
    let Some(ty) = &column.column_type else {
        return ColumnSpec::new("");
    };
    match ty {
        ColumnType::Id | ColumnType::BigId => {
            ColumnSpec::new("INTEGER PRIMARY KEY AUTOINCREMENT")
        }
        ColumnType::Bool => ColumnSpec::new("BOOLEAN"),
        ColumnType::SmallInt | ColumnType::Int | ColumnType::BigInt => {
            ColumnSpec::sized("INTEGER", column.limit, 0)
        }
        ColumnType::Float => ColumnSpec::sized("REAL", column.precision, 0),
        ColumnType::Decimal => ColumnSpec::sized("DECIMAL", column.precision, column.scale),
        ColumnType::String => ColumnSpec::sized("VARCHAR", default_limit(column.limit), 0),
        ColumnType::Text | ColumnType::Json => ColumnSpec::new("TEXT"),
        ColumnType::Date => ColumnSpec::new("DATE"),
        ColumnType::DateTime => ColumnSpec::new("DATETIME"),
        ColumnType::Time => ColumnSpec::new("TIME"),
        ColumnType::Timestamp => ColumnSpec::new("TIMESTAMP"),
        ColumnType::Custom(_) => custom_or_empty(column),
    }
}

/// SQL Server 列映射。
pub fn sqlserver_column_mapper(column: &Column) -> ColumnSpec {
    let Some(ty) = &column.column_type else {
        return ColumnSpec::new("");
    };
    match ty {
        ColumnType::Id => ColumnSpec::new("INT IDENTITY(1,1) PRIMARY KEY"),
        ColumnType::BigId => ColumnSpec::new("BIGINT IDENTITY(1,1) PRIMARY KEY"),
        ColumnType::Bool => ColumnSpec::new("BIT"),
        ColumnType::SmallInt => ColumnSpec::new("SMALLINT"),
        ColumnType::Int => ColumnSpec::new("INT"),
        ColumnType::BigInt => ColumnSpec::new("BIGINT"),
        ColumnType::Float => ColumnSpec::sized("FLOAT", column.precision, 0),
        ColumnType::Decimal => ColumnSpec::sized("DECIMAL", column.precision, column.scale),
        ColumnType::String => ColumnSpec::sized("NVARCHAR", default_limit(column.limit), 0),
        ColumnType::Text => ColumnSpec::new("NVARCHAR(MAX)"),
        ColumnType::Json => ColumnSpec::new("NVARCHAR(MAX)"),
        ColumnType::Date => ColumnSpec::new("DATE"),
        ColumnType::DateTime => ColumnSpec::new("DATETIMEOFFSET"),
        ColumnType::Time => ColumnSpec::new("TIME"),
        ColumnType::Timestamp => ColumnSpec::new("DATETIME2"),
        ColumnType::Custom(_) => custom_or_empty(column),
    }
}

fn default_limit(limit: u32) -> u32 {
    if limit == 0 { 255 } else { limit }
}
