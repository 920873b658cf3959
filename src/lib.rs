//! halo-rel：关系映射工具的 SQL 生成核心。
//!
//! 把与方言无关的查询、变更和 DDL 结构编译成 `(sql, args)`，
//! 方言差异全部由 [`Dialect`] 配置表达。

pub mod adapter;
pub mod args;
pub mod buffer;
#[cfg(test)]
mod buffer_tests;
pub mod builder;
pub mod column_mapper;
pub mod delete;
pub mod dialect;
pub mod filter;
pub mod flavor;
#[cfg(test)]
mod flavor_tests;
pub mod index;
#[cfg(test)]
mod index_tests;
pub mod insert;
pub mod insert_all;
pub mod macros;
pub use crate::macros::*;
pub mod mutate;
pub mod name;
pub mod on_conflict;
pub mod parser;
pub mod query;
#[cfg(test)]
mod query_tests;
pub mod quote;
pub mod schema;
pub mod table;
pub mod update;
#[cfg(test)]
mod update_delete_tests;
pub mod value;
pub mod valuer;

pub use crate::adapter::{
    Adapter, AdapterError, ErrorMapper, ExecResult, Executor, IncrementFunc, Row,
};
pub use crate::args::{Arg, args};
pub use crate::buffer::{BuildError, Buffer};
pub use crate::builder::Builder;
pub use crate::column_mapper::{
    ColumnMapperFunc, ColumnSpec, mysql_column_mapper, postgres_column_mapper,
    sqlite_column_mapper, sqlserver_column_mapper,
};
pub use crate::delete::Delete;
pub use crate::dialect::{Dialect, OnConflictSyntax};
pub use crate::filter::{CompareOp, Filter, Operand, SubQuery};
pub use crate::flavor::{
    DefaultFlavorGuard, Flavor, default_flavor, set_default_flavor, set_default_flavor_scoped,
};
pub use crate::insert::Insert;
pub use crate::insert_all::{InsertAll, generated_ids};
pub use crate::mutate::{Mutate, Mutates};
pub use crate::name::{Name, NameCache, UNESCAPE_CHARACTER};
pub use crate::on_conflict::{ConflictAction, OnConflict};
pub use crate::parser::{ParseError, SchemaParser};
pub use crate::query::{JoinQuery, Query, SortQuery, SqlQuery};
pub use crate::quote::{Literal, Quoter, SqlQuoter};
pub use crate::schema::{
    Column, ColumnType, Definition, ForeignKeyReference, Index, Key, KeyType, Migration, Schema,
    SchemaOp, Table,
};
pub use crate::value::{SqlDateTime, SqlValue};
pub use crate::valuer::{SqlValuer, ValuerError};
