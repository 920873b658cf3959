//! Adapter：把编译结果交给外部执行器。
//!
//! 本模块不持有连接，也不处理事务；执行器负责真正的 I/O。

use crate::args::Arg;
use crate::buffer::BuildError;
use crate::builder::Builder;
use crate::delete::Delete;
use crate::dialect::Dialect;
use crate::insert::Insert;
use crate::insert_all::{InsertAll, generated_ids};
use crate::query::Query;
use crate::schema::Migration;
use crate::update::Update;
use crate::value::SqlValue;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// 查询结果的一行。
pub type Row = Vec<SqlValue>;

/// 非查询语句的执行结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecResult {
    pub last_insert_id: i64,
    pub rows_affected: u64,
}

/// 语句执行器（连接或事务）。
pub trait Executor {
    type Error: std::error::Error + 'static;

    fn exec(&mut self, statement: &str, args: &[Arg]) -> Result<ExecResult, Self::Error>;

    fn query(&mut self, statement: &str, args: &[Arg]) -> Result<Vec<Row>, Self::Error>;
}

/// 把驱动错误翻译为领域错误。
pub type ErrorMapper<E> = Arc<dyn Fn(E) -> E + Send + Sync>;

/// 报告当前连接的自增步长，多行插入回填主键时使用。
pub type IncrementFunc<X> = Arc<dyn Fn(&X) -> i64 + Send + Sync>;

#[derive(Debug, Error)]
pub enum AdapterError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error("sql: execute failed: {0}")]
    Execute(#[source] E),
}

pub struct Adapter<X: Executor> {
    dialect: Dialect,
    executor: X,
    error_mapper: Option<ErrorMapper<X::Error>>,
    increment: Option<IncrementFunc<X>>,
}

impl<X: Executor + fmt::Debug> fmt::Debug for Adapter<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter")
            .field("dialect", &self.dialect)
            .field("executor", &self.executor)
            .finish_non_exhaustive()
    }
}

impl<X: Executor> Adapter<X> {
    pub fn new(dialect: Dialect, executor: X) -> Self {
        Self {
            dialect,
            executor,
            error_mapper: None,
            increment: None,
        }
    }

    pub fn with_error_mapper(mut self, mapper: impl Fn(X::Error) -> X::Error + Send + Sync + 'static) -> Self {
        self.error_mapper = Some(Arc::new(mapper));
        self
    }

    pub fn with_increment_func(mut self, func: impl Fn(&X) -> i64 + Send + Sync + 'static) -> Self {
        self.increment = Some(Arc::new(func));
        self
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    pub fn executor(&self) -> &X {
        &self.executor
    }

    pub fn executor_mut(&mut self) -> &mut X {
        &mut self.executor
    }

    pub fn into_executor(self) -> X {
        self.executor
    }

    pub fn query(&mut self, query: &Query) -> Result<Vec<Row>, AdapterError<X::Error>> {
        let (statement, args) = query.build_with(&self.dialect)?;
        self.do_query(&statement, &args)
    }

    /// 返回第一行第一列；没有结果时为 0。
    pub fn aggregate(
        &mut self,
        query: &Query,
        mode: &str,
        field: &str,
    ) -> Result<i64, AdapterError<X::Error>> {
        let rows = self.query(&query.aggregate(mode, field))?;
        Ok(first_column(&rows).and_then(SqlValue::as_i64).unwrap_or(0))
    }

    /// 返回新行主键：方言支持 RETURNING 时取返回值，否则取 last insert id。
    pub fn insert(&mut self, insert: &Insert) -> Result<Arg, AdapterError<X::Error>> {
        let (statement, args) = insert.build_with(&self.dialect)?;

        if self.dialect.returning_primary && !insert.primary.is_empty() {
            let rows = self.do_query(&statement, &args)?;
            return Ok(first_column(&rows).cloned().map_or(Arg::from(()), Arg::from));
        }

        let result = self.do_exec(&statement, &args)?;
        Ok(Arg::from(result.last_insert_id))
    }

    /// 返回每一行的主键，顺序与输入一致。
    pub fn insert_all(&mut self, insert: &InsertAll) -> Result<Vec<Arg>, AdapterError<X::Error>> {
        let (statement, args) = insert.build_with(&self.dialect)?;

        if self.dialect.returning_primary && !insert.primary.is_empty() {
            let rows = self.do_query(&statement, &args)?;
            return Ok(rows
                .into_iter()
                .map(|row| row.into_iter().next().map_or(Arg::from(()), Arg::from))
                .collect());
        }

        let result = self.do_exec(&statement, &args)?;
        let step = match &self.increment {
            Some(func) => func(&self.executor),
            None => 1,
        };
        Ok(generated_ids(
            result.last_insert_id,
            step,
            &insert.primary,
            &insert.rows,
        ))
    }

    /// 返回受影响的行数。
    pub fn update(&mut self, update: &Update) -> Result<u64, AdapterError<X::Error>> {
        let (statement, args) = update.build_with(&self.dialect)?;
        Ok(self.do_exec(&statement, &args)?.rows_affected)
    }

    pub fn delete(&mut self, delete: &Delete) -> Result<u64, AdapterError<X::Error>> {
        let (statement, args) = delete.build_with(&self.dialect)?;
        Ok(self.do_exec(&statement, &args)?.rows_affected)
    }

    /// 执行一步迁移。
    pub fn apply(&mut self, migration: &Migration) -> Result<(), AdapterError<X::Error>> {
        let statement = migration.build_with(&self.dialect)?;
        self.do_exec(&statement, &[])?;
        Ok(())
    }

    fn do_exec(&mut self, statement: &str, args: &[Arg]) -> Result<ExecResult, AdapterError<X::Error>> {
        tracing::debug!(statement, args = args.len(), "exec");
        self.executor
            .exec(statement, args)
            .map_err(|e| map_error(&self.error_mapper, e))
    }

    fn do_query(&mut self, statement: &str, args: &[Arg]) -> Result<Vec<Row>, AdapterError<X::Error>> {
        tracing::debug!(statement, args = args.len(), "query");
        self.executor
            .query(statement, args)
            .map_err(|e| map_error(&self.error_mapper, e))
    }
}

fn map_error<E: std::error::Error + 'static>(
    mapper: &Option<ErrorMapper<E>>,
    err: E,
) -> AdapterError<E> {
    match mapper {
        Some(mapper) => AdapterError::Execute(mapper(err)),
        None => AdapterError::Execute(err),
    }
}

fn first_column(rows: &[Row]) -> Option<&SqlValue> {
    rows.first().and_then(|row| row.first())
}
