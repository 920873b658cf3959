//! Query：SELECT 语句的 AST 与编译。
//!
//! 子句顺序固定：SELECT、FROM、JOIN、WHERE、GROUP BY / HAVING、ORDER BY、LIMIT / OFFSET、锁。
//! 设置了原生 SQL（[`Query::sql`]）时其余字段全部忽略。

use crate::args::Arg;
use crate::buffer::{BuildError, Buffer};
use crate::builder::Builder;
use crate::filter::Filter;
use crate::macros::{IntoStrings, collect_into_strings};

/// 单个 JOIN。
///
/// `table` 为空时是原生 JOIN：`mode` 即完整的 JOIN 片段，`arguments` 为其参数。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JoinQuery {
    pub mode: String,
    pub table: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub filter: Filter,
    pub arguments: Vec<Arg>,
}

impl JoinQuery {
    pub fn new(mode: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            mode: mode.into(),
            table: table.into(),
            ..Self::default()
        }
    }

    pub fn inner(table: impl Into<String>) -> Self {
        Self::new("JOIN", table)
    }

    pub fn left(table: impl Into<String>) -> Self {
        Self::new("LEFT JOIN", table)
    }

    pub fn right(table: impl Into<String>) -> Self {
        Self::new("RIGHT JOIN", table)
    }

    pub fn full(table: impl Into<String>) -> Self {
        Self::new("FULL JOIN", table)
    }

    /// 原生 JOIN 片段。
    pub fn fragment(sql: impl Into<String>, args: Vec<Arg>) -> Self {
        Self {
            mode: sql.into(),
            arguments: args,
            ..Self::default()
        }
    }

    /// 显式指定连接列。
    pub fn on(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self.to = Some(to.into());
        self
    }

    /// 追加在 ON 条件之后的额外条件。
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = self.filter.and_with(filter);
        self
    }

    fn write(&self, buf: &mut Buffer<'_>, source: &str) -> Result<(), BuildError> {
        buf.write_char(' ');
        buf.write_str(&self.mode);

        if !self.table.is_empty() {
            buf.write_char(' ');
            buf.write_escape(&self.table);
            buf.write_str(" ON ");
            match (&self.from, &self.to) {
                (Some(from), Some(to)) => {
                    buf.write_escape(from);
                    buf.write_char('=');
                    buf.write_escape(to);
                }
                _ => {
                    // 按 `<表>.<单数>_id = <关联表>.id` 推断
                    let singular = self.table.strip_suffix('s').unwrap_or(&self.table);
                    buf.write_escape(&format!("{source}.{singular}_id"));
                    buf.write_char('=');
                    buf.write_escape(&format!("{}.id", self.table));
                }
            }

            if !self.filter.is_none() {
                buf.write_str(" AND ");
                self.filter.write(buf)?;
            }
        }

        buf.add_arguments(&self.arguments);
        Ok(())
    }
}

/// ORDER BY 的一项。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortQuery {
    pub field: String,
    pub asc: bool,
}

impl SortQuery {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            asc: true,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            asc: false,
        }
    }
}

/// 原生 SQL。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SqlQuery {
    pub statement: String,
    pub values: Vec<Arg>,
}

/// SELECT 查询。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    pub fields: Vec<String>,
    pub distinct: bool,
    pub table: String,
    pub joins: Vec<JoinQuery>,
    pub where_: Filter,
    pub group_fields: Vec<String>,
    pub group_filter: Filter,
    pub sort: Vec<SortQuery>,
    /// 0 表示不限制。
    pub limit: u64,
    pub offset: u64,
    pub lock: Option<String>,
    pub sql: Option<SqlQuery>,
}

impl Query {
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// 以原生 SQL 构造，编译时原样输出。
    pub fn sql(statement: impl Into<String>, values: Vec<Arg>) -> Self {
        Self {
            sql: Some(SqlQuery {
                statement: statement.into(),
                values,
            }),
            ..Self::default()
        }
    }

    pub fn select<T: IntoStrings>(mut self, fields: T) -> Self {
        self.fields = collect_into_strings(fields);
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn join(self, table: impl Into<String>) -> Self {
        self.join_query(JoinQuery::inner(table))
    }

    pub fn join_on(
        self,
        table: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        self.join_query(JoinQuery::inner(table).on(from, to))
    }

    pub fn join_fragment(self, sql: impl Into<String>, args: Vec<Arg>) -> Self {
        self.join_query(JoinQuery::fragment(sql, args))
    }

    pub fn join_query(mut self, join: JoinQuery) -> Self {
        self.joins.push(join);
        self
    }

    /// 多次调用以 AND 合并。
    pub fn where_(mut self, filter: Filter) -> Self {
        self.where_ = std::mem::take(&mut self.where_).and_with(filter);
        self
    }

    pub fn group<T: IntoStrings>(mut self, fields: T) -> Self {
        self.group_fields = collect_into_strings(fields);
        self
    }

    pub fn having(mut self, filter: Filter) -> Self {
        self.group_filter = std::mem::take(&mut self.group_filter).and_with(filter);
        self
    }

    pub fn sort_asc(mut self, field: impl Into<String>) -> Self {
        self.sort.push(SortQuery::asc(field));
        self
    }

    pub fn sort_desc(mut self, field: impl Into<String>) -> Self {
        self.sort.push(SortQuery::desc(field));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    pub fn lock(mut self, lock: impl Into<String>) -> Self {
        self.lock = Some(lock.into());
        self
    }

    pub fn for_update(self) -> Self {
        self.lock("FOR UPDATE")
    }

    /// 聚合查询：选择 `<MODE>(<field>) AS result` 以及分组字段。
    pub fn aggregate(&self, mode: &str, field: &str) -> Query {
        let mut fields = Vec::with_capacity(self.group_fields.len() + 1);
        fields.push(format!("^{mode}({field}) AS result"));
        fields.extend(self.group_fields.iter().cloned());
        Query {
            fields,
            ..self.clone()
        }
    }

    /// 写出不带结尾 `;` 的语句，子查询也走这里。
    pub fn write_query(&self, buf: &mut Buffer<'_>) -> Result<(), BuildError> {
        if let Some(sql) = &self.sql
            && !sql.statement.is_empty()
        {
            buf.write_str(&sql.statement);
            buf.add_arguments(&sql.values);
            return Ok(());
        }

        self.write_select(buf);

        buf.write_str(" FROM ");
        buf.write_escape(&self.table);

        for join in &self.joins {
            join.write(buf, &self.table)?;
        }

        if !self.where_.is_none() {
            buf.write_str(" WHERE ");
            self.where_.write(buf)?;
        }

        if !self.group_fields.is_empty() {
            buf.write_str(" GROUP BY ");
            buf.write_escape_list(&self.group_fields, ",");

            if !self.group_filter.is_none() {
                buf.write_str(" HAVING ");
                self.group_filter.write(buf)?;
            }
        }

        self.write_order_by(buf);

        if self.limit > 0 {
            buf.write_str(" LIMIT ");
            buf.write_str(&self.limit.to_string());

            if self.offset > 0 {
                buf.write_str(" OFFSET ");
                buf.write_str(&self.offset.to_string());
            }
        }

        if let Some(lock) = &self.lock
            && !lock.is_empty()
        {
            buf.write_char(' ');
            buf.write_str(lock);
        }

        Ok(())
    }

    fn write_select(&self, buf: &mut Buffer<'_>) {
        if self.fields.is_empty() {
            buf.write_str(if self.distinct {
                "SELECT DISTINCT *"
            } else {
                "SELECT *"
            });
            return;
        }

        buf.write_str("SELECT ");
        if self.distinct {
            buf.write_str("DISTINCT ");
        }
        buf.write_escape_list(&self.fields, ",");
    }

    fn write_order_by(&self, buf: &mut Buffer<'_>) {
        if self.sort.is_empty() {
            return;
        }

        buf.write_str(" ORDER BY ");
        for (i, order) in self.sort.iter().enumerate() {
            if i > 0 {
                buf.write_char(',');
            }
            buf.write_escape(&order.field);
            buf.write_str(if order.asc { " ASC" } else { " DESC" });
        }
    }
}

impl Builder for Query {
    fn write_to(&self, buf: &mut Buffer<'_>) -> Result<(), BuildError> {
        self.write_query(buf)?;
        buf.write_char(';');
        Ok(())
    }
}
