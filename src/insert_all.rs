//! InsertAll：多行 INSERT，以及执行后的主键回填。

use crate::args::Arg;
use crate::buffer::{BuildError, Buffer};
use crate::builder::Builder;
use crate::macros::{IntoStrings, collect_into_strings};
use crate::mutate::Mutates;
use crate::on_conflict::OnConflict;

/// 多行插入：所有行共享同一组字段，缺失的字段写 `DEFAULT`。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InsertAll {
    pub table: String,
    pub primary: String,
    pub fields: Vec<String>,
    pub rows: Vec<Mutates>,
    pub on_conflict: Option<OnConflict>,
}

impl InsertAll {
    pub fn new<T: IntoStrings>(table: impl Into<String>, fields: T, rows: Vec<Mutates>) -> Self {
        Self {
            table: table.into(),
            fields: collect_into_strings(fields),
            rows,
            ..Self::default()
        }
    }

    pub fn primary(mut self, field: impl Into<String>) -> Self {
        self.primary = field.into();
        self
    }

    pub fn on_conflict(mut self, on_conflict: OnConflict) -> Self {
        self.on_conflict = Some(on_conflict);
        self
    }
}

impl Builder for InsertAll {
    fn write_to(&self, buf: &mut Buffer<'_>) -> Result<(), BuildError> {
        let dialect = buf.dialect();

        buf.write_str("INSERT INTO ");
        buf.write_escape(&self.table);
        buf.write_str(" (");
        buf.write_escape_list(&self.fields, ",");
        buf.write_str(") VALUES ");

        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                buf.write_char(',');
            }
            buf.write_char('(');
            for (j, field) in self.fields.iter().enumerate() {
                if j > 0 {
                    buf.write_char(',');
                }
                match row.set_value(field) {
                    Some(value) => buf.write_value(value)?,
                    None => buf.write_str("DEFAULT"),
                }
            }
            buf.write_char(')');
        }

        if let Some(on_conflict) = &self.on_conflict {
            let fields: Vec<&str> = self.fields.iter().map(String::as_str).collect();
            on_conflict.write(buf, &fields)?;
        }

        if dialect.returning_primary && !self.primary.is_empty() {
            buf.write_str(" RETURNING ");
            buf.write_escape(&self.primary);
        }

        buf.write_char(';');
        Ok(())
    }
}

/// 根据驱动返回的 last insert id 推算每一行的主键。
///
/// 显式设置了主键的行使用该值，并把基数重置为它（后续生成的行从它往后数）；
/// 其余行依次取 `base + counter * step`。`step` 为负时先把基数移到
/// `last_insert_id + (n-1) * step` 再按正步长计算。
pub fn generated_ids(last_insert_id: i64, step: i64, primary: &str, rows: &[Mutates]) -> Vec<Arg> {
    let mut base = last_insert_id;
    let mut step = step;
    if step < 0 {
        let n = rows.len().saturating_sub(1) as i64;
        base += n * step;
        step = -step;
    }

    let mut counter = 0i64;
    rows.iter()
        .map(|row| match row.set_value(primary) {
            Some(explicit) => {
                base = explicit.as_value().and_then(|v| v.as_i64()).unwrap_or(0);
                counter = 1;
                explicit.clone()
            }
            None => {
                let id = base + counter * step;
                counter += 1;
                Arg::from(id)
            }
        })
        .collect()
}
