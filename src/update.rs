//! Update：UPDATE 语句。

use crate::buffer::{BuildError, Buffer};
use crate::builder::Builder;
use crate::filter::Filter;
use crate::mutate::{Mutate, Mutates};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Update {
    pub table: String,
    /// 主键字段永远不会出现在 SET 中。
    pub primary: String,
    pub mutates: Mutates,
    pub filter: Filter,
}

impl Update {
    pub fn new(table: impl Into<String>, mutates: Mutates) -> Self {
        Self {
            table: table.into(),
            mutates,
            ..Self::default()
        }
    }

    pub fn primary(mut self, field: impl Into<String>) -> Self {
        self.primary = field.into();
        self
    }

    pub fn where_(mut self, filter: Filter) -> Self {
        self.filter = std::mem::take(&mut self.filter).and_with(filter);
        self
    }
}

impl Builder for Update {
    fn write_to(&self, buf: &mut Buffer<'_>) -> Result<(), BuildError> {
        buf.write_str("UPDATE ");
        buf.write_escape(&self.table);
        buf.write_str(" SET ");

        let mut n = 0;
        for mutate in &self.mutates {
            if !self.primary.is_empty() && mutate.key() == self.primary {
                continue;
            }
            if n > 0 {
                buf.write_char(',');
            }
            n += 1;

            match mutate {
                Mutate::Set { field, value } => {
                    buf.write_escape(field);
                    buf.write_char('=');
                    buf.write_value(value)?;
                }
                Mutate::Inc { field, delta } => {
                    buf.write_escape(field);
                    buf.write_char('=');
                    buf.write_escape(field);
                    buf.write_char('+');
                    buf.write_value(delta)?;
                }
                Mutate::Fragment { sql, args } => {
                    buf.write_str(sql);
                    buf.add_arguments(args);
                }
            }
        }

        if !self.filter.is_none() {
            buf.write_str(" WHERE ");
            self.filter.write(buf)?;
        }

        buf.write_char(';');
        Ok(())
    }
}
