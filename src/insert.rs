//! Insert：单行 INSERT 语句。

use crate::buffer::{BuildError, Buffer};
use crate::builder::Builder;
use crate::mutate::{Mutate, Mutates};
use crate::on_conflict::OnConflict;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Insert {
    pub table: String,
    /// 主键字段，方言支持时用于 `RETURNING`。
    pub primary: String,
    pub mutates: Mutates,
    pub on_conflict: Option<OnConflict>,
}

impl Insert {
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

    pub fn on_conflict(mut self, on_conflict: OnConflict) -> Self {
        self.on_conflict = Some(on_conflict);
        self
    }
}

impl Builder for Insert {
    fn write_to(&self, buf: &mut Buffer<'_>) -> Result<(), BuildError> {
        let dialect = buf.dialect();

        buf.write_str("INSERT INTO ");
        buf.write_escape(&self.table);

        let mut fields = Vec::with_capacity(self.mutates.len());
        let mut values = Vec::with_capacity(self.mutates.len());
        for mutate in &self.mutates {
            match mutate {
                Mutate::Set { field, value } => {
                    fields.push(field.as_str());
                    values.push(value);
                }
                other => {
                    tracing::warn!(table = %self.table, key = other.key(), "insert skips non-set mutate");
                }
            }
        }

        if fields.is_empty() && dialect.insert_default_values {
            buf.write_str(" DEFAULT VALUES");
        } else {
            buf.write_str(" (");
            for (i, field) in fields.iter().enumerate() {
                if i > 0 {
                    buf.write_char(',');
                }
                buf.write_escape(field);
            }
            buf.write_str(") VALUES (");
            for (i, value) in values.into_iter().enumerate() {
                if i > 0 {
                    buf.write_char(',');
                }
                buf.write_value(value)?;
            }
            buf.write_char(')');
        }

        if let Some(on_conflict) = &self.on_conflict {
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
