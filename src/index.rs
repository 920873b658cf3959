//! Index DDL 编译：CREATE / DROP INDEX。

use crate::buffer::{BuildError, Buffer};
use crate::builder::Builder;
use crate::schema::{Index, SchemaOp};
use crate::table::write_options;

impl Builder for Index {
    fn write_to(&self, buf: &mut Buffer<'_>) -> Result<(), BuildError> {
        match self.op {
            SchemaOp::Drop => write_drop_index(buf, self),
            _ => write_create_index(buf, self)?,
        }

        write_options(buf, &self.options);
        buf.write_char(';');
        Ok(())
    }

    fn inline_values(&self) -> bool {
        true
    }
}

fn write_create_index(buf: &mut Buffer<'_>, index: &Index) -> Result<(), BuildError> {
    buf.write_str("CREATE ");
    if index.unique {
        buf.write_str("UNIQUE ");
    }
    buf.write_str("INDEX ");
    if index.optional {
        buf.write_str("IF NOT EXISTS ");
    }

    buf.write_escape(&index.name);
    buf.write_str(" ON ");
    buf.write_escape(&index.table);
    buf.write_str(" (");
    buf.write_escape_list(&index.columns, ", ");
    buf.write_char(')');

    // 部分索引：DDL 没有绑定参数，条件中的值按字面量内联
    if !index.filter.is_none() {
        buf.write_str(" WHERE ");
        index.filter.write(buf)?;
    }
    Ok(())
}

fn write_drop_index(buf: &mut Buffer<'_>, index: &Index) {
    buf.write_str("DROP INDEX ");
    if index.optional {
        buf.write_str("IF EXISTS ");
    }
    buf.write_escape(&index.name);

    if buf.dialect().drop_index_on_table {
        buf.write_str(" ON ");
        buf.write_escape(&index.table);
    }
}
