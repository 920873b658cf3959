//! Table DDL 编译：CREATE / ALTER / RENAME / DROP TABLE。
//!
//! ALTER TABLE 为每个定义单独生成一条以 `;` 结尾的语句。

use crate::buffer::{BuildError, Buffer};
use crate::builder::Builder;
use crate::quote::Literal;
use crate::schema::{Column, Definition, Key, KeyType, SchemaOp, Table};

impl Builder for Table {
    fn write_to(&self, buf: &mut Buffer<'_>) -> Result<(), BuildError> {
        match self.op {
            SchemaOp::Create => write_create_table(buf, self),
            SchemaOp::Alter => write_alter_table(buf, self),
            SchemaOp::Rename => write_rename_table(buf, self),
            SchemaOp::Drop => write_drop_table(buf, self),
        }
        Ok(())
    }

    fn inline_values(&self) -> bool {
        true
    }
}

fn write_create_table(buf: &mut Buffer<'_>, table: &Table) {
    buf.write_str("CREATE TABLE ");
    if table.optional {
        buf.write_str("IF NOT EXISTS ");
    }
    buf.write_escape(&table.name);
    buf.write_str(" (");

    for (i, def) in table.definitions.iter().enumerate() {
        if i > 0 {
            buf.write_str(", ");
        }
        match def {
            Definition::Column(column) => write_column(buf, column),
            Definition::Key(key) => write_key(buf, key),
            Definition::Raw(sql) => buf.write_str(sql),
        }
    }

    buf.write_char(')');
    write_options(buf, &table.options);
    buf.write_char(';');
}

fn write_alter_table(buf: &mut Buffer<'_>, table: &Table) {
    for def in &table.definitions {
        if !alter_supported(def) {
            tracing::warn!(table = %table.name, "alter table definition not supported, skipped");
            continue;
        }

        buf.write_str("ALTER TABLE ");
        buf.write_escape(&table.name);
        buf.write_char(' ');

        match def {
            Definition::Column(column) => match column.op {
                SchemaOp::Create => {
                    buf.write_str("ADD COLUMN ");
                    write_column(buf, column);
                }
                SchemaOp::Rename => {
                    buf.write_str("RENAME COLUMN ");
                    buf.write_escape(&column.name);
                    buf.write_str(" TO ");
                    buf.write_escape(column.rename.as_deref().unwrap_or_default());
                }
                SchemaOp::Drop => {
                    buf.write_str("DROP COLUMN ");
                    buf.write_escape(&column.name);
                }
                SchemaOp::Alter => {}
            },
            Definition::Key(key) => {
                buf.write_str("ADD ");
                write_key(buf, key);
            }
            Definition::Raw(sql) => buf.write_str(sql),
        }

        write_options(buf, &table.options);
        buf.write_char(';');
    }
}

fn alter_supported(def: &Definition) -> bool {
    match def {
        // 修改列类型/属性尚未支持
        Definition::Column(column) => column.op != SchemaOp::Alter,
        // TODO: RENAME / DROP 键需要按方言区分 CONSTRAINT 与 INDEX 语法
        Definition::Key(key) => key.op == SchemaOp::Create,
        Definition::Raw(_) => true,
    }
}

fn write_rename_table(buf: &mut Buffer<'_>, table: &Table) {
    buf.write_str("ALTER TABLE ");
    buf.write_escape(&table.name);
    buf.write_str(" RENAME TO ");
    buf.write_escape(table.rename.as_deref().unwrap_or_default());
    buf.write_char(';');
}

fn write_drop_table(buf: &mut Buffer<'_>, table: &Table) {
    buf.write_str("DROP TABLE ");
    if table.optional {
        buf.write_str("IF EXISTS ");
    }
    buf.write_escape(&table.name);
    buf.write_char(';');
}

/// 列定义：`name type(m,n) [UNSIGNED] [UNIQUE] [NOT NULL] [DEFAULT v] [options]`。
fn write_column(buf: &mut Buffer<'_>, column: &Column) {
    let spec = buf.dialect().map_column(column);

    buf.write_escape(&column.name);
    buf.write_char(' ');
    buf.write_str(&spec.sql_type);

    if spec.m != 0 {
        buf.write_char('(');
        buf.write_str(&spec.m.to_string());
        if spec.n != 0 {
            buf.write_char(',');
            buf.write_str(&spec.n.to_string());
        }
        buf.write_char(')');
    }

    if column.unsigned {
        buf.write_str(" UNSIGNED");
    }
    if column.unique {
        buf.write_str(" UNIQUE");
    }
    if column.required {
        buf.write_str(" NOT NULL");
    }

    if let Some(default) = &column.default {
        buf.write_str(" DEFAULT ");
        match default {
            serde_json::Value::String(s) => {
                let quoted = buf.dialect().quoter().value(Literal::Str(s));
                buf.write_str(&quoted);
            }
            other => buf.write_str(&other.to_string()),
        }
    }

    write_options(buf, &column.options);
}

fn write_key(buf: &mut Buffer<'_>, key: &Key) {
    buf.write_str(key.key_type.as_str());

    if !key.name.is_empty() {
        buf.write_char(' ');
        buf.write_escape(&key.name);
    }

    buf.write_str(" (");
    buf.write_escape_list(&key.columns, ", ");
    buf.write_char(')');

    if key.key_type == KeyType::Foreign {
        let reference = &key.reference;
        buf.write_str(" REFERENCES ");
        buf.write_escape(&reference.table);
        buf.write_str(" (");
        buf.write_escape_list(&reference.columns, ", ");
        buf.write_char(')');

        if !reference.on_delete.is_empty() {
            buf.write_str(" ON DELETE ");
            buf.write_str(&reference.on_delete);
        }
        if !reference.on_update.is_empty() {
            buf.write_str(" ON UPDATE ");
            buf.write_str(&reference.on_update);
        }
    }

    write_options(buf, &key.options);
}

pub(crate) fn write_options(buf: &mut Buffer<'_>, options: &str) {
    if options.is_empty() {
        return;
    }
    buf.write_char(' ');
    buf.write_str(options);
}
