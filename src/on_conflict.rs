//! OnConflict：插入冲突时的处理子句。

use crate::args::Arg;
use crate::buffer::{BuildError, Buffer};
use crate::dialect::OnConflictSyntax;
use crate::macros::{IntoStrings, collect_into_strings};

/// 冲突时的动作。
#[derive(Debug, Clone, PartialEq)]
pub enum ConflictAction {
    Ignore,
    /// 用新值覆盖语句中的全部字段。
    Replace,
    Fragment { sql: String, args: Vec<Arg> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct OnConflict {
    pub keys: Vec<String>,
    pub action: ConflictAction,
}

impl OnConflict {
    pub fn ignore<T: IntoStrings>(keys: T) -> Self {
        Self {
            keys: collect_into_strings(keys),
            action: ConflictAction::Ignore,
        }
    }

    pub fn replace<T: IntoStrings>(keys: T) -> Self {
        Self {
            keys: collect_into_strings(keys),
            action: ConflictAction::Replace,
        }
    }

    pub fn fragment(sql: impl Into<String>, args: Vec<Arg>) -> Self {
        Self {
            keys: Vec::new(),
            action: ConflictAction::Fragment {
                sql: sql.into(),
                args,
            },
        }
    }

    /// 没有冲突键也没有片段时不输出任何内容。
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && !matches!(self.action, ConflictAction::Fragment { .. })
    }

    /// 写出子句；`fields` 是语句插入的字段，`Replace` 会逐个覆盖。
    pub fn write(&self, buf: &mut Buffer<'_>, fields: &[&str]) -> Result<(), BuildError> {
        if self.is_empty() {
            return Ok(());
        }

        let dialect = buf.dialect();
        let Some(syntax) = dialect.on_conflict() else {
            return Err(BuildError::OnConflictUnsupported(dialect.label().to_string()));
        };

        buf.write_char(' ');
        buf.write_str(&syntax.statement);

        if syntax.support_key && !self.keys.is_empty() {
            buf.write_str(" (");
            buf.write_escape_list(&self.keys, ",");
            buf.write_char(')');
        }

        buf.write_char(' ');
        match &self.action {
            ConflictAction::Ignore => self.write_ignore(buf, syntax),
            // 没有可覆盖的字段时退化为忽略
            ConflictAction::Replace if fields.is_empty() => self.write_ignore(buf, syntax),
            ConflictAction::Replace => {
                buf.write_str(&syntax.update_statement);
                buf.write_char(' ');
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        buf.write_char(',');
                    }
                    buf.write_escape(field);
                    buf.write_char('=');
                    if syntax.use_values {
                        buf.write_str("VALUES(");
                        buf.write_escape(field);
                        buf.write_char(')');
                    } else {
                        buf.write_str(&syntax.table_qualifier);
                        buf.write_char('.');
                        buf.write_escape(field);
                    }
                }
            }
            ConflictAction::Fragment { sql, args } => {
                buf.write_str(sql);
                buf.add_arguments(args);
            }
        }

        Ok(())
    }

    fn write_ignore(&self, buf: &mut Buffer<'_>, syntax: &OnConflictSyntax) {
        buf.write_str(&syntax.ignore_statement);
        if syntax.ignore_self_assign {
            buf.write_char(' ');
            for (i, key) in self.keys.iter().enumerate() {
                if i > 0 {
                    buf.write_char(',');
                }
                buf.write_escape(key);
                buf.write_char('=');
                buf.write_escape(key);
            }
        }
    }
}
