//! SchemaParser：从已有的 `CREATE TABLE` 文本反向解析出表与列定义。
//!
//! 只识别列定义；`PRIMARY KEY (...)`、`KEY ...`、`CONSTRAINT ...` 等键/约束行会被跳过。
//! 各内置方言生成的自增主键列（`INT UNSIGNED AUTO_INCREMENT PRIMARY KEY`、`SERIAL ...` 等）
//! 还原为 [`ColumnType::Id`] / [`ColumnType::BigId`]。

use crate::flavor::Flavor;
use crate::schema::{Column, ColumnType, Schema, Table};
use regex::{Captures, Regex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("sql: cannot parse table definition:\n{sql}")]
    UnmatchedTable { sql: String },
    #[error("sql: invalid parser pattern: {0}")]
    Pattern(#[from] regex::Error),
}

#[derive(Debug, Clone)]
pub struct SchemaParser {
    table: Regex,
    column: Regex,
    not_null: Regex,
}

impl SchemaParser {
    /// `prefix` / `suffix` 为标识符引号。
    pub fn new(prefix: &str, suffix: &str) -> Result<Self, ParseError> {
        let (p, s) = (regex::escape(prefix), regex::escape(suffix));

        let table = Regex::new(&format!(
            r"(?i)^CREATE TABLE (?:IF NOT EXISTS )?{p}(?P<name>\w+){s}\s?\((?P<definitions>[\S\s]+)\)\s?(?P<options>[\S\s]*)$"
        ))?;

        let column = Regex::new(&format!(
            concat!(
                r"(?i)^{p}(?P<name>\w+){s}\s(?P<type>\w+)",
                r"(?:\((?P<limit>\d+|MAX)(?:,\s?(?P<precision>\d+))?\))?",
                r"(?:\s(?P<unsigned>UNSIGNED))?",
                r"(?:\s(?P<unique>UNIQUE))?",
                r"(?:\s(?P<nullable>(?:NOT\s)?NULL))?",
                r#"(?:\sDEFAULT\s(?P<default_value>'(?:[^']|'')*'|"[^"]*"|[\w.+-]+))?"#,
                r"(?:\s(?P<index>(?:AUTO_INCREMENT|UNIQUE|PRIMARY)(?:\sKEY)?))?",
                r"(?:\s(?P<options>[\S\s]+))?$",
            ),
            p = p,
            s = s,
        ))?;

        // COLLATE 等修饰符之后出现的 NOT NULL
        let not_null = Regex::new(r"(?i)(?:^|\s)NOT\s+NULL(?:\s|$)")?;

        Ok(Self {
            table,
            column,
            not_null,
        })
    }

    pub fn for_flavor(flavor: Flavor) -> Result<Self, ParseError> {
        let quoter = flavor.quoter();
        Self::new(&quoter.id_prefix, &quoter.id_suffix)
    }

    /// 解析一条 CREATE TABLE 并追加到 `schema`。
    pub fn parse(&self, sql: &str, schema: &mut Schema) -> Result<(), ParseError> {
        let table = self.parse_table(sql)?;
        schema.add(table);
        Ok(())
    }

    pub fn parse_table(&self, sql: &str) -> Result<Table, ParseError> {
        let trimmed = sql.trim();
        let trimmed = trimmed.strip_suffix(';').unwrap_or(trimmed).trim_end();

        let Some(caps) = self.table.captures(trimmed) else {
            return Err(ParseError::UnmatchedTable {
                sql: sql.to_string(),
            });
        };

        let mut table = Table::create(group(&caps, "name")).options(group(&caps, "options").trim());
        for definition in split_definitions(group(&caps, "definitions")) {
            if let Some(column) = self.parse_column(definition.trim()) {
                table = table.column(column);
            }
        }
        Ok(table)
    }

    /// 不是列定义时返回 `None`。
    pub fn parse_column(&self, definition: &str) -> Option<Column> {
        let caps = self.column.captures(definition)?;

        let raw_limit = group(&caps, "limit");
        let max_size = raw_limit.eq_ignore_ascii_case("MAX");
        let limit = raw_limit.parse::<u32>().unwrap_or(0);
        let precision = group(&caps, "precision").parse::<u32>().unwrap_or(0);
        let index = group(&caps, "index").to_ascii_uppercase();

        let mut column = Column::new(group(&caps, "name"), ColumnType::Custom(String::new()));
        column.unsigned = !group(&caps, "unsigned").is_empty();
        column.unique = !group(&caps, "unique").is_empty() || index.starts_with("UNIQUE");
        column.required = group(&caps, "nullable").to_ascii_uppercase().starts_with("NOT");

        let mut options = Vec::new();
        if !index.is_empty() && !index.starts_with("UNIQUE") {
            options.push(index);
        }

        match parse_default(group(&caps, "default_value")) {
            DefaultLiteral::Value(v) => column.default = Some(v),
            DefaultLiteral::Keyword(word) => options.push(format!("DEFAULT {word}")),
            DefaultLiteral::None => {}
        }

        let mut rest = group(&caps, "options").trim().to_string();
        if let Some(m) = self.not_null.find(&rest) {
            column.required = true;
            rest = format!("{} {}", rest[..m.start()].trim_end(), rest[m.end()..].trim_start())
                .trim()
                .to_string();
        }
        if !rest.is_empty() {
            options.push(rest);
        }
        column.options = options.join(" ");

        let sql_type = group(&caps, "type");
        if max_size {
            // NVARCHAR(MAX) / VARCHAR(MAX) 是不限长文本
            column.column_type = Some(ColumnType::Text);
        } else {
            map_column_type(&mut column, sql_type, limit, precision);
        }
        recognize_id(&mut column, sql_type);
        Some(column)
    }
}

/// 内置列映射为自增主键生成的写法，识别后清掉对应的修饰。
fn recognize_id(column: &mut Column, sql_type: &str) {
    let upper = sql_type.to_ascii_uppercase();
    let options = column.options.to_ascii_uppercase();
    let id = match (upper.as_str(), options.as_str()) {
        ("INT", "AUTO_INCREMENT PRIMARY KEY") if column.unsigned => ColumnType::Id,
        ("BIGINT", "AUTO_INCREMENT PRIMARY KEY") if column.unsigned => ColumnType::BigId,
        ("SERIAL", "PRIMARY KEY") if column.required => ColumnType::Id,
        ("BIGSERIAL", "PRIMARY KEY") if column.required => ColumnType::BigId,
        ("INTEGER", "PRIMARY KEY AUTOINCREMENT") => ColumnType::Id,
        ("INT", "IDENTITY(1,1) PRIMARY KEY") => ColumnType::Id,
        ("BIGINT", "IDENTITY(1,1) PRIMARY KEY") => ColumnType::BigId,
        _ => return,
    };
    column.column_type = Some(id);
    column.unsigned = false;
    column.required = false;
    column.limit = 0;
    column.options.clear();
}

fn group<'t>(caps: &Captures<'t>, name: &str) -> &'t str {
    caps.name(name).map_or("", |m| m.as_str())
}

/// 按顶层逗号切分，括号和引号内的逗号保留。
fn split_definitions(blob: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in blob.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth -= 1,
            (None, ',') if depth == 0 => {
                out.push(&blob[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push(&blob[start..]);
    out.retain(|s| !s.trim().is_empty());
    out
}

enum DefaultLiteral {
    None,
    Value(serde_json::Value),
    /// `CURRENT_TIMESTAMP` 这类无法表示为字面量的关键字。
    Keyword(String),
}

fn parse_default(raw: &str) -> DefaultLiteral {
    if raw.is_empty() || raw.eq_ignore_ascii_case("NULL") {
        return DefaultLiteral::None;
    }

    if raw.len() >= 2
        && let Some(inner) = raw
            .strip_prefix('\'')
            .and_then(|s| s.strip_suffix('\''))
            .or_else(|| raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
    {
        return DefaultLiteral::Value(serde_json::Value::String(inner.replace("''", "'")));
    }

    match serde_json::from_str::<serde_json::Value>(&raw.to_ascii_lowercase()) {
        Ok(v @ (serde_json::Value::Number(_) | serde_json::Value::Bool(_))) => {
            DefaultLiteral::Value(v)
        }
        _ => DefaultLiteral::Keyword(raw.to_string()),
    }
}

/// 把方言类型名还原为 [`ColumnType`]，尺寸按列类型放回对应字段。
fn map_column_type(column: &mut Column, sql_type: &str, limit: u32, precision: u32) {
    let upper = sql_type.to_ascii_uppercase();
    let ty = match upper.as_str() {
        "VARCHAR" | "NVARCHAR" | "CHARACTER" => ColumnType::String,
        "BOOL" | "BOOLEAN" | "BIT" => ColumnType::Bool,
        "SMALLINT" => ColumnType::SmallInt,
        "INT" | "INTEGER" => ColumnType::Int,
        "BIGINT" => ColumnType::BigInt,
        "FLOAT" | "REAL" => {
            column.precision = limit;
            column.column_type = Some(ColumnType::Float);
            return;
        }
        "DECIMAL" | "NUMERIC" => {
            column.precision = limit;
            column.scale = precision;
            column.column_type = Some(ColumnType::Decimal);
            return;
        }
        "TEXT" => ColumnType::Text,
        "JSON" | "JSONB" => ColumnType::Json,
        "DATE" => ColumnType::Date,
        "DATETIME" | "TIMESTAMPTZ" | "DATETIMEOFFSET" => ColumnType::DateTime,
        "TIME" => ColumnType::Time,
        "TIMESTAMP" | "DATETIME2" => ColumnType::Timestamp,
        _ => ColumnType::Custom(upper),
    };
    column.limit = limit;
    column.precision = precision;
    column.column_type = Some(ty);
}
