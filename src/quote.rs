//! Quoter：标识符与字面量的加引号策略。

use std::fmt;

/// 方言的引号策略，只有两项能力。
///
/// - `id` 只处理单段标识符（`public`、`users`），不处理 `public.users` 这种多段形式。
/// - `value` 只接受字符串/字节序列，返回值包含两侧引号；其它类型在调用方就已无法表达。
pub trait Quoter: fmt::Debug + Send + Sync {
    fn id(&self, name: &str) -> String;

    fn value(&self, literal: Literal<'_>) -> String;
}

/// `Quoter::value` 能表达的字面量种类。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Literal<'a> {
    Str(&'a str),
    /// 非 UTF-8 字节按替换字符输出；内联值在 `Buffer` 中已先行校验。
    Bytes(&'a [u8]),
}

/// 通过前后缀和转义字符配置的通用 Quoter。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlQuoter {
    pub id_prefix: String,
    pub id_suffix: String,
    pub id_suffix_escape: String,
    pub value_quote: String,
    pub value_quote_escape: String,
    /// MySQL 默认把 `\` 视为转义符，内联时需要额外加倍。
    pub escape_backslash: bool,
}

impl SqlQuoter {
    pub fn new(id_prefix: &str, id_suffix: &str) -> Self {
        Self {
            id_prefix: id_prefix.to_string(),
            id_suffix: id_suffix.to_string(),
            id_suffix_escape: id_suffix.to_string(),
            value_quote: "'".to_string(),
            value_quote_escape: "'".to_string(),
            escape_backslash: false,
        }
    }

    pub fn with_id_suffix_escape(mut self, escape: &str) -> Self {
        self.id_suffix_escape = escape.to_string();
        self
    }

    pub fn with_value_quote(mut self, quote: &str, escape: &str) -> Self {
        self.value_quote = quote.to_string();
        self.value_quote_escape = escape.to_string();
        self
    }

    pub fn with_escape_backslash(mut self, on: bool) -> Self {
        self.escape_backslash = on;
        self
    }

    fn quote_str(&self, s: &str) -> String {
        let mut out = String::with_capacity(s.len() + 2 * self.value_quote.len());
        out.push_str(&self.value_quote);
        let body = if self.escape_backslash {
            s.replace('\\', "\\\\")
        } else {
            s.to_string()
        };
        if self.value_quote.is_empty() {
            out.push_str(&body);
        } else {
            let escaped = format!("{}{}", self.value_quote_escape, self.value_quote);
            out.push_str(&body.replace(&self.value_quote, &escaped));
        }
        out.push_str(&self.value_quote);
        out
    }
}

impl Quoter for SqlQuoter {
    fn id(&self, name: &str) -> String {
        let mut out = String::with_capacity(name.len() + self.id_prefix.len() + self.id_suffix.len());
        out.push_str(&self.id_prefix);
        if self.id_suffix.is_empty() {
            out.push_str(name);
        } else {
            let escaped = format!("{}{}", self.id_suffix_escape, self.id_suffix);
            out.push_str(&name.replace(&self.id_suffix, &escaped));
        }
        out.push_str(&self.id_suffix);
        out
    }

    fn value(&self, literal: Literal<'_>) -> String {
        match literal {
            Literal::Str(s) => self.quote_str(s),
            Literal::Bytes(b) => self.quote_str(&String::from_utf8_lossy(b)),
        }
    }
}
