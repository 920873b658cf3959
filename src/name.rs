//! Name：字段表达式的转义编译（带缓存）。
//!
//! 规则按顺序匹配：
//!
//! 1. `*` 原样输出；
//! 2. 以 [`UNESCAPE_CHARACTER`] 开头：去掉该字符，其余原样输出；
//! 3. 含 ` as `（大小写不敏感）：左右两侧分别递归编译，用大写 `AS` 连接；
//! 4. 含成对括号（函数调用）：只递归编译第一个 `(` 与其配对 `)` 之间的内容；
//! 5. 否则按 `.` 切分，每段单独加引号，末尾的 `*` 段保持原样。

use crate::quote::Quoter;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// 以该字符开头的字段不做任何转义。
pub const UNESCAPE_CHARACTER: char = '^';

/// 字段转义缓存：只增不删，容量受限于不同字段字符串的数量。
#[derive(Debug, Default)]
pub struct NameCache {
    entries: RwLock<HashMap<String, String>>,
}

impl NameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, field: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(field)
            .cloned()
    }

    fn store(&self, field: &str, escaped: &str) {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(field.to_string(), escaped.to_string());
    }
}

/// 字段编译器：一个 quoter 对应一份缓存，所以缓存键只需要字段本身。
#[derive(Debug, Clone)]
pub struct Name {
    quoter: Arc<dyn Quoter>,
    cache: Arc<NameCache>,
}

impl Name {
    pub fn new(quoter: Arc<dyn Quoter>) -> Self {
        Self {
            quoter,
            cache: Arc::new(NameCache::new()),
        }
    }

    pub fn quoter(&self) -> &dyn Quoter {
        self.quoter.as_ref()
    }

    pub fn cache(&self) -> &NameCache {
        &self.cache
    }

    /// 编译字段表达式。
    pub fn build(&self, field: &str) -> String {
        if field == "*" {
            return field.to_string();
        }

        if let Some(escaped) = self.cache.get(field) {
            return escaped;
        }

        let escaped = self.compile(field);
        tracing::trace!(field, escaped = %escaped, "name cache miss");
        self.cache.store(field, &escaped);
        escaped
    }

    fn compile(&self, field: &str) -> String {
        if let Some(rest) = field.strip_prefix(UNESCAPE_CHARACTER) {
            return rest.to_string();
        }

        // ASCII 小写不改变字节偏移
        if let Some(i) = field.to_ascii_lowercase().find(" as ") {
            return format!("{} AS {}", self.build(&field[..i]), self.build(&field[i + 4..]));
        }

        if let Some((start, end)) = paren_span(field) {
            return format!(
                "{}{}{}",
                &field[..=start],
                self.build(&field[start + 1..end]),
                &field[end..]
            );
        }

        let parts: Vec<&str> = field.split('.').collect();
        let last = parts.len() - 1;
        parts
            .iter()
            .enumerate()
            .map(|(i, part)| {
                let part = part.trim();
                if part == "*" && i == last {
                    part.to_string()
                } else {
                    self.quoter.id(part)
                }
            })
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// 第一个 `(` 及与之配对的 `)` 的位置。
fn paren_span(s: &str) -> Option<(usize, usize)> {
    let start = s.find('(')?;
    let mut depth = 0usize;
    for (i, b) in s.bytes().enumerate().skip(start) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some((start, i));
                }
            }
            _ => {}
        }
    }
    None
}
