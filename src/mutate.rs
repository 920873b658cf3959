//! Mutate：INSERT / UPDATE 中单个字段的变更操作。

use crate::args::Arg;

/// 字段变更。
///
/// `Fragment` 自带完整的 SQL 赋值片段，不对应任何列名。
#[derive(Debug, Clone, PartialEq)]
pub enum Mutate {
    Set { field: String, value: Arg },
    /// `field=field+delta`，递减时传负数。
    Inc { field: String, delta: Arg },
    Fragment { sql: String, args: Vec<Arg> },
}

impl Mutate {
    pub fn set(field: impl Into<String>, value: impl Into<Arg>) -> Self {
        Self::Set {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn inc(field: impl Into<String>, delta: impl Into<Arg>) -> Self {
        Self::Inc {
            field: field.into(),
            delta: delta.into(),
        }
    }

    pub fn dec(field: impl Into<String>, delta: i64) -> Self {
        Self::inc(field, -delta)
    }

    pub fn fragment(sql: impl Into<String>, args: Vec<Arg>) -> Self {
        Self::Fragment {
            sql: sql.into(),
            args,
        }
    }

    /// 列名；片段没有列名，用其 SQL 文本作为键。
    pub fn key(&self) -> &str {
        match self {
            Self::Set { field, .. } | Self::Inc { field, .. } => field,
            Self::Fragment { sql, .. } => sql,
        }
    }
}

/// 有序变更集合：同一个键再次插入时原位替换。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mutates {
    entries: Vec<Mutate>,
}

impl Mutates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mutate: Mutate) -> &mut Self {
        match self.entries.iter_mut().find(|m| m.key() == mutate.key()) {
            Some(slot) => *slot = mutate,
            None => self.entries.push(mutate),
        }
        self
    }

    pub fn set(mut self, field: impl Into<String>, value: impl Into<Arg>) -> Self {
        self.insert(Mutate::set(field, value));
        self
    }

    pub fn inc(mut self, field: impl Into<String>, delta: impl Into<Arg>) -> Self {
        self.insert(Mutate::inc(field, delta));
        self
    }

    pub fn fragment(mut self, sql: impl Into<String>, args: Vec<Arg>) -> Self {
        self.insert(Mutate::fragment(sql, args));
        self
    }

    pub fn get(&self, key: &str) -> Option<&Mutate> {
        self.entries.iter().find(|m| m.key() == key)
    }

    /// `Set` 操作的值。
    pub fn set_value(&self, field: &str) -> Option<&Arg> {
        match self.get(field) {
            Some(Mutate::Set { value, .. }) => Some(value),
            _ => None,
        }
    }

    /// 仅 `Set` 操作的字段名。
    pub fn set_fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|m| match m {
            Mutate::Set { field, .. } => Some(field.as_str()),
            _ => None,
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Mutate> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Mutates {
    type Item = &'a Mutate;
    type IntoIter = std::slice::Iter<'a, Mutate>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<Mutate> for Mutates {
    fn from_iter<I: IntoIterator<Item = Mutate>>(iter: I) -> Self {
        let mut out = Self::new();
        for m in iter {
            out.insert(m);
        }
        out
    }
}
