//! SQL Flavor：内置方言预设，以及进程级默认 flavor。

use crate::column_mapper::{
    mysql_column_mapper, postgres_column_mapper, sqlite_column_mapper, sqlserver_column_mapper,
};
use crate::dialect::{Dialect, OnConflictSyntax};
use crate::quote::SqlQuoter;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock};

/// 内置方言。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Flavor {
    #[default]
    MySQL,
    PostgreSQL,
    SQLite,
    SQLServer,
}

static DEFAULT_FLAVOR: AtomicU8 = AtomicU8::new(Flavor::MySQL as u8);
static DEFAULT_FLAVOR_LOCK: Mutex<()> = Mutex::new(());

impl Flavor {
    pub const ALL: [Flavor; 4] = [
        Flavor::MySQL,
        Flavor::PostgreSQL,
        Flavor::SQLite,
        Flavor::SQLServer,
    ];

    fn from_u8(v: u8) -> Self {
        match v {
            0 => Self::MySQL,
            1 => Self::PostgreSQL,
            2 => Self::SQLite,
            3 => Self::SQLServer,
            _ => Self::MySQL,
        }
    }

    fn to_u8(self) -> u8 {
        self as u8
    }

    /// 该 flavor 的标识符/字面量 quoter。
    pub fn quoter(self) -> SqlQuoter {
        match self {
            Self::MySQL => SqlQuoter::new("`", "`").with_escape_backslash(true),
            Self::PostgreSQL | Self::SQLite => SqlQuoter::new("\"", "\""),
            Self::SQLServer => SqlQuoter::new("[", "]"),
        }
    }

    /// 新建一份预设方言（带独立的转义缓存）。
    pub fn dialect(self) -> Dialect {
        let base = Dialect::new(self.to_string(), self.quoter());
        match self {
            Self::MySQL => base
                .with_on_conflict(Some(OnConflictSyntax::mysql()))
                .with_drop_index_on_table(true)
                .with_column_mapper(mysql_column_mapper),
            Self::PostgreSQL => base
                .with_placeholder("$", true)
                .with_on_conflict(Some(OnConflictSyntax::postgres()))
                .with_returning_primary(true)
                .with_insert_default_values(true)
                .with_column_mapper(postgres_column_mapper),
            Self::SQLite => base
                .with_bool_literals("1", "0")
                .with_on_conflict(Some(OnConflictSyntax::sqlite()))
                .with_insert_default_values(true)
                .with_column_mapper(sqlite_column_mapper),
            Self::SQLServer => base
                .with_placeholder("@p", true)
                .with_bool_literals("1", "0")
                .with_insert_default_values(true)
                .with_drop_index_on_table(true)
                .with_column_mapper(sqlserver_column_mapper),
        }
    }

    /// 进程内共享的预设方言，缓存随进程存活。
    pub fn shared(self) -> &'static Dialect {
        static SHARED: [OnceLock<Dialect>; 4] = [
            OnceLock::new(),
            OnceLock::new(),
            OnceLock::new(),
            OnceLock::new(),
        ];
        SHARED[self.to_u8() as usize].get_or_init(|| self.dialect())
    }
}

/// 获取当前全局默认 Flavor。
pub fn default_flavor() -> Flavor {
    Flavor::from_u8(DEFAULT_FLAVOR.load(Ordering::Relaxed))
}

/// 设置全局默认 Flavor，返回旧值。
pub fn set_default_flavor(flavor: Flavor) -> Flavor {
    let old = DEFAULT_FLAVOR.swap(flavor.to_u8(), Ordering::Relaxed);
    Flavor::from_u8(old)
}

/// 修改全局默认 Flavor 的 RAII guard（会持有一个全局锁，避免并行测试互相干扰）。
pub struct DefaultFlavorGuard {
    _lock: MutexGuard<'static, ()>,
    old: Flavor,
}

impl Drop for DefaultFlavorGuard {
    fn drop(&mut self) {
        set_default_flavor(self.old);
    }
}

/// 在一个作用域内临时设置 DefaultFlavor，并保证退出作用域后自动恢复。
pub fn set_default_flavor_scoped(flavor: Flavor) -> DefaultFlavorGuard {
    let lock = DEFAULT_FLAVOR_LOCK
        .lock()
        .unwrap_or_else(|e| e.into_inner());
    let old = set_default_flavor(flavor);
    DefaultFlavorGuard { _lock: lock, old }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MySQL => "MySQL",
            Self::PostgreSQL => "PostgreSQL",
            Self::SQLite => "SQLite",
            Self::SQLServer => "SQLServer",
        };
        f.write_str(s)
    }
}
