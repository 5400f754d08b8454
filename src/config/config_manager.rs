// ==========================================
// 仓储管理后台 - 配置管理器
// ==========================================
// 职责: 界面设置的加载、查询、覆写
// 存储: config_kv 表 (scope_id + key → value)
// ==========================================

use crate::db::configure_sqlite_connection;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

const GLOBAL_SCOPE: &str = "global";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            configure_sqlite_connection(&guard)?;
            guard.execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS config_kv (
                  scope_id TEXT NOT NULL,
                  key TEXT NOT NULL,
                  value TEXT NOT NULL,
                  updated_at TEXT NOT NULL DEFAULT (datetime('now')),
                  PRIMARY KEY (scope_id, key)
                );
                "#,
            )?;
        }

        Ok(Self { conn })
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 读取 global scope 的配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
                params![GLOBAL_SCOPE, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入 global scope 的配置值（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES (?1, ?2, ?3, datetime('now'))
            ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3, updated_at = datetime('now')
            "#,
            params![GLOBAL_SCOPE, key, value],
        )?;
        tracing::info!(key, value, "配置已更新");
        Ok(())
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> RepositoryResult<String> {
        Ok(self
            .get_global_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 解析数值配置, 格式错误时告警并回退默认值
    fn get_parsed_or_default<T>(&self, key: &str, default: T) -> RepositoryResult<T>
    where
        T: std::str::FromStr + std::fmt::Display + Copy,
    {
        let raw = match self.get_global_config_value(key)? {
            Some(v) => v,
            None => return Ok(default),
        };
        match raw.trim().parse::<T>() {
            Ok(v) => Ok(v),
            Err(_) => {
                tracing::warn!(
                    config_key = key,
                    raw_value = %raw,
                    "配置格式错误，使用默认值 {}",
                    default
                );
                Ok(default)
            }
        }
    }

    /// 获取所有 global 配置的快照（JSON）
    pub fn get_config_snapshot(&self) -> RepositoryResult<String> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = ?1 ORDER BY key")?;

        let rows = stmt.query_map(params![GLOBAL_SCOPE], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&config_map)?)
    }

    /// 从配置快照恢复（覆盖同名配置）
    ///
    /// # 返回
    /// - Ok(usize): 恢复的配置项数量
    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> RepositoryResult<usize> {
        let config_map: BTreeMap<String, String> = serde_json::from_str(snapshot_json)?;

        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;
        let mut count = 0;
        for (key, value) in config_map.iter() {
            count += tx.execute(
                r#"
                INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)
                ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3
                "#,
                params![GLOBAL_SCOPE, key, value],
            )?;
        }
        tx.commit()?;

        Ok(count)
    }

    // ===== 列表 =====

    /// 默认每页条数（默认 10, 0 视为无效）
    pub fn get_default_page_size(&self) -> RepositoryResult<usize> {
        let size = self.get_parsed_or_default(config_keys::DEFAULT_PAGE_SIZE, 10usize)?;
        Ok(if size == 0 { 10 } else { size })
    }

    // ===== 库位编号 =====

    pub fn get_la_number_prefix(&self) -> RepositoryResult<String> {
        self.get_config_or_default(config_keys::LA_NUMBER_PREFIX, "LA-")
    }

    pub fn get_la_number_width(&self) -> RepositoryResult<usize> {
        self.get_parsed_or_default(config_keys::LA_NUMBER_WIDTH, 5usize)
    }

    // ===== 浇注 =====

    /// 自动保存间隔（秒, 默认 30, 最小 1）
    pub fn get_casting_autosave_secs(&self) -> RepositoryResult<i64> {
        let secs = self.get_parsed_or_default(config_keys::CASTING_AUTOSAVE_SECS, 30i64)?;
        Ok(secs.max(1))
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 列表
    pub const DEFAULT_PAGE_SIZE: &str = "default_page_size";

    // 库位编号
    pub const LA_NUMBER_PREFIX: &str = "la_number_prefix";
    pub const LA_NUMBER_WIDTH: &str = "la_number_width";

    // 浇注
    pub const CASTING_AUTOSAVE_SECS: &str = "casting_autosave_secs";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> ConfigManager {
        ConfigManager::from_connection(Arc::new(Mutex::new(Connection::open_in_memory().unwrap())))
            .unwrap()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = manager();
        assert_eq!(config.get_default_page_size().unwrap(), 10);
        assert_eq!(config.get_la_number_prefix().unwrap(), "LA-");
        assert_eq!(config.get_la_number_width().unwrap(), 5);
        assert_eq!(config.get_casting_autosave_secs().unwrap(), 30);
    }

    #[test]
    fn test_override_and_bad_values_fall_back() {
        let config = manager();
        config.set_global_config_value(config_keys::DEFAULT_PAGE_SIZE, "25").unwrap();
        config.set_global_config_value(config_keys::LA_NUMBER_WIDTH, "viele").unwrap();
        assert_eq!(config.get_default_page_size().unwrap(), 25);
        assert_eq!(config.get_la_number_width().unwrap(), 5);
    }

    #[test]
    fn test_snapshot_restore() {
        let a = manager();
        a.set_global_config_value(config_keys::LA_NUMBER_PREFIX, "LO-").unwrap();
        let snapshot = a.get_config_snapshot().unwrap();

        let b = manager();
        assert_eq!(b.restore_config_from_snapshot(&snapshot).unwrap(), 1);
        assert_eq!(b.get_la_number_prefix().unwrap(), "LO-");
    }
}
