// ==========================================
// 仓储管理后台 - 设置记录仓储
// ==========================================
// 打印机 / 秤 / 用途 / 舒特类型共用一张表, 按 kind 分区
// 由应用外壳创建并注入到需要的 API, 不做全局单例
// ==========================================

use crate::domain::settings::SettingsRecord;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// 设置仓储接口（list / get / add / update / delete）
pub trait SettingsRepository<T: SettingsRecord>: Send + Sync {
    /// 按创建顺序列出全部记录
    fn list(&self) -> RepositoryResult<Vec<T>>;

    fn get(&self, id: &str) -> RepositoryResult<Option<T>>;

    /// 新增记录; id 为空时自动生成
    fn add(&self, record: T) -> RepositoryResult<T>;

    /// 覆盖已有记录, 不存在时返回 NotFound
    fn update(&self, record: &T) -> RepositoryResult<()>;

    /// 删除记录, 不存在时返回 NotFound
    fn delete(&self, id: &str) -> RepositoryResult<()>;
}

fn ensure_id<T: SettingsRecord>(record: &mut T) {
    if record.id().trim().is_empty() {
        record.set_id(Uuid::new_v4().to_string());
    }
}

fn not_found<T: SettingsRecord>(id: &str) -> RepositoryError {
    RepositoryError::NotFound {
        entity: T::KIND.to_string(),
        id: id.to_string(),
    }
}

// ==========================================
// SqliteSettingsRepository - SQLite 实现
// ==========================================
pub struct SqliteSettingsRepository<T: SettingsRecord> {
    conn: Arc<Mutex<Connection>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: SettingsRecord> SqliteSettingsRepository<T> {
    pub fn new(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        let repo = Self {
            conn,
            _marker: PhantomData,
        };
        repo.ensure_table()?;
        Ok(repo)
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn ensure_table(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS settings_record (
              kind TEXT NOT NULL,
              record_id TEXT NOT NULL,
              payload_json TEXT NOT NULL,
              updated_at TEXT NOT NULL,
              PRIMARY KEY (kind, record_id)
            );
            "#,
        )?;
        Ok(())
    }
}

impl<T: SettingsRecord> SettingsRepository<T> for SqliteSettingsRepository<T> {
    fn list(&self) -> RepositoryResult<Vec<T>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT payload_json FROM settings_record WHERE kind = ?1 ORDER BY rowid ASC",
        )?;
        let payloads = stmt
            .query_map(params![T::KIND], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut records = Vec::with_capacity(payloads.len());
        for payload in payloads {
            records.push(serde_json::from_str::<T>(&payload)?);
        }
        Ok(records)
    }

    fn get(&self, id: &str) -> RepositoryResult<Option<T>> {
        let conn = self.get_conn()?;
        let payload: Option<String> = conn
            .query_row(
                "SELECT payload_json FROM settings_record WHERE kind = ?1 AND record_id = ?2",
                params![T::KIND, id],
                |row| row.get(0),
            )
            .optional()?;

        match payload {
            Some(p) => Ok(Some(serde_json::from_str(&p)?)),
            None => Ok(None),
        }
    }

    fn add(&self, mut record: T) -> RepositoryResult<T> {
        ensure_id(&mut record);
        let payload = serde_json::to_string(&record)?;
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO settings_record (kind, record_id, payload_json, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![T::KIND, record.id(), payload, Utc::now().to_rfc3339()],
        )?;
        tracing::debug!(kind = T::KIND, id = record.id(), "新增设置记录");
        Ok(record)
    }

    fn update(&self, record: &T) -> RepositoryResult<()> {
        let payload = serde_json::to_string(record)?;
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE settings_record
            SET payload_json = ?3, updated_at = ?4
            WHERE kind = ?1 AND record_id = ?2
            "#,
            params![T::KIND, record.id(), payload, Utc::now().to_rfc3339()],
        )?;
        if affected == 0 {
            return Err(not_found::<T>(record.id()));
        }
        Ok(())
    }

    fn delete(&self, id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM settings_record WHERE kind = ?1 AND record_id = ?2",
            params![T::KIND, id],
        )?;
        if affected == 0 {
            return Err(not_found::<T>(id));
        }
        Ok(())
    }
}

// ==========================================
// MemorySettingsRepository - 内存实现（测试/离线）
// ==========================================
pub struct MemorySettingsRepository<T: SettingsRecord> {
    records: Mutex<Vec<T>>,
}

impl<T: SettingsRecord> Default for MemorySettingsRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SettingsRecord> MemorySettingsRepository<T> {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    fn lock(&self) -> RepositoryResult<std::sync::MutexGuard<Vec<T>>> {
        self.records
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl<T: SettingsRecord> SettingsRepository<T> for MemorySettingsRepository<T> {
    fn list(&self) -> RepositoryResult<Vec<T>> {
        Ok(self.lock()?.clone())
    }

    fn get(&self, id: &str) -> RepositoryResult<Option<T>> {
        Ok(self.lock()?.iter().find(|r| r.id() == id).cloned())
    }

    fn add(&self, mut record: T) -> RepositoryResult<T> {
        ensure_id(&mut record);
        let mut records = self.lock()?;
        if records.iter().any(|r| r.id() == record.id()) {
            return Err(RepositoryError::UniqueConstraintViolation(format!(
                "{} id={}",
                T::KIND,
                record.id()
            )));
        }
        records.push(record.clone());
        Ok(record)
    }

    fn update(&self, record: &T) -> RepositoryResult<()> {
        let mut records = self.lock()?;
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => {
                *slot = record.clone();
                Ok(())
            }
            None => Err(not_found::<T>(record.id())),
        }
    }

    fn delete(&self, id: &str) -> RepositoryResult<()> {
        let mut records = self.lock()?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Err(not_found::<T>(id));
        }
        Ok(())
    }
}
