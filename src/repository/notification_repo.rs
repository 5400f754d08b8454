// ==========================================
// 仓储管理后台 - 应用内通知仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::notification::Notification;
use crate::domain::types::NotificationLevel;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};

/// 表行（文本列尚未解析）
struct NotificationRow {
    id: String,
    created_at: String,
    level: String,
    title: String,
    message: String,
    read: bool,
}

impl NotificationRow {
    fn into_domain(self) -> RepositoryResult<Notification> {
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map(|d| d.with_timezone(&Utc))
            .map_err(|e| RepositoryError::FieldValueError {
                field: "created_at".to_string(),
                message: e.to_string(),
            })?;
        let level: NotificationLevel =
            self.level
                .parse()
                .map_err(|e: String| RepositoryError::FieldValueError {
                    field: "level".to_string(),
                    message: e,
                })?;
        Ok(Notification {
            id: self.id,
            created_at,
            level,
            title: self.title,
            message: self.message,
            read: self.read,
        })
    }
}

// ==========================================
// NotificationRepository - 通知仓储
// ==========================================
/// 职责: 管理 notification 表的 CRUD 操作
pub struct NotificationRepository {
    conn: Arc<Mutex<Connection>>,
}

impl NotificationRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        let repo = Self { conn };
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
            CREATE TABLE IF NOT EXISTS notification (
              notification_id TEXT PRIMARY KEY,
              created_at TEXT NOT NULL,
              level TEXT NOT NULL CHECK(level IN ('info', 'success', 'warning', 'error')),
              title TEXT NOT NULL,
              message TEXT NOT NULL,
              is_read INTEGER NOT NULL DEFAULT 0
            );

            CREATE INDEX IF NOT EXISTS idx_notification_created_at ON notification(created_at DESC);
            "#,
        )?;
        Ok(())
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<NotificationRow> {
        Ok(NotificationRow {
            id: row.get(0)?,
            created_at: row.get(1)?,
            level: row.get(2)?,
            title: row.get(3)?,
            message: row.get(4)?,
            read: row.get::<_, i64>(5)? != 0,
        })
    }

    /// 写入通知
    pub fn insert(&self, notification: &Notification) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO notification (notification_id, created_at, level, title, message, is_read)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                notification.id,
                notification.created_at.to_rfc3339(),
                notification.level.as_str(),
                notification.title,
                notification.message,
                notification.read as i64,
            ],
        )?;
        Ok(())
    }

    /// 最新在前
    pub fn list(&self, limit: usize) -> RepositoryResult<Vec<Notification>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT notification_id, created_at, level, title, message, is_read
            FROM notification
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?1
            "#,
        )?;
        let raws = stmt
            .query_map(params![limit as i64], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        raws.into_iter().map(NotificationRow::into_domain).collect()
    }

    pub fn mark_read(&self, id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE notification SET is_read = 1 WHERE notification_id = ?1",
            params![id],
        )?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Notification".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// 返回本次标记的条数
    pub fn mark_all_read(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let affected = conn.execute("UPDATE notification SET is_read = 1 WHERE is_read = 0", [])?;
        Ok(affected)
    }

    pub fn unread_count(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM notification WHERE is_read = 0",
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    pub fn delete(&self, id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM notification WHERE notification_id = ?1",
            params![id],
        )?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Notification".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
