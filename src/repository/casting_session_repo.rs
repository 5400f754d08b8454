// ==========================================
// 仓储管理后台 - 浇注会话快照仓储
// ==========================================
// 每个会话一行, 自动保存时 upsert
// ==========================================

use crate::engine::casting_session::CastingSnapshot;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

pub struct CastingSessionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CastingSessionRepository {
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
            CREATE TABLE IF NOT EXISTS casting_session_snapshot (
              session_id TEXT PRIMARY KEY,
              state TEXT NOT NULL,
              payload_json TEXT NOT NULL,
              saved_at TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    /// 写入或覆盖快照
    pub fn upsert(&self, snapshot: &CastingSnapshot) -> RepositoryResult<()> {
        let payload = serde_json::to_string(snapshot)?;
        let state = serde_json::to_value(snapshot.state)?
            .as_str()
            .unwrap_or_default()
            .to_string();

        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO casting_session_snapshot (session_id, state, payload_json, saved_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(session_id) DO UPDATE SET
              state = excluded.state,
              payload_json = excluded.payload_json,
              saved_at = excluded.saved_at
            "#,
            params![snapshot.session_id, state, payload, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    pub fn load(&self, session_id: &str) -> RepositoryResult<Option<CastingSnapshot>> {
        let conn = self.get_conn()?;
        let payload: Option<String> = conn
            .query_row(
                "SELECT payload_json FROM casting_session_snapshot WHERE session_id = ?1",
                params![session_id],
                |row| row.get(0),
            )
            .optional()?;

        match payload {
            Some(p) => Ok(Some(serde_json::from_str(&p)?)),
            None => Ok(None),
        }
    }

    /// 未结束的会话 ID（应用重启后提示恢复）
    pub fn list_open_ids(&self) -> RepositoryResult<Vec<String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT session_id FROM casting_session_snapshot
            WHERE state IN ('running', 'paused')
            ORDER BY saved_at DESC
            "#,
        )?;
        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }

    pub fn delete(&self, session_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "DELETE FROM casting_session_snapshot WHERE session_id = ?1",
            params![session_id],
        )?;
        Ok(())
    }
}
