// ==========================================
// 仓储管理后台 - 浇注计时 API
// ==========================================
// 职责: 当前计时会话的状态切换与自动保存
// 持久化: 每次状态切换立即保存, 运行期间由 tick 按间隔保存
// 同一时刻只有一个进行中的会话
// ==========================================

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};

use crate::api::error::{ApiError, ApiResult};
use crate::config::ConfigManager;
use crate::engine::casting_session::{CastingSession, CastingSnapshot, CastingState, CastingSummary};
use crate::repository::CastingSessionRepository;

pub struct CastingApi {
    repo: Arc<CastingSessionRepository>,
    config: Arc<ConfigManager>,
    current: Mutex<Option<CastingSession>>,
}

impl CastingApi {
    pub fn new(repo: Arc<CastingSessionRepository>, config: Arc<ConfigManager>) -> Self {
        Self {
            repo,
            config,
            current: Mutex::new(None),
        }
    }

    fn lock_current(&self) -> ApiResult<MutexGuard<'_, Option<CastingSession>>> {
        self.current
            .lock()
            .map_err(|e| ApiError::InternalError(format!("会话锁获取失败: {}", e)))
    }

    fn persist(&self, session: &mut CastingSession, now: DateTime<Utc>) -> ApiResult<()> {
        self.repo.upsert(&session.snapshot())?;
        session.mark_saved(now);
        Ok(())
    }

    /// 当前会话快照
    pub fn current(&self) -> ApiResult<Option<CastingSnapshot>> {
        Ok(self.lock_current()?.as_ref().map(CastingSession::snapshot))
    }

    /// 未结束的已保存会话
    pub fn open_sessions(&self) -> ApiResult<Vec<String>> {
        Ok(self.repo.list_open_ids()?)
    }

    pub fn start(&self, label: &str, now: DateTime<Utc>) -> ApiResult<CastingSnapshot> {
        let label = label.trim();
        if label.is_empty() {
            return Err(ApiError::field("label", "Pflichtfeld"));
        }

        let mut current = self.lock_current()?;
        if let Some(active) = current.as_ref() {
            if !matches!(active.state(), CastingState::Finished) {
                return Err(ApiError::BusinessRuleViolation(format!(
                    "会话 {} 仍在进行中",
                    active.label()
                )));
            }
        }

        let interval = Duration::seconds(self.config.get_casting_autosave_secs()?);
        let mut session = CastingSession::new(label, interval);
        session.start(now)?;
        self.persist(&mut session, now)?;

        tracing::info!(id = session.id(), label, "开始浇注计时");
        let snapshot = session.snapshot();
        *current = Some(session);
        Ok(snapshot)
    }

    pub fn pause(&self, now: DateTime<Utc>) -> ApiResult<CastingSnapshot> {
        self.transition(now, "pause", |s, now| s.pause(now).map_err(ApiError::from))
    }

    pub fn resume(&self, now: DateTime<Utc>) -> ApiResult<CastingSnapshot> {
        self.transition(now, "resume", |s, now| s.resume(now).map_err(ApiError::from))
    }

    fn transition<F>(&self, now: DateTime<Utc>, action: &str, apply: F) -> ApiResult<CastingSnapshot>
    where
        F: FnOnce(&mut CastingSession, DateTime<Utc>) -> ApiResult<()>,
    {
        let mut current = self.lock_current()?;
        let session = current
            .as_mut()
            .ok_or_else(|| ApiError::NotFound("无进行中的浇注会话".to_string()))?;
        apply(session, now)?;
        self.persist(session, now)?;
        tracing::info!(id = session.id(), action, state = %session.state(), "浇注计时状态切换");
        Ok(session.snapshot())
    }

    /// 结束会话, 保存最终快照并清空当前会话
    pub fn finish(&self, now: DateTime<Utc>) -> ApiResult<CastingSummary> {
        let mut current = self.lock_current()?;
        let session = current
            .as_mut()
            .ok_or_else(|| ApiError::NotFound("无进行中的浇注会话".to_string()))?;
        let summary = session.finish(now)?;
        self.persist(session, now)?;
        *current = None;

        tracing::info!(
            id = %summary.session_id,
            pauses = summary.pause_count,
            active_ms = summary.active_ms,
            paused_ms = summary.paused_ms,
            "结束浇注计时"
        );
        Ok(summary)
    }

    /// 周期调用: 到期时自动保存
    ///
    /// # 返回
    /// 本次是否写入了快照
    pub fn tick(&self, now: DateTime<Utc>) -> ApiResult<bool> {
        let mut current = self.lock_current()?;
        let session = match current.as_mut() {
            Some(s) if s.autosave_due(now) => s,
            _ => return Ok(false),
        };
        self.persist(session, now)?;
        tracing::debug!(id = session.id(), "浇注会话自动保存");
        Ok(true)
    }

    /// 从已保存快照恢复会话（应用重启后）
    pub fn restore(&self, session_id: &str) -> ApiResult<CastingSnapshot> {
        let snapshot = self
            .repo
            .load(session_id)?
            .ok_or_else(|| ApiError::NotFound(format!("casting_session(id={})不存在", session_id)))?;
        if snapshot.state == CastingState::Finished {
            return Err(ApiError::BusinessRuleViolation(format!(
                "会话 {} 已结束",
                snapshot.label
            )));
        }

        let mut current = self.lock_current()?;
        if let Some(active) = current.as_ref() {
            if active.id() != session_id {
                return Err(ApiError::BusinessRuleViolation(format!(
                    "会话 {} 仍在进行中",
                    active.label()
                )));
            }
        }

        tracing::info!(id = session_id, state = %snapshot.state, "恢复浇注会话");
        *current = Some(CastingSession::from_snapshot(snapshot.clone()));
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rusqlite::Connection;

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn api() -> CastingApi {
        let conn = Arc::new(Mutex::new(Connection::open_in_memory().unwrap()));
        let config = Arc::new(ConfigManager::from_connection(conn.clone()).unwrap());
        let repo = Arc::new(CastingSessionRepository::new(conn).unwrap());
        CastingApi::new(repo, config)
    }

    #[test]
    fn test_tick_autosaves_after_interval() {
        let api = api();
        api.start("Charge 7", t(0)).unwrap();

        assert!(!api.tick(t(10)).unwrap());
        assert!(api.tick(t(30)).unwrap());
        assert!(!api.tick(t(45)).unwrap());
        assert!(api.tick(t(60)).unwrap());
    }

    #[test]
    fn test_second_start_rejected_while_running() {
        let api = api();
        api.start("Charge 7", t(0)).unwrap();
        assert!(matches!(
            api.start("Charge 8", t(5)),
            Err(ApiError::BusinessRuleViolation(_))
        ));
    }

    #[test]
    fn test_finish_clears_current_and_closes_session() {
        let api = api();
        let started = api.start("Charge 7", t(0)).unwrap();
        api.pause(t(60)).unwrap();
        api.resume(t(90)).unwrap();
        let summary = api.finish(t(150)).unwrap();

        assert_eq!(summary.pause_count, 1);
        assert_eq!(summary.active_ms, 120_000);
        assert_eq!(summary.paused_ms, 30_000);
        assert!(api.current().unwrap().is_none());
        assert!(api.open_sessions().unwrap().is_empty());
        assert!(matches!(
            api.restore(&started.session_id),
            Err(ApiError::BusinessRuleViolation(_))
        ));
    }

    #[test]
    fn test_invalid_transition_maps_to_state_error() {
        let api = api();
        api.start("Charge 7", t(0)).unwrap();
        assert!(matches!(
            api.resume(t(1)),
            Err(ApiError::InvalidStateTransition { .. })
        ));
    }
}
