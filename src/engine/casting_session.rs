// ==========================================
// 仓储管理后台 - 浇注计时会话
// ==========================================
// 状态机: Idle → Running ⇄ Paused → Finished
// - 每次 Running → Paused 计一次暂停
// - 运行/暂停时长按状态切换时刻累加（毫秒）
// - Running/Paused 期间按 autosave 间隔产生快照
// 时间由调用方显式传入, 引擎本身不读时钟
// ==========================================

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastingState {
    Idle,
    Running,
    Paused,
    Finished,
}

impl fmt::Display for CastingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CastingState::Idle => "IDLE",
            CastingState::Running => "RUNNING",
            CastingState::Paused => "PAUSED",
            CastingState::Finished => "FINISHED",
        };
        write!(f, "{}", s)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CastingError {
    #[error("无效的会话操作: state={from}, action={action}")]
    InvalidTransition {
        from: CastingState,
        action: &'static str,
    },

    #[error("时间倒退: {0}")]
    ClockWentBackwards(DateTime<Utc>),
}

/// 会话结束汇总
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastingSummary {
    pub session_id: String,
    pub label: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub pause_count: u32,
    pub active_ms: i64,
    pub paused_ms: i64,
}

impl CastingSummary {
    pub fn active_duration(&self) -> Duration {
        Duration::milliseconds(self.active_ms)
    }

    pub fn paused_duration(&self) -> Duration {
        Duration::milliseconds(self.paused_ms)
    }
}

/// 可持久化的会话快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastingSnapshot {
    pub session_id: String,
    pub label: String,
    pub state: CastingState,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub last_transition_at: Option<DateTime<Utc>>,
    pub last_saved_at: Option<DateTime<Utc>>,
    pub pause_count: u32,
    pub active_ms: i64,
    pub paused_ms: i64,
    pub autosave_interval_secs: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastingSession {
    id: String,
    label: String,
    state: CastingState,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    last_transition_at: Option<DateTime<Utc>>,
    last_saved_at: Option<DateTime<Utc>>,
    pause_count: u32,
    active_ms: i64,
    paused_ms: i64,
    autosave_interval: Duration,
}

impl CastingSession {
    pub fn new(label: impl Into<String>, autosave_interval: Duration) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            label: label.into(),
            state: CastingState::Idle,
            started_at: None,
            finished_at: None,
            last_transition_at: None,
            last_saved_at: None,
            pause_count: 0,
            active_ms: 0,
            paused_ms: 0,
            autosave_interval,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn state(&self) -> CastingState {
        self.state
    }

    pub fn pause_count(&self) -> u32 {
        self.pause_count
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.last_saved_at
    }

    fn invalid(&self, action: &'static str) -> CastingError {
        CastingError::InvalidTransition {
            from: self.state,
            action,
        }
    }

    /// 把上次切换以来的时间累加到当前状态
    fn accumulate(&mut self, now: DateTime<Utc>) -> Result<(), CastingError> {
        let since = match self.last_transition_at {
            Some(t) => t,
            None => return Ok(()),
        };
        let elapsed = (now - since).num_milliseconds();
        if elapsed < 0 {
            return Err(CastingError::ClockWentBackwards(now));
        }
        match self.state {
            CastingState::Running => self.active_ms += elapsed,
            CastingState::Paused => self.paused_ms += elapsed,
            CastingState::Idle | CastingState::Finished => {}
        }
        self.last_transition_at = Some(now);
        Ok(())
    }

    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), CastingError> {
        if self.state != CastingState::Idle {
            return Err(self.invalid("start"));
        }
        self.state = CastingState::Running;
        self.started_at = Some(now);
        self.last_transition_at = Some(now);
        self.last_saved_at = Some(now);
        Ok(())
    }

    pub fn pause(&mut self, now: DateTime<Utc>) -> Result<(), CastingError> {
        if self.state != CastingState::Running {
            return Err(self.invalid("pause"));
        }
        self.accumulate(now)?;
        self.state = CastingState::Paused;
        self.pause_count += 1;
        Ok(())
    }

    pub fn resume(&mut self, now: DateTime<Utc>) -> Result<(), CastingError> {
        if self.state != CastingState::Paused {
            return Err(self.invalid("resume"));
        }
        self.accumulate(now)?;
        self.state = CastingState::Running;
        Ok(())
    }

    pub fn finish(&mut self, now: DateTime<Utc>) -> Result<CastingSummary, CastingError> {
        if !matches!(self.state, CastingState::Running | CastingState::Paused) {
            return Err(self.invalid("finish"));
        }
        self.accumulate(now)?;
        self.state = CastingState::Finished;
        self.finished_at = Some(now);

        Ok(CastingSummary {
            session_id: self.id.clone(),
            label: self.label.clone(),
            started_at: self.started_at.unwrap_or(now),
            finished_at: now,
            pause_count: self.pause_count,
            active_ms: self.active_ms,
            paused_ms: self.paused_ms,
        })
    }

    /// 截至 now 的运行时长（含进行中的区段）
    pub fn active_duration(&self, now: DateTime<Utc>) -> Duration {
        let mut ms = self.active_ms;
        if self.state == CastingState::Running {
            ms += self.ongoing_ms(now);
        }
        Duration::milliseconds(ms)
    }

    /// 截至 now 的暂停时长（含进行中的区段）
    pub fn paused_duration(&self, now: DateTime<Utc>) -> Duration {
        let mut ms = self.paused_ms;
        if self.state == CastingState::Paused {
            ms += self.ongoing_ms(now);
        }
        Duration::milliseconds(ms)
    }

    fn ongoing_ms(&self, now: DateTime<Utc>) -> i64 {
        self.last_transition_at
            .map(|t| (now - t).num_milliseconds().max(0))
            .unwrap_or(0)
    }

    /// 是否到了自动保存时间
    pub fn autosave_due(&self, now: DateTime<Utc>) -> bool {
        if !matches!(self.state, CastingState::Running | CastingState::Paused) {
            return false;
        }
        match self.last_saved_at.or(self.started_at) {
            Some(saved) => now - saved >= self.autosave_interval,
            None => false,
        }
    }

    pub fn mark_saved(&mut self, now: DateTime<Utc>) {
        self.last_saved_at = Some(now);
    }

    pub fn snapshot(&self) -> CastingSnapshot {
        CastingSnapshot {
            session_id: self.id.clone(),
            label: self.label.clone(),
            state: self.state,
            started_at: self.started_at,
            finished_at: self.finished_at,
            last_transition_at: self.last_transition_at,
            last_saved_at: self.last_saved_at,
            pause_count: self.pause_count,
            active_ms: self.active_ms,
            paused_ms: self.paused_ms,
            autosave_interval_secs: self.autosave_interval.num_seconds(),
        }
    }

    /// 从快照恢复（应用重启后继续计时）
    pub fn from_snapshot(snapshot: CastingSnapshot) -> Self {
        Self {
            id: snapshot.session_id,
            label: snapshot.label,
            state: snapshot.state,
            started_at: snapshot.started_at,
            finished_at: snapshot.finished_at,
            last_transition_at: snapshot.last_transition_at,
            last_saved_at: snapshot.last_saved_at,
            pause_count: snapshot.pause_count,
            active_ms: snapshot.active_ms,
            paused_ms: snapshot.paused_ms,
            autosave_interval: Duration::seconds(snapshot.autosave_interval_secs),
        }
    }
}
