// ==========================================
// 仓储管理后台 - 应用内通知
// ==========================================

use crate::domain::types::NotificationLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
    pub read: bool,
}

impl Notification {
    /// 新建未读通知（自动生成 UUID 和时间戳）
    pub fn new(level: NotificationLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            level,
            title: title.into(),
            message: message.into(),
            read: false,
        }
    }
}
