// ==========================================
// 仓储管理后台 - 活动日志
// ==========================================
// 由后端记录, 前端只读 (列表/过滤/分页)
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub user: String,
    pub action: String,      // 如 "create" / "update" / "delete" / "move"
    pub entity_type: String, // 如 "location" / "container"
    pub entity_id: Option<String>,
    pub details: Option<String>,
}

impl ActivityLog {
    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn details_text(&self) -> &str {
        self.details.as_deref().unwrap_or("")
    }
}
