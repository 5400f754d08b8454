// ==========================================
// 仓储管理后台 - 通知 API
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{Notification, NotificationLevel};
use crate::repository::NotificationRepository;

/// 通知列表默认条数
pub const DEFAULT_NOTIFICATION_LIMIT: usize = 50;

pub struct NotificationApi {
    repo: Arc<NotificationRepository>,
}

impl NotificationApi {
    pub fn new(repo: Arc<NotificationRepository>) -> Self {
        Self { repo }
    }

    /// 新建并保存通知
    pub fn push(
        &self,
        level: NotificationLevel,
        title: &str,
        message: &str,
    ) -> ApiResult<Notification> {
        if title.trim().is_empty() {
            return Err(ApiError::field("title", "Pflichtfeld"));
        }
        let notification = Notification::new(level, title.trim(), message);
        self.repo.insert(&notification)?;
        tracing::debug!(id = %notification.id, ?level, "新增通知");
        Ok(notification)
    }

    pub fn list(&self, limit: Option<usize>) -> ApiResult<Vec<Notification>> {
        Ok(self.repo.list(limit.unwrap_or(DEFAULT_NOTIFICATION_LIMIT))?)
    }

    pub fn mark_read(&self, id: &str) -> ApiResult<()> {
        Ok(self.repo.mark_read(id)?)
    }

    pub fn mark_all_read(&self) -> ApiResult<usize> {
        let count = self.repo.mark_all_read()?;
        tracing::debug!(count, "全部通知标记为已读");
        Ok(count)
    }

    pub fn unread_count(&self) -> ApiResult<usize> {
        Ok(self.repo.unread_count()?)
    }

    pub fn delete(&self, id: &str) -> ApiResult<()> {
        Ok(self.repo.delete(id)?)
    }
}
