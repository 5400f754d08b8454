// ==========================================
// 仓储管理后台 - 活动日志 API
// ==========================================
// 只读: 按时间倒序 → 过滤 → 分页
// ==========================================

use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::paging::PagedResult;
use crate::domain::{ActivityLog, SortDirection};
use crate::engine::filters::ActivityFilter;
use crate::engine::paginator::Paginator;
use crate::engine::sorter::sort_by_key;
use crate::gateway::InventoryBackend;

pub struct ActivityApi {
    backend: Arc<dyn InventoryBackend>,
}

impl ActivityApi {
    pub fn new(backend: Arc<dyn InventoryBackend>) -> Self {
        Self { backend }
    }

    /// 拉取活动日志（最新在前）
    pub async fn list(&self) -> ApiResult<Vec<ActivityLog>> {
        let mut logs = self.backend.list_activity_logs().await?;
        sort_by_key(&mut logs, SortDirection::Desc, |l| l.timestamp);
        tracing::debug!(count = logs.len(), "加载活动日志");
        Ok(logs)
    }

    pub fn query(
        logs: &[ActivityLog],
        filter: &ActivityFilter,
        paginator: &mut Paginator,
    ) -> PagedResult<ActivityLog> {
        let mut filtered = filter.pipeline().apply(logs);
        sort_by_key(&mut filtered, SortDirection::Desc, |l| l.timestamp);
        PagedResult::build(&filtered, paginator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn log(id: &str, secs: i64, action: &str) -> ActivityLog {
        ActivityLog {
            id: id.to_string(),
            timestamp: Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap(),
            user: "lager".to_string(),
            action: action.to_string(),
            entity_type: "location".to_string(),
            entity_id: None,
            details: None,
        }
    }

    #[test]
    fn test_query_newest_first_with_filter() {
        let logs = vec![
            log("a", 10, "create"),
            log("b", 30, "delete"),
            log("c", 20, "create"),
            log("d", 40, "create"),
        ];
        let filter = ActivityFilter {
            action: "create".into(),
            ..Default::default()
        };
        let page = ActivityApi::query(&logs, &filter, &mut Paginator::new(2));
        assert_eq!(page.total, 3);
        let ids: Vec<&str> = page.items.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["d", "c"]);
    }
}
