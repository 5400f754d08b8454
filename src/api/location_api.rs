// ==========================================
// 仓储管理后台 - 库位 API
// ==========================================
// 职责: 库位列表查询、单个/批量创建、修改、删除
// 批量创建: 预览流程提交后整批发往后端（全有或全无）
// ==========================================

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::api::paging::PagedResult;
use crate::api::validator::{finish, require_positive, require_text, FieldErrors};
use crate::config::ConfigManager;
use crate::domain::WarehouseLocation;
use crate::engine::filters::LocationFilter;
use crate::engine::location_number::{assign, AssignMode, SequentialLaNumberGenerator};
use crate::engine::paginator::Paginator;
use crate::engine::preview_flow::BulkLocationFlow;
use crate::engine::sorter::LocationSort;
use crate::gateway::InventoryBackend;

// ==========================================
// LocationForm - 单个库位表单
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationForm {
    pub location: String,
    pub shelf: Option<i64>,
    pub compartment: Option<i64>,
    pub floor: Option<i64>,
    pub for_sale: bool,
    pub special_storage: bool,
}

impl LocationForm {
    /// 从已有库位填充编辑表单
    pub fn from_location(location: &WarehouseLocation) -> Self {
        Self {
            location: location.location.clone(),
            shelf: Some(location.shelf),
            compartment: Some(location.compartment),
            floor: Some(location.floor),
            for_sale: location.for_sale,
            special_storage: location.special_storage,
        }
    }

    fn validate(&self) -> ApiResult<(String, i64, i64, i64)> {
        let mut errors = FieldErrors::new();
        let location = require_text(&mut errors, "location", &self.location);
        let shelf = require_positive(&mut errors, "shelf", self.shelf);
        let compartment = require_positive(&mut errors, "compartment", self.compartment);
        let floor = require_positive(&mut errors, "floor", self.floor);

        match (location, shelf, compartment, floor) {
            (Some(l), Some(s), Some(c), Some(f)) => Ok((l, s, c, f)),
            _ => {
                finish(errors)?;
                Err(ApiError::InternalError("表单校验状态不一致".to_string()))
            }
        }
    }
}

// ==========================================
// LocationApi - 库位 API
// ==========================================
pub struct LocationApi {
    backend: Arc<dyn InventoryBackend>,
    config: Arc<ConfigManager>,
}

impl LocationApi {
    pub fn new(backend: Arc<dyn InventoryBackend>, config: Arc<ConfigManager>) -> Self {
        Self { backend, config }
    }

    /// 拉取全部库位
    pub async fn list(&self) -> ApiResult<Vec<WarehouseLocation>> {
        let locations = self.backend.list_locations().await?;
        tracing::debug!(count = locations.len(), "加载库位列表");
        Ok(locations)
    }

    /// 过滤 → 排序 → 分页（作用于调用方持有的内存列表）
    pub fn query(
        locations: &[WarehouseLocation],
        filter: &LocationFilter,
        sort: &LocationSort,
        paginator: &mut Paginator,
    ) -> PagedResult<WarehouseLocation> {
        let mut filtered = filter.pipeline().apply(locations);
        sort.apply(&mut filtered);
        PagedResult::build(&filtered, paginator)
    }

    /// 以现有库位为种子构建编号生成器
    fn number_generator(
        &self,
        existing: &[WarehouseLocation],
    ) -> ApiResult<SequentialLaNumberGenerator> {
        let prefix = self.config.get_la_number_prefix()?;
        let width = self.config.get_la_number_width()?;
        Ok(SequentialLaNumberGenerator::seeded(&prefix, width, existing))
    }

    /// 新建单个库位
    pub async fn create_single(&self, form: &LocationForm) -> ApiResult<WarehouseLocation> {
        let (location, shelf, compartment, floor) = form.validate()?;

        let existing = self.backend.list_locations().await?;
        let mut generator = self.number_generator(&existing)?;

        let mut records = vec![WarehouseLocation::new(
            String::new(),
            location,
            shelf,
            compartment,
            floor,
            form.for_sale,
            form.special_storage,
        )];
        assign(&mut records, AssignMode::Commit(&mut generator));
        warn_on_known_collisions(&existing, &records);

        let created = self.backend.create_locations(&records).await?;
        let created = created
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::Decode("批量创建未返回记录".to_string()))?;

        tracing::info!(la_number = %created.la_number, "新建库位");
        Ok(created)
    }

    /// 提交批量生成流程
    ///
    /// 后端失败时流程保持 Previewed, 用户可重试或取消
    ///
    /// # 返回
    /// 后端落库后的记录（调用方追加到内存列表）
    pub async fn commit_bulk(
        &self,
        flow: &mut BulkLocationFlow,
    ) -> ApiResult<Vec<WarehouseLocation>> {
        if !flow.can_commit() {
            return Err(ApiError::InvalidStateTransition {
                from: flow.state().to_string(),
                to: "commit".to_string(),
            });
        }

        let existing = self.backend.list_locations().await?;
        let mut generator = self.number_generator(&existing)?;

        let mut attempt = flow.clone();
        let records = attempt.commit(&mut generator)?;
        warn_on_known_collisions(&existing, &records);

        let created = self.backend.create_locations(&records).await?;
        *flow = attempt;

        tracing::info!(count = created.len(), "批量创建库位");
        Ok(created)
    }

    /// 修改库位（坐标与标志）
    pub async fn update(
        &self,
        current: &WarehouseLocation,
        form: &LocationForm,
    ) -> ApiResult<WarehouseLocation> {
        if !current.id.is_persisted() {
            return Err(ApiError::InvalidInput(format!(
                "库位 {} 尚未保存",
                current.la_number
            )));
        }
        let (location, shelf, compartment, floor) = form.validate()?;

        let mut updated = current.clone();
        updated.location = location;
        updated.shelf = shelf;
        updated.compartment = compartment;
        updated.floor = floor;
        updated.for_sale = form.for_sale;
        updated.special_storage = form.special_storage;

        let saved = self.backend.update_location(&updated).await?;
        tracing::info!(id = %saved.id, la_number = %saved.la_number, "修改库位");
        Ok(saved)
    }

    /// 删除库位（仍有舒特时拒绝）
    pub async fn delete(&self, location: &WarehouseLocation) -> ApiResult<()> {
        let id = location.id.server_id().ok_or_else(|| {
            ApiError::InvalidInput(format!("库位 {} 尚未保存", location.la_number))
        })?;
        if location.container_count > 0 {
            return Err(ApiError::BusinessRuleViolation(format!(
                "Lagerort {} enthält noch {} Schütte(n)",
                location.la_number, location.container_count
            )));
        }

        self.backend.delete_location(id).await?;
        tracing::info!(id, la_number = %location.la_number, "删除库位");
        Ok(())
    }
}

/// 已知列表中已存在相同坐标时告警（唯一性由后端保证）
fn warn_on_known_collisions(existing: &[WarehouseLocation], records: &[WarehouseLocation]) {
    let known: HashSet<(&str, i64, i64, i64)> = existing.iter().map(|l| l.slot_key()).collect();
    let collisions = records
        .iter()
        .filter(|r| known.contains(&r.slot_key()))
        .count();
    if collisions > 0 {
        tracing::warn!(collisions, "提交的库位坐标与已知库位重复");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_validation_reports_each_field() {
        let form = LocationForm {
            location: String::new(),
            shelf: Some(1),
            compartment: Some(-2),
            floor: None,
            ..Default::default()
        };
        let err = form.validate().unwrap_err();
        let errors = err.field_errors().unwrap();
        assert!(errors.contains("location"));
        assert!(errors.contains("compartment"));
        assert!(errors.contains("floor"));
        assert!(!errors.contains("shelf"));
    }

    #[test]
    fn test_query_filters_sorts_and_pages() {
        let list: Vec<WarehouseLocation> = (1..=12)
            .map(|i| {
                WarehouseLocation::new(
                    format!("LA-{:05}", 13 - i),
                    if i % 2 == 0 { "A" } else { "B" }.to_string(),
                    i,
                    1,
                    1,
                    false,
                    false,
                )
            })
            .collect();

        let filter = LocationFilter {
            location: "A".into(),
            ..Default::default()
        };
        let mut paginator = Paginator::new(4);
        let page = LocationApi::query(&list, &filter, &LocationSort::default(), &mut paginator);
        assert_eq!(page.total, 6);
        assert_eq!(page.page_count, 2);
        let shelves: Vec<i64> = page.items.iter().map(|l| l.shelf).collect();
        assert_eq!(shelves, vec![2, 4, 6, 8]);
    }
}
