// ==========================================
// 仓储管理后台 - 界面状态（库位 / 舒特）
// ==========================================
// 持有: 内存列表 + 过滤条件 + 排序 + 分页器 + 浮层 + 错误横幅
// 规则:
// - 操作成功: 整体替换/追加列表, 清除横幅
// - 操作失败: 设置横幅, 列表保持不变
// - 修改过滤条件或每页条数: 回到第 1 页
// ==========================================

use std::sync::Arc;

use crate::api::{
    ApiError, ApiResult, ContainerApi, ContainerEditForm, ContainerForm, LocationApi,
    LocationForm, PagedResult,
};
use crate::app::overlay::ActiveOverlay;
use crate::domain::{ContainerItem, UnitDraft, WarehouseLocation};
use crate::engine::filters::{ContainerFilter, LocationFilter};
use crate::engine::paginator::Paginator;
use crate::engine::preview_flow::{BulkLocationFlow, BulkLocationForm};
use crate::engine::sorter::{ContainerSort, ContainerSortField, LocationSort, LocationSortField};

/// 结果写入横幅: 失败记录消息, 成功清除
fn record<T>(banner: &mut Option<String>, result: ApiResult<T>) -> ApiResult<T> {
    match &result {
        Ok(_) => *banner = None,
        Err(e) => {
            tracing::warn!("界面操作失败: {}", e);
            *banner = Some(e.to_string());
        }
    }
    result
}

fn set_page_size(paginator: &mut Paginator, size: usize) -> ApiResult<()> {
    paginator.set_page_size(size).map_err(ApiError::InvalidInput)
}

// ==========================================
// LocationScreen - 库位界面
// ==========================================
pub struct LocationScreen {
    api: Arc<LocationApi>,
    locations: Vec<WarehouseLocation>,
    filter: LocationFilter,
    sort: LocationSort,
    paginator: Paginator,
    overlay: ActiveOverlay,
    error: Option<String>,
}

impl LocationScreen {
    pub fn new(api: Arc<LocationApi>, page_size: usize) -> Self {
        Self {
            api,
            locations: Vec::new(),
            filter: LocationFilter::default(),
            sort: LocationSort::default(),
            paginator: Paginator::new(page_size),
            overlay: ActiveOverlay::None,
            error: None,
        }
    }

    pub fn locations(&self) -> &[WarehouseLocation] {
        &self.locations
    }

    pub fn filter(&self) -> &LocationFilter {
        &self.filter
    }

    pub fn overlay(&self) -> &ActiveOverlay {
        &self.overlay
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    // ===== 列表 =====

    pub async fn refresh(&mut self) -> ApiResult<()> {
        let result = self.api.list().await;
        let locations = record(&mut self.error, result)?;
        self.locations = locations;
        Ok(())
    }

    /// 当前页（过滤 → 排序 → 分页）
    pub fn page(&mut self) -> PagedResult<WarehouseLocation> {
        LocationApi::query(&self.locations, &self.filter, &self.sort, &mut self.paginator)
    }

    pub fn set_filter(&mut self, filter: LocationFilter) {
        self.filter = filter;
        self.paginator.reset();
    }

    pub fn set_page_size(&mut self, size: usize) -> ApiResult<()> {
        set_page_size(&mut self.paginator, size)
    }

    pub fn go_to_page(&mut self, page: usize) {
        let total = self.filter.pipeline().apply(&self.locations).len();
        self.paginator.go_to(page, total);
    }

    pub fn toggle_sort(&mut self, field: LocationSortField) {
        self.sort.toggle(field);
    }

    fn find(&self, id: &str) -> ApiResult<&WarehouseLocation> {
        self.locations
            .iter()
            .find(|l| l.id.server_id() == Some(id))
            .ok_or_else(|| ApiError::NotFound(format!("location(id={})不存在", id)))
    }

    // ===== 浮层 =====

    pub fn open_overlay(&mut self, overlay: ActiveOverlay) {
        self.overlay.open(overlay);
    }

    pub fn close_overlay(&mut self) {
        self.overlay.close();
    }

    pub fn open_bulk_create(&mut self) {
        self.overlay
            .open(ActiveOverlay::BulkCreateLocations(BulkLocationFlow::new()));
    }

    fn bulk_flow_mut(&mut self) -> ApiResult<&mut BulkLocationFlow> {
        self.overlay
            .bulk_flow_mut()
            .ok_or_else(|| ApiError::InvalidInput("批量创建浮层未打开".to_string()))
    }

    pub fn bulk_update_form(&mut self, form: BulkLocationForm) -> ApiResult<()> {
        self.bulk_flow_mut()?.update_form(form)?;
        Ok(())
    }

    /// 生成预览（校验错误保存在流程内, 供表单展示）
    pub fn bulk_preview(&mut self) -> ApiResult<Vec<WarehouseLocation>> {
        let preview = self.bulk_flow_mut()?.generate_preview()?;
        Ok(preview.to_vec())
    }

    /// 提交批量创建; 成功后追加到列表并关闭浮层
    pub async fn bulk_commit(&mut self) -> ApiResult<usize> {
        let flow = match self.overlay.bulk_flow_mut() {
            Some(flow) => flow,
            None => return Err(ApiError::InvalidInput("批量创建浮层未打开".to_string())),
        };
        let result = self.api.commit_bulk(flow).await;
        let created = record(&mut self.error, result)?;

        let count = created.len();
        self.locations.extend(created);
        self.overlay.close();
        Ok(count)
    }

    pub fn bulk_cancel(&mut self) -> ApiResult<()> {
        self.bulk_flow_mut()?.cancel()?;
        self.overlay.close();
        Ok(())
    }

    // ===== 单条操作 =====

    pub async fn create(&mut self, form: &LocationForm) -> ApiResult<()> {
        let result = self.api.create_single(form).await;
        let created = record(&mut self.error, result)?;
        self.locations.push(created);
        self.overlay.close();
        Ok(())
    }

    pub async fn update(&mut self, id: &str, form: &LocationForm) -> ApiResult<()> {
        let current = self.find(id)?.clone();
        let result = self.api.update(&current, form).await;
        let saved = record(&mut self.error, result)?;
        if let Some(slot) = self
            .locations
            .iter_mut()
            .find(|l| l.id.server_id() == Some(id))
        {
            *slot = saved;
        }
        self.overlay.close();
        Ok(())
    }

    pub async fn delete(&mut self, id: &str) -> ApiResult<()> {
        let current = self.find(id)?.clone();
        let result = self.api.delete(&current).await;
        record(&mut self.error, result)?;
        self.locations.retain(|l| l.id.server_id() != Some(id));
        self.overlay.close();
        Ok(())
    }
}

// ==========================================
// ContainerScreen - 舒特界面
// ==========================================
pub struct ContainerScreen {
    api: Arc<ContainerApi>,
    containers: Vec<ContainerItem>,
    filter: ContainerFilter,
    sort: ContainerSort,
    paginator: Paginator,
    overlay: ActiveOverlay,
    error: Option<String>,
}

impl ContainerScreen {
    pub fn new(api: Arc<ContainerApi>, page_size: usize) -> Self {
        Self {
            api,
            containers: Vec::new(),
            filter: ContainerFilter::default(),
            sort: ContainerSort::default(),
            paginator: Paginator::new(page_size),
            overlay: ActiveOverlay::None,
            error: None,
        }
    }

    pub fn containers(&self) -> &[ContainerItem] {
        &self.containers
    }

    pub fn overlay(&self) -> &ActiveOverlay {
        &self.overlay
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub async fn refresh(&mut self) -> ApiResult<()> {
        let result = self.api.list().await;
        let containers = record(&mut self.error, result)?;
        self.containers = containers;
        Ok(())
    }

    pub fn page(&mut self) -> PagedResult<ContainerItem> {
        ContainerApi::query(&self.containers, &self.filter, &self.sort, &mut self.paginator)
    }

    pub fn set_filter(&mut self, filter: ContainerFilter) {
        self.filter = filter;
        self.paginator.reset();
    }

    pub fn set_page_size(&mut self, size: usize) -> ApiResult<()> {
        set_page_size(&mut self.paginator, size)
    }

    pub fn go_to_page(&mut self, page: usize) {
        let total = self.filter.pipeline().apply(&self.containers).len();
        self.paginator.go_to(page, total);
    }

    pub fn toggle_sort(&mut self, field: ContainerSortField) {
        self.sort.toggle(field);
    }

    pub fn open_overlay(&mut self, overlay: ActiveOverlay) {
        self.overlay.open(overlay);
    }

    pub fn close_overlay(&mut self) {
        self.overlay.close();
    }

    /// 用后端返回的记录替换列表中的同ID舒特
    fn replace(&mut self, saved: ContainerItem) {
        match self.containers.iter_mut().find(|c| c.id == saved.id) {
            Some(slot) => *slot = saved,
            None => self.containers.push(saved),
        }
    }

    pub async fn create(&mut self, form: &ContainerForm) -> ApiResult<()> {
        let result = self.api.create(form).await;
        let created = record(&mut self.error, result)?;
        self.containers.push(created);
        self.overlay.close();
        Ok(())
    }

    pub async fn update(&mut self, id: &str, form: &ContainerEditForm) -> ApiResult<()> {
        let result = self.api.update(id, form).await;
        let saved = record(&mut self.error, result)?;
        self.replace(saved);
        Ok(())
    }

    pub async fn delete(&mut self, id: &str) -> ApiResult<()> {
        let result = self.api.delete(id).await;
        record(&mut self.error, result)?;
        self.containers.retain(|c| c.id != id);
        self.overlay.close();
        Ok(())
    }

    pub async fn add_unit(&mut self, id: &str, draft: UnitDraft) -> ApiResult<()> {
        let result = self.api.add_unit(id, draft).await;
        let saved = record(&mut self.error, result)?;
        self.replace(saved);
        Ok(())
    }

    pub async fn remove_unit(&mut self, id: &str, position: usize) -> ApiResult<()> {
        let result = self.api.remove_unit(id, position).await;
        let saved = record(&mut self.error, result)?;
        self.replace(saved);
        Ok(())
    }

    pub async fn update_unit(&mut self, id: &str, position: usize, draft: UnitDraft) -> ApiResult<()> {
        let result = self.api.update_unit(id, position, draft).await;
        let saved = record(&mut self.error, result)?;
        self.replace(saved);
        Ok(())
    }

    pub async fn move_to_location(&mut self, container_id: &str, location_id: &str) -> ApiResult<()> {
        let result = self.api.move_to_location(container_id, location_id).await;
        let moved = record(&mut self.error, result)?;
        self.replace(moved);
        self.overlay.close();
        Ok(())
    }
}

/// 并发加载两个界面的列表
///
/// 两个请求互不影响: 一个失败只设置该界面的横幅
pub async fn refresh_all(
    locations: &mut LocationScreen,
    containers: &mut ContainerScreen,
) -> (ApiResult<()>, ApiResult<()>) {
    futures::join!(locations.refresh(), containers.refresh())
}
