// ==========================================
// 仓储管理后台 - 舒特 API
// ==========================================
// 职责: 舒特列表、创建、编辑、删除、单元维护、移库
// 单元维护: 加载 → 修改 → 重新编号 → 保存（后写者覆盖）
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::api::paging::PagedResult;
use crate::api::validator::{finish, require_text, FieldErrors};
use crate::domain::{ContainerItem, ContainerType, UnitDraft, MAX_SLOTS};
use crate::engine::filters::ContainerFilter;
use crate::engine::paginator::Paginator;
use crate::engine::sorter::ContainerSort;
use crate::gateway::InventoryBackend;
use crate::repository::SettingsRepository;

// ==========================================
// 表单
// ==========================================

/// 新建舒特表单
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerForm {
    pub container_code: String,
    pub container_type_id: String,
    /// 覆盖类型默认格数
    pub custom_slot_count: Option<i64>,
    pub purpose: String,
    pub description: String,
}

/// 编辑舒特表单
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerEditForm {
    pub purpose: String,
    pub description: String,
    pub slot_count: Option<i64>,
}

fn slot_count_field(errors: &mut FieldErrors, field: &str, value: Option<i64>) -> Option<u32> {
    match value {
        None => None,
        Some(v) => match u32::try_from(v) {
            Ok(n) if n > MAX_SLOTS => {
                errors.add(field, format!("Höchstens {} Fächer", MAX_SLOTS));
                None
            }
            Ok(n) if n >= 1 => Some(n),
            _ => {
                errors.add(field, "Muss eine positive Zahl sein");
                None
            }
        },
    }
}

// ==========================================
// ContainerApi - 舒特 API
// ==========================================
pub struct ContainerApi {
    backend: Arc<dyn InventoryBackend>,
    container_types: Arc<dyn SettingsRepository<ContainerType>>,
}

impl ContainerApi {
    pub fn new(
        backend: Arc<dyn InventoryBackend>,
        container_types: Arc<dyn SettingsRepository<ContainerType>>,
    ) -> Self {
        Self {
            backend,
            container_types,
        }
    }

    pub async fn list(&self) -> ApiResult<Vec<ContainerItem>> {
        let containers = self.backend.list_containers().await?;
        tracing::debug!(count = containers.len(), "加载舒特列表");
        Ok(containers)
    }

    /// 过滤 → 排序 → 分页（作用于调用方持有的内存列表）
    pub fn query(
        containers: &[ContainerItem],
        filter: &ContainerFilter,
        sort: &ContainerSort,
        paginator: &mut Paginator,
    ) -> PagedResult<ContainerItem> {
        let mut filtered = filter.pipeline().apply(containers);
        sort.apply(&mut filtered);
        PagedResult::build(&filtered, paginator)
    }

    /// 新建舒特: 按类型生成格位, 零个单元
    pub async fn create(&self, form: &ContainerForm) -> ApiResult<ContainerItem> {
        let mut errors = FieldErrors::new();
        let code = require_text(&mut errors, "containerCode", &form.container_code);
        let type_id = require_text(&mut errors, "containerType", &form.container_type_id);
        let purpose = require_text(&mut errors, "purpose", &form.purpose);
        let custom_slots = slot_count_field(&mut errors, "customSlotCount", form.custom_slot_count);

        let container_type = match type_id {
            Some(id) => {
                let found = self.container_types.get(&id)?;
                if found.is_none() {
                    errors.add("containerType", "Unbekannter Schüttentyp");
                }
                found
            }
            None => None,
        };
        finish(errors)?;

        let (code, purpose, container_type) = match (code, purpose, container_type) {
            (Some(c), Some(p), Some(t)) => (c, p, t),
            _ => return Err(ApiError::InternalError("表单校验状态不一致".to_string())),
        };

        let draft = ContainerItem::draft(
            code,
            &container_type,
            custom_slots,
            purpose,
            form.description.trim().to_string(),
        )?;
        let created = self.backend.create_container(&draft).await?;
        tracing::info!(
            id = %created.id,
            code = %created.container_code,
            slots = created.slots.len(),
            "新建舒特"
        );
        Ok(created)
    }

    /// 编辑用途/描述/格数
    pub async fn update(
        &self,
        container_id: &str,
        form: &ContainerEditForm,
    ) -> ApiResult<ContainerItem> {
        let mut errors = FieldErrors::new();
        let purpose = require_text(&mut errors, "purpose", &form.purpose);
        let slot_count = slot_count_field(&mut errors, "slotCount", form.slot_count);
        finish(errors)?;

        let mut container = self.backend.get_container(container_id).await?;
        if let Some(p) = purpose {
            container.purpose = p;
        }
        container.description = form.description.trim().to_string();
        if let Some(n) = slot_count {
            container.resize_slots(n)?;
        }

        let saved = self.backend.update_container(&container).await?;
        tracing::info!(id = %saved.id, "修改舒特");
        Ok(saved)
    }

    pub async fn delete(&self, container_id: &str) -> ApiResult<()> {
        if container_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("舒特ID不能为空".to_string()));
        }
        self.backend.delete_container(container_id).await?;
        tracing::info!(id = container_id, "删除舒特");
        Ok(())
    }

    // ===== 单元维护 =====

    pub async fn add_unit(&self, container_id: &str, draft: UnitDraft) -> ApiResult<ContainerItem> {
        let mut container = self.backend.get_container(container_id).await?;
        container.add_unit(draft)?;
        self.save_units(container).await
    }

    /// 删除单元（position 从 1 开始）, 其余单元重新编号
    pub async fn remove_unit(&self, container_id: &str, position: usize) -> ApiResult<ContainerItem> {
        let mut container = self.backend.get_container(container_id).await?;
        container.remove_unit(position)?;
        self.save_units(container).await
    }

    pub async fn update_unit(
        &self,
        container_id: &str,
        position: usize,
        draft: UnitDraft,
    ) -> ApiResult<ContainerItem> {
        let mut container = self.backend.get_container(container_id).await?;
        container.update_unit(position, draft)?;
        self.save_units(container).await
    }

    async fn save_units(&self, mut container: ContainerItem) -> ApiResult<ContainerItem> {
        container.renumber_units();
        let saved = self.backend.update_container(&container).await?;
        tracing::info!(id = %saved.id, units = saved.units.len(), "保存舒特单元");
        Ok(saved)
    }

    // ===== 移库 =====

    /// 舒特移入库位
    pub async fn move_to_location(
        &self,
        container_id: &str,
        location_id: &str,
    ) -> ApiResult<ContainerItem> {
        if container_id.trim().is_empty() || location_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("舒特ID与库位ID不能为空".to_string()));
        }
        let moved = self.backend.move_container(container_id, location_id).await?;
        tracing::info!(
            id = %moved.id,
            location = moved.location_name(),
            shelf = ?moved.shelf,
            "舒特移库"
        );
        Ok(moved)
    }
}
