// ==========================================
// 仓储管理后台 - 库位领域模型 (Lagerort)
// ==========================================
// 坐标: 货架(shelf) / 格(compartment) / 层(floor)
// 约束: (location, shelf, compartment, floor) 在已提交库位中应唯一,
//       生成器仅保证单次生成内部不重复, 跨批次唯一性由后端负责
// ==========================================

use crate::domain::types::LocationStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// LocationId - 库位标识
// ==========================================
// 预览阶段: 本地临时ID (preview-<货架>-<格>-<层>)
// 提交后未落库: Unsaved
// 已持久化: 服务端ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum LocationId {
    Preview(String),
    Unsaved,
    Persisted(String),
}

impl LocationId {
    /// 预览临时ID
    pub fn preview(shelf: i64, compartment: i64, floor: i64) -> Self {
        LocationId::Preview(format!("preview-{}-{}-{}", shelf, compartment, floor))
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self, LocationId::Persisted(_))
    }

    /// 服务端ID（仅持久化后存在）
    pub fn server_id(&self) -> Option<&str> {
        match self {
            LocationId::Persisted(id) => Some(id.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationId::Preview(id) | LocationId::Persisted(id) => write!(f, "{}", id),
            LocationId::Unsaved => write!(f, "unsaved"),
        }
    }
}

// ==========================================
// WarehouseLocation - 库位
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseLocation {
    pub id: LocationId,
    pub la_number: String, // 库位编号 (人工可读)
    pub location: String,  // 仓库/区域名称

    // ===== 坐标 =====
    pub shelf: i64,
    pub compartment: i64,
    pub floor: i64,

    // ===== 标志 =====
    pub for_sale: bool,        // 可售库位
    pub special_storage: bool, // 特殊存储

    pub container_count: u32,
    pub status: LocationStatus,
}

impl WarehouseLocation {
    /// 新建（未落库）库位: 舒特数量 0, 状态 free
    pub fn new(
        la_number: String,
        location: String,
        shelf: i64,
        compartment: i64,
        floor: i64,
        for_sale: bool,
        special_storage: bool,
    ) -> Self {
        Self {
            id: LocationId::Unsaved,
            la_number,
            location,
            shelf,
            compartment,
            floor,
            for_sale,
            special_storage,
            container_count: 0,
            status: LocationStatus::Free,
        }
    }

    /// 坐标三元组
    pub fn coordinates(&self) -> (i64, i64, i64) {
        (self.shelf, self.compartment, self.floor)
    }

    /// 唯一性键 (location, shelf, compartment, floor)
    pub fn slot_key(&self) -> (&str, i64, i64, i64) {
        (self.location.as_str(), self.shelf, self.compartment, self.floor)
    }

    pub fn is_free(&self) -> bool {
        self.status == LocationStatus::Free
    }

    // ===== 过滤器字段访问器 =====

    pub fn la_number(&self) -> &str {
        &self.la_number
    }

    pub fn location_name(&self) -> &str {
        &self.location
    }

    pub fn status_str(&self) -> &str {
        self.status.as_str()
    }

    pub fn for_sale_flag(&self) -> bool {
        self.for_sale
    }

    pub fn special_storage_flag(&self) -> bool {
        self.special_storage
    }

    pub fn shelf_value(&self) -> Option<i64> {
        Some(self.shelf)
    }

    pub fn compartment_value(&self) -> Option<i64> {
        Some(self.compartment)
    }

    pub fn floor_value(&self) -> Option<i64> {
        Some(self.floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_location_defaults() {
        let loc = WarehouseLocation::new(
            "LA-00001".to_string(),
            "Hauptlager 1".to_string(),
            1,
            2,
            3,
            true,
            false,
        );
        assert_eq!(loc.id, LocationId::Unsaved);
        assert_eq!(loc.container_count, 0);
        assert_eq!(loc.status, LocationStatus::Free);
        assert_eq!(loc.coordinates(), (1, 2, 3));
    }

    #[test]
    fn test_preview_id_format() {
        let id = LocationId::preview(2, 1, 4);
        assert_eq!(id, LocationId::Preview("preview-2-1-4".to_string()));
        assert_eq!(id.to_string(), "preview-2-1-4");
        assert!(id.server_id().is_none());
    }
}
