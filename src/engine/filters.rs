// ==========================================
// 仓储管理后台 - 各列表的过滤条件表单
// ==========================================
// 表单字段均为原始输入字符串, 默认 "" (无约束)
// 条件顺序固定: 搜索 → 分类 → 标志 → 坐标
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::{ActivityLog, ContainerItem, Product, WarehouseLocation};
use crate::engine::filter::{FilterPipeline, TextField};

// ==========================================
// LocationFilter - 库位列表
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationFilter {
    pub search: String,
    pub location: String,
    pub status: String,
    pub for_sale: String,
    pub special_storage: String,
    pub shelf: String,
    pub compartment: String,
    pub floor: String,
}

impl LocationFilter {
    pub fn pipeline(&self) -> FilterPipeline<WarehouseLocation> {
        let search_fields: Vec<TextField<WarehouseLocation>> = vec![
            WarehouseLocation::la_number,
            WarehouseLocation::location_name,
        ];

        FilterPipeline::<WarehouseLocation>::new()
            .text("search", &self.search, search_fields)
            .category("location", &self.location, WarehouseLocation::location_name)
            .category("status", &self.status, WarehouseLocation::status_str)
            .flag("forSale", &self.for_sale, WarehouseLocation::for_sale_flag)
            .flag(
                "specialStorage",
                &self.special_storage,
                WarehouseLocation::special_storage_flag,
            )
            .number("shelf", &self.shelf, WarehouseLocation::shelf_value)
            .number("compartment", &self.compartment, WarehouseLocation::compartment_value)
            .number("floor", &self.floor, WarehouseLocation::floor_value)
    }
}

// ==========================================
// ContainerFilter - 舒特列表
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerFilter {
    pub search: String,
    pub container_type: String,
    pub purpose: String,
    pub location: String,
    pub shelf: String,
    pub compartment: String,
    pub floor: String,
}

impl ContainerFilter {
    pub fn pipeline(&self) -> FilterPipeline<ContainerItem> {
        let search_fields: Vec<TextField<ContainerItem>> = vec![
            ContainerItem::container_code,
            ContainerItem::description_text,
            ContainerItem::purpose_name,
        ];

        FilterPipeline::<ContainerItem>::new()
            .text("search", &self.search, search_fields)
            .category("type", &self.container_type, ContainerItem::container_type_code)
            .category("purpose", &self.purpose, ContainerItem::purpose_name)
            .category("location", &self.location, ContainerItem::location_name)
            .number("shelf", &self.shelf, ContainerItem::shelf_value)
            .number("compartment", &self.compartment, ContainerItem::compartment_value)
            .number("floor", &self.floor, ContainerItem::floor_value)
    }
}

// ==========================================
// ProductFilter - 商品列表
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub search: String,
    pub category: String,
    pub active: String,
}

impl ProductFilter {
    pub fn pipeline(&self) -> FilterPipeline<Product> {
        let search_fields: Vec<TextField<Product>> = vec![Product::article_number, Product::name];

        FilterPipeline::<Product>::new()
            .text("search", &self.search, search_fields)
            .category("category", &self.category, Product::category)
            .flag("active", &self.active, Product::active_flag)
    }
}

// ==========================================
// ActivityFilter - 活动日志
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityFilter {
    pub search: String,
    pub action: String,
    pub entity_type: String,
    pub user: String,
}

impl ActivityFilter {
    pub fn pipeline(&self) -> FilterPipeline<ActivityLog> {
        let search_fields: Vec<TextField<ActivityLog>> =
            vec![ActivityLog::user, ActivityLog::details_text];

        FilterPipeline::<ActivityLog>::new()
            .text("search", &self.search, search_fields)
            .category("action", &self.action, ActivityLog::action)
            .category("entityType", &self.entity_type, ActivityLog::entity_type)
            .category("user", &self.user, ActivityLog::user)
    }
}
