// ==========================================
// 仓储管理后台 - 后端 JSON 报文结构
// ==========================================
// 字段名与后端保持一致 (camelCase)
// 仅做形状映射, 取值校验在 decode 模块
// ==========================================

use serde::{Deserialize, Serialize};

// ===== 库位 =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub la_number: String,
    pub location: String,
    pub shelf: i64,
    pub compartment: i64,
    pub floor: i64,
    #[serde(default)]
    pub for_sale: bool,
    #[serde(default)]
    pub special_storage: bool,
    #[serde(default)]
    pub container_count: i64,
    pub status: String,
}

// ===== 舒特 =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDto {
    pub number: i64,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitDto {
    #[serde(default)]
    pub unit_number: Option<i64>,
    #[serde(default)]
    pub article_number: Option<String>,
    #[serde(default)]
    pub legacy_article_number: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stock: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub container_code: String,
    #[serde(rename = "type")]
    pub container_type: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub slots: Vec<SlotDto>,
    #[serde(default)]
    pub units: Vec<UnitDto>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub shelf: Option<i64>,
    #[serde(default)]
    pub compartment: Option<i64>,
    #[serde(default)]
    pub floor: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveContainerDto {
    pub location_id: String,
}

// ===== 商品 =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantDto {
    pub id: String,
    pub sku: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub stock: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub article_number: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub variants: Vec<VariantDto>,
}

fn default_true() -> bool {
    true
}

// ===== 活动日志 =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogDto {
    pub id: String,
    pub timestamp: String,
    #[serde(default)]
    pub user: String,
    pub action: String,
    pub entity_type: String,
    #[serde(default)]
    pub entity_id: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}
