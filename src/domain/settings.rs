// ==========================================
// 仓储管理后台 - 设置类记录
// ==========================================
// 打印机 / 秤 / 用途 / 舒特类型
// 平面记录, 无派生约束, 由 SettingsRepository 统一存取
// ==========================================

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// 设置记录 Trait
///
/// KIND 作为存储分区键, 同一仓储表内按 KIND 区分记录类型
pub trait SettingsRecord: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: &'static str;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// 展示名称（用于排序/日志）
    fn display_name(&self) -> &str;
}

// ==========================================
// Printer - 标签打印机
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Printer {
    pub id: String,
    pub name: String,
    pub host: String,
    pub port: u16,
    pub label_width_mm: u32,
    pub label_height_mm: u32,
    pub is_default: bool,
}

impl SettingsRecord for Printer {
    const KIND: &'static str = "printer";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

// ==========================================
// Scale - 秤
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub id: String,
    pub name: String,
    pub host: String,
    pub port: u16,
    pub unit: String, // 称量单位, 如 "kg"
}

impl SettingsRecord for Scale {
    const KIND: &'static str = "scale";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

// ==========================================
// Purpose - 舒特用途
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purpose {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl SettingsRecord for Purpose {
    const KIND: &'static str = "purpose";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

// ==========================================
// ContainerType - 舒特类型
// ==========================================
// code: 短代码 (如 "S4"), slot_count: 默认格数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerType {
    pub id: String,
    pub code: String,
    pub name: String,
    pub slot_count: u32,
}

impl SettingsRecord for ContainerType {
    const KIND: &'static str = "container_type";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}
