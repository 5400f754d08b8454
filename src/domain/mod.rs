// ==========================================
// 仓储管理后台 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、不变量
// 红线: 不含数据访问逻辑, 不含网络逻辑
// ==========================================

pub mod activity;
pub mod catalog;
pub mod container;
pub mod location;
pub mod notification;
pub mod placement;
pub mod settings;
pub mod types;

// 重导出核心类型
pub use activity::ActivityLog;
pub use catalog::{Product, ProductVariant};
pub use container::{ContainerError, ContainerItem, ContainerUnit, Slot, UnitDraft, MAX_SLOTS};
pub use location::{LocationId, WarehouseLocation};
pub use notification::Notification;
pub use settings::{ContainerType, Printer, Purpose, Scale, SettingsRecord};
pub use types::{LocationStatus, NotificationLevel, SortDirection};
