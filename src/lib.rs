// ==========================================
// 仓储管理后台 - 核心库
// ==========================================
// 技术栈: Rust + SQLite + REST 后端
// 系统定位: 库位 / 舒特 / 设置管理的界面逻辑核心
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 纯业务规则（展开/编号/过滤/分页/预览流程）
pub mod engine;

// 数据仓储层 - 本地 SQLite
pub mod repository;

// 后端网关 - REST 接口与解码
pub mod gateway;

// 配置层 - 环境变量与界面设置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 应用状态与界面状态
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{LocationStatus, NotificationLevel, SortDirection};

// 领域实体
pub use domain::{
    ActivityLog, ContainerItem, ContainerType, ContainerUnit, Notification, Printer, Product,
    ProductVariant, Purpose, Scale, WarehouseLocation,
};

// 引擎
pub use engine::{BulkLocationFlow, CastingSession, FilterPipeline, Paginator};

// API
pub use api::{ApiError, ApiResult, ContainerApi, LocationApi, SettingsApi};

// 应用
pub use app::{ActiveOverlay, AppState};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Lager Admin";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
