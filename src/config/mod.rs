// ==========================================
// 仓储管理后台 - 配置层
// ==========================================
// 职责: 进程级配置（环境变量）+ 界面设置（config_kv 表）
// ==========================================

pub mod app_config;
pub mod config_manager;

pub use app_config::AppConfig;
pub use config_manager::{config_keys, ConfigManager};
