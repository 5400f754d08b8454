// ==========================================
// 仓储管理后台 - API 层
// ==========================================
// 职责: 校验输入, 组合引擎/仓储/后端网关, 供界面状态层调用
// ==========================================

pub mod activity_api;
pub mod casting_api;
pub mod catalog_api;
pub mod container_api;
pub mod error;
pub mod location_api;
pub mod notification_api;
pub mod paging;
pub mod settings_api;
pub mod validator;

// 重导出核心类型
pub use activity_api::ActivityApi;
pub use casting_api::CastingApi;
pub use catalog_api::CatalogApi;
pub use container_api::{ContainerApi, ContainerEditForm, ContainerForm};
pub use error::{ApiError, ApiResult};
pub use location_api::{LocationApi, LocationForm};
pub use notification_api::NotificationApi;
pub use paging::PagedResult;
pub use settings_api::SettingsApi;
pub use validator::FieldErrors;
