// ==========================================
// 仓储管理后台 - 应用层
// ==========================================
// 职责: 应用状态组装 + 界面状态（列表/浮层/横幅）
// ==========================================

pub mod overlay;
pub mod screen;
pub mod state;

// 重导出
pub use overlay::ActiveOverlay;
pub use screen::{refresh_all, ContainerScreen, LocationScreen};
pub use state::{get_default_db_path, AppState};
