// ==========================================
// 仓储管理后台 - 本地数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 本地 SQLite 存取（设置缓存、通知、浇注会话快照）
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod casting_session_repo;
pub mod error;
pub mod notification_repo;
pub mod settings_repo;

// 重导出核心仓储
pub use casting_session_repo::CastingSessionRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use notification_repo::NotificationRepository;
pub use settings_repo::{MemorySettingsRepository, SettingsRepository, SqliteSettingsRepository};
