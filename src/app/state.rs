// ==========================================
// 仓储管理后台 - 应用状态
// ==========================================
// 职责: 打开本地数据库, 组装仓储/后端/API 实例
// 后端: 配置了 API 地址时走 HTTP, 否则离线内存后端
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{
    ActivityApi, CastingApi, CatalogApi, ContainerApi, LocationApi, NotificationApi, SettingsApi,
};
use crate::config::{AppConfig, ConfigManager};
use crate::db::{ensure_schema_version, open_sqlite_connection};
use crate::domain::{ContainerType, Printer, Purpose, Scale};
use crate::gateway::{HttpInventoryBackend, InMemoryInventoryBackend, InventoryBackend};
use crate::repository::{
    CastingSessionRepository, NotificationRepository, SettingsRepository, SqliteSettingsRepository,
};

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 进程级配置
    pub config: AppConfig,

    /// 界面配置（本地 config_kv）
    pub config_manager: Arc<ConfigManager>,

    /// 库存后端（HTTP 或离线内存）
    pub backend: Arc<dyn InventoryBackend>,

    pub location_api: Arc<LocationApi>,
    pub container_api: Arc<ContainerApi>,
    pub settings_api: Arc<SettingsApi>,
    pub catalog_api: Arc<CatalogApi>,
    pub activity_api: Arc<ActivityApi>,
    pub notification_api: Arc<NotificationApi>,
    pub casting_api: Arc<CastingApi>,
}

impl AppState {
    /// 按配置创建应用状态
    ///
    /// # 说明
    /// - db_path 未配置时使用 get_default_db_path()
    /// - api_base_url 未配置时进入离线模式（数据仅在进程内存中）
    pub fn new(config: AppConfig) -> Result<Self, String> {
        let backend: Arc<dyn InventoryBackend> = match config.api_base_url.as_deref() {
            Some(url) => Arc::new(
                HttpInventoryBackend::new(url, config.api_token.clone())
                    .map_err(|e| format!("无法创建HTTP后端: {}", e))?,
            ),
            None => {
                tracing::warn!("未配置后端地址, 以离线模式运行（数据不会持久化到服务器）");
                Arc::new(InMemoryInventoryBackend::new())
            }
        };

        let db_path = config.db_path.clone().unwrap_or_else(get_default_db_path);
        Self::with_backend(&db_path, config, backend)
    }

    /// 使用指定后端创建应用状态（测试/嵌入场景）
    pub fn with_backend(
        db_path: &str,
        config: AppConfig,
        backend: Arc<dyn InventoryBackend>,
    ) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(db_path).map_err(|e| format!("无法打开数据库: {}", e))?;
        let version =
            ensure_schema_version(&conn).map_err(|e| format!("schema_version 初始化失败: {}", e))?;
        tracing::debug!(version, "本地数据库 schema_version");
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================

        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );

        let printers: Arc<dyn SettingsRepository<Printer>> = Arc::new(
            SqliteSettingsRepository::<Printer>::new(conn.clone())
                .map_err(|e| format!("无法创建打印机仓储: {}", e))?,
        );
        let scales: Arc<dyn SettingsRepository<Scale>> = Arc::new(
            SqliteSettingsRepository::<Scale>::new(conn.clone())
                .map_err(|e| format!("无法创建秤仓储: {}", e))?,
        );
        let purposes: Arc<dyn SettingsRepository<Purpose>> = Arc::new(
            SqliteSettingsRepository::<Purpose>::new(conn.clone())
                .map_err(|e| format!("无法创建用途仓储: {}", e))?,
        );
        let container_types: Arc<dyn SettingsRepository<ContainerType>> = Arc::new(
            SqliteSettingsRepository::<ContainerType>::new(conn.clone())
                .map_err(|e| format!("无法创建舒特类型仓储: {}", e))?,
        );

        let notification_repo = Arc::new(
            NotificationRepository::new(conn.clone())
                .map_err(|e| format!("无法创建NotificationRepository: {}", e))?,
        );
        let casting_repo = Arc::new(
            CastingSessionRepository::new(conn)
                .map_err(|e| format!("无法创建CastingSessionRepository: {}", e))?,
        );

        // ==========================================
        // 创建API实例
        // ==========================================

        let location_api = Arc::new(LocationApi::new(backend.clone(), config_manager.clone()));
        let container_api = Arc::new(ContainerApi::new(backend.clone(), container_types.clone()));
        let settings_api = Arc::new(SettingsApi::new(printers, scales, purposes, container_types));
        let catalog_api = Arc::new(CatalogApi::new(backend.clone()));
        let activity_api = Arc::new(ActivityApi::new(backend.clone()));
        let notification_api = Arc::new(NotificationApi::new(notification_repo));
        let casting_api = Arc::new(CastingApi::new(casting_repo, config_manager.clone()));

        tracing::info!(offline = config.is_offline(), "AppState初始化完成");

        Ok(Self {
            db_path: db_path.to_string(),
            config,
            config_manager,
            backend,
            location_api,
            container_api,
            settings_api,
            catalog_api,
            activity_api,
            notification_api,
            casting_api,
        })
    }

    /// 界面默认每页条数
    pub fn default_page_size(&self) -> usize {
        match self.config_manager.get_default_page_size() {
            Ok(size) => size,
            Err(e) => {
                tracing::warn!("读取默认每页条数失败, 使用 10: {}", e);
                10
            }
        }
    }
}

/// 获取默认数据库路径
///
/// 优先级: 环境变量 LAGER_ADMIN_DB_PATH > 用户数据目录 > 当前目录
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var(crate::config::app_config::ENV_DB_PATH) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./lager_admin.db");

    if let Some(data_dir) = dirs::data_dir() {
        // 开发环境使用独立目录，避免污染生产数据
        #[cfg(debug_assertions)]
        {
            path = data_dir.join("lager-admin-dev");
        }

        #[cfg(not(debug_assertions))]
        {
            path = data_dir.join("lager-admin");
        }

        std::fs::create_dir_all(&path).ok();
        path = path.join("lager_admin.db");
    }

    path.to_string_lossy().to_string()
}
