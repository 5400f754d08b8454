// ==========================================
// 仓储管理后台 - 进程入口
// ==========================================
// 启动: 读取环境配置 → 打开本地数据库 → 组装 AppState → 加载界面列表
// ==========================================

use anyhow::{anyhow, Result};

use lager_admin::app::{refresh_all, AppState, ContainerScreen, LocationScreen};
use lager_admin::config::AppConfig;
use lager_admin::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let json_logs = std::env::var("LAGER_ADMIN_LOG_JSON")
        .map(|v| v.trim() == "1")
        .unwrap_or(false);
    if json_logs {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::info!("==================================================");
    tracing::info!("{} - 仓储管理后台", lager_admin::APP_NAME);
    tracing::info!("系统版本: {}", lager_admin::VERSION);
    tracing::info!("==================================================");

    let config = AppConfig::from_env();
    match config.api_base_url.as_deref() {
        Some(url) => tracing::info!("后端地址: {}", url),
        None => tracing::info!("未配置后端地址（{}）", lager_admin::config::app_config::ENV_API_URL),
    }

    let state = AppState::new(config).map_err(|e| anyhow!(e))?;
    tracing::info!("使用数据库: {}", state.db_path);

    let page_size = state.default_page_size();
    let mut locations = LocationScreen::new(state.location_api.clone(), page_size);
    let mut containers = ContainerScreen::new(state.container_api.clone(), page_size);

    let (loc_result, con_result) = refresh_all(&mut locations, &mut containers).await;
    if let Err(e) = &loc_result {
        tracing::error!("库位加载失败: {}", e);
    }
    if let Err(e) = &con_result {
        tracing::error!("舒特加载失败: {}", e);
    }

    let unread = state.notification_api.unread_count()?;
    let open_sessions = state.casting_api.open_sessions()?;
    tracing::info!(
        locations = locations.locations().len(),
        containers = containers.containers().len(),
        unread_notifications = unread,
        open_casting_sessions = open_sessions.len(),
        "启动完成"
    );

    Ok(())
}
