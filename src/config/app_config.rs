// ==========================================
// 仓储管理后台 - 进程级配置
// ==========================================
// 来源: 环境变量
// - LAGER_ADMIN_API_URL   后端 REST 根地址（缺省则离线模式）
// - LAGER_ADMIN_API_TOKEN Bearer Token
// - LAGER_ADMIN_DB_PATH   本地 SQLite 文件
// ==========================================

use serde::{Deserialize, Serialize};

pub const ENV_API_URL: &str = "LAGER_ADMIN_API_URL";
pub const ENV_API_TOKEN: &str = "LAGER_ADMIN_API_TOKEN";
pub const ENV_DB_PATH: &str = "LAGER_ADMIN_DB_PATH";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: Option<String>,
    pub api_token: Option<String>,
    pub db_path: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源构建（空白值视为未设置）
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            api_base_url: read(ENV_API_URL).map(|url| url.trim_end_matches('/').to_string()),
            api_token: read(ENV_API_TOKEN),
            db_path: read(ENV_DB_PATH),
        }
    }

    /// 未配置后端地址时以离线模式运行
    pub fn is_offline(&self) -> bool {
        self.api_base_url.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_lookup_trims_and_ignores_blank() {
        let mut env = HashMap::new();
        env.insert(ENV_API_URL, "https://lager.example.com/api/ ");
        env.insert(ENV_API_TOKEN, "   ");

        let config = AppConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.api_base_url.as_deref(), Some("https://lager.example.com/api"));
        assert_eq!(config.api_token, None);
        assert_eq!(config.db_path, None);
        assert!(!config.is_offline());
        assert!(AppConfig::default().is_offline());
    }
}
