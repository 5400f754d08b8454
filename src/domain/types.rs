// ==========================================
// 仓储管理后台 - 领域类型定义
// ==========================================
// 职责: 封闭取值集合 (库位状态/排序方向/通知级别)
// 序列化格式与后端 JSON 保持一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 库位状态 (Location Status)
// ==========================================
// 封闭集合: free / in-use
// free → in-use 仅在放入舒特时发生
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationStatus {
    #[serde(rename = "free")]
    Free, // 空闲
    #[serde(rename = "in-use")]
    InUse, // 占用
}

impl LocationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationStatus::Free => "free",
            LocationStatus::InUse => "in-use",
        }
    }
}

impl Default for LocationStatus {
    fn default() -> Self {
        LocationStatus::Free
    }
}

impl fmt::Display for LocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LocationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "free" => Ok(LocationStatus::Free),
            "in-use" => Ok(LocationStatus::InUse),
            other => Err(format!("未知库位状态: {}", other)),
        }
    }
}

// ==========================================
// 排序方向 (Sort Direction)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// 切换方向（表头重复点击）
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Asc
    }
}

// ==========================================
// 通知级别 (Notification Level)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,    // 提示
    Success, // 成功
    Warning, // 警告
    Error,   // 错误
}

impl NotificationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationLevel::Info => "info",
            NotificationLevel::Success => "success",
            NotificationLevel::Warning => "warning",
            NotificationLevel::Error => "error",
        }
    }
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "info" => Ok(NotificationLevel::Info),
            "success" => Ok(NotificationLevel::Success),
            "warning" => Ok(NotificationLevel::Warning),
            "error" => Ok(NotificationLevel::Error),
            other => Err(format!("未知通知级别: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_status_serde_uses_wire_names() {
        let json = serde_json::to_string(&LocationStatus::InUse).unwrap();
        assert_eq!(json, "\"in-use\"");

        let parsed: LocationStatus = serde_json::from_str("\"free\"").unwrap();
        assert_eq!(parsed, LocationStatus::Free);

        assert!(serde_json::from_str::<LocationStatus>("\"blocked\"").is_err());
    }

    #[test]
    fn test_location_status_from_str() {
        assert_eq!("in-use".parse::<LocationStatus>(), Ok(LocationStatus::InUse));
        assert!("IN_USE".parse::<LocationStatus>().is_err());
    }

    #[test]
    fn test_sort_direction_toggle() {
        assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.toggled().toggled(), SortDirection::Desc);
    }
}
