// ==========================================
// 仓储管理后台 - 表单字段校验
// ==========================================
// 字段级错误收集为 name → message 映射
// 校验失败阻断状态转换, 用户修正后即可恢复
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 字段错误集合（按字段名有序）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录字段错误（同一字段保留首条消息）
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// 无错误时返回 Ok(value)
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

// ==========================================
// 校验辅助函数
// ==========================================

/// 必填文本, 返回去除首尾空白后的值
pub fn require_text(errors: &mut FieldErrors, field: &str, value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, "Pflichtfeld");
        return None;
    }
    Some(trimmed.to_string())
}

/// 必填正整数
pub fn require_positive(errors: &mut FieldErrors, field: &str, value: Option<i64>) -> Option<i64> {
    match value {
        None => {
            errors.add(field, "Pflichtfeld");
            None
        }
        Some(v) if v <= 0 => {
            errors.add(field, "Muss eine positive Zahl sein");
            None
        }
        Some(v) => Some(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_field_messages() {
        let mut errors = FieldErrors::new();
        assert_eq!(require_text(&mut errors, "location", "  Halle 2 "), Some("Halle 2".to_string()));
        assert_eq!(require_text(&mut errors, "name", "   "), None);
        assert_eq!(require_positive(&mut errors, "shelfCount", Some(0)), None);
        assert_eq!(require_positive(&mut errors, "floorStart", None), None);
        assert_eq!(require_positive(&mut errors, "floorCount", Some(3)), Some(3));

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("name"), Some("Pflichtfeld"));
        assert_eq!(errors.get("shelfCount"), Some("Muss eine positive Zahl sein"));
        assert!(!errors.contains("location"));
    }

    #[test]
    fn test_into_result() {
        assert_eq!(FieldErrors::new().into_result(5), Ok(5));

        let mut errors = FieldErrors::new();
        errors.add("x", "kaputt");
        errors.add("x", "zweite Meldung");
        let err = errors.into_result(()).unwrap_err();
        assert_eq!(err.get("x"), Some("kaputt"));
        assert_eq!(err.to_string(), "x: kaputt");
    }
}
