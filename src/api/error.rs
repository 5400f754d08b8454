// ==========================================
// 仓储管理后台 - API层错误类型
// ==========================================
// 职责: 汇总各层错误, 转换为可直接展示的错误消息
// ==========================================

use crate::domain::container::ContainerError;
use crate::engine::casting_session::CastingError;
use crate::engine::preview_flow::FlowError;
use crate::engine::validation::FieldErrors;
use crate::gateway::error::GatewayError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入与业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    /// 表单字段错误（可由用户修正）
    #[error("表单校验失败: {0}")]
    Validation(FieldErrors),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("业务规则违反: {0}")]
    BusinessRuleViolation(String),

    #[error("无效的状态转换: from={from} to={to}")]
    InvalidStateTransition { from: String, to: String },

    // ==========================================
    // 后端错误
    // ==========================================
    #[error("后端错误: {0}")]
    Backend(String),

    #[error("后端数据不合法: {0}")]
    Decode(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 单字段校验错误
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.add(field, message);
        ApiError::Validation(errors)
    }

    /// 字段错误（非字段错误返回 None）
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => {
                ApiError::DatabaseError(format!("数据库连接失败: {}", msg))
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("外键约束违反: {}", msg))
            }
            RepositoryError::SerializationError(msg) => {
                ApiError::InternalError(format!("本地数据损坏: {}", msg))
            }
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InternalError(format!("字段{}错误: {}", field, message))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

// ==========================================
// 从 GatewayError 转换
// ==========================================
impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            GatewayError::Status { status: 404, body } => ApiError::NotFound(body),
            GatewayError::Status { status: 409, body } => ApiError::BusinessRuleViolation(body),
            GatewayError::Status { status, body } => {
                ApiError::Backend(format!("HTTP {}: {}", status, body))
            }
            GatewayError::Transport(msg) => ApiError::Backend(msg),
            GatewayError::Rejected(msg) => ApiError::BusinessRuleViolation(msg),
            GatewayError::Decode { entity, message } => {
                ApiError::Decode(format!("{}: {}", entity, message))
            }
        }
    }
}

// ==========================================
// 从引擎/领域错误转换
// ==========================================
impl From<FlowError> for ApiError {
    fn from(err: FlowError) -> Self {
        match err {
            FlowError::Validation(errors) => ApiError::Validation(errors),
            FlowError::InvalidTransition { from, action } => ApiError::InvalidStateTransition {
                from: from.to_string(),
                to: action.to_string(),
            },
        }
    }
}

impl From<CastingError> for ApiError {
    fn from(err: CastingError) -> Self {
        match err {
            CastingError::InvalidTransition { from, action } => ApiError::InvalidStateTransition {
                from: from.to_string(),
                to: action.to_string(),
            },
            CastingError::ClockWentBackwards(at) => {
                ApiError::InvalidInput(format!("时间早于上次操作: {}", at))
            }
        }
    }
}

impl From<ContainerError> for ApiError {
    fn from(err: ContainerError) -> Self {
        match err {
            ContainerError::UnitNotFound { .. } => ApiError::NotFound(err.to_string()),
            _ => ApiError::BusinessRuleViolation(err.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_conversion() {
        let repo_err = RepositoryError::NotFound {
            entity: "printer".to_string(),
            id: "P001".to_string(),
        };
        match ApiError::from(repo_err) {
            ApiError::NotFound(msg) => {
                assert!(msg.contains("printer"));
                assert!(msg.contains("P001"));
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_gateway_error_conversion() {
        let conflict = GatewayError::Status {
            status: 409,
            body: "Lagerort ist belegt".to_string(),
        };
        assert!(matches!(
            ApiError::from(conflict),
            ApiError::BusinessRuleViolation(_)
        ));

        let decode = GatewayError::decode("location", "status unbekannt");
        match ApiError::from(decode) {
            ApiError::Decode(msg) => assert!(msg.starts_with("location")),
            other => panic!("Expected Decode, got {:?}", other),
        }
    }

    #[test]
    fn test_flow_validation_keeps_field_errors() {
        let mut errors = FieldErrors::new();
        errors.add("shelfCount", "Pflichtfeld");
        let api_err: ApiError = FlowError::Validation(errors).into();
        assert_eq!(
            api_err.field_errors().and_then(|e| e.get("shelfCount")),
            Some("Pflichtfeld")
        );
    }
}
