// ==========================================
// 仓储管理后台 - 后端网关错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("后端请求失败: {0}")]
    Transport(String),

    #[error("后端返回错误状态: status={status}, body={body}")]
    Status { status: u16, body: String },

    #[error("响应解码失败 ({entity}): {message}")]
    Decode { entity: String, message: String },

    #[error("记录未找到: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    #[error("后端拒绝请求: {0}")]
    Rejected(String),
}

impl GatewayError {
    pub fn decode(entity: &str, message: impl Into<String>) -> Self {
        GatewayError::Decode {
            entity: entity.to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(entity: &str, id: &str) -> Self {
        GatewayError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => GatewayError::Status {
                status: status.as_u16(),
                body: err.to_string(),
            },
            None => GatewayError::Transport(err.to_string()),
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
