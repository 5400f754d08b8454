// ==========================================
// 仓储管理后台 - 后端网关层
// ==========================================
// 职责: REST 边界（请求、响应解码、取值校验）
// 红线: 未经校验的外部数据不得进入领域层
// ==========================================

pub mod backend;
pub mod decode;
pub mod error;
pub mod http;
pub mod memory;
pub mod wire;

pub use backend::InventoryBackend;
pub use error::{GatewayError, GatewayResult};
pub use http::HttpInventoryBackend;
pub use memory::InMemoryInventoryBackend;
