// ==========================================
// 仓储管理后台 - 后端接口 Trait
// ==========================================
// 实现者:
// - HttpInventoryBackend（reqwest, 在线）
// - InMemoryInventoryBackend（离线/测试）
// 语义: 一次调用要么完整成功, 要么返回错误且不产生部分结果
// 无重试、无乐观锁, 后写者覆盖
// ==========================================

use async_trait::async_trait;

use crate::domain::{ActivityLog, ContainerItem, Product, WarehouseLocation};
use crate::gateway::error::GatewayResult;

#[async_trait]
pub trait InventoryBackend: Send + Sync {
    // ===== 库位 =====

    async fn list_locations(&self) -> GatewayResult<Vec<WarehouseLocation>>;

    /// 批量创建（全有或全无）
    ///
    /// # 返回
    /// 服务端落库后的记录（带服务端ID）
    async fn create_locations(
        &self,
        locations: &[WarehouseLocation],
    ) -> GatewayResult<Vec<WarehouseLocation>>;

    async fn update_location(&self, location: &WarehouseLocation)
        -> GatewayResult<WarehouseLocation>;

    async fn delete_location(&self, location_id: &str) -> GatewayResult<()>;

    // ===== 舒特 =====

    async fn list_containers(&self) -> GatewayResult<Vec<ContainerItem>>;

    async fn get_container(&self, container_id: &str) -> GatewayResult<ContainerItem>;

    async fn create_container(&self, container: &ContainerItem) -> GatewayResult<ContainerItem>;

    async fn update_container(&self, container: &ContainerItem) -> GatewayResult<ContainerItem>;

    async fn delete_container(&self, container_id: &str) -> GatewayResult<()>;

    /// 舒特移入库位（服务端维护库位的舒特数与状态）
    async fn move_container(
        &self,
        container_id: &str,
        location_id: &str,
    ) -> GatewayResult<ContainerItem>;

    // ===== 只读数据 =====

    async fn list_products(&self) -> GatewayResult<Vec<Product>>;

    async fn list_activity_logs(&self) -> GatewayResult<Vec<ActivityLog>>;
}
