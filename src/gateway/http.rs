// ==========================================
// 仓储管理后台 - HTTP 后端 (reqwest)
// ==========================================
// 端点:
// - GET/POST  {base}/storage-locations[/bulk]
// - PUT/DELETE {base}/storage-locations/{id}
// - GET/POST  {base}/containers, GET/PUT/DELETE {base}/containers/{id}
// - POST      {base}/containers/{id}/move
// - GET       {base}/products, {base}/activity-logs
// 非 2xx → GatewayError::Status; 响应一律经 decode 模块校验
// ==========================================

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;

use crate::domain::{ActivityLog, ContainerItem, Product, WarehouseLocation};
use crate::gateway::backend::InventoryBackend;
use crate::gateway::decode::{
    decode_activity_logs, decode_container, decode_containers, decode_json, decode_location,
    decode_locations, decode_products, encode_container, encode_location,
};
use crate::gateway::error::{GatewayError, GatewayResult};
use crate::gateway::wire::{
    ActivityLogDto, ContainerDto, LocationDto, MoveContainerDto, ProductDto,
};

#[derive(Clone)]
pub struct HttpInventoryBackend {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpInventoryBackend {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> GatewayResult<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// 发送请求并返回响应体文本（非 2xx 转为 Status 错误）
    async fn send(&self, builder: RequestBuilder) -> GatewayResult<String> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "后端返回错误状态");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        entity: &str,
        path: &str,
    ) -> GatewayResult<T> {
        tracing::debug!(path, "GET");
        let body = self.send(self.request(Method::GET, path)).await?;
        decode_json(entity, &body)
    }

    async fn send_json<B: Serialize + ?Sized, T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        entity: &str,
        path: &str,
        payload: &B,
    ) -> GatewayResult<T> {
        tracing::debug!(path, %method, "发送请求");
        let body = self.send(self.request(method, path).json(payload)).await?;
        decode_json(entity, &body)
    }

    fn require_server_id<'a>(entity: &str, id: Option<&'a str>) -> GatewayResult<&'a str> {
        id.filter(|s| !s.is_empty())
            .ok_or_else(|| GatewayError::Rejected(format!("{} 尚未持久化, 无法更新", entity)))
    }
}

#[async_trait]
impl InventoryBackend for HttpInventoryBackend {
    async fn list_locations(&self) -> GatewayResult<Vec<WarehouseLocation>> {
        let dtos: Vec<LocationDto> = self.get_json("location", "storage-locations").await?;
        decode_locations(dtos)
    }

    async fn create_locations(
        &self,
        locations: &[WarehouseLocation],
    ) -> GatewayResult<Vec<WarehouseLocation>> {
        let payload: Vec<LocationDto> = locations.iter().map(encode_location).collect();
        let dtos: Vec<LocationDto> = self
            .send_json(Method::POST, "location", "storage-locations/bulk", &payload)
            .await?;
        if dtos.len() != locations.len() {
            return Err(GatewayError::decode(
                "location",
                format!("批量创建返回 {} 条, 期望 {} 条", dtos.len(), locations.len()),
            ));
        }
        decode_locations(dtos)
    }

    async fn update_location(
        &self,
        location: &WarehouseLocation,
    ) -> GatewayResult<WarehouseLocation> {
        let id = Self::require_server_id("location", location.id.server_id())?;
        let dto: LocationDto = self
            .send_json(
                Method::PUT,
                "location",
                &format!("storage-locations/{}", id),
                &encode_location(location),
            )
            .await?;
        decode_location(dto)
    }

    async fn delete_location(&self, location_id: &str) -> GatewayResult<()> {
        self.send(self.request(Method::DELETE, &format!("storage-locations/{}", location_id)))
            .await?;
        Ok(())
    }

    async fn list_containers(&self) -> GatewayResult<Vec<ContainerItem>> {
        let dtos: Vec<ContainerDto> = self.get_json("container", "containers").await?;
        decode_containers(dtos)
    }

    async fn get_container(&self, container_id: &str) -> GatewayResult<ContainerItem> {
        let dto: ContainerDto = self
            .get_json("container", &format!("containers/{}", container_id))
            .await?;
        decode_container(dto)
    }

    async fn create_container(&self, container: &ContainerItem) -> GatewayResult<ContainerItem> {
        let dto: ContainerDto = self
            .send_json(Method::POST, "container", "containers", &encode_container(container))
            .await?;
        decode_container(dto)
    }

    async fn update_container(&self, container: &ContainerItem) -> GatewayResult<ContainerItem> {
        let id = Self::require_server_id("container", Some(container.id.as_str()))?;
        let dto: ContainerDto = self
            .send_json(
                Method::PUT,
                "container",
                &format!("containers/{}", id),
                &encode_container(container),
            )
            .await?;
        decode_container(dto)
    }

    async fn delete_container(&self, container_id: &str) -> GatewayResult<()> {
        self.send(self.request(Method::DELETE, &format!("containers/{}", container_id)))
            .await?;
        Ok(())
    }

    async fn move_container(
        &self,
        container_id: &str,
        location_id: &str,
    ) -> GatewayResult<ContainerItem> {
        let dto: ContainerDto = self
            .send_json(
                Method::POST,
                "container",
                &format!("containers/{}/move", container_id),
                &MoveContainerDto {
                    location_id: location_id.to_string(),
                },
            )
            .await?;
        decode_container(dto)
    }

    async fn list_products(&self) -> GatewayResult<Vec<Product>> {
        let dtos: Vec<ProductDto> = self.get_json("product", "products").await?;
        decode_products(dtos)
    }

    async fn list_activity_logs(&self) -> GatewayResult<Vec<ActivityLog>> {
        let dtos: Vec<ActivityLogDto> = self.get_json("activity_log", "activity-logs").await?;
        decode_activity_logs(dtos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let backend = HttpInventoryBackend::new("https://lager.example.com/api/", None).unwrap();
        assert_eq!(backend.base_url(), "https://lager.example.com/api");
        assert_eq!(
            backend.url("/storage-locations"),
            "https://lager.example.com/api/storage-locations"
        );
    }
}
