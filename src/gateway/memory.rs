// ==========================================
// 仓储管理后台 - 内存后端（离线模式/测试）
// ==========================================
// 语义与 HTTP 后端一致:
// - 服务端ID 由 uuid 生成
// - 批量创建全有或全无; (location, shelf, compartment, floor) 重复时整批拒绝
// - 移动舒特时通过 domain::placement 维护库位舒特数与状态
// - 每次变更追加一条活动日志
// 测试可注入失败: fail_next / set_unavailable
// ==========================================

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::domain::placement::{is_placed_at, place_container, release_slot};
use crate::domain::{
    ActivityLog, ContainerItem, LocationId, Product, WarehouseLocation,
};
use crate::gateway::backend::InventoryBackend;
use crate::gateway::error::{GatewayError, GatewayResult};

const OFFLINE_USER: &str = "offline";

#[derive(Default)]
struct MemoryState {
    locations: Vec<WarehouseLocation>,
    containers: Vec<ContainerItem>,
    products: Vec<Product>,
    activity: Vec<ActivityLog>,
    fail_next: Option<String>,
    unavailable: bool,
}

impl MemoryState {
    fn log(&mut self, action: &str, entity_type: &str, entity_id: &str, details: String) {
        self.activity.push(ActivityLog {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            user: OFFLINE_USER.to_string(),
            action: action.to_string(),
            entity_type: entity_type.to_string(),
            entity_id: Some(entity_id.to_string()),
            details: Some(details),
        });
    }

    fn location_index(&self, id: &str) -> GatewayResult<usize> {
        self.locations
            .iter()
            .position(|l| l.id.server_id() == Some(id))
            .ok_or_else(|| GatewayError::not_found("location", id))
    }

    fn container_index(&self, id: &str) -> GatewayResult<usize> {
        self.containers
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| GatewayError::not_found("container", id))
    }
}

#[derive(Default)]
pub struct InMemoryInventoryBackend {
    state: Mutex<MemoryState>,
}

impl InMemoryInventoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置数据（未持久化的库位会分配服务端ID）
    pub fn with_seed(
        locations: Vec<WarehouseLocation>,
        containers: Vec<ContainerItem>,
        products: Vec<Product>,
    ) -> Self {
        let locations = locations
            .into_iter()
            .map(|mut l| {
                if !l.id.is_persisted() {
                    l.id = LocationId::Persisted(Uuid::new_v4().to_string());
                }
                l
            })
            .collect();
        let containers = containers
            .into_iter()
            .map(|mut c| {
                if c.id.is_empty() {
                    c.id = Uuid::new_v4().to_string();
                }
                c
            })
            .collect();

        Self {
            state: Mutex::new(MemoryState {
                locations,
                containers,
                products,
                ..Default::default()
            }),
        }
    }

    /// 下一次调用返回 500
    pub fn fail_next(&self, message: impl Into<String>) {
        if let Ok(mut state) = self.state.lock() {
            state.fail_next = Some(message.into());
        }
    }

    /// 持续不可用（模拟断网）
    pub fn set_unavailable(&self, unavailable: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.unavailable = unavailable;
        }
    }

    /// 获取状态锁并处理注入的失败
    fn enter(&self) -> GatewayResult<MutexGuard<'_, MemoryState>> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| GatewayError::Transport(format!("内存后端锁获取失败: {}", e)))?;
        if state.unavailable {
            return Err(GatewayError::Transport("后端不可用".to_string()));
        }
        if let Some(message) = state.fail_next.take() {
            return Err(GatewayError::Status {
                status: 500,
                body: message,
            });
        }
        Ok(state)
    }
}

#[async_trait]
impl InventoryBackend for InMemoryInventoryBackend {
    async fn list_locations(&self) -> GatewayResult<Vec<WarehouseLocation>> {
        Ok(self.enter()?.locations.clone())
    }

    async fn create_locations(
        &self,
        locations: &[WarehouseLocation],
    ) -> GatewayResult<Vec<WarehouseLocation>> {
        let mut state = self.enter()?;

        // 先整体校验, 再写入
        let mut taken: HashSet<(String, i64, i64, i64)> = state
            .locations
            .iter()
            .map(|l| (l.location.clone(), l.shelf, l.compartment, l.floor))
            .collect();
        let mut numbers: HashSet<String> =
            state.locations.iter().map(|l| l.la_number.clone()).collect();

        for l in locations {
            if l.la_number.trim().is_empty() {
                return Err(GatewayError::Rejected("laNumber 为空".to_string()));
            }
            if !taken.insert((l.location.clone(), l.shelf, l.compartment, l.floor)) {
                return Err(GatewayError::Status {
                    status: 409,
                    body: format!(
                        "Lagerort existiert bereits: {} {}/{}/{}",
                        l.location, l.shelf, l.compartment, l.floor
                    ),
                });
            }
            if !numbers.insert(l.la_number.clone()) {
                return Err(GatewayError::Status {
                    status: 409,
                    body: format!("LA-Nummer existiert bereits: {}", l.la_number),
                });
            }
        }

        let created: Vec<WarehouseLocation> = locations
            .iter()
            .cloned()
            .map(|mut l| {
                l.id = LocationId::Persisted(Uuid::new_v4().to_string());
                l
            })
            .collect();

        state.locations.extend(created.iter().cloned());
        let details = format!("{} Lagerorte angelegt", created.len());
        let first_id = created
            .first()
            .and_then(|l| l.id.server_id())
            .unwrap_or_default()
            .to_string();
        state.log("create", "location", &first_id, details);
        Ok(created)
    }

    async fn update_location(
        &self,
        location: &WarehouseLocation,
    ) -> GatewayResult<WarehouseLocation> {
        let mut state = self.enter()?;
        let id = location
            .id
            .server_id()
            .ok_or_else(|| GatewayError::Rejected("Lagerort ist nicht gespeichert".to_string()))?
            .to_string();
        let index = state.location_index(&id)?;
        state.locations[index] = location.clone();
        state.log("update", "location", &id, location.la_number.clone());
        Ok(location.clone())
    }

    async fn delete_location(&self, location_id: &str) -> GatewayResult<()> {
        let mut state = self.enter()?;
        let index = state.location_index(location_id)?;
        if state.locations[index].container_count > 0 {
            return Err(GatewayError::Status {
                status: 409,
                body: "Lagerort ist belegt".to_string(),
            });
        }
        let removed = state.locations.remove(index);
        state.log("delete", "location", location_id, removed.la_number);
        Ok(())
    }

    async fn list_containers(&self) -> GatewayResult<Vec<ContainerItem>> {
        Ok(self.enter()?.containers.clone())
    }

    async fn get_container(&self, container_id: &str) -> GatewayResult<ContainerItem> {
        let state = self.enter()?;
        let index = state.container_index(container_id)?;
        Ok(state.containers[index].clone())
    }

    async fn create_container(&self, container: &ContainerItem) -> GatewayResult<ContainerItem> {
        let mut state = self.enter()?;
        if state
            .containers
            .iter()
            .any(|c| c.container_code == container.container_code)
        {
            return Err(GatewayError::Status {
                status: 409,
                body: format!("Schütte existiert bereits: {}", container.container_code),
            });
        }
        let mut created = container.clone();
        created.id = Uuid::new_v4().to_string();
        state.containers.push(created.clone());
        state.log("create", "container", &created.id, created.container_code.clone());
        Ok(created)
    }

    async fn update_container(&self, container: &ContainerItem) -> GatewayResult<ContainerItem> {
        let mut state = self.enter()?;
        let index = state.container_index(&container.id)?;
        // 后写者覆盖
        state.containers[index] = container.clone();
        state.log("update", "container", &container.id, container.container_code.clone());
        Ok(container.clone())
    }

    async fn delete_container(&self, container_id: &str) -> GatewayResult<()> {
        let mut state = self.enter()?;
        let index = state.container_index(container_id)?;
        let removed = state.containers.remove(index);

        if removed.is_placed() {
            if let Some(loc) = state
                .locations
                .iter_mut()
                .find(|l| is_placed_at(&removed, l))
            {
                release_slot(loc);
            }
        }
        state.log("delete", "container", container_id, removed.container_code);
        Ok(())
    }

    async fn move_container(
        &self,
        container_id: &str,
        location_id: &str,
    ) -> GatewayResult<ContainerItem> {
        let mut state = self.enter()?;
        let c_index = state.container_index(container_id)?;
        let target_index = state.location_index(location_id)?;

        let mut container = state.containers[c_index].clone();
        if is_placed_at(&container, &state.locations[target_index]) {
            return Ok(container);
        }

        let previous_index = state
            .locations
            .iter()
            .position(|l| is_placed_at(&container, l));

        let mut target = state.locations[target_index].clone();
        match previous_index {
            Some(p) => {
                let mut previous = state.locations[p].clone();
                place_container(&mut container, &mut target, Some(&mut previous));
                state.locations[p] = previous;
            }
            None => place_container(&mut container, &mut target, None),
        }

        let details = format!("{} → {}", container.container_code, target.la_number);
        state.locations[target_index] = target;
        state.containers[c_index] = container.clone();
        state.log("move", "container", container_id, details);
        Ok(container)
    }

    async fn list_products(&self) -> GatewayResult<Vec<Product>> {
        Ok(self.enter()?.products.clone())
    }

    async fn list_activity_logs(&self) -> GatewayResult<Vec<ActivityLog>> {
        Ok(self.enter()?.activity.clone())
    }
}
