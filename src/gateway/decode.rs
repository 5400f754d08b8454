// ==========================================
// 仓储管理后台 - 响应解码与校验
// ==========================================
// 流程: JSON 文本 → wire DTO (serde) → 领域实体 (取值校验)
// 任一记录不合法, 整个响应作废, 调用方拿不到部分结果
// 校验项:
// - id / 编号非空
// - status ∈ {free, in-use}
// - 坐标 ≥ 1, containerCount ≥ 0
// - 舒特 units ≤ slots, 放置坐标要么齐全要么全空
// ==========================================

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use crate::domain::{
    ActivityLog, ContainerItem, ContainerUnit, LocationId, LocationStatus, Product,
    ProductVariant, Slot, WarehouseLocation,
};
use crate::gateway::error::{GatewayError, GatewayResult};
use crate::gateway::wire::{
    ActivityLogDto, ContainerDto, LocationDto, ProductDto, SlotDto, UnitDto,
};

const LOCATION: &str = "location";
const CONTAINER: &str = "container";
const PRODUCT: &str = "product";
const ACTIVITY: &str = "activity_log";

/// 报文 → DTO
pub fn decode_json<T: DeserializeOwned>(entity: &str, body: &str) -> GatewayResult<T> {
    serde_json::from_str(body).map_err(|e| GatewayError::decode(entity, e.to_string()))
}

fn require_id(entity: &str, id: Option<String>) -> GatewayResult<String> {
    match id {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(GatewayError::decode(entity, "id 缺失")),
    }
}

fn require_coordinate(entity: &str, field: &str, value: i64) -> GatewayResult<i64> {
    if value < 1 {
        return Err(GatewayError::decode(
            entity,
            format!("{} 必须 ≥ 1, 实际 {}", field, value),
        ));
    }
    Ok(value)
}

// ==========================================
// 库位
// ==========================================

pub fn decode_location(dto: LocationDto) -> GatewayResult<WarehouseLocation> {
    let id = require_id(LOCATION, dto.id)?;
    if dto.la_number.trim().is_empty() {
        return Err(GatewayError::decode(LOCATION, format!("laNumber 为空 (id={})", id)));
    }
    let status: LocationStatus = dto
        .status
        .parse()
        .map_err(|e: String| GatewayError::decode(LOCATION, e))?;
    let container_count = u32::try_from(dto.container_count).map_err(|_| {
        GatewayError::decode(
            LOCATION,
            format!("containerCount 非法: {} (id={})", dto.container_count, id),
        )
    })?;

    Ok(WarehouseLocation {
        id: LocationId::Persisted(id),
        la_number: dto.la_number,
        location: dto.location,
        shelf: require_coordinate(LOCATION, "shelf", dto.shelf)?,
        compartment: require_coordinate(LOCATION, "compartment", dto.compartment)?,
        floor: require_coordinate(LOCATION, "floor", dto.floor)?,
        for_sale: dto.for_sale,
        special_storage: dto.special_storage,
        container_count,
        status,
    })
}

pub fn decode_locations(dtos: Vec<LocationDto>) -> GatewayResult<Vec<WarehouseLocation>> {
    dtos.into_iter().map(decode_location).collect()
}

pub fn encode_location(location: &WarehouseLocation) -> LocationDto {
    LocationDto {
        id: location.id.server_id().map(str::to_string),
        la_number: location.la_number.clone(),
        location: location.location.clone(),
        shelf: location.shelf,
        compartment: location.compartment,
        floor: location.floor,
        for_sale: location.for_sale,
        special_storage: location.special_storage,
        container_count: i64::from(location.container_count),
        status: location.status.as_str().to_string(),
    }
}

// ==========================================
// 舒特
// ==========================================

fn decode_slot(dto: SlotDto) -> GatewayResult<Slot> {
    let number = u32::try_from(dto.number)
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| GatewayError::decode(CONTAINER, format!("格位编号非法: {}", dto.number)))?;
    let mut slot = Slot::numbered(number);
    if let Some(label) = dto.label.filter(|l| !l.trim().is_empty()) {
        slot.label = label;
    }
    Ok(slot)
}

fn decode_unit(dto: UnitDto) -> ContainerUnit {
    // 编号由位置推导, 报文中的 unitNumber 忽略
    ContainerUnit {
        unit_number: 0,
        article_number: dto.article_number,
        legacy_article_number: dto.legacy_article_number,
        description: dto.description,
        stock: dto.stock,
    }
}

pub fn decode_container(dto: ContainerDto) -> GatewayResult<ContainerItem> {
    let id = require_id(CONTAINER, dto.id)?;
    if dto.container_code.trim().is_empty() {
        return Err(GatewayError::decode(CONTAINER, format!("containerCode 为空 (id={})", id)));
    }
    if dto.units.len() > dto.slots.len() {
        return Err(GatewayError::decode(
            CONTAINER,
            format!(
                "units({}) 多于 slots({}) (id={})",
                dto.units.len(),
                dto.slots.len(),
                id
            ),
        ));
    }

    let placement = (dto.location, dto.shelf, dto.compartment, dto.floor);
    let (location, shelf, compartment, floor) = match placement {
        (None, None, None, None) => (None, None, None, None),
        (Some(l), Some(s), Some(c), Some(f)) => (
            Some(l),
            Some(require_coordinate(CONTAINER, "shelf", s)?),
            Some(require_coordinate(CONTAINER, "compartment", c)?),
            Some(require_coordinate(CONTAINER, "floor", f)?),
        ),
        _ => {
            return Err(GatewayError::decode(
                CONTAINER,
                format!("放置坐标不完整 (id={})", id),
            ))
        }
    };

    let slots = dto
        .slots
        .into_iter()
        .map(decode_slot)
        .collect::<GatewayResult<Vec<_>>>()?;

    let mut container = ContainerItem {
        id,
        container_code: dto.container_code,
        container_type: dto.container_type,
        purpose: dto.purpose,
        description: dto.description,
        slots,
        units: dto.units.into_iter().map(decode_unit).collect(),
        location,
        shelf,
        compartment,
        floor,
    };
    container.renumber_units();
    Ok(container)
}

pub fn decode_containers(dtos: Vec<ContainerDto>) -> GatewayResult<Vec<ContainerItem>> {
    dtos.into_iter().map(decode_container).collect()
}

pub fn encode_container(container: &ContainerItem) -> ContainerDto {
    ContainerDto {
        id: if container.id.is_empty() {
            None
        } else {
            Some(container.id.clone())
        },
        container_code: container.container_code.clone(),
        container_type: container.container_type.clone(),
        purpose: container.purpose.clone(),
        description: container.description.clone(),
        slots: container
            .slots
            .iter()
            .map(|s| SlotDto {
                number: i64::from(s.number),
                label: Some(s.label.clone()),
            })
            .collect(),
        units: container
            .units
            .iter()
            .map(|u| UnitDto {
                unit_number: Some(i64::from(u.unit_number)),
                article_number: u.article_number.clone(),
                legacy_article_number: u.legacy_article_number.clone(),
                description: u.description.clone(),
                stock: u.stock,
            })
            .collect(),
        location: container.location.clone(),
        shelf: container.shelf,
        compartment: container.compartment,
        floor: container.floor,
    }
}

// ==========================================
// 商品 / 活动日志
// ==========================================

pub fn decode_product(dto: ProductDto) -> GatewayResult<Product> {
    let id = require_id(PRODUCT, Some(dto.id))?;
    let variants = dto
        .variants
        .into_iter()
        .map(|v| {
            if v.sku.trim().is_empty() {
                return Err(GatewayError::decode(PRODUCT, format!("variant sku 为空 (product={})", id)));
            }
            Ok(ProductVariant {
                id: v.id,
                sku: v.sku,
                name: v.name,
                stock: v.stock,
            })
        })
        .collect::<GatewayResult<Vec<_>>>()?;

    Ok(Product {
        id,
        article_number: dto.article_number,
        name: dto.name,
        category: dto.category,
        active: dto.active,
        variants,
    })
}

pub fn decode_products(dtos: Vec<ProductDto>) -> GatewayResult<Vec<Product>> {
    dtos.into_iter().map(decode_product).collect()
}

pub fn decode_activity_log(dto: ActivityLogDto) -> GatewayResult<ActivityLog> {
    let id = require_id(ACTIVITY, Some(dto.id))?;
    let timestamp = DateTime::parse_from_rfc3339(&dto.timestamp)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| GatewayError::decode(ACTIVITY, format!("timestamp 非法 (id={}): {}", id, e)))?;

    Ok(ActivityLog {
        id,
        timestamp,
        user: dto.user,
        action: dto.action,
        entity_type: dto.entity_type,
        entity_id: dto.entity_id,
        details: dto.details,
    })
}

pub fn decode_activity_logs(dtos: Vec<ActivityLogDto>) -> GatewayResult<Vec<ActivityLog>> {
    dtos.into_iter().map(decode_activity_log).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_list_decodes_wire_names() {
        let body = r#"[{"id":"7","laNumber":"LA-00007","location":"Hauptlager 1",
            "shelf":1,"compartment":2,"floor":3,"forSale":true,"containerCount":2,"status":"in-use"}]"#;
        let dtos: Vec<LocationDto> = decode_json(LOCATION, body).unwrap();
        let list = decode_locations(dtos).unwrap();
        assert_eq!(list[0].id, LocationId::Persisted("7".to_string()));
        assert_eq!(list[0].status, LocationStatus::InUse);
        assert!(list[0].for_sale);
        assert!(!list[0].special_storage);
        assert_eq!(list[0].container_count, 2);
    }

    #[test]
    fn test_one_bad_record_rejects_whole_list() {
        let body = r#"[
            {"id":"1","laNumber":"LA-1","location":"A","shelf":1,"compartment":1,"floor":1,"status":"free"},
            {"id":"2","laNumber":"LA-2","location":"A","shelf":1,"compartment":1,"floor":1,"status":"blocked"}
        ]"#;
        let dtos: Vec<LocationDto> = decode_json(LOCATION, body).unwrap();
        let err = decode_locations(dtos).unwrap_err();
        assert!(matches!(err, GatewayError::Decode { ref entity, .. } if entity == "location"));
    }

    #[test]
    fn test_location_rejects_bad_numbers_and_missing_id() {
        let base = LocationDto {
            id: Some("1".into()),
            la_number: "LA-1".into(),
            location: "A".into(),
            shelf: 1,
            compartment: 1,
            floor: 1,
            for_sale: false,
            special_storage: false,
            container_count: 0,
            status: "free".into(),
        };
        assert!(decode_location(LocationDto { shelf: 0, ..base.clone() }).is_err());
        assert!(decode_location(LocationDto { container_count: -1, ..base.clone() }).is_err());
        assert!(decode_location(LocationDto { id: None, ..base.clone() }).is_err());
        assert!(decode_location(base).is_ok());
    }

    #[test]
    fn test_shape_errors_become_decode_errors() {
        let err = decode_json::<Vec<LocationDto>>(LOCATION, r#"{"items":[]}"#).unwrap_err();
        assert!(matches!(err, GatewayError::Decode { .. }));
    }

    #[test]
    fn test_container_units_renumbered_and_bounded() {
        let body = r#"{"id":"c1","containerCode":"S-001","type":"S4","purpose":"Verkauf",
            "slots":[{"number":1},{"number":2},{"number":3}],
            "units":[{"unitNumber":7,"articleNumber":"A-1"},{"unitNumber":9}]}"#;
        let dto: ContainerDto = decode_json(CONTAINER, body).unwrap();
        let container = decode_container(dto).unwrap();
        let numbers: Vec<u32> = container.units.iter().map(|u| u.unit_number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(container.slots[2].label, "Fach 3");
        assert!(!container.is_placed());

        let too_many = r#"{"id":"c2","containerCode":"S-002","type":"S1",
            "slots":[{"number":1}],"units":[{},{}]}"#;
        let dto: ContainerDto = decode_json(CONTAINER, too_many).unwrap();
        assert!(decode_container(dto).is_err());
    }

    #[test]
    fn test_container_partial_placement_rejected() {
        let body = r#"{"id":"c1","containerCode":"S-001","type":"S4",
            "slots":[{"number":1}],"location":"Hauptlager 1","shelf":1}"#;
        let dto: ContainerDto = decode_json(CONTAINER, body).unwrap();
        assert!(decode_container(dto).is_err());
    }

    #[test]
    fn test_activity_timestamp_must_parse() {
        let dto = ActivityLogDto {
            id: "a1".into(),
            timestamp: "gestern".into(),
            user: "anna".into(),
            action: "create".into(),
            entity_type: "location".into(),
            entity_id: None,
            details: None,
        };
        assert!(decode_activity_log(dto.clone()).is_err());
        let ok = decode_activity_log(ActivityLogDto {
            timestamp: "2024-03-01T10:00:00Z".into(),
            ..dto
        })
        .unwrap();
        assert_eq!(ok.user, "anna");
    }
}
