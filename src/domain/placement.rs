// ==========================================
// 仓储管理后台 - 舒特放置
// ==========================================
// 放入库位: 目标库位舒特数 +1, 状态 → in-use
// 从原库位移出: 舒特数 -1 (不低于 0), 归零时状态 → free
// ==========================================

use crate::domain::container::ContainerItem;
use crate::domain::location::WarehouseLocation;
use crate::domain::types::LocationStatus;

/// 将舒特放入目标库位
///
/// # 参数
/// - container: 被移动的舒特
/// - target: 目标库位
/// - previous: 舒特原所在库位（若已知）
pub fn place_container(
    container: &mut ContainerItem,
    target: &mut WarehouseLocation,
    previous: Option<&mut WarehouseLocation>,
) {
    if let Some(prev) = previous {
        release_slot(prev);
    }

    container.location = Some(target.location.clone());
    container.shelf = Some(target.shelf);
    container.compartment = Some(target.compartment);
    container.floor = Some(target.floor);

    target.container_count += 1;
    target.status = LocationStatus::InUse;
}

/// 释放库位上的一个舒特占用
pub fn release_slot(location: &mut WarehouseLocation) {
    location.container_count = location.container_count.saturating_sub(1);
    if location.container_count == 0 {
        location.status = LocationStatus::Free;
    }
}

/// 舒特当前坐标是否指向该库位
pub fn is_placed_at(container: &ContainerItem, location: &WarehouseLocation) -> bool {
    container.location.as_deref() == Some(location.location.as_str())
        && container.shelf == Some(location.shelf)
        && container.compartment == Some(location.compartment)
        && container.floor == Some(location.floor)
}
