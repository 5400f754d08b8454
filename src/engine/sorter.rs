// ==========================================
// 仓储管理后台 - 列表排序
// ==========================================
// 稳定排序: 键相同的记录保持原相对顺序
// ==========================================

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::domain::{ContainerItem, SortDirection, WarehouseLocation};

/// 按键稳定排序
pub fn sort_by_key<T, K, F>(items: &mut [T], direction: SortDirection, key: F)
where
    K: Ord,
    F: Fn(&T) -> K,
{
    items.sort_by(|a, b| apply_direction(key(a).cmp(&key(b)), direction));
}

fn apply_direction(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

// ==========================================
// 库位排序字段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocationSortField {
    LaNumber,
    Location,
    /// 仓库 → 货架 → 格 → 层
    Coordinates,
    ContainerCount,
    Status,
}

impl Default for LocationSortField {
    fn default() -> Self {
        LocationSortField::Coordinates
    }
}

/// 库位排序规格
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSort {
    pub field: LocationSortField,
    pub direction: SortDirection,
}

impl LocationSort {
    pub fn apply(&self, items: &mut [WarehouseLocation]) {
        match self.field {
            LocationSortField::LaNumber => {
                sort_by_key(items, self.direction, |l| l.la_number.clone())
            }
            LocationSortField::Location => {
                sort_by_key(items, self.direction, |l| l.location.clone())
            }
            LocationSortField::Coordinates => sort_by_key(items, self.direction, |l| {
                (l.location.clone(), l.shelf, l.compartment, l.floor)
            }),
            LocationSortField::ContainerCount => {
                sort_by_key(items, self.direction, |l| l.container_count)
            }
            LocationSortField::Status => {
                sort_by_key(items, self.direction, |l| l.status.as_str())
            }
        }
    }

    /// 表头点击: 同字段切换方向, 新字段从升序开始
    pub fn toggle(&mut self, field: LocationSortField) {
        if self.field == field {
            self.direction = self.direction.toggled();
        } else {
            self.field = field;
            self.direction = SortDirection::Asc;
        }
    }
}

// ==========================================
// 舒特排序字段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContainerSortField {
    ContainerCode,
    ContainerType,
    Purpose,
    Location,
    FreeSlots,
}

impl Default for ContainerSortField {
    fn default() -> Self {
        ContainerSortField::ContainerCode
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSort {
    pub field: ContainerSortField,
    pub direction: SortDirection,
}

impl ContainerSort {
    pub fn apply(&self, items: &mut [ContainerItem]) {
        match self.field {
            ContainerSortField::ContainerCode => {
                sort_by_key(items, self.direction, |c| c.container_code.clone())
            }
            ContainerSortField::ContainerType => {
                sort_by_key(items, self.direction, |c| c.container_type.clone())
            }
            ContainerSortField::Purpose => {
                sort_by_key(items, self.direction, |c| c.purpose.clone())
            }
            // 未放置的舒特排在最前（升序）
            ContainerSortField::Location => sort_by_key(items, self.direction, |c| {
                (c.location.clone(), c.shelf, c.compartment, c.floor)
            }),
            ContainerSortField::FreeSlots => sort_by_key(items, self.direction, |c| c.free_slots()),
        }
    }

    pub fn toggle(&mut self, field: ContainerSortField) {
        if self.field == field {
            self.direction = self.direction.toggled();
        } else {
            self.field = field;
            self.direction = SortDirection::Asc;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(la: &str, location: &str, shelf: i64, compartment: i64) -> WarehouseLocation {
        WarehouseLocation::new(la.into(), location.into(), shelf, compartment, 1, false, false)
    }

    #[test]
    fn test_coordinate_sort_and_stability() {
        let mut items = vec![
            loc("c", "B", 1, 1),
            loc("a", "A", 2, 1),
            loc("b", "A", 1, 2),
            loc("d", "A", 1, 2),
        ];
        LocationSort::default().apply(&mut items);
        let order: Vec<&str> = items.iter().map(|l| l.la_number.as_str()).collect();
        assert_eq!(order, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_toggle_direction() {
        let mut sort = LocationSort::default();
        sort.toggle(LocationSortField::LaNumber);
        assert_eq!(sort.direction, SortDirection::Asc);
        sort.toggle(LocationSortField::LaNumber);
        assert_eq!(sort.direction, SortDirection::Desc);

        let mut items = vec![loc("a", "A", 1, 1), loc("c", "A", 1, 1), loc("b", "A", 1, 1)];
        sort.apply(&mut items);
        let order: Vec<&str> = items.iter().map(|l| l.la_number.as_str()).collect();
        assert_eq!(order, vec!["c", "b", "a"]);
    }
}
