// ==========================================
// 仓储管理后台 - 舒特领域模型 (Schütte)
// ==========================================
// 约束:
// - units.len() <= slots.len()
// - 单元编号为 1..N 的稠密序列, 每次变更后按数组位置重新推导,
//   从不独立存储
// ==========================================

use crate::domain::settings::ContainerType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 单个舒特的格位上限
pub const MAX_SLOTS: u32 = 500;

/// 舒特领域错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    #[error("舒特已满: {slots} 个格位均已占用")]
    NoFreeSlot { slots: usize },

    #[error("单元不存在: position={position}, 当前单元数={count}")]
    UnitNotFound { position: usize, count: usize },

    #[error("格位数必须至少为 1")]
    EmptySlots,

    #[error("格位数 {slots} 小于已占用单元数 {units}")]
    SlotsBelowUnits { slots: usize, units: usize },

    #[error("格位数 {slots} 超过上限 {max}")]
    TooManySlots { slots: u32, max: u32 },
}

// ==========================================
// Slot - 格位描述
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub number: u32,
    pub label: String,
}

impl Slot {
    pub fn numbered(number: u32) -> Self {
        Self {
            number,
            label: format!("Fach {}", number),
        }
    }
}

// ==========================================
// ContainerUnit - 单元 (已占用格位)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerUnit {
    pub unit_number: u32, // 由数组位置推导 (1-based)
    pub article_number: Option<String>,
    pub legacy_article_number: Option<String>,
    pub description: Option<String>,
    pub stock: Option<i64>,
}

/// 单元编辑草稿（不含编号）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDraft {
    pub article_number: Option<String>,
    pub legacy_article_number: Option<String>,
    pub description: Option<String>,
    pub stock: Option<i64>,
}

impl UnitDraft {
    fn into_unit(self) -> ContainerUnit {
        ContainerUnit {
            unit_number: 0,
            article_number: self.article_number,
            legacy_article_number: self.legacy_article_number,
            description: self.description,
            stock: self.stock,
        }
    }
}

// ==========================================
// ContainerItem - 舒特
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerItem {
    pub id: String, // 服务端ID (新建草稿为空)
    pub container_code: String,
    pub container_type: String, // 类型短代码
    pub purpose: String,
    pub description: String,
    pub slots: Vec<Slot>,
    pub units: Vec<ContainerUnit>,

    // ===== 当前放置位置 (未放置时为 None) =====
    pub location: Option<String>,
    pub shelf: Option<i64>,
    pub compartment: Option<i64>,
    pub floor: Option<i64>,
}

impl ContainerItem {
    /// 按类型生成新舒特草稿
    ///
    /// # 参数
    /// - custom_slot_count: 自定义格数 (覆盖类型默认值)
    ///
    /// # 返回
    /// 格位 1..=n, 零个单元
    pub fn draft(
        container_code: String,
        container_type: &ContainerType,
        custom_slot_count: Option<u32>,
        purpose: String,
        description: String,
    ) -> Result<Self, ContainerError> {
        let slot_count = custom_slot_count.unwrap_or(container_type.slot_count);
        if slot_count == 0 {
            return Err(ContainerError::EmptySlots);
        }
        if slot_count > MAX_SLOTS {
            return Err(ContainerError::TooManySlots {
                slots: slot_count,
                max: MAX_SLOTS,
            });
        }

        Ok(Self {
            id: String::new(),
            container_code,
            container_type: container_type.code.clone(),
            purpose,
            description,
            slots: (1..=slot_count).map(Slot::numbered).collect(),
            units: Vec::new(),
            location: None,
            shelf: None,
            compartment: None,
            floor: None,
        })
    }

    pub fn free_slots(&self) -> usize {
        self.slots.len().saturating_sub(self.units.len())
    }

    pub fn is_placed(&self) -> bool {
        self.location.is_some()
    }

    /// 追加单元
    pub fn add_unit(&mut self, draft: UnitDraft) -> Result<&ContainerUnit, ContainerError> {
        if self.units.len() >= self.slots.len() {
            return Err(ContainerError::NoFreeSlot {
                slots: self.slots.len(),
            });
        }
        self.units.push(draft.into_unit());
        self.renumber_units();
        let last = self.units.len() - 1;
        Ok(&self.units[last])
    }

    /// 删除单元（position 从 1 开始）
    pub fn remove_unit(&mut self, position: usize) -> Result<ContainerUnit, ContainerError> {
        let index = self.unit_index(position)?;
        let removed = self.units.remove(index);
        self.renumber_units();
        Ok(removed)
    }

    /// 编辑单元（position 从 1 开始）
    pub fn update_unit(&mut self, position: usize, draft: UnitDraft) -> Result<(), ContainerError> {
        let index = self.unit_index(position)?;
        self.units[index] = draft.into_unit();
        self.renumber_units();
        Ok(())
    }

    /// 调整格位数量
    pub fn resize_slots(&mut self, slot_count: u32) -> Result<(), ContainerError> {
        let n = slot_count as usize;
        if n == 0 {
            return Err(ContainerError::EmptySlots);
        }
        if slot_count > MAX_SLOTS {
            return Err(ContainerError::TooManySlots {
                slots: slot_count,
                max: MAX_SLOTS,
            });
        }
        if n < self.units.len() {
            return Err(ContainerError::SlotsBelowUnits {
                slots: n,
                units: self.units.len(),
            });
        }
        self.slots = (1..=slot_count).map(Slot::numbered).collect();
        Ok(())
    }

    /// 按数组位置重新编号 1..N（幂等）
    pub fn renumber_units(&mut self) {
        for (index, unit) in self.units.iter_mut().enumerate() {
            unit.unit_number = index as u32 + 1;
        }
    }

    fn unit_index(&self, position: usize) -> Result<usize, ContainerError> {
        if position == 0 || position > self.units.len() {
            return Err(ContainerError::UnitNotFound {
                position,
                count: self.units.len(),
            });
        }
        Ok(position - 1)
    }

    // ===== 过滤器字段访问器 =====

    pub fn container_code(&self) -> &str {
        &self.container_code
    }

    pub fn container_type_code(&self) -> &str {
        &self.container_type
    }

    pub fn purpose_name(&self) -> &str {
        &self.purpose
    }

    pub fn description_text(&self) -> &str {
        &self.description
    }

    pub fn location_name(&self) -> &str {
        self.location.as_deref().unwrap_or("")
    }

    pub fn shelf_value(&self) -> Option<i64> {
        self.shelf
    }

    pub fn compartment_value(&self) -> Option<i64> {
        self.compartment
    }

    pub fn floor_value(&self) -> Option<i64> {
        self.floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_type(slots: u32) -> ContainerType {
        ContainerType {
            id: "t1".to_string(),
            code: "S5".to_string(),
            name: "Schütte 5-fach".to_string(),
            slot_count: slots,
        }
    }

    fn unit(article: &str) -> UnitDraft {
        UnitDraft {
            article_number: Some(article.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_draft_generates_slots_from_type() {
        let c = ContainerItem::draft("C-1".into(), &box_type(5), None, "Lager".into(), String::new())
            .unwrap();
        assert_eq!(c.slots.len(), 5);
        assert_eq!(c.slots[0].number, 1);
        assert_eq!(c.slots[4].number, 5);
        assert!(c.units.is_empty());
        assert_eq!(c.container_type, "S5");
    }

    #[test]
    fn test_draft_custom_slot_count_overrides_type() {
        let c = ContainerItem::draft("C-1".into(), &box_type(5), Some(8), "Lager".into(), String::new())
            .unwrap();
        assert_eq!(c.slots.len(), 8);

        let err = ContainerItem::draft("C-2".into(), &box_type(5), Some(0), "Lager".into(), String::new())
            .unwrap_err();
        assert_eq!(err, ContainerError::EmptySlots);
    }

    #[test]
    fn test_remove_unit_renumbers_without_gaps() {
        let mut c = ContainerItem::draft("C-1".into(), &box_type(5), None, "Lager".into(), String::new())
            .unwrap();
        c.add_unit(unit("A1")).unwrap();
        c.add_unit(unit("A2")).unwrap();
        c.add_unit(unit("A3")).unwrap();

        let removed = c.remove_unit(2).unwrap();
        assert_eq!(removed.article_number.as_deref(), Some("A2"));

        let numbers: Vec<u32> = c.units.iter().map(|u| u.unit_number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(c.units[1].article_number.as_deref(), Some("A3"));
        assert_eq!(c.free_slots(), 3);
    }

    #[test]
    fn test_add_unit_rejects_when_full() {
        let mut c = ContainerItem::draft("C-1".into(), &box_type(2), None, "Lager".into(), String::new())
            .unwrap();
        c.add_unit(unit("A1")).unwrap();
        c.add_unit(unit("A2")).unwrap();
        let err = c.add_unit(unit("A3")).unwrap_err();
        assert_eq!(err, ContainerError::NoFreeSlot { slots: 2 });
        assert_eq!(c.units.len(), 2);
    }

    #[test]
    fn test_update_and_out_of_range_positions() {
        let mut c = ContainerItem::draft("C-1".into(), &box_type(3), None, "Lager".into(), String::new())
            .unwrap();
        c.add_unit(unit("A1")).unwrap();

        c.update_unit(1, unit("B1")).unwrap();
        assert_eq!(c.units[0].article_number.as_deref(), Some("B1"));
        assert_eq!(c.units[0].unit_number, 1);

        assert!(matches!(c.remove_unit(0), Err(ContainerError::UnitNotFound { .. })));
        assert!(matches!(c.update_unit(2, unit("X")), Err(ContainerError::UnitNotFound { .. })));
    }

    #[test]
    fn test_renumber_is_idempotent() {
        let mut c = ContainerItem::draft("C-1".into(), &box_type(3), None, "Lager".into(), String::new())
            .unwrap();
        c.units = vec![unit("A").into_unit(), unit("B").into_unit()];
        c.units[0].unit_number = 7;
        c.units[1].unit_number = 7;

        c.renumber_units();
        let first: Vec<u32> = c.units.iter().map(|u| u.unit_number).collect();
        c.renumber_units();
        let second: Vec<u32> = c.units.iter().map(|u| u.unit_number).collect();
        assert_eq!(first, vec![1, 2]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_resize_slots_keeps_units_invariant() {
        let mut c = ContainerItem::draft("C-1".into(), &box_type(4), None, "Lager".into(), String::new())
            .unwrap();
        c.add_unit(unit("A1")).unwrap();
        c.add_unit(unit("A2")).unwrap();

        assert_eq!(
            c.resize_slots(1),
            Err(ContainerError::SlotsBelowUnits { slots: 1, units: 2 })
        );
        c.resize_slots(2).unwrap();
        assert_eq!(c.slots.len(), 2);
    }

    #[test]
    fn test_slot_count_upper_bound() {
        let err = ContainerItem::draft(
            "C-1".into(),
            &box_type(4),
            Some(4_000_000_000),
            "Lager".into(),
            String::new(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ContainerError::TooManySlots {
                slots: 4_000_000_000,
                max: MAX_SLOTS
            }
        );

        let mut c = ContainerItem::draft("C-2".into(), &box_type(MAX_SLOTS), None, "Lager".into(), String::new())
            .unwrap();
        assert_eq!(c.slots.len(), MAX_SLOTS as usize);
        assert!(c.resize_slots(MAX_SLOTS + 1).is_err());
        assert_eq!(c.slots.len(), MAX_SLOTS as usize);
    }
}
