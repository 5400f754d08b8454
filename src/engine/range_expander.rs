// ==========================================
// 仓储管理后台 - 库位范围展开
// ==========================================
// 货架 × 格 × 层 三重区间的笛卡尔积
// 顺序: 货架(外) → 格 → 层(内), 输出顺序可观测且固定
// 前置条件: count >= 1, 由调用方校验
// ==========================================

use crate::domain::location::WarehouseLocation;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// 批量生成参数（已通过校验）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkLocationParams {
    pub location: String,
    pub for_sale: bool,
    pub special_storage: bool,
    pub shelf_start: i64,
    pub shelf_count: i64,
    pub compartment_start: i64,
    pub compartment_count: i64,
    pub floor_start: i64,
    pub floor_count: i64,
}

impl BulkLocationParams {
    /// 生成记录总数 = 货架数 × 格数 × 层数
    pub fn total(&self) -> usize {
        self.shelf_count
            .max(0)
            .saturating_mul(self.compartment_count.max(0))
            .saturating_mul(self.floor_count.max(0)) as usize
    }
}

/// start 起的 count 个坐标（闭区间, 不会越过 i64::MAX）
fn span(start: i64, count: i64) -> RangeInclusive<i64> {
    if count < 1 {
        return 1..=0;
    }
    start..=start.saturating_add(count - 1)
}

/// 展开为库位记录（编号与ID留空, 由 location_number 赋值）
pub fn expand(params: &BulkLocationParams) -> Vec<WarehouseLocation> {
    let mut out = Vec::with_capacity(params.total());

    for shelf in span(params.shelf_start, params.shelf_count) {
        for compartment in span(params.compartment_start, params.compartment_count) {
            for floor in span(params.floor_start, params.floor_count) {
                out.push(WarehouseLocation::new(
                    String::new(),
                    params.location.clone(),
                    shelf,
                    compartment,
                    floor,
                    params.for_sale,
                    params.special_storage,
                ));
            }
        }
    }

    out
}
