// ==========================================
// 仓储管理后台 - 库位编号分配
// ==========================================
// 预览模式: 所有记录使用同一占位编号 + 坐标派生的临时ID
// 提交模式: 调用方提供的编号生成器, 每条记录调用一次,
//           以已知库位列表为种子, 保证不与现有编号冲突
// ==========================================

use crate::domain::location::{LocationId, WarehouseLocation};
use std::collections::HashSet;

/// 预览占位编号（非唯一）
pub const PREVIEW_LA_NUMBER: &str = "LA-XXXXX";

/// 默认编号前缀
pub const DEFAULT_LA_PREFIX: &str = "LA-";

/// 默认编号数字位数
pub const DEFAULT_LA_WIDTH: usize = 5;

// ==========================================
// 编号生成器 Trait
// ==========================================

/// 库位编号生成器
///
/// 任意 `FnMut() -> String` 闭包也可作为生成器
pub trait LocationNumberGenerator {
    fn next_number(&mut self) -> String;
}

impl<F> LocationNumberGenerator for F
where
    F: FnMut() -> String,
{
    fn next_number(&mut self) -> String {
        self()
    }
}

/// 分配模式
pub enum AssignMode<'a> {
    Preview,
    Commit(&'a mut dyn LocationNumberGenerator),
}

/// 为记录赋编号与ID
pub fn assign(records: &mut [WarehouseLocation], mode: AssignMode<'_>) {
    match mode {
        AssignMode::Preview => {
            for record in records.iter_mut() {
                record.la_number = PREVIEW_LA_NUMBER.to_string();
                record.id = LocationId::preview(record.shelf, record.compartment, record.floor);
            }
        }
        AssignMode::Commit(generator) => {
            for record in records.iter_mut() {
                record.la_number = generator.next_number();
                record.id = LocationId::Unsaved;
            }
        }
    }
}

// ==========================================
// SequentialLaNumberGenerator - 顺序编号生成器
// ==========================================
// 形如 LA-00042: 从现有同前缀编号的最大数字后继续递增,
// 跳过任何已存在的编号
#[derive(Debug, Clone)]
pub struct SequentialLaNumberGenerator {
    prefix: String,
    width: usize,
    next: u64,
    taken: HashSet<String>,
}

impl SequentialLaNumberGenerator {
    /// 以现有库位列表为种子创建生成器
    pub fn seeded(prefix: &str, width: usize, existing: &[WarehouseLocation]) -> Self {
        let taken: HashSet<String> = existing.iter().map(|l| l.la_number.clone()).collect();

        let max_seen = existing
            .iter()
            .filter_map(|l| l.la_number.strip_prefix(prefix))
            .filter_map(|suffix| suffix.parse::<u64>().ok())
            .max()
            .unwrap_or(0);

        Self {
            prefix: prefix.to_string(),
            width,
            next: max_seen + 1,
            taken,
        }
    }

    fn format(&self, n: u64) -> String {
        format!("{}{:0width$}", self.prefix, n, width = self.width)
    }
}

impl LocationNumberGenerator for SequentialLaNumberGenerator {
    fn next_number(&mut self) -> String {
        loop {
            let candidate = self.format(self.next);
            self.next += 1;
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}
