// ==========================================
// 仓储管理后台 - 分页查询结果
// ==========================================

use serde::{Deserialize, Serialize};

use crate::engine::paginator::{PageWindow, Paginator};

/// 列表查询结果（当前页 + 分页信息）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub window: PageWindow,
}

impl<T: Clone> PagedResult<T> {
    /// 对已过滤/排序的列表取当前页
    ///
    /// 当前页超出范围时钳制到最后一页（过滤后结果变少的情况）
    pub fn build(filtered: &[T], paginator: &mut Paginator) -> Self {
        let total = filtered.len();
        paginator.go_to(paginator.current_page(), total);

        Self {
            items: paginator.page_slice(filtered).to_vec(),
            total,
            page: paginator.current_page(),
            page_size: paginator.page_size(),
            page_count: paginator.page_count(total),
            window: paginator.page_window(total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_clamps_to_last_page() {
        let items: Vec<u32> = (1..=12).collect();
        let mut paginator = Paginator::new(5);
        paginator.go_to(3, items.len());

        let page = PagedResult::build(&items[..7], &mut paginator);
        assert_eq!(page.page, 2);
        assert_eq!(page.items, vec![6, 7]);
        assert_eq!(page.page_count, 2);
        assert_eq!(page.window.pages, vec![1, 2]);
    }
}
