// ==========================================
// 仓储管理后台 - 分页器
// ==========================================
// page_count = ceil(n / page_size), n = 0 时为 1
// 页码按钮最多显示 5 个:
// - page_count <= 5: 全部显示
// - current <= 3: 1..=5
// - current >= page_count - 2: 最后 5 页
// - 其它: current-2 ..= current+2
// page_count > 5 且 current < page_count - 2 时显示省略号 + 末页按钮
// 修改 page_size 时当前页重置为 1
// ==========================================

use serde::{Deserialize, Serialize};

/// 页码按钮最大数量
pub const MAX_PAGE_BUTTONS: usize = 5;

/// 可选每页条数
pub const DEFAULT_PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];

/// 页码窗口（用于按钮渲染）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub pages: Vec<usize>,
    pub show_trailing_ellipsis: bool,
    pub last_page: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginator {
    page_size: usize,
    current_page: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZES[0],
            current_page: 1,
        }
    }
}

impl Paginator {
    /// 创建分页器, page_size 为 0 时回退到默认值
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZES[0]
            } else {
                page_size
            },
            current_page: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// 总页数
    pub fn page_count(&self, total: usize) -> usize {
        page_count(total, self.page_size)
    }

    /// 修改每页条数, 当前页重置为 1
    ///
    /// # 返回
    /// - Err: page_size 为 0
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), String> {
        if page_size == 0 {
            return Err("每页条数必须大于 0".to_string());
        }
        self.page_size = page_size;
        self.current_page = 1;
        Ok(())
    }

    /// 跳转页码（钳制到 [1, page_count]）
    pub fn go_to(&mut self, page: usize, total: usize) {
        let count = self.page_count(total);
        self.current_page = page.clamp(1, count);
    }

    /// 重置到第一页（过滤条件变化时使用）
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// 当前页切片
    pub fn page_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.current_page - 1).saturating_mul(self.page_size);
        if start >= items.len() {
            return &[];
        }
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }

    /// 页码按钮窗口
    pub fn page_window(&self, total: usize) -> PageWindow {
        page_window(self.current_page, self.page_count(total))
    }
}

/// 总页数: ceil(total / page_size), 最少 1 页
pub fn page_count(total: usize, page_size: usize) -> usize {
    let size = page_size.max(1);
    ((total + size - 1) / size).max(1)
}

/// 计算页码按钮窗口
pub fn page_window(current_page: usize, page_count: usize) -> PageWindow {
    let count = page_count.max(1);
    let current = current_page.clamp(1, count);

    let (first, last) = if count <= MAX_PAGE_BUTTONS {
        (1, count)
    } else if current <= 3 {
        (1, MAX_PAGE_BUTTONS)
    } else if current + 2 >= count {
        (count - MAX_PAGE_BUTTONS + 1, count)
    } else {
        (current - 2, current + 2)
    };

    PageWindow {
        pages: (first..=last).collect(),
        show_trailing_ellipsis: count > MAX_PAGE_BUTTONS && current + 2 < count,
        last_page: count,
    }
}
