// ==========================================
// 仓储管理后台 - 列表过滤管道
// ==========================================
// 规则:
// - 各条件相互独立, 按加入顺序依次应用, 逻辑 AND (不支持 OR/分组)
// - 取值为 "" 或 "all" 的条件视为无约束, 直接跳过
// - 文本条件: 多字段子串匹配, 忽略大小写
// - 分类条件: 精确相等
// - 数值条件: 精确相等; 无法解析为整数时不匹配任何记录
// - 稳定过滤: 输出保持输入相对顺序, 不修改输入
// ==========================================

/// 文本字段访问器
pub type TextField<T> = fn(&T) -> &str;
/// 布尔字段访问器
pub type FlagField<T> = fn(&T) -> bool;
/// 数值字段访问器（None 表示字段缺失, 永不匹配）
pub type NumberField<T> = fn(&T) -> Option<i64>;

/// 无约束哨兵值
pub const ALL: &str = "all";

/// 判断条件取值是否为"无约束"
pub fn is_unconstrained(value: &str) -> bool {
    let v = value.trim();
    v.is_empty() || v.eq_ignore_ascii_case(ALL)
}

/// 解析布尔筛选值
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "ja" | "1" => Some(true),
        "false" | "no" | "nein" | "0" => Some(false),
        _ => None,
    }
}

// ==========================================
// Criterion - 单个过滤条件
// ==========================================
pub enum Criterion<T> {
    Text {
        name: &'static str,
        query: String,
        fields: Vec<TextField<T>>,
    },
    Category {
        name: &'static str,
        value: String,
        field: TextField<T>,
    },
    Flag {
        name: &'static str,
        value: String,
        field: FlagField<T>,
    },
    Number {
        name: &'static str,
        value: String,
        field: NumberField<T>,
    },
}

impl<T> Criterion<T> {
    pub fn name(&self) -> &'static str {
        match self {
            Criterion::Text { name, .. }
            | Criterion::Category { name, .. }
            | Criterion::Flag { name, .. }
            | Criterion::Number { name, .. } => *name,
        }
    }

    fn raw_value(&self) -> &str {
        match self {
            Criterion::Text { query, .. } => query,
            Criterion::Category { value, .. }
            | Criterion::Flag { value, .. }
            | Criterion::Number { value, .. } => value,
        }
    }

    /// 条件是否生效
    pub fn is_active(&self) -> bool {
        !is_unconstrained(self.raw_value())
    }

    /// 单条记录是否满足条件（未生效的条件恒为 true）
    pub fn matches(&self, item: &T) -> bool {
        if !self.is_active() {
            return true;
        }

        match self {
            Criterion::Text { query, fields, .. } => {
                let needle = query.trim().to_lowercase();
                fields
                    .iter()
                    .any(|field| field(item).to_lowercase().contains(&needle))
            }
            Criterion::Category { value, field, .. } => field(item) == value.trim(),
            Criterion::Flag { value, field, .. } => match parse_flag(value) {
                Some(expected) => field(item) == expected,
                None => false,
            },
            Criterion::Number { value, field, .. } => match value.trim().parse::<i64>() {
                Ok(expected) => field(item) == Some(expected),
                Err(_) => false,
            },
        }
    }
}

// ==========================================
// FilterPipeline - 过滤管道
// ==========================================
pub struct FilterPipeline<T> {
    criteria: Vec<Criterion<T>>,
}

impl<T> Default for FilterPipeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FilterPipeline<T> {
    pub fn new() -> Self {
        Self {
            criteria: Vec::new(),
        }
    }

    /// 追加条件（构建器风格）
    pub fn with(mut self, criterion: Criterion<T>) -> Self {
        self.criteria.push(criterion);
        self
    }

    pub fn text(self, name: &'static str, query: &str, fields: Vec<TextField<T>>) -> Self {
        self.with(Criterion::Text {
            name,
            query: query.to_string(),
            fields,
        })
    }

    pub fn category(self, name: &'static str, value: &str, field: TextField<T>) -> Self {
        self.with(Criterion::Category {
            name,
            value: value.to_string(),
            field,
        })
    }

    pub fn flag(self, name: &'static str, value: &str, field: FlagField<T>) -> Self {
        self.with(Criterion::Flag {
            name,
            value: value.to_string(),
            field,
        })
    }

    pub fn number(self, name: &'static str, value: &str, field: NumberField<T>) -> Self {
        self.with(Criterion::Number {
            name,
            value: value.to_string(),
            field,
        })
    }

    /// 生效条件名称列表
    pub fn active_criteria(&self) -> Vec<&'static str> {
        self.criteria
            .iter()
            .filter(|c| c.is_active())
            .map(|c| c.name())
            .collect()
    }

    pub fn matches(&self, item: &T) -> bool {
        self.criteria.iter().all(|c| c.matches(item))
    }

    /// 应用全部条件, 返回新列表
    pub fn apply(&self, items: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        items.iter().filter(|item| self.matches(item)).cloned().collect()
    }
}
