// ==========================================
// 仓储管理后台 - 商品目录
// ==========================================
// 商品 / 变体: 平面记录, 仅用于列表查询与过滤
// ==========================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub stock: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub article_number: String,
    pub name: String,
    pub category: String,
    pub active: bool,
    pub variants: Vec<ProductVariant>,
}

impl Product {
    /// 所有变体库存合计
    pub fn total_stock(&self) -> i64 {
        self.variants.iter().map(|v| v.stock).sum()
    }

    pub fn find_variant(&self, sku: &str) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| v.sku == sku)
    }

    pub fn article_number(&self) -> &str {
        &self.article_number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn active_flag(&self) -> bool {
        self.active
    }
}
