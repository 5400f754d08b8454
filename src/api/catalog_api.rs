// ==========================================
// 仓储管理后台 - 商品目录 API
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::paging::PagedResult;
use crate::domain::{Product, ProductVariant};
use crate::engine::filters::ProductFilter;
use crate::engine::paginator::Paginator;
use crate::gateway::InventoryBackend;

pub struct CatalogApi {
    backend: Arc<dyn InventoryBackend>,
}

impl CatalogApi {
    pub fn new(backend: Arc<dyn InventoryBackend>) -> Self {
        Self { backend }
    }

    pub async fn list(&self) -> ApiResult<Vec<Product>> {
        let products = self.backend.list_products().await?;
        tracing::debug!(count = products.len(), "加载商品列表");
        Ok(products)
    }

    /// 过滤 → 分页（保持后端返回顺序）
    pub fn query(
        products: &[Product],
        filter: &ProductFilter,
        paginator: &mut Paginator,
    ) -> PagedResult<Product> {
        let filtered = filter.pipeline().apply(products);
        PagedResult::build(&filtered, paginator)
    }

    /// 按 SKU 查找变体（SKU 比较忽略首尾空白）
    pub fn find_variant<'a>(
        products: &'a [Product],
        sku: &str,
    ) -> ApiResult<(&'a Product, &'a ProductVariant)> {
        let sku = sku.trim();
        if sku.is_empty() {
            return Err(ApiError::field("sku", "Pflichtfeld"));
        }
        products
            .iter()
            .find_map(|p| p.find_variant(sku).map(|v| (p, v)))
            .ok_or_else(|| ApiError::NotFound(format!("variant(sku={})不存在", sku)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(article: &str, category: &str, active: bool, skus: &[(&str, i64)]) -> Product {
        Product {
            id: format!("p-{}", article),
            article_number: article.to_string(),
            name: format!("Artikel {}", article),
            category: category.to_string(),
            active,
            variants: skus
                .iter()
                .map(|(sku, stock)| ProductVariant {
                    id: format!("v-{}", sku),
                    sku: sku.to_string(),
                    name: sku.to_string(),
                    stock: *stock,
                })
                .collect(),
        }
    }

    #[test]
    fn test_query_by_category_and_active() {
        let products = vec![
            product("1001", "Schrauben", true, &[]),
            product("1002", "Muttern", true, &[]),
            product("1003", "Schrauben", false, &[]),
        ];
        let filter = ProductFilter {
            category: "Schrauben".into(),
            active: "true".into(),
            ..Default::default()
        };
        let page = CatalogApi::query(&products, &filter, &mut Paginator::default());
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].article_number, "1001");
    }

    #[test]
    fn test_find_variant_by_sku() {
        let products = vec![
            product("1001", "Schrauben", true, &[("S-1", 4)]),
            product("1002", "Muttern", true, &[("M-1", 0), ("M-2", 7)]),
        ];
        let (p, v) = CatalogApi::find_variant(&products, " M-2 ").unwrap();
        assert_eq!(p.article_number, "1002");
        assert_eq!(v.stock, 7);

        assert!(matches!(
            CatalogApi::find_variant(&products, "X-9"),
            Err(ApiError::NotFound(_))
        ));
        assert!(CatalogApi::find_variant(&products, "  ")
            .unwrap_err()
            .field_errors()
            .is_some());
    }
}
