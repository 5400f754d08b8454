// ==========================================
// 活动日志 / 商品目录 集成测试
// ==========================================

mod test_helpers;

use std::sync::Arc;

use lager_admin::api::{ActivityApi, CatalogApi};
use lager_admin::domain::{Product, ProductVariant};
use lager_admin::engine::{ActivityFilter, Paginator, ProductFilter};
use lager_admin::gateway::{InMemoryInventoryBackend, InventoryBackend};

use test_helpers::*;

fn product(article: &str, name: &str, skus: &[&str]) -> Product {
    Product {
        id: format!("p-{}", article),
        article_number: article.to_string(),
        name: name.to_string(),
        category: "Befestigung".to_string(),
        active: true,
        variants: skus
            .iter()
            .map(|sku| ProductVariant {
                id: format!("v-{}", sku),
                sku: sku.to_string(),
                name: sku.to_string(),
                stock: 10,
            })
            .collect(),
    }
}

#[tokio::test]
async fn test_activity_records_mutations() {
    let env = TestEnv::new().expect("无法创建测试环境");
    let form = lager_admin::api::LocationForm {
        location: "Hauptlager 1".into(),
        shelf: Some(1),
        compartment: Some(1),
        floor: Some(1),
        ..Default::default()
    };
    let created = env.state.location_api.create_single(&form).await.unwrap();
    env.state.location_api.delete(&created).await.unwrap();

    let logs = env.state.activity_api.list().await.unwrap();
    assert_eq!(logs.len(), 2);
    for pair in logs.windows(2) {
        assert!(pair[0].timestamp >= pair[1].timestamp);
    }

    let filter = ActivityFilter {
        action: "delete".into(),
        ..Default::default()
    };
    let page = ActivityApi::query(&logs, &filter, &mut Paginator::default());
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].entity_type, "location");
}

#[tokio::test]
async fn test_catalog_search_and_sku_lookup() {
    let backend: Arc<dyn InventoryBackend> = Arc::new(InMemoryInventoryBackend::with_seed(
        vec![],
        vec![],
        vec![
            product("4711", "Sechskantschraube M8", &["4711-10", "4711-20"]),
            product("4712", "Mutter M8", &["4712-01"]),
        ],
    ));
    let api = CatalogApi::new(backend);
    let products = api.list().await.unwrap();

    let filter = ProductFilter {
        search: "schraube".into(),
        ..Default::default()
    };
    let page = CatalogApi::query(&products, &filter, &mut Paginator::default());
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].total_stock(), 20);

    let (owner, variant) = CatalogApi::find_variant(&products, "4712-01").unwrap();
    assert_eq!(owner.article_number, "4712");
    assert_eq!(variant.stock, 10);
}
