// ==========================================
// 舒特管理 集成测试
// ==========================================
// 测试范围:
// 1. 按类型新建舒特（格位生成）
// 2. 单元增删改后重新编号
// 3. 移库: 库位舒特数与状态维护
// 4. 两个界面并发加载
// ==========================================

mod test_helpers;

use lager_admin::api::{ApiError, ContainerEditForm, ContainerForm};
use lager_admin::app::{refresh_all, ActiveOverlay, ContainerScreen, LocationScreen};
use lager_admin::domain::{LocationStatus, UnitDraft, MAX_SLOTS};
use lager_admin::gateway::InventoryBackend;

use test_helpers::*;

fn unit(article: &str) -> UnitDraft {
    UnitDraft {
        article_number: Some(article.to_string()),
        stock: Some(1),
        ..Default::default()
    }
}

/// 新建 S4 类型并创建一个舒特, 返回舒特ID
async fn create_s4(env: &TestEnv, screen: &mut ContainerScreen, code: &str) -> String {
    let container_type = match env
        .state
        .settings_api
        .list_container_types()
        .unwrap()
        .into_iter()
        .find(|t| t.code == "S4")
    {
        Some(t) => t,
        None => env
            .state
            .settings_api
            .add_container_type(container_type("S4", 4))
            .expect("新建类型失败"),
    };

    let form = ContainerForm {
        container_code: code.to_string(),
        container_type_id: container_type.id,
        custom_slot_count: None,
        purpose: "Kommissionierung".to_string(),
        description: String::new(),
    };
    screen.create(&form).await.expect("新建舒特失败");
    screen
        .containers()
        .iter()
        .find(|c| c.container_code == code)
        .map(|c| c.id.clone())
        .expect("列表中应有新舒特")
}

// 按类型生成格位
#[tokio::test]
async fn test_create_container_slots_from_type() {
    let env = TestEnv::new().expect("无法创建测试环境");
    let mut screen = ContainerScreen::new(env.state.container_api.clone(), 10);

    let id = create_s4(&env, &mut screen, "SCH-001").await;
    let created = &screen.containers()[0];
    assert_eq!(created.id, id);
    assert_eq!(created.container_type, "S4");
    let numbers: Vec<u32> = created.slots.iter().map(|s| s.number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);
    assert!(created.units.is_empty());
    assert!(!created.is_placed());
}

// 校验失败
#[tokio::test]
async fn test_create_container_validation_fails() {
    let env = TestEnv::new().expect("无法创建测试环境");
    let mut screen = ContainerScreen::new(env.state.container_api.clone(), 10);

    let form = ContainerForm {
        container_code: " ".into(),
        container_type_id: "unbekannt".into(),
        custom_slot_count: Some(0),
        purpose: String::new(),
        description: String::new(),
    };
    let err = screen.create(&form).await.unwrap_err();
    let fields: Vec<&str> = err.field_errors().unwrap().fields().collect();
    assert_eq!(
        fields,
        vec!["containerCode", "containerType", "customSlotCount", "purpose"]
    );
    assert!(screen.containers().is_empty());
    assert!(env.backend.list_containers().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_units_renumbered_after_removal() {
    let env = TestEnv::new().expect("无法创建测试环境");
    let mut screen = ContainerScreen::new(env.state.container_api.clone(), 10);
    let id = create_s4(&env, &mut screen, "SCH-002").await;

    for article in ["A-1", "A-2", "A-3"] {
        screen.add_unit(&id, unit(article)).await.unwrap();
    }
    screen.remove_unit(&id, 2).await.unwrap();

    let container = env.backend.get_container(&id).await.unwrap();
    let numbers: Vec<u32> = container.units.iter().map(|u| u.unit_number).collect();
    assert_eq!(numbers, vec![1, 2]);
    let articles: Vec<&str> = container
        .units
        .iter()
        .filter_map(|u| u.article_number.as_deref())
        .collect();
    assert_eq!(articles, vec!["A-1", "A-3"]);
    assert_eq!(screen.containers()[0], container);

    screen.update_unit(&id, 2, unit("A-9")).await.unwrap();
    let container = env.backend.get_container(&id).await.unwrap();
    assert_eq!(container.units[1].article_number.as_deref(), Some("A-9"));
    assert_eq!(container.units[1].unit_number, 2);
}

// 单元数受格数限制
#[tokio::test]
async fn test_unit_limits_by_slot_count() {
    let env = TestEnv::new().expect("无法创建测试环境");
    let mut screen = ContainerScreen::new(env.state.container_api.clone(), 10);
    let id = create_s4(&env, &mut screen, "SCH-003").await;

    for i in 0..4 {
        screen.add_unit(&id, unit(&format!("B-{}", i))).await.unwrap();
    }
    let err = screen.add_unit(&id, unit("B-X")).await.unwrap_err();
    assert!(matches!(err, ApiError::BusinessRuleViolation(_)));
    assert!(screen.error().is_some());

    let err = screen.remove_unit(&id, 9).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));

    // 格数不能小于单元数
    let shrink = ContainerEditForm {
        purpose: "Kommissionierung".into(),
        description: String::new(),
        slot_count: Some(2),
    };
    assert!(screen.update(&id, &shrink).await.is_err());

    let grow = ContainerEditForm {
        slot_count: Some(6),
        ..shrink
    };
    screen.update(&id, &grow).await.unwrap();
    assert_eq!(screen.containers()[0].slots.len(), 6);
    assert_eq!(screen.containers()[0].free_slots(), 2);
}

// 移库时更新库位占用
#[tokio::test]
async fn test_move_container_updates_location_usage() {
    let env = TestEnv::with_seed(
        vec![
            location("LA-00001", "Hauptlager 1", 1, 1, 1),
            location("LA-00002", "Hauptlager 1", 1, 1, 2),
        ],
        vec![],
    )
    .expect("无法创建测试环境");
    let mut screen = ContainerScreen::new(env.state.container_api.clone(), 10);
    let id = create_s4(&env, &mut screen, "SCH-004").await;

    let locations = env.backend.list_locations().await.unwrap();
    let first = locations[0].id.server_id().unwrap().to_string();
    let second = locations[1].id.server_id().unwrap().to_string();

    screen.open_overlay(ActiveOverlay::MoveContainer {
        container_id: id.clone(),
    });
    screen.move_to_location(&id, &first).await.unwrap();
    assert!(!screen.overlay().is_open());
    assert_eq!(screen.containers()[0].floor, Some(1));

    screen.move_to_location(&id, &second).await.unwrap();
    let locations = env.backend.list_locations().await.unwrap();
    assert_eq!(locations[0].container_count, 0);
    assert_eq!(locations[0].status, LocationStatus::Free);
    assert_eq!(locations[1].container_count, 1);
    assert_eq!(locations[1].status, LocationStatus::InUse);

    let moved = &screen.containers()[0];
    assert_eq!(moved.location.as_deref(), Some("Hauptlager 1"));
    assert_eq!(moved.floor, Some(2));

    // 删除舒特释放库位
    screen.delete(&id).await.unwrap();
    let locations = env.backend.list_locations().await.unwrap();
    assert_eq!(locations[1].container_count, 0);
    assert_eq!(locations[1].status, LocationStatus::Free);
}

// 两个界面并发加载
#[tokio::test]
async fn test_refresh_all_concurrent_load() {
    let env = TestEnv::with_seed(vec![location("LA-00001", "Hauptlager 1", 1, 1, 1)], vec![])
        .expect("无法创建测试环境");
    let mut containers = ContainerScreen::new(env.state.container_api.clone(), 10);
    create_s4(&env, &mut containers, "SCH-005").await;

    let mut locations = LocationScreen::new(env.state.location_api.clone(), 10);
    let mut containers = ContainerScreen::new(env.state.container_api.clone(), 10);
    let (l, c) = refresh_all(&mut locations, &mut containers).await;
    assert!(l.is_ok());
    assert!(c.is_ok());
    assert_eq!(locations.locations().len(), 1);
    assert_eq!(containers.containers().len(), 1);

    env.backend.set_unavailable(true);
    let (l, c) = refresh_all(&mut locations, &mut containers).await;
    assert!(l.is_err() && c.is_err());
    assert_eq!(locations.locations().len(), 1);
    assert_eq!(containers.containers().len(), 1);
    assert!(locations.error().is_some());
    assert!(containers.error().is_some());
}

// 格数上限: 新建 / 编辑 / 类型定义均拒绝
#[tokio::test]
async fn test_slot_count_upper_bound() {
    let env = TestEnv::new().expect("无法创建测试环境");
    let mut screen = ContainerScreen::new(env.state.container_api.clone(), 10);
    let id = create_s4(&env, &mut screen, "SCH-006").await;
    let type_id = env.state.settings_api.list_container_types().unwrap()[0].id.clone();

    let form = ContainerForm {
        container_code: "SCH-007".into(),
        container_type_id: type_id,
        custom_slot_count: Some(4_000_000_000),
        purpose: "Kommissionierung".into(),
        description: String::new(),
    };
    let err = screen.create(&form).await.unwrap_err();
    assert_eq!(
        err.field_errors().and_then(|e| e.get("customSlotCount")),
        Some(format!("Höchstens {} Fächer", MAX_SLOTS).as_str())
    );
    assert_eq!(env.backend.list_containers().await.unwrap().len(), 1);

    let edit = ContainerEditForm {
        purpose: "Kommissionierung".into(),
        description: String::new(),
        slot_count: Some(i64::from(MAX_SLOTS) + 1),
    };
    let err = screen.update(&id, &edit).await.unwrap_err();
    assert!(err.field_errors().unwrap().contains("slotCount"));
    assert_eq!(screen.containers()[0].slots.len(), 4);

    let err = env
        .state
        .settings_api
        .add_container_type(container_type("XXL", MAX_SLOTS + 1))
        .unwrap_err();
    assert!(err.field_errors().unwrap().contains("slotCount"));
}
