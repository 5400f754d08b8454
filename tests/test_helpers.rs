// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 临时数据库、离线后端测试环境、测试数据构建
// ==========================================

#![allow(dead_code)]

use std::error::Error;
use std::sync::Arc;

use tempfile::NamedTempFile;

use lager_admin::app::AppState;
use lager_admin::config::AppConfig;
use lager_admin::domain::{ContainerItem, ContainerType, WarehouseLocation};
use lager_admin::engine::BulkLocationForm;
use lager_admin::gateway::{InMemoryInventoryBackend, InventoryBackend};

/// 创建临时测试数据库并初始化 schema_version
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().ok_or("临时路径非 UTF-8")?.to_string();

    let conn = lager_admin::db::open_sqlite_connection(&db_path)?;
    lager_admin::db::ensure_schema_version(&conn)?;

    Ok((temp_file, db_path))
}

// ==========================================
// 测试环境
// ==========================================

/// 离线测试环境: 临时 SQLite + 内存后端
pub struct TestEnv {
    pub state: AppState,
    pub backend: Arc<InMemoryInventoryBackend>,
    pub db_path: String,

    // 临时文件（确保生命周期）
    _temp_file: NamedTempFile,
}

impl TestEnv {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        Self::with_backend(InMemoryInventoryBackend::new())
    }

    pub fn with_seed(
        locations: Vec<WarehouseLocation>,
        containers: Vec<ContainerItem>,
    ) -> Result<Self, Box<dyn Error>> {
        Self::with_backend(InMemoryInventoryBackend::with_seed(locations, containers, vec![]))
    }

    fn with_backend(backend: InMemoryInventoryBackend) -> Result<Self, Box<dyn Error>> {
        let (temp_file, db_path) = create_test_db()?;
        let backend = Arc::new(backend);
        let dyn_backend: Arc<dyn InventoryBackend> = backend.clone();

        let config = AppConfig {
            db_path: Some(db_path.clone()),
            ..Default::default()
        };
        let state = AppState::with_backend(&db_path, config, dyn_backend)?;

        Ok(Self {
            state,
            backend,
            db_path,
            _temp_file: temp_file,
        })
    }
}

// ==========================================
// 测试数据构建
// ==========================================

pub fn location(la: &str, name: &str, shelf: i64, compartment: i64, floor: i64) -> WarehouseLocation {
    WarehouseLocation::new(la.into(), name.into(), shelf, compartment, floor, false, false)
}

pub fn container_type(code: &str, slots: u32) -> ContainerType {
    ContainerType {
        id: String::new(),
        code: code.to_string(),
        name: format!("Schütte {}", code),
        slot_count: slots,
    }
}

/// 批量库位表单
pub fn bulk_form(
    name: &str,
    shelves: (i64, i64),
    compartments: (i64, i64),
    floors: (i64, i64),
) -> BulkLocationForm {
    BulkLocationForm {
        location: name.to_string(),
        for_sale: false,
        special_storage: false,
        shelf_start: Some(shelves.0),
        shelf_count: Some(shelves.1),
        compartment_start: Some(compartments.0),
        compartment_count: Some(compartments.1),
        floor_start: Some(floors.0),
        floor_count: Some(floors.1),
    }
}
