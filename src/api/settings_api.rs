// ==========================================
// 仓储管理后台 - 设置 API
// ==========================================
// 职责: 打印机 / 秤 / 用途 / 舒特类型的维护
// 仓储由应用外壳注入（SettingsRepository）
// 约束: 至多一个默认打印机
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{
    validate_container_type, validate_printer, validate_purpose, validate_scale,
};
use crate::domain::{ContainerType, Printer, Purpose, Scale, SettingsRecord};
use crate::repository::SettingsRepository;

pub struct SettingsApi {
    printers: Arc<dyn SettingsRepository<Printer>>,
    scales: Arc<dyn SettingsRepository<Scale>>,
    purposes: Arc<dyn SettingsRepository<Purpose>>,
    container_types: Arc<dyn SettingsRepository<ContainerType>>,
}

impl SettingsApi {
    pub fn new(
        printers: Arc<dyn SettingsRepository<Printer>>,
        scales: Arc<dyn SettingsRepository<Scale>>,
        purposes: Arc<dyn SettingsRepository<Purpose>>,
        container_types: Arc<dyn SettingsRepository<ContainerType>>,
    ) -> Self {
        Self {
            printers,
            scales,
            purposes,
            container_types,
        }
    }

    // ==========================================
    // 打印机
    // ==========================================

    pub fn list_printers(&self) -> ApiResult<Vec<Printer>> {
        Ok(self.printers.list()?)
    }

    pub fn default_printer(&self) -> ApiResult<Option<Printer>> {
        Ok(self.printers.list()?.into_iter().find(|p| p.is_default))
    }

    pub fn add_printer(&self, printer: Printer) -> ApiResult<Printer> {
        validate_printer(&printer)?;
        let saved = self.printers.add(printer)?;
        if saved.is_default {
            self.clear_other_defaults(&saved.id)?;
        }
        log_saved(&saved);
        Ok(saved)
    }

    pub fn update_printer(&self, printer: Printer) -> ApiResult<Printer> {
        validate_printer(&printer)?;
        self.printers.update(&printer)?;
        if printer.is_default {
            self.clear_other_defaults(&printer.id)?;
        }
        log_saved(&printer);
        Ok(printer)
    }

    pub fn delete_printer(&self, id: &str) -> ApiResult<()> {
        self.printers.delete(id)?;
        tracing::info!(kind = Printer::KIND, id, "删除设置记录");
        Ok(())
    }

    /// 设为默认打印机（其余取消默认）
    pub fn set_default_printer(&self, id: &str) -> ApiResult<Printer> {
        let mut printer = self
            .printers
            .get(id)?
            .ok_or_else(|| ApiError::NotFound(format!("printer(id={})不存在", id)))?;
        printer.is_default = true;
        self.update_printer(printer)
    }

    fn clear_other_defaults(&self, keep_id: &str) -> ApiResult<()> {
        for mut other in self.printers.list()? {
            if other.id != keep_id && other.is_default {
                other.is_default = false;
                self.printers.update(&other)?;
            }
        }
        Ok(())
    }

    // ==========================================
    // 秤
    // ==========================================

    pub fn list_scales(&self) -> ApiResult<Vec<Scale>> {
        Ok(self.scales.list()?)
    }

    pub fn add_scale(&self, scale: Scale) -> ApiResult<Scale> {
        validate_scale(&scale)?;
        let saved = self.scales.add(scale)?;
        log_saved(&saved);
        Ok(saved)
    }

    pub fn update_scale(&self, scale: Scale) -> ApiResult<Scale> {
        validate_scale(&scale)?;
        self.scales.update(&scale)?;
        log_saved(&scale);
        Ok(scale)
    }

    pub fn delete_scale(&self, id: &str) -> ApiResult<()> {
        self.scales.delete(id)?;
        tracing::info!(kind = Scale::KIND, id, "删除设置记录");
        Ok(())
    }

    // ==========================================
    // 用途
    // ==========================================

    pub fn list_purposes(&self) -> ApiResult<Vec<Purpose>> {
        Ok(self.purposes.list()?)
    }

    pub fn add_purpose(&self, purpose: Purpose) -> ApiResult<Purpose> {
        validate_purpose(&purpose, &self.purposes.list()?)?;
        let saved = self.purposes.add(purpose)?;
        log_saved(&saved);
        Ok(saved)
    }

    pub fn update_purpose(&self, purpose: Purpose) -> ApiResult<Purpose> {
        validate_purpose(&purpose, &self.purposes.list()?)?;
        self.purposes.update(&purpose)?;
        log_saved(&purpose);
        Ok(purpose)
    }

    pub fn delete_purpose(&self, id: &str) -> ApiResult<()> {
        self.purposes.delete(id)?;
        tracing::info!(kind = Purpose::KIND, id, "删除设置记录");
        Ok(())
    }

    // ==========================================
    // 舒特类型
    // ==========================================

    pub fn list_container_types(&self) -> ApiResult<Vec<ContainerType>> {
        Ok(self.container_types.list()?)
    }

    pub fn add_container_type(&self, container_type: ContainerType) -> ApiResult<ContainerType> {
        validate_container_type(&container_type, &self.container_types.list()?)?;
        let mut container_type = container_type;
        container_type.code = container_type.code.trim().to_uppercase();
        let saved = self.container_types.add(container_type)?;
        log_saved(&saved);
        Ok(saved)
    }

    pub fn update_container_type(&self, container_type: ContainerType) -> ApiResult<ContainerType> {
        validate_container_type(&container_type, &self.container_types.list()?)?;
        let mut container_type = container_type;
        container_type.code = container_type.code.trim().to_uppercase();
        self.container_types.update(&container_type)?;
        log_saved(&container_type);
        Ok(container_type)
    }

    pub fn delete_container_type(&self, id: &str) -> ApiResult<()> {
        self.container_types.delete(id)?;
        tracing::info!(kind = ContainerType::KIND, id, "删除设置记录");
        Ok(())
    }
}

fn log_saved<T: SettingsRecord>(record: &T) {
    tracing::info!(
        kind = T::KIND,
        id = record.id(),
        name = record.display_name(),
        "保存设置记录"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemorySettingsRepository;

    fn api() -> SettingsApi {
        SettingsApi::new(
            Arc::new(MemorySettingsRepository::<Printer>::new()),
            Arc::new(MemorySettingsRepository::<Scale>::new()),
            Arc::new(MemorySettingsRepository::<Purpose>::new()),
            Arc::new(MemorySettingsRepository::<ContainerType>::new()),
        )
    }

    fn printer(name: &str, is_default: bool) -> Printer {
        Printer {
            id: String::new(),
            name: name.to_string(),
            host: "10.0.0.9".to_string(),
            port: 9100,
            label_width_mm: 100,
            label_height_mm: 50,
            is_default,
        }
    }

    #[test]
    fn test_single_default_printer() {
        let api = api();
        let a = api.add_printer(printer("Zebra A", true)).unwrap();
        let b = api.add_printer(printer("Zebra B", true)).unwrap();

        assert_eq!(api.default_printer().unwrap().unwrap().id, b.id);
        let defaults = api
            .list_printers()
            .unwrap()
            .into_iter()
            .filter(|p| p.is_default)
            .count();
        assert_eq!(defaults, 1);

        api.set_default_printer(&a.id).unwrap();
        assert_eq!(api.default_printer().unwrap().unwrap().id, a.id);
    }

    #[test]
    fn test_container_type_code_normalized_and_unique() {
        let api = api();
        let saved = api
            .add_container_type(ContainerType {
                id: String::new(),
                code: " s4 ".to_string(),
                name: "Schütte 4".to_string(),
                slot_count: 4,
            })
            .unwrap();
        assert_eq!(saved.code, "S4");

        let err = api
            .add_container_type(ContainerType {
                id: String::new(),
                code: "S4".to_string(),
                name: "Doppelt".to_string(),
                slot_count: 2,
            })
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
