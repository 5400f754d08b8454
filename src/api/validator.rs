// ==========================================
// 仓储管理后台 - 输入校验器
// ==========================================
// 职责: 设置记录/表单的字段级校验
// 输出: ApiError::Validation(FieldErrors)，键为前端字段名
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::container::MAX_SLOTS;
use crate::domain::settings::{ContainerType, Printer, Purpose, Scale};

pub use crate::engine::validation::{require_positive, require_text, FieldErrors};

/// FieldErrors → ApiResult
pub fn finish(errors: FieldErrors) -> ApiResult<()> {
    errors.into_result(()).map_err(ApiError::Validation)
}

fn require_port(errors: &mut FieldErrors, port: u16) {
    if port == 0 {
        errors.add("port", "Muss eine positive Zahl sein");
    }
}

pub fn validate_printer(printer: &Printer) -> ApiResult<()> {
    let mut errors = FieldErrors::new();
    require_text(&mut errors, "name", &printer.name);
    require_text(&mut errors, "host", &printer.host);
    require_port(&mut errors, printer.port);
    if printer.label_width_mm == 0 {
        errors.add("labelWidthMm", "Muss eine positive Zahl sein");
    }
    if printer.label_height_mm == 0 {
        errors.add("labelHeightMm", "Muss eine positive Zahl sein");
    }
    finish(errors)
}

pub fn validate_scale(scale: &Scale) -> ApiResult<()> {
    let mut errors = FieldErrors::new();
    require_text(&mut errors, "name", &scale.name);
    require_text(&mut errors, "host", &scale.host);
    require_port(&mut errors, scale.port);
    require_text(&mut errors, "unit", &scale.unit);
    finish(errors)
}

pub fn validate_purpose(purpose: &Purpose, existing: &[Purpose]) -> ApiResult<()> {
    let mut errors = FieldErrors::new();
    if let Some(name) = require_text(&mut errors, "name", &purpose.name) {
        let duplicate = existing
            .iter()
            .any(|p| p.id != purpose.id && p.name.trim().eq_ignore_ascii_case(&name));
        if duplicate {
            errors.add("name", "Name bereits vergeben");
        }
    }
    finish(errors)
}

/// 舒特类型: 代码唯一（忽略大小写）, 格数 ≥ 1
pub fn validate_container_type(
    container_type: &ContainerType,
    existing: &[ContainerType],
) -> ApiResult<()> {
    let mut errors = FieldErrors::new();
    require_text(&mut errors, "name", &container_type.name);
    if let Some(code) = require_text(&mut errors, "code", &container_type.code) {
        let duplicate = existing
            .iter()
            .any(|t| t.id != container_type.id && t.code.trim().eq_ignore_ascii_case(&code));
        if duplicate {
            errors.add("code", "Code bereits vergeben");
        }
    }
    if container_type.slot_count == 0 {
        errors.add("slotCount", "Muss eine positive Zahl sein");
    } else if container_type.slot_count > MAX_SLOTS {
        errors.add("slotCount", format!("Höchstens {} Fächer", MAX_SLOTS));
    }
    finish(errors)
}
