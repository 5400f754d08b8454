// ==========================================
// 仓储管理后台 - 批量库位 预览/提交 流程
// ==========================================
// 状态机: Idle → Previewed → (Cancelled | Committed)
// - Idle: 预览为空, 提交不可用
// - Idle/Previewed → Previewed: "生成预览", 必须通过字段校验
// - Previewed 下修改表单: 预览作废, 回到 Idle
// - Previewed → Committed: 用预览时的参数重新展开 + 提交模式编号
// - Idle/Previewed → Cancelled: 丢弃全部生成结果
// 终态关闭对话框, 不支持编辑单行预览
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::domain::location::WarehouseLocation;
use crate::engine::location_number::{assign, AssignMode, LocationNumberGenerator};
use crate::engine::range_expander::{expand, BulkLocationParams};
use crate::engine::validation::{require_positive, require_text, FieldErrors};

/// 单次批量生成的记录上限
pub const MAX_BULK_LOCATIONS: i64 = 5_000;

// ==========================================
// 表单
// ==========================================

/// 批量生成表单（原始输入, 数值为空时为 None）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkLocationForm {
    pub location: String,
    pub for_sale: bool,
    pub special_storage: bool,
    pub shelf_start: Option<i64>,
    pub shelf_count: Option<i64>,
    pub compartment_start: Option<i64>,
    pub compartment_count: Option<i64>,
    pub floor_start: Option<i64>,
    pub floor_count: Option<i64>,
}

impl BulkLocationForm {
    /// 校验七个必填字段（名称 + 3×(起始, 数量)）
    pub fn validate(&self) -> Result<BulkLocationParams, FieldErrors> {
        let mut errors = FieldErrors::new();

        let location = require_text(&mut errors, "location", &self.location);
        let shelf_start = require_positive(&mut errors, "shelfStart", self.shelf_start);
        let shelf_count = require_positive(&mut errors, "shelfCount", self.shelf_count);
        let compartment_start =
            require_positive(&mut errors, "compartmentStart", self.compartment_start);
        let compartment_count =
            require_positive(&mut errors, "compartmentCount", self.compartment_count);
        let floor_start = require_positive(&mut errors, "floorStart", self.floor_start);
        let floor_count = require_positive(&mut errors, "floorCount", self.floor_count);

        match (
            location,
            shelf_start,
            shelf_count,
            compartment_start,
            compartment_count,
            floor_start,
            floor_count,
        ) {
            (Some(location), Some(ss), Some(sc), Some(cs), Some(cc), Some(fs), Some(fc)) => {
                for (field, start, count) in [
                    ("shelfStart", ss, sc),
                    ("compartmentStart", cs, cc),
                    ("floorStart", fs, fc),
                ] {
                    if start.checked_add(count - 1).is_none() {
                        errors.add(field, "Startwert zu groß");
                    }
                }

                let total = sc.checked_mul(cc).and_then(|v| v.checked_mul(fc));
                match total {
                    Some(t) if t <= MAX_BULK_LOCATIONS => {}
                    _ => errors.add(
                        "total",
                        format!("Höchstens {} Lagerorte pro Vorgang", MAX_BULK_LOCATIONS),
                    ),
                }

                errors.into_result(BulkLocationParams {
                    location,
                    for_sale: self.for_sale,
                    special_storage: self.special_storage,
                    shelf_start: ss,
                    shelf_count: sc,
                    compartment_start: cs,
                    compartment_count: cc,
                    floor_start: fs,
                    floor_count: fc,
                })
            }
            _ => Err(errors),
        }
    }
}

// ==========================================
// 状态与错误
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowState {
    Idle,
    Previewed,
    Cancelled,
    Committed,
}

impl FlowState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FlowState::Cancelled | FlowState::Committed)
    }
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FlowState::Idle => "IDLE",
            FlowState::Previewed => "PREVIEWED",
            FlowState::Cancelled => "CANCELLED",
            FlowState::Committed => "COMMITTED",
        };
        write!(f, "{}", s)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    #[error("无效的流程操作: state={from}, action={action}")]
    InvalidTransition { from: FlowState, action: &'static str },

    #[error("表单校验失败: {0}")]
    Validation(FieldErrors),
}

// ==========================================
// BulkLocationFlow - 流程状态机
// ==========================================
#[derive(Debug, Clone)]
pub struct BulkLocationFlow {
    state: FlowState,
    form: BulkLocationForm,
    params: Option<BulkLocationParams>,
    preview: Vec<WarehouseLocation>,
    errors: FieldErrors,
}

impl Default for BulkLocationFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl BulkLocationFlow {
    pub fn new() -> Self {
        Self {
            state: FlowState::Idle,
            form: BulkLocationForm::default(),
            params: None,
            preview: Vec::new(),
            errors: FieldErrors::new(),
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn form(&self) -> &BulkLocationForm {
        &self.form
    }

    pub fn preview(&self) -> &[WarehouseLocation] {
        &self.preview
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// 提交按钮是否可用
    pub fn can_commit(&self) -> bool {
        self.state == FlowState::Previewed && !self.preview.is_empty()
    }

    fn ensure_open(&self, action: &'static str) -> Result<(), FlowError> {
        if self.state.is_terminal() {
            return Err(FlowError::InvalidTransition {
                from: self.state,
                action,
            });
        }
        Ok(())
    }

    /// 修改表单; 已有预览时作废并回到 Idle
    pub fn update_form(&mut self, form: BulkLocationForm) -> Result<(), FlowError> {
        self.ensure_open("update_form")?;
        self.form = form;
        if self.state == FlowState::Previewed {
            tracing::debug!("表单已修改, 作废 {} 条预览", self.preview.len());
            self.preview.clear();
            self.params = None;
            self.state = FlowState::Idle;
        }
        self.errors = FieldErrors::new();
        Ok(())
    }

    /// 生成预览（可重复生成）
    pub fn generate_preview(&mut self) -> Result<&[WarehouseLocation], FlowError> {
        self.ensure_open("generate_preview")?;

        match self.form.validate() {
            Ok(params) => {
                let mut records = expand(&params);
                assign(&mut records, AssignMode::Preview);
                tracing::debug!(
                    location = %params.location,
                    count = records.len(),
                    "生成库位预览"
                );
                self.preview = records;
                self.params = Some(params);
                self.errors = FieldErrors::new();
                self.state = FlowState::Previewed;
                Ok(&self.preview)
            }
            Err(errors) => {
                self.preview.clear();
                self.params = None;
                self.errors = errors.clone();
                self.state = FlowState::Idle;
                Err(FlowError::Validation(errors))
            }
        }
    }

    /// 提交: 以预览参数重新展开并分配正式编号
    pub fn commit(
        &mut self,
        generator: &mut dyn LocationNumberGenerator,
    ) -> Result<Vec<WarehouseLocation>, FlowError> {
        let params = match (self.state, self.params.as_ref()) {
            (FlowState::Previewed, Some(params)) => params.clone(),
            _ => {
                return Err(FlowError::InvalidTransition {
                    from: self.state,
                    action: "commit",
                })
            }
        };

        let mut records = expand(&params);
        assign(&mut records, AssignMode::Commit(generator));

        self.preview.clear();
        self.params = None;
        self.state = FlowState::Committed;
        Ok(records)
    }

    /// 取消: 丢弃所有生成结果
    pub fn cancel(&mut self) -> Result<(), FlowError> {
        self.ensure_open("cancel")?;
        self.preview.clear();
        self.params = None;
        self.errors = FieldErrors::new();
        self.form = BulkLocationForm::default();
        self.state = FlowState::Cancelled;
        Ok(())
    }

    /// 重新打开对话框: 全新 Idle 流程
    pub fn reopen(&self) -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::location_number::{SequentialLaNumberGenerator, PREVIEW_LA_NUMBER};
    use std::collections::HashSet;

    fn form_2x2x1(name: &str) -> BulkLocationForm {
        BulkLocationForm {
            location: name.to_string(),
            for_sale: true,
            special_storage: false,
            shelf_start: Some(1),
            shelf_count: Some(2),
            compartment_start: Some(1),
            compartment_count: Some(2),
            floor_start: Some(1),
            floor_count: Some(1),
        }
    }

    #[test]
    fn test_idle_cannot_commit() {
        let mut flow = BulkLocationFlow::new();
        assert_eq!(flow.state(), FlowState::Idle);
        assert!(!flow.can_commit());

        let mut gen = SequentialLaNumberGenerator::seeded("LA-", 5, &[]);
        let err = flow.commit(&mut gen).unwrap_err();
        assert!(matches!(err, FlowError::InvalidTransition { from: FlowState::Idle, .. }));
    }

    #[test]
    fn test_validation_failure_stays_idle_with_field_errors() {
        let mut flow = BulkLocationFlow::new();
        let mut form = form_2x2x1("  ");
        form.floor_count = Some(0);
        form.compartment_start = None;
        flow.update_form(form).unwrap();

        let err = flow.generate_preview().unwrap_err();
        match err {
            FlowError::Validation(errors) => {
                assert!(errors.contains("location"));
                assert!(errors.contains("floorCount"));
                assert!(errors.contains("compartmentStart"));
                assert_eq!(errors.len(), 3);
            }
            other => panic!("Expected Validation, got {:?}", other),
        }
        assert_eq!(flow.state(), FlowState::Idle);
        assert!(flow.preview().is_empty());
        assert!(flow.errors().contains("location"));
    }

    #[test]
    fn test_preview_yields_expected_triples() {
        let mut flow = BulkLocationFlow::new();
        flow.update_form(form_2x2x1("Hauptlager 1")).unwrap();
        let preview = flow.generate_preview().unwrap();

        let triples: Vec<(i64, i64, i64)> = preview.iter().map(|l| l.coordinates()).collect();
        assert_eq!(triples, vec![(1, 1, 1), (1, 2, 1), (2, 1, 1), (2, 2, 1)]);
        assert!(preview.iter().all(|l| l.la_number == PREVIEW_LA_NUMBER));
        assert_eq!(flow.state(), FlowState::Previewed);
        assert!(flow.can_commit());
    }

    #[test]
    fn test_commit_assigns_distinct_real_numbers() {
        let mut flow = BulkLocationFlow::new();
        flow.update_form(form_2x2x1("Hauptlager 1")).unwrap();
        flow.generate_preview().unwrap();

        let mut gen = SequentialLaNumberGenerator::seeded("LA-", 5, &[]);
        let committed = flow.commit(&mut gen).unwrap();

        assert_eq!(committed.len(), 4);
        assert!(committed.iter().all(|l| l.location == "Hauptlager 1"));
        let numbers: HashSet<&str> = committed.iter().map(|l| l.la_number.as_str()).collect();
        assert_eq!(numbers.len(), 4);
        assert!(!numbers.contains(PREVIEW_LA_NUMBER));
        assert_eq!(flow.state(), FlowState::Committed);
        assert!(flow.preview().is_empty());
    }

    #[test]
    fn test_editing_form_after_preview_invalidates_it() {
        let mut flow = BulkLocationFlow::new();
        flow.update_form(form_2x2x1("A")).unwrap();
        flow.generate_preview().unwrap();

        flow.update_form(form_2x2x1("B")).unwrap();
        assert_eq!(flow.state(), FlowState::Idle);
        assert!(!flow.can_commit());
    }

    #[test]
    fn test_cancel_discards_and_reopen_is_empty() {
        let mut flow = BulkLocationFlow::new();
        flow.update_form(form_2x2x1("A")).unwrap();
        assert_eq!(flow.generate_preview().unwrap().len(), 4);

        flow.cancel().unwrap();
        assert_eq!(flow.state(), FlowState::Cancelled);
        assert!(flow.preview().is_empty());
        assert!(flow.generate_preview().is_err());

        let reopened = flow.reopen();
        assert_eq!(reopened.state(), FlowState::Idle);
        assert!(reopened.preview().is_empty());
        assert_eq!(reopened.form(), &BulkLocationForm::default());
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let mut form = form_2x2x1("A");
        form.shelf_count = Some(100);
        form.compartment_count = Some(100);
        form.floor_count = Some(100);
        let errors = form.validate().unwrap_err();
        assert!(errors.contains("total"));
    }

    #[test]
    fn test_start_near_i64_max_rejected() {
        let mut form = form_2x2x1("A");
        form.shelf_start = Some(i64::MAX);
        form.shelf_count = Some(1);
        form.compartment_count = Some(1);
        form.floor_start = Some(i64::MAX - 1);
        form.floor_count = Some(3);

        let mut flow = BulkLocationFlow::new();
        flow.update_form(form).unwrap();
        assert!(flow.generate_preview().is_err());
        assert_eq!(flow.state(), FlowState::Idle);
        assert!(flow.preview().is_empty());
        assert_eq!(flow.errors().get("shelfStart"), None);
        assert_eq!(flow.errors().get("floorStart"), Some("Startwert zu groß"));

        // 最后一个坐标恰好为 i64::MAX 时合法
        let mut form = form_2x2x1("A");
        form.shelf_start = Some(i64::MAX - 1);
        flow.update_form(form).unwrap();
        let preview = flow.generate_preview().unwrap();
        assert_eq!(preview.len(), 4);
        assert_eq!(preview[3].shelf, i64::MAX);
    }
}
