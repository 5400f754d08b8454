// ==========================================
// 仓储管理后台 - 界面浮层状态
// ==========================================
// 每个界面同一时刻至多一个浮层（对话框/侧栏）
// 打开新浮层即替换旧浮层
// ==========================================

use crate::engine::preview_flow::BulkLocationFlow;

#[derive(Debug, Clone, Default)]
pub enum ActiveOverlay {
    #[default]
    None,

    // ===== 库位界面 =====
    BulkCreateLocations(BulkLocationFlow),
    CreateLocation,
    EditLocation { id: String },
    ConfirmDeleteLocation { id: String },

    // ===== 舒特界面 =====
    CreateContainer,
    ContainerDetail { id: String },
    ConfirmDeleteContainer { id: String },
    MoveContainer { container_id: String },
}

impl ActiveOverlay {
    pub fn is_open(&self) -> bool {
        !matches!(self, ActiveOverlay::None)
    }

    /// 浮层名称（日志用）
    pub fn name(&self) -> &'static str {
        match self {
            ActiveOverlay::None => "none",
            ActiveOverlay::BulkCreateLocations(_) => "bulk_create_locations",
            ActiveOverlay::CreateLocation => "create_location",
            ActiveOverlay::EditLocation { .. } => "edit_location",
            ActiveOverlay::ConfirmDeleteLocation { .. } => "confirm_delete_location",
            ActiveOverlay::CreateContainer => "create_container",
            ActiveOverlay::ContainerDetail { .. } => "container_detail",
            ActiveOverlay::ConfirmDeleteContainer { .. } => "confirm_delete_container",
            ActiveOverlay::MoveContainer { .. } => "move_container",
        }
    }

    /// 打开新浮层, 返回被替换的旧浮层
    pub fn open(&mut self, next: ActiveOverlay) -> ActiveOverlay {
        let previous = std::mem::replace(self, next);
        if previous.is_open() {
            tracing::debug!(from = previous.name(), to = self.name(), "替换浮层");
        }
        previous
    }

    pub fn close(&mut self) -> ActiveOverlay {
        std::mem::take(self)
    }

    pub fn bulk_flow(&self) -> Option<&BulkLocationFlow> {
        match self {
            ActiveOverlay::BulkCreateLocations(flow) => Some(flow),
            _ => None,
        }
    }

    pub fn bulk_flow_mut(&mut self) -> Option<&mut BulkLocationFlow> {
        match self {
            ActiveOverlay::BulkCreateLocations(flow) => Some(flow),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_replaces_previous_overlay() {
        let mut overlay = ActiveOverlay::default();
        assert!(!overlay.is_open());

        overlay.open(ActiveOverlay::EditLocation { id: "l-1".into() });
        let previous = overlay.open(ActiveOverlay::BulkCreateLocations(BulkLocationFlow::new()));

        assert_eq!(previous.name(), "edit_location");
        assert!(overlay.bulk_flow().is_some());

        overlay.close();
        assert!(overlay.bulk_flow_mut().is_none());
        assert!(!overlay.is_open());
    }
}
