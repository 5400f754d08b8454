// ==========================================
// 仓储管理后台 - 引擎层
// ==========================================
// 职责: 纯逻辑（展开、编号、过滤、分页、排序、流程状态机）
// 红线: 不做 I/O, 不读时钟, 不持有共享状态
// ==========================================

pub mod casting_session;
pub mod filter;
pub mod filters;
pub mod location_number;
pub mod paginator;
pub mod preview_flow;
pub mod range_expander;
pub mod sorter;
pub mod validation;

// 重导出核心引擎
pub use casting_session::{
    CastingError, CastingSession, CastingSnapshot, CastingState, CastingSummary,
};
pub use filter::{Criterion, FilterPipeline};
pub use filters::{ActivityFilter, ContainerFilter, LocationFilter, ProductFilter};
pub use location_number::{
    assign, AssignMode, LocationNumberGenerator, SequentialLaNumberGenerator, PREVIEW_LA_NUMBER,
};
pub use paginator::{PageWindow, Paginator, DEFAULT_PAGE_SIZES};
pub use preview_flow::{BulkLocationFlow, BulkLocationForm, FlowError, FlowState};
pub use range_expander::{expand, BulkLocationParams};
pub use sorter::{ContainerSort, ContainerSortField, LocationSort, LocationSortField};
pub use validation::FieldErrors;
