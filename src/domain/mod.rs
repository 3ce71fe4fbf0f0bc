// ==========================================
// 库存预测与补货决策系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型与派生视图
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod action_log;
pub mod record;
pub mod types;
pub mod view;

// 重导出核心类型
pub use action_log::{ActionLog, ActionType, PurchaseOrder};
pub use record::{
    month_key_minus_months, month_key_minus_years, month_key_year, parse_month_key,
    InTransitBatch, KpiSnapshot, MonthlyRecord,
};
pub use types::{BenchmarkType, LeadTimeMode, RecordKind, StockoutRisk};
pub use view::{
    DerivedView, InventoryPolicy, MonthlyViewPoint, SimulationDayPoint, YearlyViewPoint,
};
