// ==========================================
// 库存预测与补货决策系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 决策支持系统 (人工最终控制权)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 策略配置
pub mod config;

// 引擎层 - 预测/调整/策略/模拟/汇总
pub mod engine;

// 数据仓储层 - 数据访问
pub mod repository;

// 导出层 - 报表
pub mod exporter;

// API 层 - 业务接口
pub mod api;

// 数据库基础设施(连接初始化/PRAGMA/建表统一)
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    BenchmarkType, DerivedView, InTransitBatch, InventoryPolicy, KpiSnapshot, LeadTimeMode,
    MonthlyRecord, MonthlyViewPoint, RecordKind, SimulationDayPoint, StockoutRisk,
    YearlyViewPoint,
};

// 配置
pub use config::{StrategyConfig, SupplierInfo};

// 引擎
pub use engine::{
    AdjustmentLayer, ForecastEngine, ForecastOrchestrator, PolicyCalculator,
    ReplenishmentSimulator, YearlyAggregator,
};

// API
pub use api::{ApiError, ApiResult, ForecastApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "库存预测与补货决策系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
