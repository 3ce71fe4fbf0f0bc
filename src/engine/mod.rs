// ==========================================
// 库存预测与补货决策系统 - 引擎层
// ==========================================
// 职责: 预测/调整/策略/模拟/汇总的纯计算规则
// 红线: 引擎不做 I/O,不因数据质量抛错,可任意次重入
// ==========================================

pub mod adjustment;
pub mod aggregator;
pub mod forecast;
pub mod orchestrator;
pub mod policy;
pub mod simulator;

// 重导出核心引擎
pub use adjustment::{AdjustedForecast, AdjustmentLayer, SeriesRatios};
pub use aggregator::YearlyAggregator;
pub use forecast::ForecastEngine;
pub use orchestrator::ForecastOrchestrator;
pub use policy::PolicyCalculator;
pub use simulator::{
    ReplenishmentSimulator, SimulationInput, SimulatorError, SIMULATION_HORIZON_DAYS,
};
