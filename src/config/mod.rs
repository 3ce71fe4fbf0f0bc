// ==========================================
// 库存预测与补货决策系统 - 配置层
// ==========================================
// 职责: 策略配置值对象与归一化规则
// ==========================================

pub mod strategy_config;

pub use strategy_config::{
    three_way_weights, StrategyConfig, SupplierInfo, SAFETY_STOCK_MONTHS_MAX,
    SAFETY_STOCK_MONTHS_MIN,
};
