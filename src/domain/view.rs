// ==========================================
// 库存预测与补货决策系统 - 派生视图模型
// ==========================================
// 职责: 引擎输出的只读视图对象
// 红线: 全部为瞬态计算结果,不落库
// ==========================================

use crate::domain::types::StockoutRisk;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// MonthlyViewPoint - 合成月度序列点
// ==========================================
// 实际 + 调整后预测 + 当月模拟库存均值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyViewPoint {
    pub month: String, // YYYY-MM

    // ===== 实际值 =====
    pub actual_qty: f64,
    pub actual_amount: f64,
    pub actual_customers: f64,

    // ===== 展示预测(恒 ≥ 实际数量) =====
    pub forecast_qty: f64,
    pub forecast_amount: f64,
    pub forecast_customers: f64,

    // ===== 库存参考线 =====
    pub stock_level: f64, // 当月模拟库存均值
    pub rop_ref: f64,
    pub safety_ref: f64,
}

// ==========================================
// YearlyViewPoint - 年度汇总序列点
// ==========================================
// 数量/金额/客户数按年求和; 模拟库存取均值;
// ROP/安全库存在年粒度无意义,置 0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearlyViewPoint {
    pub year: i32,
    pub actual_qty: f64,
    pub actual_amount: f64,
    pub actual_customers: f64,
    pub forecast_qty: f64,
    pub forecast_amount: f64,
    pub forecast_customers: f64,
    pub stock_level: f64,
    pub rop_ref: f64,
    pub safety_ref: f64,
}

// ==========================================
// SimulationDayPoint - 逐日模拟点
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationDayPoint {
    pub date: NaiveDate,
    pub stock_level: i64, // 展示值: max(0, round(内部库存))
    pub rop_ref: f64,
    pub safety_ref: f64,
    pub restock_event: bool,
    pub inbound_qty: f64,
}

// ==========================================
// InventoryPolicy - 补货策略计算结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryPolicy {
    /// 安全库存 = round(近30天销量 × 安全库存月数)
    pub safety_stock_qty: f64,
    /// 再订货点 = 安全库存 + 日均消耗×交期 − 在途量(允许为负)
    pub rop: f64,
    /// 周转天数; 日均消耗为 0 时无定义
    pub turnover_days: Option<f64>,
    pub risk: StockoutRisk,
    /// 距建议补货日的天数; 日均消耗为 0 且无缺口时无定义
    pub days_left: Option<f64>,
    pub restock_immediately: bool,
    pub suggested_restock_date: Option<NaiveDate>,
    /// 建议补货量 = EOQ(固定批量)
    pub suggested_restock_qty: i64,
}

// ==========================================
// DerivedView - 产品详情派生视图
// ==========================================
// 引擎总输出: f(历史序列, 策略配置, 在途批次, KPI, 今日) → DerivedView
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivedView {
    pub monthly: Vec<MonthlyViewPoint>,
    pub yearly: Vec<YearlyViewPoint>,
    pub policy: InventoryPolicy,
    pub simulation: Vec<SimulationDayPoint>,
}
