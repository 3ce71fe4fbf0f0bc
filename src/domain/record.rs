// ==========================================
// 库存预测与补货决策系统 - 销售记录领域模型
// ==========================================
// 职责: 历史/未来月度记录、在途批次、KPI 快照
// 红线: 引擎只读,不回写任何记录
// ==========================================

use crate::domain::types::RecordKind;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// MonthlyRecord - 月度销售记录
// ==========================================
// 月份键格式: YYYY-MM
// base_forecast_* 为后端基线预测,引擎可覆盖但不修改
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyRecord {
    pub month: String, // YYYY-MM
    pub kind: RecordKind,

    // ===== 实际值 =====
    pub actual_qty: f64,
    pub actual_amount: f64,
    pub actual_customers: f64,

    // ===== 后端基线预测 =====
    pub base_forecast_qty: f64,
    pub base_forecast_amount: f64,
    pub base_forecast_customers: f64,
}

impl MonthlyRecord {
    /// 该月自身的单价(金额/数量); 数量为 0 时无定义
    pub fn unit_price(&self) -> Option<f64> {
        if self.actual_qty > 0.0 {
            Some(self.actual_amount / self.actual_qty)
        } else {
            None
        }
    }

    /// 该月自身的客户比(客户数/数量); 数量为 0 时无定义
    pub fn customer_ratio(&self) -> Option<f64> {
        if self.actual_qty > 0.0 {
            Some(self.actual_customers / self.actual_qty)
        } else {
            None
        }
    }
}

// ==========================================
// InTransitBatch - 在途采购批次
// ==========================================
// 来源: 采购系统,引擎只读
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InTransitBatch {
    pub batch_id: String,
    pub arrival_date: NaiveDate,
    pub qty: f64,
    pub overdue: bool,
    pub overdue_days: i32,
}

// ==========================================
// KpiSnapshot - 库存 KPI 快照
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiSnapshot {
    pub in_stock_qty: f64,
    pub in_transit_qty: f64,
    pub sales_30d: f64,
}

impl KpiSnapshot {
    /// 日均消耗 = 近 30 天销量 / 30
    pub fn daily_sales_rate(&self) -> f64 {
        self.sales_30d / 30.0
    }
}

// ==========================================
// 月份键工具函数
// ==========================================

/// 解析 YYYY-MM 月份键; 非法格式返回 None
pub fn parse_month_key(key: &str) -> Option<(i32, u32)> {
    let (y, m) = key.split_once('-')?;
    let year: i32 = y.parse().ok()?;
    let month: u32 = m.parse().ok()?;
    if (1..=12).contains(&month) {
        Some((year, month))
    } else {
        None
    }
}

/// 月份键回退 n 个月
pub fn month_key_minus_months(key: &str, n: u32) -> Option<String> {
    let (year, month) = parse_month_key(key)?;
    let total = year as i64 * 12 + (month as i64 - 1) - n as i64;
    let y = total.div_euclid(12);
    let m = total.rem_euclid(12) + 1;
    Some(format!("{:04}-{:02}", y, m))
}

/// 月份键回退 n 年(同月)
pub fn month_key_minus_years(key: &str, n: u32) -> Option<String> {
    let (year, month) = parse_month_key(key)?;
    Some(format!("{:04}-{:02}", year - n as i32, month))
}

/// 月份键所属年份(非法键返回 None)
pub fn month_key_year(key: &str) -> Option<i32> {
    parse_month_key(key).map(|(y, _)| y)
}
