// ==========================================
// 库存预测与补货决策系统 - 补货策略计算引擎
// ==========================================
// 职责: 由 KPI 与策略配置推导安全库存/ROP/周转/风险/建议补货
// 输入: KpiSnapshot + StrategyConfig + 今日日期
// 输出: InventoryPolicy
// 红线: 日均消耗为 0 时所有比值降级,不做除零
// ==========================================

use crate::config::strategy_config::StrategyConfig;
use crate::domain::record::KpiSnapshot;
use crate::domain::types::StockoutRisk;
use crate::domain::view::InventoryPolicy;
use chrono::{Duration, NaiveDate};
use tracing::instrument;

// ==========================================
// PolicyCalculator - 补货策略计算引擎
// ==========================================
pub struct PolicyCalculator;

impl PolicyCalculator {
    pub fn new() -> Self {
        Self
    }

    /// 计算补货策略指标
    ///
    /// 公式:
    /// - 安全库存 = round(近30天销量 × 安全库存月数)
    /// - ROP = 安全库存 + 日均消耗×交期 − 在途量(不钳到 0,允许为负)
    /// - 周转天数 = 在库 / 日均消耗(消耗为 0 → 无定义哨兵)
    /// - 剩余天数 = (在库 + 在途 − (安全库存 + 日均消耗×交期)) / 日均消耗
    /// - 建议补货量 = EOQ(固定批量)
    #[instrument(skip(self, kpi, config))]
    pub fn evaluate(
        &self,
        kpi: &KpiSnapshot,
        config: &StrategyConfig,
        today: NaiveDate,
    ) -> InventoryPolicy {
        let cfg = config.normalized();
        let daily_rate = kpi.daily_sales_rate();
        let lead_days = cfg.lead_time_mode.days() as f64;

        let safety_stock_qty = (kpi.sales_30d * cfg.safety_stock_months).round();
        let rop = safety_stock_qty + daily_rate * lead_days - kpi.in_transit_qty;

        let turnover_days = if daily_rate > 0.0 {
            Some(kpi.in_stock_qty / daily_rate)
        } else {
            None
        };

        // 等级制风险分类: 周转 < 交期 → High; < 2×交期 → Medium; 其余 Low
        let risk = match turnover_days {
            Some(t) if t < lead_days => StockoutRisk::High,
            Some(t) if t < 2.0 * lead_days => StockoutRisk::Medium,
            _ => StockoutRisk::Low,
        };

        // 需求基准点: 交期内消耗 + 安全库存
        let demand_point = safety_stock_qty + daily_rate * lead_days;
        let surplus = kpi.in_stock_qty + kpi.in_transit_qty - demand_point;

        let (days_left, restock_immediately, suggested_restock_date) = if daily_rate > 0.0 {
            let days = surplus / daily_rate;
            if days <= 0.0 {
                (Some(days), true, None)
            } else {
                let date = today + Duration::days(days.ceil() as i64);
                (Some(days), false, Some(date))
            }
        } else {
            // 无消耗: 剩余天数无定义; 仅当存量已低于安全库存缺口时提示立即补货
            (None, surplus < 0.0, None)
        };

        InventoryPolicy {
            safety_stock_qty,
            rop,
            turnover_days,
            risk,
            days_left,
            restock_immediately,
            suggested_restock_date,
            suggested_restock_qty: cfg.eoq,
        }
    }
}

impl Default for PolicyCalculator {
    fn default() -> Self {
        Self::new()
    }
}
