// ==========================================
// 库存预测与补货决策系统 - 补货模拟引擎
// ==========================================
// 职责: 固定视野逐日库存消耗/到货/自动补货模拟
// 输入: 初始在库 + 日均消耗 + ROP/安全库存参考 + EOQ + 在途批次
// 输出: SimulationDayPoint 序列(锯齿库存图 + 补货标记)
// ==========================================
// 既定简化(产品确认前不得"修正"):
// - 触发补货即时到货,不再单独模拟触发单的配送延迟(交期已折入 ROP)
// - ROP/安全库存参考线在模拟起点一次算定,整个视野内保持不变,
//   即便批次到货使在途量(进而 ROP)发生变化
// ==========================================

use crate::domain::record::InTransitBatch;
use crate::domain::view::SimulationDayPoint;
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use thiserror::Error;
use tracing::instrument;

/// 默认模拟视野(天)
pub const SIMULATION_HORIZON_DAYS: u32 = 365;

/// 模拟引擎契约错误(仅限编程错误,数据质量问题不在此列)
#[derive(Error, Debug)]
pub enum SimulatorError {
    #[error("无效的模拟视野: horizon_days={0}, 必须 ≥ 1")]
    InvalidHorizon(u32),
}

// ==========================================
// SimulationInput - 模拟起点状态
// ==========================================
#[derive(Debug, Clone)]
pub struct SimulationInput {
    pub in_stock_qty: f64,
    pub daily_sales_rate: f64,
    /// 起点一次算定的再订货点参考线
    pub rop_ref: f64,
    /// 起点一次算定的安全库存参考线
    pub safety_ref: f64,
    pub eoq: i64,
}

// ==========================================
// ReplenishmentSimulator - 补货模拟引擎
// ==========================================
// 确定性逐日状态机,内部库存不钳零,展示值钳零取整
pub struct ReplenishmentSimulator;

impl ReplenishmentSimulator {
    pub fn new() -> Self {
        Self
    }

    /// 以默认 365 天视野模拟
    pub fn simulate(
        &self,
        input: &SimulationInput,
        batches: &[InTransitBatch],
        start: NaiveDate,
    ) -> Result<Vec<SimulationDayPoint>, SimulatorError> {
        self.simulate_horizon(input, batches, start, SIMULATION_HORIZON_DAYS)
    }

    /// 指定视野模拟
    ///
    /// 每日顺序:
    /// 1) 当日到货批次入库
    /// 2) 扣减恒定日均消耗(不建模季节/波动)
    /// 3) 有消耗且库存 ≤ ROP → 补入 EOQ 并标记补货事件
    /// 4) 输出展示点: max(0, round(库存))
    #[instrument(skip(self, input, batches), fields(horizon = horizon_days, batches = batches.len()))]
    pub fn simulate_horizon(
        &self,
        input: &SimulationInput,
        batches: &[InTransitBatch],
        start: NaiveDate,
        horizon_days: u32,
    ) -> Result<Vec<SimulationDayPoint>, SimulatorError> {
        if horizon_days == 0 {
            return Err(SimulatorError::InvalidHorizon(horizon_days));
        }

        // 到货日 → 当日入库总量
        let mut arrivals: HashMap<NaiveDate, f64> = HashMap::new();
        for batch in batches {
            *arrivals.entry(batch.arrival_date).or_insert(0.0) += batch.qty;
        }

        let mut stock = input.in_stock_qty;
        let mut points = Vec::with_capacity(horizon_days as usize);

        for day in 1..=horizon_days as i64 {
            let date = start + Duration::days(day);

            let inbound_qty = arrivals.get(&date).copied().unwrap_or(0.0);
            stock += inbound_qty;

            stock -= input.daily_sales_rate;

            // 无消耗时不触发自动补货(平稳库存只受到货影响)
            let restock_event = input.daily_sales_rate > 0.0 && stock <= input.rop_ref;
            if restock_event {
                stock += input.eoq as f64;
            }

            points.push(SimulationDayPoint {
                date,
                stock_level: stock.round().max(0.0) as i64,
                rop_ref: input.rop_ref,
                safety_ref: input.safety_ref,
                restock_event,
                inbound_qty,
            });
        }

        Ok(points)
    }
}

impl Default for ReplenishmentSimulator {
    fn default() -> Self {
        Self::new()
    }
}
