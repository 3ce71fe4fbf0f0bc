// ==========================================
// 库存预测与补货决策系统 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 记录类型 (Record Kind)
// ==========================================
// 月度记录的时间属性: 已发生月份 / 未来月份
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordKind {
    Past,   // 历史月份(已有实际销量)
    Future, // 未来月份(仅预测)
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Past => write!(f, "PAST"),
            RecordKind::Future => write!(f, "FUTURE"),
        }
    }
}

// ==========================================
// 基准类型 (Benchmark Type)
// ==========================================
// 预测基准模型: 环比移动平均 / 同比同月
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkType {
    Mom, // 环比: 最近 R 个月分段加权平均
    Yoy, // 同比: 前 1~3 年同月加权
}

impl fmt::Display for BenchmarkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchmarkType::Mom => write!(f, "mom"),
            BenchmarkType::Yoy => write!(f, "yoy"),
        }
    }
}

// ==========================================
// 交期模式 (Lead Time Mode)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadTimeMode {
    Fast,     // 快速补货: 7 天
    Economic, // 经济补货: 30 天
}

impl LeadTimeMode {
    /// 模式对应的交期天数
    pub fn days(&self) -> i64 {
        match self {
            LeadTimeMode::Fast => 7,
            LeadTimeMode::Economic => 30,
        }
    }
}

impl fmt::Display for LeadTimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeadTimeMode::Fast => write!(f, "fast"),
            LeadTimeMode::Economic => write!(f, "economic"),
        }
    }
}

// ==========================================
// 缺货风险等级 (Stockout Risk)
// ==========================================
// 等级制: 周转天数 < 交期 → High
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockoutRisk {
    Low,    // 库存充裕
    Medium, // 需关注
    High,   // 周转天数低于交期
}

impl fmt::Display for StockoutRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockoutRisk::Low => write!(f, "LOW"),
            StockoutRisk::Medium => write!(f, "MEDIUM"),
            StockoutRisk::High => write!(f, "HIGH"),
        }
    }
}
