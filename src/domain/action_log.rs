// ==========================================
// 库存预测与补货决策系统 - 操作日志领域模型
// ==========================================
// 红线: 策略保存/采购下单等写入必须记录
// 用途: 审计追踪
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

// ==========================================
// ActionLog - 操作日志
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionLog {
    pub action_id: String, // UUID
    pub sku: String,
    pub action_type: ActionType,
    pub action_ts: NaiveDateTime,
    pub actor: String,

    /// 操作负载(保存的配置、下单参数等, JSON)
    pub payload_json: Option<JsonValue>,

    /// 自由文本变更说明
    pub detail: Option<String>,
}

// ==========================================
// ActionType - 操作类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    SaveStrategy,        // 保存补货策略配置
    CreatePurchaseOrder, // 创建采购单
    ExportReport,        // 导出报表
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::SaveStrategy => "SAVE_STRATEGY",
            ActionType::CreatePurchaseOrder => "CREATE_PURCHASE_ORDER",
            ActionType::ExportReport => "EXPORT_REPORT",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SAVE_STRATEGY" => Some(ActionType::SaveStrategy),
            "CREATE_PURCHASE_ORDER" => Some(ActionType::CreatePurchaseOrder),
            "EXPORT_REPORT" => Some(ActionType::ExportReport),
            _ => None,
        }
    }
}

// ==========================================
// PurchaseOrder - 采购单
// ==========================================
// 人工确认建议补货日期/数量后创建
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub order_id: String, // UUID
    pub sku: String,
    pub qty: i64,
    pub supplier_name: String,
    pub supplier_code: String,
    pub supplier_rating: f64,
    pub supplier_price: f64,
    pub created_ts: NaiveDateTime,
}
