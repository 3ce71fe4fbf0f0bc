// ==========================================
// 库存预测与补货决策系统 - 预测业务接口
// ==========================================
// 职责: 产品详情视图 / 策略保存 / 采购下单 / 报表导出
// 红线: 引擎无状态,每次调用全量重算; 保存整体替换并审计
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::strategy_config::StrategyConfig;
use crate::domain::action_log::{ActionLog, ActionType, PurchaseOrder};
use crate::domain::view::DerivedView;
use crate::engine::orchestrator::ForecastOrchestrator;
use crate::exporter::report_exporter::ReportExporter;
use crate::repository::{
    ActionLogRepository, PurchaseOrderRepository, SalesRepository, StrategyRepository,
};
use chrono::{NaiveDate, Utc};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::instrument;
use uuid::Uuid;

// ==========================================
// ForecastApi - 预测业务接口
// ==========================================
pub struct ForecastApi {
    sales_repo: SalesRepository,
    strategy_repo: StrategyRepository,
    order_repo: PurchaseOrderRepository,
    log_repo: ActionLogRepository,
    orchestrator: ForecastOrchestrator,
    exporter: ReportExporter,
}

impl ForecastApi {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            sales_repo: SalesRepository::new(conn.clone()),
            strategy_repo: StrategyRepository::new(conn.clone()),
            order_repo: PurchaseOrderRepository::new(conn.clone()),
            log_repo: ActionLogRepository::new(conn),
            orchestrator: ForecastOrchestrator::new(),
            exporter: ReportExporter::new(),
        }
    }

    /// SKU 的生效策略配置(未保存过时为默认配置)
    pub fn get_strategy_config(&self, sku: &str) -> ApiResult<StrategyConfig> {
        Ok(self.strategy_repo.load(sku)?.unwrap_or_default())
    }

    /// 产品详情派生视图: 历史序列 + 策略配置 + 在途批次 + KPI → 全量重算
    #[instrument(skip(self))]
    pub fn get_product_view(&self, sku: &str, today: NaiveDate) -> ApiResult<DerivedView> {
        let series = self.sales_repo.list_series(sku)?;
        let config = self.get_strategy_config(sku)?;
        let batches = self.sales_repo.list_in_transit(sku)?;
        let kpi = self.sales_repo.get_kpi(sku)?;
        Ok(self
            .orchestrator
            .derive_view(&series, &config, &batches, &kpi, today)?)
    }

    /// "计算"操作: 为全部未来月份计算基线预测并写入 config.calculated
    ///
    /// 结果整体替换保存(含审计),返回保存后的权威配置
    #[instrument(skip(self))]
    pub fn calculate_forecasts(&self, sku: &str, actor: &str) -> ApiResult<StrategyConfig> {
        let series = self.sales_repo.list_series(sku)?;
        let mut config = self.get_strategy_config(sku)?;
        config.calculated = self.orchestrator.calculate_baselines(&series, &config);
        Ok(self
            .strategy_repo
            .save(sku, &config, actor, Some("重新计算基线预测"))?)
    }

    /// 保存策略配置(整体替换 + 审计),返回保存后的权威配置
    #[instrument(skip(self, config))]
    pub fn save_strategy_config(
        &self,
        sku: &str,
        config: &StrategyConfig,
        actor: &str,
        description: Option<&str>,
    ) -> ApiResult<StrategyConfig> {
        Ok(self.strategy_repo.save(sku, config, actor, description)?)
    }

    /// 按建议补货量(EOQ)与供应商快照创建采购单
    ///
    /// 人工在查看建议补货日期/数量后触发,不自动下单
    #[instrument(skip(self))]
    pub fn create_purchase_order(&self, sku: &str, actor: &str) -> ApiResult<PurchaseOrder> {
        let config = self.get_strategy_config(sku)?;
        if config.supplier.code.is_empty() {
            return Err(ApiError::InvalidInput(format!(
                "SKU {} 未配置供应商,无法创建采购单",
                sku
            )));
        }
        Ok(self
            .order_repo
            .create(sku, config.eoq, &config.supplier, actor)?)
    }

    /// 按时间倒序列出 SKU 的审计日志
    pub fn list_action_logs(&self, sku: &str) -> ApiResult<Vec<ActionLog>> {
        Ok(self.log_repo.list_by_sku(sku)?)
    }

    /// 导出两表报表并留审计痕迹,返回 (month 表, day 表) 路径
    #[instrument(skip(self))]
    pub fn export_report(
        &self,
        sku: &str,
        today: NaiveDate,
        dir: &Path,
        actor: &str,
    ) -> ApiResult<(PathBuf, PathBuf)> {
        let view = self.get_product_view(sku, today)?;
        let paths = self
            .exporter
            .export(sku, &view.monthly, dir)
            .map_err(|e| ApiError::ExportError(e.to_string()))?;

        self.log_repo.append(&ActionLog {
            action_id: Uuid::new_v4().to_string(),
            sku: sku.to_string(),
            action_type: ActionType::ExportReport,
            action_ts: Utc::now().naive_utc(),
            actor: actor.to_string(),
            payload_json: Some(serde_json::json!({
                "month_sheet": paths.0.display().to_string(),
                "day_sheet": paths.1.display().to_string(),
            })),
            detail: None,
        })?;

        Ok(paths)
    }
}
