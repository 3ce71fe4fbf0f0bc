// ==========================================
// 库存预测与补货决策系统 - 策略配置仓储
// ==========================================
// 职责: 策略配置整体替换式持久化(JSON)
// 红线: 每次保存同事务追加 action_log; 最后写入生效,无字段级合并
// ==========================================

use crate::config::strategy_config::StrategyConfig;
use crate::domain::action_log::ActionType;
use crate::repository::error::{RepoResult, RepositoryError};
use chrono::Utc;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;
use uuid::Uuid;

// ==========================================
// StrategyRepository - 策略配置仓储
// ==========================================
pub struct StrategyRepository {
    conn: Arc<Mutex<Connection>>,
}

impl StrategyRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 读取 SKU 的策略配置; 未保存过返回 None
    pub fn load(&self, sku: &str) -> RepoResult<Option<StrategyConfig>> {
        let conn = self.lock()?;
        let result = conn.query_row(
            "SELECT config_json FROM strategy_config WHERE sku = ?1",
            params![sku],
            |row| row.get::<_, String>(0),
        );
        match result {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 整体替换保存策略配置,并在同一事务内追加审计日志
    ///
    /// 返回规范化后的持久化对象(作为保存后的权威版本)
    pub fn save(
        &self,
        sku: &str,
        config: &StrategyConfig,
        actor: &str,
        description: Option<&str>,
    ) -> RepoResult<StrategyConfig> {
        let canonical = config.normalized();
        let json = serde_json::to_string(&canonical)?;
        let now = Utc::now().naive_utc();

        let mut conn = self.lock()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tx.execute(
            "INSERT INTO strategy_config (sku, config_json, updated_ts)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(sku) DO UPDATE SET
               config_json = excluded.config_json,
               updated_ts = excluded.updated_ts",
            params![sku, json, now],
        )?;

        tx.execute(
            "INSERT INTO action_log (action_id, sku, action_type, action_ts, actor, payload_json, detail)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                Uuid::new_v4().to_string(),
                sku,
                ActionType::SaveStrategy.as_str(),
                now,
                actor,
                json,
                description,
            ],
        )?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        info!(sku, actor, "策略配置已保存");
        Ok(canonical)
    }
}
