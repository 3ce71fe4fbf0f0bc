// ==========================================
// 库存预测与补货决策系统 - 操作日志仓储
// ==========================================
// 职责: 审计日志追加与查询(append-only)
// ==========================================

use crate::domain::action_log::{ActionLog, ActionType};
use crate::repository::error::{RepoResult, RepositoryError};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// ActionLogRepository - 操作日志仓储
// ==========================================
pub struct ActionLogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ActionLogRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 追加一条审计日志
    pub fn append(&self, log: &ActionLog) -> RepoResult<()> {
        let payload = log
            .payload_json
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO action_log (action_id, sku, action_type, action_ts, actor, payload_json, detail)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                log.action_id,
                log.sku,
                log.action_type.as_str(),
                log.action_ts,
                log.actor,
                payload,
                log.detail,
            ],
        )?;
        Ok(())
    }

    /// 按时间倒序列出 SKU 的审计日志
    pub fn list_by_sku(&self, sku: &str) -> RepoResult<Vec<ActionLog>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT action_id, sku, action_type, action_ts, actor, payload_json, detail
             FROM action_log WHERE sku = ?1 ORDER BY action_ts DESC, action_id DESC",
        )?;
        let rows = stmt.query_map(params![sku], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, chrono::NaiveDateTime>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, Option<String>>(5)?,
                row.get::<_, Option<String>>(6)?,
            ))
        })?;

        let mut logs = Vec::new();
        for row in rows {
            let (action_id, sku, type_str, action_ts, actor, payload, detail) = row?;
            let action_type = ActionType::parse(&type_str).ok_or_else(|| {
                RepositoryError::ValidationError(format!("未知操作类型: {}", type_str))
            })?;
            let payload_json = payload.as_deref().map(serde_json::from_str).transpose()?;
            logs.push(ActionLog {
                action_id,
                sku,
                action_type,
                action_ts,
                actor,
                payload_json,
                detail,
            });
        }
        Ok(logs)
    }
}
