// ==========================================
// 库存预测与补货决策系统 - 采购单仓储
// ==========================================
// 职责: 采购单创建与查询
// 红线: 创建采购单同事务追加 action_log
// ==========================================

use crate::config::strategy_config::SupplierInfo;
use crate::domain::action_log::{ActionType, PurchaseOrder};
use crate::repository::error::{RepoResult, RepositoryError};
use chrono::Utc;
use rusqlite::{params, Connection};
use serde_json::json;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;
use uuid::Uuid;

// ==========================================
// PurchaseOrderRepository - 采购单仓储
// ==========================================
pub struct PurchaseOrderRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PurchaseOrderRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 创建采购单并同事务记录审计日志
    pub fn create(
        &self,
        sku: &str,
        qty: i64,
        supplier: &SupplierInfo,
        actor: &str,
    ) -> RepoResult<PurchaseOrder> {
        if qty <= 0 {
            return Err(RepositoryError::ValidationError(format!(
                "采购数量必须为正: qty={}",
                qty
            )));
        }

        let order = PurchaseOrder {
            order_id: Uuid::new_v4().to_string(),
            sku: sku.to_string(),
            qty,
            supplier_name: supplier.name.clone(),
            supplier_code: supplier.code.clone(),
            supplier_rating: supplier.rating,
            supplier_price: supplier.price,
            created_ts: Utc::now().naive_utc(),
        };

        let mut conn = self.lock()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tx.execute(
            "INSERT INTO purchase_order
               (order_id, sku, qty, supplier_name, supplier_code, supplier_rating, supplier_price, created_ts)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                order.order_id,
                order.sku,
                order.qty,
                order.supplier_name,
                order.supplier_code,
                order.supplier_rating,
                order.supplier_price,
                order.created_ts,
            ],
        )?;

        tx.execute(
            "INSERT INTO action_log (action_id, sku, action_type, action_ts, actor, payload_json, detail)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                Uuid::new_v4().to_string(),
                sku,
                ActionType::CreatePurchaseOrder.as_str(),
                order.created_ts,
                actor,
                json!({
                    "order_id": order.order_id,
                    "qty": order.qty,
                    "supplier_code": order.supplier_code,
                })
                .to_string(),
                Option::<String>::None,
            ],
        )?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        info!(sku, order_id = %order.order_id, qty, "采购单已创建");
        Ok(order)
    }

    /// 按创建时间倒序列出 SKU 的采购单
    pub fn list_by_sku(&self, sku: &str) -> RepoResult<Vec<PurchaseOrder>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT order_id, sku, qty, supplier_name, supplier_code, supplier_rating, supplier_price, created_ts
             FROM purchase_order WHERE sku = ?1 ORDER BY created_ts DESC",
        )?;
        let rows = stmt.query_map(params![sku], |row| {
            Ok(PurchaseOrder {
                order_id: row.get(0)?,
                sku: row.get(1)?,
                qty: row.get(2)?,
                supplier_name: row.get(3)?,
                supplier_code: row.get(4)?,
                supplier_rating: row.get(5)?,
                supplier_price: row.get(6)?,
                created_ts: row.get(7)?,
            })
        })?;
        let mut orders = Vec::new();
        for o in rows {
            orders.push(o?);
        }
        Ok(orders)
    }
}
