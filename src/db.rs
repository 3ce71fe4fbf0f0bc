// ==========================================
// 库存预测与补货决策系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout,减少并发写入时的偶发 busy 错误
// - 建表集中在 init_schema,避免各仓储各自建表
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout(毫秒)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明:
/// - foreign_keys 需要"每个连接"单独开启
/// - busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 初始化数据表(幂等)
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS monthly_sales (
            sku                     TEXT NOT NULL,
            month                   TEXT NOT NULL,   -- YYYY-MM
            kind                    TEXT NOT NULL,   -- PAST / FUTURE
            actual_qty              REAL NOT NULL DEFAULT 0,
            actual_amount           REAL NOT NULL DEFAULT 0,
            actual_customers        REAL NOT NULL DEFAULT 0,
            base_forecast_qty       REAL NOT NULL DEFAULT 0,
            base_forecast_amount    REAL NOT NULL DEFAULT 0,
            base_forecast_customers REAL NOT NULL DEFAULT 0,
            PRIMARY KEY (sku, month)
        );

        CREATE TABLE IF NOT EXISTS in_transit_batch (
            batch_id     TEXT PRIMARY KEY,
            sku          TEXT NOT NULL,
            arrival_date TEXT NOT NULL,  -- YYYY-MM-DD
            qty          REAL NOT NULL,
            overdue      INTEGER NOT NULL DEFAULT 0,
            overdue_days INTEGER NOT NULL DEFAULT 0
        );
        CREATE INDEX IF NOT EXISTS idx_in_transit_sku ON in_transit_batch(sku);

        CREATE TABLE IF NOT EXISTS kpi_snapshot (
            sku            TEXT PRIMARY KEY,
            in_stock_qty   REAL NOT NULL DEFAULT 0,
            in_transit_qty REAL NOT NULL DEFAULT 0,
            sales_30d      REAL NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS strategy_config (
            sku         TEXT PRIMARY KEY,
            config_json TEXT NOT NULL,
            updated_ts  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS action_log (
            action_id    TEXT PRIMARY KEY,
            sku          TEXT NOT NULL,
            action_type  TEXT NOT NULL,
            action_ts    TEXT NOT NULL,
            actor        TEXT NOT NULL,
            payload_json TEXT,
            detail       TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_action_log_sku ON action_log(sku, action_ts);

        CREATE TABLE IF NOT EXISTS purchase_order (
            order_id        TEXT PRIMARY KEY,
            sku             TEXT NOT NULL,
            qty             INTEGER NOT NULL,
            supplier_name   TEXT NOT NULL,
            supplier_code   TEXT NOT NULL,
            supplier_rating REAL NOT NULL DEFAULT 0,
            supplier_price  REAL NOT NULL DEFAULT 0,
            created_ts      TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_purchase_order_sku ON purchase_order(sku);
        "#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='strategy_config'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }
}
