// ==========================================
// 性能观测: 请求耗时 Guard + SQLite 语句观测
// ==========================================
// 说明: HTTP 处理经 spawn_blocking 进入同步段，
//       Guard 包住同步段即为该请求的数据库侧耗时
// ==========================================

use rusqlite::Connection;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

static SQL_OBSERVE_ENABLED: AtomicBool = AtomicBool::new(false);
static SLOW_SQL_THRESHOLD_MS: AtomicU64 = AtomicU64::new(0);

/// 语句日志单行化后保留的最大字符数
const SQL_LOG_MAX_CHARS: usize = 400;

fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(v) => matches!(
            v.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "y" | "on"
        ),
        Err(_) => default,
    }
}

/// 把 SQL 压成单行并限长（SQL 文本里可能出现多字节字符，按字符截断）
fn compact_sql(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len().min(SQL_LOG_MAX_CHARS + 4));
    let mut chars_written = 0usize;
    let mut last_was_space = false;
    for ch in sql.trim().chars() {
        let ch = if ch.is_whitespace() { ' ' } else { ch };
        if ch == ' ' && last_was_space {
            continue;
        }
        last_was_space = ch == ' ';
        if chars_written >= SQL_LOG_MAX_CHARS {
            out.push('…');
            break;
        }
        out.push(ch);
        chars_written += 1;
    }
    out
}

/// 安装 SQLite 语句观测钩子（TRACE 级语句回显 + 慢 SQL 告警）
///
/// 开关：
/// - Debug 构建默认开启，Release 默认关闭
/// - `CONSTRUCTION_LEDGER_PERF_SQL=1` 强制开启
/// - `CONSTRUCTION_LEDGER_SLOW_SQL_MS=50` 覆盖慢 SQL 阈值（毫秒）
pub fn install_sqlite_tracing(conn: &mut Connection) {
    let enabled = env_flag("CONSTRUCTION_LEDGER_PERF_SQL", cfg!(debug_assertions));
    SQL_OBSERVE_ENABLED.store(enabled, Ordering::Relaxed);

    if !enabled {
        // 连接可能被复用，关闭时清掉残留的回调
        conn.trace(None);
        conn.profile(None);
        return;
    }

    let slow_ms = std::env::var("CONSTRUCTION_LEDGER_SLOW_SQL_MS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(if cfg!(debug_assertions) { 50 } else { 200 });
    SLOW_SQL_THRESHOLD_MS.store(slow_ms, Ordering::Relaxed);

    conn.trace(Some(trace_statement));
    conn.profile(Some(profile_statement));
}

fn trace_statement(sql: &str) {
    if !SQL_OBSERVE_ENABLED.load(Ordering::Relaxed) {
        return;
    }
    tracing::trace!(target: "sqlite", sql = %compact_sql(sql), "statement");
}

fn profile_statement(sql: &str, elapsed: Duration) {
    if !SQL_OBSERVE_ENABLED.load(Ordering::Relaxed) {
        return;
    }
    let elapsed_ms = elapsed.as_millis() as u64;
    let threshold = SLOW_SQL_THRESHOLD_MS.load(Ordering::Relaxed);
    if threshold == 0 || elapsed_ms < threshold {
        return;
    }
    tracing::warn!(
        target: "slow_sql",
        elapsed_ms,
        threshold_ms = threshold,
        sql = %compact_sql(sql),
        "slow sql"
    );
}

// ==========================================
// PerfGuard - 操作耗时守卫
// ==========================================

/// 操作耗时守卫：创建即计时，Drop 时输出 perf 日志
///
/// # 示例
/// ```ignore
/// let _perf = construction_ledger::perf::PerfGuard::new("http.getMaterialDetails");
/// // 同步业务段...
/// ```
pub struct PerfGuard {
    op: &'static str,
    started: Instant,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        Self {
            op,
            started: Instant::now(),
        }
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        tracing::info!(
            target: "perf",
            op = self.op,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            "done"
        );
    }
}
