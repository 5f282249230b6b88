use std::{fs::OpenOptions, io::Write, path::PathBuf};

use anyhow::Result;
use once_cell::sync::Lazy;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

const LOG_FILE: &str = "chat-relay.log";
const MAX_LOGGED_CHARS: usize = 100;

static TELEMETRY_ENABLED: Lazy<std::sync::RwLock<bool>> =
    Lazy::new(|| std::sync::RwLock::new(true));

static LOG_DIR: Lazy<std::sync::RwLock<Option<PathBuf>>> =
    Lazy::new(|| std::sync::RwLock::new(None));

/**
 * \brief 更新日志开关状态。
 */
pub fn set_enabled(enabled: bool) {
    if let Ok(mut guard) = TELEMETRY_ENABLED.write() {
        *guard = enabled;
    }
}

/**
 * \brief 查询当前日志开关状态。
 */
pub fn is_enabled() -> bool {
    TELEMETRY_ENABLED.read().map(|g| *g).unwrap_or(true)
}

/**
 * \brief 设置日志文件目录；None 表示仅输出到 stderr。
 */
pub fn set_log_dir(dir: Option<PathBuf>) {
    if let Ok(mut guard) = LOG_DIR.write() {
        *guard = dir;
    }
}

/**
 * \brief 记录常规事件。
 */
pub fn log_event(category: &str, message: &str) {
    emit("INFO", category, message);
}

/**
 * \brief 记录错误事件。
 */
pub fn log_error(category: &str, message: &str) {
    emit("ERROR", category, message);
}

/**
 * \brief 截断用户文本，避免完整消息落入日志。
 */
pub fn truncate_for_log(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(MAX_LOGGED_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

pub fn format_line(timestamp: &str, level: &str, category: &str, message: &str) -> String {
    format!("{} [{}] {} - {}", timestamp, level, category, message)
}

fn emit(level: &str, category: &str, message: &str) {
    if !is_enabled() {
        return;
    }
    if let Err(err) = write_line(level, category, message) {
        eprintln!("telemetry write failed: {}", err);
    }
}

fn write_line(level: &str, category: &str, message: &str) -> Result<()> {
    let timestamp = OffsetDateTime::now_utc().format(&Rfc3339)?;
    let line = format_line(&timestamp, level, category, message);
    eprintln!("{}", line);

    let log_dir = LOG_DIR.read().ok().and_then(|g| g.clone());
    if let Some(log_dir) = log_dir {
        if !log_dir.exists() {
            std::fs::create_dir_all(&log_dir)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_dir.join(LOG_FILE))?;
        writeln!(file, "{}", line)?;
    }
    Ok(())
}
