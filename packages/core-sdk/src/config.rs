use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};

pub const DEFAULT_API_BASE: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_KEY_VAR: &str = "OPENAI_API_KEY";
pub const MAX_TOKENS: u32 = 500;
pub const TEMPERATURE: f64 = 0.7;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/**
 * \brief 中继服务配置。模型与生成参数由运维方固定，调用方不可覆盖。
 */
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /** \brief 上游 API 基地址 */
    pub api_base: String,
    /** \brief 模型名 */
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    /** \brief 存放上游密钥的环境变量名，每次请求重新读取 */
    pub api_key_var: String,
    /** \brief 上游请求超时 */
    pub timeout: Duration,
    /** \brief 日志目录（可选），设置后同时写入文件 */
    pub log_dir: Option<PathBuf>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            api_key_var: DEFAULT_KEY_VAR.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_dir: None,
        }
    }
}

impl RelayConfig {
    /**
     * \brief 从环境变量读取配置覆盖项，未设置的取默认值。
     */
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(base) = lookup("CHAT_RELAY_API_BASE") {
            cfg.api_base = base;
        }
        if let Some(model) = lookup("CHAT_RELAY_MODEL") {
            cfg.model = model;
        }
        if let Some(var) = lookup("CHAT_RELAY_KEY_VAR") {
            cfg.api_key_var = var;
        }
        if let Some(secs) = lookup("CHAT_RELAY_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("invalid CHAT_RELAY_TIMEOUT_SECS: {}", secs))?;
            cfg.timeout = Duration::from_secs(secs);
        }
        if let Some(dir) = lookup("CHAT_RELAY_LOG_DIR") {
            cfg.log_dir = Some(PathBuf::from(dir));
        }
        Ok(cfg)
    }

    /**
     * \brief 读取上游密钥；空值视为未配置。
     */
    pub fn credential(&self) -> Option<String> {
        std::env::var(&self.api_key_var)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    pub fn completions_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.api_base.trim_end_matches('/')
        )
    }
}
