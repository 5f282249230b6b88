use std::sync::Arc;

use anyhow::Result;

use crate::{
    config::RelayConfig,
    error::RelayError,
    llm,
    models::ChatRequest,
    telemetry,
};

/**
 * \brief 各请求共享的只读状态：配置与上游客户端。
 */
#[derive(Clone)]
pub struct RelayState {
    pub config: Arc<RelayConfig>,
    pub client: reqwest::Client,
}

impl RelayState {
    pub fn new(config: RelayConfig) -> Result<Self> {
        let client = llm::build_client(&config)?;
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }
}

/**
 * \brief 中继主流程：解析请求体、检查密钥、组装消息并调用上游。
 * \return 成功时为模型回复文本
 */
pub async fn relay_chat(state: &RelayState, body: &[u8]) -> Result<String, RelayError> {
    let request: ChatRequest = serde_json::from_slice(body)?;

    telemetry::log_event(
        "relay.chat",
        &format!(
            "generating response history={} message={}",
            request.history.len(),
            telemetry::truncate_for_log(&request.user_message)
        ),
    );

    let api_key = state
        .config
        .credential()
        .ok_or(RelayError::MissingCredential)?;

    let messages = request.into_messages();
    llm::complete(&state.client, &state.config, &api_key, &messages).await
}

/**
 * \brief 按错误类别写日志。
 */
pub fn log_failure(err: &RelayError) {
    let detail = match err {
        RelayError::MissingCredential => err.to_string(),
        RelayError::Upstream { status, message } => {
            format!("upstream error status={} message={}", status.as_u16(), message)
        }
        other => format!("function error: {}", other),
    };
    telemetry::log_error(err.category(), &detail);
}
