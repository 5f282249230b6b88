use anyhow::Result;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

use crate::config::RelayConfig;
use crate::error::{RelayError, UPSTREAM_FALLBACK_MESSAGE};
use crate::models::UpstreamRequest;

/**
 * \brief 构建共享的 HTTP 客户端，带显式超时。
 */
pub fn build_client(config: &RelayConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder().timeout(config.timeout).build()?;
    Ok(client)
}

/**
 * \brief 非流式调用上游 Chat Completions，返回第一条候选回复。
 *
 * 无论状态码如何都按 JSON 读取响应体，以便取出上游的错误描述。
 */
pub async fn complete(
    client: &reqwest::Client,
    config: &RelayConfig,
    api_key: &str,
    messages: &[Value],
) -> Result<String, RelayError> {
    let body = UpstreamRequest {
        model: &config.model,
        messages,
        max_tokens: config.max_tokens,
        temperature: config.temperature,
    };

    let resp = client
        .post(config.completions_url())
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {}", api_key))
        .json(&body)
        .send()
        .await?;

    let status = resp.status();
    let v: Value = resp.json().await?;

    if !status.is_success() {
        let message = extract_error_message(&v)
            .unwrap_or_else(|| UPSTREAM_FALLBACK_MESSAGE.to_string());
        return Err(RelayError::Upstream { status, message });
    }

    extract_content(&v).ok_or_else(|| {
        RelayError::MalformedUpstream(
            "upstream response missing choices[0].message.content".to_string(),
        )
    })
}

fn extract_content(v: &Value) -> Option<String> {
    v.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .map(|s| s.to_string())
}

fn extract_error_message(v: &Value) -> Option<String> {
    v.get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(|s| s.to_string())
}
