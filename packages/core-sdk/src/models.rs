use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/**
 * \brief 消息结构，与 OpenAI Chat 消息格式对齐。
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /** \brief 角色：system/user/assistant */
    pub role: String,
    /** \brief 内容 */
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

impl From<Message> for Value {
    fn from(msg: Message) -> Self {
        json!({"role": msg.role, "content": msg.content})
    }
}

/**
 * \brief 入站聊天请求体。
 */
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /** \brief 系统提示词 */
    pub system_prompt: String,
    /** \brief 本轮用户消息 */
    pub user_message: String,
    /** \brief 历史对话，缺省为空；条目须已是上游消息格式，原样按序透传 */
    #[serde(default)]
    pub history: Vec<Value>,
}

impl ChatRequest {
    /**
     * \brief 组装上游消息序列：system + history + user。
     */
    pub fn into_messages(self) -> Vec<Value> {
        let mut messages = Vec::with_capacity(self.history.len() + 2);
        messages.push(Message::system(self.system_prompt).into());
        messages.extend(self.history);
        messages.push(Message::user(self.user_message).into());
        messages
    }
}

/**
 * \brief 发往上游 Chat Completions 接口的请求体。
 */
#[derive(Debug, Clone, Serialize)]
pub struct UpstreamRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Value],
    pub max_tokens: u32,
    pub temperature: f64,
}

/**
 * \brief 返回给调用方的响应体：成功为 content，失败为 error。
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelayResponse {
    Content { content: String },
    Error { error: String },
}
