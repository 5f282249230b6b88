use axum::http::StatusCode;

/** \brief 上游错误体缺少 error.message 时的兜底文案。 */
pub const UPSTREAM_FALLBACK_MESSAGE: &str = "OpenAI API request failed";

/**
 * \brief 单次中继请求可能出现的失败。Display 文本即返回给调用方的 error 字段。
 */
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /** \brief 服务端未配置上游密钥 */
    #[error("API key not configured on server")]
    MissingCredential,

    /** \brief 入站请求体无法解析 */
    #[error("{0}")]
    InvalidRequest(#[from] serde_json::Error),

    /** \brief 上游返回非成功状态，状态码原样透传 */
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    /** \brief 网络或响应体读取失败 */
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /** \brief 上游成功返回但结构不符合预期 */
    #[error("{0}")]
    MalformedUpstream(String),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::Upstream { status, .. } => *status,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /** \brief 日志分类，对应配置错误、上游拒绝与意外异常三类。 */
    pub fn category(&self) -> &'static str {
        match self {
            RelayError::MissingCredential => "relay.config",
            RelayError::Upstream { .. } => "relay.upstream",
            _ => "relay.exception",
        }
    }
}
