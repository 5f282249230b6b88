use anyhow::Result;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        HeaderValue, Method, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::{
    models::RelayResponse,
    relay::{self, RelayState},
    telemetry,
};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";
pub const ALLOW_METHODS: &str = "POST, OPTIONS";

/**
 * \brief 启动中继 HTTP 服务。
 * \param addr 监听地址，如 "0.0.0.0:8000"
 */
pub async fn run(addr: &str, state: RelayState) -> Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    telemetry::log_event("server", &format!("listening on http://{}", addr));
    axum::serve(listener, app).await?;
    Ok(())
}

/**
 * \brief 构建路由。所有响应（含 404）都带固定的 CORS 头，请求体不设大小上限。
 */
pub fn router(state: RelayState) -> Router {
    Router::new()
        .route("/", any(relay_handler))
        .route("/openai-chat", any(relay_handler))
        .fallback(not_found)
        .layer(DefaultBodyLimit::disable())
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
        .with_state(state)
}

/**
 * \brief 聊天中继接口：OPTIONS 直接返回预检结果，其余方法走中继流程。
 */
async fn relay_handler(
    State(state): State<RelayState>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    if method == Method::OPTIONS {
        return (StatusCode::OK, "ok").into_response();
    }

    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            telemetry::log_error(
                "relay.exception",
                &format!("read request body failed: {}", rejection.body_text()),
            );
            return error_response(rejection.status(), rejection.body_text());
        }
    };

    match relay::relay_chat(&state, &body).await {
        Ok(content) => (StatusCode::OK, Json(RelayResponse::Content { content })).into_response(),
        Err(err) => {
            relay::log_failure(&err);
            error_response(err.status(), err.to_string())
        }
    }
}

async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "not found".to_string())
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(RelayResponse::Error { error })).into_response()
}
