use std::{path::PathBuf, time::Duration};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use chat_relay_core_sdk::{
    config::RelayConfig,
    models::ChatRequest,
    relay::{self, RelayState},
    server, telemetry,
};

/**
 * \brief CLI 程序入口：启动中继服务或在终端执行一次中继调用。
 */
#[derive(Parser, Debug)]
#[command(name = "chat-relay", version, about = "Chat completion relay")]
struct Cli {
    /** \brief 上游 API 基地址，覆盖 CHAT_RELAY_API_BASE */
    #[arg(long, global = true)]
    api_base: Option<String>,
    /** \brief 模型名，覆盖 CHAT_RELAY_MODEL */
    #[arg(long, global = true)]
    model: Option<String>,
    /** \brief 上游超时秒数，覆盖 CHAT_RELAY_TIMEOUT_SECS */
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    /** \brief 日志目录，覆盖 CHAT_RELAY_LOG_DIR */
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    /** \brief 关闭日志输出 */
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /**
     * \brief 启动 HTTP 中继服务。
     */
    Serve {
        #[arg(long, default_value = "0.0.0.0:8000")]
        addr: String,
    },

    /**
     * \brief 发送一条消息并打印模型回复。
     * \param system  系统提示词
     * \param prompt  用户消息
     * \param history 历史消息 JSON 文件（[{role, content}, ...]）
     */
    Ask {
        #[arg(long)]
        system: String,
        #[arg(long)]
        prompt: String,
        #[arg(long)]
        history: Option<PathBuf>,
    },
}

impl Cli {
    fn relay_config(&self) -> Result<RelayConfig> {
        let mut config = RelayConfig::from_env().context("load configuration failed")?;
        if let Some(base) = &self.api_base {
            config.api_base = base.clone();
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(dir) = &self.log_dir {
            config.log_dir = Some(dir.clone());
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = cli.relay_config()?;
    telemetry::set_enabled(!cli.quiet);
    telemetry::set_log_dir(config.log_dir.clone());

    let state = RelayState::new(config).context("build http client failed")?;

    match cli.command {
        Commands::Serve { addr } => {
            if state.config.credential().is_none() {
                telemetry::log_error(
                    "cli.serve",
                    &format!(
                        "{} is not set; every request will fail until it is configured",
                        state.config.api_key_var
                    ),
                );
            }
            server::run(&addr, state).await?;
        }
        Commands::Ask {
            system,
            prompt,
            history,
        } => {
            let history: Vec<serde_json::Value> = match history {
                Some(path) => {
                    let raw = std::fs::read(&path)
                        .with_context(|| format!("read history file {} failed", path.display()))?;
                    serde_json::from_slice(&raw).context("parse history file failed")?
                }
                None => Vec::new(),
            };
            let request = ChatRequest {
                system_prompt: system,
                user_message: prompt,
                history,
            };
            let body = serde_json::to_vec(&request).context("encode request failed")?;

            match relay::relay_chat(&state, &body).await {
                Ok(content) => println!("{}", content),
                Err(err) => {
                    relay::log_failure(&err);
                    return Err(anyhow!("relay failed ({}): {}", err.status(), err));
                }
            }
        }
    }

    Ok(())
}
