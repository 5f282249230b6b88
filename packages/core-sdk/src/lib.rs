pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod relay;
pub mod server;
pub mod telemetry;

/**
 * \brief SDK 预导入集合，方便外部引用常用模块。
 */
pub mod prelude {
    pub use crate::config::RelayConfig;
    pub use crate::error::RelayError;
    pub use crate::models::{ChatRequest, Message, RelayResponse};
    pub use crate::relay::RelayState;
    pub use crate::{llm, relay, server, telemetry};
}
