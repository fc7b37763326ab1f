//! Agent 错误类型
//!
//! Supervisor 循环内的任何错误都不会越过委派调用：由 delegation 记录日志后统一折叠为
//! `{"error": "Something went wrong."}`；前台模型错误则中止当前轮次。

use thiserror::Error;

/// Agent 运行过程中可能出现的错误（网络、端点、工具参数、轮次上限等）
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Network error: {0}")]
    Network(String),

    /// 端点返回非 2xx
    #[error("Endpoint returned HTTP {status}: {message}")]
    Endpoint { status: u16, message: String },

    /// 响应体内带 error 字段
    #[error("Endpoint reported error: {0}")]
    EndpointReportedError(String),

    #[error("Malformed arguments for tool {tool}: {reason}")]
    ToolArguments { tool: String, reason: String },

    #[error("Tool timeout: {0}")]
    ToolTimeout(String),

    #[error("Supervisor exceeded {0} round-trips")]
    RoundLimitExceeded(usize),

    #[error("JSON parse error: {0}")]
    JsonParseError(String),

    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for AgentError {
    fn from(e: reqwest::Error) -> Self {
        AgentError::Network(e.to_string())
    }
}
