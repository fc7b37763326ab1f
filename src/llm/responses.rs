//! 推理端点（Responses API 形状）的线上格式与客户端
//!
//! 请求：`{model, input: [...], tools: [...], parallel_tool_calls: false}`；
//! 响应：`{output: [...], error?}`，output 中 `function_call` 为工具调用请求，`message` 为文本回复，
//! 其余类型（如 reasoning）忽略。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::AgentError;
use crate::memory::Role;
use crate::tools::ToolDescriptor;

/// 请求体中的一条输入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputItem {
    Message {
        role: Role,
        content: String,
    },
    FunctionCall {
        call_id: String,
        name: String,
        arguments: String,
    },
    FunctionCallOutput {
        call_id: String,
        output: String,
    },
}

/// 发送给推理端点的累积请求体；工具轮次会原地追加 input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    pub model: String,
    pub input: Vec<InputItem>,
    pub tools: Vec<ToolDescriptor>,
    /// 固定为 false：工具按顺序逐个执行
    pub parallel_tool_calls: bool,
}

impl RequestBody {
    pub fn new(model: impl Into<String>, input: Vec<InputItem>, tools: Vec<ToolDescriptor>) -> Self {
        Self {
            model: model.into(),
            input,
            tools,
            parallel_tool_calls: false,
        }
    }
}

/// 端点返回的工具调用请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub call_id: String,
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

/// message 条目中的一个内容片段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    OutputText {
        text: String,
    },
    #[serde(other)]
    Other,
}

/// 响应 output 中的一条
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputItem {
    FunctionCall(FunctionCall),
    Message {
        #[serde(default)]
        content: Vec<ContentPart>,
    },
    #[serde(other)]
    Other,
}

/// 端点响应
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponsesReply {
    #[serde(default)]
    pub output: Vec<OutputItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl ResponsesReply {
    /// error 字段存在且非 null
    pub fn error_message(&self) -> Option<String> {
        match &self.error {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(v) => Some(
                v.get("message")
                    .and_then(Value::as_str)
                    .map(String::from)
                    .unwrap_or_else(|| v.to_string()),
            ),
        }
    }

    pub fn function_calls(&self) -> Vec<&FunctionCall> {
        self.output
            .iter()
            .filter_map(|item| match item {
                OutputItem::FunctionCall(call) => Some(call),
                _ => None,
            })
            .collect()
    }

    /// 拼接所有 message 的 output_text：同一条内直接相连，不同条之间换行
    pub fn final_text(&self) -> String {
        self.output
            .iter()
            .filter_map(|item| match item {
                OutputItem::Message { content } => Some(
                    content
                        .iter()
                        .filter_map(|c| match c {
                            ContentPart::OutputText { text } => Some(text.as_str()),
                            ContentPart::Other => None,
                        })
                        .collect::<String>(),
                ),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// 便于测试与离线端点构造：只含一条文本消息的响应
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            output: vec![OutputItem::Message {
                content: vec![ContentPart::OutputText { text: text.into() }],
            }],
            error: None,
        }
    }

    /// 只含工具调用的响应
    pub fn calls(calls: Vec<FunctionCall>) -> Self {
        Self {
            output: calls.into_iter().map(OutputItem::FunctionCall).collect(),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            output: Vec::new(),
            error: Some(serde_json::json!({ "message": message.into() })),
        }
    }
}

/// 推理端点：一次请求 / 响应往返
#[async_trait]
pub trait ReasoningEndpoint: Send + Sync {
    async fn respond(&self, body: &RequestBody) -> Result<ResponsesReply, AgentError>;
}

/// 基于 reqwest 的 HTTP 端点
pub struct HttpResponsesEndpoint {
    client: Client,
    url: String,
    api_key: String,
}

impl HttpResponsesEndpoint {
    /// 构建端点客户端；reqwest Client 构建失败时返回 ConfigError
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, AgentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AgentError::ConfigError(format!("reasoning endpoint client: {}", e)))?;
        Ok(Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
        })
    }
}

/// 将 HTTP 状态与响应体解析为 ResponsesReply；非 2xx 视为端点错误
pub fn parse_reply(status: u16, body: &str) -> Result<ResponsesReply, AgentError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| {
                v.pointer("/error/message")
                    .and_then(Value::as_str)
                    .map(String::from)
            })
            .unwrap_or_else(|| body.chars().take(200).collect());
        return Err(AgentError::Endpoint { status, message });
    }
    serde_json::from_str(body).map_err(|e| AgentError::JsonParseError(e.to_string()))
}

#[async_trait]
impl ReasoningEndpoint for HttpResponsesEndpoint {
    async fn respond(&self, body: &RequestBody) -> Result<ResponsesReply, AgentError> {
        let resp = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;
        if !(200..300).contains(&status) {
            tracing::warn!(status, "reasoning endpoint returned an error status");
        }
        parse_reply(status, &text)
    }
}
