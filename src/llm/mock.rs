//! Mock 客户端（用于测试与离线演示，无需 API）
//!
//! - ScriptedEndpoint：按顺序返回预置响应，并记录每次收到的请求体快照
//! - OfflineEndpoint：无 API Key 时的推理端点，直接把「Relevant Context」回显为答复
//! - ScriptedLlmClient：按顺序返回预置文本的前台模型

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::AgentError;
use crate::llm::responses::{InputItem, ReasoningEndpoint, RequestBody, ResponsesReply};
use crate::llm::LlmClient;
use crate::memory::Message;

/// 预置响应的推理端点；脚本耗尽后返回 Network 错误
#[derive(Debug, Default)]
pub struct ScriptedEndpoint {
    replies: Mutex<VecDeque<Result<ResponsesReply, AgentError>>>,
    requests: Mutex<Vec<RequestBody>>,
}

impl ScriptedEndpoint {
    pub fn new(replies: Vec<ResponsesReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(Ok).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// 追加一个传输层失败
    pub fn then_fail(self, err: AgentError) -> Self {
        if let Ok(mut q) = self.replies.lock() {
            q.push_back(Err(err));
        }
        self
    }

    /// 已收到的请求体（按往返顺序）
    pub fn requests(&self) -> Vec<RequestBody> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn dispatch_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }
}

#[async_trait]
impl ReasoningEndpoint for ScriptedEndpoint {
    async fn respond(&self, body: &RequestBody) -> Result<ResponsesReply, AgentError> {
        if let Ok(mut r) = self.requests.lock() {
            r.push(body.clone());
        }
        let next = self.replies.lock().ok().and_then(|mut q| q.pop_front());
        next.unwrap_or_else(|| Err(AgentError::Network("script exhausted".to_string())))
    }
}

/// 离线推理端点：不调用工具，回显委派上下文
#[derive(Debug, Default)]
pub struct OfflineEndpoint;

const CONTEXT_MARKER: &str = "==== Relevant Context From Last User Message ===";

#[async_trait]
impl ReasoningEndpoint for OfflineEndpoint {
    async fn respond(&self, body: &RequestBody) -> Result<ResponsesReply, AgentError> {
        let context = body
            .input
            .iter()
            .rev()
            .find_map(|item| match item {
                InputItem::Message { content, .. } => content
                    .split(CONTEXT_MARKER)
                    .nth(1)
                    .map(|s| s.trim().to_string()),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "your question".to_string());
        Ok(ResponsesReply::text(format!(
            "I'm running offline right now, so I can't look that up. You asked about: {context}."
        )))
    }
}

/// 预置文本的前台模型；脚本耗尽后返回错误
#[derive(Debug, Default)]
pub struct ScriptedLlmClient {
    replies: Mutex<VecDeque<String>>,
    seen: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedLlmClient {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// 每次 complete 收到的完整消息列表
    pub fn seen(&self) -> Vec<Vec<Message>> {
        self.seen.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlmClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, String> {
        if let Ok(mut s) = self.seen.lock() {
            s.push(messages.to_vec());
        }
        self.replies
            .lock()
            .ok()
            .and_then(|mut q| q.pop_front())
            .ok_or_else(|| "script exhausted".to_string())
    }
}
