//! LLM 客户端抽象
//!
//! 前台 Agent 使用的 Chat Completion 后端（OpenAI 兼容 / 本地规则）实现 LlmClient。

use async_trait::async_trait;

use crate::memory::Message;

/// LLM 客户端 trait：非流式完成
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// 非流式完成
    async fn complete(&self, messages: &[Message]) -> Result<String, String>;
}
