//! 本地规则前台模型：无 API Key 或配置 offline 时使用
//!
//! 允许列表内的输入直接作答，其余一律按约定输出「填充语 + 委派 JSON」。

use async_trait::async_trait;

use crate::front::contract::{classify_allow_list, filler_for_turn, AllowListed};
use crate::llm::LlmClient;
use crate::memory::{Message, Role};
use crate::supervisor::{DelegationRequest, DELEGATION_TOOL_NAME};

#[derive(Debug, Default, Clone, Copy)]
pub struct RuleBasedFrontClient;

impl RuleBasedFrontClient {
    fn answer(kind: AllowListed, messages: &[Message]) -> String {
        match kind {
            AllowListed::Greeting => "Hi there!".to_string(),
            AllowListed::HowAreYou => "Doing well. What are we cooking?".to_string(),
            AllowListed::Thanks => "You're welcome.".to_string(),
            AllowListed::Repeat => messages
                .iter()
                .rev()
                .find(|m| m.role == Role::Assistant)
                .map(|m| m.content.clone())
                .unwrap_or_else(|| "I haven't said anything yet. How can I help?".to_string()),
        }
    }
}

#[async_trait]
impl LlmClient for RuleBasedFrontClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, String> {
        let last_user = messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .ok_or_else(|| "no user message".to_string())?;

        // 询问「重复」时，上一条 assistant 消息在当前用户消息之前
        let earlier = messages
            .iter()
            .rposition(|m| m.role == Role::User)
            .map(|i| &messages[..i])
            .unwrap_or(messages);

        if let Some(kind) = classify_allow_list(&last_user.content) {
            return Ok(Self::answer(kind, earlier));
        }

        let turn = messages.iter().filter(|m| m.role == Role::User).count();
        let call = serde_json::json!({
            "tool": DELEGATION_TOOL_NAME,
            "args": DelegationRequest::new(last_user.content.trim()),
        });
        Ok(format!("{}\n{}", filler_for_turn(turn), call))
    }
}
