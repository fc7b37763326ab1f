//! 短期记忆：对话记录
//!
//! 记录是只追加的有序条目：普通消息、委派调用（function_call）与其结果（function_call_output）。
//! 记录不剪裁：每次委派都能看到完整的历史，回放给 Supervisor 时只取消息类条目。

use serde::{Deserialize, Serialize};

/// 消息角色（与 LLM API 一致）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// 单条消息
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// 对话记录条目：按 type 区分消息 / 函数调用 / 函数结果
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TranscriptItem {
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

impl TranscriptItem {
    pub fn is_message(&self) -> bool {
        matches!(self, TranscriptItem::Message { .. })
    }

    /// 消息类条目转为 Message，其余返回 None
    pub fn as_message(&self) -> Option<Message> {
        match self {
            TranscriptItem::Message { role, content } => Some(Message {
                role: *role,
                content: content.clone(),
            }),
            _ => None,
        }
    }
}

impl From<Message> for TranscriptItem {
    fn from(m: Message) -> Self {
        TranscriptItem::Message {
            role: m.role,
            content: m.content,
        }
    }
}

/// 仅保留消息类条目（委派内部的调用与结果不回放）
pub fn message_items(items: &[TranscriptItem]) -> Vec<&TranscriptItem> {
    items.iter().filter(|i| i.is_message()).collect()
}

/// 会话内的完整对话记录
#[derive(Clone, Debug, Default)]
pub struct ConversationMemory {
    items: Vec<TranscriptItem>,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: impl Into<TranscriptItem>) {
        self.items.push(item.into());
    }

    pub fn items(&self) -> &[TranscriptItem] {
        &self.items
    }

    /// 消息类条目（供前台模型拼上下文）
    pub fn messages(&self) -> Vec<Message> {
        self.items.iter().filter_map(|i| i.as_message()).collect()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_item_wire_shape() {
        let item = TranscriptItem::FunctionCall {
            call_id: "call_1".into(),
            name: "getNextResponseFromSupervisor".into(),
            arguments: "{}".into(),
        };
        let v = serde_json::to_value(&item).unwrap();
        assert_eq!(v["type"], "function_call");
        assert_eq!(v["call_id"], "call_1");

        let msg: TranscriptItem = Message::user("hi").into();
        let v = serde_json::to_value(&msg).unwrap();
        assert_eq!(v["type"], "message");
        assert_eq!(v["role"], "user");
    }

    #[test]
    fn test_message_items_filters_calls() {
        let items = vec![
            Message::user("how long do I bake?").into(),
            TranscriptItem::FunctionCall {
                call_id: "c".into(),
                name: "x".into(),
                arguments: "{}".into(),
            },
            TranscriptItem::FunctionCallOutput {
                call_id: "c".into(),
                output: "{}".into(),
            },
            Message::assistant("About 10 minutes.").into(),
        ];
        let filtered = message_items(&items);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|i| i.is_message()));
    }

    #[test]
    fn test_long_transcript_is_kept_whole() {
        let mut mem = ConversationMemory::new();
        for i in 0..500 {
            mem.push(Message::user(format!("m{i}")));
        }
        assert_eq!(mem.len(), 500);
        assert_eq!(mem.messages()[0].content, "m0");
        mem.clear();
        assert!(mem.is_empty());
    }
}
