//! 记忆层：会话内短期对话记录（不做持久化）

pub mod conversation;

pub use conversation::{message_items, ConversationMemory, Message, Role, TranscriptItem};
