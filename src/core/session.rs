//! 烹饪会话：会话 id、可选菜谱、对话记录
//!
//! 会话仅存于内存；Web 端在一轮处理期间把会话从 SessionStore 中取出（check_out），处理完再放回（check_in）。
//! 取出期间同一 id 再次请求返回 SessionBusy，不会新建会话覆盖原会话。

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::memory::ConversationMemory;
use crate::recipe::Recipe;

#[derive(Debug, Clone)]
pub struct CookingSession {
    pub id: String,
    pub recipe: Option<Recipe>,
    pub transcript: ConversationMemory,
    /// 已处理的用户轮次数（用于轮换填充语）
    pub turns: usize,
}

impl CookingSession {
    pub fn new(recipe: Option<Recipe>) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), recipe)
    }

    pub fn with_id(id: impl Into<String>, recipe: Option<Recipe>) -> Self {
        Self {
            id: id.into(),
            recipe,
            transcript: ConversationMemory::new(),
            turns: 0,
        }
    }

    /// 菜谱纯文本（附加到前台指令）
    pub fn recipe_plaintext(&self) -> Option<String> {
        self.recipe.as_ref().map(Recipe::to_plaintext)
    }

    /// 清空对话，保留菜谱
    pub fn reset(&mut self) {
        self.transcript.clear();
        self.turns = 0;
    }
}

/// 会话正被另一轮对话占用
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("session {0} is busy with another turn")]
pub struct SessionBusy(pub String);

/// 内存会话表：空闲会话 + 正在处理中的会话 id
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, CookingSession>,
    busy: HashSet<String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, session: CookingSession) {
        self.busy.remove(&session.id);
        self.sessions.insert(session.id.clone(), session);
    }

    pub fn is_busy(&self, id: &str) -> bool {
        self.busy.contains(id)
    }

    /// 空闲会话；处理中或不存在时返回 None
    pub fn get(&self, id: &str) -> Option<&CookingSession> {
        self.sessions.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut CookingSession> {
        self.sessions.get_mut(id)
    }

    /// 取出会话处理一轮；id 未知时用 `create` 新建，id 正在处理中返回 SessionBusy
    pub fn check_out(
        &mut self,
        id: &str,
        create: impl FnOnce() -> CookingSession,
    ) -> Result<CookingSession, SessionBusy> {
        if self.busy.contains(id) {
            return Err(SessionBusy(id.to_string()));
        }
        let session = self.sessions.remove(id).unwrap_or_else(create);
        self.busy.insert(id.to_string());
        Ok(session)
    }

    /// 放回处理完的会话并解除占用
    pub fn check_in(&mut self, session: CookingSession) {
        self.insert(session);
    }

    pub fn len(&self) -> usize {
        self.sessions.len() + self.busy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
