//! 核心层：错误类型与对话会话

pub mod error;
pub mod session;

pub use error::AgentError;
pub use session::{CookingSession, SessionBusy, SessionStore};
