//! 前台 Agent：固定指令、允许列表约定、输出解析与委派，以及离线规则模型

pub mod agent;
pub mod contract;
pub mod fallback;
pub mod prompt;

pub use agent::{parse_front_output, FrontAgent, FrontDecision, TurnReply, APOLOGY};
pub use contract::{classify_allow_list, filler_for_turn, AllowListed, GREETING, SAMPLE_FILLERS};
pub use fallback::RuleBasedFrontClient;
pub use prompt::front_instructions;
