//! LLM 层：前台 Chat Completion 客户端、推理端点（Responses API）与 Mock

pub mod mock;
pub mod openai;
pub mod responses;
pub mod traits;

pub use mock::{OfflineEndpoint, ScriptedEndpoint, ScriptedLlmClient};
pub use openai::OpenAiClient;
pub use responses::{
    ContentPart, FunctionCall, HttpResponsesEndpoint, InputItem, OutputItem, ReasoningEndpoint,
    RequestBody, ResponsesReply,
};
pub use traits::LlmClient;
