//! 委派入口：getNextResponseFromSupervisor
//!
//! 前台 Agent 每个非平凡轮次调用一次。历史与面包屑钩子作为显式参数传入；
//! 循环内任何失败都在这里记录日志并折叠为统一的 `{"error": "Something went wrong."}`。

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::llm::responses::ReasoningEndpoint;
use crate::memory::TranscriptItem;
use crate::observability::Breadcrumbs;
use crate::supervisor::loop_::run_tool_loop;
use crate::supervisor::prompt::initial_request_body;
use crate::tools::{parameters_schema_for, ToolDescriptor, ToolExecutor};

pub const DELEGATION_TOOL_NAME: &str = "getNextResponseFromSupervisor";
pub const GENERIC_ERROR: &str = "Something went wrong.";

/// 委派参数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DelegationRequest {
    /// Key information from the user described in their most recent message. This is critical to provide as the supervisor agent with full context as the last message might not be available. Okay to omit if the user message didn't add any new information.
    #[serde(rename = "relevantContextFromLastUserMessage")]
    pub relevant_context_from_last_user_message: String,
}

impl DelegationRequest {
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            relevant_context_from_last_user_message: context.into(),
        }
    }
}

/// 委派结果：`{"nextResponse": ..}` 或 `{"error": ..}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DelegationOutcome {
    #[serde(rename = "nextResponse")]
    NextResponse(String),
    #[serde(rename = "error")]
    Error(String),
}

impl DelegationOutcome {
    pub fn next_response(&self) -> Option<&str> {
        match self {
            DelegationOutcome::NextResponse(text) => Some(text),
            DelegationOutcome::Error(_) => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, DelegationOutcome::Error(_))
    }
}

/// 委派工具自身的描述（前台 Agent 唯一可调用的工具）
pub fn delegation_tool_descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: DELEGATION_TOOL_NAME.to_string(),
        description: "Determines the next response whenever the agent faces a non-trivial decision, produced by a highly intelligent supervisor agent. Returns a message describing what to do next.".to_string(),
        parameters: parameters_schema_for::<DelegationRequest>(),
    }
}

/// Supervisor：推理端点 + 工具执行器 + 模型与轮次上限
pub struct Supervisor {
    endpoint: Arc<dyn ReasoningEndpoint>,
    executor: ToolExecutor,
    model: String,
    max_rounds: usize,
}

impl Supervisor {
    pub fn new(
        endpoint: Arc<dyn ReasoningEndpoint>,
        executor: ToolExecutor,
        model: impl Into<String>,
        max_rounds: usize,
    ) -> Self {
        Self {
            endpoint,
            executor,
            model: model.into(),
            max_rounds,
        }
    }

    pub fn executor(&self) -> &ToolExecutor {
        &self.executor
    }

    /// 发起一次委派：构建请求体并驱动工具循环直到最终答复
    pub async fn get_next_response(
        &self,
        request: &DelegationRequest,
        history: &[TranscriptItem],
        breadcrumbs: Option<&dyn Breadcrumbs>,
    ) -> DelegationOutcome {
        let mut body = initial_request_body(
            &self.model,
            history,
            &request.relevant_context_from_last_user_message,
            self.executor.descriptors(),
        );

        match run_tool_loop(
            self.endpoint.as_ref(),
            &self.executor,
            &mut body,
            self.max_rounds,
            breadcrumbs,
        )
        .await
        {
            Ok((text, stats)) => {
                tracing::info!(
                    round_trips = stats.round_trips,
                    tool_calls = stats.tool_calls,
                    "supervisor produced a response"
                );
                DelegationOutcome::NextResponse(text)
            }
            Err(e) => {
                tracing::warn!(error = %e, "supervisor delegation failed");
                DelegationOutcome::Error(GENERIC_ERROR.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_wire_shape() {
        let ok = serde_json::to_value(DelegationOutcome::NextResponse("hi".into())).unwrap();
        assert_eq!(ok, serde_json::json!({"nextResponse": "hi"}));
        let err = serde_json::to_value(DelegationOutcome::Error(GENERIC_ERROR.into())).unwrap();
        assert_eq!(err, serde_json::json!({"error": "Something went wrong."}));
    }

    #[test]
    fn test_request_accepts_camel_case() {
        let req: DelegationRequest =
            serde_json::from_str(r#"{"relevantContextFromLastUserMessage": "zip 98101"}"#).unwrap();
        assert_eq!(req.relevant_context_from_last_user_message, "zip 98101");
        assert!(serde_json::from_str::<DelegationRequest>("{}").is_err());
    }

    #[test]
    fn test_delegation_descriptor_requires_context() {
        let d = delegation_tool_descriptor();
        assert_eq!(d.name, DELEGATION_TOOL_NAME);
        assert_eq!(
            d.parameters["required"],
            serde_json::json!(["relevantContextFromLastUserMessage"])
        );
    }
}
