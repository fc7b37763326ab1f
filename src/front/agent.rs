//! 前台 Agent：解析前台模型输出，决定直接回复还是委派给 Supervisor
//!
//! 委派约定：模型先输出一句填充语，再输出一个 JSON 工具调用
//! `{"tool": "getNextResponseFromSupervisor", "args": {"relevantContextFromLastUserMessage": ".."}}`。
//! 模型不守约时在这里纠正：缺填充语补一句，调用了别的工具或 JSON 无法解析则以用户原话委派。

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{AgentError, CookingSession};
use crate::front::contract::filler_for_turn;
use crate::front::prompt::front_instructions;
use crate::llm::LlmClient;
use crate::memory::{Message, TranscriptItem};
use crate::observability::Breadcrumbs;
use crate::supervisor::{DelegationOutcome, DelegationRequest, Supervisor, DELEGATION_TOOL_NAME};

/// 委派失败时前台的答复
pub const APOLOGY: &str = "Sorry, I ran into a problem on my end. Could you say that again?";

/// 前台模型输出中的工具调用
#[derive(Debug, Clone, Deserialize)]
struct FrontToolCall {
    tool: String,
    #[serde(default)]
    args: Value,
}

/// 前台决策
#[derive(Debug, Clone, PartialEq)]
pub enum FrontDecision {
    /// 允许列表内的直接回复
    Reply(String),
    /// 委派；filler 为调用前说的话
    Delegate {
        filler: Option<String>,
        request: DelegationRequest,
    },
}

/// 解析前台模型输出：若含 JSON 工具调用则为 Delegate，否则为 Reply
///
/// `last_user` 为本轮用户原话，在模型调用了其他工具或参数不合法时作为委派上下文。
/// 普通回复里的花括号（如 "Sure {smiles}"）不算工具调用；
/// 只有 ```json 代码块或带 `"tool"` 键的花括号块才按调用解析，解析失败返回 JsonParseError。
pub fn parse_front_output(output: &str, last_user: &str) -> Result<FrontDecision, AgentError> {
    let trimmed = output.trim();

    // 尝试提取 JSON 块（```json ... ``` 或纯 JSON），其前面的文本即填充语
    let (prefix, json_str, fenced) = if let Some(start) = trimmed.find("```json") {
        let rest = &trimmed[start + 7..];
        let body = rest.find("```").map(|end| rest[..end].trim()).unwrap_or(rest.trim());
        (&trimmed[..start], body, true)
    } else if let Some(start) = trimmed.find('{') {
        match trimmed.rfind('}') {
            Some(end) if end > start => (&trimmed[..start], &trimmed[start..=end], false),
            _ => return Ok(FrontDecision::Reply(trimmed.to_string())),
        }
    } else {
        return Ok(FrontDecision::Reply(trimmed.to_string()));
    };

    let parsed: FrontToolCall = match serde_json::from_str(json_str) {
        Ok(call) => call,
        Err(_) if !fenced && !json_str.contains("\"tool\"") => {
            return Ok(FrontDecision::Reply(trimmed.to_string()));
        }
        Err(e) => return Err(AgentError::JsonParseError(format!("{}: {}", e, json_str))),
    };

    if parsed.tool.is_empty() {
        return Ok(FrontDecision::Reply(trimmed.to_string()));
    }

    let filler = Some(prefix.trim().to_string()).filter(|s| !s.is_empty());
    let request = if parsed.tool == DELEGATION_TOOL_NAME {
        serde_json::from_value::<DelegationRequest>(parsed.args).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "delegation args invalid, using raw utterance");
            DelegationRequest::new(last_user)
        })
    } else {
        tracing::warn!(tool = %parsed.tool, "front agent called a non-delegation tool, delegating instead");
        DelegationRequest::new(last_user)
    };
    Ok(FrontDecision::Delegate { filler, request })
}

/// 一轮对话的结果
#[derive(Debug, Clone, Serialize)]
pub struct TurnReply {
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filler: Option<String>,
    pub delegated: bool,
    #[serde(skip)]
    pub outcome: Option<DelegationOutcome>,
}

/// 前台 Agent：持有前台模型（多会话共享）
pub struct FrontAgent {
    llm: Arc<dyn LlmClient>,
}

impl FrontAgent {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// 让前台模型对当前会话做一次决策（会话记录应已包含本轮用户消息）
    pub async fn decide(
        &self,
        session: &CookingSession,
        last_user: &str,
    ) -> Result<FrontDecision, AgentError> {
        let system = front_instructions(session.recipe_plaintext().as_deref());
        let mut messages = vec![Message::system(system)];
        messages.extend(session.transcript.messages());

        let output = self
            .llm
            .complete(&messages)
            .await
            .map_err(AgentError::LlmError)?;

        let decision = match parse_front_output(&output, last_user) {
            Ok(FrontDecision::Reply(text)) if text.trim().is_empty() => {
                tracing::warn!("front agent produced an empty reply, delegating");
                FrontDecision::Delegate {
                    filler: None,
                    request: DelegationRequest::new(last_user),
                }
            }
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(error = %e, "front agent output unparsable, delegating");
                FrontDecision::Delegate {
                    filler: None,
                    request: DelegationRequest::new(last_user),
                }
            }
        };
        Ok(decision)
    }

    /// 处理一轮用户输入：记录用户消息、决策、必要时委派，并把整个过程写回会话记录
    pub async fn handle_turn(
        &self,
        supervisor: &Supervisor,
        session: &mut CookingSession,
        user_input: &str,
        breadcrumbs: Option<&dyn Breadcrumbs>,
    ) -> Result<TurnReply, AgentError> {
        let user_input = user_input.trim();
        session.transcript.push(Message::user(user_input));
        let turn = session.turns;
        session.turns += 1;

        let (filler, request) = match self.decide(session, user_input).await? {
            FrontDecision::Reply(text) => {
                session.transcript.push(Message::assistant(text.clone()));
                return Ok(TurnReply {
                    reply: text,
                    filler: None,
                    delegated: false,
                    outcome: None,
                });
            }
            FrontDecision::Delegate { filler, request } => (filler, request),
        };

        let filler = filler.unwrap_or_else(|| filler_for_turn(turn).to_string());
        session.transcript.push(Message::assistant(filler.clone()));

        let history = session.transcript.items().to_vec();
        let call_id = format!("call_{}", uuid::Uuid::new_v4().simple());
        let arguments = serde_json::to_string(&request)
            .map_err(|e| AgentError::JsonParseError(e.to_string()))?;
        session.transcript.push(TranscriptItem::FunctionCall {
            call_id: call_id.clone(),
            name: DELEGATION_TOOL_NAME.to_string(),
            arguments,
        });

        let outcome = supervisor.get_next_response(&request, &history, breadcrumbs).await;
        let output = serde_json::to_string(&outcome)
            .map_err(|e| AgentError::JsonParseError(e.to_string()))?;
        session.transcript.push(TranscriptItem::FunctionCallOutput { call_id, output });

        let reply = match &outcome {
            DelegationOutcome::NextResponse(text) => text.clone(),
            DelegationOutcome::Error(e) => {
                tracing::warn!(error = %e, "delegation returned an error, apologising");
                APOLOGY.to_string()
            }
        };
        session.transcript.push(Message::assistant(reply.clone()));

        Ok(TurnReply {
            reply,
            filler: Some(filler),
            delegated: true,
            outcome: Some(outcome),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_reply() {
        let d = parse_front_output("  Hi there!  ", "hello").unwrap();
        assert_eq!(d, FrontDecision::Reply("Hi there!".into()));
    }

    #[test]
    fn test_delegation_with_filler() {
        let out = "One moment.\n{\"tool\": \"getNextResponseFromSupervisor\", \"args\": {\"relevantContextFromLastUserMessage\": \"zip 98101\"}}";
        let d = parse_front_output(out, "my zip is 98101").unwrap();
        assert_eq!(
            d,
            FrontDecision::Delegate {
                filler: Some("One moment.".into()),
                request: DelegationRequest::new("zip 98101"),
            }
        );
    }

    #[test]
    fn test_fenced_json_without_filler() {
        let out = "```json\n{\"tool\": \"getNextResponseFromSupervisor\", \"args\": {\"relevantContextFromLastUserMessage\": \"\"}}\n```";
        match parse_front_output(out, "ok").unwrap() {
            FrontDecision::Delegate { filler, request } => {
                assert_eq!(filler, None);
                assert_eq!(request.relevant_context_from_last_user_message, "");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_other_tool_becomes_delegation_with_raw_utterance() {
        let out = "Let me check.\n{\"tool\": \"findNearestStore\", \"args\": {\"zip_code\": \"98101\"}}";
        match parse_front_output(out, "nearest store to 98101?").unwrap() {
            FrontDecision::Delegate { filler, request } => {
                assert_eq!(filler.as_deref(), Some("Let me check."));
                assert_eq!(request.relevant_context_from_last_user_message, "nearest store to 98101?");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_bad_args_fall_back_to_utterance() {
        let out = "{\"tool\": \"getNextResponseFromSupervisor\", \"args\": {\"context\": \"x\"}}";
        match parse_front_output(out, "how long to bake?").unwrap() {
            FrontDecision::Delegate { request, .. } => {
                assert_eq!(request.relevant_context_from_last_user_message, "how long to bake?");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unparsable_tool_call_is_error() {
        assert!(matches!(
            parse_front_output("One sec. {\"tool\": getNextResponseFromSupervisor}", "x"),
            Err(AgentError::JsonParseError(_))
        ));
        assert!(matches!(
            parse_front_output("```json\n{not json}\n```", "x"),
            Err(AgentError::JsonParseError(_))
        ));
    }

    #[test]
    fn test_braces_in_plain_reply_are_not_a_call() {
        let d = parse_front_output("Sure {smiles}", "thanks").unwrap();
        assert_eq!(d, FrontDecision::Reply("Sure {smiles}".into()));
        let d = parse_front_output("Mix {1 cup} flour", "x").unwrap();
        assert_eq!(d, FrontDecision::Reply("Mix {1 cup} flour".into()));
    }
}
