//! Supervisor 工具调用循环
//!
//! Dispatch -> Inspect -> (Resolve -> Dispatch)* -> Done；任何一步出错即返回 Err（Failed）。
//! 同一轮的多个工具调用按端点给出的顺序逐个解析，全部追加到请求体后才发起下一次往返。

use serde_json::Value;

use crate::core::AgentError;
use crate::llm::responses::{FunctionCall, InputItem, ReasoningEndpoint, RequestBody};
use crate::observability::{emit, Breadcrumbs};
use crate::tools::ToolExecutor;

/// 循环结束时的统计（用于日志）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopStats {
    pub round_trips: usize,
    pub tool_calls: usize,
}

/// 驱动请求体直到端点给出不含工具调用的响应，返回其文本
///
/// `max_rounds` 为往返次数上限：第 `max_rounds` 次往返仍请求工具时返回 RoundLimitExceeded。
pub async fn run_tool_loop(
    endpoint: &dyn ReasoningEndpoint,
    executor: &ToolExecutor,
    body: &mut RequestBody,
    max_rounds: usize,
    breadcrumbs: Option<&dyn Breadcrumbs>,
) -> Result<(String, LoopStats), AgentError> {
    let mut stats = LoopStats::default();

    loop {
        stats.round_trips += 1;
        tracing::debug!(round = stats.round_trips, input_len = body.input.len(), "supervisor dispatch");
        let reply = endpoint.respond(body).await?;

        if let Some(message) = reply.error_message() {
            return Err(AgentError::EndpointReportedError(message));
        }

        let calls: Vec<FunctionCall> = reply.function_calls().into_iter().cloned().collect();
        if calls.is_empty() {
            return Ok((reply.final_text(), stats));
        }

        if stats.round_trips >= max_rounds.max(1) {
            return Err(AgentError::RoundLimitExceeded(max_rounds));
        }

        resolve_calls(executor, body, &calls, breadcrumbs).await?;
        stats.tool_calls += calls.len();
    }
}

/// 解析参数；空字符串按 `{}` 处理
pub fn parse_arguments(call: &FunctionCall) -> Result<Value, AgentError> {
    let raw = if call.arguments.trim().is_empty() {
        "{}"
    } else {
        call.arguments.as_str()
    };
    serde_json::from_str(raw).map_err(|e| AgentError::ToolArguments {
        tool: call.name.clone(),
        reason: e.to_string(),
    })
}

/// Resolve：先校验本轮全部参数，再按顺序执行并成对追加 function_call / function_call_output
async fn resolve_calls(
    executor: &ToolExecutor,
    body: &mut RequestBody,
    calls: &[FunctionCall],
    breadcrumbs: Option<&dyn Breadcrumbs>,
) -> Result<(), AgentError> {
    let parsed = calls
        .iter()
        .map(|call| parse_arguments(call).map(|args| (call, args)))
        .collect::<Result<Vec<_>, _>>()?;

    for (call, args) in parsed {
        emit(
            breadcrumbs,
            &format!("[supervisorAgent] function call: {}", call.name),
            &args,
        );
        let result = executor.execute(&call.name, args).await?;
        emit(
            breadcrumbs,
            &format!("[supervisorAgent] function call result: {}", call.name),
            &result,
        );

        let output = serde_json::to_string(&result)
            .map_err(|e| AgentError::JsonParseError(e.to_string()))?;
        body.input.push(InputItem::FunctionCall {
            call_id: call.call_id.clone(),
            name: call.name.clone(),
            arguments: call.arguments.clone(),
        });
        body.input.push(InputItem::FunctionCallOutput {
            call_id: call.call_id.clone(),
            output,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(args: &str) -> FunctionCall {
        FunctionCall {
            call_id: "call_1".into(),
            name: "lookupPolicyDocument".into(),
            arguments: args.into(),
        }
    }

    #[test]
    fn test_empty_arguments_are_object() {
        assert_eq!(parse_arguments(&call("")).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_malformed_arguments() {
        let err = parse_arguments(&call("{\"topic\": ")).unwrap_err();
        assert!(matches!(err, AgentError::ToolArguments { ref tool, .. } if tool == "lookupPolicyDocument"));
    }
}
