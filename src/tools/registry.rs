//! 工具注册表
//!
//! 所有工具实现 Tool trait（name / description / parameters_schema / execute），由 ToolRegistry 按名注册与查找，
//! ToolExecutor 在调用时加超时并输出审计日志。未注册的工具名不会报错，统一解析为 `{"result": true}`。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 未知工具名的通用成功返回
pub fn unknown_tool_sentinel() -> Value {
    serde_json::json!({ "result": true })
}

/// 工具 trait：名称、描述（供模型理解）、参数 schema、异步执行（args 为 JSON）
#[async_trait]
pub trait Tool: Send + Sync {
    /// 工具名称（与推理端点返回的 function_call.name 对应）
    fn name(&self) -> &str;

    /// 工具描述（供模型理解功能）
    fn description(&self) -> &str;

    /// 参数 JSON Schema
    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {},
            "required": [],
            "additionalProperties": false
        })
    }

    /// 执行工具
    async fn execute(&self, args: Value) -> Result<Value, String>;
}

/// 随每次请求发送给推理端点的工具描述：`{"type": "function", name, description, parameters}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "function")]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// 注册表校验失败原因
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RegistryError {
    #[error("Duplicate tool name: {0}")]
    DuplicateName(String),
    #[error("Tool {tool} has an invalid parameter schema: {reason}")]
    InvalidSchema { tool: String, reason: String },
}

/// 工具注册表：按名称存储 Arc<dyn Tool>，保留注册顺序以保证描述列表稳定
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    order: Vec<String>,
    duplicates: Vec<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: impl Tool + 'static) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), Arc::new(tool)).is_some() {
            self.duplicates.push(name);
        } else {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// 解析一次工具调用；未知工具名返回通用成功哨兵而不是错误
    pub async fn execute(&self, name: &str, args: Value) -> Result<Value, String> {
        match self.tools.get(name) {
            Some(tool) => tool.execute(args).await,
            None => {
                tracing::warn!(tool = %name, "unknown tool requested, returning sentinel");
                Ok(unknown_tool_sentinel())
            }
        }
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.order.clone()
    }

    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| ToolDescriptor {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                parameters: tool.parameters_schema(),
            })
            .collect()
    }

    /// 启动时校验：名称唯一；参数 schema 为 object，列出 required，且禁止额外字段
    pub fn validate(&self) -> Result<(), RegistryError> {
        if let Some(dup) = self.duplicates.first() {
            return Err(RegistryError::DuplicateName(dup.clone()));
        }
        for d in self.descriptors() {
            let invalid = |reason: &str| RegistryError::InvalidSchema {
                tool: d.name.clone(),
                reason: reason.to_string(),
            };
            if d.parameters.get("type").and_then(Value::as_str) != Some("object") {
                return Err(invalid("type must be \"object\""));
            }
            let properties = d
                .parameters
                .get("properties")
                .and_then(Value::as_object)
                .ok_or_else(|| invalid("missing properties"))?;
            let required = d
                .parameters
                .get("required")
                .and_then(Value::as_array)
                .ok_or_else(|| invalid("missing required list"))?;
            if required.is_empty() {
                return Err(invalid("required list is empty"));
            }
            for field in required {
                let field = field.as_str().unwrap_or_default();
                if !properties.contains_key(field) {
                    return Err(invalid(&format!("required field {field} is not declared")));
                }
            }
            if d.parameters.get("additionalProperties") != Some(&Value::Bool(false)) {
                return Err(invalid("additionalProperties must be false"));
            }
        }
        Ok(())
    }
}
