//! Supervisor 可调用的三个只读查询工具
//!
//! 每个工具由「参数类型 + 固定数据」组成：参数类型在编译期确定 schema，
//! 执行时仅用于校验（失败只记日志），返回值始终是对应的示例数据。

use std::marker::PhantomData;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::tools::fixtures;
use crate::tools::schema::parameters_schema_for;
use crate::tools::{Tool, ToolRegistry};

pub const LOOKUP_POLICY_DOCUMENT: &str = "lookupPolicyDocument";
pub const GET_USER_ACCOUNT_INFO: &str = "getUserAccountInfo";
pub const FIND_NEAREST_STORE: &str = "findNearestStore";

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PolicyLookupArgs {
    /// The topic or keyword to search for in cooking guides, safety guidelines, or technique references.
    pub topic: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AccountLookupArgs {
    /// Formatted as '(xxx) xxx-xxxx'. MUST be provided by the user, never a null or empty string.
    pub phone_number: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct StoreLookupArgs {
    /// The customer's 5-digit zip code.
    pub zip_code: String,
}

/// 返回固定数据的工具：A 为参数类型，fixture 为数据来源
pub struct FixtureTool<A> {
    name: &'static str,
    description: &'static str,
    fixture: fn() -> Value,
    _args: PhantomData<fn() -> A>,
}

impl<A> FixtureTool<A> {
    pub fn new(name: &'static str, description: &'static str, fixture: fn() -> Value) -> Self {
        Self {
            name,
            description,
            fixture,
            _args: PhantomData,
        }
    }
}

#[async_trait]
impl<A> Tool for FixtureTool<A>
where
    A: DeserializeOwned + JsonSchema + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn parameters_schema(&self) -> Value {
        parameters_schema_for::<A>()
    }

    async fn execute(&self, args: Value) -> Result<Value, String> {
        if let Err(e) = serde_json::from_value::<A>(args) {
            tracing::warn!(tool = %self.name, error = %e, "arguments do not match schema, resolving anyway");
        }
        Ok((self.fixture)())
    }
}

pub fn policy_lookup_tool() -> FixtureTool<PolicyLookupArgs> {
    FixtureTool::new(
        LOOKUP_POLICY_DOCUMENT,
        "Tool to look up cooking tips, techniques, and safety guidelines by topic or keyword.",
        fixtures::policy_docs,
    )
}

pub fn account_lookup_tool() -> FixtureTool<AccountLookupArgs> {
    FixtureTool::new(
        GET_USER_ACCOUNT_INFO,
        "Tool to get user cooking preferences and experience level. This only reads user information, and doesn't provide the ability to modify or delete any values.",
        fixtures::account_info,
    )
}

pub fn store_lookup_tool() -> FixtureTool<StoreLookupArgs> {
    FixtureTool::new(
        FIND_NEAREST_STORE,
        "Tool to find the nearest grocery store or cooking supply store to a customer, given their zip code.",
        fixtures::store_locations,
    )
}

/// Supervisor 默认工具集
pub fn supervisor_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(policy_lookup_tool());
    registry.register(account_lookup_tool());
    registry.register(store_lookup_tool());
    registry
}
