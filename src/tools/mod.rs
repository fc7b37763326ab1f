//! 工具层：注册表、schema 生成、执行器、示例数据与三个只读查询工具

pub mod executor;
pub mod fixtures;
pub mod lookup;
pub mod registry;
pub mod schema;

pub use executor::ToolExecutor;
pub use lookup::{
    supervisor_registry, AccountLookupArgs, FixtureTool, PolicyLookupArgs, StoreLookupArgs,
    FIND_NEAREST_STORE, GET_USER_ACCOUNT_INFO, LOOKUP_POLICY_DOCUMENT,
};
pub use registry::{unknown_tool_sentinel, RegistryError, Tool, ToolDescriptor, ToolRegistry};
pub use schema::parameters_schema_for;
