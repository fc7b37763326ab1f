//! 工具参数 JSON Schema 生成（schemars 自动生成）
//!
//! 参数结构体加 `#[serde(deny_unknown_fields)]` 后，schemars 会输出 `additionalProperties: false`；
//! 这里再去掉 `$schema` / `title` 等顶层元数据，得到可直接放入 tool 描述的 parameters。

use schemars::{schema_for, JsonSchema};
use serde_json::Value;

/// 为参数类型 T 生成 function-calling 用的 parameters schema
pub fn parameters_schema_for<T: JsonSchema>() -> Value {
    let schema = schema_for!(T);
    let mut value = serde_json::to_value(&schema).unwrap_or_else(|_| serde_json::json!({}));
    if let Some(obj) = value.as_object_mut() {
        obj.remove("$schema");
        obj.remove("title");
        if obj
            .get("definitions")
            .and_then(Value::as_object)
            .is_some_and(|d| d.is_empty())
        {
            obj.remove("definitions");
        }
    }
    value
}
