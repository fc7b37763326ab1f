//! Mom as Sous-Chef - 烹饪助手
//!
//! 模块划分：
//! - **agent**: 无头 Agent 运行时（供终端 / HTTP 调用）
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **core**: 错误类型与烹饪会话
//! - **front**: 前台 Agent（允许列表、填充语、委派）
//! - **llm**: 前台 Chat Completion 客户端、Supervisor 推理端点（Responses API）与 Mock
//! - **memory**: 会话内对话记录
//! - **observability**: 日志初始化与面包屑钩子
//! - **recipe**: 菜谱模型、网页抓取与诊断
//! - **supervisor**: 委派入口与工具调用循环
//! - **tools**: 工具注册表、schema、执行器与示例数据

pub mod agent;
pub mod config;
pub mod core;
pub mod front;
pub mod llm;
pub mod memory;
pub mod observability;
pub mod recipe;
pub mod supervisor;
pub mod tools;
