//! Supervisor：委派入口、工具调用循环、固定指令

pub mod delegation;
pub mod loop_;
pub mod prompt;

pub use delegation::{
    delegation_tool_descriptor, DelegationOutcome, DelegationRequest, Supervisor,
    DELEGATION_TOOL_NAME, GENERIC_ERROR,
};
pub use loop_::{parse_arguments, run_tool_loop, LoopStats};
pub use prompt::{context_message, initial_request_body, SUPERVISOR_INSTRUCTIONS};
