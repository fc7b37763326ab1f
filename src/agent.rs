//! Headless Agent 运行时
//!
//! 供终端与 HTTP 前端调用的无界面逻辑：
//! create_agent_components 按配置构建前台模型、Supervisor 推理端点与工具执行器，
//! start_session 创建会话并给出问候语，process_message 处理单条用户输入。

use std::sync::Arc;

use crate::config::{openai_api_key, AppConfig};
use crate::core::{AgentError, CookingSession};
use crate::front::{FrontAgent, RuleBasedFrontClient, TurnReply, GREETING};
use crate::llm::{HttpResponsesEndpoint, LlmClient, OfflineEndpoint, OpenAiClient, ReasoningEndpoint};
use crate::memory::Message;
use crate::observability::Breadcrumbs;
use crate::recipe::{Recipe, RecipeScraper};
use crate::supervisor::Supervisor;
use crate::tools::{supervisor_registry, ToolDescriptor, ToolExecutor};

/// 预构建的 Agent 组件：前台 Agent、Supervisor、菜谱抓取器，可多会话共享
pub struct AgentComponents {
    pub front: FrontAgent,
    pub supervisor: Supervisor,
    pub scraper: RecipeScraper,
    /// 是否使用本地规则 / 离线端点
    pub offline: bool,
}

type Backends = (Arc<dyn LlmClient>, Arc<dyn ReasoningEndpoint>, bool);

/// 按配置选择前台模型与推理端点：有 OPENAI_API_KEY 且未设置 offline 时走 OpenAI，否则离线
fn create_backends(cfg: &AppConfig) -> Result<Backends, AgentError> {
    let backends: Backends = match openai_api_key().filter(|_| !cfg.llm.offline) {
        Some(key) => {
            tracing::info!(
                front_model = %cfg.llm.front_model,
                supervisor_model = %cfg.supervisor.model,
                "Using OpenAI backends"
            );
            let front = OpenAiClient::new(cfg.llm.base_url.as_deref(), &cfg.llm.front_model, &key);
            let endpoint = HttpResponsesEndpoint::new(
                cfg.supervisor.endpoint.clone(),
                key,
                cfg.supervisor.request_timeout_secs,
            )?;
            (Arc::new(front), Arc::new(endpoint), false)
        }
        None => {
            tracing::warn!("No API key set or offline mode, using rule-based front agent and offline supervisor");
            (Arc::new(RuleBasedFrontClient), Arc::new(OfflineEndpoint), true)
        }
    };
    Ok(backends)
}

/// 创建 Agent 组件；工具 schema 在此校验一次，不合法即返回 ConfigError
pub fn create_agent_components(cfg: &AppConfig) -> Result<AgentComponents, AgentError> {
    let registry = supervisor_registry();
    registry
        .validate()
        .map_err(|e| AgentError::ConfigError(e.to_string()))?;

    let (llm, endpoint, offline) = create_backends(cfg)?;
    with_backends(cfg, llm, endpoint, offline, ToolExecutor::new(registry, cfg.tools.tool_timeout_secs))
}

/// 用给定后端组装组件（测试注入 Mock 时使用）
pub fn with_backends(
    cfg: &AppConfig,
    llm: Arc<dyn LlmClient>,
    endpoint: Arc<dyn ReasoningEndpoint>,
    offline: bool,
    executor: ToolExecutor,
) -> Result<AgentComponents, AgentError> {
    let scraper = RecipeScraper::from_config(&cfg.scraper)
        .map_err(|e| AgentError::ConfigError(e.to_string()))?;
    Ok(AgentComponents {
        front: FrontAgent::new(llm),
        supervisor: Supervisor::new(
            endpoint,
            executor,
            cfg.supervisor.model.clone(),
            cfg.supervisor.max_rounds,
        ),
        scraper,
        offline,
    })
}

impl AgentComponents {
    /// Supervisor 可调用的工具描述（Web 端展示用）
    pub fn tool_descriptors(&self) -> Vec<ToolDescriptor> {
        self.supervisor.executor().descriptors()
    }
}

/// 新建会话：问候语作为第一条 assistant 消息写入记录
pub fn start_session(components: &AgentComponents, recipe: Option<Recipe>) -> (CookingSession, String) {
    let mut session = CookingSession::new(recipe);
    session.transcript.push(Message::assistant(GREETING));
    (session, GREETING.to_string())
}

/// 处理单条用户消息：前台决策，必要时委派 Supervisor，返回本轮回复
pub async fn process_message(
    components: &AgentComponents,
    session: &mut CookingSession,
    user_input: &str,
    breadcrumbs: Option<&dyn Breadcrumbs>,
) -> Result<TurnReply, AgentError> {
    components
        .front
        .handle_turn(&components.supervisor, session, user_input, breadcrumbs)
        .await
}
