//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `SOUSCHEF__*` 覆盖（双下划线表示嵌套，如 `SOUSCHEF__SUPERVISOR__MAX_ROUNDS=4`）。
//! API Key 不进配置文件，统一读取 `OPENAI_API_KEY`。

use std::path::PathBuf;

use serde::Deserialize;

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSection,
    #[serde(default)]
    pub llm: LlmSection,
    #[serde(default)]
    pub supervisor: SupervisorSection,
    #[serde(default)]
    pub tools: ToolsSection,
    #[serde(default)]
    pub scraper: ScraperSection,
    #[serde(default)]
    pub web: WebSection,
}

/// [app] 段：应用名
#[derive(Debug, Clone, Deserialize)]
pub struct AppSection {
    #[serde(default = "default_app_name")]
    pub name: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: default_app_name(),
        }
    }
}

fn default_app_name() -> String {
    "Mom as Sous-Chef".to_string()
}

/// [llm] 段：前台 Agent 使用的 Chat Completion 模型
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSection {
    #[serde(default = "default_front_model")]
    pub front_model: String,
    /// OpenAI 兼容端点，未设置时使用官方地址
    pub base_url: Option<String>,
    /// 为 true 时即使有 API Key 也使用本地规则前台（离线演示）
    #[serde(default)]
    pub offline: bool,
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            front_model: default_front_model(),
            base_url: None,
            offline: false,
        }
    }
}

fn default_front_model() -> String {
    "gpt-4o-mini".to_string()
}

/// [supervisor] 段：推理端点、模型、最大往返次数
#[derive(Debug, Clone, Deserialize)]
pub struct SupervisorSection {
    #[serde(default = "default_supervisor_model")]
    pub model: String,
    #[serde(default = "default_responses_endpoint")]
    pub endpoint: String,
    /// 单次委派内允许的最大往返次数，超出即视为失败
    #[serde(default = "default_max_rounds")]
    pub max_rounds: usize,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for SupervisorSection {
    fn default() -> Self {
        Self {
            model: default_supervisor_model(),
            endpoint: default_responses_endpoint(),
            max_rounds: default_max_rounds(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_supervisor_model() -> String {
    "gpt-4.1".to_string()
}

fn default_responses_endpoint() -> String {
    "https://api.openai.com/v1/responses".to_string()
}

fn default_max_rounds() -> usize {
    8
}

fn default_request_timeout() -> u64 {
    60
}

/// [tools] 段：单次工具解析超时
#[derive(Debug, Clone, Deserialize)]
pub struct ToolsSection {
    #[serde(default = "default_tool_timeout_secs")]
    pub tool_timeout_secs: u64,
}

impl Default for ToolsSection {
    fn default() -> Self {
        Self {
            tool_timeout_secs: default_tool_timeout_secs(),
        }
    }
}

fn default_tool_timeout_secs() -> u64 {
    10
}

/// [scraper] 段：抓取菜谱页面的超时与 User-Agent
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperSection {
    #[serde(default = "default_scraper_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ScraperSection {
    fn default() -> Self {
        Self {
            timeout_secs: default_scraper_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_scraper_timeout() -> u64 {
    20
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string()
}

/// [web] 段：监听地址
#[derive(Debug, Clone, Deserialize)]
pub struct WebSection {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebSection {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

/// 从 config 目录加载配置，环境变量 SOUSCHEF__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 SOUSCHEF__*（双下划线表示嵌套键）
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("SOUSCHEF")
            .separator("__")
            .try_parsing(true),
    );

    let c = builder.build()?;
    c.try_deserialize()
}

/// 读取 OpenAI API Key（空字符串视为未设置）
pub fn openai_api_key() -> Option<String> {
    std::env::var("OPENAI_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty())
}
