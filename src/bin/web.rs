//! Mom as Sous-Chef Web UI
//!
//! 启动: cargo run --bin souschef-web --features web
//! 浏览器访问 http://127.0.0.1:8080 （落地页），/app 为对话页

#![cfg(feature = "web")]

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::RwLock;

use souschef::agent::{create_agent_components, process_message, start_session, AgentComponents};
use souschef::config::{load_config, AppConfig};
use souschef::core::{CookingSession, SessionStore};
use souschef::front::GREETING;
use souschef::memory::{Message, TranscriptItem};
use souschef::observability::{self, Breadcrumb, BreadcrumbLog};
use souschef::recipe::{probe_url, ProbeReport, Recipe, ScrapeError};
use souschef::tools::ToolDescriptor;

struct AppState {
    components: Arc<AgentComponents>,
    sessions: Arc<RwLock<SessionStore>>,
}

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

fn scrape_error(e: ScrapeError) -> ApiError {
    tracing::warn!(error = %e, "recipe scrape failed");
    let status = StatusCode::from_u16(e.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    api_error(status, e.to_string())
}

#[derive(Debug, Deserialize)]
struct UrlRequest {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SessionRequest {
    #[serde(default)]
    recipe: Option<Recipe>,
}

#[derive(Debug, Serialize)]
struct SessionResponse {
    session_id: String,
    greeting: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    recipe_title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: String,
    #[serde(default)]
    session_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    session_id: String,
    reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    filler: Option<String>,
    delegated: bool,
    breadcrumbs: Vec<Breadcrumb>,
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    session_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct HistoryResponse {
    session_id: String,
    items: Vec<TranscriptItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recipe: Option<Recipe>,
}

#[derive(Debug, Deserialize)]
struct ClearSessionRequest {
    #[serde(default)]
    session_id: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    observability::init();

    let cfg: AppConfig = load_config(None).unwrap_or_default();
    let components = create_agent_components(&cfg)?;
    tracing::info!(
        tools = ?components.supervisor.executor().tool_names(),
        offline = components.offline,
        "agent components ready"
    );

    let state = Arc::new(AppState {
        components: Arc::new(components),
        sessions: Arc::new(RwLock::new(SessionStore::new())),
    });

    let app = Router::new()
        .route("/", get(index))
        .route("/app", get(chat_page))
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/scrape-recipe", post(api_scrape_recipe))
        .route("/api/test-scrape", post(api_test_scrape))
        .route("/api/recipe/manual", post(api_recipe_manual))
        .route("/api/recipe/plaintext", post(api_recipe_plaintext))
        .route("/api/session", post(api_session_create))
        .route("/api/chat", post(api_chat))
        .route("/api/history", get(api_history))
        .route("/api/session/clear", post(api_session_clear))
        .route("/api/tools", get(api_tools_list))
        .with_state(state);

    let addr: std::net::SocketAddr = std::env::var("SOUSCHEF_WEB_BIND")
        .ok()
        .unwrap_or_else(|| cfg.web.bind.clone())
        .parse()?;
    tracing::info!("Sous-Chef Web UI: http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

async fn chat_page() -> Html<&'static str> {
    Html(include_str!("../../static/chat.html"))
}

/// POST /api/scrape-recipe：抓取并提取菜谱
async fn api_scrape_recipe(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UrlRequest>,
) -> Result<Json<Recipe>, ApiError> {
    let url = req.url.unwrap_or_default();
    tracing::info!(url = %url, "scrape recipe");
    let recipe = state.components.scraper.scrape(&url).await.map_err(scrape_error)?;
    Ok(Json(recipe))
}

/// POST /api/test-scrape：抓取诊断
async fn api_test_scrape(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UrlRequest>,
) -> Result<Json<ProbeReport>, ApiError> {
    let url = req.url.unwrap_or_default();
    let report = probe_url(&state.components.scraper, &url)
        .await
        .map_err(scrape_error)?;
    Ok(Json(report))
}

/// POST /api/recipe/manual：规范化手动录入的菜谱
async fn api_recipe_manual(Json(recipe): Json<Recipe>) -> Result<Json<Recipe>, ApiError> {
    let recipe = recipe.normalized();
    if !recipe.is_complete() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Title, at least one ingredient and at least one instruction are required",
        ));
    }
    Ok(Json(recipe))
}

/// POST /api/recipe/plaintext：菜谱纯文本
async fn api_recipe_plaintext(Json(recipe): Json<Recipe>) -> Json<Value> {
    Json(json!({ "plaintext": recipe.to_plaintext() }))
}

/// POST /api/session：新建会话（可带菜谱），返回问候语
async fn api_session_create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SessionRequest>,
) -> Json<SessionResponse> {
    let recipe = req.recipe.map(Recipe::normalized);
    let recipe_title = recipe.as_ref().map(|r| r.title.clone());
    let (session, greeting) = start_session(&state.components, recipe);
    let session_id = session.id.clone();
    state.sessions.write().await.insert(session);
    tracing::info!(session_id = %session_id, recipe = ?recipe_title, "session started");
    Json(SessionResponse {
        session_id,
        greeting,
        recipe_title,
    })
}

/// POST /api/chat：处理一轮对话；会话在处理期间从表中取出，结束后放回。
/// 同一会话已有一轮在处理时返回 409
async fn api_chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = req.message.trim();
    if message.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "message is required"));
    }

    let session_id = req
        .session_id
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let checked_out = state.sessions.write().await.check_out(&session_id, || {
        let mut s = CookingSession::with_id(session_id.clone(), None);
        s.transcript.push(Message::assistant(GREETING));
        s
    });
    let mut session = checked_out.map_err(|e| {
        tracing::warn!(session_id = %session_id, "chat turn rejected, session busy");
        api_error(StatusCode::CONFLICT, e.to_string())
    })?;

    let log = BreadcrumbLog::new();
    let result = process_message(&state.components, &mut session, message, Some(&log)).await;

    state.sessions.write().await.check_in(session);

    let turn = result.map_err(|e| {
        tracing::error!(session_id = %session_id, error = %e, "chat turn failed");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    Ok(Json(ChatResponse {
        session_id,
        reply: turn.reply,
        filler: turn.filler,
        delegated: turn.delegated,
        breadcrumbs: log.take(),
    }))
}

/// GET /api/history?session_id=：会话记录（含委派调用与结果）
async fn api_history(
    State(state): State<Arc<AppState>>,
    Query(q): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let session_id = q
        .session_id
        .filter(|s| !s.is_empty())
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "session_id is required"))?;
    let sessions = state.sessions.read().await;
    if sessions.is_busy(&session_id) {
        return Err(api_error(StatusCode::CONFLICT, "session is busy with another turn"));
    }
    let session = sessions
        .get(&session_id)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "session not found"))?;
    Ok(Json(HistoryResponse {
        session_id: session_id.clone(),
        items: session.transcript.items().to_vec(),
        recipe: session.recipe.clone(),
    }))
}

/// POST /api/session/clear：清空对话（保留菜谱），重新问候
async fn api_session_clear(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ClearSessionRequest>,
) -> Result<Json<Value>, ApiError> {
    let session_id = match req.session_id.filter(|s| !s.is_empty()) {
        Some(s) => s,
        None => return Err(api_error(StatusCode::BAD_REQUEST, "session_id is required")),
    };
    let mut sessions = state.sessions.write().await;
    if sessions.is_busy(&session_id) {
        return Err(api_error(StatusCode::CONFLICT, "session is busy with another turn"));
    }
    match sessions.get_mut(&session_id) {
        Some(session) => {
            session.reset();
            session.transcript.push(Message::assistant(GREETING));
            Ok(Json(json!({ "session_id": session_id, "greeting": GREETING })))
        }
        None => Err(api_error(StatusCode::NOT_FOUND, "session not found")),
    }
}

/// GET /api/tools：Supervisor 可调用的工具描述
async fn api_tools_list(State(state): State<Arc<AppState>>) -> Json<Vec<ToolDescriptor>> {
    Json(state.components.tool_descriptors())
}
