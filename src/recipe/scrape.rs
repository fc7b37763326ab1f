//! 菜谱抓取：GET 页面后先找 JSON-LD（schema.org Recipe），找不到再用正则按常见 class 名兜底
//!
//! 请求带浏览器风格的 User-Agent 与 Accept 头；提取出的文本片段经 html2text 去标签、解实体。

use std::sync::LazyLock;

use html2text::from_read;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, UPGRADE_INSECURE_REQUESTS};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::config::ScraperSection;
use crate::recipe::Recipe;

/// 抓取错误；Display 文本直接返回给前端
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("URL is required")]
    MissingUrl,

    #[error("Failed to fetch the URL. Please check if the URL is valid and accessible. ({0})")]
    Fetch(String),

    #[error("Failed to fetch URL: HTTP {0}. The website may be blocking requests or the URL may be invalid.")]
    HttpStatus(u16),

    #[error("Could not extract recipe data from this URL. The website may not be a recipe site or may use an unsupported format. Please try a different recipe website.")]
    NoRecipeData,

    #[error("Scraping error: {0}")]
    Body(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl ScrapeError {
    /// 对应的 HTTP 状态码：请求方问题 400，其余 500
    pub fn http_status(&self) -> u16 {
        match self {
            ScrapeError::MissingUrl | ScrapeError::HttpStatus(_) | ScrapeError::NoRecipeData => 400,
            ScrapeError::Fetch(_) | ScrapeError::Body(_) | ScrapeError::Client(_) => 500,
        }
    }
}

/// 菜谱抓取器（内部持有一个复用的 reqwest Client）
#[derive(Clone)]
pub struct RecipeScraper {
    client: Client,
}

impl RecipeScraper {
    /// 构建抓取器；User-Agent 非法等导致 Client 构建失败时返回 ScrapeError::Client
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScrapeError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .user_agent(user_agent.to_string())
            .default_headers(headers)
            .build()
            .map_err(|e| ScrapeError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn from_config(cfg: &ScraperSection) -> Result<Self, ScrapeError> {
        Self::new(cfg.timeout_secs, &cfg.user_agent)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// 抓取页面 HTML；非 2xx 返回 HttpStatus
    pub async fn fetch_html(&self, url: &str) -> Result<String, ScrapeError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ScrapeError::MissingUrl);
        }
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScrapeError::Fetch(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "recipe page fetch failed");
            return Err(ScrapeError::HttpStatus(status.as_u16()));
        }
        let mut body = resp.text().await.map_err(|e| ScrapeError::Body(e.to_string()))?;
        if body.starts_with('\u{FEFF}') {
            body = body['\u{FEFF}'.len_utf8()..].to_string();
        }
        tracing::info!(url = %url, html_len = body.len(), "fetched recipe page");
        Ok(body)
    }

    /// 抓取并提取菜谱
    pub async fn scrape(&self, url: &str) -> Result<Recipe, ScrapeError> {
        let html = self.fetch_html(url).await?;
        extract_recipe(&html)
    }
}

/// 从 HTML 提取菜谱：JSON-LD 优先，正则兜底；兜底结果缺标题 / 食材 / 步骤时返回 NoRecipeData
pub fn extract_recipe(html: &str) -> Result<Recipe, ScrapeError> {
    if let Some(node) = find_json_ld_recipe(html) {
        let recipe = recipe_from_json_ld(&node);
        tracing::info!(
            title = %recipe.title,
            ingredients = recipe.ingredients.len(),
            instructions = recipe.instructions.len(),
            "extracted recipe from structured data"
        );
        return Ok(recipe);
    }

    tracing::debug!("no structured data found, trying pattern matching");
    let recipe = recipe_from_patterns(html);
    if !recipe.is_complete() {
        tracing::info!(
            title = %recipe.title,
            ingredients = recipe.ingredients.len(),
            instructions = recipe.instructions.len(),
            "failed to extract recipe data"
        );
        return Err(ScrapeError::NoRecipeData);
    }
    Ok(recipe)
}

// ---------- JSON-LD ----------

static JSON_LD_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script[^>]*type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#).ok()
});

/// 遍历所有 ld+json 脚本，返回第一个 @type 含 Recipe 的节点
pub fn find_json_ld_recipe(html: &str) -> Option<Value> {
    let re = JSON_LD_RE.as_ref()?;
    for cap in re.captures_iter(html) {
        let Some(raw) = cap.get(1) else { continue };
        match serde_json::from_str::<Value>(raw.as_str().trim()) {
            Ok(v) => {
                if let Some(node) = find_recipe_node(&v) {
                    return Some(node.clone());
                }
            }
            Err(e) => tracing::debug!(error = %e, "skipping unparsable JSON-LD block"),
        }
    }
    None
}

fn is_recipe_type(node: &Value) -> bool {
    match node.get("@type") {
        Some(Value::String(t)) => t == "Recipe",
        Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some("Recipe")),
        _ => false,
    }
}

fn find_recipe_node(v: &Value) -> Option<&Value> {
    match v {
        Value::Array(items) => items.iter().find_map(find_recipe_node),
        Value::Object(map) => {
            if is_recipe_type(v) {
                return Some(v);
            }
            map.get("@graph").and_then(find_recipe_node)
        }
        _ => None,
    }
}

fn recipe_from_json_ld(node: &Value) -> Recipe {
    let text_field = |key: &str| node.get(key).and_then(scalar_text).map(|s| clean_fragment(&s));

    let ingredients = node
        .get("recipeIngredient")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(scalar_text)
                .map(|s| clean_fragment(&s))
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let mut instructions = Vec::new();
    if let Some(steps) = node.get("recipeInstructions") {
        collect_instructions(steps, &mut instructions);
    }

    Recipe {
        title: text_field("name").filter(|s| !s.is_empty()).unwrap_or_else(|| "Recipe".to_string()),
        description: text_field("description").unwrap_or_default(),
        ingredients,
        instructions,
        prep_time: text_field("prepTime"),
        cook_time: text_field("cookTime"),
        servings: node.get("recipeYield").and_then(first_scalar),
        image: node.get("image").and_then(image_url),
    }
}

/// 步骤可以是字符串、{text}、或 HowToSection{itemListElement}
fn collect_instructions(v: &Value, out: &mut Vec<String>) {
    match v {
        Value::String(s) => {
            let s = clean_fragment(s);
            if !s.is_empty() {
                out.push(s);
            }
        }
        Value::Array(items) => items.iter().for_each(|item| collect_instructions(item, out)),
        Value::Object(map) => {
            if let Some(text) = map.get("text").and_then(Value::as_str) {
                let s = clean_fragment(text);
                if !s.is_empty() {
                    out.push(s);
                }
            } else if let Some(list) = map.get("itemListElement") {
                collect_instructions(list, out);
            }
        }
        _ => {}
    }
}

fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn first_scalar(v: &Value) -> Option<String> {
    match v {
        Value::Array(items) => items.iter().find_map(scalar_text),
        other => scalar_text(other),
    }
}

/// image 可为字符串、{url} 或它们的数组
fn image_url(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map.get("url").and_then(Value::as_str).map(str::to_string),
        Value::Array(items) => items.iter().find_map(image_url),
        _ => None,
    }
}

// ---------- 正则兜底 ----------

const TITLE_SOURCES: &[&str] = &[
    r#"(?is)<h1[^>]*class="[^"]*title[^"]*"[^>]*>([^<]*)</h1>"#,
    r#"(?is)<h1[^>]*class="[^"]*recipe[^"]*"[^>]*>([^<]*)</h1>"#,
    r#"(?is)<h1[^>]*>([^<]*)</h1>"#,
];

const DESCRIPTION_SOURCES: &[&str] = &[
    r#"(?is)<meta[^>]*name="description"[^>]*content="([^"]*)"[^>]*>"#,
    r#"(?is)<meta[^>]*property="og:description"[^>]*content="([^"]*)"[^>]*>"#,
];

const INGREDIENT_SOURCES: &[&str] = &[
    r#"(?is)<li[^>]*class="[^"]*ingredient[^"]*"[^>]*>([^<]*)</li>"#,
    r#"(?is)<span[^>]*class="[^"]*ingredient[^"]*"[^>]*>([^<]*)</span>"#,
    r#"(?is)<div[^>]*class="[^"]*ingredient[^"]*"[^>]*>([^<]*)</div>"#,
];

const INSTRUCTION_SOURCES: &[&str] = &[
    r#"(?is)<li[^>]*class="[^"]*instruction[^"]*"[^>]*>([^<]*)</li>"#,
    r#"(?is)<li[^>]*class="[^"]*step[^"]*"[^>]*>([^<]*)</li>"#,
    r#"(?is)<p[^>]*class="[^"]*instruction[^"]*"[^>]*>([^<]*)</p>"#,
    r#"(?is)<div[^>]*class="[^"]*instruction[^"]*"[^>]*>([^<]*)</div>"#,
];

const IMAGE_SOURCES: &[&str] = &[
    r#"(?is)<img[^>]*class="[^"]*recipe[^"]*"[^>]*src="([^"]*)"[^>]*>"#,
    r#"(?is)<meta[^>]*property="og:image"[^>]*content="([^"]*)"[^>]*>"#,
];

static TITLE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| compile_all(TITLE_SOURCES));
static DESCRIPTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| compile_all(DESCRIPTION_SOURCES));
static INGREDIENT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| compile_all(INGREDIENT_SOURCES));
static INSTRUCTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| compile_all(INSTRUCTION_SOURCES));
static IMAGE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| compile_all(IMAGE_SOURCES));

fn compile_all(sources: &[&str]) -> Vec<Regex> {
    sources
        .iter()
        .filter_map(|p| match Regex::new(p) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::error!(pattern = %p, error = %e, "invalid recipe pattern skipped");
                None
            }
        })
        .collect()
}

fn recipe_from_patterns(html: &str) -> Recipe {
    Recipe {
        title: first_match(&TITLE_PATTERNS, html).unwrap_or_default(),
        description: first_match(&DESCRIPTION_PATTERNS, html).unwrap_or_default(),
        ingredients: first_non_empty_list(&INGREDIENT_PATTERNS, html),
        instructions: first_non_empty_list(&INSTRUCTION_PATTERNS, html),
        prep_time: None,
        cook_time: None,
        servings: None,
        image: first_match(&IMAGE_PATTERNS, html),
    }
}

fn first_match(patterns: &[Regex], html: &str) -> Option<String> {
    patterns.iter().find_map(|re| {
        let text = clean_fragment(re.captures(html)?.get(1)?.as_str());
        (!text.is_empty()).then_some(text)
    })
}

fn first_non_empty_list(patterns: &[Regex], html: &str) -> Vec<String> {
    patterns
        .iter()
        .map(|re| {
            re.captures_iter(html)
                .filter_map(|cap| cap.get(1).map(|m| clean_fragment(m.as_str())))
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
        })
        .find(|items| !items.is_empty())
        .unwrap_or_default()
}

/// 去标签、解 HTML 实体、折叠空白
fn clean_fragment(s: &str) -> String {
    if !s.contains('<') && !s.contains('&') {
        return collapse_whitespace(s);
    }
    match from_read(s.as_bytes(), 10_000) {
        Ok(text) => collapse_whitespace(&text),
        Err(_) => collapse_whitespace(s),
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_ld_recipe() {
        let html = r#"<html><head>
<script type="application/ld+json">{"@context":"https://schema.org","@type":"Recipe",
"name":"Chocolate Chip Cookies","description":"Classic &amp; chewy",
"recipeIngredient":["2 cups flour","1 cup chips"],
"recipeInstructions":[{"@type":"HowToStep","text":"Preheat oven."},"Bake."],
"prepTime":"PT15M","recipeYield":["24","24 cookies"],"image":{"url":"https://x/img.jpg"}}</script>
</head><body></body></html>"#;
        let r = extract_recipe(html).unwrap();
        assert_eq!(r.title, "Chocolate Chip Cookies");
        assert_eq!(r.description, "Classic & chewy");
        assert_eq!(r.ingredients, vec!["2 cups flour", "1 cup chips"]);
        assert_eq!(r.instructions, vec!["Preheat oven.", "Bake."]);
        assert_eq!(r.prep_time.as_deref(), Some("PT15M"));
        assert_eq!(r.cook_time, None);
        assert_eq!(r.servings.as_deref(), Some("24"));
        assert_eq!(r.image.as_deref(), Some("https://x/img.jpg"));
    }

    #[test]
    fn test_json_ld_graph_and_type_array() {
        let html = r#"<script type="application/ld+json">{"@context":"https://schema.org","@graph":[
{"@type":"WebPage","name":"page"},
{"@type":["Recipe","NewsArticle"],"name":"Soup","recipeIngredient":["water"],
 "recipeInstructions":[{"@type":"HowToSection","itemListElement":[{"text":"Boil."},{"text":"Serve."}]}],
 "recipeYield":4,"image":["https://x/a.jpg","https://x/b.jpg"]}]}</script>"#;
        let r = extract_recipe(html).unwrap();
        assert_eq!(r.title, "Soup");
        assert_eq!(r.instructions, vec!["Boil.", "Serve."]);
        assert_eq!(r.servings.as_deref(), Some("4"));
        assert_eq!(r.image.as_deref(), Some("https://x/a.jpg"));
    }

    #[test]
    fn test_unparsable_json_ld_is_skipped() {
        let html = r#"<script type="application/ld+json">{not json</script>
<script type="application/ld+json">[{"@type":"Recipe","name":"Tea"}]</script>"#;
        let r = extract_recipe(html).unwrap();
        assert_eq!(r.title, "Tea");
        assert!(r.ingredients.is_empty());
    }

    #[test]
    fn test_pattern_fallback() {
        let html = r#"<html><head><meta name="description" content="Quick pancakes"></head><body>
<h1 class="recipe-title">Pancakes</h1>
<ul><li class="ingredient">1 cup flour</li><li class="ingredient">1 egg</li></ul>
<ol><li class="instruction-step">Mix.</li><li class="instruction-step">Fry.</li></ol>
<img class="recipe-image" src="https://x/p.jpg">
</body></html>"#;
        let r = extract_recipe(html).unwrap();
        assert_eq!(r.title, "Pancakes");
        assert_eq!(r.description, "Quick pancakes");
        assert_eq!(r.ingredients, vec!["1 cup flour", "1 egg"]);
        assert_eq!(r.instructions, vec!["Mix.", "Fry."]);
        assert_eq!(r.image.as_deref(), Some("https://x/p.jpg"));
    }

    #[test]
    fn test_fallback_requires_ingredients_and_steps() {
        let html = "<html><body><h1>My Blog</h1><p>Nothing to cook here.</p></body></html>";
        let err = extract_recipe(html).unwrap_err();
        assert!(matches!(err, ScrapeError::NoRecipeData));
        assert_eq!(err.http_status(), 400);
    }

    #[tokio::test]
    async fn test_empty_url_rejected() {
        let scraper = RecipeScraper::new(5, "test-agent").unwrap();
        let err = scraper.scrape("  ").await.unwrap_err();
        assert!(matches!(err, ScrapeError::MissingUrl));
        assert_eq!(err.to_string(), "URL is required");
    }

    #[test]
    fn test_invalid_user_agent_is_client_error() {
        let err = RecipeScraper::new(5, "bad\nagent").err().unwrap();
        assert!(matches!(err, ScrapeError::Client(_)));
        assert_eq!(err.http_status(), 500);
    }

    #[test]
    fn test_json_ld_second_block_after_non_recipe() {
        let html = r#"<script type="application/ld+json">{"@type":"Organization","name":"Site"}</script>
<script type='application/ld+json'>{"@type":"Recipe","name":"Rice","recipeIngredient":["rice"],"recipeInstructions":"Cook."}</script>"#;
        let node = find_json_ld_recipe(html).unwrap();
        assert_eq!(node["name"], "Rice");
        assert!(find_json_ld_recipe("<html></html>").is_none());
    }
}
