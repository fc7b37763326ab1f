//! 抓取诊断：对 URL 做一次基础 GET，报告状态码、响应头、HTML 长度、是否含 JSON-LD 与菜谱关键词

use std::collections::BTreeMap;

use serde::Serialize;

use crate::recipe::scrape::{RecipeScraper, ScrapeError};

/// 单个诊断步骤
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProbeStep {
    pub name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_structured_data: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_recipe_keywords: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 诊断报告 `{url, timestamp, tests}`
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub url: String,
    pub timestamp: String,
    pub tests: Vec<ProbeStep>,
}

/// HTML 内容步骤
pub fn inspect_html(html: &str) -> ProbeStep {
    let lower = html.to_lowercase();
    ProbeStep {
        name: "HTML Content".to_string(),
        success: true,
        content_length: Some(html.len()),
        has_structured_data: Some(html.contains("application/ld+json")),
        has_recipe_keywords: Some(lower.contains("recipe") || lower.contains("ingredient")),
        ..Default::default()
    }
}

/// 对 URL 跑诊断；网络错误记录在步骤里而不是返回 Err
pub async fn probe_url(scraper: &RecipeScraper, url: &str) -> Result<ProbeReport, ScrapeError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ScrapeError::MissingUrl);
    }
    let mut report = ProbeReport {
        url: url.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        tests: Vec::new(),
    };

    match scraper.client().get(url).send().await {
        Ok(resp) => {
            let status = resp.status();
            let headers = resp
                .headers()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
                .collect();
            report.tests.push(ProbeStep {
                name: "Basic Fetch".to_string(),
                success: status.is_success(),
                status: Some(status.as_u16()),
                status_text: status.canonical_reason().map(str::to_string),
                headers: Some(headers),
                ..Default::default()
            });
            if status.is_success() {
                match resp.text().await {
                    Ok(html) => report.tests.push(inspect_html(&html)),
                    Err(e) => report.tests.push(ProbeStep {
                        name: "HTML Content".to_string(),
                        success: false,
                        error: Some(e.to_string()),
                        ..Default::default()
                    }),
                }
            }
        }
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "probe fetch failed");
            report.tests.push(ProbeStep {
                name: "Basic Fetch".to_string(),
                success: false,
                error: Some(e.to_string()),
                ..Default::default()
            });
        }
    }
    Ok(report)
}
