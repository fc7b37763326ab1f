//! 可观测性：tracing 初始化与 Supervisor 面包屑（breadcrumb）钩子
//!
//! 面包屑只用于追踪展示，从不影响控制流；调用方传 None 即为空操作。

use std::sync::Mutex;

use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// 日志：默认 info，可通过 RUST_LOG 覆盖
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

/// 面包屑钩子：(title, data)
pub trait Breadcrumbs: Send + Sync {
    fn add(&self, title: &str, data: &Value);
}

impl<F> Breadcrumbs for F
where
    F: Fn(&str, &Value) + Send + Sync,
{
    fn add(&self, title: &str, data: &Value) {
        self(title, data)
    }
}

/// 单条面包屑（Web 对话接口随回复一并返回）
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Breadcrumb {
    pub title: String,
    pub data: Value,
}

/// 收集型钩子：按调用顺序记录，供一次请求结束后取出
#[derive(Debug, Default)]
pub struct BreadcrumbLog {
    entries: Mutex<Vec<Breadcrumb>>,
}

impl BreadcrumbLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Breadcrumb> {
        match self.entries.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Breadcrumbs for BreadcrumbLog {
    fn add(&self, title: &str, data: &Value) {
        tracing::debug!(title = %title, "breadcrumb");
        let entry = Breadcrumb {
            title: title.to_string(),
            data: data.clone(),
        };
        match self.entries.lock() {
            Ok(mut guard) => guard.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }
}

/// 对可选钩子发出一条面包屑
pub fn emit(hook: Option<&dyn Breadcrumbs>, title: &str, data: &Value) {
    if let Some(h) = hook {
        h.add(title, data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_collects_in_order() {
        let log = BreadcrumbLog::new();
        emit(Some(&log), "first", &serde_json::json!({"a": 1}));
        emit(Some(&log), "second", &Value::Null);
        emit(None, "dropped", &Value::Null);

        let entries = log.take();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "first");
        assert_eq!(entries[1].title, "second");
        assert!(log.take().is_empty());
    }

    #[test]
    fn test_closure_hook() {
        let seen = Mutex::new(Vec::new());
        let hook = |title: &str, _data: &Value| seen.lock().unwrap().push(title.to_string());
        emit(Some(&hook), "x", &Value::Null);
        assert_eq!(seen.lock().unwrap().as_slice(), ["x".to_string()]);
    }
}
