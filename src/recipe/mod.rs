//! 菜谱：数据模型、纯文本渲染、手动录入规范化，以及网页抓取（scrape）与抓取诊断（probe）
//!
//! 纯文本渲染的结果会附加到前台 Agent 的指令末尾（Recipe Context）。

pub mod probe;
pub mod scrape;

use serde::{Deserialize, Serialize};

pub use probe::{probe_url, ProbeReport, ProbeStep};
pub use scrape::{extract_recipe, RecipeScraper, ScrapeError};

/// 菜谱（字段名与前端 JSON 一致：prepTime / cookTime）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Recipe {
    /// 手动录入规范化：去首尾空白，丢弃空的食材 / 步骤，空的可选字段置为 None
    pub fn normalized(self) -> Self {
        fn clean_list(items: Vec<String>) -> Vec<String> {
            items
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        }
        fn clean_opt(value: Option<String>) -> Option<String> {
            value
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        }

        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            ingredients: clean_list(self.ingredients),
            instructions: clean_list(self.instructions),
            prep_time: clean_opt(self.prep_time),
            cook_time: clean_opt(self.cook_time),
            servings: clean_opt(self.servings),
            image: clean_opt(self.image),
        }
    }

    /// 标题、食材、步骤三者都有才算可用
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.ingredients.is_empty() && !self.instructions.is_empty()
    }

    /// 渲染为纯文本：标题、简介、时间/份量、编号的食材与步骤
    pub fn to_plaintext(&self) -> String {
        let mut out = format!("{}\n\n", self.title);

        if !self.description.is_empty() {
            out.push_str(&self.description);
            out.push_str("\n\n");
        }

        let mut meta = Vec::new();
        if let Some(ref t) = self.prep_time {
            meta.push(format!("Prep Time: {}", t));
        }
        if let Some(ref t) = self.cook_time {
            meta.push(format!("Cook Time: {}", t));
        }
        if let Some(ref s) = self.servings {
            meta.push(format!("Servings: {}", s));
        }
        if !meta.is_empty() {
            out.push_str(&meta.join(" | "));
            out.push_str("\n\n");
        }

        out.push_str("INGREDIENTS:\n");
        for (i, ingredient) in self.ingredients.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, ingredient));
        }

        out.push_str("\nINSTRUCTIONS:\n");
        for (i, step) in self.instructions.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, step));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookies() -> Recipe {
        Recipe {
            title: "Chocolate Chip Cookies".into(),
            description: "Chewy and classic.".into(),
            ingredients: vec!["2 cups flour".into(), "1 cup chocolate chips".into()],
            instructions: vec!["Preheat oven to 375°F.".into(), "Bake 10 minutes.".into()],
            prep_time: Some("15 minutes".into()),
            cook_time: None,
            servings: Some("24 cookies".into()),
            image: None,
        }
    }

    #[test]
    fn test_plaintext_layout() {
        let text = cookies().to_plaintext();
        assert_eq!(
            text,
            "Chocolate Chip Cookies\n\nChewy and classic.\n\nPrep Time: 15 minutes | Servings: 24 cookies\n\n\
INGREDIENTS:\n1. 2 cups flour\n2. 1 cup chocolate chips\n\n\
INSTRUCTIONS:\n1. Preheat oven to 375°F.\n2. Bake 10 minutes.\n"
        );
    }

    #[test]
    fn test_plaintext_without_optional_sections() {
        let recipe = Recipe {
            title: "Toast".into(),
            ingredients: vec!["bread".into()],
            instructions: vec!["toast it".into()],
            ..Default::default()
        };
        assert_eq!(
            recipe.to_plaintext(),
            "Toast\n\nINGREDIENTS:\n1. bread\n\nINSTRUCTIONS:\n1. toast it\n"
        );
    }

    #[test]
    fn test_manual_normalization() {
        let raw = Recipe {
            title: "  Pancakes ".into(),
            description: " ".into(),
            ingredients: vec![" flour ".into(), "".into(), "   ".into(), "milk".into()],
            instructions: vec!["mix".into(), " ".into()],
            prep_time: Some("  ".into()),
            cook_time: Some(" 10 min ".into()),
            servings: None,
            image: None,
        };
        let n = raw.normalized();
        assert_eq!(n.title, "Pancakes");
        assert_eq!(n.description, "");
        assert_eq!(n.ingredients, vec!["flour", "milk"]);
        assert_eq!(n.instructions, vec!["mix"]);
        assert_eq!(n.prep_time, None);
        assert_eq!(n.cook_time.as_deref(), Some("10 min"));
        assert!(n.is_complete());
    }

    #[test]
    fn test_camel_case_wire_names() {
        let v = serde_json::to_value(cookies()).unwrap();
        assert_eq!(v["prepTime"], "15 minutes");
        assert!(v.get("cookTime").is_none());
        let back: Recipe = serde_json::from_value(serde_json::json!({
            "title": "X", "ingredients": ["a"], "instructions": ["b"], "cookTime": "5 min"
        }))
        .unwrap();
        assert_eq!(back.cook_time.as_deref(), Some("5 min"));
    }
}
