//! 前台 Agent 的行为约定：问候语、填充语、允许直接处理的平凡交互

pub const COMPANY_NAME: &str = "Mom as Sous-Chef";
pub const GREETING: &str = "Hi, you've reached Mom as Sous-Chef, how can I help you?";

/// 委派前的中性填充语（不暗示能否完成）
pub const SAMPLE_FILLERS: &[&str] = &[
    "Just a second.",
    "Let me check.",
    "One moment.",
    "Let me look into that.",
    "Give me a moment.",
    "Let me see.",
];

/// 按轮次轮换填充语，避免连续重复
pub fn filler_for_turn(turn: usize) -> &'static str {
    SAMPLE_FILLERS[turn % SAMPLE_FILLERS.len()]
}

/// 前台可直接处理的平凡交互
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowListed {
    Greeting,
    HowAreYou,
    Thanks,
    Repeat,
}

const GREETINGS: &[&str] = &["hi", "hello", "hey", "hi there", "hello there", "good morning", "good evening"];

/// 判断一句用户输入是否属于允许列表；其余一律委派
pub fn classify_allow_list(utterance: &str) -> Option<AllowListed> {
    let normalized: String = utterance
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '\'')
        .collect();
    let normalized = normalized.split_whitespace().collect::<Vec<_>>().join(" ");

    if GREETINGS.contains(&normalized.as_str()) {
        return Some(AllowListed::Greeting);
    }
    if normalized.starts_with("how are you") || normalized == "how's it going" {
        return Some(AllowListed::HowAreYou);
    }
    if matches!(
        normalized.as_str(),
        "thanks" | "thank you" | "thank you so much" | "thanks a lot" | "ok thanks" | "okay thanks"
    ) {
        return Some(AllowListed::Thanks);
    }
    if normalized.contains("repeat that")
        || normalized.contains("say that again")
        || normalized == "what did you say"
        || normalized == "pardon"
    {
        return Some(AllowListed::Repeat);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_list() {
        assert_eq!(classify_allow_list("Hello!"), Some(AllowListed::Greeting));
        assert_eq!(classify_allow_list("how are you today?"), Some(AllowListed::HowAreYou));
        assert_eq!(classify_allow_list("Thank you."), Some(AllowListed::Thanks));
        assert_eq!(classify_allow_list("Can you repeat that?"), Some(AllowListed::Repeat));
        assert_eq!(classify_allow_list("How long do I bake the cookies?"), None);
        assert_eq!(classify_allow_list("hello, what's the nearest store to 98101"), None);
    }

    #[test]
    fn test_filler_rotates() {
        assert_ne!(filler_for_turn(0), filler_for_turn(1));
        assert_eq!(filler_for_turn(0), filler_for_turn(SAMPLE_FILLERS.len()));
    }
}
