//! 前台 Agent 集成测试：允许列表直答、委派、约定纠正与失败道歉

use std::sync::Arc;

use souschef::agent::{process_message, start_session, with_backends};
use souschef::config::AppConfig;
use souschef::front::{RuleBasedFrontClient, APOLOGY, GREETING, SAMPLE_FILLERS};
use souschef::llm::{InputItem, OfflineEndpoint, ResponsesReply, ScriptedEndpoint, ScriptedLlmClient};
use souschef::memory::{Role, TranscriptItem};
use souschef::recipe::Recipe;
use souschef::tools::{supervisor_registry, ToolExecutor};

fn executor() -> ToolExecutor {
    ToolExecutor::new(supervisor_registry(), 5)
}

#[tokio::test]
async fn test_allow_listed_turn_is_not_delegated() {
    let cfg = AppConfig::default();
    let endpoint = Arc::new(ScriptedEndpoint::new(vec![]));
    let c = with_backends(&cfg, Arc::new(RuleBasedFrontClient), endpoint.clone(), true, executor()).unwrap();
    let (mut session, _) = start_session(&c, None);

    let turn = process_message(&c, &mut session, "thank you", None).await.unwrap();
    assert!(!turn.delegated);
    assert_eq!(turn.reply, "You're welcome.");
    assert_eq!(endpoint.dispatch_count(), 0);
}

#[tokio::test]
async fn test_missing_filler_is_supplied() {
    let cfg = AppConfig::default();
    let llm = Arc::new(ScriptedLlmClient::new([
        "{\"tool\": \"getNextResponseFromSupervisor\", \"args\": {\"relevantContextFromLastUserMessage\": \"oven temp\"}}",
    ]));
    let endpoint = Arc::new(ScriptedEndpoint::new(vec![ResponsesReply::text("375°F.")]));
    let c = with_backends(&cfg, llm, endpoint, false, executor()).unwrap();
    let (mut session, _) = start_session(&c, None);

    let turn = process_message(&c, &mut session, "What temperature?", None).await.unwrap();
    let filler = turn.filler.unwrap();
    assert!(SAMPLE_FILLERS.contains(&filler.as_str()));
    assert_eq!(turn.reply, "375°F.");
}

#[tokio::test]
async fn test_direct_tool_call_is_redirected_to_supervisor() {
    let cfg = AppConfig::default();
    let llm = Arc::new(ScriptedLlmClient::new([
        "One moment.\n{\"tool\": \"findNearestStore\", \"args\": {\"zip_code\": \"98101\"}}",
    ]));
    let endpoint = Arc::new(ScriptedEndpoint::new(vec![ResponsesReply::text("Nearest store: Fresh Market Grocery.")]));
    let c = with_backends(&cfg, llm, endpoint.clone(), false, executor()).unwrap();
    let (mut session, _) = start_session(&c, None);

    let turn = process_message(&c, &mut session, "closest store to 98101?", None).await.unwrap();
    assert!(turn.delegated);
    assert_eq!(turn.reply, "Nearest store: Fresh Market Grocery.");

    let arguments = session
        .transcript
        .items()
        .iter()
        .find_map(|i| match i {
            TranscriptItem::FunctionCall { name, arguments, .. } => {
                assert_eq!(name, "getNextResponseFromSupervisor");
                Some(arguments.clone())
            }
            _ => None,
        })
        .unwrap();
    let v: serde_json::Value = serde_json::from_str(&arguments).unwrap();
    assert_eq!(v["relevantContextFromLastUserMessage"], "closest store to 98101?");
}

#[tokio::test]
async fn test_supervisor_failure_yields_apology() {
    let cfg = AppConfig::default();
    let llm = Arc::new(ScriptedLlmClient::new([
        "Let me see.\n{\"tool\": \"getNextResponseFromSupervisor\", \"args\": {\"relevantContextFromLastUserMessage\": \"\"}}",
    ]));
    let endpoint = Arc::new(ScriptedEndpoint::new(vec![ResponsesReply::failure("boom")]));
    let c = with_backends(&cfg, llm, endpoint, false, executor()).unwrap();
    let (mut session, _) = start_session(&c, None);

    let turn = process_message(&c, &mut session, "how do I temper chocolate?", None).await.unwrap();
    assert_eq!(turn.reply, APOLOGY);
    assert!(turn.outcome.unwrap().is_error());

    let output = session.transcript.items().iter().find_map(|i| match i {
        TranscriptItem::FunctionCallOutput { output, .. } => Some(output.clone()),
        _ => None,
    });
    assert_eq!(output.as_deref(), Some("{\"error\":\"Something went wrong.\"}"));
}

#[tokio::test]
async fn test_front_model_error_aborts_turn() {
    let cfg = AppConfig::default();
    let llm = Arc::new(ScriptedLlmClient::new(Vec::<String>::new()));
    let c = with_backends(&cfg, llm, Arc::new(OfflineEndpoint), false, executor()).unwrap();
    let (mut session, _) = start_session(&c, None);
    assert!(process_message(&c, &mut session, "hello", None).await.is_err());
}

#[tokio::test]
async fn test_recipe_context_reaches_front_model() {
    let cfg = AppConfig::default();
    let llm = Arc::new(ScriptedLlmClient::new(["Hello!"]));
    let c = with_backends(&cfg, llm.clone(), Arc::new(OfflineEndpoint), false, executor()).unwrap();
    let recipe = Recipe {
        title: "Chocolate Chip Cookies".into(),
        ingredients: vec!["flour".into()],
        instructions: vec!["bake".into()],
        ..Default::default()
    };
    let (mut session, _) = start_session(&c, Some(recipe));
    process_message(&c, &mut session, "hi", None).await.unwrap();

    let seen = llm.seen();
    let system = &seen[0][0];
    assert_eq!(system.role, Role::System);
    assert!(system.content.contains("# Recipe Context"));
    assert!(system.content.contains("Chocolate Chip Cookies"));
}

#[tokio::test]
async fn test_offline_stack_answers_cooking_question() {
    let cfg = AppConfig::default();
    let c = with_backends(&cfg, Arc::new(RuleBasedFrontClient), Arc::new(OfflineEndpoint), true, executor()).unwrap();
    let (mut session, _) = start_session(&c, None);
    let turn = process_message(&c, &mut session, "How long should cookies bake?", None).await.unwrap();
    assert!(turn.delegated);
    assert!(turn.reply.contains("How long should cookies bake?"));
}

#[tokio::test]
async fn test_braces_in_reply_stay_a_reply() {
    let cfg = AppConfig::default();
    let llm = Arc::new(ScriptedLlmClient::new(["You're welcome {smiles}"]));
    let endpoint = Arc::new(ScriptedEndpoint::new(vec![]));
    let c = with_backends(&cfg, llm, endpoint.clone(), false, executor()).unwrap();
    let (mut session, _) = start_session(&c, None);

    let turn = process_message(&c, &mut session, "thanks", None).await.unwrap();
    assert!(!turn.delegated);
    assert_eq!(turn.reply, "You're welcome {smiles}");
    assert_eq!(endpoint.dispatch_count(), 0);
}

#[tokio::test]
async fn test_supervisor_sees_whole_conversation_after_many_turns() {
    let cfg = AppConfig::default();
    let turns = 60;
    let replies = (0..turns).map(|i| ResponsesReply::text(format!("answer {i}"))).collect();
    let endpoint = Arc::new(ScriptedEndpoint::new(replies));
    let c = with_backends(&cfg, Arc::new(RuleBasedFrontClient), endpoint.clone(), false, executor()).unwrap();
    let (mut session, _) = start_session(&c, None);

    for i in 0..turns {
        let turn = process_message(&c, &mut session, &format!("Question {i} about the flour"), None)
            .await
            .unwrap();
        assert!(turn.delegated);
        assert_eq!(turn.reply, format!("answer {i}"));
    }
    assert_eq!(endpoint.dispatch_count(), turns);
    // 每轮委派写入 user / filler / function_call / function_call_output / reply 五条
    assert_eq!(session.transcript.len(), 1 + turns * 5);

    let last = endpoint.requests().pop().unwrap();
    match &last.input[1] {
        InputItem::Message { content, .. } => {
            assert!(content.contains(GREETING));
            assert!(content.contains("Question 0 about the flour"));
            assert!(content.contains("answer 0"));
            assert!(content.contains("Question 59 about the flour"));
        }
        other => panic!("unexpected {:?}", other),
    }
}
