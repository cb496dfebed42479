//! Research agent tests against a mocked model.

mod common;

use claimflow::{AppError, ResearchAgent, ResearchConfidence, validate};
use common::mocks::MockLLMClient;
use serde_json::{Value, json};

fn claims() -> Vec<Value> {
    vec![
        json!({"statement": "The Earth revolves around the Sun.", "source": "Astronomy Basics"}),
        json!({"statement": "Water boils at 100 degrees Celsius at sea level.", "source": "Chemistry 101"}),
    ]
}

#[tokio::test]
async fn test_run_repairs_malformed_fields() {
    let client = MockLLMClient::new(
        r#"{
            "knowledge_gaps": [{"gap": "X", "why": "Y"}],
            "research_confidence": "LOW",
            "insufficient": "true"
        }"#,
    );
    let agent = ResearchAgent::new(Box::new(client));

    let result = agent.run(&claims(), "Basic science").await.unwrap();

    assert_eq!(result.knowledge_gaps(), ["X | Y"]);
    assert!(result.insufficient());
    assert_eq!(result.core_understanding(), "");
    assert!(result.additional_queries_needed().is_empty());
    assert!(result.needs_more_research());
}

#[tokio::test]
async fn test_run_sends_topic_claims_and_schema() {
    let client = MockLLMClient::new(r#"{"research_confidence": "HIGH"}"#);
    let calls = client.calls();
    let agent = ResearchAgent::new(Box::new(client));

    agent.run(&claims(), "Basic science").await.unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1, "exactly one model call per run");

    let (system, prompt) = &calls[0];
    assert!(system.contains("research_confidence"));
    assert!(system.contains("additional_queries_needed"));
    assert!(prompt.contains("Topic: Basic science"));
    assert!(prompt.contains("Astronomy Basics"));
    assert!(prompt.contains("Water boils at 100 degrees Celsius at sea level."));
}

#[tokio::test]
async fn test_run_accepts_fenced_reasoning_reply() {
    let client = MockLLMClient::new(
        "<think>The sources agree.</think>\n```json\n{\"research_confidence\": \"MEDIUM\", \"additional_queries_needed\": \"boiling point altitude\"}\n```",
    );
    let agent = ResearchAgent::new(Box::new(client));

    let result = agent.run(&claims(), "Basic science").await.unwrap();

    assert_eq!(result.research_confidence(), ResearchConfidence::Medium);
    assert_eq!(result.additional_queries_needed(), ["boiling point altitude"]);
}

#[tokio::test]
async fn test_run_surfaces_schema_violation() {
    let client = MockLLMClient::new(r#"{"research_confidence": "Pretty sure"}"#);
    let agent = ResearchAgent::new(Box::new(client));

    let err = agent.run(&claims(), "Basic science").await.unwrap_err();

    assert_eq!(err.violated_field(), Some("research_confidence"));
    assert!(err.to_string().contains("Pretty sure"));
}

#[tokio::test]
async fn test_run_surfaces_transport_failure() {
    let client = MockLLMClient::failing();
    let calls = client.calls();
    let agent = ResearchAgent::new(Box::new(client));

    let err = agent.run(&claims(), "Basic science").await.unwrap_err();

    assert!(matches!(err, AppError::LLM(_)));
    assert_eq!(calls.lock().unwrap().len(), 1, "failures are not retried");
}

#[tokio::test]
async fn test_run_rejects_non_json_reply_as_transport_failure() {
    let client = MockLLMClient::new("I could not find anything useful.");
    let agent = ResearchAgent::new(Box::new(client));

    let err = agent.run(&claims(), "Basic science").await.unwrap_err();

    assert!(matches!(err, AppError::LLM(_)));
}

#[tokio::test]
async fn test_validated_record_is_a_fixed_point() {
    let client = MockLLMClient::new(
        r#"{
            "core_understanding": ["Tides", "follow", "the", "moon"],
            "key_dynamics": {"force": "gravity", "effect": "bulge"},
            "important_nuances": "Two tides a day.",
            "conflicting_perspectives": null,
            "knowledge_gaps": "spring tides",
            "research_confidence": "MEDIUM",
            "additional_queries_needed": [{"query": "neap tide"}],
            "insufficient": 0,
            "insufficient_reason": ""
        }"#,
    );
    let agent = ResearchAgent::new(Box::new(client));

    let first = agent.run(&[], "Tides").await.unwrap();

    let serialized = serde_json::to_value(&first).unwrap();
    let second = validate(serialized.as_object().unwrap()).unwrap();

    assert_eq!(first, second);
    assert_eq!(second.core_understanding(), "Tides follow the moon");
    assert_eq!(second.key_dynamics(), "gravity | bulge");
    assert_eq!(second.knowledge_gaps(), ["spring tides"]);
    assert_eq!(second.additional_queries_needed(), ["neap tide"]);
    assert!(!second.insufficient());
    assert_eq!(second.insufficient_reason(), None);
}

#[tokio::test]
async fn test_model_name_comes_from_client() {
    let agent = ResearchAgent::new(Box::new(MockLLMClient::new("{}")));
    assert_eq!(agent.model_name(), "mock-model");
}
