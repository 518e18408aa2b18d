use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use clauselens::classify::{ClassifierConfig, ClassifierProvider, ClassifyError, HttpClassifier};
use clauselens::llm::{LLMConfig, LLMError, LLMParams, OpenAIClient, Provider};

fn classifier_config(server: &MockServer) -> ClassifierConfig {
    ClassifierConfig {
        endpoint: format!("{}/classify", server.uri()),
        api_key: Some("test-key".to_string()),
        ..Default::default()
    }
}

fn llm_config(server: &MockServer) -> LLMConfig {
    LLMConfig {
        api_endpoint: Some(format!("{}/v1", server.uri())),
        api_key: Some("test-key".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn classifier_returns_highest_scoring_label() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[
            { "label": "LABEL_2", "score": 0.05 },
            { "label": "LABEL_41", "score": 0.91 },
            { "label": "LABEL_33", "score": 0.04 }
        ]])))
        .mount(&server)
        .await;

    let classifier = HttpClassifier::new(classifier_config(&server)).unwrap();
    let id = classifier
        .classify("Either party may terminate this Agreement.")
        .await
        .unwrap();
    assert_eq!(id, 41);
}

#[tokio::test]
async fn classifier_error_status_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let classifier = HttpClassifier::new(classifier_config(&server)).unwrap();
    let err = classifier.classify("some clause text").await.unwrap_err();
    assert!(matches!(err, ClassifyError::Unavailable(_)));
}

#[tokio::test]
async fn classifier_rejects_malformed_predictions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "oops": true })))
        .mount(&server)
        .await;

    let classifier = HttpClassifier::new(classifier_config(&server)).unwrap();
    let err = classifier.classify("some clause text").await.unwrap_err();
    assert!(matches!(err, ClassifyError::InvalidResponse(_)));
}

#[tokio::test]
async fn openai_client_parses_chat_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({ "temperature": 0.0 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "message": { "content": "  A concise legal summary.  " } }
            ],
            "usage": { "total_tokens": 128 },
            "model": "gpt-4.1-mini"
        })))
        .mount(&server)
        .await;

    let client = OpenAIClient::new(llm_config(&server)).unwrap();
    let params = LLMParams {
        temperature: 0.0,
        ..Default::default()
    };
    let response = client.complete("summarize this", &params).await.unwrap();
    assert_eq!(response.text, "A concise legal summary.");
    assert_eq!(response.tokens_used, Some(128));
    assert_eq!(response.model, "gpt-4.1-mini");
}

#[tokio::test]
async fn openai_client_surfaces_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = OpenAIClient::new(llm_config(&server)).unwrap();
    let err = client
        .complete("summarize this", &LLMParams::default())
        .await
        .unwrap_err();
    assert!(matches!(err, LLMError::RequestFailed(_)));
}

#[tokio::test]
async fn openai_client_requires_an_api_key() {
    let client = OpenAIClient::new(LLMConfig {
        api_key: None,
        ..Default::default()
    })
    .unwrap();

    let err = client
        .complete("summarize this", &LLMParams::default())
        .await
        .unwrap_err();
    assert!(matches!(err, LLMError::ConfigError(_)));
}
