//! Chat session semantics against a mock completions endpoint.

use reddit_digest::api::AnalysisClient;
use reddit_digest::error::DigestError;
use reddit_digest::models::{Role, ThreadRecord};
use reddit_digest::session::ChatSession;

fn record() -> ThreadRecord {
    ThreadRecord {
        post_id: "1abc23".to_string(),
        title: "Test post".to_string(),
        normalized_text: "TITLE: Test post\nCONTENT: Body text\n".to_string(),
        score: 42,
        source_url: "https://reddit.com/r/rust/comments/1abc23/test_post/".to_string(),
        community: "rust".to_string(),
    }
}

fn completion_body(content: &str) -> String {
    serde_json::json!({
        "model": "gpt-4o-mini",
        "choices": [{
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
    })
    .to_string()
}

#[tokio::test]
async fn ask_appends_user_and_assistant_on_success() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("The thread is about async traits."))
        .create_async()
        .await;

    let client = AnalysisClient::new(server.url(), "fake-key", "gpt-4o-mini");
    let mut session = ChatSession::new(record());

    let answer = session.ask(&client, "what is it about?").await.unwrap();

    assert_eq!(answer, "The thread is about async traits.");
    let history = session.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, Role::User);
    assert_eq!(history[0].text, "what is it about?");
    assert_eq!(history[1].role, Role::Assistant);
    assert_eq!(history[1].text, "The thread is about async traits.");
    mock.assert_async().await;
}

#[tokio::test]
async fn failed_ask_keeps_user_exchange_and_nothing_else() {
    let mut server = mockito::Server::new_async().await;
    let _failing = server
        .mock("POST", "/")
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let client = AnalysisClient::new(server.url(), "fake-key", "gpt-4o-mini");
    let mut session = ChatSession::new(record());

    let err = session.ask(&client, "X").await.unwrap_err();
    assert!(matches!(err, DigestError::Analysis(_)));

    // Exactly one new user exchange, zero assistant exchanges, no placeholder.
    let history = session.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].role, Role::User);
    assert_eq!(history[0].text, "X");
}

#[tokio::test]
async fn reset_clears_history_but_not_record_or_analysis() {
    let mut server = mockito::Server::new_async().await;
    let _completion = server
        .mock("POST", "/")
        .with_status(200)
        .with_body(completion_body("An answer."))
        .create_async()
        .await;

    let client = AnalysisClient::new(server.url(), "fake-key", "gpt-4o-mini");
    let mut session = ChatSession::new(record());
    session.set_analysis("stored analysis".to_string());

    session.ask(&client, "a question").await.unwrap();
    assert_eq!(session.history().len(), 2);

    session.reset();

    assert!(session.history().is_empty());
    assert_eq!(session.analysis(), "stored analysis");
    assert_eq!(session.record().title, "Test post");
}

#[tokio::test]
async fn analyze_returns_error_instead_of_panicking() {
    let mut server = mockito::Server::new_async().await;
    let _rejection = server
        .mock("POST", "/")
        .with_status(401)
        .with_body(r#"{"error": {"message": "bad key"}}"#)
        .create_async()
        .await;

    let client = AnalysisClient::new(server.url(), "wrong-key", "gpt-4o-mini");
    let err = client.analyze("some thread text", "").await.unwrap_err();

    match err {
        DigestError::Analysis(detail) => assert!(detail.contains("401")),
        other => panic!("expected Analysis error, got {other:?}"),
    }
}

#[tokio::test]
async fn analyze_success_returns_content() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_body(completion_body("1. Main topic: async Rust\n2. Yes\n3. ..."))
        .create_async()
        .await;

    let client = AnalysisClient::new(server.url(), "fake-key", "gpt-4o-mini");
    let analysis = client
        .analyze("TITLE: Test post\n", "performance claims")
        .await
        .unwrap();

    assert!(analysis.starts_with("1. Main topic"));
    mock.assert_async().await;
}
