use anyhow::Result;
use futures::stream::TryStreamExt;
use mockito::Matcher;
use test_utils::openai_stream_fixture;

use super::MessageRequest;
use super::OpenAI;
use crate::domain::models::LanguageModelSession;
use crate::domain::models::SessionChunk;
use crate::domain::models::SessionPrompt;

impl OpenAI {
    fn with_url(url: String) -> OpenAI {
        return OpenAI {
            model: "gpt-4".to_string(),
            timeout: "200".to_string(),
            token: "abc".to_string(),
            url,
        };
    }
}

#[tokio::test]
async fn it_successfully_health_checks() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(200)
        .create_async()
        .await;

    let session = OpenAI::with_url(server.url());
    let res = session.health_check().await;

    assert!(res.is_ok());
    mock.assert_async().await;
}

#[tokio::test]
async fn it_fails_health_checks() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(500)
        .create_async()
        .await;

    let session = OpenAI::with_url(server.url());
    let res = session.health_check().await;

    assert!(res.is_err());
    mock.assert_async().await;
}

#[tokio::test]
async fn it_fails_health_checks_without_a_token() {
    let mut session = OpenAI::with_url("http://localhost:1".to_string());
    session.token = "".to_string();

    let res = session.health_check().await;

    assert_eq!(res.unwrap_err().to_string(), "OpenAI token is not defined");
}

#[tokio::test]
async fn it_skips_health_checks_for_the_official_url() {
    let session = OpenAI::with_url("https://api.openai.com".to_string());
    let res = session.health_check().await;

    assert!(res.is_ok());
}

#[tokio::test]
async fn it_streams_completions() -> Result<()> {
    let context = serde_json::to_string(&vec![MessageRequest {
        role: "assistant".to_string(),
        content: "How may I help you?".to_string(),
    }])?;
    let prompt = SessionPrompt::new("Say hi to the world".to_string(), context);

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("Authorization", "Bearer abc")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "model": "gpt-4",
            "stream": true,
        })))
        .with_status(200)
        .with_body(openai_stream_fixture())
        .create_async()
        .await;

    let session = OpenAI::with_url(server.url());
    let chunks = session
        .submit(prompt)
        .await?
        .try_collect::<Vec<SessionChunk>>()
        .await?;

    mock.assert_async().await;
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0], SessionChunk::Fragment("Hello ".to_string()));
    assert_eq!(chunks[1], SessionChunk::Fragment("World".to_string()));

    match &chunks[2] {
        SessionChunk::Complete { text, context } => {
            assert_eq!(text.as_deref(), Some("Hello World"));
            insta::assert_snapshot!(context.as_deref().unwrap_or_default(), @r###"[{"role":"assistant","content":"How may I help you?"},{"role":"user","content":"Say hi to the world"},{"role":"assistant","content":"Hello World"}]"###);
        }
        other => panic!("Expected a completion, got {other:?}"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_fails_completions_on_error_status() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(401)
        .create_async()
        .await;

    let session = OpenAI::with_url(server.url());
    let res = session
        .submit(SessionPrompt::new("Hi".to_string(), "".to_string()))
        .await;

    assert!(res.is_err());
    mock.assert_async().await;
}

#[test]
fn it_names_itself_after_its_backend() {
    let session = OpenAI::with_url("http://localhost:1".to_string());

    assert_eq!(session.name(), "openai");
}
