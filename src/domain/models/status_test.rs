use super::Status;
use crate::domain::models::Availability;
use crate::domain::models::Conversation;
use crate::domain::models::ExchangeFailure;

#[test]
fn it_has_no_status_when_idle() {
    let conversation = Conversation::default();
    assert_eq!(Status::from_conversation(&conversation), None);
}

#[test]
fn it_prefers_thinking_over_failures() {
    let conversation = Conversation {
        is_awaiting_response: true,
        last_failure: Some(ExchangeFailure::TimedOut(10)),
        ..Conversation::default()
    };
    assert_eq!(
        Status::from_conversation(&conversation),
        Some(Status::Thinking)
    );
}

#[test]
fn it_reports_the_last_failure() {
    let conversation = Conversation {
        last_failure: Some(ExchangeFailure::Failed("boom".to_string())),
        ..Conversation::default()
    };

    insta::assert_debug_snapshot!(Status::from_conversation(&conversation), @r###"
    Some(
        Failure(
            "The assistant failed to respond: boom",
        ),
    )
    "###);
}

#[test]
fn it_reports_an_unavailable_session() {
    let conversation = Conversation {
        availability: Availability::Unavailable("Ollama is not running".to_string()),
        ..Conversation::default()
    };
    assert_eq!(
        Status::from_conversation(&conversation),
        Some(Status::Unavailable(
            "Assistant unavailable: Ollama is not running".to_string()
        ))
    );
}
