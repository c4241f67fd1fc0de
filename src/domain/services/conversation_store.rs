#[cfg(test)]
#[path = "conversation_store_test.rs"]
mod tests;

use std::time::Duration;

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;

use crate::domain::models::Availability;
use crate::domain::models::Conversation;
use crate::domain::models::ExchangeFailure;
use crate::domain::models::Message;
use crate::domain::models::Origin;
use crate::domain::models::SessionBox;
use crate::domain::models::SessionChunk;
use crate::domain::models::SessionPrompt;
use crate::domain::models::SessionReply;
use crate::domain::models::StoreEvent;
use crate::domain::models::Suggestion;

async fn collect_reply(
    session: SessionBox,
    prompt: SessionPrompt,
) -> Result<SessionReply, ExchangeFailure> {
    let mut stream = session.submit(prompt).await.map_err(|err| {
        return ExchangeFailure::Failed(err.to_string());
    })?;

    let mut text = String::new();
    while let Some(chunk) = stream.next().await {
        match chunk.map_err(|err| return ExchangeFailure::Failed(err.to_string()))? {
            SessionChunk::Fragment(fragment) => {
                tracing::debug!(%fragment, "Response fragment");
                text += &fragment;
            }
            SessionChunk::Complete {
                text: aggregate,
                context,
            } => {
                return Ok(SessionReply {
                    text: aggregate.unwrap_or(text),
                    context,
                });
            }
        }
    }

    return Ok(SessionReply {
        text,
        context: None,
    });
}

async fn run_exchange(
    session: SessionBox,
    prompt: SessionPrompt,
    timeout: Duration,
) -> Result<SessionReply, ExchangeFailure> {
    match time::timeout(timeout, collect_reply(session, prompt)).await {
        Ok(res) => return res,
        Err(_) => {
            return Err(ExchangeFailure::TimedOut(
                u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ));
        }
    }
}

/// Owns the conversation and is the only component that talks to the
/// language model session.
///
/// All mutations happen on the task that owns the store. Exchanges with the
/// session run on spawned tasks that report back through `StoreEvent`s, which
/// the owner hands to `handle_event`. Every spawned task is tagged with the
/// store generation, and `clear` bumps the generation so anything still in
/// flight is dropped when it settles.
pub struct ConversationStore {
    conversation: Conversation,
    events: mpsc::UnboundedSender<StoreEvent>,
    generation: u64,
    session: SessionBox,
    session_context: String,
    session_timeout: Duration,
    snapshots: watch::Sender<Conversation>,
    worker: Option<JoinHandle<()>>,
}

impl ConversationStore {
    pub fn new(
        session: SessionBox,
        session_timeout: Duration,
        events: mpsc::UnboundedSender<StoreEvent>,
    ) -> ConversationStore {
        let conversation = Conversation::default();
        let (snapshots, _) = watch::channel(conversation.clone());

        return ConversationStore {
            conversation,
            events,
            generation: 0,
            session,
            session_context: "".to_string(),
            session_timeout,
            snapshots,
            worker: None,
        };
    }

    pub fn conversation(&self) -> &Conversation {
        return &self.conversation;
    }

    pub fn subscribe(&self) -> watch::Receiver<Conversation> {
        return self.snapshots.subscribe();
    }

    pub fn update_draft(&mut self, text: &str) {
        self.conversation.draft_text = text.to_string();
        self.publish();
    }

    pub fn can_send(&self) -> bool {
        return !self.conversation.draft_text.trim().is_empty();
    }

    pub fn send(&mut self) {
        if self.conversation.is_awaiting_response {
            tracing::debug!("Ignoring send while a response is pending");
            return;
        }
        if !self.can_send() {
            return;
        }

        let trimmed = self.conversation.draft_text.trim().to_string();
        self.conversation
            .messages
            .push(Message::new(Origin::User, &trimmed));
        self.conversation.draft_text = "".to_string();
        self.conversation.is_input_focused = false;
        self.conversation.last_failure = None;

        if let Availability::Unavailable(reason) = &self.conversation.availability {
            tracing::warn!(%reason, "Session is unavailable, failing exchange");
            self.conversation.last_failure = Some(ExchangeFailure::Unavailable(reason.to_string()));
            self.publish();
            // The backend may have come up since the last check.
            self.check_availability();
            return;
        }

        self.conversation.is_awaiting_response = true;
        self.publish();

        let generation = self.generation;
        let events = self.events.clone();
        let session = self.session.clone();
        let timeout = self.session_timeout;
        let prompt = SessionPrompt::new(trimmed, self.session_context.clone());

        self.worker = Some(tokio::spawn(async move {
            let outcome = run_exchange(session, prompt, timeout).await;
            if events
                .send(StoreEvent::ResponseSettled {
                    generation,
                    outcome,
                })
                .is_err()
            {
                tracing::debug!(generation, "Store is gone, dropping response");
            }
        }));
    }

    /// Empties the conversation and abandons any pending response. The
    /// session context is forgotten so the next prompt starts a fresh
    /// exchange, and availability is checked again.
    pub fn clear(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.abort();
        }

        self.generation += 1;
        self.session_context = "".to_string();
        self.conversation = Conversation {
            availability: self.conversation.availability.clone(),
            ..Conversation::default()
        };
        self.publish();
        self.check_availability();
    }

    pub fn apply_suggestion(&mut self, title: &str, subtitle: &str) {
        self.update_draft(&Suggestion::new(title, subtitle).prompt());
        self.send();
    }

    pub fn set_input_focused(&mut self, focused: bool) {
        if self.conversation.is_input_focused == focused {
            return;
        }

        self.conversation.is_input_focused = focused;
        self.publish();
    }

    pub fn check_availability(&self) {
        let generation = self.generation;
        let events = self.events.clone();
        let session = self.session.clone();

        tokio::spawn(async move {
            let availability = match session.health_check().await {
                Ok(()) => Availability::Available,
                Err(err) => {
                    tracing::warn!(session = %session.name(), error = ?err, "Session health check failed");
                    Availability::Unavailable(err.to_string())
                }
            };

            if events
                .send(StoreEvent::AvailabilityChecked {
                    generation,
                    availability,
                })
                .is_err()
            {
                tracing::debug!(generation, "Store is gone, dropping health check");
            }
        });
    }

    pub fn handle_event(&mut self, event: StoreEvent) {
        match event {
            StoreEvent::ResponseSettled {
                generation,
                outcome,
            } => {
                if generation != self.generation || !self.conversation.is_awaiting_response {
                    tracing::debug!(
                        generation,
                        current = self.generation,
                        "Dropping stale response"
                    );
                    return;
                }

                self.worker = None;
                self.conversation.is_awaiting_response = false;

                match outcome {
                    Ok(reply) => {
                        if let Some(context) = reply.context {
                            self.session_context = context;
                        }

                        if reply.text.trim().is_empty() {
                            tracing::warn!("Session completed with an empty response");
                        } else {
                            self.conversation
                                .messages
                                .push(Message::new(Origin::Assistant, &reply.text));
                        }
                    }
                    Err(failure) => {
                        tracing::warn!(error = %failure, "Exchange failed");
                        self.conversation.last_failure = Some(failure);
                    }
                }

                self.publish();
            }
            StoreEvent::AvailabilityChecked {
                generation,
                availability,
            } => {
                if generation != self.generation {
                    tracing::debug!(
                        generation,
                        current = self.generation,
                        "Dropping stale health check"
                    );
                    return;
                }

                self.conversation.availability = availability;
                self.publish();
            }
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.conversation.clone());
    }
}
