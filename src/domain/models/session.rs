use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

#[derive(Clone, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SessionName {
    Ollama,
    OpenAI,
}

impl SessionName {
    pub fn parse(text: String) -> Option<SessionName> {
        return SessionName::iter().find(|e| return e.to_string() == text);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionPrompt {
    pub text: String,
    /// Opaque state returned by the previous exchange, used by sessions to
    /// keep a multi-turn conversation going. Empty for a fresh conversation.
    pub context: String,
}

impl SessionPrompt {
    pub fn new(text: String, context: String) -> SessionPrompt {
        return SessionPrompt { text, context };
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionChunk {
    Fragment(String),
    /// Ends the stream. `text` carries the aggregated response when the
    /// session provides one, otherwise the fragments are concatenated.
    Complete {
        text: Option<String>,
        context: Option<String>,
    },
}

pub type ChunkStream = BoxStream<'static, Result<SessionChunk>>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionReply {
    pub text: String,
    pub context: Option<String>,
}

#[async_trait]
pub trait LanguageModelSession {
    fn name(&self) -> String;

    /// Used at startup and whenever the conversation is cleared to verify the
    /// session can take prompts.
    async fn health_check(&self) -> Result<()>;

    /// Submits a prompt. Response text is streamed back as fragments, the
    /// stream ends with a `SessionChunk::Complete` or an error.
    async fn submit(&self, prompt: SessionPrompt) -> Result<ChunkStream>;
}

pub type SessionBox = Arc<dyn LanguageModelSession + Send + Sync>;
