#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_stream::try_stream;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use serde::Deserialize;
use serde::Serialize;
use tokio::io::AsyncBufReadExt;
use tokio_util::io::StreamReader;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ChunkStream;
use crate::domain::models::LanguageModelSession;
use crate::domain::models::SessionChunk;
use crate::domain::models::SessionName;
use crate::domain::models::SessionPrompt;

const OFFICIAL_URL: &str = "https://api.openai.com";

fn convert_err(err: reqwest::Error) -> std::io::Error {
    let err_msg = err.to_string();
    return std::io::Error::new(std::io::ErrorKind::Interrupted, err_msg);
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct MessageRequest {
    role: String,
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<MessageRequest>,
    stream: bool,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionDeltaResponse {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionChoiceResponse {
    delta: CompletionDeltaResponse,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoiceResponse>,
}

pub struct OpenAI {
    model: String,
    timeout: String,
    token: String,
    url: String,
}

impl Default for OpenAI {
    fn default() -> OpenAI {
        return OpenAI {
            model: Config::get(ConfigKey::Model),
            timeout: Config::get(ConfigKey::BackendHealthCheckTimeout),
            token: Config::get(ConfigKey::OpenAiToken),
            url: Config::get(ConfigKey::OpenAiURL),
        };
    }
}

#[async_trait]
impl LanguageModelSession for OpenAI {
    fn name(&self) -> String {
        return SessionName::OpenAI.to_string();
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("OpenAI URL is not defined");
        }
        if self.token.is_empty() {
            bail!("OpenAI token is not defined");
        }

        // The official index answers with a 404 or 418, so only self hosted
        // compatible servers get probed.
        if self.url == OFFICIAL_URL {
            return Ok(());
        }

        let res = reqwest::Client::new()
            .get(&self.url)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        if let Err(err) = res {
            tracing::error!(error = ?err, "OpenAI is not reachable");
            bail!("OpenAI is not reachable");
        }

        let status = res?.status().as_u16();
        if status >= 400 {
            tracing::error!(status = status, "OpenAI health check failed");
            bail!("OpenAI health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn submit(&self, prompt: SessionPrompt) -> Result<ChunkStream> {
        let mut messages: Vec<MessageRequest> = vec![];
        if !prompt.context.is_empty() {
            messages = serde_json::from_str(&prompt.context)?;
        }
        messages.push(MessageRequest {
            role: "user".to_string(),
            content: prompt.text,
        });

        let req = CompletionRequest {
            model: self.model.to_string(),
            messages: messages.clone(),
            stream: true,
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/v1/chat/completions", url = self.url))
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make completion request to OpenAI"
            );
            bail!("Failed to make completion request to OpenAI");
        }

        let stream = res.bytes_stream().map_err(convert_err);
        let mut lines_reader = StreamReader::new(stream).lines();

        let chunks: ChunkStream = Box::pin(try_stream! {
            let mut last_message = "".to_string();
            while let Some(line) = lines_reader.next_line().await? {
                let mut cleaned_line = line.trim().to_string();
                if cleaned_line.starts_with("data:") {
                    cleaned_line = cleaned_line.split_off(5).trim().to_string();
                }
                if cleaned_line.is_empty() {
                    continue;
                }
                if cleaned_line == "[DONE]" {
                    break;
                }

                let ores: CompletionResponse = serde_json::from_str(&cleaned_line)?;
                tracing::debug!(body = ?ores, "Completion response");

                let text = ores
                    .choices
                    .into_iter()
                    .next()
                    .and_then(|choice| {
                        return choice.delta.content;
                    })
                    .unwrap_or_default();

                if text.is_empty() {
                    continue;
                }

                last_message += &text;
                yield SessionChunk::Fragment(text);
            }

            messages.push(MessageRequest {
                role: "assistant".to_string(),
                content: last_message.clone(),
            });

            yield SessionChunk::Complete {
                text: Some(last_message),
                context: Some(serde_json::to_string(&messages)?),
            };
        });

        return Ok(chunks);
    }
}
