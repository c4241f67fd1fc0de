#[cfg(test)]
#[path = "ollama_test.rs"]
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

fn convert_err(err: reqwest::Error) -> std::io::Error {
    let err_msg = err.to_string();
    return std::io::Error::new(std::io::ErrorKind::Interrupted, err_msg);
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionRequest {
    model: String,
    prompt: String,
    context: Option<Vec<i32>>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionResponse {
    pub response: String,
    pub done: bool,
    pub context: Option<Vec<i32>>,
}

pub struct Ollama {
    model: String,
    timeout: String,
    url: String,
}

impl Default for Ollama {
    fn default() -> Ollama {
        return Ollama {
            model: Config::get(ConfigKey::Model),
            timeout: Config::get(ConfigKey::BackendHealthCheckTimeout),
            url: Config::get(ConfigKey::OllamaURL),
        };
    }
}

#[async_trait]
impl LanguageModelSession for Ollama {
    fn name(&self) -> String {
        return SessionName::Ollama.to_string();
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        let res = reqwest::Client::new()
            .get(&self.url)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        if let Err(err) = res {
            tracing::error!(error = ?err, "Ollama is not running");
            bail!("Ollama is not running");
        }

        let status = res?.status();
        if status != 200 {
            tracing::error!(status = status.as_u16(), "Ollama health check failed");
            bail!("Ollama health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn submit(&self, prompt: SessionPrompt) -> Result<ChunkStream> {
        let mut req = CompletionRequest {
            model: self.model.to_string(),
            prompt: prompt.text,
            context: None,
        };

        if !prompt.context.is_empty() {
            req.context = Some(serde_json::from_str(&prompt.context)?);
        }

        let res = reqwest::Client::new()
            .post(format!("{url}/api/generate", url = self.url))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make completion request to Ollama"
            );
            bail!("Failed to make completion request to Ollama");
        }

        let stream = res.bytes_stream().map_err(convert_err);
        let mut lines_reader = StreamReader::new(stream).lines();

        let chunks: ChunkStream = Box::pin(try_stream! {
            while let Some(line) = lines_reader.next_line().await? {
                if line.trim().is_empty() {
                    continue;
                }

                let ores: CompletionResponse = serde_json::from_str(&line)?;
                tracing::debug!(body = ?ores, "Completion response");

                if !ores.response.is_empty() {
                    yield SessionChunk::Fragment(ores.response);
                }

                if ores.done {
                    let mut context = None;
                    if let Some(ctx) = ores.context {
                        context = Some(serde_json::to_string(&ctx)?);
                    }

                    yield SessionChunk::Complete { text: None, context };
                    break;
                }
            }
        });

        return Ok(chunks);
    }
}
