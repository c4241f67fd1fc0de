#[cfg(test)]
#[path = "unavailable_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::ChunkStream;
use crate::domain::models::LanguageModelSession;
use crate::domain::models::SessionPrompt;

/// Session used when no language model can be reached from this build or
/// configuration. Every call fails so exchanges settle immediately.
pub struct UnavailableSession {
    name: String,
    reason: String,
}

impl UnavailableSession {
    pub fn new(name: &str, reason: &str) -> UnavailableSession {
        return UnavailableSession {
            name: name.to_string(),
            reason: reason.to_string(),
        };
    }
}

#[async_trait]
impl LanguageModelSession for UnavailableSession {
    fn name(&self) -> String {
        return self.name.to_string();
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        bail!(self.reason.to_string())
    }

    #[allow(clippy::implicit_return)]
    async fn submit(&self, _prompt: SessionPrompt) -> Result<ChunkStream> {
        bail!(self.reason.to_string())
    }
}
