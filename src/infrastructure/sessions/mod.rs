pub mod ollama;
pub mod openai;
pub mod unavailable;

use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::SessionBox;
use crate::domain::models::SessionName;

pub struct SessionManager {}

impl SessionManager {
    pub fn get(name: &str) -> Result<SessionBox> {
        let session_name = SessionName::parse(name.to_string());
        if session_name == Some(SessionName::Ollama) {
            return Ok(Arc::new(ollama::Ollama::default()));
        }

        if session_name == Some(SessionName::OpenAI) {
            return Ok(Arc::new(openai::OpenAI::default()));
        }

        bail!(format!("No session implemented for {name}"))
    }

    /// Builds the configured session, standing in an unavailable one when it
    /// can't be built so the chat still starts.
    pub fn get_or_unavailable() -> SessionBox {
        let name = Config::get(ConfigKey::Backend);
        match SessionManager::get(&name) {
            Ok(session) => return session,
            Err(err) => {
                tracing::warn!(backend = %name, error = ?err, "Falling back to an unavailable session");
                return Arc::new(unavailable::UnavailableSession::new(&name, &err.to_string()));
            }
        }
    }
}
