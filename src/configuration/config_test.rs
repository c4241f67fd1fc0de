use std::time::Duration;

use anyhow::Result;
use once_cell::sync::Lazy;
use strum::VariantNames;
use tokio::sync::Mutex;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

// Config is global, loads from different files must not interleave.
static LOAD_LOCK: Lazy<Mutex<()>> = Lazy::new(|| return Mutex::new(()));

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let toml_res = res.parse::<toml_edit::Document>();
    assert!(toml_res.is_ok());

    insta::assert_snapshot!(res, @r###"
    # The backend hosting the model to chat with. [possible values: ollama, openai]
    backend = "ollama"

    # Time to wait in milliseconds before timing out when doing a healthcheck for a backend.
    backend-health-check-timeout = 1000

    # The model on the backend to chat with.
    model = "llama2"

    # Ollama API URL when using the Ollama backend.
    ollama-url = "http://localhost:11434"

    # OpenAI API token when using the OpenAI backend.
    # openai-token = ""

    # OpenAI API URL when using the OpenAI backend. Can be swapped to a compatible proxy.
    openai-url = "https://api.openai.com"

    # Time to wait in milliseconds for the assistant to finish a response.
    session-timeout = 60000

    # Your user name displayed in all chat bubbles.
    # username = ""
    "###);
}

#[test]
fn it_defaults_durations() {
    assert_eq!(
        Config::default(ConfigKey::SessionTimeout).parse::<u64>(),
        Ok(60000)
    );
    assert_eq!(
        Config::default(ConfigKey::BackendHealthCheckTimeout).parse::<u64>(),
        Ok(1000)
    );
}

#[tokio::test]
async fn it_loads_config_from_file() -> Result<()> {
    let _guard = LOAD_LOCK.lock().await;
    let matches =
        cli::build().try_get_matches_from(vec!["palaver", "-c", "./config.example.toml"])?;
    Config::load(cli::build(), vec![&matches]).await?;

    assert_eq!(Config::get(ConfigKey::Backend), "ollama");
    assert_eq!(
        Config::get_duration(ConfigKey::SessionTimeout),
        Duration::from_millis(60000)
    );
    return Ok(());
}

#[tokio::test]
async fn it_fails_to_loads_config_from_file() -> Result<()> {
    let _guard = LOAD_LOCK.lock().await;
    let matches =
        cli::build().try_get_matches_from(vec!["palaver", "-c", "./test/bad-config.toml"])?;
    let res = Config::load(cli::build(), vec![&matches]).await;
    assert!(res.is_err());
    return Ok(());
}

#[tokio::test]
async fn it_loads_openai_keys_from_file() -> Result<()> {
    let _guard = LOAD_LOCK.lock().await;
    let matches =
        cli::build().try_get_matches_from(vec!["palaver", "-c", "./test/openai-config.toml"])?;
    Config::load(cli::build(), vec![&matches]).await?;

    assert_eq!(Config::get(ConfigKey::Backend), "openai");
    assert_eq!(Config::get(ConfigKey::OpenAiToken), "sk-test");
    assert_eq!(Config::get(ConfigKey::OpenAiURL), "http://openai.local");
    return Ok(());
}

#[test]
fn it_names_keys_like_the_config_file() {
    assert_eq!(ConfigKey::OpenAiToken.to_string(), "openai-token");
    assert_eq!(ConfigKey::OpenAiURL.to_string(), "openai-url");
    assert!(ConfigKey::VARIANTS.contains(&"openai-token"));

    let matches = cli::build().try_get_matches_from(vec![
        "palaver",
        "--openai-token",
        "sk-flag",
        "--openai-url",
        "http://flag.local",
    ]);
    assert!(matches.is_ok());
}
