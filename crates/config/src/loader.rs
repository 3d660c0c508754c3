use std::{path::Path, str::FromStr};

use anyhow::{Context, bail};
use indoc::indoc;
use secrecy::SecretString;
use url::Url;

use crate::Config;

const API_KEY_VAR: &str = "GROQ_API_KEY";
const MODEL_VAR: &str = "GROQ_MODEL";
const BASE_URL_VAR: &str = "GROQ_BASE_URL";
const MAX_TOKENS_VAR: &str = "MAX_TOKENS";
const TEMPERATURE_VAR: &str = "TEMPERATURE";

pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file {}", path.display()))?;

    let config: Config =
        toml::from_str(&content).with_context(|| format!("Failed to parse configuration file {}", path.display()))?;

    Ok(config)
}

pub(crate) fn apply_env<F>(config: &mut Config, lookup: F) -> anyhow::Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    // An empty variable is the same as an unset one, which is what a
    // half-filled env file produces.
    let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    if let Some(key) = lookup(API_KEY_VAR) {
        config.llm.api_key = Some(SecretString::from(key));
    }

    if let Some(model) = lookup(MODEL_VAR) {
        config.llm.model = model;
    }

    if let Some(base_url) = lookup(BASE_URL_VAR) {
        config.llm.base_url = base_url;
    }

    if let Some(value) = lookup(MAX_TOKENS_VAR) {
        config.llm.max_tokens = parse_var(MAX_TOKENS_VAR, &value)?;
    }

    if let Some(value) = lookup(TEMPERATURE_VAR) {
        config.llm.temperature = parse_var(TEMPERATURE_VAR, &value)?;
    }

    Ok(())
}

fn parse_var<T>(name: &str, value: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("Environment variable {name} has an invalid value '{value}'"))
}

pub(crate) fn validate(config: &Config) -> anyhow::Result<()> {
    let llm = &config.llm;

    if llm.model.trim().is_empty() {
        bail!("The model identifier must not be empty");
    }

    let base_url =
        Url::parse(&llm.base_url).with_context(|| format!("The base URL '{}' is not a valid URL", llm.base_url))?;

    if !matches!(base_url.scheme(), "http" | "https") {
        bail!("The base URL must use http or https, got '{}'", llm.base_url);
    }

    if llm.max_tokens == 0 {
        bail!("The default max_tokens must be at least 1");
    }

    if !(0.0..=2.0).contains(&llm.temperature) {
        bail!(
            "The default temperature must be between 0.0 and 2.0, got {}",
            llm.temperature
        );
    }

    if !llm.has_api_key() {
        log::warn!(indoc! {r#"
            No API key configured. /chat and /models will answer with an error until one is set.

            Set GROQ_API_KEY in the environment or in a .env file, or run `chatgate setup`.
        "#});
    }

    Ok(())
}
