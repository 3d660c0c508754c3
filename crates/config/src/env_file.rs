//! The flat `KEY=value` file written by `chatgate setup`.

use std::path::Path;

use anyhow::Context;
use secrecy::{ExposeSecret, SecretString};

use crate::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

/// Values persisted for the next service start.
#[derive(Debug)]
pub struct EnvFile {
    /// Provider credential.
    pub api_key: SecretString,
    /// Selected model identifier.
    pub model: String,
    /// Default completion token limit.
    pub max_tokens: u32,
    /// Default sampling temperature.
    pub temperature: f32,
}

impl EnvFile {
    /// Creates a file for the given credential and model with default request settings.
    pub fn new(api_key: SecretString, model: impl Into<String>) -> Self {
        Self {
            api_key,
            model: model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Renders the file contents, one `KEY=value` pair per line.
    pub fn render(&self) -> String {
        indoc::formatdoc! {"
            GROQ_API_KEY={api_key}
            GROQ_MODEL={model}
            MAX_TOKENS={max_tokens}
            TEMPERATURE={temperature}
        ",
            api_key = self.api_key.expose_secret(),
            model = self.model,
            max_tokens = self.max_tokens,
            temperature = self.temperature,
        }
    }

    /// Writes the file, replacing any previous contents.
    pub fn write(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();

        std::fs::write(path, self.render()).with_context(|| format!("Failed to write {}", path.display()))?;
        log::debug!("Wrote environment file to {}", path.display());

        Ok(())
    }
}
