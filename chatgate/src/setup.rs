//! Interactive first-run setup: validates a credential and writes the environment file.

use std::path::Path;

use anyhow::{Context, bail};
use config::{Config, EnvFile, LlmConfig};
use console::style;
use dialoguer::{Password, Select, theme::ColorfulTheme};
use llm::ModelInfo;
use secrecy::SecretString;

/// Model families that cannot answer chat prompts.
const NON_CHAT_MARKERS: &[&str] = &["whisper", "tts", "guard"];

/// Number of models offered for selection.
const MAX_CHOICES: usize = 10;

pub(crate) async fn run(config: &Config, output: &Path) -> anyhow::Result<()> {
    println!("{}", style("• Setup").bold());
    println!("{}", "=".repeat(50));

    println!();
    println!("{}", style("• Setup API Key").bold());
    println!("  {}", style("Get your key from: https://console.groq.com/").dim());

    let api_key = prompt_api_key()?;

    println!("• Testing API key...");

    let llm = LlmConfig {
        api_key: Some(SecretString::from(api_key.clone())),
        ..config.llm.clone()
    };

    let models = match llm::fetch_models(&llm).await {
        Ok(models) => models,
        Err(e) => {
            println!("{} Invalid API key", style("✗").red());
            bail!("Failed to list models: {e}");
        }
    };

    println!("{} API key valid!", style("✓").green());

    let choices = chat_capable(&models);

    if choices.is_empty() {
        bail!("The provider offers no chat-capable models");
    }

    println!();
    println!("{}", style("• Available Models:").bold());

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Choose model (1-{})", choices.len()))
        .items(&choices.iter().enumerate().map(|(i, m)| describe(i, m)).collect::<Vec<_>>())
        .default(0)
        .interact()?;

    let model_id = &choices[selection].id;
    println!("{} Selected: {model_id}", style("✓").green());

    EnvFile::new(SecretString::from(api_key), model_id.as_str())
        .write(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    println!("{} {} file created", style("✓").green(), output.display());

    println!();
    println!("{}", style("✓ Setup Complete!").green().bold());
    println!("• Next Steps:");
    println!("1. chatgate serve");
    println!("2. chatgate loadtest --host http://localhost:8000 --users 200 --spawn-rate 20");

    Ok(())
}

fn prompt_api_key() -> anyhow::Result<String> {
    loop {
        let key: String = Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Enter Groq API Key")
            .allow_empty_password(true)
            .interact()?;

        let key = key.trim();

        if !key.is_empty() {
            return Ok(key.to_string());
        }

        println!("{} API key required!", style("✗").red());
    }
}

/// Text models, in provider order, capped at the selectable count.
fn chat_capable(models: &[ModelInfo]) -> Vec<&ModelInfo> {
    models
        .iter()
        .filter(|model| {
            let id = model.id.to_lowercase();
            !NON_CHAT_MARKERS.iter().any(|marker| id.contains(marker))
        })
        .take(MAX_CHOICES)
        .collect()
}

fn describe(index: usize, model: &ModelInfo) -> String {
    format!(
        "{:2}. {} ({})",
        index + 1,
        model.id,
        model.owned_by.as_deref().unwrap_or("Unknown")
    )
}
