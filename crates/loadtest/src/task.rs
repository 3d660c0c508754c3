use std::fmt;

use rand::{Rng, distributions::WeightedIndex, prelude::Distribution, seq::SliceRandom};
use reqwest::Client;
use serde_json::{Value, json};

use crate::questions::QUESTIONS;

/// One kind of request a virtual user sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    /// `POST /chat` with a random prompt.
    Chat,
    /// `GET /health`.
    Health,
    /// `GET /models`.
    Models,
}

impl Task {
    /// All tasks, in the order their weights are declared.
    pub const ALL: [Task; 3] = [Task::Chat, Task::Health, Task::Models];

    /// Relative pick frequency.
    pub fn weight(self) -> u32 {
        match self {
            Task::Chat => 8,
            Task::Health => 2,
            Task::Models => 1,
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Task::Chat => f.write_str("POST /chat"),
            Task::Health => f.write_str("GET /health"),
            Task::Models => f.write_str("GET /models"),
        }
    }
}

/// Picks tasks according to their weights.
pub(crate) struct TaskPicker {
    index: WeightedIndex<u32>,
}

impl TaskPicker {
    pub(crate) fn new() -> Self {
        let index = WeightedIndex::new(Task::ALL.map(Task::weight)).expect("task weights are constant and non-zero");

        Self { index }
    }

    pub(crate) fn pick<R: Rng>(&self, rng: &mut R) -> Task {
        Task::ALL[self.index.sample(rng)]
    }
}

/// Whether one request counted as a success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Outcome {
    Success,
    Failure(String),
}

/// Sends one request for `task` and judges the reply.
pub(crate) async fn execute<R: Rng>(client: &Client, host: &str, task: Task, rng: &mut R) -> Outcome {
    let request = match task {
        Task::Chat => {
            let question = QUESTIONS.choose(rng).copied().unwrap_or("Hello, how are you?");
            log::info!("> {task} - Question: {}", shorten(question, 50));

            let payload = json!({
                "message": question,
                "temperature": rng.gen_range(0.1_f64..=1.0),
                "max_tokens": rng.gen_range(100_u32..=512),
            });

            client.post(format!("{host}/chat")).json(&payload)
        }
        Task::Health => client.get(format!("{host}/health")),
        Task::Models => client.get(format!("{host}/models")),
    };

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => return Outcome::Failure(format!("Request failed: {e}")),
    };

    let status = response.status().as_u16();
    let body = response.json::<Value>().await.ok();

    judge(task, status, body.as_ref())
}

/// Decides the outcome from the status code and the (possibly unparsable) JSON body.
pub(crate) fn judge(task: Task, status: u16, body: Option<&Value>) -> Outcome {
    if status != 200 {
        return Outcome::Failure(format!("HTTP {status}"));
    }

    match task {
        Task::Health => {
            let state = body.and_then(|b| b["status"].as_str()).unwrap_or("unknown");
            log::info!("> Content: {state} status");

            Outcome::Success
        }
        Task::Chat => {
            let Some(body) = body else {
                return Outcome::Failure("Invalid JSON response".to_string());
            };

            match body["response"].as_str() {
                Some(text) if !text.is_empty() => {
                    log::info!("> Content: {}", shorten(text, 100));
                    Outcome::Success
                }
                _ => Outcome::Failure("Empty response received".to_string()),
            }
        }
        Task::Models => {
            let Some(body) = body else {
                return Outcome::Failure("Invalid JSON response".to_string());
            };

            if body.get("data").is_none() || body.get("current_model").is_none() {
                return Outcome::Failure("Invalid models response structure".to_string());
            }

            log::info!(
                "> Content: {} models available, current: {}",
                body["total_models"].as_u64().unwrap_or(0),
                body["current_model"].as_str().unwrap_or("unknown")
            );

            Outcome::Success
        }
    }
}

fn shorten(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
