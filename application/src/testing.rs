//! Test doubles shared by the use case tests

use crate::ports::embedding::{EmbeddingError, EmbeddingGateway};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::ProgressNotifier;
use async_trait::async_trait;
use council_domain::{AgentSpec, Credential, InferenceBinding, RunState};
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::sync::Mutex;
use std::time::Duration;

/// The deterministic completion [`EchoGateway`] returns for `prompt`.
pub fn echo_of(prompt: &str) -> String {
    let mut hasher = DefaultHasher::new();
    prompt.hash(&mut hasher);
    format!("ECHO:{:016x}", hasher.finish())
}

pub fn binding(model: &str) -> InferenceBinding {
    InferenceBinding::new(model, Credential::resolved("TEST_KEY", "sk-test"))
}

pub fn agent(name: &str, model: &str, sections: &[&str]) -> AgentSpec {
    AgentSpec::new(
        name,
        binding(model),
        "As the {context} specialist, contribute.",
        sections.iter().map(|s| s.to_string()).collect(),
    )
}

/// Gateway that answers every prompt with [`echo_of`] and records what it saw.
pub struct EchoGateway {
    failing_models: HashSet<String>,
    failing_prompts: Vec<String>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<(String, String)>>,
    in_flight: Mutex<(usize, usize)>,
}

impl EchoGateway {
    pub fn new() -> Self {
        Self {
            failing_models: HashSet::new(),
            failing_prompts: Vec::new(),
            delays: HashMap::new(),
            calls: Mutex::new(Vec::new()),
            in_flight: Mutex::new((0, 0)),
        }
    }

    /// Every call to `model` fails with a connection error.
    pub fn failing_model(mut self, model: &str) -> Self {
        self.failing_models.insert(model.to_string());
        self
    }

    /// Calls whose prompt contains `needle` fail.
    pub fn failing_when(mut self, needle: &str) -> Self {
        self.failing_prompts.push(needle.to_string());
        self
    }

    /// Calls whose prompt contains `needle` sleep before answering.
    pub fn delay_when(mut self, needle: &str, delay: Duration) -> Self {
        self.delays.insert(needle.to_string(), delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// `(model, prompt)` for every call, in arrival order
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn prompts_for(&self, model: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|(m, _)| m == model)
            .map(|(_, p)| p)
            .collect()
    }

    /// Highest number of calls that were in flight at once
    pub fn peak_in_flight(&self) -> usize {
        self.in_flight.lock().unwrap().1
    }
}

#[async_trait]
impl LlmGateway for EchoGateway {
    async fn complete(
        &self,
        binding: &InferenceBinding,
        prompt: &str,
        _max_tokens: u32,
    ) -> Result<String, GatewayError> {
        self.calls
            .lock()
            .unwrap()
            .push((binding.model.to_string(), prompt.to_string()));

        {
            let mut in_flight = self.in_flight.lock().unwrap();
            in_flight.0 += 1;
            in_flight.1 = in_flight.1.max(in_flight.0);
        }

        let delay = self
            .delays
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, d)| *d);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        } else {
            tokio::task::yield_now().await;
        }

        self.in_flight.lock().unwrap().0 -= 1;

        if self.failing_models.contains(binding.model.as_str())
            || self.failing_prompts.iter().any(|n| prompt.contains(n.as_str()))
        {
            return Err(GatewayError::ConnectionError(format!(
                "{} unreachable",
                binding.model
            )));
        }
        Ok(echo_of(prompt))
    }
}

/// Embedder with a fixed vector per exact text; unknown text is an error.
pub struct TableEmbedder {
    table: HashMap<String, Vec<f32>>,
    fail: bool,
}

impl TableEmbedder {
    pub fn new(entries: &[(&str, Vec<f32>)]) -> Self {
        Self {
            table: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            table: HashMap::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl EmbeddingGateway for TableEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if self.fail {
            return Err(EmbeddingError::ConnectionError("embedder offline".into()));
        }
        self.table
            .get(text)
            .cloned()
            .ok_or_else(|| EmbeddingError::InvalidResponse(format!("no vector for {text:?}")))
    }

    fn name(&self) -> &str {
        "table"
    }
}

/// Progress notifier that records every callback
#[derive(Default)]
pub struct RecordingProgress {
    states: Mutex<Vec<String>>,
    stages: Mutex<Vec<(usize, String)>>,
    completions: Mutex<Vec<(usize, String, bool)>>,
    chunks: Mutex<Vec<(usize, bool)>>,
}

impl RecordingProgress {
    pub fn states(&self) -> Vec<String> {
        self.states.lock().unwrap().clone()
    }

    pub fn stage_labels(&self) -> Vec<String> {
        self.stages
            .lock()
            .unwrap()
            .iter()
            .map(|(_, label)| label.clone())
            .collect()
    }

    pub fn completions(&self) -> Vec<(usize, String, bool)> {
        self.completions.lock().unwrap().clone()
    }

    pub fn chunks(&self) -> Vec<(usize, bool)> {
        self.chunks.lock().unwrap().clone()
    }
}

impl ProgressNotifier for RecordingProgress {
    fn on_state_change(&self, state: &RunState) {
        self.states.lock().unwrap().push(state.as_str().to_string());
    }

    fn on_agent_stage(&self, agent_index: usize, _roster_size: usize, stage_label: &str) {
        self.stages
            .lock()
            .unwrap()
            .push((agent_index, stage_label.to_string()));
    }

    fn on_agent_complete(&self, agent_index: usize, _roster_size: usize, agent: &str, success: bool) {
        self.completions
            .lock()
            .unwrap()
            .push((agent_index, agent.to_string(), success));
    }

    fn on_chunk_complete(&self, chunk_index: usize, success: bool) {
        self.chunks.lock().unwrap().push((chunk_index, success));
    }
}
