//! Refinement engine
//!
//! Multi-call refinement primitives layered on the inference gateway. Every
//! primitive returns [`Fragment`]s: a failed call degrades its own slot and
//! the loop carries on with whatever text it has.

use super::inference::InferenceGateway;
use council_domain::{Fragment, InferenceBinding, PromptTemplate, Roster};
use futures::future::join_all;
use tracing::{debug, info};

/// Samples drawn for a prompt and the judge's pick among them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub samples: Vec<Fragment>,
    pub choice: Fragment,
}

#[derive(Clone)]
pub struct RefinementEngine {
    inference: InferenceGateway,
    max_tokens: u32,
    history_limit: Option<usize>,
}

impl RefinementEngine {
    pub fn new(inference: InferenceGateway, max_tokens: u32) -> Self {
        Self {
            inference,
            max_tokens,
            history_limit: None,
        }
    }

    /// Embed at most `limit` prior fragments in chain-of-thought and debate prompts.
    pub fn with_history_limit(mut self, limit: Option<usize>) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Single completion for an arbitrary prompt.
    pub async fn generate(&self, binding: &InferenceBinding, prompt: &str) -> Fragment {
        self.inference.fragment(binding, prompt, self.max_tokens).await
    }

    pub async fn expand(&self, binding: &InferenceBinding, content: &str) -> Fragment {
        self.generate(binding, &PromptTemplate::expand(content)).await
    }

    pub async fn summarize(&self, binding: &InferenceBinding, content: &str) -> Fragment {
        self.generate(binding, &PromptTemplate::summarize(content))
            .await
    }

    /// `steps` sequential reasoning steps; step `i` sees steps `0..i`.
    pub async fn chain_of_thought(
        &self,
        binding: &InferenceBinding,
        task: &str,
        steps: usize,
    ) -> Vec<Fragment> {
        let mut thoughts = Vec::with_capacity(steps);
        for index in 0..steps {
            let prompt = PromptTemplate::chain_of_thought_step(
                task,
                index,
                steps,
                self.window(&thoughts),
            );
            thoughts.push(self.generate(binding, &prompt).await);
        }
        debug!("Chain of thought produced {} steps", thoughts.len());
        thoughts
    }

    /// `rounds` alternating arguments: even rounds argue for, odd rounds against.
    pub async fn debate(
        &self,
        binding: &InferenceBinding,
        topic: &str,
        rounds: usize,
    ) -> Vec<Fragment> {
        let mut arguments = Vec::with_capacity(rounds);
        for index in 0..rounds {
            let prompt = PromptTemplate::debate_turn(topic, index, self.window(&arguments));
            arguments.push(self.generate(binding, &prompt).await);
        }
        arguments
    }

    /// Rewrite `content` `iterations` times; each pass improves the previous
    /// pass's output, error marker included, and the last pass is returned.
    pub async fn iterative_improvement(
        &self,
        binding: &InferenceBinding,
        content: &str,
        iterations: usize,
    ) -> Fragment {
        let mut current = Fragment::generated(content);

        for iteration in 0..iterations {
            current = self
                .generate(binding, &PromptTemplate::improve(&current.text(), iteration))
                .await;
            if current.is_degraded() {
                debug!("Improvement pass {} failed", iteration + 1);
            }
        }

        current
    }

    /// `k` independent samples of the same prompt, in request order.
    pub async fn multi_sample(
        &self,
        binding: &InferenceBinding,
        prompt: &str,
        k: usize,
    ) -> Vec<Fragment> {
        join_all((0..k).map(|_| self.generate(binding, prompt))).await
    }

    /// Ask `judge` to pick the best of `samples`.
    pub async fn select_best(&self, judge: &InferenceBinding, samples: &[Fragment]) -> Fragment {
        self.generate(judge, &PromptTemplate::select_best(samples))
            .await
    }

    /// [`multi_sample`](Self::multi_sample) followed by
    /// [`select_best`](Self::select_best) with the same binding as judge.
    pub async fn sample_and_select(
        &self,
        binding: &InferenceBinding,
        prompt: &str,
        k: usize,
    ) -> Selection {
        let samples = self.multi_sample(binding, prompt, k).await;
        let choice = self.select_best(binding, &samples).await;
        Selection { samples, choice }
    }

    pub async fn reflect(&self, binding: &InferenceBinding, response: &str) -> Fragment {
        self.generate(binding, &PromptTemplate::reflect(response))
            .await
    }

    pub async fn limitations(&self, binding: &InferenceBinding, response: &str) -> Fragment {
        self.generate(binding, &PromptTemplate::limitations(response))
            .await
    }

    /// `reviewers` reviews of `response`; review `i` is written by roster
    /// agent `i mod |roster|` on that agent's own binding.
    pub async fn peer_review(
        &self,
        roster: &Roster,
        response: &str,
        reviewers: usize,
    ) -> Vec<Fragment> {
        let prompt = PromptTemplate::peer_review(response);
        let mut reviews = Vec::with_capacity(reviewers);
        for index in 0..reviewers {
            let reviewer = roster.reviewer(index);
            info!("Peer review {} by {}", index + 1, reviewer.name());
            reviews.push(self.generate(reviewer.binding(), &prompt).await);
        }
        reviews
    }

    fn window<'a>(&self, prior: &'a [Fragment]) -> &'a [Fragment] {
        match self.history_limit {
            Some(limit) if prior.len() > limit => &prior[prior.len() - limit..],
            _ => prior,
        }
    }
}
