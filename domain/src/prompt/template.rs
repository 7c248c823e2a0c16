//! Prompt templates for the council flow

use crate::agent::fragment::Fragment;
use crate::agent::result::Stage;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt sent with every request
    pub fn default_system() -> &'static str {
        "You are a helpful assistant."
    }

    /// Instruction appended to the rendered agent prompt for a structured stage
    pub fn stage_prompt(rendered: &str, stage: Stage) -> String {
        let instruction = match stage {
            Stage::Overview => "Provide a brief overview.",
            Stage::DetailedDesign => "Provide a detailed design.",
            Stage::ImplementationConsiderations => "Discuss implementation considerations.",
            Stage::PotentialChallenges => "Identify potential challenges.",
            Stage::IntegrationPoints => {
                "Describe integration points with the other parts of the design."
            }
            other => return format!("{}\n\nProvide the {}.", rendered, other.heading()),
        };
        format!("{}\n\n{}", rendered, instruction)
    }

    pub fn expand(content: &str) -> String {
        format!(
            "Expand on the following content, adding more details, examples, and considerations:\n\n{}",
            content
        )
    }

    pub fn summarize(content: &str) -> String {
        format!(
            "Summarize the following content while retaining key information:\n\n{}",
            content
        )
    }

    /// Chain-of-thought step `index` (0-based) given the prior steps
    pub fn chain_of_thought_step(task: &str, index: usize, total: usize, prior: &[Fragment]) -> String {
        if prior.is_empty() {
            format!(
                "Step {} of {}. Initial thought on the task: {}",
                index + 1,
                total,
                task
            )
        } else {
            format!(
                "Step {} of {}. Considering the previous thoughts:\n{}\n\nProvide the next step in reasoning about: {}",
                index + 1,
                total,
                Self::numbered(prior),
                task
            )
        }
    }

    /// Debate turn `index` (0-based): even turns argue for, odd turns against
    pub fn debate_turn(topic: &str, index: usize, prior: &[Fragment]) -> String {
        let stance = if index % 2 == 0 { "for" } else { "against" };
        let history = if prior.is_empty() {
            "(none yet)".to_string()
        } else {
            Self::numbered(prior)
        };
        format!(
            "Argue {} the following topic: {}\n\nConsider previous arguments:\n{}",
            stance, topic, history
        )
    }

    pub fn improve(content: &str, iteration: usize) -> String {
        format!(
            "Iteration {}: Improve the following response by addressing any weaknesses, adding more detail, or considering alternative perspectives:\n\n{}",
            iteration + 1,
            content
        )
    }

    pub fn select_best(samples: &[Fragment]) -> String {
        let mut prompt =
            String::from("Review the following responses and select the best one. Explain your choice:\n\n");
        for (i, sample) in samples.iter().enumerate() {
            prompt.push_str(&format!("Response {}:\n{}\n\n", i + 1, sample));
        }
        prompt
    }

    pub fn reflect(response: &str) -> String {
        format!(
            "Reflect on the following response. What are its strengths and weaknesses? What assumptions were made? What could be improved?\n\n{}",
            response
        )
    }

    pub fn limitations(response: &str) -> String {
        format!(
            "Identify potential limitations or biases in the following response. What aspects might be incorrect or need further verification?\n\n{}",
            response
        )
    }

    pub fn peer_review(response: &str) -> String {
        format!(
            "As a peer reviewer, critically evaluate this response. Highlight strengths and suggest improvements:\n\n{}",
            response
        )
    }

    /// Meta-analysis across every agent's strongest answer
    pub fn meta_analysis(contributions: &[(String, String)]) -> String {
        let mut prompt = String::from(
            "Perform a meta-analysis of the following results from different specialists. Identify common themes, contradictions, and unique insights:\n\n",
        );
        for (agent, content) in contributions {
            prompt.push_str(&format!("{}:\n{}\n\n", agent, content));
        }
        prompt
    }

    pub fn final_review(document: &str) -> String {
        format!(
            "Review the following design document. Identify any inconsistencies, missing information, or areas that need further development. Provide suggestions for improvement:\n\n{}",
            document
        )
    }

    pub fn synthesize_chunk(chunk: &str) -> String {
        format!(
            "Synthesize the following part of a design document into a cohesive and logical format. Ensure all parts are logically connected and highlight any inconsistencies or areas that need further development:\n\n{}",
            chunk
        )
    }

    /// How an agent's contribution is labelled in the shared context
    pub fn contribution_entry(agent: &str, summary: &str) -> String {
        format!("{}'s Contribution:\n{}", agent, summary)
    }

    fn numbered(fragments: &[Fragment]) -> String {
        fragments
            .iter()
            .enumerate()
            .map(|(i, f)| format!("{}. {}", i + 1, f))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_prompt_appends_instruction() {
        let prompt = PromptTemplate::stage_prompt("As a level designer...", Stage::Overview);
        assert!(prompt.starts_with("As a level designer..."));
        assert!(prompt.ends_with("Provide a brief overview."));
    }

    #[test]
    fn test_debate_stance_alternates() {
        assert!(PromptTemplate::debate_turn("t", 0, &[]).starts_with("Argue for"));
        assert!(PromptTemplate::debate_turn("t", 1, &[]).starts_with("Argue against"));
        assert!(PromptTemplate::debate_turn("t", 4, &[]).starts_with("Argue for"));
    }

    #[test]
    fn test_chain_of_thought_includes_all_prior_steps() {
        let prior = vec![Fragment::generated("first"), Fragment::degraded("timeout")];
        let prompt = PromptTemplate::chain_of_thought_step("task", 2, 3, &prior);
        assert!(prompt.contains("1. first"));
        assert!(prompt.contains("2. Error: timeout"));
        assert!(prompt.contains("Step 3 of 3"));
    }

    #[test]
    fn test_select_best_lists_samples() {
        let prompt = PromptTemplate::select_best(&[
            Fragment::generated("one"),
            Fragment::generated("two"),
        ]);
        assert!(prompt.contains("Response 1:\none"));
        assert!(prompt.contains("Response 2:\ntwo"));
    }
}
