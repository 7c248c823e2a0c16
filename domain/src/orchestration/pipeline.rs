//! Pipeline variants and refinement settings

use crate::agent::result::Stage;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Which stages a task runner executes per agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineVariant {
    /// Overview only
    Minimal,
    /// The five structured section stages
    #[default]
    Standard,
    /// Structured stages plus every refinement primitive and peer review
    Full,
}

impl PipelineVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineVariant::Minimal => "minimal",
            PipelineVariant::Standard => "standard",
            PipelineVariant::Full => "full",
        }
    }

    /// Stages an agent produces under this variant, in execution order
    pub fn stages(&self) -> Vec<Stage> {
        match self {
            PipelineVariant::Minimal => vec![Stage::Overview],
            PipelineVariant::Standard => Stage::SECTION_STAGES.to_vec(),
            PipelineVariant::Full => {
                let mut stages = Stage::SECTION_STAGES.to_vec();
                stages.extend([
                    Stage::ChainOfThought,
                    Stage::Debate,
                    Stage::ImprovedResponse,
                    Stage::BestResponse,
                    Stage::Reflection,
                    Stage::Limitations,
                    Stage::PeerReviews,
                ]);
                stages
            }
        }
    }

    pub fn runs_peer_review(&self) -> bool {
        matches!(self, PipelineVariant::Full)
    }
}

impl std::fmt::Display for PipelineVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PipelineVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minimal" => Ok(PipelineVariant::Minimal),
            "standard" => Ok(PipelineVariant::Standard),
            "full" => Ok(PipelineVariant::Full),
            other => Err(format!(
                "unknown pipeline variant '{}' (expected minimal, standard or full)",
                other
            )),
        }
    }
}

/// Round counts for the refinement primitives
///
/// `history_limit` bounds how many prior fragments chain-of-thought and
/// debate prompts embed; `None` embeds the full history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinementSettings {
    pub chain_of_thought_steps: usize,
    pub debate_rounds: usize,
    pub improvement_iterations: usize,
    pub sample_count: usize,
    pub reviewer_count: usize,
    pub history_limit: Option<usize>,
}

impl Default for RefinementSettings {
    fn default() -> Self {
        Self {
            chain_of_thought_steps: 3,
            debate_rounds: 3,
            improvement_iterations: 3,
            sample_count: 3,
            reviewer_count: 2,
            history_limit: None,
        }
    }
}

/// Complete per-run pipeline configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSettings {
    pub variant: PipelineVariant,
    /// Completion ceiling for every agent-stage call
    pub max_tokens: u32,
    pub refinement: RefinementSettings,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            variant: PipelineVariant::default(),
            max_tokens: 1_000,
            refinement: RefinementSettings::default(),
        }
    }
}

impl PipelineSettings {
    pub fn with_variant(mut self, variant: PipelineVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_refinement(mut self, refinement: RefinementSettings) -> Self {
        self.refinement = refinement;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_tokens == 0 {
            return Err(DomainError::InvalidSettings(
                "max_tokens must be > 0".to_string(),
            ));
        }
        if self.variant == PipelineVariant::Full && self.refinement.sample_count == 0 {
            return Err(DomainError::InvalidSettings(
                "sample_count must be >= 1 for the full pipeline".to_string(),
            ));
        }
        Ok(())
    }
}
