//! Pipeline configuration from TOML (`[pipeline]` section)

use super::super::error::ConfigError;
use council_domain::{PipelineSettings, PipelineVariant, RefinementSettings};
use serde::{Deserialize, Serialize};

/// ```toml
/// [pipeline]
/// variant = "full"
/// max_tokens = 1000
/// chain_of_thought_steps = 3
/// debate_rounds = 3
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePipelineConfig {
    pub variant: String,
    pub max_tokens: u32,
    pub chain_of_thought_steps: usize,
    pub debate_rounds: usize,
    pub improvement_iterations: usize,
    pub sample_count: usize,
    pub reviewer_count: usize,
    pub history_limit: Option<usize>,
}

impl Default for FilePipelineConfig {
    fn default() -> Self {
        let settings = PipelineSettings::default();
        let r = settings.refinement;
        Self {
            variant: settings.variant.as_str().to_string(),
            max_tokens: settings.max_tokens,
            chain_of_thought_steps: r.chain_of_thought_steps,
            debate_rounds: r.debate_rounds,
            improvement_iterations: r.improvement_iterations,
            sample_count: r.sample_count,
            reviewer_count: r.reviewer_count,
            history_limit: r.history_limit,
        }
    }
}

impl FilePipelineConfig {
    pub fn to_settings(&self) -> Result<PipelineSettings, ConfigError> {
        let variant: PipelineVariant = self
            .variant
            .parse()
            .map_err(|e: String| ConfigError::invalid("pipeline.variant", e))?;

        let settings = PipelineSettings {
            variant,
            max_tokens: self.max_tokens,
            refinement: RefinementSettings {
                chain_of_thought_steps: self.chain_of_thought_steps,
                debate_rounds: self.debate_rounds,
                improvement_iterations: self.improvement_iterations,
                sample_count: self.sample_count,
                reviewer_count: self.reviewer_count,
                history_limit: self.history_limit,
            },
        };
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_round_trip_to_domain() {
        let settings = FilePipelineConfig::default().to_settings().unwrap();
        assert_eq!(settings, PipelineSettings::default());
    }

    #[test]
    fn test_unknown_variant() {
        let config = FilePipelineConfig {
            variant: "turbo".into(),
            ..Default::default()
        };
        assert!(matches!(
            config.to_settings(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "pipeline.variant"
        ));
    }

    #[test]
    fn test_zero_max_tokens_rejected() {
        let config = FilePipelineConfig {
            max_tokens: 0,
            ..Default::default()
        };
        assert!(matches!(config.to_settings(), Err(ConfigError::Domain(_))));
    }
}
