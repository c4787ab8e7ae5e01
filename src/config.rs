use crate::attachment::ScoringConfig;
use crate::error::ConfigError;
use crate::layout::LayoutConfig;
use serde::{Deserialize, Serialize};

/// Tunable planner settings. Every field has a default, so partial documents are fine.
///
/// ```rust
/// use junbi::config::PlannerConfig;
///
/// let config = PlannerConfig::from_json(r#"{ "layout": { "nodeWidth": 200 } }"#).unwrap();
/// assert_eq!(config.layout.node_width, 200.0);
/// assert_eq!(config.scoring.unmet_penalty, 0.1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub layout: LayoutConfig,
    pub scoring: ScoringConfig,
}

impl PlannerConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PlannerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects dimensions that would make rows overlap or collapse.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        let dimensions = [
            ("nodeWidth", layout.node_width),
            ("nodeHeight", layout.node_height),
            ("horizontalGap", layout.horizontal_gap),
            ("verticalGap", layout.vertical_gap),
        ];
        for (name, value) in dimensions {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "layout.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if layout.node_width == 0.0 || layout.node_height == 0.0 {
            return Err(ConfigError::Invalid(
                "layout node dimensions must be greater than zero".to_string(),
            ));
        }
        if !self.scoring.unmet_penalty.is_finite() || self.scoring.unmet_penalty < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "scoring.unmetPenalty must be a non-negative number, got {}",
                self.scoring.unmet_penalty
            )));
        }
        Ok(())
    }
}
