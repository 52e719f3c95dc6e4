//! Hook configuration with documented switches
//!
//! Each override policy can be switched off independently. A disabled policy
//! produces no hook slot at all, so its host operation stays pristine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{InterceptError, Result};
use crate::core::types::Color;

/// Configuration for the interception layer
///
/// Loaded once before installation and never mutated while hooks are bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookConfig {
    // === OVERRIDE POLICIES ===
    /// Switch buildings inactive after goods production when the building
    /// policy says they should be dark.
    pub activity_gate: bool,

    /// Forward outgoing-goods problem timer changes of commercial buildings.
    pub outgoing_problems: bool,

    /// Forward worker problem timer changes of private buildings.
    pub worker_problems: bool,

    /// Replace the host's construction duration with the policy's value.
    pub construction_duration: bool,

    /// Send occupants out through entry doors in bad weather.
    pub spawn_router: bool,

    /// Gate in-place upgrades through the building policy.
    pub upgrade_gate: bool,

    /// Gate new construction through the building policy and register
    /// successfully created buildings.
    pub creation_gate: bool,

    /// Undo crime growth on inactive industry buildings.
    pub crime_corrector: bool,

    /// Override building colors in the trouble and lighting views.
    pub color_override: bool,

    // === TUNING ===
    /// Decrement the secondary goods buffer of commercial buildings by one
    /// per simulation step.
    ///
    /// Without this, a stocked building can reach the "stock full" state in
    /// which no more visits happen, and it stays there forever.
    pub spoil_commercial_goods: bool,

    /// Reference colors used when the host exposes none for the
    /// trouble-factor view.
    pub colors: ColorConfig,
}

/// Fallback reference colors for the trouble-factor view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Color at trouble factor 0.0
    pub negative: Color,
    /// Color at trouble factor 1.0
    pub target: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            negative: Color::new(0.21, 0.56, 0.18, 1.0),
            target: Color::new(0.82, 0.14, 0.11, 1.0),
        }
    }
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            activity_gate: true,
            outgoing_problems: true,
            worker_problems: true,
            construction_duration: true,
            spawn_router: true,
            upgrade_gate: true,
            creation_gate: true,
            crime_corrector: true,
            color_override: true,

            spoil_commercial_goods: true,
            colors: ColorConfig::default(),
        }
    }
}

impl HookConfig {
    /// Create a new config with every policy enabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a config from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: HookConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Number of enabled override policies
    pub fn enabled_count(&self) -> usize {
        [
            self.activity_gate,
            self.outgoing_problems,
            self.worker_problems,
            self.construction_duration,
            self.spawn_router,
            self.upgrade_gate,
            self.creation_gate,
            self.crime_corrector,
            self.color_override,
        ]
        .iter()
        .filter(|enabled| **enabled)
        .count()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.enabled_count() == 0 {
            return Err(InterceptError::Config(
                "at least one override policy must be enabled".into(),
            ));
        }

        for (label, color) in [("negative", self.colors.negative), ("target", self.colors.target)] {
            if color.channels().iter().any(|c| !(0.0..=1.0).contains(c)) {
                return Err(InterceptError::Config(format!(
                    "colors.{} has a channel outside [0, 1]: {:?}",
                    label, color
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_everything() {
        let config = HookConfig::default();
        assert_eq!(config.enabled_count(), 9);
        assert!(config.spoil_commercial_goods);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = HookConfig::from_toml_str(
            r#"
            spawn_router = false
            crime_corrector = false
            "#,
        )
        .unwrap();

        assert!(!config.spawn_router);
        assert!(!config.crime_corrector);
        assert!(config.activity_gate);
        assert_eq!(config.enabled_count(), 7);
    }

    #[test]
    fn test_toml_colors() {
        let config = HookConfig::from_toml_str(
            r#"
            [colors.negative]
            r = 0.0
            g = 1.0
            b = 0.0
            a = 1.0
            "#,
        )
        .unwrap();

        assert_eq!(config.colors.negative, Color::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(config.colors.target, ColorConfig::default().target);
    }

    #[test]
    fn test_rejects_all_disabled() {
        let config = HookConfig {
            activity_gate: false,
            outgoing_problems: false,
            worker_problems: false,
            construction_duration: false,
            spawn_router: false,
            upgrade_gate: false,
            creation_gate: false,
            crime_corrector: false,
            color_override: false,
            ..HookConfig::default()
        };

        assert!(matches!(config.validate(), Err(InterceptError::Config(_))));
    }

    #[test]
    fn test_rejects_out_of_range_color() {
        let result = HookConfig::from_toml_str(
            r#"
            [colors.target]
            r = 1.5
            g = 0.0
            b = 0.0
            a = 1.0
            "#,
        );

        assert!(matches!(result, Err(InterceptError::Config(_))));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let result = HookConfig::from_toml_str("activity_gate = \"yes\"");
        assert!(matches!(result, Err(InterceptError::Config(_))));
    }
}
