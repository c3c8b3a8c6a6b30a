//! TOML configuration for session defaults.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use seqmatch_core::TokenizationStrategy;

/// Configuration loaded at startup; every field has a default so a partial
/// or absent file works.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Defaults applied when `analyze` omits arguments.
    pub analysis: AnalysisDefaults,
    /// Defaults for the interactive editing mode.
    pub editing: EditingDefaults,
}

/// Default analysis parameters.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisDefaults {
    /// Tokenization strategy used when none is named.
    pub strategy: TokenizationStrategy,
    /// Minimum match length in tokens, at least one.
    pub min_match_length: usize,
}

impl Default for AnalysisDefaults {
    fn default() -> Self {
        Self {
            strategy: TokenizationStrategy::Word,
            min_match_length: 3,
        }
    }
}

/// Default editing-mode parameters.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EditingDefaults {
    /// Context tokens shown around a match when `print` omits the size.
    pub context_size: usize,
}

impl Default for EditingDefaults {
    fn default() -> Self {
        Self { context_size: 0 }
    }
}

impl CliConfig {
    /// Loads and validates a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: CliConfig = toml::from_str(&content)
            .with_context(|| format!("invalid config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.analysis.min_match_length < 1 {
            bail!("analysis.min_match_length must be at least 1");
        }
        Ok(())
    }
}
