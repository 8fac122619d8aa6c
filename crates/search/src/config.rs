use crate::error::{Result, SearchError};
use serde::Deserialize;
use std::path::Path;

/// Tuning knobs of the hybrid orchestrator.
///
/// The defaults reproduce the canonical arithmetic. Fuzzy band scores are
/// "lower is better", so the conversion onto the fusion axis must stay
/// monotone decreasing in the band score.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct HybridConfig {
    /// Result cap of the semantic channel.
    pub top_k: usize,
    /// Constant fusion score of every keyword hit.
    pub keyword_score: f32,
    /// Base of the fuzzy band conversion.
    pub fuzzy_base: f32,
    /// Per-band-point decrement of the fuzzy band conversion.
    pub fuzzy_step: f32,
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            keyword_score: 1.0,
            fuzzy_base: 0.8,
            fuzzy_step: 0.01,
        }
    }
}

impl HybridConfig {
    /// Fusion-axis score of one fuzzy band score.
    ///
    /// Prefix (band 1) maps to 0.79, substring (band 2) to 0.78; the 100+
    /// and 200+ bands go negative, which is part of the reference behavior
    /// rather than a bug.
    #[must_use]
    pub fn fuzzy_fusion_score(&self, band_score: u32) -> f32 {
        self.fuzzy_base - self.fuzzy_step * band_score as f32
    }

    /// Validate the invariants the orchestrator relies on.
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(SearchError::ConfigError(
                "top_k must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("keyword_score", self.keyword_score),
            ("fuzzy_base", self.fuzzy_base),
            ("fuzzy_step", self.fuzzy_step),
        ] {
            if !value.is_finite() {
                return Err(SearchError::ConfigError(format!("{name} must be finite")));
            }
        }
        Ok(())
    }

    /// Load and validate a TOML config file. Missing keys keep their
    /// defaults.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SearchError::ConfigError(format!("cannot read {}: {e}", path.display())))?;
        let config: Self = toml::from_str(&text)
            .map_err(|e| SearchError::ConfigError(format!("invalid config {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_the_canonical_constants() {
        let config = HybridConfig::default();
        assert_eq!(config.top_k, 5);
        assert!((config.keyword_score - 1.0).abs() < f32::EPSILON);
        assert!((config.fuzzy_base - 0.8).abs() < f32::EPSILON);
        assert!((config.fuzzy_step - 0.01).abs() < f32::EPSILON);
        config.validate().unwrap();
    }

    #[test]
    fn fuzzy_conversion_is_monotone_decreasing() {
        let config = HybridConfig::default();
        assert!((config.fuzzy_fusion_score(1) - 0.79).abs() < 1e-6);
        assert!((config.fuzzy_fusion_score(2) - 0.78).abs() < 1e-6);
        // Weak bands contribute negatively.
        assert!(config.fuzzy_fusion_score(101) < 0.0);
        assert!(config.fuzzy_fusion_score(201) < config.fuzzy_fusion_score(101));
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_keys() {
        let config: HybridConfig = toml::from_str("top_k = 3").unwrap();
        assert_eq!(config.top_k, 3);
        assert!((config.fuzzy_base - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn zero_top_k_is_rejected() {
        let config = HybridConfig {
            top_k: 0,
            ..HybridConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn load_reads_and_validates_a_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("taskseek.toml");
        tokio::fs::write(&path, "top_k = 2\nkeyword_score = 1.5\n")
            .await
            .unwrap();

        let config = HybridConfig::load(&path).await.unwrap();
        assert_eq!(config.top_k, 2);
        assert!((config.keyword_score - 1.5).abs() < f32::EPSILON);

        tokio::fs::write(&path, "top_k = 0\n").await.unwrap();
        assert!(HybridConfig::load(&path).await.is_err());
    }
}
