//! Router configuration.

use crate::domain::Criterion;

/// Configuration parameters for route planning.
#[derive(Debug, Clone, PartialEq)]
pub struct RouterConfig {
    /// Criterion used when a request does not name one.
    pub default_criterion: Criterion,

    /// Number of routes (primary included) returned by an alternatives
    /// request that does not ask for a specific count.
    pub default_alternatives: usize,

    /// Upper bound on the number of routes an alternatives request may ask
    /// for.
    pub max_alternatives: usize,

    /// Minimum fraction of stations an alternative must not share with the
    /// primary route. With 0.3, alternatives are kept when their Jaccard
    /// similarity to the primary route is below 0.7.
    pub diversity_threshold: f64,
}

impl RouterConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        default_criterion: Criterion,
        default_alternatives: usize,
        max_alternatives: usize,
        diversity_threshold: f64,
    ) -> Self {
        Self {
            default_criterion,
            default_alternatives,
            max_alternatives,
            diversity_threshold,
        }
    }

    /// Clamp a requested route count to `1..=max_alternatives`, falling back
    /// to the default when none was requested.
    pub fn alternatives_for(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_alternatives)
            .clamp(1, self.max_alternatives.max(1))
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            default_criterion: Criterion::Time,
            default_alternatives: 3,
            max_alternatives: 10,
            diversity_threshold: 0.3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = RouterConfig::default();

        assert_eq!(config.default_criterion, Criterion::Time);
        assert_eq!(config.default_alternatives, 3);
        assert_eq!(config.max_alternatives, 10);
        assert_eq!(config.diversity_threshold, 0.3);
    }

    #[test]
    fn custom_config() {
        let config = RouterConfig::new(Criterion::Cost, 2, 4, 0.5);

        assert_eq!(config.default_criterion, Criterion::Cost);
        assert_eq!(config.default_alternatives, 2);
        assert_eq!(config.max_alternatives, 4);
        assert_eq!(config.diversity_threshold, 0.5);
    }

    #[test]
    fn alternatives_clamped() {
        let config = RouterConfig::default();

        assert_eq!(config.alternatives_for(None), 3);
        assert_eq!(config.alternatives_for(Some(0)), 1);
        assert_eq!(config.alternatives_for(Some(5)), 5);
        assert_eq!(config.alternatives_for(Some(500)), 10);
    }
}
