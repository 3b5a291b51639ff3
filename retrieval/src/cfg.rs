//! Runtime configuration for the retrieval pipeline.

use crate::error::RetrievalError;

/// Knobs for the retrieval orchestrator.
///
/// The source system shipped with inconsistent defaults across its pipeline
/// variants; they are configuration here, with one consistent set:
/// `expand_to_n = 3`, `search_limit = 10`, `top_k = 3`.
#[derive(Clone, Debug)]
pub struct RetrievalConfig {
    /// Number of query variants searched (original + paraphrases).
    pub expand_to_n: usize,
    /// Per-variant vector search limit.
    pub search_limit: u64,
    /// Final result count after reranking.
    pub top_k: usize,
    /// Mock mode: every generative step short-circuits deterministically.
    pub mock: bool,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            expand_to_n: 3,
            search_limit: 10,
            top_k: 3,
            mock: false,
        }
    }
}

impl RetrievalConfig {
    /// Builds the config from environment variables with defaults.
    ///
    /// Env: `RETRIEVAL_EXPAND_TO_N`, `RETRIEVAL_SEARCH_LIMIT`,
    /// `RETRIEVAL_TOP_K`, `RETRIEVAL_MOCK`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            expand_to_n: parse("RETRIEVAL_EXPAND_TO_N", defaults.expand_to_n),
            search_limit: parse("RETRIEVAL_SEARCH_LIMIT", defaults.search_limit),
            top_k: parse("RETRIEVAL_TOP_K", defaults.top_k),
            mock: parse("RETRIEVAL_MOCK", false),
        }
    }

    /// Validates config values.
    ///
    /// # Errors
    /// Returns [`RetrievalError::InvalidArgument`] for out-of-range knobs.
    pub fn validate(&self) -> Result<(), RetrievalError> {
        if self.expand_to_n == 0 {
            return Err(RetrievalError::InvalidArgument(
                "expand_to_n must be greater than 0".into(),
            ));
        }
        if self.search_limit == 0 {
            return Err(RetrievalError::InvalidArgument(
                "search_limit must be greater than 0".into(),
            ));
        }
        if self.top_k == 0 {
            return Err(RetrievalError::InvalidArgument(
                "top_k must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

fn parse<T: std::str::FromStr>(k: &str, dflt: T) -> T {
    std::env::var(k)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(dflt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_consistent() {
        let cfg = RetrievalConfig::default();
        assert_eq!(cfg.expand_to_n, 3);
        assert_eq!(cfg.search_limit, 10);
        assert_eq!(cfg.top_k, 3);
        assert!(!cfg.mock);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_knobs_fail_validation() {
        let cfg = RetrievalConfig {
            top_k: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
