//! Analysis session with a single-entry dataset cache
//!
//! Re-loading the same bytes (the same upload, the same file read twice)
//! reuses the parsed dataset. Only the most recent dataset is kept.
//!
//! The CLI loads each log through a session; long-lived shells keep one
//! session across reloads so unchanged input is not parsed again.

use tracing::{debug, info};

use crate::analytics::{analyze, Analysis, RuleThresholds};
use crate::error::Result;
use crate::ingest;
use crate::types::Dataset;

#[derive(Debug)]
struct CachedDataset {
    fingerprint: String,
    dataset: Dataset,
}

/// Holds the thresholds in effect and the most recently loaded dataset.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    pub thresholds: RuleThresholds,
    cache: Option<CachedDataset>,
}

impl AnalysisSession {
    pub fn new(thresholds: RuleThresholds) -> Self {
        Self {
            thresholds,
            cache: None,
        }
    }

    /// Load a habit log, reusing the cached dataset when the bytes match.
    ///
    /// A failed load leaves the session empty.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<&Dataset> {
        let fingerprint = ingest::fingerprint(bytes);

        if let Some(cached) = self.cache.take().filter(|c| c.fingerprint == fingerprint) {
            debug!(fingerprint = %fingerprint, "Dataset cache hit");
            return Ok(&self.cache.insert(cached).dataset);
        }

        let dataset = ingest::load_bytes(bytes)?;
        info!(fingerprint = %fingerprint, records = dataset.len(), "Dataset cached");
        Ok(&self
            .cache
            .insert(CachedDataset {
                fingerprint,
                dataset,
            })
            .dataset)
    }

    /// The currently cached dataset, if any.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.cache.as_ref().map(|c| &c.dataset)
    }

    /// Fingerprint of the currently cached dataset.
    pub fn fingerprint(&self) -> Option<&str> {
        self.cache.as_ref().map(|c| c.fingerprint.as_str())
    }

    pub fn clear(&mut self) {
        self.cache = None;
    }

    /// Analyze the cached dataset with the session thresholds.
    pub fn analyze(&self) -> Option<Analysis> {
        self.dataset().map(|d| analyze(d, &self.thresholds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG_A: &[u8] = b"Sleep_Hours,Mood_Score\n7,6\n8,9\n";
    const LOG_B: &[u8] = b"Steps\n1000\n";

    #[test]
    fn test_same_bytes_reuse_cache() {
        let mut session = AnalysisSession::default();
        let first = session.load_bytes(LOG_A).unwrap().clone();
        let fp = session.fingerprint().unwrap().to_string();

        let second = session.load_bytes(LOG_A).unwrap();
        assert_eq!(&first, second);
        assert_eq!(session.fingerprint(), Some(fp.as_str()));
        assert_eq!(fp, ingest::fingerprint(LOG_A));
    }

    #[test]
    fn test_different_bytes_replace_cache() {
        let mut session = AnalysisSession::default();
        session.load_bytes(LOG_A).unwrap();
        session.load_bytes(LOG_B).unwrap();

        assert_eq!(session.fingerprint(), Some(ingest::fingerprint(LOG_B).as_str()));
        assert_eq!(session.dataset().map(|d| d.len()), Some(1));
    }

    #[test]
    fn test_failed_load_clears_cache() {
        let mut session = AnalysisSession::default();
        session.load_bytes(LOG_A).unwrap();

        assert!(session.load_bytes(b"a,b\n1,2,3\n").is_err());
        assert!(session.dataset().is_none());
        assert!(session.analyze().is_none());
    }

    #[test]
    fn test_analyze_uses_session_thresholds() {
        let thresholds = RuleThresholds {
            sleep_low: 8.0,
            ..RuleThresholds::default()
        };
        let mut session = AnalysisSession::new(thresholds);
        session.load_bytes(LOG_A).unwrap();

        let analysis = session.analyze().unwrap();
        assert_eq!(
            analysis.recommendations.first().map(|a| a.category),
            Some(crate::analytics::AdviceCategory::LowSleep)
        );

        session.clear();
        assert!(session.fingerprint().is_none());
    }
}
