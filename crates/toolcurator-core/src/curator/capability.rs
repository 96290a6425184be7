//! Capability matching
//!
//! Scores free-text requirements against a tool's declared capabilities.
//! Priority per (capability, requirement) pair:
//!
//! 1. exact, case-insensitive equality: 1.0
//! 2. partial, either string contains the other: 0.8
//! 3. semantic, Jaccard overlap of lower-cased whitespace tokens
//!
//! Only the best capability per requirement is kept, and only when it reaches
//! the similarity threshold. Requirements below the threshold produce nothing.

use std::collections::HashSet;
use std::sync::Arc;

use crate::logging::{Logger, NoOpLogger};
use crate::types::{MatchType, ToolCapabilityMatch};

pub const EXACT_MATCH_SCORE: f64 = 1.0;
pub const PARTIAL_MATCH_SCORE: f64 = 0.8;
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;

/// Matches capabilities against requirements
pub struct CapabilityMatcher {
    threshold: f64,
    logger: Arc<dyn Logger>,
}

impl Default for CapabilityMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_SIMILARITY_THRESHOLD)
    }
}

impl CapabilityMatcher {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            logger: Arc::new(NoOpLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Best qualifying match per requirement, in requirement order
    pub fn match_capabilities<C, R>(
        &self,
        capabilities: &[C],
        requirements: &[R],
        tool_id: &str,
    ) -> Vec<ToolCapabilityMatch>
    where
        C: AsRef<str>,
        R: AsRef<str>,
    {
        let mut matches = Vec::new();

        for requirement in requirements {
            let requirement = requirement.as_ref();
            if requirement.trim().is_empty() {
                continue;
            }

            let mut best: Option<(&str, f64, MatchType)> = None;
            for capability in capabilities {
                let capability = capability.as_ref();
                if capability.trim().is_empty() {
                    continue;
                }
                let (score, match_type) = score_pair(capability, requirement);
                // strictly greater: ties keep the first capability
                if best.map_or(true, |(_, s, _)| score > s) {
                    best = Some((capability, score, match_type));
                }
            }

            match best {
                Some((capability, score, match_type)) if score >= self.threshold => {
                    matches.push(ToolCapabilityMatch {
                        tool_id: tool_id.to_string(),
                        capability: capability.to_string(),
                        requirement: requirement.to_string(),
                        score,
                        match_type,
                        details: format!(
                            "{} match between '{}' and '{}'",
                            match_type, capability, requirement
                        ),
                    });
                }
                Some((_, score, _)) => {
                    self.logger.debug(&format!(
                        "[CapabilityMatcher] {} below threshold for '{}' ({:.2} < {:.2})",
                        tool_id, requirement, score, self.threshold
                    ));
                }
                None => {}
            }
        }

        matches
    }
}

/// Score one capability against one requirement
pub fn score_pair(capability: &str, requirement: &str) -> (f64, MatchType) {
    let cap = capability.trim().to_lowercase();
    let req = requirement.trim().to_lowercase();

    if cap == req {
        return (EXACT_MATCH_SCORE, MatchType::Exact);
    }
    if cap.contains(&req) || req.contains(&cap) {
        return (PARTIAL_MATCH_SCORE, MatchType::Partial);
    }
    (token_overlap(&cap, &req), MatchType::Semantic)
}

/// Jaccard similarity of the whitespace token sets
fn token_overlap(a: &str, b: &str) -> f64 {
    let left: HashSet<&str> = a.split_whitespace().collect();
    let right: HashSet<&str> = b.split_whitespace().collect();

    let union = left.union(&right).count();
    if union == 0 {
        return 0.0;
    }
    left.intersection(&right).count() as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_case_insensitive() {
        let matcher = CapabilityMatcher::default();
        for (cap, req) in [("Database Access", "database access"), ("FILE IO", "file io"), ("x", "X")] {
            let matches = matcher.match_capabilities(&[cap], &[req], "tool-1");
            assert_eq!(matches.len(), 1);
            assert_eq!(matches[0].score, 1.0);
            assert_eq!(matches[0].match_type, MatchType::Exact);
        }
    }

    #[test]
    fn test_partial_match() {
        let (score, kind) = score_pair("sql database access", "database");
        assert_eq!(score, 0.8);
        assert_eq!(kind, MatchType::Partial);

        let (score, kind) = score_pair("search", "web search engine");
        assert_eq!(score, 0.8);
        assert_eq!(kind, MatchType::Partial);
    }

    #[test]
    fn test_semantic_overlap() {
        let (score, kind) = score_pair("read files quickly", "read remote files");
        assert_eq!(kind, MatchType::Semantic);
        // {read, files} / {read, files, quickly, remote}
        assert!((score - 0.5).abs() < 1e-9);

        let (score, _) = score_pair("image resize", "send email");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_below_threshold_dropped() {
        let matcher = CapabilityMatcher::default();
        let matches = matcher.match_capabilities(
            &["read files quickly"],
            &["read remote files", "read files quickly"],
            "tool-1",
        );
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].requirement, "read files quickly");
    }

    #[test]
    fn test_lower_threshold_admits_semantic() {
        let matcher = CapabilityMatcher::new(0.5);
        let matches = matcher.match_capabilities(&["read files quickly"], &["read remote files"], "t");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].match_type, MatchType::Semantic);
    }

    #[test]
    fn test_best_capability_wins_and_ties_keep_first() {
        let matcher = CapabilityMatcher::default();
        let matches = matcher.match_capabilities(
            &["database", "database tools", "Database Access"],
            &["database access"],
            "tool-1",
        );
        assert_eq!(matches[0].capability, "Database Access");
        assert_eq!(matches[0].match_type, MatchType::Exact);

        // both partial at 0.8; first one kept
        let matches = matcher.match_capabilities(&["database", "access"], &["database access"], "tool-1");
        assert_eq!(matches[0].capability, "database");
    }

    #[test]
    fn test_empty_inputs() {
        let matcher = CapabilityMatcher::default();
        let none: [&str; 0] = [];
        assert!(matcher.match_capabilities(&none, &["anything"], "t").is_empty());
        assert!(matcher.match_capabilities(&["search"], &none, "t").is_empty());
        assert!(matcher.match_capabilities(&["search"], &["   "], "t").is_empty());
    }
}
