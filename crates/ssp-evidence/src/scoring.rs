//! # Relevance Scoring
//!
//! Static integer score per candidate. Machine-readable configuration
//! must beat prose, so the extension weight dominates and every other term
//! is a small tie-breaker:
//!
//! | Term | Points |
//! |------|--------|
//! | extension weight | 15..100 |
//! | control id in file name | +10 |
//! | any keyword in file name | +8 |
//! | distinct keywords in content | +1 each, at most +6 |
//! | under a preferred subdirectory | +5 |
//! | short file name | `max(0, 40 - len) / 10` |
//!
//! All name and content checks are case-insensitive.

use std::path::PathBuf;

use serde::Serialize;

use ssp_core::ControlId;

use crate::config::EvidenceConfig;
use crate::discovery::Candidate;
use crate::read::{read_small_text, FileText};

const ID_IN_NAME: i64 = 10;
const KEYWORD_IN_NAME: i64 = 8;
const MAX_CONTENT_HITS: i64 = 6;
const PREFERRED_DIR: i64 = 5;
const SHORT_NAME_BASE: i64 = 40;

/// A scored candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedFile {
    /// Absolute path.
    pub path: PathBuf,
    /// Relevance score.
    pub score: i64,
}

/// Score one candidate given its (possibly empty) content.
pub fn score_candidate(
    candidate: &Candidate,
    content: &FileText,
    control: &ControlId,
    keywords: &[String],
    config: &EvidenceConfig,
) -> i64 {
    let name = candidate.file_name();
    let lowered_name = name.to_lowercase();
    let lowered_keywords: Vec<String> = keywords
        .iter()
        .filter(|k| !k.is_empty())
        .map(|k| k.to_lowercase())
        .collect();

    let mut score = config.weight_of(&candidate.extension).unwrap_or(0);

    if lowered_name.contains(&control.as_str().to_lowercase()) {
        score += ID_IN_NAME;
    }
    if lowered_keywords.iter().any(|k| lowered_name.contains(k.as_str())) {
        score += KEYWORD_IN_NAME;
    }

    if !content.is_empty() {
        let text = content.to_lowercase();
        let hits = lowered_keywords
            .iter()
            .filter(|k| text.contains(k.as_str()))
            .count() as i64;
        score += hits.min(MAX_CONTENT_HITS);
    }

    if candidate.preferred {
        score += PREFERRED_DIR;
    }

    let name_len = name.chars().count() as i64;
    score += (SHORT_NAME_BASE - name_len).max(0) / 10;

    score
}

/// Score every candidate and sort descending; ties keep discovery order.
pub fn rank(
    candidates: &[Candidate],
    control: &ControlId,
    keywords: &[String],
    config: &EvidenceConfig,
) -> Vec<RankedFile> {
    let mut ranked: Vec<RankedFile> = candidates
        .iter()
        .map(|c| {
            let content = read_small_text(&c.path, config.max_read_bytes);
            RankedFile {
                path: c.path.clone(),
                score: score_candidate(c, &content, control, keywords, config),
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}
