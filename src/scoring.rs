use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::models::Embedder;
use crate::utils::compute_cosine_similarity;

pub const WEAK_MATCH_CEILING: f64 = 40.0;
pub const STRONG_MATCH_FLOOR: f64 = 70.0;

/// Semantic similarity of the two texts on a 0-100 scale: the cosine of
/// their sentence embeddings times 100. Long inputs are truncated by the
/// embedding model itself. Negative cosines clamp to 0.
pub fn ai_match_score(embedder: &dyn Embedder, resume_text: &str, jd_text: &str) -> Result<f64> {
    let resume_embedding = embedder.embed(resume_text)?;
    let jd_embedding = embedder.embed(jd_text)?;
    let similarity = compute_cosine_similarity(&resume_embedding, &jd_embedding) as f64;
    debug!(similarity, "cosine similarity between resume and job description");
    Ok((similarity * 100.0).clamp(0.0, 100.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchBand {
    Weak,
    Medium,
    Strong,
}

impl MatchBand {
    pub fn from_score(score: f64) -> Self {
        if score < WEAK_MATCH_CEILING {
            MatchBand::Weak
        } else if score < STRONG_MATCH_FLOOR {
            MatchBand::Medium
        } else {
            MatchBand::Strong
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            MatchBand::Weak => "Weak Match: Resume does not align well with the job description. Add missing skills & keywords.",
            MatchBand::Medium => "Medium Match: Resume covers some skills, but could be improved.",
            MatchBand::Strong => "Strong Match: Resume aligns well with the job description!",
        }
    }
}
