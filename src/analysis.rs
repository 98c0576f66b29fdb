use std::collections::BTreeSet;

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::info;

use crate::ats::{ats_check, AtsFinding};
use crate::error::Result;
use crate::extractor::{ExactMatchMode, SkillExtractor};
use crate::models::ModelSet;
use crate::pdf::extract_text_from_pdf;
use crate::scoring::{ai_match_score, MatchBand};
use crate::skills::SkillReferenceSet;
use crate::summarizer::summarize_resume;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillGap {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

impl SkillGap {
    pub fn between(resume_skills: &[String], jd_skills: &[String]) -> Self {
        let resume: BTreeSet<&String> = resume_skills.iter().collect();
        let jd: BTreeSet<&String> = jd_skills.iter().collect();
        Self {
            matched: resume.intersection(&jd).map(|s| s.to_string()).collect(),
            missing: jd.difference(&resume).map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub match_score: f64,
    pub band: MatchBand,
    pub resume_skills: Vec<String>,
    pub jd_skills: Vec<String>,
    pub skill_gap: SkillGap,
    pub summary: String,
    pub ats_findings: Vec<AtsFinding>,
    pub resume_text: String,
    pub generated_at: DateTime<Local>,
}

pub struct Analyzer {
    models: ModelSet,
    skills: SkillReferenceSet,
    mode: ExactMatchMode,
}

impl Analyzer {
    pub fn new(models: ModelSet, skills: SkillReferenceSet, mode: ExactMatchMode) -> Self {
        Self {
            models,
            skills,
            mode,
        }
    }

    pub fn analyze_pdf(&self, pdf_bytes: &[u8], jd_text: &str) -> Result<AnalysisReport> {
        info!("Extracting resume text...");
        let resume_text = extract_text_from_pdf(pdf_bytes)?;
        self.analyze(resume_text, jd_text)
    }

    /// Score, skills, summary and ATS findings, in that order. The first
    /// failing stage fails the whole analysis.
    pub fn analyze(&self, resume_text: String, jd_text: &str) -> Result<AnalysisReport> {
        info!("Computing match score...");
        let match_score = ai_match_score(self.models.embedder.as_ref(), &resume_text, jd_text)?;

        info!("Extracting skills...");
        let extractor =
            SkillExtractor::new(&self.skills, self.models.recognizer.as_ref(), self.mode)?;
        let resume_skills = extractor.extract_skills(&resume_text)?;
        let jd_skills = extractor.extract_skills(jd_text)?;
        let skill_gap = SkillGap::between(&resume_skills, &jd_skills);

        info!("Summarizing resume...");
        let summary = summarize_resume(self.models.summarizer.as_ref(), &resume_text)?;

        let ats_findings = ats_check(&resume_text);
        info!(
            score = match_score,
            matched = skill_gap.matched.len(),
            missing = skill_gap.missing.len(),
            "Analysis complete"
        );

        Ok(AnalysisReport {
            match_score,
            band: MatchBand::from_score(match_score),
            resume_skills,
            jd_skills,
            skill_gap,
            summary,
            ats_findings,
            resume_text,
            generated_at: Local::now(),
        })
    }
}
