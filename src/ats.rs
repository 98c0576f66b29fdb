use std::fmt;

use serde::Serialize;

use crate::utils::word_count;

pub const TABLE_MARKER: &str = "table";
pub const MIN_WORD_COUNT: usize = 150;
pub const SECTION_KEYWORDS: [&str; 3] = ["experience", "education", "skills"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Pass,
}

impl Severity {
    pub fn marker(self) -> &'static str {
        match self {
            Severity::Error => "[x]",
            Severity::Warning => "[!]",
            Severity::Pass => "[ok]",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AtsFinding {
    ContainsTables,
    TooShort,
    MissingSections,
    NoDates,
    AtsFriendly,
}

impl AtsFinding {
    pub fn severity(self) -> Severity {
        match self {
            AtsFinding::ContainsTables | AtsFinding::MissingSections => Severity::Error,
            AtsFinding::TooShort | AtsFinding::NoDates => Severity::Warning,
            AtsFinding::AtsFriendly => Severity::Pass,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            AtsFinding::ContainsTables => "Contains tables (ATS may not read them).",
            AtsFinding::TooShort => "Resume seems too short (<150 words).",
            AtsFinding::MissingSections => "Missing common sections (Experience/Education/Skills).",
            AtsFinding::NoDates => "No dates found, ATS may think experience is missing.",
            AtsFinding::AtsFriendly => "ATS-friendly formatting detected.",
        }
    }
}

impl fmt::Display for AtsFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.severity().marker(), self.message())
    }
}

/// Runs every check in a fixed order; several may fire. "Dates" means any
/// Unicode digit, so `٣` counts. No findings gives `[AtsFriendly]`.
pub fn ats_check(text: &str) -> Vec<AtsFinding> {
    let lower = text.to_lowercase();
    let mut findings = Vec::new();

    if lower.contains(TABLE_MARKER) {
        findings.push(AtsFinding::ContainsTables);
    }
    if word_count(text) < MIN_WORD_COUNT {
        findings.push(AtsFinding::TooShort);
    }
    if !SECTION_KEYWORDS.iter().any(|section| lower.contains(section)) {
        findings.push(AtsFinding::MissingSections);
    }
    if !text.chars().any(char::is_numeric) {
        findings.push(AtsFinding::NoDates);
    }

    if findings.is_empty() {
        findings.push(AtsFinding::AtsFriendly);
    }
    findings
}
