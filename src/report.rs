use crate::analysis::AnalysisReport;

const BAR_WIDTH: usize = 40;

pub const NO_RESUME_SKILLS: &str = "No specific skills detected.";
pub const NO_MATCHED_SKILLS: &str = "No matches found.";
pub const NO_MISSING_SKILLS: &str = "None!";

pub fn format_score(score: f64) -> String {
    format!("{score:.2}%")
}

pub fn render_json(report: &AnalysisReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

pub fn render_text(report: &AnalysisReport, show_text: bool) -> String {
    let matched = report.skill_gap.matched.len();
    let missing = report.skill_gap.missing.len();
    let max = matched.max(missing);

    let mut lines = vec![
        "== Match Score ==".to_string(),
        format!("AI Match Score: {}", format_score(report.match_score)),
        report.band.message().to_string(),
        String::new(),
        "== Extracted Skills ==".to_string(),
        format!(
            "Skills in Resume: {}",
            skill_list(&report.resume_skills, NO_RESUME_SKILLS)
        ),
        format!(
            "Matched Skills (Resume & JD): {}",
            skill_list(&report.skill_gap.matched, NO_MATCHED_SKILLS)
        ),
        format!(
            "Missing Skills (from JD): {}",
            skill_list(&report.skill_gap.missing, NO_MISSING_SKILLS)
        ),
        String::new(),
        "== Resume vs Job Description Skills ==".to_string(),
        format!("Matched | {} {}", bar(matched, max), matched),
        format!("Missing | {} {}", bar(missing, max), missing),
        String::new(),
        "== Resume Summary ==".to_string(),
        report.summary.clone(),
        String::new(),
        "== ATS Compatibility Check ==".to_string(),
    ];
    lines.extend(report.ats_findings.iter().map(ToString::to_string));

    if show_text {
        lines.push(String::new());
        lines.push("== Full Extracted Resume Text ==".to_string());
        lines.push(report.resume_text.clone());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn skill_list(skills: &[String], empty: &str) -> String {
    if skills.is_empty() {
        empty.to_string()
    } else {
        skills.join(", ")
    }
}

fn bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    "#".repeat(count * BAR_WIDTH / max)
}
