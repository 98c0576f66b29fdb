use std::collections::BTreeSet;

use regex::Regex;
use tracing::debug;

use crate::error::{AnalyzerError, Result};
use crate::fuzzy::partial_ratio;
use crate::models::EntityRecognizer;
use crate::skills::SkillReferenceSet;

// strictly above
pub const FUZZY_MATCH_THRESHOLD: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExactMatchMode {
    // "go" matches inside "mango"
    #[default]
    Substring,
    // literal hits that fail the boundary test are kept out of the fuzzy pass too
    WordBoundary,
}

pub struct SkillExtractor<'a> {
    skills: &'a SkillReferenceSet,
    recognizer: &'a dyn EntityRecognizer,
    mode: ExactMatchMode,
    boundary_patterns: Vec<(&'a str, Regex)>,
}

impl<'a> SkillExtractor<'a> {
    pub fn new(
        skills: &'a SkillReferenceSet,
        recognizer: &'a dyn EntityRecognizer,
        mode: ExactMatchMode,
    ) -> Result<Self> {
        let boundary_patterns = match mode {
            ExactMatchMode::Substring => Vec::new(),
            ExactMatchMode::WordBoundary => skills
                .iter()
                .map(|skill| {
                    let pattern = format!(r"(?:^|\W){}(?:\W|$)", regex::escape(skill));
                    Regex::new(&pattern)
                        .map(|re| (skill, re))
                        .map_err(|e| {
                            AnalyzerError::Config(format!("bad pattern for skill '{skill}': {e}"))
                        })
                })
                .collect::<Result<Vec<_>>>()?,
        };

        Ok(Self {
            skills,
            recognizer,
            mode,
            boundary_patterns,
        })
    }

    /// Sorted, deduplicated, lower-case skills found in `text`.
    pub fn extract_skills(&self, text: &str) -> Result<Vec<String>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let text_lower = text.to_lowercase();

        let exact = self.exact_matches(&text_lower);
        let fuzzy = self.fuzzy_matches(&text_lower, &exact);
        let entities = self.entity_matches(text)?;
        debug!(
            exact = exact.len(),
            fuzzy = fuzzy.len(),
            entities = entities.len(),
            "skill passes complete"
        );

        let mut found = exact;
        found.extend(fuzzy);
        found.extend(entities);
        Ok(found.into_iter().collect())
    }

    fn exact_matches(&self, text_lower: &str) -> BTreeSet<String> {
        match self.mode {
            ExactMatchMode::Substring => self
                .skills
                .iter()
                .filter(|skill| text_lower.contains(skill))
                .map(str::to_string)
                .collect(),
            ExactMatchMode::WordBoundary => self
                .boundary_patterns
                .iter()
                .filter(|(_, re)| re.is_match(text_lower))
                .map(|(skill, _)| skill.to_string())
                .collect(),
        }
    }

    fn fuzzy_matches(&self, text_lower: &str, already: &BTreeSet<String>) -> BTreeSet<String> {
        self.skills
            .iter()
            .filter(|skill| !already.contains(*skill))
            .filter(|skill| match self.mode {
                ExactMatchMode::Substring => true,
                ExactMatchMode::WordBoundary => !text_lower.contains(skill),
            })
            .filter(|skill| partial_ratio(skill, text_lower) > FUZZY_MATCH_THRESHOLD)
            .map(str::to_string)
            .collect()
    }

    fn entity_matches(&self, text: &str) -> Result<BTreeSet<String>> {
        Ok(self
            .recognizer
            .recognize(text)?
            .into_iter()
            .filter(|entity| entity.kind.is_skill_hint())
            .map(|entity| entity.text.trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::stubs::KeywordRecognizer;
    use crate::models::{EntityKind, NamedEntity};

    struct FailingRecognizer;

    impl EntityRecognizer for FailingRecognizer {
        fn recognize(&self, _text: &str) -> Result<Vec<NamedEntity>> {
            Err(AnalyzerError::EmptyModelOutput("named entity recognition"))
        }
    }

    fn extract(skills: &[&str], recognizer: &dyn EntityRecognizer, text: &str) -> Vec<String> {
        let set = SkillReferenceSet::from_skills(skills);
        SkillExtractor::new(&set, recognizer, ExactMatchMode::Substring)
            .unwrap()
            .extract_skills(text)
            .unwrap()
    }

    #[test]
    fn test_reference_skills_found_case_insensitively() {
        let found = extract(
            &["python", "sql", "java"],
            &KeywordRecognizer::none(),
            "Experienced with Python and SQL, 3 years, Education: BS CS",
        );
        assert_eq!(found, vec!["python", "sql"]);
    }

    #[test]
    fn test_job_description_scenario() {
        let found = extract(
            &["python", "sql", "java"],
            &KeywordRecognizer::none(),
            "Looking for Python and Java developer.",
        );
        assert_eq!(found, vec!["java", "python"]);
    }

    #[test]
    fn test_substring_mode_matches_inside_longer_words() {
        let found = extract(&["go"], &KeywordRecognizer::none(), "I love mango smoothies");
        assert_eq!(found, vec!["go"]);
    }

    #[test]
    fn test_word_boundary_mode_rejects_embedded_occurrences() {
        let set = SkillReferenceSet::from_skills(["go", "c++"]);
        let recognizer = KeywordRecognizer::none();
        let extractor =
            SkillExtractor::new(&set, &recognizer, ExactMatchMode::WordBoundary).unwrap();

        assert!(extractor.extract_skills("I love mango smoothies").unwrap().is_empty());
        assert_eq!(
            extractor.extract_skills("Wrote Go and C++ services").unwrap(),
            vec!["c++", "go"]
        );
    }

    #[test]
    fn test_fuzzy_pass_catches_spelling_variants() {
        let found = extract(
            &["machine learning"],
            &KeywordRecognizer::none(),
            "Built machine lerning pipelines",
        );
        assert_eq!(found, vec!["machine learning"]);
    }

    #[test]
    fn test_fuzzy_pass_ignores_distant_variants_of_short_skills() {
        let found = extract(&["rust"], &KeywordRecognizer::none(), "wrote rast code");
        assert!(found.is_empty());
    }

    #[test]
    fn test_entities_are_added_even_outside_reference_set() {
        let recognizer = KeywordRecognizer {
            entities: vec![
                ("Google", EntityKind::Organization),
                ("Kafka", EntityKind::Product),
                ("Ada Lovelace", EntityKind::Person),
                ("Berlin", EntityKind::Location),
            ],
        };
        let found = extract(
            &["python"],
            &recognizer,
            "Ada Lovelace used Python and Kafka at Google in Berlin",
        );
        assert_eq!(found, vec!["google", "kafka", "python"]);
    }

    #[test]
    fn test_empty_reference_set_yields_only_entities() {
        let recognizer = KeywordRecognizer {
            entities: vec![("Amazon", EntityKind::Organization)],
        };
        let found = extract(&[], &recognizer, "Five years at Amazon writing python");
        assert_eq!(found, vec!["amazon"]);
    }

    #[test]
    fn test_blank_text_skips_every_pass() {
        let set = SkillReferenceSet::from_skills(["python"]);
        let recognizer = FailingRecognizer;
        let extractor = SkillExtractor::new(&set, &recognizer, ExactMatchMode::Substring).unwrap();
        assert!(extractor.extract_skills("   \n").unwrap().is_empty());
    }

    #[test]
    fn test_recognizer_failure_propagates() {
        let set = SkillReferenceSet::from_skills(["python"]);
        let recognizer = FailingRecognizer;
        let extractor = SkillExtractor::new(&set, &recognizer, ExactMatchMode::Substring).unwrap();
        assert!(extractor.extract_skills("python").is_err());
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let text = "Docker, Kubernetes and Terraform on AWS; some kubernets too";
        let skills = ["docker", "kubernetes", "terraform", "aws", "azure"];
        let first = extract(&skills, &KeywordRecognizer::none(), text);
        let second = extract(&skills, &KeywordRecognizer::none(), text);
        assert_eq!(first, second);
        let mut sorted = first.clone();
        sorted.sort();
        assert_eq!(first, sorted);
    }

    #[test]
    fn test_growing_reference_set_never_drops_matches() {
        let text = "Led data engineering with Spark, Airflow and PostgreSQL";
        let small = extract(&["spark", "airflow"], &KeywordRecognizer::none(), text);
        let large = extract(
            &["spark", "airflow", "postgresql", "data engineering", "haskell"],
            &KeywordRecognizer::none(),
            text,
        );
        for skill in &small {
            assert!(large.contains(skill), "{skill} dropped");
        }
        assert!(large.len() > small.len());
    }
}
