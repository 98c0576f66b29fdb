use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{info, warn};

use crate::error::Result;

pub const DEFAULT_SKILLS_FILE: &str = "skills_list.txt";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillReferenceSet {
    skills: BTreeSet<String>,
}

impl SkillReferenceSet {
    // missing file => empty set
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(
                    "Skills file {} not found; continuing with an empty skill list",
                    path.display()
                );
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let set = Self::from_skills(contents.lines());
        info!("Loaded {} skills from {}", set.len(), path.display());
        Ok(set)
    }

    pub fn from_skills<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let skills = skills
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { skills }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}
