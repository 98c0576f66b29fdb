use std::path::PathBuf;

use tch::Device;

use crate::error::{AnalyzerError, Result};
use crate::skills::DEFAULT_SKILLS_FILE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevicePreference {
    Auto,
    Cpu,
    Cuda,
}

impl DevicePreference {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "auto" => Ok(DevicePreference::Auto),
            "cpu" => Ok(DevicePreference::Cpu),
            "cuda" | "gpu" => Ok(DevicePreference::Cuda),
            other => Err(AnalyzerError::Config(format!(
                "ANALYZER_DEVICE must be one of auto, cpu, cuda (got '{other}')"
            ))),
        }
    }

    pub fn to_device(self) -> Device {
        match self {
            DevicePreference::Auto => Device::cuda_if_available(),
            DevicePreference::Cpu => Device::Cpu,
            DevicePreference::Cuda => Device::Cuda(0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub skills_file: PathBuf,
    pub rust_log: String,
    pub device: DevicePreference,
    pub word_boundary_matching: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            skills_file: PathBuf::from(DEFAULT_SKILLS_FILE),
            rust_log: "info".to_string(),
            device: DevicePreference::Auto,
            word_boundary_matching: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        Ok(Config {
            skills_file: lookup("SKILLS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.skills_file),
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            device: match lookup("ANALYZER_DEVICE") {
                Some(value) => DevicePreference::parse(&value)?,
                None => defaults.device,
            },
            word_boundary_matching: match lookup("SKILL_MATCH_WORD_BOUNDARY") {
                Some(value) => parse_bool("SKILL_MATCH_WORD_BOUNDARY", &value)?,
                None => defaults.word_boundary_matching,
            },
        })
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AnalyzerError::Config(format!(
            "{key} must be a boolean (got '{other}')"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.skills_file, PathBuf::from("skills_list.txt"));
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.device, DevicePreference::Auto);
        assert!(!config.word_boundary_matching);
    }

    #[test]
    fn test_overrides_are_read() {
        let config = Config::from_lookup(lookup_from(&[
            ("SKILLS_FILE", "/data/skills.txt"),
            ("RUST_LOG", "debug"),
            ("ANALYZER_DEVICE", "CPU"),
            ("SKILL_MATCH_WORD_BOUNDARY", "yes"),
        ]))
        .unwrap();
        assert_eq!(config.skills_file, PathBuf::from("/data/skills.txt"));
        assert_eq!(config.rust_log, "debug");
        assert_eq!(config.device, DevicePreference::Cpu);
        assert!(config.word_boundary_matching);
    }

    #[test]
    fn test_bad_device_is_a_config_error() {
        let err = Config::from_lookup(lookup_from(&[("ANALYZER_DEVICE", "tpu")])).unwrap_err();
        assert!(matches!(err, AnalyzerError::Config(_)));
    }

    #[test]
    fn test_bad_boolean_is_a_config_error() {
        let err =
            Config::from_lookup(lookup_from(&[("SKILL_MATCH_WORD_BOUNDARY", "maybe")])).unwrap_err();
        assert!(matches!(err, AnalyzerError::Config(_)));
    }

    #[test]
    fn test_cpu_preference_maps_to_cpu_device() {
        assert_eq!(DevicePreference::Cpu.to_device(), Device::Cpu);
    }
}
