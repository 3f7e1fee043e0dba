//! Scenario files.
//!
//! A scenario lists the threads to explore, in order, each with its raw
//! action tokens, plus optional exploration limits:
//!
//! ```toml
//! [explore]
//! max_permutations = 24
//!
//! [[threads]]
//! id = "Thread1"
//! actions = ["LOCK R1", "1", "UNLOCK R1"]
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::thread::Thread;

/// Top-level scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub explore: ExploreConfig,

    #[serde(default)]
    pub threads: Vec<ThreadConfig>,
}

/// Exploration limits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExploreConfig {
    /// Stop after this many permutations. Unset means all `n!`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_permutations: Option<u64>,
}

/// One thread and its raw action tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadConfig {
    pub id: String,
    #[serde(default)]
    pub actions: Vec<String>,
}

impl Scenario {
    /// Two threads contending for one resource, each releasing it before
    /// finishing.
    pub fn canonical() -> Self {
        Self {
            explore: ExploreConfig::default(),
            threads: vec![
                ThreadConfig {
                    id: "Thread1".to_string(),
                    actions: vec!["LOCK R1".into(), "1".into(), "UNLOCK R1".into()],
                },
                ThreadConfig {
                    id: "Thread2".to_string(),
                    actions: vec!["LOCK R1".into(), "2".into(), "UNLOCK R1".into()],
                },
            ],
        }
    }

    /// Load a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid, a thread id is empty, or a
    /// thread id appears twice.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let scenario: Self = toml::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Serialize the scenario to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check thread ids are non-empty and unique.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the offending thread.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (index, thread) in self.threads.iter().enumerate() {
            if thread.id.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "thread #{index} has an empty id"
                )));
            }
            if !seen.insert(thread.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate thread id '{}'",
                    thread.id
                )));
            }
        }
        Ok(())
    }

    /// Replace the file's permutation limit when `limit` is set; `None`
    /// keeps whatever the scenario already says.
    pub fn override_max_permutations(&mut self, limit: Option<u64>) {
        if limit.is_some() {
            self.explore.max_permutations = limit;
        }
    }

    /// Build runnable threads in file order.
    pub fn threads(&self) -> Vec<Thread> {
        self.threads
            .iter()
            .map(|t| Thread::from_tokens(t.id.as_str(), &t.actions))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Action, ResourceId};

    #[test]
    fn test_parse_minimal() {
        let scenario = Scenario::from_toml(
            r#"
            [[threads]]
            id = "T1"
            actions = ["LOCK R1", "UNLOCK R1"]
            "#,
        )
        .unwrap();
        assert_eq!(scenario.explore.max_permutations, None);
        assert_eq!(scenario.threads.len(), 1);

        let threads = scenario.threads();
        assert_eq!(threads[0].id().as_str(), "T1");
        assert_eq!(threads[0].actions()[0], Action::Lock(ResourceId::from("R1")));
    }

    #[test]
    fn test_parse_limits_and_order() {
        let scenario = Scenario::from_toml(
            r#"
            [explore]
            max_permutations = 3

            [[threads]]
            id = "B"
            actions = ["b"]

            [[threads]]
            id = "A"
            "#,
        )
        .unwrap();
        assert_eq!(scenario.explore.max_permutations, Some(3));
        let ids: Vec<&str> = scenario.threads.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
        assert!(scenario.threads[1].actions.is_empty());
    }

    #[test]
    fn test_duplicate_thread_rejected() {
        let err = Scenario::from_toml(
            r#"
            [[threads]]
            id = "T"
            [[threads]]
            id = "T"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn test_empty_thread_id_rejected() {
        let err = Scenario::from_toml(
            r#"
            [[threads]]
            id = "  "
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_invalid_toml() {
        let err = Scenario::from_toml("[[threads]\nid = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_canonical_round_trips_through_toml() {
        let canonical = Scenario::canonical();
        let text = canonical.to_toml().unwrap();
        assert!(text.contains("Thread1"));
        assert_eq!(Scenario::from_toml(&text).unwrap(), canonical);
    }

    #[test]
    fn test_override_replaces_file_limit() {
        let mut scenario =
            Scenario::from_toml("[explore]\nmax_permutations = 10\n").unwrap();
        scenario.override_max_permutations(Some(3));
        assert_eq!(scenario.explore.max_permutations, Some(3));
    }

    #[test]
    fn test_override_none_keeps_file_limit() {
        let mut scenario =
            Scenario::from_toml("[explore]\nmax_permutations = 10\n").unwrap();
        scenario.override_max_permutations(None);
        assert_eq!(scenario.explore.max_permutations, Some(10));

        let mut unlimited = Scenario::canonical();
        unlimited.override_max_permutations(None);
        assert_eq!(unlimited.explore.max_permutations, None);
        unlimited.override_max_permutations(Some(1));
        assert_eq!(unlimited.explore.max_permutations, Some(1));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenario.toml");
        std::fs::write(&path, "[[threads]]\nid = \"X\"\nactions = [\"go\"]\n").unwrap();
        let scenario = Scenario::from_file(&path).unwrap();
        assert_eq!(scenario.threads[0].id, "X");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Scenario::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
