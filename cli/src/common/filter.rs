//! # dtool Container Filtering
//!
//! File: cli/src/common/filter.rs
//!
//! Narrows a container listing down to the entries matching a user token.
//! Pure functions only; the daemon is never consulted.
//!
//! - **Exact** (default): the token equals the name, equals the full ID, or is
//!   a prefix of the ID (`dtool ps e3f1d2`). Case-sensitive.
//! - **Regex** (`--regex`): the token, compiled case-insensitively, matches
//!   anywhere in the name or the ID.
//!
//! The input order is kept and records are never modified.
//!
use crate::common::docker::ContainerRecord;
use crate::core::error::DtoolError;
use regex::RegexBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    #[default]
    Exact,
    Regex,
}

/// Filter request built from `ps` arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub token: Option<String>,
    pub mode: MatchMode,
    /// Include non-running containers in the listing this filter is applied to.
    pub include_stopped: bool,
}

impl FilterSpec {
    /// The token, if it is present and non-empty.
    fn active_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}

fn exact_match(record: &ContainerRecord, token: &str) -> bool {
    record.name == token || record.id == token || record.id.starts_with(token)
}

/// Keeps the records matching `spec`, in their original order.
///
/// # Errors
///
/// `DtoolError::InvalidFilterPattern` when regex mode is requested and the
/// token does not compile. Nothing is filtered in that case.
pub fn filter_containers(
    containers: Vec<ContainerRecord>,
    spec: &FilterSpec,
) -> Result<Vec<ContainerRecord>, DtoolError> {
    let Some(token) = spec.active_token() else {
        return Ok(containers);
    };

    match spec.mode {
        MatchMode::Exact => Ok(containers
            .into_iter()
            .filter(|c| exact_match(c, token))
            .collect()),
        MatchMode::Regex => {
            let pattern = RegexBuilder::new(token)
                .case_insensitive(true)
                .build()
                .map_err(|source| DtoolError::InvalidFilterPattern {
                    token: token.to_string(),
                    source,
                })?;
            Ok(containers
                .into_iter()
                .filter(|c| pattern.is_match(&c.name) || pattern.is_match(&c.id))
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::docker::{ContainerStatus, ImageInfo};

    fn record(id: &str, name: &str) -> ContainerRecord {
        ContainerRecord {
            id: id.to_string(),
            short_id: id.chars().take(12).collect(),
            name: name.to_string(),
            image: ImageInfo::default(),
            status: ContainerStatus::Running,
            ports: Vec::new(),
        }
    }

    fn sample() -> Vec<ContainerRecord> {
        vec![
            record("e3f1d2a9b8c7d6e5f4a3", "web-frontend"),
            record("a1b2c3d4e5f6a7b8c9d0", "api"),
            record("e3f1ffff00001111aaaa", "Worker-1"),
            record("0000111122223333aaaa", "db"),
        ]
    }

    fn names(records: &[ContainerRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    fn spec(token: &str, mode: MatchMode) -> FilterSpec {
        FilterSpec {
            token: Some(token.to_string()),
            mode,
            include_stopped: false,
        }
    }

    #[test]
    fn test_empty_token_is_identity() {
        let input = sample();
        let absent = filter_containers(input.clone(), &FilterSpec::default()).unwrap();
        assert_eq!(absent, input);
        let empty = filter_containers(input.clone(), &spec("", MatchMode::Regex)).unwrap();
        assert_eq!(empty, input);
    }

    #[test]
    fn test_exact_prefix_matches_short_id() {
        let out = filter_containers(sample(), &spec("e3f1d2", MatchMode::Exact)).unwrap();
        assert_eq!(names(&out), ["web-frontend"]);
    }

    #[test]
    fn test_exact_shared_prefix_keeps_order() {
        let out = filter_containers(sample(), &spec("e3f1", MatchMode::Exact)).unwrap();
        assert_eq!(names(&out), ["web-frontend", "Worker-1"]);
    }

    #[test]
    fn test_exact_name_and_full_id() {
        let by_name = filter_containers(sample(), &spec("api", MatchMode::Exact)).unwrap();
        assert_eq!(names(&by_name), ["api"]);
        let by_id =
            filter_containers(sample(), &spec("0000111122223333aaaa", MatchMode::Exact)).unwrap();
        assert_eq!(names(&by_id), ["db"]);
    }

    #[test]
    fn test_exact_is_case_sensitive_and_not_substring() {
        let upper = filter_containers(sample(), &spec("API", MatchMode::Exact)).unwrap();
        assert!(upper.is_empty());
        let partial = filter_containers(sample(), &spec("front", MatchMode::Exact)).unwrap();
        assert!(partial.is_empty());
    }

    #[test]
    fn test_exact_results_satisfy_predicate() {
        for token in ["e", "a1", "db", "zzz", "0000"] {
            let out = filter_containers(sample(), &spec(token, MatchMode::Exact)).unwrap();
            assert!(out.iter().all(|c| exact_match(c, token)));
            assert!(out.iter().all(|c| sample().contains(c)));
        }
    }

    #[test]
    fn test_regex_is_case_insensitive_substring() {
        let out = filter_containers(sample(), &spec("worker", MatchMode::Regex)).unwrap();
        assert_eq!(names(&out), ["Worker-1"]);
        let out = filter_containers(sample(), &spec("^(api|db)$", MatchMode::Regex)).unwrap();
        assert_eq!(names(&out), ["api", "db"]);
    }

    #[test]
    fn test_regex_matches_id() {
        let out = filter_containers(sample(), &spec("AAAA$", MatchMode::Regex)).unwrap();
        assert_eq!(names(&out), ["Worker-1", "db"]);
    }

    #[test]
    fn test_regex_matching_empty_string_keeps_all() {
        let out = filter_containers(sample(), &spec(".*", MatchMode::Regex)).unwrap();
        assert_eq!(out, sample());
    }

    #[test]
    fn test_invalid_regex_fails() {
        let err = filter_containers(sample(), &spec("web(", MatchMode::Regex)).unwrap_err();
        match err {
            DtoolError::InvalidFilterPattern { token, .. } => assert_eq!(token, "web("),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_regex_text_is_fine_in_exact_mode() {
        let out = filter_containers(sample(), &spec("web(", MatchMode::Exact)).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let out = filter_containers(sample(), &spec("nothing-here", MatchMode::Regex)).unwrap();
        assert!(out.is_empty());
    }
}
