//! # Version Handling
//!
//! File: release/src/version.rs
//!
//! Parses and bumps `MAJOR.MINOR.PATCH` versions and rewrites the version
//! literal in the two files that carry it:
//!
//! - `cli/src/version.rs`: `pub const VERSION: &str = "X.Y.Z";`
//! - `cli/Cargo.toml`: `version = "X.Y.Z"` at the start of a line
//!
//! Only the first match in each file is rewritten, so dependency entries
//! further down a manifest keep their own versions.
//!
use crate::error::ReleaseError;
use regex::{Captures, Regex};
use std::{fmt, fs, path::Path, str::FromStr, sync::LazyLock};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Increments the patch component, leaving major and minor alone.
    ///
    /// # Errors
    ///
    /// `ReleaseError::InvalidVersion` when the patch is already `u64::MAX`.
    pub fn bump_patch(self) -> Result<Self, ReleaseError> {
        let patch = self
            .patch
            .checked_add(1)
            .ok_or_else(|| ReleaseError::InvalidVersion(self.to_string()))?;
        Ok(Self { patch, ..self })
    }
}

impl FromStr for Version {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ReleaseError::InvalidVersion(s.to_string());
        let mut parts = s.split('.').map(|p| p.parse::<u64>().map_err(|_| invalid()));
        let (Some(major), Some(minor), Some(patch), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        Ok(Self {
            major: major?,
            minor: minor?,
            patch: patch?,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

static SOURCE_CONST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(VERSION: &str = ")([^"]+)(")"#).expect("source version pattern is valid")
});

static MANIFEST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^(version\s*=\s*")([^"]+)(")"#).expect("manifest version pattern is valid")
});

/// Which file layout a version literal lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSite {
    /// `VERSION: &str = "X.Y.Z"` in a Rust source file.
    SourceConst,
    /// `version = "X.Y.Z"` in a Cargo manifest.
    Manifest,
}

impl VersionSite {
    fn pattern(self) -> &'static str {
        self.regex().as_str()
    }

    fn regex(self) -> &'static Regex {
        match self {
            VersionSite::SourceConst => &*SOURCE_CONST_RE,
            VersionSite::Manifest => &*MANIFEST_RE,
        }
    }

    fn not_found(self, path: &Path) -> ReleaseError {
        ReleaseError::VersionNotFound {
            path: path.to_path_buf(),
            pattern: self.pattern().to_string(),
        }
    }

    /// Finds the first version literal in `content`.
    pub fn find(self, content: &str) -> Option<String> {
        self.regex()
            .captures(content)
            .map(|caps| caps[2].to_string())
    }

    /// Replaces the first version literal in `content` with `new`.
    /// Returns `None` when there is nothing to replace.
    pub fn rewrite(self, content: &str, new: &Version) -> Option<String> {
        let re = self.regex();
        if !re.is_match(content) {
            return None;
        }
        let replaced = re.replacen(content, 1, |caps: &Captures| {
            format!("{}{}{}", &caps[1], new, &caps[3])
        });
        Some(replaced.into_owned())
    }
}

fn read(path: &Path) -> Result<String, ReleaseError> {
    fs::read_to_string(path).map_err(|source| ReleaseError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses the current version from `path`.
pub fn read_version(path: &Path, site: VersionSite) -> Result<Version, ReleaseError> {
    let content = read(path)?;
    let raw = site.find(&content).ok_or_else(|| site.not_found(path))?;
    debug!("Found version '{}' in {}", raw, path.display());
    raw.parse()
}

/// Rewrites the version literal in `path` to `new`.
pub fn write_version(path: &Path, site: VersionSite, new: &Version) -> Result<(), ReleaseError> {
    let content = read(path)?;
    let updated = site
        .rewrite(&content, new)
        .ok_or_else(|| site.not_found(path))?;
    fs::write(path, updated).map_err(|source| ReleaseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote version {} to {}", new, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"[package]
name = "dtool"
version = "0.1.9"
edition = "2021"

[dependencies]
clap = { version = "4.5", features = ["derive"] }

[dev-dependencies.tempfile]
version = "3.0.0"
"#;

    #[test]
    fn test_bump_patch() {
        let v: Version = "1.2.3".parse().unwrap();
        assert_eq!(v.bump_patch().unwrap().to_string(), "1.2.4");
        let v: Version = "0.1.9".parse().unwrap();
        assert_eq!(v.bump_patch().unwrap().to_string(), "0.1.10");
    }

    #[test]
    fn test_bump_patch_overflow_is_an_error() {
        let v = Version {
            major: 1,
            minor: 2,
            patch: u64::MAX,
        };
        assert!(matches!(
            v.bump_patch(),
            Err(ReleaseError::InvalidVersion(s)) if s == format!("1.2.{}", u64::MAX)
        ));
    }

    #[test]
    fn test_patterns_are_shared() {
        let first = VersionSite::Manifest.regex() as *const Regex;
        let second = VersionSite::Manifest.regex() as *const Regex;
        assert_eq!(first, second);
        assert!(VersionSite::SourceConst.pattern().starts_with("(VERSION"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["1.2", "1.2.3.4", "1.x.3", "", "v1.2.3", "1.2.-3"] {
            assert!(
                matches!(bad.parse::<Version>(), Err(ReleaseError::InvalidVersion(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_source_const_find_and_rewrite() {
        let src = "//! docs\n\npub const VERSION: &str = \"0.4.2\";\n";
        assert_eq!(VersionSite::SourceConst.find(src).as_deref(), Some("0.4.2"));
        let out = VersionSite::SourceConst
            .rewrite(src, &"0.4.3".parse().unwrap())
            .unwrap();
        assert_eq!(out, "//! docs\n\npub const VERSION: &str = \"0.4.3\";\n");
    }

    #[test]
    fn test_manifest_rewrites_package_version_only() {
        let out = VersionSite::Manifest
            .rewrite(MANIFEST, &"0.1.10".parse().unwrap())
            .unwrap();
        assert!(out.contains("version = \"0.1.10\"\nedition"));
        assert!(out.contains("clap = { version = \"4.5\""));
        assert!(out.contains("version = \"3.0.0\""));
    }

    #[test]
    fn test_rewrite_without_match() {
        assert!(VersionSite::Manifest
            .rewrite("[package]\nname = \"x\"\n", &"1.0.0".parse().unwrap())
            .is_none());
        assert!(VersionSite::SourceConst.find("const OTHER: u8 = 1;").is_none());
    }

    #[test]
    fn test_read_and_write_version_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("version.rs");
        fs::write(&path, "pub const VERSION: &str = \"2.0.0\";\n").unwrap();

        let current = read_version(&path, VersionSite::SourceConst).unwrap();
        assert_eq!(current.to_string(), "2.0.0");
        write_version(&path, VersionSite::SourceConst, &current.bump_patch().unwrap()).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "pub const VERSION: &str = \"2.0.1\";\n"
        );
    }

    #[test]
    fn test_read_version_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.rs");
        assert!(matches!(
            read_version(&missing, VersionSite::SourceConst),
            Err(ReleaseError::Io { .. })
        ));

        let garbled = dir.path().join("garbled.rs");
        fs::write(&garbled, "pub const VERSION: &str = \"next\";\n").unwrap();
        assert!(matches!(
            read_version(&garbled, VersionSite::SourceConst),
            Err(ReleaseError::InvalidVersion(v)) if v == "next"
        ));
    }
}
