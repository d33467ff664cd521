//! Semantic version strings (`major.minor.micro[-prerelease][+build]`)

use std::sync::LazyLock;

use regex::Regex;

static VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)(?:-([a-zA-Z0-9.\-]+))?(?:\+([a-zA-Z0-9.\-]+))?$")
        .expect("version grammar is a valid regex")
});

/// Decomposed component version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub micro: u64,
    pub prerelease: Option<String>,
    pub build: Option<String>,
}

impl SemanticVersion {
    /// Parse a version string, `None` when it does not match the grammar
    pub fn parse(version: &str) -> Option<Self> {
        let captures = VERSION.captures(version)?;
        let number = |index: usize| captures.get(index)?.as_str().parse::<u64>().ok();

        Some(SemanticVersion {
            major: number(1)?,
            minor: number(2)?,
            micro: number(3)?,
            prerelease: captures.get(4).map(|m| m.as_str().to_string()),
            build: captures.get(5).map(|m| m.as_str().to_string()),
        })
    }
}
