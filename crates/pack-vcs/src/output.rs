//! Parsers for the text printed by git, hg and bzr.

use once_cell::sync::Lazy;
use pack_core::types::Version;
use regex::Regex;

// `git describe` appends -<commits>-g<hash> when HEAD is past the tag
static GIT_DESCRIBE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-[0-9]+-g[0-9a-f]+\s*$").expect("describe pattern is valid"));

/// Printed by `git describe` in a repository without tags
pub const GIT_NO_TAGS: &str = "No names found";

/// Version-shaped tags from a tag listing, one tag per line in the first column
///
/// Covers `git tag -l` as well as the `tag revision` tables of `hg tags` and
/// `bzr tags`. Other tags (`tip`, `release-x`) are skipped.
pub fn parse_tags(stdout: &str) -> Vec<Version> {
    let mut tags: Vec<Version> = stdout
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .filter_map(|tag| Version::parse(tag).ok())
        .collect();

    tags.sort();
    tags.dedup();
    tags
}

/// Tag reported by `git describe --tags`, `None` when HEAD is not on a tag
pub fn parse_git_describe(stdout: &str) -> Option<Version> {
    let described = stdout.trim();
    if described.is_empty() || GIT_DESCRIBE_SUFFIX.is_match(described) {
        return None;
    }

    Version::parse(described).ok()
}

/// First version tag from `hg identify`, e.g. `5b3c2f1e4a7d 1.2.0/tip`
pub fn parse_hg_identify(stdout: &str) -> Option<Version> {
    stdout
        .split_whitespace()
        .nth(1)?
        .split('/')
        .find_map(|tag| Version::parse(tag).ok())
}
