use std::path::{Path, PathBuf};
use std::time::Duration;

use pack_core::error::{PackError, PackResult};
use pack_core::types::{Dependency, Version};

use crate::repository::Repository;
use crate::source::CloneSource;

/// Result of fetching one dependency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    /// Working copy location
    pub path: PathBuf,
    /// Whether the repository was cloned rather than updated
    pub cloned: bool,
    /// Tag that was checked out, `None` when the repository has no version tags
    pub version: Option<Version>,
}

/// Clone or update a dependency and check out its best matching tag
pub fn fetch_dependency(
    dependency: &Dependency,
    target: &Path,
    timeout: Duration,
) -> PackResult<FetchOutcome> {
    let locator = dependency
        .locator()
        .ok_or_else(|| PackError::ConfigValidation {
            field: dependency.name().to_string(),
            reason: "has no version-control locator to fetch from".to_string(),
        })?;

    let source = CloneSource::for_locator(locator)?;
    let repo = Repository::new(locator.scheme(), target).with_timeout(timeout);

    let cloned = repo.clone_from(&source)?;
    if !cloned {
        repo.update()?;
    }

    let tags = repo.tags()?;
    let version = if tags.is_empty() {
        tracing::warn!(
            "{} has no version tags, leaving the default revision checked out",
            dependency.name()
        );
        None
    } else {
        let best = dependency
            .best_match(&tags)
            .cloned()
            .ok_or_else(|| PackError::Unsatisfied {
                name: dependency.name().to_string(),
                constraints: dependency.constraints_text(),
            })?;

        repo.checkout(&best.to_string())?;
        Some(best)
    };

    tracing::info!(
        "Fetched {} {} into {}",
        dependency.name(),
        version.as_ref().map_or_else(|| "(untagged)".to_string(), ToString::to_string),
        target.display()
    );

    Ok(FetchOutcome {
        path: target.to_path_buf(),
        cloned,
        version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::CommandBuilder;
    use tempfile::TempDir;

    fn git(dir: &Path, args: &[&str]) -> bool {
        CommandBuilder::new("git")
            .args(["-c", "user.name=Pack Tests", "-c", "user.email=tests@example.com"])
            .args(["-c", "commit.gpgsign=false"])
            .args(args.iter().copied())
            .cwd(dir)
            .exec()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    #[test]
    fn test_requires_locator() {
        let dir = TempDir::new().unwrap();
        let dependency = Dependency::parse("widget >=1.0.0").unwrap();

        let err = fetch_dependency(&dependency, dir.path(), Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, PackError::ConfigValidation { .. }));
    }

    #[test]
    fn test_fetch_from_local_git_repository() {
        let upstream = TempDir::new().unwrap();
        if !git(upstream.path(), &["init", "-q"]) {
            eprintln!("git not installed, skipping");
            return;
        }
        for (message, tag) in [("one", "1.0.0"), ("two", "1.0.3"), ("three", "1.1.0")] {
            assert!(git(upstream.path(), &["commit", "-q", "--allow-empty", "-m", message]));
            assert!(git(upstream.path(), &["tag", tag]));
        }

        let packset = TempDir::new().unwrap();
        let target = packset.path().join("widget");
        let line = format!("widget ~1.0.0 git:{}", upstream.path().display());
        let dependency = Dependency::parse(&line).unwrap();

        let outcome = fetch_dependency(&dependency, &target, Duration::from_secs(60)).unwrap();
        assert!(outcome.cloned);
        assert_eq!(outcome.version, Some(Version::new(1, 0, 3)));

        let outcome = fetch_dependency(&dependency, &target, Duration::from_secs(60)).unwrap();
        assert!(!outcome.cloned);

        let impossible = Dependency::parse(&format!(
            "widget >2.0.0 git:{}",
            upstream.path().display()
        ))
        .unwrap();
        let err = fetch_dependency(&impossible, &target, Duration::from_secs(60)).unwrap_err();
        assert!(matches!(err, PackError::Unsatisfied { .. }));
    }
}
