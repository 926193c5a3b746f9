//! Path utilities for mapping import paths onto a workspace.
//!
//! Import paths such as `github.com/user/repo` are slash separated on every
//! platform and must never climb out of the directory they are joined to.

use crate::error::{PackError, PackResult};
use std::path::{Component, Path, PathBuf};

/// Normalize a path by resolving `.` and `..` components lexically
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                },
                // keep leading `..` so escaping paths stay visible
                _ => components.push(component),
            },
            other => components.push(other),
        }
    }

    components.iter().collect()
}

/// Check that a relative path stays inside the directory it is joined to
pub fn is_safe_path(path: &Path) -> bool {
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::Normal(_) => depth += 1,
            Component::ParentDir => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            Component::RootDir | Component::Prefix(_) => return false,
        }
    }

    true
}

/// Join a slash separated import path onto `base`
pub fn safe_join(base: &Path, import_path: &str) -> PackResult<PathBuf> {
    let relative: PathBuf = import_path.split('/').filter(|s| !s.is_empty()).collect();

    if import_path.starts_with('/') || !is_safe_path(&relative) {
        return Err(PackError::ConfigValidation {
            field: "import path".to_string(),
            reason: format!("{import_path} escapes {}", base.display()),
        });
    }

    Ok(base.join(normalize_path(&relative)))
}

/// Get the file extension as a lowercase string
pub fn get_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        let path = Path::new("./src/../pkg/./mod");
        assert_eq!(normalize_path(path), Path::new("pkg/mod"));
        assert_eq!(normalize_path(Path::new("../a/../b")), Path::new("../b"));
    }

    #[test]
    fn test_is_safe_path() {
        assert!(is_safe_path(Path::new("github.com/user/repo")));
        assert!(is_safe_path(Path::new("a/../b")));
        assert!(!is_safe_path(Path::new("a/../../b")));
        assert!(!is_safe_path(Path::new("/absolute/path")));
    }

    #[test]
    fn test_safe_join() {
        let base = Path::new("/work/src");

        let joined = safe_join(base, "github.com/user/repo").unwrap();
        assert_eq!(joined, Path::new("/work/src/github.com/user/repo"));

        let joined = safe_join(base, "example.com/x/./y").unwrap();
        assert_eq!(joined, Path::new("/work/src/example.com/x/y"));

        assert!(safe_join(base, "../../etc/passwd").is_err());
        assert!(safe_join(base, "/etc/passwd").is_err());
    }

    #[test]
    fn test_get_extension() {
        assert_eq!(get_extension(Path::new("pack.toml")), Some("toml".to_string()));
        assert_eq!(get_extension(Path::new("PACK.JSON")), Some("json".to_string()));
        assert_eq!(get_extension(Path::new("pack")), None);
    }
}
