//! Formatting-preserving edits of the `dependencies` list in pack.toml

use super::line_column;
use crate::ConfigResult;
use pack_core::error::PackError;
use pack_core::types::Dependency;
use toml_edit::{Array, DocumentMut, Item, Value};

fn parse_document(content: &str) -> ConfigResult<DocumentMut> {
    content.parse::<DocumentMut>().map_err(|e| {
        let (line, column) = e
            .span()
            .map(|span| line_column(content, span.start))
            .unwrap_or((0, 0));
        PackError::ManifestParse {
            format: "TOML",
            message: e.message().to_string(),
            line,
            column,
        }
    })
}

fn dependency_array(doc: &mut DocumentMut) -> ConfigResult<&mut Array> {
    if !doc.contains_key("dependencies") {
        doc["dependencies"] = Item::Value(Value::Array(Array::new()));
    }

    doc["dependencies"]
        .as_array_mut()
        .ok_or_else(|| PackError::ConfigValidation {
            field: "dependencies".to_string(),
            reason: "must be an array of dependency strings".to_string(),
        })
}

// Name of an entry, i.e. the first token of its dependency line
fn entry_name(value: &Value) -> Option<&str> {
    value.as_str().and_then(|line| line.split(' ').next())
}

/// Add a dependency line, replacing any entry with the same name
pub fn add_dependency(content: &str, dependency: &Dependency) -> ConfigResult<String> {
    let mut doc = parse_document(content)?;
    let deps = dependency_array(&mut doc)?;
    let line = dependency.to_string();

    let position = deps
        .iter()
        .position(|v| entry_name(v) == Some(dependency.name()));

    match position {
        Some(index) => {
            tracing::debug!("Replacing dependency {}", dependency.name());
            deps.replace(index, line);
        },
        None => {
            tracing::debug!("Adding dependency {}", dependency.name());
            deps.push(line);
        },
    }

    Ok(doc.to_string())
}

/// Remove the dependency called `name`
pub fn remove_dependency(content: &str, name: &str) -> ConfigResult<String> {
    let mut doc = parse_document(content)?;
    let deps = dependency_array(&mut doc)?;

    let index = deps
        .iter()
        .position(|v| entry_name(v) == Some(name))
        .ok_or_else(|| PackError::ConfigValidation {
            field: "dependencies".to_string(),
            reason: format!("'{name}' is not listed"),
        })?;
    deps.remove(index);

    Ok(doc.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"# my package
import-path = "github.com/user/widget"
version = "1.0.0"
dependencies = [
    "dep >1.2.3",
    "dep2 ~1.4.5-pre !=1.5.0",
]
"#;

    #[test]
    fn test_add_appends_new_dependency() {
        let dep = Dependency::parse("gizmo >=0.3.0 git:example.com/gizmo").unwrap();
        let edited = add_dependency(MANIFEST, &dep).unwrap();

        assert!(edited.starts_with("# my package\n"));
        assert!(edited.contains("\"dep >1.2.3\""));
        assert!(edited.contains("\"gizmo >=0.3.0 git:example.com/gizmo\""));
    }

    #[test]
    fn test_add_replaces_same_name() {
        let dep = Dependency::parse("dep >=2.0.0").unwrap();
        let edited = add_dependency(MANIFEST, &dep).unwrap();

        assert!(edited.contains("\"dep >=2.0.0\""));
        assert!(!edited.contains("\"dep >1.2.3\""));
        assert!(edited.contains("\"dep2 ~1.4.5-pre !=1.5.0\""));
    }

    #[test]
    fn test_replace_keeps_position() {
        let dep = Dependency::parse("dep <1.0.0").unwrap();
        let once = add_dependency(MANIFEST, &dep).unwrap();
        let twice = add_dependency(&once, &dep).unwrap();

        let doc = twice.parse::<DocumentMut>().unwrap();
        let lines: Vec<_> = doc["dependencies"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(lines, vec!["dep <1.0.0", "dep2 ~1.4.5-pre !=1.5.0"]);
    }

    #[test]
    fn test_add_creates_missing_list() {
        let content = "import-path = \"x.com/y\"\nversion = \"0.1.0\"\n";
        let dep = Dependency::parse("dep 1.0.0").unwrap();
        let edited = add_dependency(content, &dep).unwrap();

        let doc = edited.parse::<DocumentMut>().unwrap();
        let deps = doc["dependencies"].as_array().unwrap();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps.get(0).and_then(Value::as_str), Some("dep 1.0.0"));
    }

    #[test]
    fn test_remove_dependency() {
        let edited = remove_dependency(MANIFEST, "dep2").unwrap();
        assert!(!edited.contains("dep2"));
        assert!(edited.contains("\"dep >1.2.3\""));

        assert!(remove_dependency(MANIFEST, "missing").is_err());
    }

    #[test]
    fn test_syntax_errors_carry_location() {
        let err = remove_dependency("a = 1\nb = = 2\n", "dep").unwrap_err();
        match err {
            PackError::ManifestParse { line, .. } => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_non_array_dependencies() {
        let err = remove_dependency("dependencies = \"dep\"\n", "dep").unwrap_err();
        assert!(matches!(err, PackError::ConfigValidation { .. }));
    }
}
