//! Unit tests for CLI commands.

use super::*;
use crate::output::colors::ColorSupport;
use crate::output::OutputHandler;
use pack_core::types::{Constraint, Dependency, Version};
use std::fs;
use tempfile::TempDir;

fn utf8(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
}

/// Context rooted in `dir`, with an optional workspace search path
fn create_test_context(dir: &TempDir, search_path: Option<&Utf8Path>) -> CommandContext {
    CommandContext {
        cwd: utf8(dir),
        output: OutputHandler::with_colors(ColorSupport::disabled()),
        search_path: search_path.map(ToString::to_string),
        overrides: SettingsOverrides::default(),
    }
}

const TOML_MANIFEST: &str = r#"# widget manifest
import-path = "example.com/widget"
version = "1.0.0"

dependencies = [
    "dep1 >=1.0.0", # keep me
]
"#;

const JSON_MANIFEST: &str = r#"{
  "import-path": "example.com/widget",
  "version": "1.0.0",
  "dependencies": ["dep1 >=1.0.0"]
}"#;

#[test]
fn test_semver_describe() {
    let version = Version::parse("1.4.7-rc.1").unwrap();
    let value = semver::describe(&version);

    assert_eq!(value["version"], "1.4.7-rc.1");
    assert_eq!(value["major"], 1);
    assert_eq!(value["minor"], 4);
    assert_eq!(value["patch"], 7);
    assert_eq!(value["release"], "rc.1");
    assert_eq!(value["prerelease"], true);

    let value = semver::describe(&Version::new(2, 0, 0));
    assert!(value["release"].is_null());
    assert_eq!(value["prerelease"], false);
}

#[test]
fn test_semver_rejects_malformed_input() {
    let dir = TempDir::new().unwrap();
    let ctx = create_test_context(&dir, None);

    assert!(semver::execute("1.2.3", true, &ctx).is_ok());
    assert!(matches!(
        semver::execute("1.2", false, &ctx),
        Err(PackError::Format { .. })
    ));
    assert!(matches!(
        semver::execute("", false, &ctx),
        Err(PackError::EmptyInput)
    ));
}

#[test]
fn test_parse_describe() {
    let dependency = Dependency::parse("dep2 ~1.4.5-pre !=1.5.0 git:github.com/user/dep2").unwrap();
    let value = parse::describe(&dependency);

    assert_eq!(value["name"], "dep2");
    assert_eq!(value["constraints"][0]["operator"], "~");
    assert_eq!(value["constraints"][0]["version"], "1.4.5-pre");
    assert_eq!(value["constraints"][1]["operator"], "!=");
    assert_eq!(value["locator"]["vcs"], "git");
    assert_eq!(value["locator"]["location"], "github.com/user/dep2");

    let bare = Dependency::parse("dep3").unwrap();
    let value = parse::describe(&bare);
    assert_eq!(value["constraints"].as_array().unwrap().len(), 0);
    assert!(value["locator"].is_null());
}

#[test]
fn test_parse_reports_bad_lines() {
    let dir = TempDir::new().unwrap();
    let ctx = create_test_context(&dir, None);

    assert!(parse::execute("dep1 >=1.0.0", false, &ctx).is_ok());
    assert!(parse::execute("dep1 >=1.0 git", false, &ctx).is_err());
}

#[test]
fn test_satisfies() {
    let dir = TempDir::new().unwrap();
    let ctx = create_test_context(&dir, None);
    let constraints = |tokens: &[&str]| tokens.iter().map(|t| t.to_string()).collect::<Vec<_>>();

    assert!(satisfies::execute("1.4.7", &constraints(&["~1.4.0", "!=1.4.6"]), &ctx).is_ok());

    let err = satisfies::execute("1.5.0", &constraints(&["~1.4.0", "<2.0.0"]), &ctx).unwrap_err();
    assert!(matches!(err, PackError::Unsatisfied { .. }));

    let err = satisfies::execute("1.5.0", &constraints(&["=>1.0.0"]), &ctx).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_failed_constraints_keep_input_order() {
    let version = Version::new(1, 5, 0);
    let constraints = vec![
        Constraint::parse("<1.0.0").unwrap(),
        Constraint::parse(">=1.0.0").unwrap(),
        Constraint::parse("~1.4.0").unwrap(),
    ];

    let failed = satisfies::failed_constraints(&version, &constraints);
    assert_eq!(failed, vec![&constraints[0], &constraints[2]]);
}

#[test]
fn test_tag_lines_mark_current() {
    let tags = vec![Version::new(1, 0, 0), Version::new(1, 1, 0)];

    assert_eq!(
        tags::tag_lines(&tags, Some(&Version::new(1, 1, 0))),
        vec!["  1.0.0".to_string(), "* 1.1.0".to_string()]
    );
    assert_eq!(
        tags::tag_lines(&tags, None),
        vec!["  1.0.0".to_string(), "  1.1.0".to_string()]
    );
}

#[test]
fn test_tags_outside_repository() {
    let dir = TempDir::new().unwrap();
    let ctx = create_test_context(&dir, Some(&utf8(&dir)));

    assert!(tags::execute(None, None, &ctx).is_err());
    assert!(matches!(
        tags::execute(Some(Utf8Path::new("missing")), Some(pack_core::types::VcsScheme::Git), &ctx),
        Err(PackError::RepositoryMissing { .. })
    ));
}

#[test]
fn test_workspace_requires_search_path() {
    let dir = TempDir::new().unwrap();
    let ctx = create_test_context(&dir, None);

    assert!(matches!(
        ctx.workspace(),
        Err(PackError::WorkspaceNotSet { .. })
    ));
    assert!(matches!(
        paths::execute(&ctx),
        Err(PackError::WorkspaceNotSet { .. })
    ));
}

#[test]
fn test_workspace_reads_settings_file() {
    let dir = TempDir::new().unwrap();
    let root = utf8(&dir);
    fs::create_dir_all(root.join("pack")).unwrap();
    fs::write(
        root.join("pack").join("config.toml"),
        "packset = \"work\"\nvcs-timeout = 42\n",
    )
    .unwrap();

    let ctx = create_test_context(&dir, Some(&root));
    let (paths, settings) = ctx.workspace().unwrap();
    assert_eq!(settings.vcs_timeout, 42);
    assert_eq!(paths.packset(), "work");
    assert_eq!(paths.packset_dir(), root.join("pack").join("work").join("src").as_path());

    let mut ctx = ctx;
    ctx.overrides.packset = Some("other".to_string());
    ctx.overrides.vcs_timeout = Some(7);
    let (paths, _) = ctx.workspace().unwrap();
    assert_eq!(paths.packset(), "other");
    assert_eq!(ctx.vcs_timeout().unwrap(), Duration::from_secs(7));
}

#[test]
fn test_path_fields() {
    let dir = TempDir::new().unwrap();
    let root = utf8(&dir);
    let ctx = create_test_context(&dir, Some(&root));
    let (paths, _) = ctx.workspace().unwrap();

    let fields = paths::path_fields(&paths);
    let field = |label: &str| {
        fields
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.clone())
            .unwrap()
    };

    assert_eq!(field("roots"), root.to_string());
    assert_eq!(field("packset"), "default");
    assert_eq!(field("config"), root.join("pack").join("config.toml").to_string());
    assert!(field("combined").starts_with(root.as_str()));
}

#[test]
fn test_check_walks_up() {
    let dir = TempDir::new().unwrap();
    let root = utf8(&dir);
    fs::write(root.join("pack.toml"), TOML_MANIFEST).unwrap();
    fs::create_dir_all(root.join("src").join("nested")).unwrap();

    let mut ctx = create_test_context(&dir, Some(&root));
    ctx.cwd = root.join("src").join("nested");

    assert!(check::execute(None, &ctx).is_ok());
    assert!(check::execute(Some(Utf8Path::new("../../pack.toml")), &ctx).is_ok());
}

#[test]
fn test_check_reports_invalid_manifest() {
    let dir = TempDir::new().unwrap();
    let root = utf8(&dir);
    fs::write(
        root.join("pack.toml"),
        "import-path = \"example.com/widget\"\nversion = \"1.0\"\n",
    )
    .unwrap();

    let ctx = create_test_context(&dir, None);
    assert!(check::execute(None, &ctx).is_err());

    let empty = TempDir::new().unwrap();
    let ctx = create_test_context(&empty, None);
    assert!(matches!(
        check::execute(None, &ctx),
        Err(PackError::ConfigValidation { .. })
    ));
}

#[test]
fn test_add_and_remove_toml_keep_comments() {
    let dir = TempDir::new().unwrap();
    let path = utf8(&dir).join("pack.toml");
    fs::write(&path, TOML_MANIFEST).unwrap();

    let dep2 = Dependency::parse("dep2 ~1.4.5 git:github.com/user/dep2").unwrap();
    assert!(!add::add_to_manifest(&path, &dep2).unwrap());

    let dep1 = Dependency::parse("dep1 >=2.0.0").unwrap();
    assert!(add::add_to_manifest(&path, &dep1).unwrap());

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("# widget manifest"));
    assert!(content.contains("\"dep1 >=2.0.0\""));
    assert!(content.contains("\"dep2 ~1.4.5 git:github.com/user/dep2\""));
    assert!(!content.contains("dep1 >=1.0.0"));

    remove::remove_from_manifest(&path, "dep2").unwrap();
    let manifest = pack_config::load_manifest(&path).unwrap();
    assert_eq!(manifest.dependencies, vec![dep1]);

    assert!(remove::remove_from_manifest(&path, "dep2").is_err());
}

#[test]
fn test_add_and_remove_json() {
    let dir = TempDir::new().unwrap();
    let path = utf8(&dir).join("pack.json");
    fs::write(&path, JSON_MANIFEST).unwrap();

    let dep2 = Dependency::parse("dep2 <3.0.0").unwrap();
    assert!(!add::add_to_manifest(&path, &dep2).unwrap());

    let replacement = Dependency::parse("dep1 =1.2.0").unwrap();
    assert!(add::add_to_manifest(&path, &replacement).unwrap());

    let manifest = pack_config::load_manifest(&path).unwrap();
    assert_eq!(manifest.dependencies, vec![replacement.clone(), dep2]);

    remove::remove_from_manifest(&path, "dep2").unwrap();
    let manifest = pack_config::load_manifest(&path).unwrap();
    assert_eq!(manifest.dependencies, vec![replacement]);

    assert!(matches!(
        remove::remove_from_manifest(&path, "dep9"),
        Err(PackError::ConfigValidation { .. })
    ));
}

#[test]
fn test_add_command_finds_manifest() {
    let dir = TempDir::new().unwrap();
    let root = utf8(&dir);
    fs::write(root.join("pack.toml"), TOML_MANIFEST).unwrap();

    let ctx = create_test_context(&dir, None);
    add::execute("dep5 >1.0.0", None, &ctx).unwrap();
    remove::execute("dep5", None, &ctx).unwrap();

    assert!(add::execute("5dep >1.0.0", None, &ctx).is_err());
}

#[test]
fn test_fetch_needs_workspace_and_locator() {
    let dir = TempDir::new().unwrap();
    let ctx = create_test_context(&dir, None);
    assert!(matches!(
        fetch::execute("widget >=1.0.0 git:example.com/widget", &ctx),
        Err(PackError::WorkspaceNotSet { .. })
    ));

    let root = utf8(&dir);
    let ctx = create_test_context(&dir, Some(&root));
    assert!(matches!(
        fetch::execute("widget >=1.0.0", &ctx),
        Err(PackError::ConfigValidation { .. })
    ));
    assert!(root.join("pack").join("default").join("src").is_dir());
}
