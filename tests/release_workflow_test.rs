mod common;

use common::*;
use update_versions::cli::orchestration::{run_post_release, run_pre_release, ReleaseArgs};
use update_versions::config::{Config, VersionFileConfig};
use update_versions::notice::SkipNotice;
use update_versions::reader::read_current_version;
use update_versions::UpdateVersionsError;

fn args(project: &Project, new_version: &str) -> ReleaseArgs {
    ReleaseArgs {
        root: project.root().to_path_buf(),
        new_version: new_version.to_string(),
        dry_run: false,
    }
}

fn current(project: &Project) -> String {
    read_current_version(project.root(), &VersionFileConfig::default()).unwrap()
}

#[test]
fn test_pre_release_rc_updates_python_and_js() {
    let project = Project::new("2.20.5.dev0");

    let report = run_pre_release(&args(&project, "2.20.5rc0"), &Config::default()).unwrap();

    assert_eq!(report.current_version, "2.20.5.dev0");
    assert_eq!(report.new_version, "2.20.5rc0");
    assert!(project.read(VERSION_PY).contains(r#"VERSION = "2.20.5rc0""#));
    assert!(project.read(PYPROJECT).contains(r#"version = "2.20.5rc0""#));
    assert!(project.read(PYPROJECT_SKINNY).contains(r#"version = "2.20.5rc0""#));
    assert!(project.read(PYPROJECT).contains(r#"target-version = "py39""#));
    assert_eq!(
        project.read(CONSTANTS_TSX),
        "export const Version = '2.20.5rc0';\n"
    );
    // An rc keeps the Java side on the snapshot.
    assert!(project.read(CLIENT_JAVA).contains(r#""2.20.5-SNAPSHOT""#));
    assert!(project.read(DESCRIPTION).contains("Version: 2.20.5\n"));
}

#[test]
fn test_pre_release_round_trip() {
    let project = Project::new("2.20.5.dev0");

    run_pre_release(&args(&project, "2.20.5rc0"), &Config::default()).unwrap();
    assert_eq!(current(&project), "2.20.5rc0");

    run_pre_release(&args(&project, "2.20.5"), &Config::default()).unwrap();
    assert_eq!(current(&project), "2.20.5");
}

#[test]
fn test_pre_release_final_drops_snapshot() {
    let project = Project::new("2.20.5rc0");

    run_pre_release(&args(&project, "2.20.5"), &Config::default()).unwrap();

    assert!(project.read(CLIENT_JAVA).contains(r#"VERSION = "2.20.5";"#));
    let parent = project.read(PARENT_POM);
    assert!(parent.contains("<artifactId>mlflow-parent</artifactId>\n  <version>2.20.5</version>"));
    assert!(parent.contains("<mlflow.version>2.20.5</mlflow.version>"));
    assert!(!parent.contains("SNAPSHOT"));
    assert!(project.read(SPARK_POM).contains("<version>2.20.5</version>"));
}

#[test]
fn test_pre_release_older_version_is_parameter_error() {
    let project = Project::new("2.20.5.dev0");
    let before = project.snapshot();

    let err = run_pre_release(&args(&project, "2.20.4"), &Config::default()).unwrap_err();

    assert!(matches!(err, UpdateVersionsError::BadParameter(_)));
    assert_eq!(project.snapshot(), before);
}

#[test]
fn test_pre_release_dry_run_writes_nothing() {
    let project = Project::new("2.20.5.dev0");
    let before = project.snapshot();
    let mut dry = args(&project, "2.20.5rc0");
    dry.dry_run = true;

    let report = run_pre_release(&dry, &Config::default()).unwrap();

    assert!(report.dry_run);
    assert!(report
        .changed_files()
        .contains(&project.path(VERSION_PY).as_path()));
    assert_eq!(project.snapshot(), before);
}

#[test]
fn test_absent_pattern_leaves_file_unchanged() {
    let project = Project::new("2.20.5.dev0");
    project.write(CONSTANTS_TSX, "export const Other = 1;\n");

    let report = run_pre_release(&args(&project, "2.20.5rc0"), &Config::default()).unwrap();

    assert_eq!(project.read(CONSTANTS_TSX), "export const Other = 1;\n");
    let js = report.rules.iter().find(|r| r.rule == "js").unwrap();
    assert!(js.changed.is_empty());
    assert_eq!(
        js.notices,
        vec![SkipNotice::PatternAbsent {
            rule: "js".to_string(),
            path: project.path(CONSTANTS_TSX),
        }]
    );
}

#[test]
fn test_missing_explicit_file_aborts() {
    let project = Project::new("2.20.5.dev0");
    std::fs::remove_file(project.path(PYPROJECT_SKINNY)).unwrap();

    let err = run_pre_release(&args(&project, "2.20.5rc0"), &Config::default()).unwrap_err();

    assert!(matches!(err, UpdateVersionsError::Io { .. }));
}

#[test]
fn test_post_release_bumps_to_next_patch_dev() {
    let project = Project::new("2.20.5.dev0");

    let report = run_post_release(&args(&project, "2.20.5"), &Config::default()).unwrap();

    assert_eq!(report.new_version, "2.20.6.dev0");
    assert_eq!(current(&project), "2.20.6.dev0");
    assert!(project.read(PYPROJECT).contains(r#"version = "2.20.6.dev0""#));
    assert_eq!(
        project.read(CONSTANTS_TSX),
        "export const Version = '2.20.6.dev0';\n"
    );
    assert!(project.read(CLIENT_JAVA).contains(r#""2.20.6-SNAPSHOT""#));
    assert!(project.read(DESCRIPTION).contains("Version: 2.20.6\n"));

    let parent = project.read(PARENT_POM);
    assert!(parent.contains("<version>2.20.6-SNAPSHOT</version>"));
    assert!(parent.contains("<mlflow.version>2.20.6-SNAPSHOT</mlflow.version>"));
    // Dependency versions that happen to match are not ours to change.
    assert!(parent.contains(
        "<artifactId>unrelated-lib</artifactId>\n      <version>2.20.5</version>"
    ));
    assert!(project
        .read(SPARK_POM)
        .contains("<version>2.20.6-SNAPSHOT</version>"));
}

#[test]
fn test_post_release_on_non_dev_version_fails_precondition() {
    let project = Project::new("2.20.5rc0");
    let before = project.snapshot();

    let err = run_post_release(&args(&project, "2.20.5"), &Config::default()).unwrap_err();

    assert!(matches!(err, UpdateVersionsError::Precondition(_)));
    assert!(err.to_string().contains("not a dev version"));
    assert_eq!(project.snapshot(), before);
}

#[test]
fn test_post_release_validates_new_version_first() {
    let project = Project::new("2.20.5.dev0");

    let err = run_post_release(&args(&project, "2.19.0"), &Config::default()).unwrap_err();

    assert!(matches!(err, UpdateVersionsError::BadParameter(_)));
}

#[test]
fn test_post_release_patch_overflow_is_parameter_error() {
    let project = Project::new("2.20.5.dev0");
    let before = project.snapshot();

    let err = run_post_release(
        &args(&project, "2.20.18446744073709551615"),
        &Config::default(),
    )
    .unwrap_err();

    assert!(matches!(err, UpdateVersionsError::BadParameter(_)));
    assert!(err.to_string().contains("cannot be incremented"));
    assert_eq!(project.snapshot(), before);
}
