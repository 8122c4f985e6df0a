//! Bulk substitution engine.
//!
//! Renders each rule against the current/new version forms, resolves its
//! target files and rewrites matches in place. Rules are applied in table
//! order with no rollback: a failure part-way leaves earlier files rewritten.

use std::fs;
use std::path::{Component, Path, PathBuf};

use globset::GlobBuilder;
use regex::Regex;
use walkdir::WalkDir;

use crate::config::{Config, RuleConfig};
use crate::domain::VersionForms;
use crate::error::{Result, UpdateVersionsError};
use crate::notice::SkipNotice;
use crate::reader::read_current_version;

/// Outcome of applying one rule
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleReport {
    pub rule: String,
    pub changed: Vec<PathBuf>,
    pub notices: Vec<SkipNotice>,
}

/// Outcome of a whole update pass
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateReport {
    pub current_version: String,
    pub new_version: String,
    pub dry_run: bool,
    pub rules: Vec<RuleReport>,
}

impl UpdateReport {
    /// All files rewritten (or that would be, in a dry run), in rule order
    pub fn changed_files(&self) -> Vec<&Path> {
        self.rules
            .iter()
            .flat_map(|r| r.changed.iter().map(PathBuf::as_path))
            .collect()
    }
}

/// Files touched and skipped by [`replace_occurrences`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReplaceOutcome {
    /// Files that were (or, in a dry run, would be) rewritten
    pub changed: Vec<PathBuf>,
    /// Files in which the pattern does not occur
    pub skipped: Vec<PathBuf>,
}

/// Expands placeholders in a pattern template with regex-escaped values.
pub fn render_pattern(template: &str, forms: &VersionForms) -> String {
    forms
        .placeholders()
        .iter()
        .fold(template.to_string(), |acc, (key, value)| {
            acc.replace(key, &regex::escape(value))
        })
}

/// Expands placeholders in a replacement template with literal values.
///
/// `$` in a value is doubled so the regex engine does not read it as a group.
pub fn render_replacement(template: &str, forms: &VersionForms) -> String {
    forms
        .placeholders()
        .iter()
        .fold(template.to_string(), |acc, (key, value)| {
            acc.replace(key, &value.replace('$', "$$"))
        })
}

/// Rewrites every match of `pattern` in each file.
///
/// Files where the pattern does not occur are left untouched and listed as
/// skipped. With `dry_run` nothing is written.
///
/// # Returns
/// * `Ok(ReplaceOutcome)` - Changed and skipped files
/// * `Err` - On the first read or write failure
pub fn replace_occurrences(
    files: &[PathBuf],
    pattern: &Regex,
    repl: &str,
    dry_run: bool,
) -> Result<ReplaceOutcome> {
    let mut outcome = ReplaceOutcome::default();

    for file in files {
        let old_text = fs::read_to_string(file).map_err(|e| UpdateVersionsError::io(file, e))?;
        if !pattern.is_match(&old_text) {
            outcome.skipped.push(file.clone());
            continue;
        }

        let new_text = pattern.replace_all(&old_text, repl);
        if new_text == old_text {
            continue;
        }

        if !dry_run {
            fs::write(file, new_text.as_bytes()).map_err(|e| UpdateVersionsError::io(file, e))?;
        }
        outcome.changed.push(file.clone());
    }

    Ok(outcome)
}

/// Resolves a rule's explicit files and glob into concrete paths under `root`.
pub fn resolve_targets(root: &Path, rule: &RuleConfig) -> Result<Vec<PathBuf>> {
    let mut targets: Vec<PathBuf> = rule.files.iter().map(|f| root.join(f)).collect();

    if let Some(glob) = &rule.glob {
        let matcher = GlobBuilder::new(glob)
            .literal_separator(true)
            .build()
            .map_err(|e| {
                UpdateVersionsError::config(format!("Rule '{}' has invalid glob: {}", rule.name, e))
            })?
            .compile_matcher();

        let walk_root = root.join(literal_prefix(glob));
        if walk_root.is_dir() {
            for entry in WalkDir::new(&walk_root).sort_by_file_name() {
                let entry = entry?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
                if matcher.is_match(relative) {
                    targets.push(entry.path().to_path_buf());
                }
            }
        }
    }

    // A file listed explicitly may also match the glob; rewrite it once.
    targets.sort();
    targets.dedup();
    Ok(targets)
}

/// Leading directories of a glob that contain no wildcard.
fn literal_prefix(glob: &str) -> PathBuf {
    let mut prefix = PathBuf::new();
    let mut parts = glob.split('/').peekable();
    while let Some(part) = parts.next() {
        // The last segment names files, never a directory to descend from.
        let is_last = parts.peek().is_none();
        if is_last || part.contains(|c: char| matches!(c, '*' | '?' | '[' | '{')) {
            break;
        }
        prefix.push(part);
    }
    // Globs must stay inside the project root.
    if prefix
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return PathBuf::new();
    }
    prefix
}

/// Compiles a rule's pattern for the given version forms.
fn compile_rule(rule: &RuleConfig, forms: &VersionForms) -> Result<(Regex, String)> {
    let pattern = render_pattern(&rule.pattern, forms);
    let regex = Regex::new(&pattern).map_err(|source| UpdateVersionsError::Regex {
        rule: rule.name.clone(),
        source,
    })?;
    Ok((regex, render_replacement(&rule.replacement, forms)))
}

/// Applies a single rule.
pub fn apply_rule(
    root: &Path,
    rule: &RuleConfig,
    forms: &VersionForms,
    dry_run: bool,
) -> Result<RuleReport> {
    let (pattern, replacement) = compile_rule(rule, forms)?;
    let targets = resolve_targets(root, rule)?;
    let mut report = RuleReport {
        rule: rule.name.clone(),
        ..RuleReport::default()
    };

    if targets.is_empty() {
        if let Some(glob) = &rule.glob {
            report.notices.push(SkipNotice::NoFilesMatched {
                rule: rule.name.clone(),
                glob: glob.clone(),
            });
        }
        return Ok(report);
    }

    tracing::debug!(
        rule = %rule.name,
        pattern = %pattern,
        files = targets.len(),
        "applying rule"
    );

    let outcome = replace_occurrences(&targets, &pattern, &replacement, dry_run)?;
    report.changed = outcome.changed;
    report.notices = outcome
        .skipped
        .into_iter()
        .map(|path| SkipNotice::PatternAbsent {
            rule: rule.name.clone(),
            path,
        })
        .collect();

    for path in &report.changed {
        tracing::info!(rule = %rule.name, path = %path.display(), dry_run, "updated");
    }
    Ok(report)
}

/// Propagates `new_version` to every rule target.
///
/// The current version is read from the version file first, so the forms
/// used by the rules always describe the state on disk before the pass.
pub fn update_versions(
    root: &Path,
    config: &Config,
    new_version: &str,
    dry_run: bool,
) -> Result<UpdateReport> {
    let current_version = read_current_version(root, &config.version_file)?;
    update_versions_from(root, config, &current_version, new_version, dry_run)
}

/// Propagates `new_version` given an already-read `current_version`.
pub fn update_versions_from(
    root: &Path,
    config: &Config,
    current_version: &str,
    new_version: &str,
    dry_run: bool,
) -> Result<UpdateReport> {
    let forms = VersionForms::new(current_version, new_version);
    tracing::info!(current = %forms.current, new = %forms.new, "updating versions");

    let rules = config
        .rules
        .iter()
        .map(|rule| apply_rule(root, rule, &forms, dry_run))
        .collect::<Result<Vec<RuleReport>>>()?;

    Ok(UpdateReport {
        current_version: current_version.to_string(),
        new_version: new_version.to_string(),
        dry_run,
        rules,
    })
}
