use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, UpdateVersionsError};

/// File name looked up in the project root when no config path is given
pub const CONFIG_FILE_NAME: &str = "update-versions.toml";

/// Represents the complete configuration for update-versions.
///
/// Names the file holding the canonical version and the rules that propagate it.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub version_file: VersionFileConfig,

    #[serde(default = "default_rules")]
    pub rules: Vec<RuleConfig>,
}

/// Where the canonical version lives and how to capture it.
///
/// The pattern's first capture group is the version string.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersionFileConfig {
    #[serde(default = "default_version_path")]
    pub path: String,

    #[serde(default = "default_version_pattern")]
    pub pattern: String,
}

fn default_version_path() -> String {
    "mlflow/version.py".to_string()
}

fn default_version_pattern() -> String {
    r#"VERSION = "(.+)""#.to_string()
}

impl Default for VersionFileConfig {
    fn default() -> Self {
        VersionFileConfig {
            path: default_version_path(),
            pattern: default_version_pattern(),
        }
    }
}

/// One substitution rule: a target file set, a regex and its replacement.
///
/// `pattern` and `replacement` may contain the placeholders `{{current}}`,
/// `{{current_base}}`, `{{new}}`, `{{new_base}}` and `{{new_snapshot}}`.
/// The replacement uses regex-crate syntax for groups (`${1}`).
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RuleConfig {
    pub name: String,

    /// Explicit paths relative to the project root
    #[serde(default)]
    pub files: Vec<String>,

    /// Glob matched against root-relative paths, e.g. `mlflow/java/**/*.java`
    #[serde(default)]
    pub glob: Option<String>,

    pub pattern: String,

    pub replacement: String,
}

impl RuleConfig {
    fn for_files(name: &str, files: &[&str], pattern: &str, replacement: &str) -> Self {
        RuleConfig {
            name: name.to_string(),
            files: files.iter().map(|f| f.to_string()).collect(),
            glob: None,
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
        }
    }

    fn for_glob(name: &str, glob: &str, pattern: &str, replacement: &str) -> Self {
        RuleConfig {
            name: name.to_string(),
            files: Vec::new(),
            glob: Some(glob.to_string()),
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
        }
    }
}

/// Returns the built-in rule table for the reference project layout.
fn default_rules() -> Vec<RuleConfig> {
    // pom.xml files also pin dependency versions, so only these keys are rewritten.
    let pom_keys = concat!(
        r"(<mlflow.version>",
        r"|<artifactId>mlflow-spark_\$\{scala\.compat\.version\}</artifactId>\s+<version>",
        r"|<artifactId>mlflow-parent</artifactId>\s+<version>)",
    );
    let pom_pattern = format!(
        r"{}{{{{current_base}}}}(-SNAPSHOT)?(</mlflow.version>|</version>)",
        pom_keys
    );

    vec![
        RuleConfig::for_files(
            "python",
            &["mlflow/version.py"],
            "{{current}}",
            "{{new}}",
        ),
        RuleConfig::for_files(
            "pyproject",
            &["pyproject.toml", "pyproject.skinny.toml"],
            r#"(?m)^version\s+=\s+".+"$"#,
            r#"version = "{{new}}""#,
        ),
        RuleConfig::for_files(
            "js",
            &["mlflow/server/js/src/common/constants.tsx"],
            "{{current}}",
            "{{new}}",
        ),
        RuleConfig::for_glob(
            "java",
            "mlflow/java/**/*.java",
            "{{current_base}}(-SNAPSHOT)?",
            "{{new_snapshot}}",
        ),
        RuleConfig::for_glob(
            "pom",
            "mlflow/java/**/*.xml",
            &pom_pattern,
            "${1}{{new_snapshot}}${3}",
        ),
        RuleConfig::for_files(
            "r",
            &["mlflow/R/mlflow/DESCRIPTION"],
            "Version: {{current_base}}",
            "Version: {{new_base}}",
        ),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Config {
            version_file: VersionFileConfig::default(),
            rules: default_rules(),
        }
    }
}

impl Config {
    /// Checks invariants serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.version_file.path.trim().is_empty() {
            return Err(UpdateVersionsError::config("version_file.path is empty"));
        }
        for rule in &self.rules {
            if rule.files.is_empty() && rule.glob.is_none() {
                return Err(UpdateVersionsError::config(format!(
                    "Rule '{}' has neither `files` nor `glob`",
                    rule.name
                )));
            }
        }
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `update-versions.toml` in the project root
/// 3. Default configuration if no file found
///
/// # Arguments
/// * `root` - Project root directory
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed or validated
pub fn load_config(root: &Path, config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = root.join(CONFIG_FILE_NAME);
            if !candidate.exists() {
                tracing::debug!("no {} found, using built-in rules", CONFIG_FILE_NAME);
                return Ok(Config::default());
            }
            candidate
        }
    };

    tracing::debug!(path = %path.display(), "loading config");
    let config_str = fs::read_to_string(&path).map_err(|e| UpdateVersionsError::io(&path, e))?;
    let config: Config = toml::from_str(&config_str)
        .map_err(|e| UpdateVersionsError::config(format!("{}: {}", path.display(), e)))?;
    config.validate()?;
    Ok(config)
}
