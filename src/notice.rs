use std::fmt;
use std::path::PathBuf;

/// Non-fatal outcomes of applying a rule.
/// These never abort the run; some are worth reporting to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipNotice {
    /// The rule's pattern does not occur in the file, so it was left untouched
    PatternAbsent { rule: String, path: PathBuf },
    /// The rule's glob matched no files under the project root
    NoFilesMatched { rule: String, glob: String },
}

impl SkipNotice {
    /// Whether the notice should be surfaced as a warning rather than only logged.
    pub fn is_warning(&self) -> bool {
        matches!(self, SkipNotice::NoFilesMatched { .. })
    }
}

impl fmt::Display for SkipNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipNotice::PatternAbsent { rule, path } => {
                write!(
                    f,
                    "Rule '{}': pattern not found in {}, skipped",
                    rule,
                    path.display()
                )
            }
            SkipNotice::NoFilesMatched { rule, glob } => {
                write!(f, "Rule '{}': no files match '{}'", rule, glob)
            }
        }
    }
}
