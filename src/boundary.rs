use std::fmt;

/// Non-fatal conditions found while preparing a tag.
/// These should be reported to the user but never stop the workflow.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// HEAD is not on any branch
    DetachedHead,
    /// HEAD is on a branch that is not configured as a release branch
    NotOnReleaseBranch {
        branch: String,
        release_branches: Vec<String>,
    },
    /// The repository has no tags at all
    NoTags,
    /// Tags exist but none is a semantic version
    NoSemanticTags { skipped: Vec<String> },
    /// The latest tag does not follow the configured naming pattern
    TagMismatchPattern { tag: String, pattern: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::DetachedHead => {
                write!(f, "HEAD is detached, not on any branch")
            }
            BoundaryWarning::NotOnReleaseBranch {
                branch,
                release_branches,
            } => {
                write!(
                    f,
                    "You are on branch '{}', not on {}",
                    branch,
                    release_branches.join("/")
                )
            }
            BoundaryWarning::NoTags => {
                write!(f, "No tags found in repository, starting from 0.0.0")
            }
            BoundaryWarning::NoSemanticTags { skipped } => {
                write!(
                    f,
                    "No semantic version tags found ({} other tag{} ignored), starting from 0.0.0",
                    skipped.len(),
                    if skipped.len() == 1 { "" } else { "s" }
                )
            }
            BoundaryWarning::TagMismatchPattern { tag, pattern } => {
                write!(f, "Tag '{}' does not match pattern '{}'", tag, pattern)
            }
        }
    }
}
