//! Main workflow orchestration logic
//!
//! Keeps the tagging procedure separate from CLI argument parsing so it can
//! be driven programmatically and tested against a mock repository.
//!
//! The workflow is split in two phases: [plan_tag] inspects the repository
//! and computes the next tag without creating anything, and [apply_plan]
//! creates and optionally pushes it.

use tracing::{debug, info};

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{BranchContext, SemanticVersion, Selection, TagSelector, VersionBump};
use crate::error::{Result, TaggerError};
use crate::git::Repository;

/// Arguments for the tag workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
#[derive(Debug, Clone, PartialEq)]
pub struct TagWorkflowArgs {
    /// Which component to increment
    pub bump: VersionBump,

    /// Push the new tag to the remote
    pub push: bool,

    /// Pull from the remote before reading tags
    pub pull: bool,

    /// Preview mode - don't create tags or push
    pub dry_run: bool,

    /// Remote override; falls back to the configured remote
    pub remote: Option<String>,
}

impl TagWorkflowArgs {
    pub fn new(bump: VersionBump) -> Self {
        TagWorkflowArgs {
            bump,
            push: false,
            pull: false,
            dry_run: false,
            remote: None,
        }
    }

    /// Remote to pull from and push to
    pub fn remote<'a>(&'a self, config: &'a Config) -> &'a str {
        self.remote.as_deref().unwrap_or(&config.remote)
    }
}

/// Everything decided before touching the repository's tags
#[derive(Debug, Clone, PartialEq)]
pub struct TagPlan {
    /// Latest semantic-version tag, as named in the repository
    pub previous_tag: Option<String>,

    /// Version the bump started from (0.0.0 when there was no usable tag)
    pub current_version: SemanticVersion,

    pub new_version: SemanticVersion,

    /// Name of the tag to create
    pub tag: String,

    /// Annotation message for the tag
    pub message: String,

    pub remote: String,

    /// Non-fatal conditions found while planning
    pub warnings: Vec<BoundaryWarning>,
}

/// Result of a successful tag workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub previous_tag: Option<String>,

    /// The tag that was created (or would be, in a dry run)
    pub tag: String,

    pub version: SemanticVersion,

    /// Whether the tag was actually created
    pub created: bool,

    /// Whether the tag was pushed to remote
    pub pushed: bool,
}

/// Inspect the repository and compute the next tag.
///
/// 1. Check the current branch (warning only)
/// 2. Optionally pull from the remote
/// 3. Select the latest semantic-version tag
/// 4. Bump it (or 0.0.0) and render the new tag name
///
/// Nothing is created. Fails if the pull fails, the bump overflows, the
/// tag pattern is invalid, or the new tag already exists.
pub fn plan_tag<R: Repository>(
    repo: &R,
    args: &TagWorkflowArgs,
    config: &Config,
) -> Result<TagPlan> {
    let pattern = config.tag_pattern()?;
    let remote = args.remote(config).to_string();
    let mut warnings = Vec::new();

    let branch = BranchContext::new(repo.current_branch()?, &config.release_branches);
    match &branch.name {
        None => warnings.push(BoundaryWarning::DetachedHead),
        Some(name) if !branch.is_release_branch() => {
            warnings.push(BoundaryWarning::NotOnReleaseBranch {
                branch: name.clone(),
                release_branches: config.release_branches.clone(),
            })
        }
        Some(name) => debug!(branch = %name, "on release branch"),
    }

    if args.pull {
        info!(%remote, "pulling before tagging");
        repo.pull(&remote)?;
    }

    let tags = repo.list_tag_names()?;
    let selection = TagSelector::select(&tags);
    for skipped in selection.skipped() {
        debug!(tag = %skipped, "skipping non-semantic tag");
    }

    let previous_tag = match selection {
        Selection::NoTags => {
            warnings.push(BoundaryWarning::NoTags);
            None
        }
        Selection::NoSemanticTags { skipped } => {
            warnings.push(BoundaryWarning::NoSemanticTags { skipped });
            None
        }
        Selection::Latest { tag, .. } => {
            info!(%tag, "latest tag");
            if !pattern.matches(&tag)? {
                warnings.push(BoundaryWarning::TagMismatchPattern {
                    tag: tag.clone(),
                    pattern: pattern.pattern.clone(),
                });
            }
            Some(tag)
        }
    };

    // The selected name is parsed again from scratch; a failure here means
    // selection and parsing disagree, which is reported rather than ignored.
    let current_version = match &previous_tag {
        Some(tag) => SemanticVersion::parse(tag).map_err(|e| {
            TaggerError::config(format!("Error parsing latest tag '{}': {}", tag, e))
        })?,
        None => SemanticVersion::default(),
    };

    debug!(bump = %args.bump, from = %current_version, "incrementing version");
    let new_version = current_version.bump(args.bump)?;
    let tag = pattern.format(&new_version);

    if tags.iter().any(|existing| existing == &tag) {
        return Err(TaggerError::tag(format!("Tag '{}' already exists", tag)));
    }

    let message = config.render_message(&tag, &new_version.to_string());
    info!(%tag, "new version");

    for warning in &warnings {
        debug!(%warning, "boundary warning");
    }

    Ok(TagPlan {
        previous_tag,
        current_version,
        new_version,
        tag,
        message,
        remote,
        warnings,
    })
}

/// Create the planned tag and push it if requested.
///
/// In dry-run mode nothing is created or pushed.
pub fn apply_plan<R: Repository>(
    repo: &R,
    plan: TagPlan,
    args: &TagWorkflowArgs,
) -> Result<WorkflowResult> {
    let mut result = WorkflowResult {
        previous_tag: plan.previous_tag,
        tag: plan.tag,
        version: plan.new_version,
        created: false,
        pushed: false,
    };

    if args.dry_run {
        info!(tag = %result.tag, push = args.push, "dry run, no changes made");
        return Ok(result);
    }

    repo.create_tag(&result.tag, &plan.message)?;
    result.created = true;

    if args.push {
        repo.push_tag(&plan.remote, &result.tag)?;
        result.pushed = true;
    }

    Ok(result)
}

/// Main tag workflow: [plan_tag] followed by [apply_plan]
pub fn run_tag_workflow<R: Repository>(
    repo: &R,
    args: &TagWorkflowArgs,
    config: &Config,
) -> Result<WorkflowResult> {
    let plan = plan_tag(repo, args, config)?;
    apply_plan(repo, plan, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;

    fn args(bump: VersionBump) -> TagWorkflowArgs {
        TagWorkflowArgs::new(bump)
    }

    #[test]
    fn test_patch_bump_skips_bad_tags() {
        let repo = MockRepository::with_tags(&["1.0.0", "1.1.0", "bad-tag"]);
        let result = run_tag_workflow(&repo, &args(VersionBump::Patch), &Config::default()).unwrap();

        assert_eq!(result.previous_tag.as_deref(), Some("1.1.0"));
        assert_eq!(result.tag, "1.1.1");
        assert!(result.created);
        assert!(!result.pushed);
        assert_eq!(
            repo.created_tags(),
            vec![("1.1.1".to_string(), "Release 1.1.1".to_string())]
        );
    }

    #[test]
    fn test_major_bump_from_empty_repository() {
        let repo = MockRepository::new();
        let plan = plan_tag(&repo, &args(VersionBump::Major), &Config::default()).unwrap();

        assert_eq!(plan.previous_tag, None);
        assert_eq!(plan.current_version, SemanticVersion::new(0, 0, 0));
        assert_eq!(plan.tag, "1.0.0");
        assert_eq!(plan.warnings, vec![BoundaryWarning::NoTags]);
    }

    #[test]
    fn test_equal_versions_resolve_independent_of_creation_order() {
        for tags in [["v1.0.0", "1.0.0"], ["1.0.0", "v1.0.0"]] {
            let repo = MockRepository::with_tags(&tags);
            let plan = plan_tag(&repo, &args(VersionBump::Patch), &Config::default()).unwrap();
            assert_eq!(plan.previous_tag.as_deref(), Some("1.0.0"));
            assert_eq!(plan.tag, "1.0.1");
        }
    }

    #[test]
    fn test_only_non_semantic_tags_starts_at_zero() {
        let repo = MockRepository::with_tags(&["latest", "nightly"]);
        let plan = plan_tag(&repo, &args(VersionBump::Minor), &Config::default()).unwrap();

        assert_eq!(plan.tag, "0.1.0");
        assert!(matches!(
            plan.warnings.as_slice(),
            [BoundaryWarning::NoSemanticTags { skipped }] if skipped.len() == 2
        ));
    }

    #[test]
    fn test_prefix_is_not_reproduced_by_default() {
        let repo = MockRepository::with_tags(&["v2.0.0", "1.9.9"]);
        let plan = plan_tag(&repo, &args(VersionBump::Patch), &Config::default()).unwrap();

        assert_eq!(plan.previous_tag.as_deref(), Some("v2.0.0"));
        assert_eq!(plan.tag, "2.0.1");
        assert!(plan
            .warnings
            .iter()
            .any(|w| matches!(w, BoundaryWarning::TagMismatchPattern { .. })));
    }

    #[test]
    fn test_tag_pattern_applied() {
        let repo = MockRepository::with_tags(&["v2.0.0"]);
        let config = Config {
            tag_pattern: "v{version}".to_string(),
            ..Config::default()
        };
        let plan = plan_tag(&repo, &args(VersionBump::Minor), &config).unwrap();

        assert_eq!(plan.tag, "v2.1.0");
        assert_eq!(plan.message, "Release v2.1.0");
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn test_prerelease_latest_is_cleared_on_bump() {
        let repo = MockRepository::with_tags(&["1.4.0-rc.2"]);
        let plan = plan_tag(&repo, &args(VersionBump::Patch), &Config::default()).unwrap();
        assert_eq!(plan.tag, "1.4.1");
    }

    #[test]
    fn test_dry_run_creates_nothing() {
        let repo = MockRepository::with_tags(&["0.3.0"]);
        let mut dry = args(VersionBump::Minor);
        dry.dry_run = true;
        dry.push = true;

        let result = run_tag_workflow(&repo, &dry, &Config::default()).unwrap();
        assert_eq!(result.tag, "0.4.0");
        assert!(!result.created);
        assert!(!result.pushed);
        assert!(repo.created_tags().is_empty());
        assert!(repo.pushed_tags().is_empty());
    }

    #[test]
    fn test_push_uses_remote_override() {
        let repo = MockRepository::with_tags(&["1.0.0"]);
        let mut push = args(VersionBump::Patch);
        push.push = true;
        push.remote = Some("upstream".to_string());

        let result = run_tag_workflow(&repo, &push, &Config::default()).unwrap();
        assert!(result.pushed);
        assert_eq!(
            repo.pushed_tags(),
            vec![("upstream".to_string(), "1.0.1".to_string())]
        );
    }

    #[test]
    fn test_push_failure_propagates_after_create() {
        let repo = MockRepository::with_tags(&["1.0.0"]);
        repo.fail_push();
        let mut push = args(VersionBump::Patch);
        push.push = true;

        let err = run_tag_workflow(&repo, &push, &Config::default()).unwrap_err();
        assert!(matches!(err, TaggerError::Remote(_)));
        assert_eq!(repo.created_tags().len(), 1);
    }

    #[test]
    fn test_pull_failure_creates_nothing() {
        let repo = MockRepository::with_tags(&["1.0.0"]);
        repo.fail_pull();
        let mut pull = args(VersionBump::Patch);
        pull.pull = true;

        assert!(run_tag_workflow(&repo, &pull, &Config::default()).is_err());
        assert!(repo.created_tags().is_empty());
    }

    #[test]
    fn test_pull_before_listing() {
        let repo = MockRepository::with_tags(&["1.0.0"]);
        let mut pull = args(VersionBump::Patch);
        pull.pull = true;

        run_tag_workflow(&repo, &pull, &Config::default()).unwrap();
        assert_eq!(repo.pulls(), vec!["origin".to_string()]);
    }

    #[test]
    fn test_existing_tag_collision() {
        // "release-1.0.1" is not a semantic version, so 1.0.0 is the latest
        let repo = MockRepository::with_tags(&["1.0.0", "release-1.0.1"]);
        let config = Config {
            tag_pattern: "release-{version}".to_string(),
            ..Config::default()
        };
        let err = plan_tag(&repo, &args(VersionBump::Patch), &config).unwrap_err();
        assert!(matches!(err, TaggerError::Tag(_)));
        assert!(repo.created_tags().is_empty());
    }

    #[test]
    fn test_branch_warnings() {
        let repo = MockRepository::with_tags(&["1.0.0"]);
        repo.set_branch(Some("feature/login"));
        let plan = plan_tag(&repo, &args(VersionBump::Patch), &Config::default()).unwrap();
        assert!(matches!(
            plan.warnings.first(),
            Some(BoundaryWarning::NotOnReleaseBranch { branch, .. }) if branch == "feature/login"
        ));

        repo.set_branch(None);
        let plan = plan_tag(&repo, &args(VersionBump::Patch), &Config::default()).unwrap();
        assert_eq!(plan.warnings.first(), Some(&BoundaryWarning::DetachedHead));
    }

    #[test]
    fn test_overflow_is_fatal() {
        let repo = MockRepository::with_tags(&["18446744073709551615.0.0"]);
        let err = plan_tag(&repo, &args(VersionBump::Major), &Config::default()).unwrap_err();
        assert!(matches!(err, TaggerError::Overflow(_)));
    }

    #[test]
    fn test_invalid_pattern_is_fatal() {
        let repo = MockRepository::new();
        let config = Config {
            tag_pattern: "release".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            plan_tag(&repo, &args(VersionBump::Patch), &config),
            Err(TaggerError::Config(_))
        ));
    }
}
