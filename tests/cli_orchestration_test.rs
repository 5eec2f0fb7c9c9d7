use git_easy_tagger::cli::{apply_plan, plan_tag, run_tag_workflow, TagWorkflowArgs};
use git_easy_tagger::config::Config;
use git_easy_tagger::domain::{SemanticVersion, VersionBump};
use git_easy_tagger::git::MockRepository;

#[test]
fn test_end_to_end_patch() {
    let repo = MockRepository::with_tags(&["1.0.0", "1.1.0", "bad-tag"]);
    let args = TagWorkflowArgs::new(VersionBump::Patch);

    let result = run_tag_workflow(&repo, &args, &Config::default()).unwrap();

    assert_eq!(result.previous_tag.as_deref(), Some("1.1.0"));
    assert_eq!(result.version, SemanticVersion::new(1, 1, 1));
    assert_eq!(result.tag, "1.1.1");
}

#[test]
fn test_end_to_end_major_from_nothing() {
    let repo = MockRepository::new();
    let args = TagWorkflowArgs::new(VersionBump::Major);

    let result = run_tag_workflow(&repo, &args, &Config::default()).unwrap();

    assert_eq!(result.previous_tag, None);
    assert_eq!(result.tag, "1.0.0");
    assert!(result.created);
}

#[test]
fn test_plan_then_apply_with_push() {
    let repo = MockRepository::with_tags(&["v0.9.3"]);
    let config = Config {
        tag_pattern: "v{version}".to_string(),
        tag_message: "Version {version}".to_string(),
        ..Config::default()
    };
    let args = TagWorkflowArgs {
        push: true,
        ..TagWorkflowArgs::new(VersionBump::Minor)
    };

    let plan = plan_tag(&repo, &args, &config).unwrap();
    assert_eq!(plan.tag, "v0.10.0");
    assert_eq!(plan.remote, "origin");
    assert!(repo.created_tags().is_empty(), "planning must not create tags");

    let result = apply_plan(&repo, plan, &args).unwrap();
    assert!(result.pushed);
    assert_eq!(
        repo.created_tags(),
        vec![("v0.10.0".to_string(), "Version 0.10.0".to_string())]
    );
    assert_eq!(
        repo.pushed_tags(),
        vec![("origin".to_string(), "v0.10.0".to_string())]
    );
}

#[test]
fn test_repeated_runs_keep_incrementing() {
    let repo = MockRepository::new();
    let args = TagWorkflowArgs::new(VersionBump::Patch);
    let config = Config::default();

    let tags: Vec<String> = (0..3)
        .map(|_| run_tag_workflow(&repo, &args, &config).unwrap().tag)
        .collect();

    assert_eq!(tags, vec!["0.0.1", "0.0.2", "0.0.3"]);
}
