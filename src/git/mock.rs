use crate::error::{Result, TaggerError};
use crate::git::Repository;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MockState {
    tags: Vec<String>,
    branch: Option<String>,
    created: Vec<(String, String)>,
    pushed: Vec<(String, String)>,
    pulls: Vec<String>,
    fail_push: bool,
    fail_pull: bool,
}

/// Mock repository for testing without actual git operations
///
/// Records every create/push/pull so tests can assert on side effects.
#[derive(Debug)]
pub struct MockRepository {
    state: Mutex<MockState>,
}

impl MockRepository {
    /// Create a new empty mock repository on branch `main`
    pub fn new() -> Self {
        MockRepository {
            state: Mutex::new(MockState {
                branch: Some("main".to_string()),
                ..MockState::default()
            }),
        }
    }

    /// Create a mock repository that already has the given tags
    pub fn with_tags<S: AsRef<str>>(tags: &[S]) -> Self {
        let repo = Self::new();
        for tag in tags {
            repo.add_tag(tag.as_ref());
        }
        repo
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A poisoned lock only means another test thread panicked
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add an existing tag
    pub fn add_tag(&self, name: impl Into<String>) {
        self.state().tags.push(name.into());
    }

    /// Set the checked-out branch (`None` for detached HEAD)
    pub fn set_branch(&self, branch: Option<&str>) {
        self.state().branch = branch.map(str::to_string);
    }

    /// Make subsequent pushes fail
    pub fn fail_push(&self) {
        self.state().fail_push = true;
    }

    /// Make subsequent pulls fail
    pub fn fail_pull(&self) {
        self.state().fail_pull = true;
    }

    /// Tags created through [Repository::create_tag], as `(name, message)`
    pub fn created_tags(&self) -> Vec<(String, String)> {
        self.state().created.clone()
    }

    /// Tags pushed through [Repository::push_tag], as `(remote, name)`
    pub fn pushed_tags(&self) -> Vec<(String, String)> {
        self.state().pushed.clone()
    }

    /// Remotes pulled from, in call order
    pub fn pulls(&self) -> Vec<String> {
        self.state().pulls.clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn list_tag_names(&self) -> Result<Vec<String>> {
        let mut names = self.state().tags.clone();
        names.sort();
        Ok(names)
    }

    fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        let mut state = self.state();
        if state.tags.iter().any(|t| t == name) {
            return Err(TaggerError::tag(format!("Tag '{}' already exists", name)));
        }
        state.tags.push(name.to_string());
        state.created.push((name.to_string(), message.to_string()));
        Ok(())
    }

    fn push_tag(&self, remote: &str, name: &str) -> Result<()> {
        let mut state = self.state();
        if state.fail_push {
            return Err(TaggerError::remote(format!("Push to '{}' rejected", remote)));
        }
        if !state.tags.iter().any(|t| t == name) {
            return Err(TaggerError::tag(format!("Tag '{}' does not exist", name)));
        }
        state.pushed.push((remote.to_string(), name.to_string()));
        Ok(())
    }

    fn current_branch(&self) -> Result<Option<String>> {
        Ok(self.state().branch.clone())
    }

    fn pull(&self, remote: &str) -> Result<()> {
        let mut state = self.state();
        if state.fail_pull {
            return Err(TaggerError::remote(format!(
                "Failed to fetch from remote '{}'",
                remote
            )));
        }
        state.pulls.push(remote.to_string());
        Ok(())
    }
}
