/// Represents the branch HEAD points at when tagging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    /// `None` when HEAD is detached
    pub name: Option<String>,
    pub is_release: bool,
}

impl BranchContext {
    /// Create a branch context, checking the name against the release branches
    pub fn new<S: AsRef<str>>(name: Option<String>, release_branches: &[S]) -> Self {
        let is_release = name
            .as_deref()
            .is_some_and(|n| release_branches.iter().any(|b| b.as_ref() == n));

        BranchContext { name, is_release }
    }

    pub fn is_detached(&self) -> bool {
        self.name.is_none()
    }

    /// Check if this is a release branch (main/master by default)
    pub fn is_release_branch(&self) -> bool {
        self.is_release
    }
}
