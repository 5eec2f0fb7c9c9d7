//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the handful of git
//! operations the tagger needs, so the tagging workflow can run against a
//! real repository or an in-memory one.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! ```rust
//! # use git_easy_tagger::git::Repository;
//! # use git_easy_tagger::domain::select_latest;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let tags = repo.list_tag_names()?;
//! if let Some(latest) = select_latest(&tags) {
//!     println!("Latest tag: {}", latest);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Version-control collaborator used by the tagging workflow
///
/// Implementors must be `Send`; the workflow drives a repository from a
/// single thread. Implementations map their
/// underlying errors (like `git2::Error`) to [crate::error::TaggerError].
pub trait Repository: Send {
    /// All tag names in the repository, sorted by name so that selection
    /// ties resolve the same way on every run
    fn list_tag_names(&self) -> Result<Vec<String>>;

    /// Create an annotated tag on the current HEAD commit
    ///
    /// # Arguments
    /// * `name` - Name for the new tag
    /// * `message` - Annotation message
    ///
    /// # Returns
    /// * `Ok(())` - Success
    /// * `Err` - If the tag already exists, HEAD has no commit, or Git error occurs
    fn create_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Push a single tag to a remote
    ///
    /// # Arguments
    /// * `remote` - Name of the remote (e.g., "origin")
    /// * `name` - Tag to push
    fn push_tag(&self, remote: &str, name: &str) -> Result<()>;

    /// Name of the checked-out branch, or `None` when HEAD is detached
    fn current_branch(&self) -> Result<Option<String>>;

    /// Fetch branches and tags from a remote and fast-forward the current
    /// branch when possible
    fn pull(&self, remote: &str) -> Result<()>;
}
