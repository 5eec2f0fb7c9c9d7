use crate::error::{Result, TaggerError};
use git2::{BranchType, ErrorCode, Repository as Git2Repo};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::discover(path).map_err(|e| {
            TaggerError::config(format!(
                "'{}' is not a git repository: {}",
                path.display(),
                e.message()
            ))
        })?;

        debug!(path = %repo.path().display(), "opened repository");
        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Root of the working tree, `None` for bare repositories
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Credential callbacks shared by fetch and push.
    ///
    /// Tries SSH keys from ~/.ssh/, then the SSH agent, then the configured
    /// git credential helper, then default credentials.
    fn remote_callbacks(config: &git2::Config) -> git2::RemoteCallbacks<'_> {
        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(move |url, username_from_url, allowed_types| {
            let username = username_from_url.unwrap_or("git");

            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                if let Some(home) = dirs::home_dir() {
                    for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                        let path = home.join(".ssh").join(key);
                        if path.exists() {
                            if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                                return Ok(cred);
                            }
                        }
                    }
                }

                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }
            }

            if allowed_types.contains(git2::CredentialType::USER_PASS_PLAINTEXT) {
                if let Ok(cred) = git2::Cred::credential_helper(config, url, username_from_url) {
                    return Ok(cred);
                }
            }

            git2::Cred::default()
        });
        callbacks
    }

    /// Fast-forward the local `branch_name` to `{remote_name}/{branch_name}`.
    ///
    /// Diverged or ahead branches are left untouched. Similar to
    /// `git pull --ff-only`.
    fn fast_forward(&self, branch_name: &str, remote_name: &str) -> Result<()> {
        let tracking = format!("refs/remotes/{}/{}", remote_name, branch_name);
        let remote_oid = match self.repo.find_reference(&tracking) {
            Ok(reference) => reference.target().ok_or_else(|| {
                TaggerError::remote(format!("Remote reference {} is invalid", tracking))
            })?,
            Err(_) => {
                debug!(%tracking, "no remote tracking branch, nothing to update");
                return Ok(());
            }
        };

        let mut local_ref = self
            .repo
            .find_branch(branch_name, BranchType::Local)?
            .into_reference();
        let Some(local_oid) = local_ref.target() else {
            return Ok(());
        };

        if local_oid == remote_oid {
            debug!(branch = branch_name, "already up to date");
            return Ok(());
        }

        if !self.repo.graph_descendant_of(remote_oid, local_oid)? {
            warn!(
                branch = branch_name,
                "local branch has diverged from remote, skipping fast-forward"
            );
            return Ok(());
        }

        // Untracked and ignored files survive a fast-forward, like `git pull`
        let mut status_options = git2::StatusOptions::new();
        status_options.include_untracked(false).include_ignored(false);
        let dirty = !self.repo.statuses(Some(&mut status_options))?.is_empty();
        if dirty {
            return Err(TaggerError::remote(format!(
                "Cannot fast-forward '{}': working tree has uncommitted changes",
                branch_name
            )));
        }

        local_ref.set_target(
            remote_oid,
            &format!("pull: fast-forward from {}/{}", remote_name, branch_name),
        )?;
        self.repo
            .checkout_head(Some(git2::build::CheckoutBuilder::default().force()))?;

        info!(branch = branch_name, to = %remote_oid, "fast-forwarded branch");
        Ok(())
    }
}

impl super::Repository for Git2Repository {
    fn list_tag_names(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;
        let mut names: Vec<String> = tags.iter().flatten().map(|s| s.to_string()).collect();
        // libgit2 does not promise an order; selection ties go to the first name
        names.sort();

        debug!(count = names.len(), "listed tags");
        Ok(names)
    }

    #[instrument(skip(self, message))]
    fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        let head = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .map_err(|e| TaggerError::tag(format!("Cannot resolve HEAD commit: {}", e)))?;

        let signature = self.repo.signature().map_err(|e| {
            TaggerError::tag(format!(
                "Cannot determine tagger identity (set user.name and user.email): {}",
                e
            ))
        })?;

        self.repo
            .tag(name, head.as_object(), &signature, message, false)
            .map_err(|e| {
                if e.code() == ErrorCode::Exists {
                    TaggerError::tag(format!("Tag '{}' already exists", name))
                } else {
                    TaggerError::tag(format!("Cannot create tag '{}': {}", name, e))
                }
            })?;

        info!(name, commit = %head.id(), "created tag");
        Ok(())
    }

    #[instrument(skip(self))]
    fn push_tag(&self, remote: &str, name: &str) -> Result<()> {
        let start = std::time::Instant::now();
        let mut remote_handle = self
            .repo
            .find_remote(remote)
            .map_err(|_| TaggerError::remote(format!("No remote named '{}' found", remote)))?;

        let config = self.repo.config()?;
        let mut callbacks = Self::remote_callbacks(&config);
        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "Remote rejected {}: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!("refs/tags/{}:refs/tags/{}", name, name);
        remote_handle
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| match e.class() {
                git2::ErrorClass::Net => {
                    TaggerError::remote(format!("Network error during push: {}", e))
                }
                git2::ErrorClass::Reference => {
                    TaggerError::remote(format!("Reference error during push: {}", e))
                }
                _ => TaggerError::remote(format!("Failed to push tag '{}': {}", name, e)),
            })?;

        info!(
            remote,
            tag = name,
            duration_ms = start.elapsed().as_millis(),
            "pushed tag"
        );
        Ok(())
    }

    fn current_branch(&self) -> Result<Option<String>> {
        match self.repo.head() {
            Ok(head) if head.is_branch() => Ok(head.shorthand().map(str::to_string)),
            Ok(_) => Ok(None),
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                // No commits yet; HEAD still names the branch symbolically
                let head = self.repo.find_reference("HEAD")?;
                Ok(head
                    .symbolic_target()
                    .and_then(|t| t.strip_prefix("refs/heads/"))
                    .map(str::to_string))
            }
            Err(e) => Err(TaggerError::branch(format!("Cannot read HEAD: {}", e))),
        }
    }

    #[instrument(skip(self))]
    fn pull(&self, remote: &str) -> Result<()> {
        let start = std::time::Instant::now();
        let mut remote_handle = self
            .repo
            .find_remote(remote)
            .map_err(|_| TaggerError::remote(format!("No remote named '{}' found", remote)))?;

        let config = self.repo.config()?;
        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.remote_callbacks(Self::remote_callbacks(&config));

        let refspec_heads = format!("+refs/heads/*:refs/remotes/{}/*", remote);
        let refspecs = [refspec_heads.as_str(), "+refs/tags/*:refs/tags/*"];
        remote_handle
            .fetch(&refspecs, Some(&mut fetch_options), None)
            .map_err(|e| {
                TaggerError::remote(format!("Failed to fetch from remote '{}': {}", remote, e))
            })?;

        info!(
            remote,
            duration_ms = start.elapsed().as_millis(),
            "fetched from remote"
        );

        match super::Repository::current_branch(self)? {
            Some(branch) => self.fast_forward(&branch, remote),
            None => {
                warn!("HEAD is detached, fetched without updating a branch");
                Ok(())
            }
        }
    }
}
