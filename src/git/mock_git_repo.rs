use std::sync::Mutex;

use async_trait::async_trait;

use super::{GitBranch, GitRepo};
use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
  LocalBranches,
  Checkout(String),
  Delete(String),
}

/// Records every call. Branch names containing `fail` make checkout and delete error.
#[derive(Debug, Default)]
pub struct MockGitRepo {
  calls: Mutex<Vec<GitCall>>,
  outside_repository: bool,
}

impl MockGitRepo {
  /// Listing branches fails the way `git branch` does outside a repository.
  pub fn outside_repository() -> Self {
    MockGitRepo { calls: Mutex::default(), outside_repository: true }
  }

  pub fn calls(&self) -> Vec<GitCall> {
    self.calls.lock().unwrap().clone()
  }

  fn record(&self, call: GitCall) {
    self.calls.lock().unwrap().push(call);
  }
}

#[async_trait]
impl GitRepo for MockGitRepo {
  async fn local_branches(&self) -> Result<Vec<GitBranch>, Error> {
    self.record(GitCall::LocalBranches);
    if self.outside_repository {
      return Err(Error::Git("fatal: not a git repository (or any of the parent directories): .git".to_string()));
    }
    Ok(vec![GitBranch::new("main".to_string()), GitBranch::new("test".to_string())])
  }

  async fn checkout_branch_from_name(&self, branch_name: &str) -> Result<(), Error> {
    self.record(GitCall::Checkout(branch_name.to_string()));
    match branch_name {
      name if name.contains("fail") => Err(Error::Git(format!("error: pathspec '{}' did not match", name))),
      _ => Ok(()),
    }
  }

  async fn delete_branch_from_name(&self, branch_name: &str) -> Result<(), Error> {
    self.record(GitCall::Delete(branch_name.to_string()));
    match branch_name {
      name if name.contains("fail") => Err(Error::Git(format!("error: branch '{}' not found.", name))),
      _ => Ok(()),
    }
  }
}
