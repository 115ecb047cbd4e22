use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::{clipboard::Clipboard, error::Error, git::GitRepo, mode::RunMode};

/// What happened when the terminal action ran. Rendered as the last frame of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionReport {
  CheckedOut(String),
  Copied(String),
  Deleted(String),
  Failed { mode: RunMode, branch: String, reason: String },
}

impl ActionReport {
  pub fn is_failure(&self) -> bool {
    matches!(self, ActionReport::Failed { .. })
  }

  pub fn branch(&self) -> &str {
    match self {
      ActionReport::CheckedOut(branch) | ActionReport::Copied(branch) | ActionReport::Deleted(branch) => branch,
      ActionReport::Failed { branch, .. } => branch,
    }
  }

  pub fn message(&self) -> String {
    match self {
      ActionReport::CheckedOut(branch) => format!("Switched to branch '{}'", branch),
      ActionReport::Copied(branch) => format!("Copied '{}' to the clipboard", branch),
      ActionReport::Deleted(branch) => format!("Deleted branch '{}'", branch),
      ActionReport::Failed { mode: RunMode::Checkout, reason, .. } => {
        format!("There was an unexpected error while checking out this branch.\n{}", reason)
      },
      ActionReport::Failed { mode: RunMode::Copy, reason, .. } => {
        format!("There was an unexpected error while copying this branch.\n{}", reason)
      },
      ActionReport::Failed { mode: RunMode::Delete, reason, .. } => {
        format!("There was an unexpected error while deleting this branch.\n{}", reason)
      },
    }
  }
}

/// Runs the checkout, copy or delete for the confirmed branch.
pub struct Dispatcher {
  repo: Arc<dyn GitRepo>,
  clipboard: Box<dyn Clipboard>,
}

impl Dispatcher {
  pub fn new(repo: Arc<dyn GitRepo>, clipboard: Box<dyn Clipboard>) -> Self {
    Dispatcher { repo, clipboard }
  }

  pub async fn dispatch(&mut self, branch: &str, mode: RunMode) -> ActionReport {
    info!("Dispatching {} for branch {}", mode, branch);
    let result = match mode {
      RunMode::Checkout => self.repo.checkout_branch_from_name(branch).await,
      RunMode::Copy => self.clipboard.set_text(branch),
      RunMode::Delete => self.repo.delete_branch_from_name(branch).await,
    };
    match result {
      Ok(()) => match mode {
        RunMode::Checkout => ActionReport::CheckedOut(branch.to_string()),
        RunMode::Copy => ActionReport::Copied(branch.to_string()),
        RunMode::Delete => ActionReport::Deleted(branch.to_string()),
      },
      Err(err) => {
        error!("{} of {} failed: {}", mode, branch, err);
        ActionReport::Failed { mode, branch: branch.to_string(), reason: reason(&err) }
      },
    }
  }
}

fn reason(err: &Error) -> String {
  match err {
    Error::Git(message) => message.clone(),
    other => other.to_string(),
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::{
    clipboard::mock::MockClipboard,
    git::mock_git_repo::{GitCall, MockGitRepo},
  };

  fn dispatcher(repo: &Arc<MockGitRepo>, clipboard: &MockClipboard) -> Dispatcher {
    Dispatcher::new(repo.clone(), Box::new(clipboard.clone()))
  }

  #[tokio::test]
  async fn test_checkout() {
    let repo = Arc::new(MockGitRepo::default());
    let clipboard = MockClipboard::default();

    let report = dispatcher(&repo, &clipboard).dispatch("feature/x", RunMode::Checkout).await;

    assert_eq!(report, ActionReport::CheckedOut("feature/x".to_string()));
    assert_eq!(repo.calls(), vec![GitCall::Checkout("feature/x".to_string())]);
    assert!(clipboard.writes().is_empty());
  }

  #[tokio::test]
  async fn test_copy_touches_no_git_command() {
    let repo = Arc::new(MockGitRepo::default());
    let clipboard = MockClipboard::default();

    let report = dispatcher(&repo, &clipboard).dispatch("main", RunMode::Copy).await;

    assert_eq!(report, ActionReport::Copied("main".to_string()));
    assert_eq!(clipboard.writes(), vec!["main".to_string()]);
    assert!(repo.calls().is_empty());
  }

  #[tokio::test]
  async fn test_delete() {
    let repo = Arc::new(MockGitRepo::default());
    let clipboard = MockClipboard::default();

    let report = dispatcher(&repo, &clipboard).dispatch("old", RunMode::Delete).await;

    assert_eq!(report, ActionReport::Deleted("old".to_string()));
    assert_eq!(repo.calls(), vec![GitCall::Delete("old".to_string())]);
  }

  #[tokio::test]
  async fn test_checkout_failure_is_reported() {
    let repo = Arc::new(MockGitRepo::default());
    let clipboard = MockClipboard::default();

    let report = dispatcher(&repo, &clipboard).dispatch("will-fail", RunMode::Checkout).await;

    assert!(report.is_failure());
    assert_eq!(
      report.message(),
      "There was an unexpected error while checking out this branch.\nerror: pathspec 'will-fail' did not match"
    );
  }

  #[tokio::test]
  async fn test_delete_failure_is_reported() {
    let repo = Arc::new(MockGitRepo::default());
    let clipboard = MockClipboard::default();

    let report = dispatcher(&repo, &clipboard).dispatch("will-fail", RunMode::Delete).await;

    assert_eq!(
      report,
      ActionReport::Failed {
        mode: RunMode::Delete,
        branch: "will-fail".to_string(),
        reason: "error: branch 'will-fail' not found.".to_string(),
      }
    );
  }

  #[tokio::test]
  async fn test_clipboard_failure_is_reported() {
    let repo = Arc::new(MockGitRepo::default());
    let clipboard = MockClipboard::failing();

    let report = dispatcher(&repo, &clipboard).dispatch("main", RunMode::Copy).await;

    assert!(report.is_failure());
    assert_eq!(report.branch(), "main");
    assert!(report.message().starts_with("There was an unexpected error while copying this branch."));
  }
}
