use async_trait::async_trait;
use tokio::process::Command as TokioCommand;
use tracing::{error, info};

use crate::{
  error::Error,
  git::types::{GitBranch, GitRepo},
};

const HEAD_MARKER: char = '*';
/// Marks a branch checked out in another worktree.
const WORKTREE_MARKER: char = '+';

#[derive(Debug, Default)]
pub struct GitCliRepo {}

async fn run_git_command(args: &[&str]) -> Result<String, Error> {
  let args_log_command = args.join(" ");
  info!("Running `git {}`", args_log_command);
  let output = match TokioCommand::new("git").args(args).output().await {
    Ok(output) => output,
    Err(err) => {
      error!("Failed to run `git {}`, error: {}", args_log_command, err);
      return Err(Error::Git(format!("{}", err)));
    },
  };

  let err = String::from_utf8(output.stderr)?;
  if !output.status.success() {
    error!("Failed to run `git {}`, error: {}", args_log_command, err);
    let message = strip_ansi_escapes::strip_str(err.trim());
    if message.is_empty() {
      return Err(Error::Git(format!("`git {}` exited with {}", args_log_command, output.status)));
    }
    return Err(Error::Git(message));
  }
  let content = String::from_utf8(output.stdout)?;
  info!("Received git cli reply:\n{}", content);
  Ok(content)
}

/// Turns `git branch` output into branches, in listing order.
///
/// Each line is trimmed and loses a leading `*` current branch marker, or a `+ ` marker for a
/// branch checked out in another worktree. A `+` directly followed by text is part of the name.
/// Blank lines are dropped and nothing else about the name is validated.
pub fn parse_branch_list(output: &str) -> Vec<GitBranch> {
  output
    .lines()
    .filter_map(|line| {
      let trimmed = line.trim();
      let (is_head, rest) = if let Some(rest) = trimmed.strip_prefix(HEAD_MARKER) {
        (true, rest)
      } else if let Some(rest) =
        trimmed.strip_prefix(WORKTREE_MARKER).filter(|rest| rest.starts_with(char::is_whitespace))
      {
        (false, rest)
      } else {
        (false, trimmed)
      };
      let name = rest.trim();
      if name.is_empty() {
        return None;
      }
      Some(GitBranch { name: String::from(name), is_head })
    })
    .collect()
}

#[async_trait]
impl GitRepo for GitCliRepo {
  async fn local_branches(&self) -> Result<Vec<GitBranch>, Error> {
    let res = run_git_command(&["branch"]).await?;
    Ok(parse_branch_list(&res))
  }

  async fn checkout_branch_from_name(&self, branch_name: &str) -> Result<(), Error> {
    run_git_command(&["checkout", branch_name]).await?;
    Ok(())
  }

  async fn delete_branch_from_name(&self, branch_name: &str) -> Result<(), Error> {
    run_git_command(&["branch", "-D", branch_name]).await?;
    Ok(())
  }
}
