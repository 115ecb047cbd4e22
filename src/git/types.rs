use async_trait::async_trait;

use crate::error::Error;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GitBranch {
  pub name: String,
  pub is_head: bool,
}

impl GitBranch {
  pub fn new(name: String) -> Self {
    GitBranch { name, is_head: false }
  }
}

#[async_trait]
pub trait GitRepo: Send + Sync {
  async fn local_branches(&self) -> Result<Vec<GitBranch>, Error>;
  async fn checkout_branch_from_name(&self, branch_name: &str) -> Result<(), Error>;
  async fn delete_branch_from_name(&self, branch_name: &str) -> Result<(), Error>;
}
