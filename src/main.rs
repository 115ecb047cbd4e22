use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;

use crate::{
  app::{App, load_branches},
  cli::Cli,
  clipboard::SystemClipboard,
  dispatcher::Dispatcher,
  git::{GitCliRepo, GitRepo},
  utils::{initialize_logging, initialize_panic_handler},
};

pub mod action;
pub mod app;
pub mod cli;
pub mod clipboard;
pub mod components;
pub mod dispatcher;
pub mod error;
pub mod git;
pub mod mode;
pub mod tui;
pub mod utils;

async fn tokio_main() -> Result<()> {
  initialize_logging()?;
  initialize_panic_handler()?;

  let args = Cli::parse();
  let mode = args.run_mode();
  info!("Starting in {} mode", mode);

  let repo: Arc<dyn GitRepo> = Arc::new(GitCliRepo::default());
  let branches = load_branches(repo.as_ref(), args.require_repo).await?;

  let dispatcher = Dispatcher::new(repo, Box::new(SystemClipboard));
  let mut app = App::new(branches, mode, dispatcher);
  let outcome = app.run().await?;
  info!("Session ended with {:?}", outcome);

  Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
  if let Err(e) = tokio_main().await {
    eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
    Err(e)
  } else {
    Ok(())
  }
}
