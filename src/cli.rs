use clap::Parser;

use crate::{mode::RunMode, utils::version};

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
  /// Copy the selected branch name to the clipboard instead of checking it out
  #[arg(short = 'c')]
  pub copy: bool,

  /// Force delete the selected branch instead of checking it out
  #[arg(short = 'd')]
  pub delete: bool,

  /// Exit with an error instead of showing an empty list when branches cannot be listed
  #[arg(long)]
  pub require_repo: bool,
}

impl Cli {
  pub fn run_mode(&self) -> RunMode {
    RunMode::from_flags(self.copy, self.delete)
  }
}
