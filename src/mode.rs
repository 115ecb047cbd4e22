use serde::{Deserialize, Serialize};
use strum::Display;

/// The terminal action performed on the confirmed branch. Exactly one is active per run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum RunMode {
  #[default]
  Checkout,
  Copy,
  Delete,
}

impl RunMode {
  /// Resolves the mode from the `-c` and `-d` flags. Delete takes precedence when both are set.
  pub fn from_flags(copy: bool, delete: bool) -> Self {
    if delete {
      return RunMode::Delete;
    }
    if copy {
      return RunMode::Copy;
    }
    RunMode::Checkout
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_no_flags_is_checkout() {
    assert_eq!(RunMode::from_flags(false, false), RunMode::Checkout);
  }

  #[test]
  fn test_copy_flag() {
    assert_eq!(RunMode::from_flags(true, false), RunMode::Copy);
  }

  #[test]
  fn test_delete_flag() {
    assert_eq!(RunMode::from_flags(false, true), RunMode::Delete);
  }

  #[test]
  fn test_delete_wins_over_copy() {
    assert_eq!(RunMode::from_flags(true, true), RunMode::Delete);
  }
}
