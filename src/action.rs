use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Deserialize)]
pub enum Action {
  Cancel,
  Confirm,
  Quit,
  Resize(u16, u16),
  SelectFirst,
  SelectLast,
  SelectNext,
  SelectNextPage,
  SelectPrevious,
  SelectPreviousPage,
}
