use ratatui::{
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::ListItem,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::git::GitBranch;

pub const ACCENT: Color = Color::Rgb(0x7B, 0x68, 0xEE);
const SELECTED_PREFIX: &str = "> ";
const ELLIPSIS: char = '…';

#[derive(Debug, Clone)]
pub struct BranchItem {
  pub branch: GitBranch,
}

impl BranchItem {
  pub fn new(branch: GitBranch) -> Self {
    BranchItem { branch }
  }

  pub fn label(&self, index: usize) -> String {
    format!("{}. {}", index + 1, self.branch.name)
  }

  /// Renders the row at `index`, padded left by one column and cut to `width` columns.
  pub fn render(&self, index: usize, selected: bool, width: u16) -> ListItem<'static> {
    let mut parts = vec![Span::raw(" ")];
    let available = usize::from(width).saturating_sub(1);

    if selected {
      let text = truncate(&format!("{}{}", SELECTED_PREFIX, self.label(index)), available);
      parts.push(Span::styled(text, Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)));
    } else {
      parts.push(Span::raw(truncate(&self.label(index), available)));
    }

    let used: usize = parts.iter().map(Span::width).sum();
    if self.branch.is_head && used + 7 <= usize::from(width) {
      parts.push(Span::styled(" (HEAD)", Style::default().add_modifier(Modifier::DIM)));
    }

    ListItem::new(Line::from(parts))
  }
}

/// Cuts `text` to at most `width` terminal columns, ending in `…` when anything was dropped.
fn truncate(text: &str, width: usize) -> String {
  if text.width() <= width {
    return text.to_string();
  }
  if width == 0 {
    return String::new();
  }
  let budget = width - 1;
  let mut used = 0;
  let mut cut = String::new();
  for c in text.chars() {
    let w = c.width().unwrap_or(0);
    if used + w > budget {
      break;
    }
    used += w;
    cut.push(c);
  }
  cut.push(ELLIPSIS);
  cut
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  fn item(name: &str) -> BranchItem {
    BranchItem::new(GitBranch::new(name.to_string()))
  }

  #[test]
  fn test_label_is_one_based() {
    assert_eq!(item("main").label(0), "1. main");
    assert_eq!(item("feature/x").label(9), "10. feature/x");
  }

  #[test]
  fn test_render_plain_row() {
    let rendered = item("main").render(0, false, 40);

    assert_eq!(rendered, ListItem::new(Line::from(vec![Span::raw(" "), Span::raw("1. main")])));
  }

  #[test]
  fn test_render_selected_row() {
    let rendered = item("feature/x").render(1, true, 40);

    assert_eq!(
      rendered,
      ListItem::new(Line::from(vec![
        Span::raw(" "),
        Span::styled("> 2. feature/x", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
      ]))
    );
  }

  #[test]
  fn test_render_head_hint() {
    let branch = GitBranch { name: "develop".to_string(), is_head: true };

    let rendered = BranchItem::new(branch).render(2, false, 40);

    assert_eq!(
      rendered,
      ListItem::new(Line::from(vec![
        Span::raw(" "),
        Span::raw("3. develop"),
        Span::styled(" (HEAD)", Style::default().add_modifier(Modifier::DIM)),
      ]))
    );
  }

  #[test]
  fn test_render_truncates_to_width() {
    let rendered = item("a-very-long-branch-name").render(0, false, 10);

    assert_eq!(rendered, ListItem::new(Line::from(vec![Span::raw(" "), Span::raw("1. a-ver…")])));
  }

  #[test]
  fn test_render_truncates_wide_characters_by_columns() {
    let rendered = item("機能ブランチ").render(0, false, 10);

    assert_eq!(rendered, ListItem::new(Line::from(vec![Span::raw(" "), Span::raw("1. 機能…")])));
  }

  #[test]
  fn test_render_head_hint_dropped_when_wide_name_fills_row() {
    let branch = GitBranch { name: "機能".to_string(), is_head: true };

    let rendered = BranchItem::new(branch).render(0, false, 14);

    assert_eq!(rendered, ListItem::new(Line::from(vec![Span::raw(" "), Span::raw("1. 機能")])));
  }

  #[test]
  fn test_truncate() {
    assert_eq!(truncate("main", 4), "main");
    assert_eq!(truncate("main", 3), "ma…");
    assert_eq!(truncate("main", 0), "");
    assert_eq!(truncate("機能", 4), "機能");
    assert_eq!(truncate("機能", 3), "機…");
    assert_eq!(truncate("機能", 2), "…");
  }
}
