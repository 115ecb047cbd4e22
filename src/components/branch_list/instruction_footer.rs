use ratatui::{
  layout::Rect,
  style::{Modifier, Style},
  text::{Line, Span},
};

use crate::{mode::RunMode, tui::Frame};

#[derive(Debug, Default)]
pub struct InstructionFooter {}

impl InstructionFooter {
  pub fn line(&self, mode: RunMode, page: usize, page_count: usize, has_selection: bool) -> Line<'static> {
    let mut commands = Vec::new();
    if page_count > 1 {
      commands.push(Span::raw(format!("page {}/{} | ", page + 1, page_count)));
    }
    commands.push(Span::raw("↑/k: Up | ↓/j: Down"));
    if has_selection {
      let verb = match mode {
        RunMode::Checkout => "Checkout",
        RunMode::Copy => "Copy",
        RunMode::Delete => "Delete",
      };
      commands.push(Span::raw(format!(" | enter: {}", verb)));
    }
    commands.push(Span::raw(" | q: Quit"));
    Line::from(commands).style(Style::default().add_modifier(Modifier::DIM))
  }

  pub fn render(
    &self,
    f: &mut Frame<'_>,
    area: Rect,
    mode: RunMode,
    page: usize,
    page_count: usize,
    has_selection: bool,
  ) {
    f.render_widget(self.line(mode, page, page_count, has_selection), area);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
  }

  #[test]
  fn test_single_page() {
    let footer = InstructionFooter::default();

    assert_eq!(
      text(&footer.line(RunMode::Checkout, 0, 1, true)),
      "↑/k: Up | ↓/j: Down | enter: Checkout | q: Quit"
    );
  }

  #[test]
  fn test_multiple_pages_show_position() {
    let footer = InstructionFooter::default();

    assert_eq!(
      text(&footer.line(RunMode::Delete, 1, 3, true)),
      "page 2/3 | ↑/k: Up | ↓/j: Down | enter: Delete | q: Quit"
    );
  }

  #[test]
  fn test_no_selection_hides_enter() {
    let footer = InstructionFooter::default();

    assert_eq!(text(&footer.line(RunMode::Copy, 0, 1, false)), "↑/k: Up | ↓/j: Down | q: Quit");
  }
}
