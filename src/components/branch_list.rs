use std::ops::Range;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, List, ListItem, ListState, Padding, Paragraph},
};
use tracing::info;

use crate::{
  action::Action,
  components::{
    Component,
    branch_list::{branch_item::BranchItem, instruction_footer::InstructionFooter},
  },
  dispatcher::{ActionReport, Dispatcher},
  git::GitBranch,
  mode::RunMode,
  tui::Frame,
};

mod branch_item;
mod instruction_footer;

const TITLE: &str = "Select a branch";
const FAREWELL: &str = "See ya later!";
const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionState {
  Browsing,
  Confirmed(String),
  Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
  NoSelection,
  Selected(String),
}

/// The interactive branch picker.
///
/// Navigation clamps at both ends of the list. The terminal action runs once, on the transition
/// into [`SelectionState::Confirmed`], and every event after a terminal state is ignored.
pub struct BranchList {
  mode: RunMode,
  state: SelectionState,
  branches: Vec<BranchItem>,
  list_state: ListState,
  width: Option<u16>,
  page_size: usize,
  dispatcher: Dispatcher,
  report: Option<ActionReport>,
  instruction_footer: InstructionFooter,
}

impl BranchList {
  pub fn new(branches: Vec<GitBranch>, mode: RunMode, dispatcher: Dispatcher) -> Self {
    let branches: Vec<BranchItem> = branches.into_iter().map(BranchItem::new).collect();
    let selected = if branches.is_empty() { None } else { Some(0) };
    BranchList {
      mode,
      state: SelectionState::Browsing,
      branches,
      list_state: ListState::default().with_selected(selected),
      width: None,
      page_size: DEFAULT_PAGE_SIZE,
      dispatcher,
      report: None,
      instruction_footer: InstructionFooter::default(),
    }
  }

  pub fn state(&self) -> &SelectionState {
    &self.state
  }

  pub fn report(&self) -> Option<&ActionReport> {
    self.report.as_ref()
  }

  pub fn outcome(&self) -> SessionOutcome {
    match &self.state {
      SelectionState::Confirmed(branch) => SessionOutcome::Selected(branch.clone()),
      _ => SessionOutcome::NoSelection,
    }
  }

  pub fn selected_index(&self) -> Option<usize> {
    self.list_state.selected()
  }

  fn get_selected_branch(&self) -> Option<&BranchItem> {
    let selected_index = self.list_state.selected()?;
    self.branches.get(selected_index)
  }

  fn move_selection(&mut self, to: impl FnOnce(usize, usize) -> usize) {
    let Some(selected) = self.list_state.selected() else {
      return;
    };
    let final_index = self.branches.len().saturating_sub(1);
    self.list_state.select(Some(to(selected, final_index).min(final_index)));
  }

  pub fn select_previous(&mut self) {
    self.move_selection(|selected, _| selected.saturating_sub(1));
  }

  pub fn select_next(&mut self) {
    self.move_selection(|selected, _| selected + 1);
  }

  pub fn select_previous_page(&mut self) {
    let page_size = self.page_size;
    self.move_selection(|selected, _| selected.saturating_sub(page_size));
  }

  pub fn select_next_page(&mut self) {
    let page_size = self.page_size;
    self.move_selection(|selected, _| selected.saturating_add(page_size));
  }

  pub fn select_first(&mut self) {
    self.move_selection(|_, _| 0);
  }

  pub fn select_last(&mut self) {
    self.move_selection(|_, final_index| final_index);
  }

  pub fn page(&self) -> usize {
    self.list_state.selected().unwrap_or(0) / self.page_size
  }

  pub fn page_count(&self) -> usize {
    self.branches.len().div_ceil(self.page_size).max(1)
  }

  /// Indexes of the rows on the page holding the cursor.
  pub fn visible_range(&self) -> Range<usize> {
    if self.branches.is_empty() {
      return 0..0;
    }
    let start = self.page() * self.page_size;
    start..(start + self.page_size).min(self.branches.len())
  }

  async fn confirm(&mut self) -> Option<Action> {
    let name = self.get_selected_branch()?.branch.name.clone();
    info!("Confirmed branch {}", name);
    self.state = SelectionState::Confirmed(name.clone());
    self.report = Some(self.dispatcher.dispatch(&name, self.mode).await);
    Some(Action::Quit)
  }

  fn render_list(&mut self, f: &mut Frame<'_>, area: Rect) {
    if area.height > 0 {
      self.page_size = usize::from(area.height);
    }
    if self.branches.is_empty() {
      let empty = Paragraph::new(Line::from(vec![Span::raw(" "), Span::raw("No items.")]))
        .style(Style::default().add_modifier(Modifier::DIM));
      f.render_widget(empty, area);
      return;
    }

    let width = self.width.map_or(area.width, |width| width.min(area.width));
    let selected = self.selected_index();
    let render_items: Vec<ListItem> = self
      .visible_range()
      .map(|index| self.branches[index].render(index, selected == Some(index), width))
      .collect();
    f.render_widget(List::new(render_items), area);
  }

  fn render_closing(&self, f: &mut Frame<'_>, area: Rect) {
    let (message, style) = match (&self.state, &self.report) {
      (SelectionState::Confirmed(_), Some(report)) if report.is_failure() => {
        (report.message(), Style::default().fg(Color::Red))
      },
      (SelectionState::Confirmed(_), Some(report)) => (report.message(), Style::default()),
      _ => (FAREWELL.to_string(), Style::default()),
    };
    let paragraph = Paragraph::new(message).style(style).block(Block::default().padding(Padding::new(1, 0, 1, 1)));
    f.render_widget(paragraph, area);
  }
}

#[async_trait::async_trait]
impl Component for BranchList {
  async fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<Action>> {
    if self.state != SelectionState::Browsing {
      return Ok(None);
    }
    let action = match key {
      KeyEvent { code: KeyCode::Char('c' | 'C'), modifiers: KeyModifiers::CONTROL, .. } => Some(Action::Cancel),
      KeyEvent { code: KeyCode::Char('q') | KeyCode::Esc, .. } => Some(Action::Cancel),
      KeyEvent { code: KeyCode::Enter, .. } => Some(Action::Confirm),
      KeyEvent { code: KeyCode::Up | KeyCode::Char('k'), .. } => Some(Action::SelectPrevious),
      KeyEvent { code: KeyCode::Down | KeyCode::Char('j'), .. } => Some(Action::SelectNext),
      KeyEvent { code: KeyCode::Left | KeyCode::PageUp | KeyCode::Char('h'), .. } => Some(Action::SelectPreviousPage),
      KeyEvent { code: KeyCode::Right | KeyCode::PageDown | KeyCode::Char('l'), .. } => Some(Action::SelectNextPage),
      KeyEvent { code: KeyCode::Home | KeyCode::Char('g'), .. } => Some(Action::SelectFirst),
      KeyEvent { code: KeyCode::End | KeyCode::Char('G'), .. } => Some(Action::SelectLast),
      _ => None,
    };
    Ok(action)
  }

  async fn update(&mut self, action: Action) -> Result<Option<Action>> {
    if let Action::Resize(width, _) = action {
      self.width = Some(width);
      return Ok(None);
    }
    if self.state != SelectionState::Browsing {
      return Ok(None);
    }
    match action {
      Action::Cancel => {
        self.state = SelectionState::Cancelled;
        Ok(Some(Action::Quit))
      },
      Action::Confirm => Ok(self.confirm().await),
      Action::SelectPrevious => {
        self.select_previous();
        Ok(None)
      },
      Action::SelectNext => {
        self.select_next();
        Ok(None)
      },
      Action::SelectPreviousPage => {
        self.select_previous_page();
        Ok(None)
      },
      Action::SelectNextPage => {
        self.select_next_page();
        Ok(None)
      },
      Action::SelectFirst => {
        self.select_first();
        Ok(None)
      },
      Action::SelectLast => {
        self.select_last();
        Ok(None)
      },
      _ => Ok(None),
    }
  }

  fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
    if self.state != SelectionState::Browsing {
      self.render_closing(f, area);
      return Ok(());
    }

    let layout = Layout::new(
      Direction::Vertical,
      [Constraint::Length(1), Constraint::Length(1), Constraint::Length(1), Constraint::Fill(1), Constraint::Length(1)],
    )
    .split(area);

    let title = Line::from(vec![
      Span::raw(" "),
      Span::styled(format!(" {} ", TITLE), Style::default().fg(Color::Indexed(230)).bg(Color::Indexed(62))),
    ]);
    f.render_widget(title, layout[1]);
    self.render_list(f, layout[3]);
    self.instruction_footer.render(
      f,
      layout[4],
      self.mode,
      self.page(),
      self.page_count(),
      self.get_selected_branch().is_some(),
    );

    Ok(())
  }
}
