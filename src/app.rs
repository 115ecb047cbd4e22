use color_eyre::eyre::{Result, WrapErr, eyre};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::error;

use crate::{
  action::Action,
  components::{
    Component,
    branch_list::{BranchList, SessionOutcome},
  },
  dispatcher::Dispatcher,
  git::{GitBranch, GitRepo},
  mode::RunMode,
  tui::{self, Tui},
};

const NOT_A_REPOSITORY: &str = "You must be in a git repository to run this command";

/// Lists the local branches. When git cannot list them the message is printed and the session
/// continues with no branches, unless `require_repo` is set, in which case the failure is returned.
pub async fn load_branches(repo: &dyn GitRepo, require_repo: bool) -> Result<Vec<GitBranch>> {
  match repo.local_branches().await {
    Ok(branches) => Ok(branches),
    Err(e) => {
      error!("Unable to list branches: {}", e);
      println!("{}", NOT_A_REPOSITORY);
      if require_repo {
        return Err(e).wrap_err(NOT_A_REPOSITORY);
      }
      Ok(Vec::new())
    },
  }
}

pub struct App {
  pub branch_list: BranchList,
  pub should_quit: bool,
  action_tx: UnboundedSender<Action>,
  action_rx: UnboundedReceiver<Action>,
}

impl App {
  pub fn new(branches: Vec<GitBranch>, mode: RunMode, dispatcher: Dispatcher) -> Self {
    let (action_tx, action_rx) = mpsc::unbounded_channel();
    Self { branch_list: BranchList::new(branches, mode, dispatcher), should_quit: false, action_tx, action_rx }
  }

  /// Feeds one terminal event through the branch list and drains the actions it produces.
  ///
  /// A failed terminal read ends the session with an error.
  pub async fn handle_event(&mut self, e: tui::Event) -> Result<()> {
    if e == tui::Event::Error {
      return Err(eyre!("Failed to read terminal events"));
    }
    if let Some(action) = self.branch_list.handle_events(Some(e)).await? {
      self.action_tx.send(action)?;
    }

    while let Ok(action) = self.action_rx.try_recv() {
      log::debug!("{action:?}");
      if action == Action::Quit {
        self.should_quit = true;
      }
      if let Some(action) = self.branch_list.update(action).await? {
        self.action_tx.send(action)?
      };
    }
    Ok(())
  }

  /// Runs the render-then-wait loop until the list is confirmed or cancelled.
  pub async fn run(&mut self) -> Result<SessionOutcome> {
    let mut tui = Tui::new()?;
    tui.enter()?;

    loop {
      let Some(e) = tui.next().await else {
        break;
      };
      if e == tui::Event::Init {
        let size = tui.size()?;
        self.action_tx.send(Action::Resize(size.width, size.height))?;
      }
      if let Err(err) = self.handle_event(e).await {
        tui.exit()?;
        return Err(err);
      }

      let mut draw_result = Ok(());
      tui.draw(|f| {
        let area = f.area();
        draw_result = self.branch_list.draw(f, area);
      })?;
      draw_result?;

      if self.should_quit {
        break;
      }
    }
    tui.exit()?;
    if let Some(report) = self.branch_list.report() {
      log::info!("{:?} of {} finished: {}", self.branch_list.state(), report.branch(), report.message());
    }
    Ok(self.branch_list.outcome())
  }
}
