use std::{
  io::{Stdout, Write, stdout},
  ops::{Deref, DerefMut},
};

use color_eyre::eyre::Result;
use crossterm::{
  cursor,
  event::{Event as CrosstermEvent, KeyEvent, KeyEventKind},
  terminal::{disable_raw_mode, enable_raw_mode, is_raw_mode_enabled},
};
use futures::{FutureExt, StreamExt};
use ratatui::{Terminal, TerminalOptions, Viewport, backend::CrosstermBackend as Backend};
use serde::{Deserialize, Serialize};
use tokio::{
  sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
  task::JoinHandle,
};
use tokio_util::sync::CancellationToken;
use tracing::error;

pub type IO = Stdout;
pub fn io() -> IO {
  stdout()
}
pub type Frame<'a> = ratatui::Frame<'a>;

/// Rows reserved below the prompt. The last frame stays in the scrollback once the program exits.
pub const VIEWPORT_HEIGHT: u16 = 14;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
  Init,
  Error,
  Key(KeyEvent),
  Resize(u16, u16),
}

pub struct Tui {
  pub terminal: Terminal<Backend<IO>>,
  pub task: JoinHandle<()>,
  pub cancellation_token: CancellationToken,
  pub event_rx: UnboundedReceiver<Event>,
  pub event_tx: UnboundedSender<Event>,
}

impl Tui {
  pub fn new() -> Result<Self> {
    let terminal =
      Terminal::with_options(Backend::new(io()), TerminalOptions { viewport: Viewport::Inline(VIEWPORT_HEIGHT) })?;
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let cancellation_token = CancellationToken::new();
    let task = tokio::spawn(async {});
    Ok(Self { terminal, task, cancellation_token, event_rx, event_tx })
  }

  pub fn start(&mut self) {
    self.cancel();
    self.cancellation_token = CancellationToken::new();
    let cancellation_token = self.cancellation_token.clone();
    let event_tx = self.event_tx.clone();
    self.task = tokio::spawn(async move {
      let mut reader = crossterm::event::EventStream::new();
      if event_tx.send(Event::Init).is_err() {
        return;
      }
      loop {
        let crossterm_event = reader.next().fuse();
        let event = tokio::select! {
          _ = cancellation_token.cancelled() => break,
          maybe_event = crossterm_event => match maybe_event {
            Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => Event::Key(key),
            Some(Ok(CrosstermEvent::Resize(x, y))) => Event::Resize(x, y),
            Some(Ok(_)) => continue,
            Some(Err(e)) => {
              error!("Failed to read terminal event: {}", e);
              let _ = event_tx.send(Event::Error);
              break;
            },
            None => break,
          },
        };
        if event_tx.send(event).is_err() {
          break;
        }
      }
    });
  }

  pub fn stop(&self) {
    self.cancel();
    if !self.task.is_finished() {
      self.task.abort();
    }
  }

  pub fn enter(&mut self) -> Result<()> {
    enable_raw_mode()?;
    crossterm::execute!(io(), cursor::Hide)?;
    self.start();
    Ok(())
  }

  pub fn exit(&mut self) -> Result<()> {
    self.stop();
    if is_raw_mode_enabled()? {
      let area = self.terminal.get_frame().area();
      self.terminal.set_cursor_position((0, area.bottom().saturating_sub(1)))?;
      self.terminal.backend_mut().flush()?;
      restore()?;
    }
    Ok(())
  }

  pub fn cancel(&self) {
    self.cancellation_token.cancel();
  }

  pub async fn next(&mut self) -> Option<Event> {
    self.event_rx.recv().await
  }
}

/// Leaves raw mode and moves below the inline viewport so the shell prompt lands after the last frame.
pub fn restore() -> Result<()> {
  if is_raw_mode_enabled()? {
    disable_raw_mode()?;
    let mut out = io();
    crossterm::execute!(out, cursor::Show)?;
    writeln!(out)?;
  }
  Ok(())
}

impl Deref for Tui {
  type Target = Terminal<Backend<IO>>;

  fn deref(&self) -> &Self::Target {
    &self.terminal
  }
}

impl DerefMut for Tui {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.terminal
  }
}

impl Drop for Tui {
  fn drop(&mut self) {
    if let Err(e) = self.exit() {
      error!("Failed to restore terminal: {:?}", e);
    }
  }
}
