use tracing::info;

use crate::error::Error;

pub trait Clipboard: Send + Sync {
  fn set_text(&mut self, text: &str) -> Result<(), Error>;
}

/// The system clipboard. A new handle is opened per write since at most one write happens per run.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
  fn set_text(&mut self, text: &str) -> Result<(), Error> {
    info!("Copying `{}` to the clipboard", text);
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_string())?;
    Ok(())
  }
}
