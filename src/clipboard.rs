//! Copying the selection's number string to a clipboard.
//!
//! `SystemClipboard` is a thin wrapper around the `arboard` crate. On some
//! platforms or in headless CI environments clipboard initialization may
//! fail; the export reports that as [`ExportOutcome::Failed`] instead of
//! pretending the copy happened.

use crate::error::{Error, Result};
use crate::summary::Summary;

/// Something text can be written to.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;

    /// Whether written text disappears when this process exits.
    fn releases_on_exit(&self) -> bool {
        false
    }
}

/// X11/Wayland serve clipboard contents from the owning process, so a copy
/// disappears on exit unless a clipboard manager took it over.
const OWNER_SERVES_CLIPBOARD: bool = cfg!(all(
    unix,
    not(any(target_os = "macos", target_os = "ios", target_os = "android"))
));

/// The OS clipboard. The `arboard` handle is opened lazily on first write.
#[derive(Default)]
pub struct SystemClipboard {
    ctx: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut ctx = match self.ctx.take() {
            Some(ctx) => ctx,
            None => arboard::Clipboard::new().map_err(|e| Error::Clipboard {
                stage: "init",
                message: e.to_string(),
            })?,
        };
        let res = ctx.set_text(text.to_owned()).map_err(|e| Error::Clipboard {
            stage: "set",
            message: e.to_string(),
        });
        self.ctx = Some(ctx);
        res
    }

    fn releases_on_exit(&self) -> bool {
        OWNER_SERVES_CLIPBOARD
    }
}

/// In-process clipboard, for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_owned());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Nothing selected, so nothing was written.
    Nothing,
    Copied { value: String },
    Failed { value: String, reason: String },
}

impl ExportOutcome {
    /// The acknowledgment shown to the user.
    pub fn message(&self) -> String {
        match self {
            ExportOutcome::Nothing => "Nothing selected; clipboard left unchanged.".to_string(),
            ExportOutcome::Copied { value } => format!("Copied to clipboard: {}", value),
            ExportOutcome::Failed { value, reason } => {
                format!("Could not copy to clipboard ({}). Numbers: {}", reason, value)
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExportOutcome::Copied { .. })
    }
}

/// Write `summary.numbers` to `sink`, byte for byte. No retry on failure.
pub fn export_selection(summary: &Summary, sink: &mut impl ClipboardSink) -> ExportOutcome {
    if !summary.export_visible() {
        return ExportOutcome::Nothing;
    }
    let value = summary.numbers.clone();
    match sink.set_text(&value) {
        Ok(()) => {
            log::info!("copied selection to clipboard: {}", value);
            ExportOutcome::Copied { value }
        }
        Err(e) => {
            log::warn!("failed to copy to clipboard: {}", e);
            ExportOutcome::Failed {
                value,
                reason: e.to_string(),
            }
        }
    }
}
