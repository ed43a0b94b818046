// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use copypasta_ext::{copypasta::ClipboardProvider, x11_fork::ClipboardContext};

pub type ClipboardResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Source of pasted text. [`SystemClipboard`] is the real one, [`TestClipboard`] is for
/// tests.
pub trait ClipboardService {
    /// Current text content of the clipboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the clipboard can't be reached or holds no text.
    fn try_to_get_content_from_clipboard(&mut self) -> ClipboardResult<String>;
}

#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardService for SystemClipboard {
    fn try_to_get_content_from_clipboard(&mut self) -> ClipboardResult<String> {
        let mut ctx = ClipboardContext::new()?;
        let content = ctx.get_contents()?;
        Ok(content)
    }
}

#[derive(Debug, Default)]
pub struct TestClipboard {
    /// [None] behaves like an unavailable clipboard.
    pub content: Option<String>,
}

impl TestClipboard {
    #[must_use]
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
        }
    }
}

impl ClipboardService for TestClipboard {
    fn try_to_get_content_from_clipboard(&mut self) -> ClipboardResult<String> {
        self.content
            .clone()
            .ok_or_else(|| "clipboard is empty".into())
    }
}
