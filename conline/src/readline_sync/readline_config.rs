// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::time::Duration;

use crate::EditMode;

pub const DEFAULT_WORD_BREAK_CHARS: &str = "/\\=[]{}()";
pub const DEFAULT_ERASE_WORD_BREAK_CHARS: &str = "\\/";
pub const DEFAULT_HISTORY_MAX_ENTRIES: usize = 1000;
pub const DEFAULT_HISTORY_SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_HISTORY_SEARCH: &str = "CONLINE_HISTORY_SEARCH";
pub const ENV_HISTORY_SEARCH_TIMEOUT_MS: &str = "CONLINE_HISTORY_SEARCH_TIMEOUT_MS";
pub const ENV_PROGRAM_NAME: &str = "CONLINE_PROGRAM_NAME";

/// Knobs for [`crate::ReadlineContext`]. Start from [`Default`] (or
/// [`ReadlineConfig::from_env`]) and adjust with the `with_*` methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadlineConfig {
    /// Units that delimit words for `Ctrl+Left` and `Ctrl+Right`.
    pub word_break_chars: String,
    /// Units that delimit words for `Ctrl+Backspace` and `Ctrl+Delete`.
    pub erase_word_break_chars: String,
    pub initial_edit_mode: EditMode,
    /// [None] keeps every submitted line.
    pub history_max_entries: Option<usize>,
    /// Command line of the external history picker. [None] disables `F7`.
    pub history_search_command: Option<String>,
    pub history_search_timeout: Duration,
    /// Alias lookups are scoped to this name.
    pub program_name: String,
}

impl Default for ReadlineConfig {
    fn default() -> Self {
        Self {
            word_break_chars: DEFAULT_WORD_BREAK_CHARS.to_string(),
            erase_word_break_chars: DEFAULT_ERASE_WORD_BREAK_CHARS.to_string(),
            initial_edit_mode: EditMode::Overwrite,
            history_max_entries: Some(DEFAULT_HISTORY_MAX_ENTRIES),
            history_search_command: None,
            history_search_timeout: DEFAULT_HISTORY_SEARCH_TIMEOUT,
            program_name: current_program_name(),
        }
    }
}

impl ReadlineConfig {
    /// [`Default`] with the `CONLINE_*` environment variables applied on top.
    #[must_use]
    pub fn from_env() -> Self { Self::default().overlay_env(|key| std::env::var(key).ok()) }

    /// Apply whatever `lookup` finds for the `CONLINE_*` keys. Unparsable values are
    /// logged and skipped.
    #[must_use]
    pub fn overlay_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(command) = lookup(ENV_HISTORY_SEARCH) {
            let command = command.trim();
            self.history_search_command =
                (!command.is_empty()).then(|| command.to_string());
        }

        if let Some(millis) = lookup(ENV_HISTORY_SEARCH_TIMEOUT_MS) {
            match millis.trim().parse::<u64>() {
                Ok(millis) => self.history_search_timeout = Duration::from_millis(millis),
                Err(error) => tracing::warn!(
                    message = "ignoring bad environment value",
                    key = ENV_HISTORY_SEARCH_TIMEOUT_MS,
                    value = %millis,
                    error = %error
                ),
            }
        }

        if let Some(name) = lookup(ENV_PROGRAM_NAME)
            && !name.trim().is_empty()
        {
            self.program_name = name.trim().to_string();
        }

        self
    }

    #[must_use]
    pub fn with_word_break_chars(mut self, chars: impl Into<String>) -> Self {
        self.word_break_chars = chars.into();
        self
    }

    #[must_use]
    pub fn with_erase_word_break_chars(mut self, chars: impl Into<String>) -> Self {
        self.erase_word_break_chars = chars.into();
        self
    }

    #[must_use]
    pub fn with_initial_edit_mode(mut self, mode: EditMode) -> Self {
        self.initial_edit_mode = mode;
        self
    }

    #[must_use]
    pub fn with_history_max_entries(mut self, max: Option<usize>) -> Self {
        self.history_max_entries = max;
        self
    }

    #[must_use]
    pub fn with_history_search_command(mut self, command: Option<String>) -> Self {
        self.history_search_command = command;
        self
    }

    #[must_use]
    pub fn with_history_search_timeout(mut self, timeout: Duration) -> Self {
        self.history_search_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_program_name(mut self, name: impl Into<String>) -> Self {
        self.program_name = name.into();
        self
    }
}

/// File stem of the running executable, or an empty string if that can't be found.
#[must_use]
pub fn current_program_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serial_test::serial;

    use super::*;
    use crate::assert_eq2;

    fn lookup_in(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ReadlineConfig::default();
        assert_eq2!(config.word_break_chars, "/\\=[]{}()");
        assert_eq2!(config.erase_word_break_chars, "\\/");
        assert_eq2!(config.initial_edit_mode, EditMode::Overwrite);
        assert_eq2!(config.history_max_entries, Some(1000));
        assert_eq2!(config.history_search_command, None);
        assert_eq2!(config.history_search_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_overlay_env() {
        let config = ReadlineConfig::default().overlay_env(lookup_in(&[
            (ENV_HISTORY_SEARCH, "  fzf --tac "),
            (ENV_HISTORY_SEARCH_TIMEOUT_MS, "250"),
            (ENV_PROGRAM_NAME, "cmd"),
        ]));
        assert_eq2!(config.history_search_command, Some("fzf --tac".to_string()));
        assert_eq2!(config.history_search_timeout, Duration::from_millis(250));
        assert_eq2!(config.program_name, "cmd");
    }

    #[test]
    fn test_overlay_env_skips_bad_values() {
        let config = ReadlineConfig::default()
            .with_program_name("host")
            .with_history_search_command(Some("fzf".to_string()))
            .overlay_env(lookup_in(&[
                (ENV_HISTORY_SEARCH, "   "),
                (ENV_HISTORY_SEARCH_TIMEOUT_MS, "soon"),
                (ENV_PROGRAM_NAME, ""),
            ]));
        assert_eq2!(config.history_search_command, None);
        assert_eq2!(config.history_search_timeout, DEFAULT_HISTORY_SEARCH_TIMEOUT);
        assert_eq2!(config.program_name, "host");
    }

    #[test]
    #[serial]
    fn test_from_env() {
        // SAFETY: serialized with the other tests that touch the environment.
        unsafe {
            std::env::set_var(ENV_HISTORY_SEARCH, "sk");
            std::env::set_var(ENV_PROGRAM_NAME, "from-env");
        }
        let config = ReadlineConfig::from_env();
        unsafe {
            std::env::remove_var(ENV_HISTORY_SEARCH);
            std::env::remove_var(ENV_PROGRAM_NAME);
        }
        assert_eq2!(config.history_search_command, Some("sk".to_string()));
        assert_eq2!(config.program_name, "from-env");
    }

    #[test]
    fn test_builders() {
        let config = ReadlineConfig::default()
            .with_word_break_chars("-")
            .with_erase_word_break_chars("_")
            .with_initial_edit_mode(EditMode::Insert)
            .with_history_max_entries(None)
            .with_history_search_timeout(Duration::from_secs(1));
        assert_eq2!(config.word_break_chars, "-");
        assert_eq2!(config.erase_word_break_chars, "_");
        assert_eq2!(config.initial_edit_mode, EditMode::Insert);
        assert_eq2!(config.history_max_entries, None);
        assert_eq2!(config.history_search_timeout, Duration::from_secs(1));
    }
}
