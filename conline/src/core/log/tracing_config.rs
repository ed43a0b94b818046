// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::ops::Add;

use tracing_core::LevelFilter;

/// Default log file, created in the current working directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "conline_log.txt";

/// Where display (non file) log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

/// Which writers the subscriber gets. The [`String`] payloads are log file paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    File(String),
    DisplayAndFile(DisplayPreference, String),
}

/// Configure the tracing subscriber. Build one directly, or convert from a
/// [`LevelFilter`], a [`DisplayPreference`] or a [`WriterConfig`] and merge them with
/// `+`.
///
/// ```
/// use conline::{DisplayPreference, TracingConfig, WriterConfig};
/// use tracing_core::LevelFilter;
///
/// let config = TracingConfig::from(LevelFilter::INFO)
///     + TracingConfig::from(DisplayPreference::Stderr);
/// assert_eq!(
///     config.writer_config,
///     WriterConfig::DisplayAndFile(
///         DisplayPreference::Stderr,
///         conline::DEFAULT_LOG_FILE_NAME.to_string()
///     )
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    pub level_filter: LevelFilter,
    pub writer_config: WriterConfig,
}

impl TracingConfig {
    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { self.level_filter }

    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }

    /// Log to `file_path` at `DEBUG` level.
    #[must_use]
    pub fn new_file(file_path: impl Into<String>) -> Self {
        Self {
            level_filter: LevelFilter::DEBUG,
            writer_config: WriterConfig::File(file_path.into()),
        }
    }
}

impl From<LevelFilter> for TracingConfig {
    fn from(level_filter: LevelFilter) -> Self {
        Self {
            level_filter,
            writer_config: WriterConfig::File(DEFAULT_LOG_FILE_NAME.to_string()),
        }
    }
}

impl From<DisplayPreference> for TracingConfig {
    fn from(preferred_display: DisplayPreference) -> Self {
        Self {
            level_filter: LevelFilter::DEBUG,
            writer_config: WriterConfig::Display(preferred_display),
        }
    }
}

impl From<WriterConfig> for TracingConfig {
    fn from(writer_config: WriterConfig) -> Self {
        Self {
            level_filter: LevelFilter::DEBUG,
            writer_config,
        }
    }
}

/// Merge two configurations. The more verbose level wins, writers are merged with
/// [`WriterConfig`]'s `+`.
impl Add<TracingConfig> for TracingConfig {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            level_filter: self.level_filter.max(rhs.level_filter),
            writer_config: self.writer_config + rhs.writer_config,
        }
    }
}

/// Merge two writer configurations. On collision `rhs` has higher specificity and
/// clobbers `self`.
impl Add<WriterConfig> for WriterConfig {
    type Output = Self;

    fn add(self, rhs: WriterConfig) -> Self::Output {
        use WriterConfig::{Display, DisplayAndFile, File, None};

        match (self, rhs) {
            (None, rhs) => rhs,
            (lhs, None) => lhs,
            (Display(dp), File(f))
            | (Display(_) | File(_) | DisplayAndFile(..), DisplayAndFile(dp, f)) => {
                DisplayAndFile(dp, f)
            }
            (File(f), Display(dp)) | (DisplayAndFile(_, f), Display(dp)) => {
                DisplayAndFile(dp, f)
            }
            (DisplayAndFile(dp, _), File(f)) => DisplayAndFile(dp, f),
            (Display(_), Display(dp)) => Display(dp),
            (File(_), File(f)) => File(f),
        }
    }
}
